use clap::Parser;
use flexkids_dl::Harvester;
use flexkids_dl::cli::Args;
use flexkids_dl::logging::init_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    if !args.has_credentials() {
        eprintln!("{}", Args::usage());
        return ExitCode::SUCCESS;
    }

    let harvester = match Harvester::new(args.into_config()) {
        Ok(harvester) => harvester,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match harvester.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Could not login");
            ExitCode::FAILURE
        }
    }
}
