//! Console logging for the command line tool.

use tracing::Level;

/// Install a global fmt subscriber printing INFO and above to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let result = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
