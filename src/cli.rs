//! Command line arguments.

use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Download every photo album from a Flexkids parent account
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "flexkids-dl", version, about, long_about = None)]
pub struct Args {
    /// Account username
    #[arg(long)]
    pub username: Option<String>,

    /// Account password
    #[arg(long)]
    pub password: Option<String>,

    /// URL of the Flexkids web site
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Output directory
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,
}

impl Args {
    /// Whether both credentials were given and are non-empty
    pub fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.username) && present(&self.password)
    }

    /// Rendered help text
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }

    /// Build the run configuration; worker counts keep their defaults.
    pub fn into_config(self) -> Config {
        Config {
            base_url: self.url,
            output_dir: self.output,
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            ..Default::default()
        }
    }
}
