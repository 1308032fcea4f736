//! Configuration types for flexkids-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Portal used when no base URL is given
pub const DEFAULT_BASE_URL: &str = "https://kindergarden.flexkids.nl";

/// Output root used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Main configuration for a harvest run
///
/// Built once at startup and shared read-only (behind an `Arc`) by the
/// session acquirer and every pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base address of the portal (default: "https://kindergarden.flexkids.nl")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Root of the output tree (default: "output")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Username for authentication
    #[serde(default)]
    pub username: String,

    /// Password for authentication
    #[serde(default)]
    pub password: String,

    /// Number of concurrent album lookups (default: 12)
    #[serde(default = "default_album_workers")]
    pub album_workers: usize,

    /// Number of concurrent photo downloads (default: 2)
    #[serde(default = "default_photo_workers")]
    pub photo_workers: usize,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            output_dir: default_output_dir(),
            username: String::new(),
            password: String::new(),
            album_workers: default_album_workers(),
            photo_workers: default_photo_workers(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Whether both username and password are present.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Check the configuration before any request is issued.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(Error::config("username", "username is required"));
        }
        if self.password.is_empty() {
            return Err(Error::config("password", "password is required"));
        }
        if self.album_workers == 0 {
            return Err(Error::config("album_workers", "must be at least 1"));
        }
        if self.photo_workers == 0 {
            return Err(Error::config("photo_workers", "must be at least 1"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::config("base_url", format!("invalid base url: {e}")))?;
        Ok(())
    }

    /// Absolute URL for one of the fixed portal paths.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_album_workers() -> usize {
    12
}

fn default_photo_workers() -> usize {
    2
}

fn default_user_agent() -> String {
    concat!("flexkids-dl/", env!("CARGO_PKG_VERSION")).to_string()
}
