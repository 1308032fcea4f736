//! Error types for flexkids-dl
//!
//! Only [`Error::Auth`] and [`Error::Config`] ever abort a run. Every other
//! variant is observed by the stage that produced it, logged against the
//! offending period or photo, and the item is skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for flexkids-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for flexkids-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "album_workers")
        key: Option<String>,
    },

    /// Authentication failed, the pipeline never starts
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// A request could not be constructed (bad URL or builder failure)
    #[error("cannot build request for {url}: {reason}")]
    RequestBuild {
        /// The URL the request was aimed at
        url: String,
        /// Why construction failed
        reason: String,
    },

    /// Connection, TLS or body read failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The portal answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        /// The requested URL
        url: String,
        /// The HTTP status code
        status: u16,
    },

    /// Local filesystem failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// An extraction pattern failed to compile
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Creates a configuration error for a specific key.
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Wraps a reqwest error, routing builder failures to [`Error::RequestBuild`].
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::RequestBuild {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Whether this error happened before anything was sent.
    pub fn is_request_build(&self) -> bool {
        matches!(self, Error::RequestBuild { .. })
    }
}

/// Errors from the one-shot login exchange
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login response carried no cookies
    #[error("login response did not set a session cookie")]
    NoSessionCookie,

    /// The login request could not be constructed
    #[error("cannot build login request: {0}")]
    RequestBuild(String),

    /// The login request failed in transit
    #[error("login request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The portal refused the login
    #[error("login rejected with HTTP {status}")]
    Rejected {
        /// The HTTP status code
        status: u16,
    },
}

/// Filesystem errors while laying out or writing the output tree
#[derive(Debug, Error)]
pub enum StorageError {
    /// A period directory could not be created
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A photo could not be written
    #[error("cannot write {path}: {source}")]
    Write {
        /// The file that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
