//! Error types for nzbget-unzip
//!
//! Every failure the hook can run into is represented here and eventually
//! turned into one of the three exit codes NZBGet understands. The mapping
//! lives in [`ToRunResult`] so the pipeline never has to decide exit codes
//! at the point where an error is raised.

use crate::types::RunResult;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nzbget-unzip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for nzbget-unzip
#[derive(Debug, Error)]
pub enum Error {
    /// The hook was started by something that is not NZBGet v18 or later
    #[error("This script requires NZBGet v18.0 or later")]
    UnsupportedHost,

    /// A required option is absent from the host environment
    #[error("Option {} is missing in NZBGet configuration. Please check script settings", option_name(.key))]
    MissingOption {
        /// Full environment variable name (e.g. "NZBPO_WAITTIME")
        key: String,
    },

    /// An option is present but unusable
    #[error("{0}")]
    Config(String),

    /// Host-level pre-condition not met (download failed, directory gone)
    #[error("{0}")]
    Precondition(String),

    /// An extractor could not be launched (`<command>: <os error>`)
    #[error("{0}")]
    ExternalTool(String),

    /// Failed to remove an extracted archive during cleanup
    #[error("failed to delete {path}: {source}")]
    Cleanup {
        /// File that could not be removed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Strip the six-character `NZBOP_`/`NZBPO_`/`NZBPP_` prefix the way NZBGet
/// displays option names in its settings page.
fn option_name(key: &str) -> &str {
    key.get(6..).filter(|_| key.starts_with("NZB")).unwrap_or(key)
}

/// Map errors to the post-processing status reported back to NZBGet
pub trait ToRunResult {
    /// Get the run result for this error
    fn run_result(&self) -> RunResult;
}

impl ToRunResult for Error {
    fn run_result(&self) -> RunResult {
        match self {
            // 94 - the script or the host is misconfigured
            Error::UnsupportedHost | Error::MissingOption { .. } | Error::Config(_) => {
                RunResult::Failure
            }

            // 95 - nothing wrong with the setup, but no success either
            Error::Precondition(_)
            | Error::ExternalTool(_)
            | Error::Cleanup { .. }
            | Error::Io(_) => RunResult::NoActionTaken,
        }
    }
}
