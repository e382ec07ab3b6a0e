//! # nzbget-unzip
//!
//! NZBGet post-processing hook that extracts ZIP and RAR archives NZBGet's
//! own unpacker left behind in a completed download.
//!
//! ## How a run works
//!
//! NZBGet starts the hook once per completed download and passes its settings
//! as environment variables. The hook:
//!
//! 1. validates the configuration ([`HookConfig`]),
//! 2. checks that the download succeeded and its directory still exists,
//! 3. optionally waits for NZBGet's UnpackCleanupDisk action,
//! 4. extracts archives with unrar / 7-Zip until no new ones appear,
//! 5. optionally deletes the archives it extracted,
//!
//! and reports the outcome through exit code 93 (success), 94 (error) or
//! 95 (nothing done).
//!
//! ## Quick Start
//!
//! ```no_run
//! use nzbget_unzip::run_hook;
//! use std::process::ExitCode;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> ExitCode {
//!     nzbget_unzip::logging::init();
//!     let result = run_hook(|key| std::env::var(key).ok()).await;
//!     ExitCode::from(result.exit_code())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Archive discovery and extraction
pub mod extraction;
/// NZBGet log format
pub mod logging;
/// Post-processing pipeline
pub mod post_processing;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::{ExtractorConfig, HookConfig};
pub use error::{Error, Result, ToRunResult};
pub use extraction::{ArchiveExtractor, CliExtractor, ExtractorSet, is_archive, is_rar};
pub use post_processing::PostProcessor;
pub use types::{ArchiveCandidate, ArchiveFamily, ExtractedSet, RunResult};

use tracing::{error, info};

/// Run the hook against the options visible through `lookup`
///
/// Never fails: configuration problems are logged and turned into
/// [`RunResult::Failure`], everything else into the pipeline's result.
pub async fn run_hook<F>(lookup: F) -> RunResult
where
    F: Fn(&str) -> Option<String>,
{
    if let Err(e) = config::check_host(&lookup) {
        error!("{}", e);
        return e.run_result();
    }

    info!(
        "Script successfully started - {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = match HookConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return e.run_result();
        }
    };

    PostProcessor::new(config).run().await
}
