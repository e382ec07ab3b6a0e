//! Traits and types for archive extraction

use async_trait::async_trait;
use std::path::Path;

/// Outcome of one extractor run that actually started
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractResult {
    /// Whether the exit status counts as success
    pub success: bool,
    /// Exit code, `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl ExtractResult {
    /// A successful run with the given exit code
    pub fn succeeded(exit_code: i32) -> Self {
        Self {
            success: true,
            exit_code: Some(exit_code),
        }
    }

    /// A failed run with the given exit code
    pub fn failed(exit_code: Option<i32>) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Trait for extracting one archive into a destination directory
///
/// The extraction loop only talks to this trait, so the subprocess-based
/// [`CliExtractor`](super::CliExtractor) can be swapped for an in-process
/// stand-in in tests.
#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    /// Extract `archive` into `dest`, waiting for completion
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExternalTool`](crate::Error::ExternalTool) if the
    /// extractor could not be started at all (missing binary, permission
    /// denied). A started extractor that exits unsuccessfully is reported
    /// through [`ExtractResult::success`] instead.
    async fn extract(&self, archive: &Path, dest: &Path) -> crate::Result<ExtractResult>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
