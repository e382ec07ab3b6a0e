//! Archive discovery and extraction
//!
//! This module finds RAR and ZIP archive parts left in a completed download
//! and hands them to external extractors until nothing is left to extract.

mod classify;
mod cli;
mod scan;
mod traits;
mod unpack;


// Re-exports
pub use classify::{is_archive, is_rar};
pub use cli::CliExtractor;
pub use scan::scan_candidates;
pub use traits::{ArchiveExtractor, ExtractResult};
pub use unpack::{ExtractorSet, UnpackReport, unpack_until_done};

use crate::config::HookConfig;
use crate::error::Result;
use crate::types::ArchiveFamily;
use std::sync::Arc;

impl ExtractorSet {
    /// Build the subprocess extractors described by `config`
    ///
    /// Fails with a configuration error if the SuccessCodes option is invalid.
    pub fn from_config(config: &HookConfig) -> Result<Self> {
        let (unrar, sevenzip) = config.extractor_configs()?;
        Ok(Self::new(
            Arc::new(CliExtractor::new(ArchiveFamily::Rar, unrar)),
            Arc::new(CliExtractor::new(ArchiveFamily::Zip, sevenzip)),
        ))
    }
}
