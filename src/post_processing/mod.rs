//! Post-processing pipeline for a completed download
//!
//! The pipeline runs these stages in order:
//! 1. Pre-conditions - download succeeded and its directory exists
//! 2. Wait - give NZBGet's UnpackCleanupDisk action time to finish
//!    (WaitTime and SuccessCodes are only parsed once step 1 passed)
//! 3. Extract - scan / extract / repeat until no new archives appear
//! 4. Cleanup - delete extracted archives (if DeleteLeftover is enabled)
//!
//! Every failure is logged where it happens and folded into a [`RunResult`];
//! nothing escapes as an error.

use crate::config::HookConfig;
use crate::error::{Result, ToRunResult};
use crate::extraction::{ExtractorSet, unpack_until_done};
use crate::types::RunResult;
use std::time::Duration;
use tracing::{debug, error, warn};

mod cleanup;

use cleanup::run_cleanup_stage;

/// Post-processing pipeline executor
pub struct PostProcessor {
    /// Validated hook configuration
    config: HookConfig,
    /// Extractors for RAR and ZIP archives; built from `config` when unset
    extractors: Option<ExtractorSet>,
}

impl PostProcessor {
    /// Create a pipeline that runs the configured external extractors
    pub fn new(config: HookConfig) -> Self {
        Self {
            config,
            extractors: None,
        }
    }

    /// Create a pipeline with explicit extractors
    pub fn with_extractors(config: HookConfig, extractors: ExtractorSet) -> Self {
        Self {
            config,
            extractors: Some(extractors),
        }
    }

    /// Execute the pipeline and decide the result reported to NZBGet
    pub async fn run(&self) -> RunResult {
        if let Err(e) = self.config.check_preconditions() {
            warn!("{}", e);
            return e.run_result();
        }

        let extractors = match self.prepare().await {
            Ok(extractors) => extractors,
            Err(e) => {
                error!("{}", e);
                return e.run_result();
            }
        };

        debug!("Searching for ZIP/RAR files");
        let report = unpack_until_done(self.config.working_dir(), &extractors).await;

        let mut result = if report.failed {
            RunResult::NoActionTaken
        } else {
            RunResult::Success
        };

        if self.config.delete_leftover
            && !report.extracted.is_empty()
            && let Err(e) = run_cleanup_stage(&report.extracted).await
        {
            debug!(error = %e, "cleanup finished with errors");
            if result == RunResult::Success {
                result = e.run_result();
            }
        }

        debug!(
            ?result,
            extracted = report.extracted.len(),
            passes = report.passes,
            "post-processing finished"
        );
        result
    }

    /// Parse the remaining options, then wait for UnpackCleanupDisk if enabled
    async fn prepare(&self) -> Result<ExtractorSet> {
        let wait = if self.config.cleanup_disk {
            Some(self.config.wait_duration()?)
        } else {
            None
        };

        let extractors = match &self.extractors {
            Some(extractors) => extractors.clone(),
            None => ExtractorSet::from_config(&self.config)?,
        };

        if let Some(wait) = wait {
            wait_for_cleanup_disk(&self.config.wait_time, wait).await;
        }

        Ok(extractors)
    }
}

async fn wait_for_cleanup_disk(configured: &str, wait: Duration) {
    debug!(
        "Sleeping {} seconds to give NZBGet time to finish UnpackCleanupDisk action",
        configured
    );
    tokio::time::sleep(wait).await;
}

#[cfg(test)]
mod tests;
