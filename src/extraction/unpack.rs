//! The scan / extract / repeat loop
//!
//! Extracting one archive can surface new ones (a ZIP inside a ZIP, the rest
//! of a volume set becoming usable), so the working directory is rescanned
//! after every pass until a scan finds nothing new. The external tool and the
//! filesystem decide what is extractable; the loop only remembers what it has
//! already extracted.

use super::scan::scan_candidates;
use super::traits::ArchiveExtractor;
use crate::types::{ArchiveFamily, ExtractedSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

/// One extractor per archive family
#[derive(Clone)]
pub struct ExtractorSet {
    rar: Arc<dyn ArchiveExtractor>,
    zip: Arc<dyn ArchiveExtractor>,
}

impl ExtractorSet {
    /// Pair a RAR-family and a ZIP-family extractor
    pub fn new(rar: Arc<dyn ArchiveExtractor>, zip: Arc<dyn ArchiveExtractor>) -> Self {
        Self { rar, zip }
    }

    /// Extractor responsible for `family`
    pub fn for_family(&self, family: ArchiveFamily) -> &dyn ArchiveExtractor {
        match family {
            ArchiveFamily::Rar => self.rar.as_ref(),
            ArchiveFamily::Zip => self.zip.as_ref(),
        }
    }
}

/// What the extraction loop did
#[derive(Debug, Default)]
pub struct UnpackReport {
    /// Archives extracted successfully, in order
    pub extracted: ExtractedSet,
    /// Whether an extraction failed and stopped the loop
    pub failed: bool,
    /// Number of passes that found something to extract
    pub passes: usize,
}

/// Extract every archive below `working_dir` until none are left
///
/// Each pass scans the tree, skipping what is already in the extracted set,
/// and extracts the candidates in discovery order into `working_dir`. The
/// first failure (bad exit status or launch error) ends the whole loop; the
/// rest of the pass is not attempted.
pub async fn unpack_until_done(working_dir: &Path, extractors: &ExtractorSet) -> UnpackReport {
    let mut report = UnpackReport::default();

    loop {
        let candidates = scan_candidates(working_dir, &report.extracted);
        if candidates.is_empty() {
            info!("No archive files found.");
            break;
        }

        report.passes += 1;
        debug!(
            pass = report.passes,
            count = candidates.len(),
            "extracting archives found in this pass"
        );

        let before = report.extracted.len();
        for candidate in candidates {
            info!("Extracting {}", candidate.path.display());

            let extractor = extractors.for_family(candidate.family);
            match extractor.extract(&candidate.path, working_dir).await {
                Ok(result) if result.success => {
                    info!("Extract Successful");
                    report.extracted.insert(candidate.path);
                }
                Ok(result) => {
                    match result.exit_code {
                        Some(code) => error!("Extract failed, Returncode {}", code),
                        None => error!("Extract failed, extractor was terminated by a signal"),
                    }
                    report.failed = true;
                    return report;
                }
                Err(e) => {
                    error!("Execution of {} command failed: {}", extractor.name(), e);
                    error!("Unable to extract {}", candidate.path.display());
                    report.failed = true;
                    return report;
                }
            }
        }

        // Cannot happen while every candidate is new, but never spin.
        if report.extracted.len() == before {
            break;
        }
    }

    report
}
