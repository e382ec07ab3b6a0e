//! Cleanup stage for removing extracted archives

use crate::error::{Error, Result};
use crate::types::ExtractedSet;
use tracing::{debug, error, info};

/// Delete every archive recorded in `extracted`
///
/// Each deletion is attempted independently: a failure is logged and the
/// remaining files are still removed. The last failure is returned so the
/// caller can downgrade the run result.
pub(crate) async fn run_cleanup_stage(extracted: &ExtractedSet) -> Result<()> {
    use tokio::fs;

    info!("Deleting leftover zip files");

    let mut last_error = None;
    let mut deleted_files = 0;
    for file in extracted.iter() {
        info!("Deleting {}", file.display());
        match fs::remove_file(file).await {
            Ok(()) => deleted_files += 1,
            Err(e) => {
                error!("Delete failed: {}", e);
                error!("Unable to delete {}", file.display());
                last_error = Some(Error::Cleanup {
                    path: file.to_path_buf(),
                    source: e,
                });
            }
        }
    }

    debug!(deleted_files, total = extracted.len(), "cleanup complete");

    match last_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
