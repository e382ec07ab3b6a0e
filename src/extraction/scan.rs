//! Recursive discovery of archives that still need extracting

use crate::types::{ArchiveCandidate, ArchiveFamily, ExtractedSet};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Find every archive file below `root` that is not in `extracted`
///
/// Walks the whole tree (any depth). Directory symlinks are not followed;
/// symlinks pointing at regular files are included. Entries are sorted by
/// file name within each directory so repeated scans see the same order.
/// Unreadable entries are logged and skipped.
pub fn scan_candidates(root: &Path, extracted: &ExtractedSet) -> Vec<ArchiveCandidate> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(?root, error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let file_type = entry.file_type();
        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let path = entry.path();
        let Some(family) = ArchiveFamily::from_path(path) else {
            continue;
        };
        if extracted.contains(path) {
            continue;
        }

        candidates.push(ArchiveCandidate {
            path: path.to_path_buf(),
            family,
        });
    }

    debug!(?root, count = candidates.len(), "archive scan complete");
    candidates
}
