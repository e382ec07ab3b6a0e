//! Archive naming conventions.
//!
//! Classification is purely name based: a file called `x.rar` is RAR-family
//! even if its content is garbage. Whether it really is an archive is
//! discovered only when the extractor runs.
//!
//! Recognized extensions (case-insensitive):
//! - RAR family: `.rar`, and old-style split volumes `.r00` .. `.r999`
//! - ZIP family: `.zip`, and split volumes `.z01` .. `.z999`

use crate::types::ArchiveFamily;
use std::path::Path;

impl ArchiveFamily {
    /// Classify a path by its extension
    ///
    /// Returns `None` for anything that is not a RAR or ZIP part.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();

        if matches_family(&ext, "rar", 'r') {
            Some(ArchiveFamily::Rar)
        } else if matches_family(&ext, "zip", 'z') {
            Some(ArchiveFamily::Zip)
        } else {
            None
        }
    }
}

/// Check if a path is any part of a RAR archive set.
pub fn is_rar(path: &Path) -> bool {
    ArchiveFamily::from_path(path) == Some(ArchiveFamily::Rar)
}

/// Check if a path is any part of a RAR or ZIP archive set.
pub fn is_archive(path: &Path) -> bool {
    ArchiveFamily::from_path(path).is_some()
}

/// `ext` is exactly `full`, or `volume_prefix` followed by 2-3 ASCII digits.
fn matches_family(ext: &str, full: &str, volume_prefix: char) -> bool {
    if ext == full {
        return true;
    }

    match ext.strip_prefix(volume_prefix) {
        Some(digits) => {
            (2..=3).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
