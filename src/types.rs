//! Core types shared by the extraction loop and the pipeline

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Archive family detected by file extension
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveFamily {
    /// RAR archive (.rar, .r00, .r01, ..., .r999)
    Rar,
    /// ZIP archive (.zip, .z01, .z02, ..., .z999)
    Zip,
}

impl ArchiveFamily {
    /// Name of the external tool used for this family, for log lines
    pub fn tool_name(self) -> &'static str {
        match self {
            ArchiveFamily::Rar => "unrar",
            ArchiveFamily::Zip => "sevenzip",
        }
    }
}

/// An archive file found in the working directory that has not been
/// extracted yet in this run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveCandidate {
    /// Path of the archive (or archive volume)
    pub path: PathBuf,
    /// Family decided from the file name
    pub family: ArchiveFamily,
}

/// Archives successfully extracted during this run
///
/// Only ever grows. Iteration yields paths in the order they were extracted,
/// which is also the order cleanup deletes them in.
#[derive(Clone, Debug, Default)]
pub struct ExtractedSet {
    order: Vec<PathBuf>,
    members: HashSet<PathBuf>,
}

impl ExtractedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path; returns `false` if it was already present
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.members.contains(&path) {
            return false;
        }
        self.members.insert(path.clone());
        self.order.push(path);
        true
    }

    /// Whether `path` has already been extracted
    pub fn contains(&self, path: &Path) -> bool {
        self.members.contains(path)
    }

    /// Number of extracted archives
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been extracted yet
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in extraction order
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.order.iter().map(PathBuf::as_path)
    }
}

/// Terminal outcome of a run, reported to NZBGet through the exit code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunResult {
    /// Everything needed was extracted (POSTPROCESS_SUCCESS)
    Success,
    /// Configuration problem, nothing attempted (POSTPROCESS_ERROR)
    Failure,
    /// Pre-conditions not met, or extraction/cleanup failed (POSTPROCESS_NONE)
    NoActionTaken,
}

impl RunResult {
    /// Exit code understood by NZBGet
    pub fn exit_code(self) -> u8 {
        match self {
            RunResult::Success => 93,
            RunResult::Failure => 94,
            RunResult::NoActionTaken => 95,
        }
    }
}
