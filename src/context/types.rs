use crate::error::Result;
use serde::Serialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A file produced by the walk, read into memory.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Directory holding the file, relative to the traversal root. Empty for
    /// files directly under the root.
    pub relative_dir: PathBuf,
    pub contents: String,
}

impl FileRecord {
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    }

    /// Path of the file relative to the traversal root.
    pub fn relative_path(&self) -> PathBuf {
        self.relative_dir.join(self.file_name().as_ref())
    }
}

/// Token and line counts of one measured text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizeReport {
    pub tokens: usize,
    /// `1 + count('\n')`, so an empty text has one line.
    pub lines: usize,
}

/// Size of a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub size: SizeReport,
}

impl FileReport {
    pub fn new(
        path: &Path,
        size: SizeReport,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            size,
        }
    }
}

/// One file visited by a folder scan. A failed measurement stays attached to
/// its path so the scan can carry on past it.
#[derive(Debug)]
pub struct FileScan {
    pub path: PathBuf,
    pub size: Result<SizeReport>,
}

impl FileScan {
    pub fn into_report(self) -> Result<FileReport> {
        Ok(FileReport {
            size: self.size?,
            path: self.path,
        })
    }
}
