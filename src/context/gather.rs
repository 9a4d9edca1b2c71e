pub use crate::context::types::FileRecord;

use crate::context::walk::WalkEntry;
use crate::error::{Error, Result};
use std::{fs, path::Path};
use tracing::warn;

/// Reads a walked file into a [`FileRecord`].
pub fn read_file(entry: WalkEntry) -> Result<FileRecord> {
    let contents = read_text(&entry.path)?;
    Ok(FileRecord {
        path: entry.path,
        relative_dir: entry.relative_dir,
        contents,
    })
}

/// Reads the whole file as UTF-8 text.
///
/// The handle is closed before this returns. Invalid byte sequences are
/// replaced with U+FFFD so one malformed file does not abort a run; only an
/// open or read failure is an error.
pub fn read_text(path: &Path) -> Result<String> {
    let content_bytes = fs::read(path).map_err(|e| Error::read(path, e))?;
    match String::from_utf8(content_bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(
                "{} is not valid UTF-8; invalid bytes were replaced",
                path.display()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
