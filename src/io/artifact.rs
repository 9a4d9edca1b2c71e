use crate::constants::{OUTPUT_FILE_SUFFIX, TIMESTAMP_FORMAT};
use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Where a combined artifact is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub folder: PathBuf,
    pub file_name: String,
}

impl Destination {
    pub fn new(
        folder: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            folder: folder.into(),
            file_name: file_name.into(),
        }
    }

    /// `<folder>/<YYYYmmdd_HHMMSS>_onefile_result.py`
    pub fn timestamped<Tz>(
        folder: impl Into<PathBuf>,
        now: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let stamp = now.format(TIMESTAMP_FORMAT);
        Self::new(folder, format!("{stamp}_{OUTPUT_FILE_SUFFIX}"))
    }

    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }
}

/// Writes `contents` to `dest`, creating its folder if needed.
///
/// The content goes to a uniquely named temporary sibling first and is
/// renamed into place, so the destination is never left half written and
/// concurrent writers never share a staging file.
pub fn write_artifact(
    dest: &Destination,
    contents: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(&dest.folder).map_err(|e| Error::write(&dest.folder, e))?;

    let path = dest.path();
    // Dropping the handle on an early return removes the staging file.
    let staged = stage(&dest.folder, contents)?;
    staged
        .persist(&path)
        .map_err(|e| Error::write(&path, e.error))?;

    info!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(path)
}

fn stage(
    folder: &Path,
    contents: &str,
) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(folder).map_err(|e| Error::write(folder, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| Error::write(file.path(), e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| Error::write(file.path(), e))?;
    debug!("staged {}", file.path().display());
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn timestamped_name_follows_pattern() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let dest = Destination::timestamped("result", &now);
        assert_eq!(dest.file_name, "20240309_070501_onefile_result.py");
        assert_eq!(
            dest.path(),
            PathBuf::from("result/20240309_070501_onefile_result.py")
        );
    }

    #[test]
    fn creates_missing_folders_and_leaves_no_temp() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        let dest = Destination::new(td.path().join("a/b"), "out.py");
        let path = write_artifact(&dest, "<x.py>\n1\n</x.py>\n\n")?;
        assert_eq!(fs::read_to_string(&path)?, "<x.py>\n1\n</x.py>\n\n");
        let names: Vec<_> = fs::read_dir(td.path().join("a/b"))?
            .map(|e| e.map(|e| e.file_name()))
            .collect::<std::io::Result<_>>()?;
        assert_eq!(names, vec![std::ffi::OsString::from("out.py")]);
        Ok(())
    }

    #[test]
    fn overwrites_existing_file() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        let dest = Destination::new(td.path(), "out.py");
        write_artifact(&dest, "old old old")?;
        write_artifact(&dest, "new")?;
        assert_eq!(fs::read_to_string(dest.path())?, "new");
        Ok(())
    }

    #[test]
    fn folder_blocked_by_a_file_is_a_write_error() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        let blocker = td.path().join("blocker");
        fs::write(&blocker, "")?;
        let dest = Destination::new(blocker.join("nested"), "out.py");
        let err = write_artifact(&dest, "x").unwrap_err();
        assert!(matches!(err, Error::Write { .. }), "{err}");
        Ok(())
    }

    #[test]
    fn concurrent_writers_to_one_destination_all_land_whole() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        let dest = Destination::new(td.path(), "out.py");
        let bodies: Vec<String> = (0..8)
            .map(|i| format!("<w{i}.py>\n{}\n</w{i}.py>\n\n", "x".repeat(64 * 1024)))
            .collect();

        let dest = &dest;
        std::thread::scope(|s| {
            let handles: Vec<_> = bodies
                .iter()
                .map(|body| s.spawn(move || write_artifact(dest, body)))
                .collect();
            for handle in handles {
                handle.join().unwrap().unwrap();
            }
        });

        let written = fs::read_to_string(dest.path())?;
        assert!(bodies.contains(&written));
        let names: Vec<_> = fs::read_dir(td.path())?
            .map(|e| e.map(|e| e.file_name()))
            .collect::<std::io::Result<_>>()?;
        assert_eq!(names, vec![std::ffi::OsString::from("out.py")]);
        Ok(())
    }
}
