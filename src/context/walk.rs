use crate::context::filter::FilterConfig;
use crate::error::{Error, Result};
use ignore::{DirEntry, Walk, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A retained file as yielded by [`FileWalk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Absolute path (the root is canonicalized before walking).
    pub path: PathBuf,
    /// Parent directory relative to the root; empty for top-level files.
    pub relative_dir: PathBuf,
}

/// Lazy, depth-first walk over the files a [`FilterConfig`] keeps.
///
/// Entries are sorted by file name at every directory level. Excluded
/// directories are pruned before descent, so nothing below them is read.
pub struct FileWalk {
    root: PathBuf,
    filter: FilterConfig,
    inner: Walk,
}

/// Starts a walk under `root`.
///
/// Fails up front if the root does not exist or is not a directory.
pub fn enumerate(
    root: &Path,
    filter: &FilterConfig,
) -> Result<FileWalk> {
    let root = dunce::canonicalize(root).map_err(|e| Error::traversal(root, e))?;
    if !root.is_dir() {
        return Err(Error::traversal(&root, "not a directory"));
    }
    debug!("walking {}", root.display());

    let prune = filter.clone();
    let inner = WalkBuilder::new(&root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        // The walker never hands the root (depth 0) to this predicate.
        .filter_entry(move |entry| !is_excluded_dir(entry, &prune))
        .build();

    Ok(FileWalk {
        root,
        filter: filter.clone(),
        inner,
    })
}

impl FileWalk {
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn accept(
        &self,
        entry: &DirEntry,
    ) -> Option<WalkEntry> {
        if entry.depth() == 0 || entry.file_type().is_some_and(|ft| ft.is_dir()) {
            return None;
        }
        let name = entry.file_name().to_string_lossy();
        if !self.filter.accepts_file(&name) {
            trace!("skipping {}", entry.path().display());
            return None;
        }
        // Follows symlinks, so a link to a regular file still counts while
        // links to directories and dangling links do not.
        if !entry.path().is_file() {
            trace!("not a regular file: {}", entry.path().display());
            return None;
        }
        let relative_dir = entry
            .path()
            .parent()
            .and_then(|p| p.strip_prefix(&self.root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Some(WalkEntry {
            path: entry.path().to_path_buf(),
            relative_dir,
        })
    }
}

impl Iterator for FileWalk {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(Error::traversal(&self.root, e))),
            };
            if let Some(found) = self.accept(&entry) {
                debug!("retained {}", found.path.display());
                return Some(Ok(found));
            }
        }
    }
}

fn is_excluded_dir(
    entry: &DirEntry,
    filter: &FilterConfig,
) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
        && filter.excludes_dir(&entry.file_name().to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(walk: FileWalk) -> Vec<String> {
        let root = walk.root().to_path_buf();
        walk.map(|e| {
            let e = e.unwrap();
            e.path
                .strip_prefix(&root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
    }

    #[test]
    fn yields_sorted_depth_first() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        fs::create_dir_all(td.path().join("b"))?;
        fs::write(td.path().join("c.py"), "c")?;
        fs::write(td.path().join("a.py"), "a")?;
        fs::write(td.path().join("b/z.py"), "z")?;
        fs::write(td.path().join("b/y.py"), "y")?;

        let walk = enumerate(td.path(), &FilterConfig::default())?;
        assert_eq!(names(walk), ["a.py", "b/y.py", "b/z.py", "c.py"]);
        Ok(())
    }

    #[test]
    fn relative_dir_is_empty_for_top_level_files() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        fs::create_dir_all(td.path().join("sub/dir"))?;
        fs::write(td.path().join("top.py"), "")?;
        fs::write(td.path().join("sub/dir/mod.py"), "")?;

        let entries: Vec<WalkEntry> =
            enumerate(td.path(), &FilterConfig::default())?.collect::<Result<_>>()?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].relative_dir, PathBuf::from("sub/dir"));
        assert_eq!(entries[1].relative_dir, PathBuf::new());
        assert!(entries.iter().all(|e| e.path.is_absolute()));
        Ok(())
    }

    #[test]
    fn root_named_like_an_excluded_dir_is_still_walked() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        let root = td.path().join("skipme");
        fs::create_dir_all(&root)?;
        fs::write(root.join("kept.py"), "")?;

        let filter = FilterConfig::new([".py"], ["skipme"]);
        assert_eq!(names(enumerate(&root, &filter)?), ["kept.py"]);
        Ok(())
    }

    #[test]
    fn missing_root_is_a_traversal_error() {
        let err = enumerate(Path::new("/definitely/not/here"), &FilterConfig::default())
            .err()
            .expect("missing root must fail");
        assert!(matches!(err, Error::Traversal { .. }), "{err}");
    }

    #[test]
    fn file_root_is_a_traversal_error() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        let file = td.path().join("a.py");
        fs::write(&file, "")?;
        assert!(matches!(
            enumerate(&file, &FilterConfig::default()),
            Err(Error::Traversal { .. })
        ));
        Ok(())
    }
}
