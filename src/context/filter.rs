use crate::constants::DEFAULT_EXTENSIONS;
use std::collections::BTreeSet;

/// Which files a walk keeps and which directories it never enters.
///
/// Built once per run and shared by reference; nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    extensions: Vec<String>,
    excluded_dirs: BTreeSet<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().copied(), std::iter::empty::<&str>())
    }
}

impl FilterConfig {
    /// Extensions keep their first-seen order; duplicates are dropped.
    pub fn new<E, D>(
        extensions: E,
        excluded_dirs: D,
    ) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let mut exts: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.into();
            if !exts.contains(&ext) {
                exts.push(ext);
            }
        }
        Self {
            extensions: exts,
            excluded_dirs: excluded_dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn excluded_dirs(&self) -> &BTreeSet<String> {
        &self.excluded_dirs
    }

    /// Plain, case-sensitive suffix match on the file name.
    pub fn accepts_file(
        &self,
        file_name: &str,
    ) -> bool {
        self.extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }

    /// Exact match on a directory's base name.
    pub fn excludes_dir(
        &self,
        dir_name: &str,
    ) -> bool {
        self.excluded_dirs.contains(dir_name)
    }
}
