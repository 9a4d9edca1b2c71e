use crate::config::{Config, Mode};
use crate::context::filter::FilterConfig;
use crate::context::gather::{read_file, read_text};
use crate::context::tag::{combine, render_record};
use crate::context::types::{FileReport, FileScan};
use crate::context::walk::enumerate;
use crate::error::{Error, Result};
use crate::io::artifact::write_artifact;
use crate::output;
use crate::tokenizer::Tokenizer;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Walk, read, tag and measure, driven by one filter and one tokenizer.
pub struct Pipeline<'a> {
    filter: &'a FilterConfig,
    tokenizer: &'a Tokenizer,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        filter: &'a FilterConfig,
        tokenizer: &'a Tokenizer,
    ) -> Self {
        Self { filter, tokenizer }
    }

    /// Measures `path` if its name carries a supported extension; returns
    /// `None` otherwise.
    pub fn scan_file(
        &self,
        path: &Path,
    ) -> Result<Option<FileReport>> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if !self.filter.accepts_file(&name) {
            warn!("{} has no supported extension; skipping", path.display());
            return Ok(None);
        }
        self.measure_file(path).map(Some)
    }

    /// Measures any file, whatever its extension.
    pub fn measure_file(
        &self,
        path: &Path,
    ) -> Result<FileReport> {
        let contents = read_text(path)?;
        Ok(FileReport::new(path, self.tokenizer.measure(&contents)?))
    }

    /// One entry per retained file under `root`, in traversal order.
    ///
    /// Traversal and read failures end the scan. A file the tokenizer
    /// rejects keeps its error in [`FileScan::size`] and the walk goes on.
    pub fn scan_folder(
        &self,
        root: &Path,
    ) -> Result<Vec<FileScan>> {
        let mut scans = Vec::new();
        for entry in enumerate(root, self.filter)? {
            let record = read_file(entry?)?;
            let size = self.tokenizer.measure(&record.contents);
            scans.push(FileScan {
                path: record.path,
                size,
            });
        }
        Ok(scans)
    }

    /// Tags every retained file under `root` and concatenates the blocks in
    /// traversal order. Each record is dropped once it is folded in.
    pub fn combine_folder(
        &self,
        root: &Path,
    ) -> Result<String> {
        let mut failure: Option<Error> = None;
        let blocks = enumerate(root, self.filter)?.map_while(|entry| {
            match entry.and_then(read_file) {
                Ok(record) => Some(render_record(&record)),
                Err(e) => {
                    failure = Some(e);
                    None
                }
            }
        });
        let artifact = combine(blocks);
        if let Some(e) = failure {
            return Err(e);
        }
        debug!("combined {} bytes", artifact.len());
        Ok(artifact)
    }
}

/// Runs the configured mode and writes reports to `out`.
pub fn run(
    config: &Config,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let tokenizer = Tokenizer::new(config.encoding)?;
    let pipeline = Pipeline::new(&config.filter, &tokenizer);
    let format = config.format;

    match &config.mode {
        Mode::ScanFile(path) => {
            if let Some(report) = pipeline
                .scan_file(path)
                .with_context(|| format!("scanning {}", path.display()))?
            {
                output::write_file_report(out, &report, format)?;
            }
        }
        Mode::CountTokens(path) => {
            let report = pipeline
                .measure_file(path)
                .with_context(|| format!("counting tokens in {}", path.display()))?;
            output::write_file_report(out, &report, format)?;
        }
        Mode::ScanFolder(root) => {
            let scans = pipeline
                .scan_folder(root)
                .with_context(|| format!("scanning folder {}", root.display()))?;
            let total = scans.len();
            let mut failures: Vec<(PathBuf, Error)> = Vec::new();
            for FileScan { path, size } in scans {
                match size {
                    Ok(size) => {
                        output::write_file_report(out, &FileReport::new(&path, size), format)?
                    }
                    Err(e) => {
                        error!("{}: {e}", path.display());
                        failures.push((path, e));
                    }
                }
            }
            out.flush()?;
            let failed = failures.len();
            if let Some((path, first)) = failures.into_iter().next() {
                return Err(anyhow::Error::new(first).context(format!(
                    "{failed} of {total} files under {} could not be measured, first {}",
                    root.display(),
                    path.display()
                )));
            }
        }
        Mode::Combine { root, destination } => {
            let artifact = pipeline
                .combine_folder(root)
                .with_context(|| format!("combining folder {}", root.display()))?;
            let written = write_artifact(destination, &artifact)?;
            // The artifact is already on disk; a failed count still fails the run.
            let size = tokenizer
                .measure(&artifact)
                .with_context(|| format!("measuring {}", written.display()))?;
            output::write_artifact_report(out, Some(&written), size, format)?;
        }
    }
    out.flush()?;
    Ok(())
}
