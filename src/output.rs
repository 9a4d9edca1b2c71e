use crate::context::types::{FileReport, SizeReport};
use path_slash::PathExt;
use serde::Serialize;
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// How size reports are written to the caller's stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human readable blocks.
    #[default]
    Text,
    /// One JSON object per line, paths with `/` separators.
    Json,
}

#[derive(Serialize)]
struct FileRow<'a> {
    path: Cow<'a, str>,
    tokens: usize,
    lines: usize,
}

#[derive(Serialize)]
struct ArtifactRow<'a> {
    output: Option<Cow<'a, str>>,
    tokens: usize,
    lines: usize,
}

pub fn write_file_report(
    out: &mut dyn Write,
    report: &FileReport,
    format: ReportFormat,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => {
            writeln!(out, "File: {}", report.path.display())?;
            writeln!(out, "Token Count: {}", report.size.tokens)?;
            writeln!(out, "Line Count: {}", report.size.lines)?;
            writeln!(out, "{}", "-".repeat(RULE_WIDTH))
        }
        ReportFormat::Json => write_json_line(
            out,
            &FileRow {
                path: report.path.to_slash_lossy(),
                tokens: report.size.tokens,
                lines: report.size.lines,
            },
        ),
    }
}

/// Reports the combined artifact. `path` is `None` when it was not persisted.
pub fn write_artifact_report(
    out: &mut dyn Write,
    path: Option<&Path>,
    size: SizeReport,
    format: ReportFormat,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => {
            if let Some(path) = path {
                writeln!(out, "Output file: {}", path.display())?;
            }
            writeln!(out, "Total Token Count: {}", size.tokens)?;
            writeln!(out, "Total Line Count: {}", size.lines)
        }
        ReportFormat::Json => write_json_line(
            out,
            &ArtifactRow {
                output: path.map(|p| p.to_slash_lossy()),
                tokens: size.tokens,
                lines: size.lines,
            },
        ),
    }
}

fn write_json_line<T: Serialize>(
    out: &mut dyn Write,
    row: &T,
) -> io::Result<()> {
    serde_json::to_writer(&mut *out, row)?;
    writeln!(out)
}
