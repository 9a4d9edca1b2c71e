// Tagged blocks: `<TAG>\n<contents>\n</TAG>\n\n`
use crate::constants::TAG_DELIMITER;
use crate::context::types::FileRecord;
use std::path::{Component, Path};
use tracing::warn;

/// Builds the tag for a file: its path relative to the root with every
/// separator replaced by `|`. Top-level files are tagged with their name.
pub fn tag_for(
    relative_dir: &Path,
    file_name: &str,
) -> String {
    let mut tag = String::new();
    for comp in relative_dir.components() {
        if let Component::Normal(part) = comp {
            tag.push_str(&part.to_string_lossy());
            tag.push(TAG_DELIMITER);
        }
    }
    tag.push_str(file_name);
    if tag.contains('\n') {
        warn!("tag {tag:?} contains a newline; the block will not split back cleanly");
    }
    tag
}

/// Wraps `contents` in the tag pair for `path`.
pub fn render(
    path: &Path,
    relative_dir: &Path,
    contents: &str,
) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    wrap(&tag_for(relative_dir, &name), contents)
}

pub fn render_record(record: &FileRecord) -> String {
    wrap(
        &tag_for(&record.relative_dir, &record.file_name()),
        &record.contents,
    )
}

fn wrap(
    tag: &str,
    contents: &str,
) -> String {
    let mut block = String::with_capacity(contents.len() + 2 * tag.len() + 8);
    block.push('<');
    block.push_str(tag);
    block.push_str(">\n");
    block.push_str(contents);
    block.push_str("\n</");
    block.push_str(tag);
    block.push_str(">\n\n");
    block
}

/// Inverse of [`render`]: returns the tag and the exact original contents,
/// or `None` if `block` is not a single well-formed block.
pub fn split_block(block: &str) -> Option<(&str, &str)> {
    let (open, rest) = block.split_once('\n')?;
    let tag = open.strip_prefix('<')?.strip_suffix('>')?;
    let close = format!("\n</{tag}>\n\n");
    let contents = rest.strip_suffix(close.as_str())?;
    Some((tag, contents))
}

/// Concatenates blocks in the order given. Each block already ends with a
/// blank line, so nothing is inserted between them.
pub fn combine<I>(blocks: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = String::new();
    for block in blocks {
        out.push_str(block.as_ref());
    }
    out
}
