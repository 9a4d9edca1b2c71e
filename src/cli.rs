use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "onefile", version)]
#[command(
    about = "Combine the source files of a folder into one tagged file, \
                   or report token and line counts for files."
)]
pub struct Cli {
    /// Combine supported files into a single output file.
    #[arg(long)]
    pub combine: bool,

    /// Folder whose supported files are combined (with --combine) or scanned.
    #[arg(long, value_name = "DIR")]
    pub folder_path: Option<PathBuf>,

    /// Scan a folder and report token and line counts per file.
    #[arg(long, value_name = "DIR")]
    pub scan_folder: Option<PathBuf>,

    /// Scan a single supported file and report its counts.
    #[arg(long, value_name = "FILE")]
    pub scan_filename: Option<PathBuf>,

    /// Report token and line counts for --file-path, whatever its extension.
    #[arg(long, requires = "file_path")]
    pub calc_token: bool,

    /// File measured by --calc-token.
    #[arg(long, value_name = "FILE")]
    pub file_path: Option<PathBuf>,

    /// Folder the combined file is written to; created if missing.
    #[arg(long, value_name = "DIR")]
    pub output_folder: Option<PathBuf>,

    /// Name of the combined file. Defaults to a timestamped name.
    #[arg(long, value_name = "NAME")]
    pub output_filename: Option<String>,

    /// Folder names never descended into.
    #[arg(long, value_name = "NAME", num_args(1..))]
    pub skip_foldername: Vec<String>,

    /// File name suffixes to include, e.g. `.py .c`.
    #[arg(long, value_name = "EXT", num_args(1..))]
    pub supported_extensions: Vec<String>,

    /// Tokenizer vocabulary used for token counts.
    #[arg(long, default_value = "cl100k_base")]
    pub encoding: String,

    /// Print reports as JSON lines instead of text.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv). RUST_LOG overrides it.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
