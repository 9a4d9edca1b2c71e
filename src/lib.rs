//! Combine the source files of a directory tree into one tagged text file and
//! measure text in lines and tokens.
//!
//! ```no_run
//! use onefile::{FilterConfig, Pipeline, Tokenizer, tokenizer::Encoding};
//! use std::path::Path;
//!
//! # fn main() -> onefile::Result<()> {
//! let filter = FilterConfig::new([".rs"], ["target"]);
//! let tokenizer = Tokenizer::new(Encoding::Cl100kBase)?;
//! let artifact = Pipeline::new(&filter, &tokenizer).combine_folder(Path::new("src"))?;
//! println!("{:?}", tokenizer.measure(&artifact)?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod io;
pub mod output;
pub mod pipeline;
pub mod tokenizer;

pub use context::filter::FilterConfig;
pub use context::types::{FileRecord, FileReport, FileScan, SizeReport};
pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use tokenizer::Tokenizer;

// Short paths for the pipeline stages
pub use context::gather;
pub use context::tag;
pub use context::walk;
