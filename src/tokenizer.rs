//! Size measurement: line counts and BPE token counts.
//!
//! Token counts come from a pinned tiktoken vocabulary ([`Encoding`]). The
//! literal `<|endoftext|>` is allow-listed: it encodes as the single control
//! token and never fails. Any other special token of the vocabulary found in
//! the text is rejected, as tiktoken does with its default disallow list.

use crate::constants::ALLOWED_SPECIAL_TOKEN;
use crate::context::types::SizeReport;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use tiktoken_rs::{CoreBPE, cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base};

/// A named, pinned BPE vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// GPT-4 / GPT-3.5-turbo vocabulary.
    #[default]
    Cl100kBase,
    /// GPT-4o vocabulary.
    O200kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

impl Encoding {
    pub const ALL: [Encoding; 5] = [
        Encoding::Cl100kBase,
        Encoding::O200kBase,
        Encoding::P50kBase,
        Encoding::P50kEdit,
        Encoding::R50kBase,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::O200kBase => "o200k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::P50kEdit => "p50k_edit",
            Encoding::R50kBase => "r50k_base",
        }
    }

    /// Special tokens the vocabulary defines besides `<|endoftext|>`.
    fn disallowed_specials(self) -> &'static [&'static str] {
        match self {
            Encoding::Cl100kBase => &[
                "<|fim_prefix|>",
                "<|fim_middle|>",
                "<|fim_suffix|>",
                "<|endofprompt|>",
            ],
            Encoding::O200kBase => &["<|endofprompt|>"],
            Encoding::P50kEdit => &["<|fim_prefix|>", "<|fim_middle|>", "<|fim_suffix|>"],
            Encoding::P50kBase | Encoding::R50kBase => &[],
        }
    }

    fn load(self) -> Result<CoreBPE> {
        let bpe = match self {
            Encoding::Cl100kBase => cl100k_base(),
            Encoding::O200kBase => o200k_base(),
            Encoding::P50kBase => p50k_base(),
            Encoding::P50kEdit => p50k_edit(),
            Encoding::R50kBase => r50k_base(),
        };
        bpe.map_err(|e| Error::tokenization(self.name(), e))
    }
}

impl fmt::Display for Encoding {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Encoding::ALL
            .into_iter()
            .find(|enc| enc.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Encoding::ALL.iter().map(|e| e.name()).collect();
                Error::tokenization(s, format!("unknown encoding; known: {}", known.join(", ")))
            })
    }
}

/// A loaded vocabulary ready to count tokens.
pub struct Tokenizer {
    encoding: Encoding,
    bpe: CoreBPE,
}

impl fmt::Debug for Tokenizer {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl Tokenizer {
    pub fn new(encoding: Encoding) -> Result<Self> {
        Ok(Self {
            encoding,
            bpe: encoding.load()?,
        })
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of tokens in `text`, encoded whole, without truncation.
    pub fn count(
        &self,
        text: &str,
    ) -> Result<usize> {
        if let Some(special) = self
            .encoding
            .disallowed_specials()
            .iter()
            .find(|s| text.contains(**s))
        {
            return Err(Error::tokenization(
                self.encoding.name(),
                format!("text contains disallowed special token {special}"),
            ));
        }

        // Each allow-listed marker is one control token; the text between
        // markers is encoded as ordinary text.
        let mut total = 0usize;
        for (i, segment) in text.split(ALLOWED_SPECIAL_TOKEN).enumerate() {
            if i > 0 {
                total += 1;
            }
            if !segment.is_empty() {
                total += self.bpe.encode_ordinary(segment).len();
            }
        }
        Ok(total)
    }

    pub fn measure(
        &self,
        text: &str,
    ) -> Result<SizeReport> {
        Ok(SizeReport {
            tokens: self.count(text)?,
            lines: line_count(text),
        })
    }
}

/// `1 + count('\n')`: the number of segments splitting on `\n` yields, so
/// `""` is one line and a trailing newline opens another.
#[inline]
pub fn line_count(text: &str) -> usize {
    memchr::memchr_iter(b'\n', text.as_bytes()).count() + 1
}

static DEFAULT_TOKENIZER: Lazy<std::result::Result<Tokenizer, String>> =
    Lazy::new(|| Tokenizer::new(Encoding::default()).map_err(|e| e.to_string()));

fn default_tokenizer() -> Result<&'static Tokenizer> {
    DEFAULT_TOKENIZER
        .as_ref()
        .map_err(|msg| Error::tokenization(Encoding::default().name(), msg))
}

/// Count tokens with the shared default-encoding tokenizer.
pub fn count(text: &str) -> Result<usize> {
    default_tokenizer()?.count(text)
}

/// Measure with the shared default-encoding tokenizer.
pub fn measure(text: &str) -> Result<SizeReport> {
    default_tokenizer()?.measure(text)
}
