#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod analyzer;

use alloc::string::String;

use pravo_protocol::{Lemma, LexiconError, MorphFlags, Paradigm};

use core::fmt;

pub use analyzer::{fold, Analyzer};

#[derive(Debug)]
pub enum MorphError {
    FormNotFound(MorphFlags),
    InvalidLexicon(LexiconError),
    InvalidArchive(String),
}

impl fmt::Display for MorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MorphError::FormNotFound(flags) => write!(f, "Form not found for flags: {:?}", flags),
            MorphError::InvalidLexicon(err) => write!(f, "Invalid lexicon: {}", err),
            MorphError::InvalidArchive(msg) => write!(f, "Invalid lexicon archive: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MorphError {}

impl From<LexiconError> for MorphError {
    fn from(err: LexiconError) -> Self {
        MorphError::InvalidLexicon(err)
    }
}

/// Generates a word form by combining Lemma stem and Paradigm suffix.
///
/// Picks the first ending whose flags include every requested flag, so
/// `GENITIVE | SINGULAR` finds an ending tagged
/// `GENITIVE | SINGULAR | MASCULINE`.
pub fn generate(
    lemma: &Lemma,
    paradigm: &Paradigm,
    flags: MorphFlags,
) -> Result<String, MorphError> {
    for ending in &paradigm.endings {
        if ending.morph_flags().contains(flags) {
            return Ok(format!("{}{}", lemma.stem, ending.suffix));
        }
    }

    Err(MorphError::FormNotFound(flags))
}
