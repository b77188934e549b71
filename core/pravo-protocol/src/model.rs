use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::{LemmaId, ParadigmId};
use crate::morphology::{MorphFlags, PartOfSpeech};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A dictionary headword. The citation form is `stem` followed by the
/// first ending of its paradigm.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lemma {
    pub id: LemmaId,
    pub stem: String,
    pub pos: PartOfSpeech,
    pub paradigm: ParadigmId,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Ending {
    #[cfg_attr(feature = "serde", serde(with = "crate::morphology::flag_text"))]
    pub flags: u32,
    pub suffix: String,
}

impl Ending {
    pub fn morph_flags(&self) -> MorphFlags {
        MorphFlags::from_bits_truncate(self.flags)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Paradigm {
    pub id: ParadigmId,
    pub endings: Vec<Ending>,
}

impl Paradigm {
    /// Ending of the dictionary (citation) form.
    pub fn citation_suffix(&self) -> &str {
        self.endings.first().map(|e| e.suffix.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub lemmas: Vec<Lemma>,
    pub paradigms: Vec<Paradigm>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    EmptyStem(LemmaId),
    DuplicateLemma(LemmaId),
    UnknownParadigm { lemma: LemmaId, paradigm: ParadigmId },
    EmptyParadigm(ParadigmId),
    DuplicateParadigm(ParadigmId),
}

impl fmt::Display for LexiconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexiconError::EmptyStem(id) => write!(f, "{} has an empty stem", id),
            LexiconError::DuplicateLemma(id) => write!(f, "{} is defined twice", id),
            LexiconError::UnknownParadigm { lemma, paradigm } => {
                write!(f, "{} refers to unknown {}", lemma, paradigm)
            }
            LexiconError::EmptyParadigm(id) => write!(f, "{} has no endings", id),
            LexiconError::DuplicateParadigm(id) => write!(f, "{} is defined twice", id),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LexiconError {}

impl Lexicon {
    /// Structural checks run once before a lexicon is put to use.
    pub fn validate(&self) -> Result<(), LexiconError> {
        for (i, paradigm) in self.paradigms.iter().enumerate() {
            if paradigm.endings.is_empty() {
                return Err(LexiconError::EmptyParadigm(paradigm.id));
            }
            if self.paradigms[..i].iter().any(|p| p.id == paradigm.id) {
                return Err(LexiconError::DuplicateParadigm(paradigm.id));
            }
        }
        for (i, lemma) in self.lemmas.iter().enumerate() {
            if lemma.stem.is_empty() {
                return Err(LexiconError::EmptyStem(lemma.id));
            }
            if self.lemmas[..i].iter().any(|l| l.id == lemma.id) {
                return Err(LexiconError::DuplicateLemma(lemma.id));
            }
            if self.paradigm(lemma.paradigm).is_none() {
                return Err(LexiconError::UnknownParadigm {
                    lemma: lemma.id,
                    paradigm: lemma.paradigm,
                });
            }
        }
        Ok(())
    }

    pub fn paradigm(&self, id: ParadigmId) -> Option<&Paradigm> {
        self.paradigms.iter().find(|p| p.id == id)
    }
}

/// One lemma analysis of a surface word.
///
/// `pos == None` marks the fallback analysis for words the lexicon does not
/// know: the folded surface text itself. `lemma_id` is set only for
/// analyses that come from a dictionary headword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct NormalizedForm {
    pub lemma: String,
    pub lemma_id: Option<LemmaId>,
    pub pos: Option<PartOfSpeech>,
    pub flags: MorphFlags,
}

impl NormalizedForm {
    pub fn fallback(lemma: String) -> Self {
        Self {
            lemma,
            lemma_id: None,
            pos: None,
            flags: MorphFlags::empty(),
        }
    }

    /// Analysis that is the surface text itself: numerals, abbreviations.
    pub fn literal(lemma: String, pos: PartOfSpeech) -> Self {
        Self {
            pos: Some(pos),
            ..Self::fallback(lemma)
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.pos.is_none()
    }
}
