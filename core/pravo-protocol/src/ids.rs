//! Lexicon identifiers.
//!
//! Ids are assigned by whoever authors the lexicon and only need to be
//! unique within it. Analyses carry the [`LemmaId`] of the headword they
//! came from, so callers can go back to the dictionary entry.

use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

macro_rules! lexicon_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        #[archive(check_bytes)]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        /// `lemma #12`, `paradigm #3`
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " #{}"), self.0)
            }
        }
    };
}

lexicon_id!(
    /// Dictionary headword (`кодекс`, `налоговый`).
    LemmaId,
    "lemma"
);

lexicon_id!(
    /// Inflection table shared by headwords that decline alike.
    ParadigmId,
    "paradigm"
);
