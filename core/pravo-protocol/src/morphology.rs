use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PartOfSpeech {
    Noun = 0,
    Adjective = 1,
    Verb = 2,
    Adverb = 3,
    Preposition = 4,
    Conjunction = 5,
    Pronoun = 6,
    Particle = 7,
    Numeral = 8,
    /// Upper-case letter abbreviation (`ГК`, `НК`, `КоАП` once folded).
    Abbreviation = 9,
}

bitflags! {
    /// Grammatical features of one inflected form.
    ///
    /// Stored as plain `u32` inside archived lexicons; the JSON authoring
    /// format spells them out (`"GENITIVE | SINGULAR"`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct MorphFlags: u32 {
        // Case (Bits 0-5)
        const NOMINATIVE = 1;
        const GENITIVE = 2;
        const DATIVE = 4;
        const ACCUSATIVE = 8;
        const INSTRUMENTAL = 16;
        const PREPOSITIONAL = 32;

        // Gender (Bits 6-8)
        const MASCULINE = 64;
        const FEMININE = 128;
        const NEUTER = 256;

        // Number (Bits 9-10)
        const SINGULAR = 512;
        const PLURAL = 1024;
    }
}

impl MorphFlags {
    pub const CASES: Self = Self::NOMINATIVE
        .union(Self::GENITIVE)
        .union(Self::DATIVE)
        .union(Self::ACCUSATIVE)
        .union(Self::INSTRUMENTAL)
        .union(Self::PREPOSITIONAL);

    pub const GENDERS: Self = Self::MASCULINE.union(Self::FEMININE).union(Self::NEUTER);

    pub const NUMBERS: Self = Self::SINGULAR.union(Self::PLURAL);
}

/// Serde adapter keeping raw `u32` flag bits readable in JSON.
#[cfg(feature = "serde")]
pub mod flag_text {
    use super::MorphFlags;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bits: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        MorphFlags::from_bits_truncate(*bits).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        MorphFlags::deserialize(deserializer).map(|flags| flags.bits())
    }
}
