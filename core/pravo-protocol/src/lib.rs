#![no_std] // lexicons are plain data; `std` only for tools and tests

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod morphology;

// Re-export core types for convenience
pub use ids::{LemmaId, ParadigmId};
pub use morphology::*;

pub mod model;
pub use model::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    fn tiny_lexicon() -> Lexicon {
        Lexicon {
            version: 1,
            lemmas: vec![Lemma {
                id: LemmaId(1),
                stem: "кодекс".to_string(),
                pos: PartOfSpeech::Noun,
                paradigm: ParadigmId(1),
            }],
            paradigms: vec![Paradigm {
                id: ParadigmId(1),
                endings: vec![
                    Ending {
                        flags: (MorphFlags::NOMINATIVE | MorphFlags::SINGULAR).bits(),
                        suffix: "".to_string(),
                    },
                    Ending {
                        flags: (MorphFlags::GENITIVE | MorphFlags::SINGULAR).bits(),
                        suffix: "а".to_string(),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_enum_serialization() {
        let original = PartOfSpeech::Adjective;

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize PartOfSpeech");
        let deserialized: PartOfSpeech =
            from_bytes(&bytes).expect("Failed to deserialize PartOfSpeech");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_lexicon_archive_round_trip() {
        // Simulate compiling lexicon.rkyv and loading it back
        let original = tiny_lexicon();
        let bytes = to_bytes::<_, 1024>(&original).expect("Failed to serialize Lexicon");
        let deserialized: Lexicon = from_bytes(&bytes).expect("Failed to deserialize Lexicon");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_id_layout() {
        // Verify Zero-Cost abstraction: LemmaId(u32) should be exactly 4 bytes
        assert_eq!(core::mem::size_of::<LemmaId>(), 4);
        assert_eq!(core::mem::size_of::<Option<LemmaId>>(), 8); // u32 + tag (padding)
    }

    #[test]
    fn test_validate_rejects_dangling_paradigm() {
        let mut lexicon = tiny_lexicon();
        assert_eq!(lexicon.validate(), Ok(()));

        lexicon.lemmas[0].paradigm = ParadigmId(7);
        assert_eq!(
            lexicon.validate(),
            Err(LexiconError::UnknownParadigm {
                lemma: LemmaId(1),
                paradigm: ParadigmId(7)
            })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_lemma_ids() {
        let mut lexicon = tiny_lexicon();
        let mut twin = lexicon.lemmas[0].clone();
        twin.stem = "закон".to_string();
        lexicon.lemmas.push(twin);
        assert_eq!(lexicon.validate(), Err(LexiconError::DuplicateLemma(LemmaId(1))));
        assert_eq!(
            LexiconError::DuplicateLemma(LemmaId(1)).to_string(),
            "lemma #1 is defined twice"
        );
    }

    #[test]
    fn test_validate_rejects_empty_paradigm() {
        let mut lexicon = tiny_lexicon();
        lexicon.paradigms[0].endings.clear();
        assert_eq!(lexicon.validate(), Err(LexiconError::EmptyParadigm(ParadigmId(1))));
    }

    #[test]
    fn test_citation_suffix_is_first_ending() {
        let lexicon = tiny_lexicon();
        assert_eq!(lexicon.paradigms[0].citation_suffix(), "");
        assert!(MorphFlags::CASES.contains(MorphFlags::PREPOSITIONAL));
        assert!(!MorphFlags::CASES.intersects(MorphFlags::NUMBERS));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_flags_are_readable() {
        let json = r#"{"flags": "GENITIVE | SINGULAR", "suffix": "а"}"#;
        let ending: Ending = serde_json::from_str(json).expect("valid ending");
        assert_eq!(ending.morph_flags(), MorphFlags::GENITIVE | MorphFlags::SINGULAR);
    }
}
