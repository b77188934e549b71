//! Resources compiled into the binary.

use pravo_morph::Analyzer;
use pravo_protocol::Lexicon;

use crate::alias::{parse_resource, AliasResource};
use crate::error::{ResourceError, Result};

/// Lexicon covering the vocabulary of law titles.
pub const LEXICON_JSON: &str = include_str!("../data/lexicon.json");

/// Curated alias phrases of federal codes and common federal laws.
pub const ALIASES_JSON: &str = include_str!("../data/law_aliases.json");

pub fn lexicon() -> Result<Lexicon> {
    serde_json::from_str(LEXICON_JSON).map_err(|e| ResourceError::json("bundled lexicon", e))
}

pub fn aliases() -> Result<AliasResource> {
    parse_resource(ALIASES_JSON, "bundled aliases")
}

pub fn analyzer() -> Result<Analyzer> {
    Ok(Analyzer::new(lexicon()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_resources_load() {
        let lexicon = lexicon().unwrap();
        assert!(lexicon.validate().is_ok());
        assert!(!aliases().unwrap().is_empty());
    }

    #[test]
    fn test_bundled_lexicon_inflects_law_titles() {
        let a = analyzer().unwrap();
        let lemma = |w: &str| a.primary(w).lemma;
        assert_eq!(lemma("Налогового"), "налоговый");
        assert_eq!(lemma("кодекса"), "кодекс");
        assert_eq!(lemma("Российской"), "российский");
        assert_eq!(lemma("Федерации"), "федерация");
        assert_eq!(lemma("статьи"), "статья");
        assert_eq!(lemma("правонарушениях"), "правонарушение");
        assert_eq!(lemma("Трудовому"), "трудовой");
        assert_eq!(lemma("ГК"), "гк");
    }
}
