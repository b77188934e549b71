//! Alias dictionary: curated phrases -> law identifiers.
//!
//! Every alias is tokenized like running text and indexed under the primary
//! lemma of each word, joined by [`KEY_SEPARATOR`]. `"Налоговый кодекс РФ"`
//! is stored as `налоговый кодекс рф`, so an inflected mention such as
//! `"Налогового кодекса РФ"` lands on the same key once its words are
//! normalized.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use pravo_morph::Analyzer;
use pravo_parser::Lexer;
use serde::{Deserialize, Serialize};

use crate::error::{ResourceError, Result};

pub const KEY_SEPARATOR: &str = " ";

/// Qualifiers that may be dropped when matching a compact key:
/// "Гражданский кодекс России" still means "Гражданский кодекс Российской Федерации".
pub const OPTIONAL_LEMMAS: [&str; 5] = ["российский", "федерация", "рф", "россия", "федеральный"];

/// A single identifier or a list of them, as written in `law_aliases.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifiers {
    One(String),
    Many(Vec<String>),
}

impl Identifiers {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Identifiers::One(id) => std::slice::from_ref(id),
            Identifiers::Many(ids) => ids,
        }
    }
}

/// Raw alias resource, alias phrase -> identifier(s).
pub type AliasResource = BTreeMap<String, Identifiers>;

pub fn parse_resource(json: &str, origin: &str) -> Result<AliasResource> {
    serde_json::from_str(json).map_err(|e| ResourceError::json(origin, e))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    pub law_ids: BTreeSet<String>,
    pub word_count: usize,
    /// Raw phrases that normalized to this key.
    pub aliases: Vec<String>,
}

/// Read-only lookup table built once from an [`AliasResource`].
#[derive(Debug, Default)]
pub struct AliasIndex {
    entries: HashMap<String, AliasEntry>,
    /// Every proper prefix of every key; bounds phrase search.
    prefixes: HashSet<String>,
    compact: HashMap<String, String>,
    max_words: usize,
}

impl AliasIndex {
    pub fn build(analyzer: &Analyzer, resource: &AliasResource) -> Result<Self> {
        if resource.is_empty() {
            return Err(ResourceError::EmptyDictionary);
        }

        let lexer = Lexer::new(analyzer);
        let mut index = AliasIndex::default();
        let mut compact_ids: HashMap<String, BTreeSet<String>> = HashMap::new();

        for (alias, identifiers) in resource {
            let ids = identifiers.as_slice();
            if ids.is_empty() {
                return Err(ResourceError::EmptyIdentifiers(alias.clone()));
            }
            if ids.iter().any(|id| id.trim().is_empty()) {
                return Err(ResourceError::BlankIdentifier(alias.clone()));
            }

            let lemmas: Vec<String> = lexer
                .words(alias)
                .iter()
                .map(|t| t.primary_lemma().to_string())
                .collect();
            if lemmas.is_empty() {
                return Err(ResourceError::EmptyAlias(alias.clone()));
            }

            let key = lemmas.join(KEY_SEPARATOR);
            let entry = index.entries.entry(key).or_insert_with(|| AliasEntry {
                law_ids: BTreeSet::new(),
                word_count: lemmas.len(),
                aliases: Vec::new(),
            });
            entry.law_ids.extend(ids.iter().map(|id| id.trim().to_string()));
            entry.aliases.push(alias.clone());

            for end in 1..lemmas.len() {
                index.prefixes.insert(lemmas[..end].join(KEY_SEPARATOR));
            }
            index.max_words = index.max_words.max(lemmas.len());

            let compact: Vec<&str> = lemmas
                .iter()
                .map(String::as_str)
                .filter(|l| !OPTIONAL_LEMMAS.contains(l))
                .collect();
            if compact.len() >= 2 {
                compact_ids
                    .entry(compact.join(KEY_SEPARATOR))
                    .or_default()
                    .extend(ids.iter().map(|id| id.trim().to_string()));
            }
        }

        // A compact key is only trusted when it names a single law.
        index.compact = compact_ids
            .into_iter()
            .filter(|(_, ids)| ids.len() == 1)
            .filter_map(|(key, ids)| ids.into_iter().next().map(|id| (key, id)))
            .collect();

        tracing::debug!(
            aliases = resource.len(),
            keys = index.entries.len(),
            compact_keys = index.compact.len(),
            max_words = index.max_words,
            "Alias index built"
        );

        Ok(index)
    }

    pub fn lookup(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(key).map(|e| &e.law_ids)
    }

    pub fn entry(&self, key: &str) -> Option<&AliasEntry> {
        self.entries.get(key)
    }

    /// Whether some longer key starts with `partial` followed by a separator.
    pub fn is_prefix(&self, partial: &str) -> bool {
        self.prefixes.contains(partial)
    }

    pub fn lookup_compact(&self, key: &str) -> Option<&str> {
        self.compact.get(key).map(String::as_str)
    }

    /// Word count of the longest alias.
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in sorted order, for dumps and diffs.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
