//! Greedy longest-match scan over the word tokens of a text.

use std::collections::BTreeSet;

use pravo_parser::token::{Span, Token};
use serde::Serialize;

use crate::alias::{AliasIndex, KEY_SEPARATOR};

/// A located reference to one or more laws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
    pub span: Span,
    /// Source text covered by the matched words, separators included.
    pub text: String,
    pub alias_key: String,
    pub law_ids: BTreeSet<String>,
    pub word_count: usize,
}

/// Mentions of one text, ordered by start offset, never overlapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub mentions: Vec<Mention>,
}

impl ResolutionResult {
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mention> {
        self.mentions.iter()
    }

    /// Every identifier mentioned anywhere in the text.
    pub fn law_ids(&self) -> BTreeSet<&str> {
        self.mentions
            .iter()
            .flat_map(|m| m.law_ids.iter().map(String::as_str))
            .collect()
    }
}

impl FromIterator<Mention> for ResolutionResult {
    fn from_iter<I: IntoIterator<Item = Mention>>(iter: I) -> Self {
        Self {
            mentions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResolutionResult {
    type Item = &'a Mention;
    type IntoIter = std::slice::Iter<'a, Mention>;

    fn into_iter(self) -> Self::IntoIter {
        self.mentions.iter()
    }
}

/// Longest alias found at one token position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Hit {
    pub len: usize,
    pub key: String,
    pub law_ids: BTreeSet<String>,
}

#[derive(Clone, Copy)]
pub(crate) struct PhraseMatcher<'i> {
    index: &'i AliasIndex,
    max_words: usize,
}

impl<'i> PhraseMatcher<'i> {
    pub fn new(index: &'i AliasIndex, cap: Option<usize>) -> Self {
        let max_words = match cap {
            Some(cap) => cap.min(index.max_words()),
            None => index.max_words(),
        };
        Self { index, max_words }
    }

    /// Phrase length limit: the longest alias, capped by configuration.
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// Longest alias starting at `words[at]`. Within that length every
    /// hitting lemma combination contributes its identifiers; the first
    /// combination names the key.
    pub fn longest_at(&self, words: &[Token<'_>], at: usize) -> Option<Hit> {
        let end = words.len().min(at + self.max_words);
        let window = words.get(at..end)?;

        let mut hits = Vec::new();
        let mut partial = String::new();
        self.search(window, 0, &mut partial, &mut hits);

        let len = hits.iter().map(|(len, _)| *len).max()?;
        let mut longest = hits.into_iter().filter(|(l, _)| *l == len);
        let (_, key) = longest.next()?;

        let mut law_ids = self.index.lookup(&key).cloned().unwrap_or_default();
        for (_, other) in longest {
            if let Some(ids) = self.index.lookup(&other) {
                law_ids.extend(ids.iter().cloned());
            }
        }

        Some(Hit { len, key, law_ids })
    }

    /// Depth-first walk over the per-token analyses, pruned to key prefixes.
    fn search(
        &self,
        words: &[Token<'_>],
        depth: usize,
        partial: &mut String,
        hits: &mut Vec<(usize, String)>,
    ) {
        let Some(token) = words.get(depth) else {
            return;
        };

        let mut seen: Vec<&str> = Vec::with_capacity(token.forms.len());
        for form in &token.forms {
            let lemma = form.lemma.as_str();
            if seen.contains(&lemma) {
                continue;
            }
            seen.push(lemma);

            let mark = partial.len();
            if depth > 0 {
                partial.push_str(KEY_SEPARATOR);
            }
            partial.push_str(lemma);

            if self.index.lookup(partial).is_some() {
                hits.push((depth + 1, partial.clone()));
            }
            if self.index.is_prefix(partial) {
                self.search(words, depth + 1, partial, hits);
            }

            partial.truncate(mark);
        }
    }
}

/// Lazy mention sequence over one text.
///
/// Words are tokenized and analysed up front when the sequence is created;
/// only the phrase matching is deferred. Each `next` resumes the scan where
/// the previous mention ended, so collecting the same text twice yields
/// identical results.
pub struct Mentions<'e, 't> {
    matcher: PhraseMatcher<'e>,
    text: &'t str,
    words: Vec<Token<'t>>,
    pos: usize,
}

impl<'e, 't> Mentions<'e, 't> {
    pub(crate) fn new(matcher: PhraseMatcher<'e>, text: &'t str, words: Vec<Token<'t>>) -> Self {
        Self {
            matcher,
            text,
            words,
            pos: 0,
        }
    }
}

impl Iterator for Mentions<'_, '_> {
    type Item = Mention;

    fn next(&mut self) -> Option<Mention> {
        while self.pos < self.words.len() {
            let at = self.pos;
            let Some(hit) = self.matcher.longest_at(&self.words, at) else {
                self.pos += 1;
                continue;
            };

            let last = at + hit.len - 1;
            let span = self.words[at].span.cover(&self.words[last].span);
            self.pos = last + 1;

            tracing::trace!(start = span.start, end = span.end, key = %hit.key, "Mention");

            return Some(Mention {
                span,
                text: self.text[span.start..span.end].to_string(),
                alias_key: hit.key,
                law_ids: hit.law_ids,
                word_count: hit.len,
            });
        }
        None
    }
}
