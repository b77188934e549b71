//! Article-level links: a structural reference (`п. 2 ст. 15`) paired with
//! the law named right after it (`Налогового кодекса РФ`).

use std::collections::BTreeSet;

use pravo_parser::token::{Span, Token};
use pravo_parser::Lexer;
use serde::Serialize;

use crate::alias::{AliasIndex, KEY_SEPARATOR, OPTIONAL_LEMMAS};
use crate::config::EngineConfig;
use crate::reference::{full_references, point_references, Reference};
use crate::resolver::PhraseMatcher;

/// Lemmas that name a kind of document; quotes opened after one of them
/// hold its title.
pub const DOC_ANCHORS: [&str; 7] = ["закон", "кодекс", "указ", "постановление", "положение", "правило", "правила"];

pub const ABBR_LEMMAS: [&str; 11] = ["апк", "гк", "гпк", "ук", "нк", "жк", "ск", "тк", "коап", "рф", "фз"];

const ARTICLE_LEMMAS: [&str; 2] = ["статья", "ст"];

const RUS_ALPHA: [char; 33] = [
    'а', 'б', 'в', 'г', 'д', 'е', 'ё', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п', 'р', 'с',
    'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
];

const MAX_NUMERIC_RANGE: u32 = 400;
const MAX_LETTER_RANGE: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub law_ids: BTreeSet<String>,
    pub article: Option<String>,
    pub point: Option<String>,
    pub subpoint: Option<String>,
    /// Span of the structural reference, not of the law name.
    pub span: Span,
}

pub(crate) struct CitationExtractor<'e> {
    pub lexer: Lexer<'e>,
    pub index: &'e AliasIndex,
    pub matcher: PhraseMatcher<'e>,
    pub config: &'e EngineConfig,
}

impl CitationExtractor<'_> {
    pub fn extract(&self, text: &str) -> Vec<Citation> {
        let mut citations = Vec::new();
        let mut used: Vec<Span> = Vec::new();

        for reference in full_references(text) {
            if used.iter().any(|s| s.overlaps(&reference.span)) {
                continue;
            }
            let Some(law_ids) = self.law_after(text, reference.span.end) else {
                continue;
            };
            citations.extend(expand(reference, &law_ids));
            used.push(reference.span);
        }

        for reference in point_references(text) {
            if used.iter().any(|s| s.overlaps(&reference.span)) {
                continue;
            }
            if self.article_label_ahead(text, reference.span.end) {
                continue;
            }
            let Some(law_ids) = self.law_after(text, reference.span.end) else {
                continue;
            };
            // Bare point references keep their point list rather than
            // reporting the law alone.
            citations.extend(expand(reference, &law_ids));
            used.push(reference.span);
        }

        tracing::debug!(citations = citations.len(), "Citations extracted");
        citations
    }

    /// Tokens after `from`, up to `lookahead` words. A quoted title opened
    /// after a document anchor is always read to its closing quote, within
    /// `window_cap` tokens.
    fn window<'t>(&self, text: &'t str, from: usize) -> Vec<Token<'t>> {
        let mut window = Vec::new();
        let mut words = 0;
        let mut ascii = false;
        let mut angle = false;
        let mut smart = false;
        let mut anchored = false;

        for token in self.lexer.tokens(&text[from..]) {
            if !token.is_punct() {
                words += 1;
                let lemma = token.primary_lemma();
                if DOC_ANCHORS.contains(&lemma) || ABBR_LEMMAS.contains(&lemma) {
                    anchored = true;
                }
            }

            match token.text {
                "\"" => ascii = !ascii,
                "«" => angle = true,
                "»" => angle = false,
                "“" | "„" => smart = true,
                "”" | "‟" => smart = false,
                _ => {}
            }

            window.push(token);

            let in_quotes = ascii || angle || smart;
            if words >= self.config.lookahead && !(anchored && in_quotes) {
                break;
            }
            if window.len() > self.config.window_cap {
                break;
            }
        }

        window
    }

    /// First exact mention in the window; failing that, the earliest and
    /// longest compact match.
    fn law_after(&self, text: &str, from: usize) -> Option<BTreeSet<String>> {
        let words: Vec<Token<'_>> = self
            .window(text, from)
            .into_iter()
            .filter(|t| !t.is_punct())
            .collect();

        if let Some(hit) = (0..words.len()).find_map(|at| self.matcher.longest_at(&words, at)) {
            return Some(hit.law_ids);
        }

        if !self.config.compact_matching {
            return None;
        }

        let max_words = self.matcher.max_words();
        for at in 0..words.len() {
            let longest = max_words.min(words.len() - at);
            for len in (1..=longest).rev() {
                let compact: Vec<&str> = words[at..at + len]
                    .iter()
                    .map(Token::primary_lemma)
                    .filter(|l| !OPTIONAL_LEMMAS.contains(l))
                    .collect();
                if compact.len() < 2 {
                    continue;
                }
                if let Some(id) = self.index.lookup_compact(&compact.join(KEY_SEPARATOR)) {
                    return Some(BTreeSet::from([id.to_string()]));
                }
            }
        }
        None
    }

    fn article_label_ahead(&self, text: &str, from: usize) -> bool {
        self.lexer
            .word_tokens(&text[from..])
            .take(self.config.lookahead)
            .any(|t| ARTICLE_LEMMAS.contains(&t.primary_lemma()))
    }
}

/// One citation per subpoint, but subpoints only count next to a point.
fn expand(reference: Reference<'_>, law_ids: &BTreeSet<String>) -> Vec<Citation> {
    let article = reference.articles.map(normalize_list).filter(|s| !s.is_empty());
    let point = reference.points.map(normalize_list).filter(|s| !s.is_empty());
    let subpoints = reference.subpoints.map(normalize_list).filter(|s| !s.is_empty());

    let citation = |subpoint: Option<String>| Citation {
        law_ids: law_ids.clone(),
        article: article.clone(),
        point: point.clone(),
        subpoint,
        span: reference.span,
    };

    match (&subpoints, &point) {
        (Some(list), Some(_)) => expand_subpoints(list)
            .into_iter()
            .map(|sub| citation(Some(sub)))
            .collect(),
        _ => vec![citation(None)],
    }
}

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '–' | '—')
}

/// Trims, unifies dashes, drops spaces around them and collapses whitespace:
/// `" 6 – 12,  14 "` -> `"6-12, 14"`.
pub fn normalize_list(list: &str) -> String {
    let unified: String = list.trim().chars().map(|c| if is_dash(c) { '-' } else { c }).collect();
    let collapsed = unified.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace(" -", "-").replace("- ", "-")
}

/// Splits a subpoint list on `,`, `и`, `или` and expands `6-9` and `а-г`
/// ranges. Oversized or malformed ranges are kept verbatim.
pub fn expand_subpoints(list: &str) -> Vec<String> {
    let mut items = Vec::new();
    for part in list.split(',') {
        let mut current: Vec<&str> = Vec::new();
        for word in part.split_whitespace() {
            let lower = word.to_lowercase();
            if lower == "и" || lower == "или" {
                if !current.is_empty() {
                    items.push(current.join(" "));
                    current.clear();
                }
            } else {
                current.push(word);
            }
        }
        if !current.is_empty() {
            items.push(current.join(" "));
        }
    }

    let mut out = Vec::new();
    for item in items {
        let item: String = item.chars().map(|c| if is_dash(c) { '-' } else { c }).collect();
        match expand_range(&item) {
            Some(expanded) => out.extend(expanded),
            None => out.push(item),
        }
    }
    out
}

fn expand_range(item: &str) -> Option<Vec<String>> {
    let (a, b) = item.split_once('-')?;

    if let (Ok(start), Ok(end)) = (a.parse::<u32>(), b.parse::<u32>()) {
        if a.chars().all(|c| c.is_ascii_digit()) && b.chars().all(|c| c.is_ascii_digit()) {
            if start > end || end - start > MAX_NUMERIC_RANGE {
                return None;
            }
            return Some((start..=end).map(|n| n.to_string()).collect());
        }
    }

    let letter = |s: &str| -> Option<usize> {
        let mut chars = s.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let c = c.to_lowercase().next()?;
        let c = if c == 'ё' { 'е' } else { c };
        RUS_ALPHA.iter().position(|&l| l == c)
    };
    let (start, end) = (letter(a)?, letter(b)?);
    if start > end || end - start > MAX_LETTER_RANGE {
        return None;
    }
    Some(RUS_ALPHA[start..=end].iter().map(|c| c.to_string()).collect())
}
