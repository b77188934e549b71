//! Dictionary-backed lemmatizer.
//!
//! A surface word is split into every `stem + suffix` pair whose suffix is no
//! longer than the longest ending in the lexicon. A split is an analysis when
//! the stem belongs to a lemma whose paradigm lists that suffix.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use pravo_protocol::{Lemma, LemmaId, Lexicon, MorphFlags, NormalizedForm, Paradigm, ParadigmId, PartOfSpeech};

use crate::MorphError;

/// Lowercases and merges `ё` into `е`.
pub fn fold(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ё' { 'е' } else { c })
        .collect()
}

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '–' | '—')
}

/// `15`, `15.1`, `1-3`, `1.2–1.5`
fn is_numeric(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == '.' || is_dash(c))
}

fn is_abbreviation(word: &str) -> bool {
    word.chars().count() >= 2 && word.chars().all(|c| c.is_alphabetic() && c.is_uppercase())
}

pub struct Analyzer {
    lexicon: Lexicon,
    /// folded stem -> indices into `lexicon.lemmas`
    stems: BTreeMap<String, Vec<usize>>,
    lemmas: BTreeMap<LemmaId, usize>,
    paradigms: BTreeMap<ParadigmId, usize>,
    max_suffix_chars: usize,
}

impl Analyzer {
    pub fn new(mut lexicon: Lexicon) -> Result<Self, MorphError> {
        lexicon.validate()?;

        for lemma in &mut lexicon.lemmas {
            lemma.stem = fold(&lemma.stem);
        }
        for paradigm in &mut lexicon.paradigms {
            for ending in &mut paradigm.endings {
                ending.suffix = fold(&ending.suffix);
            }
        }

        let mut stems: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, lemma) in lexicon.lemmas.iter().enumerate() {
            stems.entry(lemma.stem.clone()).or_default().push(i);
        }

        let lemmas = lexicon
            .lemmas
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id, i))
            .collect();

        let paradigms = lexicon
            .paradigms
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();

        let max_suffix_chars = lexicon
            .paradigms
            .iter()
            .flat_map(|p| p.endings.iter())
            .map(|e| e.suffix.chars().count())
            .max()
            .unwrap_or(0);

        Ok(Self {
            lexicon,
            stems,
            lemmas,
            paradigms,
            max_suffix_chars,
        })
    }

    /// Loads a lexicon compiled to an rkyv archive, validating the bytes first.
    pub fn from_archive(bytes: &[u8]) -> Result<Self, MorphError> {
        // Archives read from disk carry no alignment guarantee.
        let mut aligned = rkyv::AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);
        let lexicon = rkyv::from_bytes::<Lexicon>(&aligned)
            .map_err(|e| MorphError::InvalidArchive(format!("{:?}", e)))?;
        Self::new(lexicon)
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Headword behind an analysis' `lemma_id`.
    pub fn lemma(&self, id: LemmaId) -> Option<&Lemma> {
        self.lemmas.get(&id).map(|&i| &self.lexicon.lemmas[i])
    }

    pub fn paradigm_of(&self, lemma: &Lemma) -> Option<&Paradigm> {
        self.paradigms
            .get(&lemma.paradigm)
            .map(|&i| &self.lexicon.paradigms[i])
    }

    /// Dictionary form of a lemma: stem plus the paradigm's first ending.
    pub fn citation_form(&self, lemma: &Lemma) -> String {
        let suffix = self.paradigm_of(lemma).map(Paradigm::citation_suffix).unwrap_or("");
        format!("{}{}", lemma.stem, suffix)
    }

    /// All lemma analyses of `word`. Never empty: a word the lexicon cannot
    /// explain comes back as its folded self with no part of speech.
    pub fn normalize(&self, word: &str) -> Vec<NormalizedForm> {
        let folded = fold(word);

        if is_numeric(&folded) {
            let lemma = folded.chars().map(|c| if is_dash(c) { '-' } else { c }).collect();
            return vec![NormalizedForm::literal(lemma, PartOfSpeech::Numeral)];
        }

        let mut forms = Vec::new();
        self.analyze_into(&folded, &mut forms);

        // Capitals read as an abbreviation first (ГК, НК), even when some
        // lemma happens to end the same way.
        if is_abbreviation(word) && !forms.iter().any(|f| f.lemma == folded) {
            forms.insert(0, NormalizedForm::literal(folded.clone(), PartOfSpeech::Abbreviation));
        }

        if forms.is_empty() {
            forms.push(NormalizedForm::fallback(folded));
        }
        forms
    }

    /// First analysis of `word`; what alias phrases are indexed under.
    pub fn primary(&self, word: &str) -> NormalizedForm {
        let mut forms = self.normalize(word);
        // normalize never returns an empty set
        forms.swap_remove(0)
    }

    fn analyze_into(&self, folded: &str, forms: &mut Vec<NormalizedForm>) {
        let splits = folded
            .char_indices()
            .map(|(i, _)| i)
            .chain(core::iter::once(folded.len()))
            .rev()
            .take(self.max_suffix_chars + 1);

        for split in splits {
            let (stem, suffix) = folded.split_at(split);
            if stem.is_empty() {
                continue;
            }
            let Some(candidates) = self.stems.get(stem) else {
                continue;
            };

            for &i in candidates {
                let lemma = &self.lexicon.lemmas[i];
                let Some(paradigm) = self.paradigm_of(lemma) else {
                    continue;
                };

                let flags = paradigm
                    .endings
                    .iter()
                    .filter(|e| e.suffix == suffix)
                    .fold(None, |acc: Option<MorphFlags>, e| {
                        Some(acc.unwrap_or(MorphFlags::empty()) | e.morph_flags())
                    });
                let Some(flags) = flags else {
                    continue;
                };

                push_merged(
                    forms,
                    NormalizedForm {
                        lemma: format!("{}{}", lemma.stem, paradigm.citation_suffix()),
                        lemma_id: Some(lemma.id),
                        pos: Some(lemma.pos),
                        flags,
                    },
                );
            }
        }
    }
}

fn push_merged(forms: &mut Vec<NormalizedForm>, form: NormalizedForm) {
    match forms
        .iter_mut()
        .find(|f| f.lemma == form.lemma && f.pos == form.pos)
    {
        Some(existing) => existing.flags |= form.flags,
        None => forms.push(form),
    }
}
