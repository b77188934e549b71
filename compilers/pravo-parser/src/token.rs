use pravo_protocol::NormalizedForm;
use serde::Serialize;

/// Byte range into the analysed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Smallest span covering both.
    pub fn cover(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// A word the lexicon explains
    Word,
    /// A word only the fallback analysis covers
    UnknownWord,
    /// `15`, `15.1`, `1-3`
    Number,
    /// Punctuation mark, quotes and `№` included
    Punctuation(char),
}

#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub span: Span,
    pub text: &'a str,
    pub kind: TokenKind,
    /// Lemma analyses; empty for punctuation.
    pub forms: Vec<NormalizedForm>,
}

impl Token<'_> {
    pub fn is_punct(&self) -> bool {
        matches!(self.kind, TokenKind::Punctuation(_))
    }

    /// Lemma of the first analysis, or the punctuation text itself.
    pub fn primary_lemma(&self) -> &str {
        self.forms.first().map(|f| f.lemma.as_str()).unwrap_or(self.text)
    }
}
