pub mod parser;
pub mod token;

use std::iter::Filter;

use pravo_morph::Analyzer;
use crate::token::{Token, TokenKind};
use crate::parser::{RawToken, RawTokens};

pub struct Lexer<'a> {
    analyzer: &'a Analyzer,
}

impl<'a> Lexer<'a> {
    pub fn new(analyzer: &'a Analyzer) -> Self {
        Self { analyzer }
    }

    /// Primary entry point: Text -> Tokens with their lemma analyses
    pub fn tokenize<'t>(&self, input: &'t str) -> Vec<Token<'t>> {
        self.tokens(input).collect()
    }

    /// Lazy form of [`Lexer::tokenize`]: a word is analysed only when the
    /// iterator reaches it.
    pub fn tokens<'t>(&self, input: &'t str) -> Tokens<'a, 't> {
        Tokens {
            analyzer: self.analyzer,
            input,
            raw: RawTokens::new(input),
        }
    }

    /// Lazy stream of the non-punctuation tokens.
    pub fn word_tokens<'t>(&self, input: &'t str) -> WordTokens<'a, 't> {
        self.tokens(input).filter(is_word as fn(&Token<'t>) -> bool)
    }

    /// Tokens that can be part of an alias phrase.
    pub fn words<'t>(&self, input: &'t str) -> Vec<Token<'t>> {
        self.word_tokens(input).collect()
    }
}

pub type WordTokens<'a, 't> = Filter<Tokens<'a, 't>, fn(&Token<'t>) -> bool>;

fn is_word(token: &Token<'_>) -> bool {
    !token.is_punct()
}

pub struct Tokens<'a, 't> {
    analyzer: &'a Analyzer,
    input: &'t str,
    raw: RawTokens<'t>,
}

impl<'t> Iterator for Tokens<'_, 't> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Token<'t>> {
        let (span, raw) = self.raw.next()?;
        let text = &self.input[span.start..span.end];

        let (kind, forms) = match raw {
            RawToken::Punct(c) => (TokenKind::Punctuation(c), Vec::new()),
            RawToken::Number(n) => (TokenKind::Number, self.analyzer.normalize(n)),
            RawToken::Word(w) => {
                let forms = self.analyzer.normalize(w);
                if forms.iter().all(|f| f.is_fallback()) {
                    (TokenKind::UnknownWord, forms)
                } else {
                    (TokenKind::Word, forms)
                }
            }
        };

        Some(Token { span, text, kind, forms })
    }
}
