use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1, one_of},
    combinator::{map, opt, recognize},
    multi::many0,
    sequence::{pair, tuple},
    IResult,
};
use crate::token::Span;

/// Characters emitted as punctuation tokens. Quotes matter to the citation
/// lookahead; the rest only separate words.
pub const PUNCTUATION: &str = ".,;:!?()[]{}\"«»“”„‟‹›—–-№";

pub const DASHES: &str = "-–—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken<'a> {
    Word(&'a str),
    Number(&'a str),
    Punct(char),
}

/// `\d+(\.\d+)*`
pub fn dotted_number(input: &str) -> IResult<&str, &str> {
    recognize(pair(digit1, many0(pair(char('.'), digit1))))(input)
}

/// A dotted number optionally followed by a dash and another one: `12.1-12.4`.
pub fn number_range(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        dotted_number,
        opt(tuple((one_of(DASHES), dotted_number))),
    ))(input)
}

fn raw_token(input: &str) -> IResult<&str, RawToken> {
    alt((
        map(number_range, RawToken::Number),
        map(take_while1(char::is_alphabetic), RawToken::Word),
        map(one_of(PUNCTUATION), RawToken::Punct),
    ))(input)
}

/// Streaming tokenizer: each `next` skips whitespace and reads one token,
/// so a caller that stops early never scans the rest of the input.
pub struct RawTokens<'a> {
    original_input: &'a str,
    input: &'a str,
}

impl<'a> RawTokens<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            original_input: input,
            input,
        }
    }
}

impl<'a> Iterator for RawTokens<'a> {
    type Item = (Span, RawToken<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // 1. Skip whitespace (Unicode aware: legal texts are full of NBSP)
            let (next_input, _) =
                take_while::<_, &str, nom::error::Error<&str>>(char::is_whitespace)(self.input).ok()?;
            self.input = next_input;

            if self.input.is_empty() {
                return None;
            }

            // 2. Try to match a token
            match raw_token(self.input) {
                Ok((next_input, token)) => {
                    let len = self.input.len() - next_input.len();
                    let start = self.original_input.len() - self.input.len();
                    self.input = next_input;
                    return Some((Span::new(start, start + len), token));
                }
                Err(_) => {
                    // Skip one char to recover (resilient parsing)
                    let c = self.input.chars().next()?;
                    self.input = &self.input[c.len_utf8()..];
                }
            }
        }
    }
}

pub fn parse_with_spans(input: &str) -> Vec<(Span, RawToken)> {
    RawTokens::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(input: &str) -> Vec<RawToken> {
        parse_with_spans(input).into_iter().map(|(_, t)| t).collect()
    }

    #[test]
    fn test_words_numbers_and_punctuation() {
        assert_eq!(
            raw("ст. 15.1 ГК РФ"),
            vec![
                RawToken::Word("ст"),
                RawToken::Punct('.'),
                RawToken::Number("15.1"),
                RawToken::Word("ГК"),
                RawToken::Word("РФ"),
            ]
        );
    }

    #[test]
    fn test_number_ranges_and_trailing_dots() {
        assert_eq!(raw("1–3"), vec![RawToken::Number("1–3")]);
        assert_eq!(raw("5."), vec![RawToken::Number("5"), RawToken::Punct('.')]);
        assert_eq!(
            raw("44-ФЗ"),
            vec![RawToken::Number("44"), RawToken::Punct('-'), RawToken::Word("ФЗ")]
        );
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let text = "«Кодекс»\u{a0}РФ";
        let tokens = parse_with_spans(text);
        let slices: Vec<&str> = tokens.iter().map(|(s, _)| &text[s.start..s.end]).collect();
        assert_eq!(slices, vec!["«", "Кодекс", "»", "РФ"]);
    }

    #[test]
    fn test_stream_stops_where_the_caller_stops() {
        let text = "ст. 5 ".repeat(10_000);
        let mut tokens = RawTokens::new(&text);
        assert_eq!(tokens.next(), Some((Span::new(0, 4), RawToken::Word("ст"))));
        assert_eq!(tokens.next(), Some((Span::new(4, 5), RawToken::Punct('.'))));
        // nothing past the second token has been consumed
        assert_eq!(tokens.input.len(), text.len() - 5);
    }

    #[test]
    fn test_unknown_symbols_are_skipped() {
        assert_eq!(
            raw("100% / закон"),
            vec![RawToken::Number("100"), RawToken::Word("закон")]
        );
        assert!(parse_with_spans("").is_empty());
        assert!(parse_with_spans("  \n\t").is_empty());
    }
}
