//! Grammar of structural references: `пп. а п. 2 ст. 15`, `ч. 1 статьи 5`,
//! `пункт 3 и 4`. Labels are case-insensitive and may be abbreviated.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while},
    character::complete::{char, one_of, satisfy},
    combinator::{map, not, opt, peek, recognize},
    multi::many0,
    sequence::{pair, terminated, tuple},
    IResult,
};
use pravo_parser::parser::{dotted_number, DASHES};
use pravo_parser::token::Span;

/// Raw list texts of one matched reference, not yet normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    pub span: Span,
    pub subpoints: Option<&'a str>,
    pub points: Option<&'a str>,
    pub articles: Option<&'a str>,
}

fn ws0(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

fn letters0(input: &str) -> IResult<&str, &str> {
    take_while(char::is_alphabetic)(input)
}

fn no_letter_follows(input: &str) -> IResult<&str, ()> {
    not(satisfy(char::is_alphabetic))(input)
}

fn one_of_ci<'a>(options: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    satisfy(move |c: char| c.to_lowercase().any(|l| options.contains(l)))
}

/// `подпункт…` | `пп.`
fn subpoint_label(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(tag_no_case("подпункт"), letters0)),
        recognize(pair(tag_no_case("пп"), opt(char('.')))),
    ))(input)
}

/// `пункт…` | `п.` | `часть…`/`части…` | `ч.`
fn point_label(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(tag_no_case("пункт"), letters0)),
        recognize(pair(tag_no_case("п"), char('.'))),
        recognize(tuple((tag_no_case("част"), one_of_ci("ьи"), letters0))),
        recognize(pair(tag_no_case("ч"), char('.'))),
    ))(input)
}

/// `статья`/`статьи`/`статье`/`статью` | `ст.`
fn article_label(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(tag_no_case("стать"), one_of_ci("яеию"))),
        recognize(pair(tag_no_case("ст"), opt(char('.')))),
    ))(input)
}

fn conjunction(input: &str) -> IResult<&str, &str> {
    terminated(alt((tag_no_case("или"), tag_no_case("и"))), no_letter_follows)(input)
}

fn single_letter(input: &str) -> IResult<&str, char> {
    terminated(
        satisfy(|c| matches!(c, 'а'..='я' | 'А'..='Я')),
        no_letter_follows,
    )(input)
}

fn dash(input: &str) -> IResult<&str, char> {
    one_of(DASHES)(input)
}

/// `3`, `3.1`, `6 - 12`, `а`, `а–г`
fn list_item(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(
            dotted_number,
            opt(tuple((ws0, dash, ws0, dotted_number))),
        )),
        recognize(pair(single_letter, opt(tuple((ws0, dash, ws0, single_letter))))),
    ))(input)
}

/// Items separated by commas, optionally closed by `и`/`или` and one more item.
fn item_list(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        list_item,
        many0(tuple((ws0, char(','), ws0, list_item))),
        opt(tuple((ws0, conjunction, ws0, list_item))),
    )))(input)
}

/// Article numbers: at most one comma item and one `и`/`или` item.
fn article_list(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        dotted_number,
        opt(tuple((ws0, char(','), ws0, dotted_number))),
        opt(tuple((ws0, conjunction, ws0, dotted_number))),
    )))(input)
}

/// Optional `,`/`;` and `в`/`во` between a point list and the article label.
fn point_article_separator(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        ws0,
        opt(one_of(",;")),
        ws0,
        opt(terminated(
            alt((tag_no_case("во"), tag_no_case("в"))),
            peek(no_letter_follows),
        )),
        ws0,
    )))(input)
}

type Lists<'a> = (Option<&'a str>, Option<&'a str>, &'a str);

fn full_reference(input: &str) -> IResult<&str, Lists<'_>> {
    map(
        tuple((
            opt(map(
                tuple((subpoint_label, ws0, item_list, ws0)),
                |(_, _, list, _)| list,
            )),
            opt(map(
                tuple((point_label, ws0, item_list, ws0, point_article_separator)),
                |(_, _, list, _, _)| list,
            )),
            article_label,
            ws0,
            article_list,
        )),
        |(subpoints, points, _, _, articles)| (subpoints, points, articles),
    )(input)
}

fn point_reference(input: &str) -> IResult<&str, &str> {
    map(tuple((point_label, ws0, item_list)), |(_, _, list)| list)(input)
}

/// Byte offsets where a word starts.
fn word_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    let mut prev_alpha = false;
    text.char_indices().filter_map(move |(i, c)| {
        let start = c.is_alphabetic() && !prev_alpha;
        prev_alpha = c.is_alphabetic();
        start.then_some(i)
    })
}

/// Non-overlapping matches of `parser` attempted at every word start.
fn scan<'a, T>(
    text: &'a str,
    mut parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
) -> Vec<(Span, T)> {
    let mut found = Vec::new();
    let mut resume = 0;
    for start in word_starts(text) {
        if start < resume {
            continue;
        }
        if let Ok((rest, value)) = parser(&text[start..]) {
            let end = text.len() - rest.len();
            found.push((Span::new(start, end), value));
            resume = end;
        }
    }
    found
}

/// `[подпункт …] [пункт …] статья …` references, left to right.
pub fn full_references(text: &str) -> Vec<Reference<'_>> {
    scan(text, full_reference)
        .into_iter()
        .map(|(span, (subpoints, points, articles))| Reference {
            span,
            subpoints,
            points,
            articles: Some(articles),
        })
        .collect()
}

/// Bare `пункт …` / `часть …` references, left to right.
pub fn point_references(text: &str) -> Vec<Reference<'_>> {
    scan(text, point_reference)
        .into_iter()
        .map(|(span, points)| Reference {
            span,
            subpoints: None,
            points: Some(points),
            articles: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(text: &str) -> Reference<'_> {
        let refs = full_references(text);
        assert_eq!(refs.len(), 1, "{:?}", refs);
        refs[0]
    }

    #[test]
    fn test_article_only() {
        let r = only("см. ст. 15 ГК РФ");
        assert_eq!(r.articles, Some("15"));
        assert_eq!(r.points, None);
        assert_eq!(&"см. ст. 15 ГК РФ"[r.span.start..r.span.end], "ст. 15");
    }

    #[test]
    fn test_full_chain() {
        let r = only("в силу пп. 1, 2 и 5 п. 3 статьи 12.1 закона");
        assert_eq!(r.subpoints, Some("1, 2 и 5"));
        assert_eq!(r.points, Some("3"));
        assert_eq!(r.articles, Some("12.1"));
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let r = only("Часть 2 Статьи 7");
        assert_eq!(r.points, Some("2"));
        assert_eq!(r.articles, Some("7"));

        let r = only("ПОДПУНКТ а ПУНКТА 4 СТ. 9");
        assert_eq!(r.subpoints, Some("а"));
        assert_eq!(r.points, Some("4"));
    }

    #[test]
    fn test_point_and_article_separator() {
        let r = only("п. 3 в ст. 5");
        assert_eq!(r.points, Some("3"));
        assert_eq!(r.articles, Some("5"));

        let r = only("п. 3; ст. 5");
        assert_eq!(r.points, Some("3"));

        let r = only("ч. 1 и 2 ст. 8, 9 или 10");
        assert_eq!(r.points, Some("1 и 2"));
        assert_eq!(r.articles, Some("8, 9 или 10"));
    }

    #[test]
    fn test_ranges() {
        let r = only("пп. а – в п. 2 ст. 4");
        assert_eq!(r.subpoints, Some("а – в"));

        let r = only("пункты 6-12 статьи 3");
        assert_eq!(r.points, Some("6-12"));
    }

    #[test]
    fn test_trailing_words_are_not_list_items() {
        // "и" followed by a word, "с" starting "ст."
        let r = only("п. 2 и ст. 5");
        assert_eq!(r.points, None);
        assert_eq!(r.articles, Some("5"));
        assert_eq!(point_references("п. 2 и ст. 5")[0].points, Some("2"));
    }

    #[test]
    fn test_no_match_inside_words() {
        assert!(full_references("тест 5 мост. 7").is_empty());
        assert!(full_references("статьями 5").is_empty());
        assert!(full_references("").is_empty());
    }

    #[test]
    fn test_references_do_not_overlap() {
        let refs = full_references("ст. 1 и ст. 2, ст. 3");
        let articles: Vec<_> = refs.iter().map(|r| r.articles.unwrap()).collect();
        assert_eq!(articles, vec!["1", "2", "3"]);
        assert!(refs.windows(2).all(|w| w[0].span.end <= w[1].span.start));
    }
}
