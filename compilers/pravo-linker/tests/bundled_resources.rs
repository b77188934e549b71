use std::collections::BTreeSet;
use std::io::Write;
use std::sync::{Arc, OnceLock};

use pravo_linker::{Engine, ResourceError};
use proptest::prelude::*;

fn engine() -> &'static Engine {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(|| Engine::bundled().unwrap())
}

fn ids(result: &pravo_linker::ResolutionResult) -> BTreeSet<&str> {
    result.law_ids()
}

#[test]
fn inflected_title_resolves() {
    let result = engine().resolve("Нормы налогового кодекса применяются");
    assert_eq!(result.len(), 1);
    assert_eq!(result.mentions[0].text, "налогового кодекса");
    assert_eq!(ids(&result), BTreeSet::from(["nk-rf"]));
}

#[test]
fn case_does_not_matter() {
    let lower = engine().resolve("гражданский кодекс");
    let upper = engine().resolve("ГРАЖДАНСКИЙ КОДЕКС");
    assert_eq!(ids(&lower), BTreeSet::from(["gk-rf"]));
    assert_eq!(ids(&lower), ids(&upper));
}

#[test]
fn capitalized_inflected_title_resolves() {
    // every word here reads as an abbreviation before its dictionary lemma
    let result = engine().resolve("ПО НАЛОГОВОМУ КОДЕКСУ");
    assert_eq!(result.len(), 1);
    assert_eq!(result.mentions[0].text, "НАЛОГОВОМУ КОДЕКСУ");
    assert_eq!(result.mentions[0].alias_key, "налоговый кодекс");
    assert_eq!(ids(&result), BTreeSet::from(["nk-rf"]));
}

#[test]
fn longest_alias_wins() {
    let result = engine().resolve("по Гражданскому процессуальному кодексу Российской Федерации");
    assert_eq!(result.len(), 1);
    let mention = &result.mentions[0];
    assert_eq!(mention.word_count, 5);
    assert_eq!(mention.text, "Гражданскому процессуальному кодексу Российской Федерации");
    assert_eq!(ids(&result), BTreeSet::from(["gpk-rf"]));
}

#[test]
fn ambiguous_alias_keeps_every_law() {
    let result = engine().resolve("в силу ВК РФ");
    assert_eq!(result.len(), 1);
    assert_eq!(ids(&result), BTreeSet::from(["vk-rf", "vzk-rf"]));
}

#[test]
fn several_laws_in_order() {
    let text = "ст. 5 ТК РФ, ст. 10 ГК РФ и Федеральный закон № 44-ФЗ";
    let result = engine().resolve(text);
    let found: Vec<&str> = result
        .iter()
        .flat_map(|m| m.law_ids.iter().map(String::as_str))
        .collect();
    assert_eq!(found, vec!["tk-rf", "gk-rf", "fz-44"]);
    for mention in &result {
        assert_eq!(&text[mention.span.start..mention.span.end], mention.text);
    }
}

#[test]
fn nothing_to_find() {
    assert!(engine().resolve("").is_empty());
    assert!(engine().resolve("абракадабра шмурдяк, 42!").is_empty());
}

#[test]
fn resolution_is_repeatable() {
    let text = "Налоговый кодекс РФ и КоАП РФ";
    assert_eq!(engine().resolve(text), engine().resolve(text));
    assert_eq!(engine().mentions(text).count(), 2);
}

#[test]
fn citations_over_bundled_aliases() {
    let citations = engine().citations(
        "Согласно ч. 1 и 2 статьи 7 Трудового кодекса Российской Федерации, а также п. 3 Закона о защите прав потребителей",
    );
    assert_eq!(citations.len(), 2);

    assert_eq!(citations[0].law_ids, BTreeSet::from(["tk-rf".to_string()]));
    assert_eq!(citations[0].article.as_deref(), Some("7"));
    assert_eq!(citations[0].point.as_deref(), Some("1 и 2"));

    assert_eq!(citations[1].law_ids, BTreeSet::from(["zpp".to_string()]));
    assert_eq!(citations[1].article, None);
    assert_eq!(citations[1].point.as_deref(), Some("3"));
}

#[test]
fn empty_identifier_list_fails_startup() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"ГК РФ": "gk-rf", "НК РФ": []}}"#).unwrap();

    let result = Engine::initialize(file.path());
    assert!(matches!(result, Err(ResourceError::EmptyIdentifiers(alias)) if alias == "НК РФ"));
}

#[test]
fn missing_alias_file_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let result = Engine::initialize(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ResourceError::Io { .. })));
}

#[test]
fn aliases_and_lexicon_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let aliases = dir.path().join("aliases.json");
    let lexicon = dir.path().join("lexicon.json");
    std::fs::write(&aliases, r#"{"Лесной кодекс": ["lk"]}"#).unwrap();
    std::fs::write(&lexicon, pravo_linker::bundled::LEXICON_JSON).unwrap();

    let engine = Engine::builder()
        .lexicon_path(&lexicon)
        .aliases_path(&aliases)
        .build()
        .unwrap();
    assert_eq!(engine.resolve("Лесного кодекса").law_ids(), BTreeSet::from(["lk"]));
}

#[test]
fn shared_between_threads() {
    let engine = Arc::new(Engine::bundled().unwrap());
    let texts = ["налогового кодекса", "УК РФ", "Семейным кодексом", "ничего"];
    let expected: Vec<_> = texts.iter().map(|t| engine.resolve(t)).collect();

    std::thread::scope(|s| {
        for _ in 0..4 {
            let engine = Arc::clone(&engine);
            let expected = &expected;
            s.spawn(move || {
                for (text, want) in texts.iter().zip(expected) {
                    assert_eq!(&engine.resolve(text), want);
                }
            });
        }
    });
}

proptest! {
    #[test]
    fn mentions_are_sorted_and_disjoint(
        words in prop::collection::vec(
            prop::sample::select(vec![
                "налогового", "кодекса", "Российской", "Федерации", "ГК", "РФ", "ст.", "15",
                "и", ",", "«", "»", "Закона", "о", "защите", "прав", "потребителей", "ВК",
                "трудовой", "шмурдяк", "№", "44-ФЗ",
            ]),
            0..24,
        )
    ) {
        let text = words.join(" ");
        let result = engine().resolve(&text);

        for pair in result.mentions.windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
        }
        for mention in &result {
            prop_assert!(!mention.law_ids.is_empty());
            prop_assert_eq!(&text[mention.span.start..mention.span.end], mention.text.as_str());
        }
        prop_assert_eq!(&result, &engine().resolve(&text));
    }
}
