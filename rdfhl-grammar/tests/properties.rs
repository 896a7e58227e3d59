//! Property-based tests for the grammars
//!
//! - percent encodings inside IRIs and local names are always escapes
//! - SPARQL keywords classify the same in any letter case
//! - every language covers any input without gaps and without hanging

use once_cell::sync::Lazy;
use proptest::prelude::*;
use rdfhl_grammar::{Registry, Scope};

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::with_defaults);

fn hex_pair() -> impl Strategy<Value = String> {
    "[0-9A-Fa-f]{2}"
}

/// Flip the case of each letter according to the mask.
fn with_case(word: &str, mask: &[bool]) -> String {
    word.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn percent_in_iri_is_escape(
        head in "[a-z/]{0,8}",
        hex in hex_pair(),
        tail in "[a-z/]{0,8}",
    ) {
        let source = format!("<http://example.org/{}%{}{}> a ex:C .", head, hex, tail);
        let start = source.find('%').unwrap();
        for language in ["turtle", "sparql"] {
            let hl = REGISTRY.highlight(&source, language).unwrap();
            for offset in start..start + 3 {
                prop_assert_eq!(hl.scopes_at(offset), vec![Scope::Literal, Scope::Escape]);
            }
            prop_assert_eq!(hl.scopes_at(start - 1), vec![Scope::Literal]);
        }
    }

    #[test]
    fn percent_in_local_name_is_escape(
        prefix in "[a-z]{1,4}",
        head in "[a-z]{0,4}",
        hex in hex_pair(),
        tail in "[a-z]{0,4}",
    ) {
        let source = format!("{}:{}%{}{} a {}:Thing .", prefix, head, hex, tail, prefix);
        let start = source.find('%').unwrap();
        let hl = REGISTRY.highlight(&source, "turtle").unwrap();
        for offset in start..start + 3 {
            prop_assert_eq!(hl.scopes_at(offset), vec![Scope::Symbol, Scope::Escape]);
        }
        prop_assert_eq!(hl.scopes_at(0), vec![Scope::Symbol]);
    }

    #[test]
    fn sparql_keywords_ignore_case(
        word in prop::sample::select(vec!["select", "where", "optional", "filter", "distinct"]),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let keyword = with_case(word, &mask);
        let source = format!("{} ?x", keyword);
        let hl = REGISTRY.highlight(&source, "sparql").unwrap();
        for offset in 0..keyword.len() {
            prop_assert_eq!(hl.scopes_at(offset), vec![Scope::Keyword]);
        }
    }

    #[test]
    fn tokens_cover_any_input(source in "(\\PC|\n){0,60}") {
        for language in ["turtle", "sparql", "shexc", "json"] {
            let hl = REGISTRY.highlight(&source, language).unwrap();
            let joined: String = hl.tokens().iter().map(|t| t.text.as_str()).collect();
            prop_assert_eq!(&joined, &source);
            prop_assert_eq!(hl.root.range.clone(), 0..source.len());
        }
    }
}
