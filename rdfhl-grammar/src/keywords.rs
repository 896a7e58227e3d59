//! Keyword tables
//!
//!     Keyword tables are written the way highlighting grammars usually write them: a
//!     whitespace separated list per scope, where each word may carry a `|N` suffix
//!     setting its relevance. Words without a suffix weigh 1.
//!
//!         keyword:  "BASE|2 PREFIX|5 @base|10 @prefix|10"
//!         built_in: "a|0"
//!
//!     A table also owns its lexeme pattern: the runs of text that are looked up in
//!     the table. The default is `\w+`; Turtle widens it so `@prefix` is one lexeme.
//!
//!     Tables are immutable once built and shared between rules through `Arc`, so
//!     two rules pointing at the same table point at the same object. A table can also
//!     extend another one: lookups fall back to the base table, and words declared
//!     on top replace the base's entry. SPARQL extends Turtle's table this way.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scope::Scope;

/// `word` or `word|relevance`
static KEYWORD_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<word>[^|\s]+)(?:\|(?P<relevance>\d+))?$").unwrap());

/// Lexeme pattern used when a table does not set its own.
pub const DEFAULT_LEXEME: &str = r"\w+";

/// One keyword of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub word: String,
    pub scope: Scope,
    pub relevance: u32,
}

/// A keyword table partitioned by scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    base: Option<Arc<Keywords>>,
    entries: Vec<Keyword>,
    lexeme: String,
}

impl Keywords {
    pub fn new() -> Self {
        Keywords {
            base: None,
            entries: Vec::new(),
            lexeme: DEFAULT_LEXEME.to_string(),
        }
    }

    /// A table layered over `base`. The lexeme pattern is not inherited.
    pub fn extending(base: Arc<Keywords>) -> Self {
        Keywords {
            base: Some(base),
            ..Keywords::new()
        }
    }

    pub fn base(&self) -> Option<&Arc<Keywords>> {
        self.base.as_ref()
    }

    /// Add every word of a whitespace separated `WORD|N` list under `scope`.
    ///
    /// A word already present is replaced, so later partitions win.
    pub fn with(mut self, scope: Scope, words: &str) -> Self {
        for item in words.split_whitespace() {
            let keyword = parse_entry(item, scope);
            self.entries.retain(|k| k.word != keyword.word);
            self.entries.push(keyword);
        }
        self
    }

    /// Replace the lexeme pattern.
    pub fn lexeme(mut self, pattern: impl Into<String>) -> Self {
        self.lexeme = pattern.into();
        self
    }

    pub fn lexeme_pattern(&self) -> &str {
        &self.lexeme
    }

    /// Words declared on this table, without the base's.
    pub fn entries(&self) -> &[Keyword] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.base.as_ref().map_or(true, |b| b.is_empty())
    }

    /// Every effective keyword: the base's entries not redeclared here, then this
    /// table's own.
    pub fn resolved(&self) -> Vec<&Keyword> {
        let mut all: Vec<&Keyword> = match &self.base {
            Some(base) => base
                .resolved()
                .into_iter()
                .filter(|k| !self.entries.iter().any(|own| own.word == k.word))
                .collect(),
            None => Vec::new(),
        };
        all.extend(self.entries.iter());
        all
    }

    /// All effective words of one scope, base words first.
    pub fn words(&self, scope: Scope) -> impl Iterator<Item = &str> {
        self.resolved()
            .into_iter()
            .filter(move |k| k.scope == scope)
            .map(|k| k.word.as_str())
    }

    /// Find a keyword, folding case when asked to. Words on this table shadow the base.
    pub fn get(&self, word: &str, case_insensitive: bool) -> Option<&Keyword> {
        let own = self.entries.iter().find(|k| {
            if case_insensitive {
                k.word.eq_ignore_ascii_case(word)
            } else {
                k.word == word
            }
        });
        own.or_else(|| {
            self.base
                .as_ref()
                .and_then(|base| base.get(word, case_insensitive))
        })
    }

    /// Compile the table for one language.
    pub fn compile(&self, case_insensitive: bool) -> Result<KeywordMatcher, regex::Error> {
        let lexeme = Regex::new(&self.lexeme)?;
        let resolved = self.resolved();
        let mut words = HashMap::with_capacity(resolved.len());
        for keyword in resolved {
            let key = if case_insensitive {
                keyword.word.to_lowercase()
            } else {
                keyword.word.clone()
            };
            words.insert(key, (keyword.scope, keyword.relevance));
        }
        Ok(KeywordMatcher {
            lexeme,
            words,
            case_insensitive,
        })
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_entry(item: &str, scope: Scope) -> Keyword {
    match KEYWORD_ENTRY.captures(item) {
        Some(caps) => Keyword {
            word: caps["word"].to_string(),
            scope,
            relevance: caps
                .name("relevance")
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(1),
        },
        None => Keyword {
            word: item.to_string(),
            scope,
            relevance: 1,
        },
    }
}

/// A keyword hit inside a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordHit {
    pub range: Range<usize>,
    pub scope: Scope,
    pub relevance: u32,
}

/// A keyword table compiled for one language.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    lexeme: Regex,
    words: HashMap<String, (Scope, u32)>,
    case_insensitive: bool,
}

impl KeywordMatcher {
    /// Keyword hits in `text`, with ranges relative to `text`.
    pub fn hits(&self, text: &str) -> Vec<KeywordHit> {
        self.lexeme
            .find_iter(text)
            .filter_map(|m| {
                let found = if self.case_insensitive {
                    self.words.get(&m.as_str().to_lowercase())
                } else {
                    self.words.get(m.as_str())
                };
                found.map(|&(scope, relevance)| KeywordHit {
                    range: m.range(),
                    scope,
                    relevance,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_relevance_suffixes() {
        let table = Keywords::new().with(Scope::Keyword, "BASE|2 PREFIX|5 select");
        assert_eq!(table.get("BASE", false).unwrap().relevance, 2);
        assert_eq!(table.get("PREFIX", false).unwrap().relevance, 5);
        assert_eq!(table.get("select", false).unwrap().relevance, 1);
    }

    #[test]
    fn zero_relevance_is_kept() {
        let table = Keywords::new().with(Scope::BuiltIn, "a|0");
        let a = table.get("a", false).unwrap();
        assert_eq!(a.relevance, 0);
        assert_eq!(a.scope, Scope::BuiltIn);
    }

    #[test]
    fn later_partition_replaces_word() {
        let table = Keywords::new()
            .with(Scope::Keyword, "if")
            .with(Scope::Function, "if|0");
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.get("if", false).unwrap().scope, Scope::Function);
    }

    #[test]
    fn case_insensitive_hits() {
        let matcher = Keywords::new()
            .with(Scope::Keyword, "SELECT")
            .compile(true)
            .unwrap();
        let hits = matcher.hits("select SeLeCt SELECT selected");
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| h.scope == Scope::Keyword));
        assert_eq!(hits[1].range, 7..13);
    }

    #[test]
    fn case_sensitive_misses_other_case() {
        let matcher = Keywords::new()
            .with(Scope::Literal, "true")
            .compile(false)
            .unwrap();
        assert!(matcher.hits("TRUE").is_empty());
        assert_eq!(matcher.hits("true").len(), 1);
    }

    #[test]
    fn extending_table_falls_back_and_shadows() {
        let base = Arc::new(
            Keywords::new()
                .with(Scope::Keyword, "PREFIX|5 BASE|2")
                .with(Scope::Literal, "true false")
                .lexeme(r"@?\w+"),
        );
        let table = Keywords::extending(base.clone())
            .with(Scope::Keyword, "SELECT|2")
            .with(Scope::Literal, "true|0");

        assert!(Arc::ptr_eq(table.base().unwrap(), &base));
        assert_eq!(table.get("prefix", true).unwrap().relevance, 5);
        assert_eq!(table.get("true", false).unwrap().relevance, 0);
        assert_eq!(table.lexeme_pattern(), DEFAULT_LEXEME);
        assert_eq!(
            table.words(Scope::Keyword).collect::<Vec<_>>(),
            ["PREFIX", "BASE", "SELECT"]
        );

        let matcher = table.compile(true).unwrap();
        let hits = matcher.hits("prefix select true");
        let relevance: Vec<u32> = hits.iter().map(|h| h.relevance).collect();
        assert_eq!(relevance, [5, 2, 0]);
    }

    #[test]
    fn custom_lexeme_captures_sigils() {
        let matcher = Keywords::new()
            .with(Scope::Keyword, "@prefix|10")
            .lexeme(r"@?\w+")
            .compile(false)
            .unwrap();
        let hits = matcher.hits("@prefix ex:");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].range, 0..7);
        assert_eq!(hits[0].relevance, 10);
    }
}
