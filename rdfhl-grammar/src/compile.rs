//! Compiling a grammar for scanning
//!
//!     Rule patterns are regular-expression sources until a language is compiled. Every
//!     rule reachable from the language root is compiled once, with the language's
//!     flags: always multi-line (`$` is an end of line), and case-insensitive when the
//!     language says so. The rule data itself is copied alongside the compiled patterns
//!     so a compiled language does not borrow the arena.
//!
//!     Rule patterns go through `fancy_regex` since several of them look ahead (JSON
//!     keys, JSON-shaped strings). Keyword lexemes use plain `regex`.

use std::collections::HashMap;
use std::ops::Range;

use fancy_regex::Regex;

use crate::error::GrammarError;
use crate::keywords::KeywordMatcher;
use crate::language::Language;
use crate::mode::{End, Mode, ModeArena, ModeId};

/// One rule with its patterns compiled.
#[derive(Debug, Clone)]
pub struct CompiledMode {
    pub id: ModeId,
    pub mode: Mode,
    begin: Option<Regex>,
    end: Option<Regex>,
    keywords: Option<KeywordMatcher>,
}

impl CompiledMode {
    /// First begin match at or after `pos`.
    pub fn find_begin(&self, haystack: &str, pos: usize) -> Option<Range<usize>> {
        self.begin.as_ref().and_then(|re| find(re, haystack, pos))
    }

    /// First end match at or after `pos`. Always `None` for rules without an end
    /// pattern.
    pub fn find_end(&self, haystack: &str, pos: usize) -> Option<Range<usize>> {
        self.end.as_ref().and_then(|re| find(re, haystack, pos))
    }

    pub fn keywords(&self) -> Option<&KeywordMatcher> {
        self.keywords.as_ref()
    }
}

fn find(re: &Regex, haystack: &str, pos: usize) -> Option<Range<usize>> {
    match re.find_from_pos(haystack, pos) {
        Ok(found) => found.map(|m| m.start()..m.end()),
        Err(err) => {
            tracing::warn!(pattern = re.as_str(), error = %err, "pattern failed to run, treating as no match");
            None
        }
    }
}

/// A language ready to scan.
#[derive(Debug, Clone)]
pub struct CompiledLanguage {
    language: Language,
    modes: HashMap<ModeId, CompiledMode>,
}

impl CompiledLanguage {
    pub fn compile(arena: &ModeArena, language: &Language) -> Result<Self, GrammarError> {
        let flags = if language.case_insensitive {
            "(?mi)"
        } else {
            "(?m)"
        };
        let mut modes = HashMap::new();
        for id in arena.reachable(language.root) {
            let mode = arena.try_get(id).ok_or(GrammarError::UnknownRule(id))?;
            let begin = match &mode.begin {
                Some(begin) => Some(compile_pattern(id, flags, &begin.pattern())?),
                None => None,
            };
            let end = match &mode.end {
                End::Pattern(pattern) => Some(compile_pattern(id, flags, pattern)?),
                End::Token | End::EndOfInput => None,
            };
            let keywords = match &mode.keywords {
                Some(table) => Some(
                    table
                        .compile(language.case_insensitive)
                        .map_err(|e| GrammarError::pattern(id, table.lexeme_pattern(), e))?,
                ),
                None => None,
            };
            modes.insert(
                id,
                CompiledMode {
                    id,
                    mode: mode.clone(),
                    begin,
                    end,
                    keywords,
                },
            );
        }
        tracing::debug!(language = %language.name, rules = modes.len(), "compiled grammar");
        Ok(CompiledLanguage {
            language: language.clone(),
            modes,
        })
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn name(&self) -> &str {
        &self.language.name
    }

    pub fn root(&self) -> &CompiledMode {
        self.mode(self.language.root)
    }

    /// Every id reachable from the root was compiled, so a miss is a bug.
    pub fn mode(&self, id: ModeId) -> &CompiledMode {
        &self.modes[&id]
    }

    pub fn rule_count(&self) -> usize {
        self.modes.len()
    }
}

fn compile_pattern(id: ModeId, flags: &str, pattern: &str) -> Result<Regex, GrammarError> {
    Regex::new(&format!("{}{}", flags, pattern)).map_err(|e| GrammarError::pattern(id, pattern, e))
}
