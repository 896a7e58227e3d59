//! Grammar rules ("modes") and the arena that owns them
//!
//!     A grammar is a tree of rules, each one a begin condition, an optional end
//!     condition, an ordered list of nested rules and a classification tag. Rules are
//!     data: nothing in this module matches text, see [`crate::scan`] for that.
//!
//! Identity
//!
//!     Every rule lives in a [`ModeArena`] and is addressed by its [`ModeId`]. Two
//!     grammars sharing a rule share the id, so a rule exported by Turtle and reused
//!     by SPARQL is the same object, not a structural copy.
//!
//! Cycles
//!
//!     Nested rules are ids, which makes cyclic grammars possible without shared
//!     mutable ownership: allocate every member of the cycle, then close the cycle with
//!     [`ModeArena::set_contains`]. ShExC is the only grammar that does this.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::keywords::Keywords;
use crate::scope::Scope;
use crate::standard::StandardModes;

/// Stable handle of a rule inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModeId(usize);

impl ModeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Start condition of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Begin {
    /// A regular expression source.
    Pattern(String),
    /// Any of these words, matched on word boundaries.
    Keywords(Vec<String>),
}

impl Begin {
    /// The regular expression source this condition matches with.
    pub fn pattern(&self) -> String {
        match self {
            Begin::Pattern(pattern) => pattern.clone(),
            Begin::Keywords(words) => {
                let alternatives: Vec<String> = words
                    .iter()
                    .map(|word| {
                        let mut alt = String::new();
                        if word.starts_with(is_word_char) {
                            alt.push_str(r"\b");
                        }
                        alt.push_str(&regex::escape(word));
                        if word.ends_with(is_word_char) {
                            alt.push_str(r"\b");
                        }
                        alt
                    })
                    .collect();
                format!("(?:{})", alternatives.join("|"))
            }
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// End condition of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum End {
    /// No end condition: the rule spans its begin lexeme only.
    #[default]
    Token,
    /// Closes at the first match of this regular expression source.
    Pattern(String),
    /// Never matches. The rule runs until the input ends or an enclosing rule
    /// closes it.
    EndOfInput,
}

/// Shape of a rule, derived from its conditions. The scanner dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// A single token opened by one of a set of keywords.
    KeywordSet,
    /// Runs from its begin match until its end condition, with nested rules inside.
    Span,
    /// A single token matched by a pattern.
    Leaf,
}

/// One grammar rule.
#[derive(Debug, Clone)]
pub struct Mode {
    /// Debug label, e.g. `turtle.iri_literal`.
    pub label: Option<&'static str>,
    pub begin: Option<Begin>,
    pub end: End,
    pub scope: Option<Scope>,
    /// Classification of the begin lexeme, when it differs from the rule's.
    pub begin_scope: Option<Scope>,
    /// Classification of the end lexeme, when it differs from the rule's.
    pub end_scope: Option<Scope>,
    pub relevance: u32,
    pub keywords: Option<Arc<Keywords>>,
    pub contains: Vec<ModeId>,
    /// The begin lexeme is not consumed: nested rules scan it again.
    pub return_begin: bool,
    /// The end lexeme is not consumed: the enclosing rule scans it again.
    pub return_end: bool,
    /// Closing this rule closes its enclosing rule as well.
    pub ends_parent: bool,
    /// The end conditions of the enclosing rule close this rule too.
    pub ends_with_parent: bool,
    /// Interior is handed to another registered language.
    pub sub_language: Option<String>,
}

impl Mode {
    fn blank() -> Self {
        Mode {
            label: None,
            begin: None,
            end: End::Token,
            scope: None,
            begin_scope: None,
            end_scope: None,
            relevance: 1,
            keywords: None,
            contains: Vec::new(),
            return_begin: false,
            return_end: false,
            ends_parent: false,
            ends_with_parent: false,
            sub_language: None,
        }
    }

    /// The top-level rule of a language: no begin, runs to end of input.
    pub fn root() -> Self {
        Mode {
            end: End::EndOfInput,
            ..Mode::blank()
        }
    }

    /// A single-token rule.
    pub fn leaf(begin: impl Into<String>) -> Self {
        Mode {
            begin: Some(Begin::Pattern(begin.into())),
            ..Mode::blank()
        }
    }

    /// A delimited rule.
    pub fn span(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Mode {
            begin: Some(Begin::Pattern(begin.into())),
            end: End::Pattern(end.into()),
            ..Mode::blank()
        }
    }

    /// A rule opening on one of `words`. The words also become the rule's
    /// keywords, classified as [`Scope::Keyword`].
    pub fn begin_keywords(words: &str) -> Self {
        Mode {
            begin: Some(Begin::Keywords(
                words.split_whitespace().map(str::to_string).collect(),
            )),
            keywords: Some(Arc::new(Keywords::new().with(Scope::Keyword, words))),
            ..Mode::blank()
        }
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn end(mut self, end: End) -> Self {
        self.end = end;
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn begin_scope(mut self, scope: Scope) -> Self {
        self.begin_scope = Some(scope);
        self
    }

    pub fn end_scope(mut self, scope: Scope) -> Self {
        self.end_scope = Some(scope);
        self
    }

    pub fn relevance(mut self, relevance: u32) -> Self {
        self.relevance = relevance;
        self
    }

    pub fn keywords(mut self, keywords: Arc<Keywords>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    pub fn contains(mut self, contains: Vec<ModeId>) -> Self {
        self.contains = contains;
        self
    }

    pub fn return_begin(mut self) -> Self {
        self.return_begin = true;
        self
    }

    pub fn return_end(mut self) -> Self {
        self.return_end = true;
        self
    }

    pub fn ends_parent(mut self) -> Self {
        self.ends_parent = true;
        self
    }

    pub fn ends_with_parent(mut self) -> Self {
        self.ends_with_parent = true;
        self
    }

    pub fn sub_language(mut self, language: impl Into<String>) -> Self {
        self.sub_language = Some(language.into());
        self
    }

    pub fn kind(&self) -> RuleKind {
        match (&self.begin, &self.end) {
            (_, End::Pattern(_) | End::EndOfInput) => RuleKind::Span,
            (Some(Begin::Keywords(_)), End::Token) => RuleKind::KeywordSet,
            (_, End::Token) => RuleKind::Leaf,
        }
    }
}

/// Owner of every rule of every grammar built against it.
#[derive(Debug, Clone)]
pub struct ModeArena {
    modes: Vec<Mode>,
    standard: StandardModes,
}

impl ModeArena {
    /// An arena seeded with the standard rules.
    pub fn new() -> Self {
        let mut modes = Vec::new();
        let standard = StandardModes::build(&mut |mode| {
            modes.push(mode);
            ModeId(modes.len() - 1)
        });
        ModeArena { modes, standard }
    }

    /// Shared comment, string and number rules.
    pub fn standard(&self) -> &StandardModes {
        &self.standard
    }

    pub fn alloc(&mut self, mode: Mode) -> ModeId {
        self.modes.push(mode);
        ModeId(self.modes.len() - 1)
    }

    /// Copy a rule into a new identity, modified by `edit`.
    pub fn variant(&mut self, id: ModeId, edit: impl FnOnce(Mode) -> Mode) -> ModeId {
        let copy = edit(self.get(id).clone());
        self.alloc(copy)
    }

    /// Panics when `id` was not allocated by this arena.
    pub fn get(&self, id: ModeId) -> &Mode {
        &self.modes[id.0]
    }

    pub fn try_get(&self, id: ModeId) -> Option<&Mode> {
        self.modes.get(id.0)
    }

    /// Replace the nested rules of an existing rule. This is how cycles close.
    pub fn set_contains(&mut self, id: ModeId, contains: Vec<ModeId>) {
        self.modes[id.0].contains = contains;
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Every rule reachable from `root`, in discovery order. Cycles are visited once.
    pub fn reachable(&self, root: ModeId) -> Vec<ModeId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            if let Some(mode) = self.try_get(id) {
                pending.extend(mode.contains.iter().rev().copied());
            }
        }
        order
    }

    /// Whether `target` can be reached from `root`.
    pub fn reaches(&self, root: ModeId, target: ModeId) -> bool {
        self.reachable(root).contains(&target)
    }
}

impl Default for ModeArena {
    fn default() -> Self {
        Self::new()
    }
}
