//! Fluent assertion API for highlights
//!
//!     Tests address text by content rather than by offset:
//!
//!         assert_highlight(&hl)
//!             .language("turtle")
//!             .relevance_at_least(10)
//!             .node("@prefix", Scope::Keyword)
//!             .span("%20").innermost(Scope::Escape).within(Scope::Literal);
//!
//!     `span` picks the first occurrence of its needle, `span_nth` a later one. Every
//!     failure message carries the source and the token runs, which is usually enough to
//!     see what the grammar did instead.

use std::ops::Range;

use crate::highlight::Highlight;
use crate::render::to_token_lines;
use crate::scope::Scope;

/// Create an assertion builder for a highlight
pub fn assert_highlight(highlight: &Highlight) -> HighlightAssertion<'_> {
    HighlightAssertion { highlight }
}

pub struct HighlightAssertion<'a> {
    highlight: &'a Highlight,
}

impl<'a> HighlightAssertion<'a> {
    fn context(&self) -> String {
        format!(
            "source {:?}\ntokens:\n{}",
            self.highlight.source,
            to_token_lines(self.highlight)
        )
    }

    pub fn language(self, expected: &str) -> Self {
        assert_eq!(
            self.highlight.language,
            expected,
            "Expected language '{}'\n{}",
            expected,
            self.context()
        );
        self
    }

    pub fn relevance(self, expected: u32) -> Self {
        assert_eq!(
            self.highlight.relevance,
            expected,
            "Expected relevance {}\n{}",
            expected,
            self.context()
        );
        self
    }

    pub fn relevance_at_least(self, min: u32) -> Self {
        assert!(
            self.highlight.relevance >= min,
            "Expected relevance of at least {}, got {}\n{}",
            min,
            self.highlight.relevance,
            self.context()
        );
        self
    }

    /// Assertions on the first occurrence of `needle`.
    pub fn span(&self, needle: &str) -> SpanAssertion<'a> {
        self.span_nth(needle, 0)
    }

    /// Assertions on occurrence `n` (zero based) of `needle`.
    pub fn span_nth(&self, needle: &str, n: usize) -> SpanAssertion<'a> {
        let start = self
            .highlight
            .source
            .match_indices(needle)
            .nth(n)
            .map(|(start, _)| start)
            .unwrap_or_else(|| {
                panic!(
                    "Expected occurrence {} of {:?} in the source\n{}",
                    n,
                    needle,
                    self.context()
                )
            });
        SpanAssertion {
            highlight: self.highlight,
            range: start..start + needle.len(),
            context: format!("span {:?} (occurrence {})\n{}", needle, n, self.context()),
        }
    }

    /// Shorthand for `span(needle).is_node(scope)`.
    pub fn node(self, needle: &str, scope: Scope) -> Self {
        self.span(needle).is_node(scope);
        self
    }

    /// Shorthand for `span(needle).unscoped()`.
    pub fn unscoped(self, needle: &str) -> Self {
        self.span(needle).unscoped();
        self
    }

    /// Nothing in the document is classified as `scope`.
    pub fn no_scope(self, scope: Scope) -> Self {
        let found = self.highlight.texts(scope);
        assert!(
            found.is_empty(),
            "Expected no {} nodes, found {:?}\n{}",
            scope,
            found,
            self.context()
        );
        self
    }
}

pub struct SpanAssertion<'a> {
    highlight: &'a Highlight,
    range: Range<usize>,
    context: String,
}

impl<'a> SpanAssertion<'a> {
    fn offsets(&self) -> Range<usize> {
        self.range.clone()
    }

    /// A node classified as `scope` covers exactly this span.
    pub fn is_node(self, scope: Scope) -> Self {
        let hit = self
            .highlight
            .root
            .descendants()
            .into_iter()
            .any(|n| n.scope == Some(scope) && n.range == self.range);
        assert!(hit, "{}: Expected a {} node", self.context, scope);
        self
    }

    /// Every byte of the span has `scope` as its innermost scope.
    pub fn innermost(self, scope: Scope) -> Self {
        for offset in self.offsets() {
            let scopes = self.highlight.scopes_at(offset);
            assert_eq!(
                scopes.last(),
                Some(&scope),
                "{}: Expected innermost {} at byte {}, scopes {:?}",
                self.context,
                scope,
                offset,
                scopes
            );
        }
        self
    }

    /// Every byte of the span lies inside a `scope` node.
    pub fn within(self, scope: Scope) -> Self {
        for offset in self.offsets() {
            let scopes = self.highlight.scopes_at(offset);
            assert!(
                scopes.contains(&scope),
                "{}: Expected byte {} inside {}, scopes {:?}",
                self.context,
                offset,
                scope,
                scopes
            );
        }
        self
    }

    /// No byte of the span lies inside a `scope` node.
    pub fn outside(self, scope: Scope) -> Self {
        for offset in self.offsets() {
            let scopes = self.highlight.scopes_at(offset);
            assert!(
                !scopes.contains(&scope),
                "{}: Expected byte {} outside {}, scopes {:?}",
                self.context,
                offset,
                scope,
                scopes
            );
        }
        self
    }

    /// No byte of the span is classified at all.
    pub fn unscoped(self) -> Self {
        for offset in self.offsets() {
            let scopes = self.highlight.scopes_at(offset);
            assert!(
                scopes.is_empty(),
                "{}: Expected plain text at byte {}, scopes {:?}",
                self.context,
                offset,
                scopes
            );
        }
        self
    }

    /// Every byte of the span was highlighted with `language`.
    pub fn language(self, language: &str) -> Self {
        for offset in self.offsets() {
            assert_eq!(
                self.highlight.language_at(offset),
                language,
                "{}: Expected language at byte {}",
                self.context,
                offset
            );
        }
        self
    }
}
