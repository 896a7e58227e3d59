//! Reference scanner
//!
//!     Evaluates a compiled grammar over a document. This is the smallest evaluator that
//!     gives every rule flag a meaning, enough to exercise the grammars end to end. It
//!     does not try to be fast.
//!
//! The loop
//!
//!     A stack of open rules ("frames"), the root at the bottom. At each step the
//!     candidates, in priority order, are:
//!
//!         1. the begin pattern of every nested rule of the top frame, in order;
//!         2. the end pattern of the top frame, then, while a frame ends with its
//!            parent, the end pattern of the frame below it.
//!
//!     The leftmost match wins and ties go to the earlier candidate. Text skipped on
//!     the way is split into keyword lexemes of the top frame.
//!
//!     A frame may be bounded: a single-token rule that re-scans its own lexeme
//!     (`return_begin` without an end) only looks at that lexeme, and everything it
//!     opens is bounded by it too. When nothing matches within the bound, the top frame
//!     closes at the bound. The root never closes.
//!
//! Progress
//!
//!     Every step either consumes text or pops a frame, except re-entering a
//!     `return_begin` rule at the same position. Re-entries are remembered per position
//!     and a rule is never re-entered twice at one position.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::compile::{CompiledLanguage, CompiledMode};
use crate::highlight::{Highlight, Node};
use crate::mode::{ModeId, RuleKind};

/// Lookup of languages a sub-language rule can hand text to.
pub trait SubLanguages {
    fn sub_language(&self, name: &str) -> Option<&CompiledLanguage>;
}

/// No embedded languages: sub-language regions stay plain text.
pub struct NoSubLanguages;

impl SubLanguages for NoSubLanguages {
    fn sub_language(&self, _name: &str) -> Option<&CompiledLanguage> {
        None
    }
}

/// Highlight `source` with `language`.
pub fn highlight(
    language: &CompiledLanguage,
    source: &str,
    embedded: &dyn SubLanguages,
) -> Highlight {
    let (root, relevance) = Scanner::new(language, embedded, source, 0..source.len()).run();
    Highlight {
        language: language.name().to_string(),
        relevance,
        source: source.to_string(),
        root,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Side {
    Begin,
    End,
}

#[derive(Debug)]
enum Candidate {
    Begin { rule: ModeId, range: Range<usize> },
    End { frame: usize, range: Range<usize> },
}

impl Candidate {
    fn start(&self) -> usize {
        match self {
            Candidate::Begin { range, .. } | Candidate::End { range, .. } => range.start,
        }
    }
}

struct Frame {
    id: ModeId,
    node: Node,
    /// Effective bound: the smaller of this frame's own bound and its parent's.
    limit: usize,
}

struct Scanner<'a> {
    language: &'a CompiledLanguage,
    embedded: &'a dyn SubLanguages,
    text: &'a str,
    stack: Vec<Frame>,
    pos: usize,
    relevance: u32,
    /// Last search result per (rule, side, bound). A hit stays valid while it lies
    /// ahead of the cursor, a miss stays valid for good.
    searches: HashMap<(ModeId, Side, usize), Option<Range<usize>>>,
    reentry_pos: usize,
    reentered: HashSet<ModeId>,
}

impl<'a> Scanner<'a> {
    fn new(
        language: &'a CompiledLanguage,
        embedded: &'a dyn SubLanguages,
        text: &'a str,
        span: Range<usize>,
    ) -> Self {
        let root = language.root();
        let mut node = Node::new(root.mode.scope, span.clone());
        node.language = Some(language.name().to_string());
        Scanner {
            language,
            embedded,
            text,
            stack: vec![Frame {
                id: root.id,
                node,
                limit: span.end,
            }],
            pos: span.start,
            relevance: 0,
            searches: HashMap::new(),
            reentry_pos: span.start,
            reentered: HashSet::new(),
        }
    }

    fn run(mut self) -> (Node, u32) {
        loop {
            let limit = self.top().limit;
            match self.next_candidate(limit) {
                None => {
                    self.text_until(limit);
                    if self.stack.len() == 1 {
                        break;
                    }
                    self.close_cascade(limit);
                }
                Some(Candidate::Begin { rule, range }) => {
                    self.text_until(range.start);
                    self.open(rule, range);
                }
                Some(Candidate::End { frame, range }) => {
                    self.text_until(range.start);
                    self.close(frame, range);
                }
            }
        }
        let root = match self.stack.pop() {
            Some(frame) => frame.node,
            None => Node::new(None, 0..0),
        };
        (root, self.relevance)
    }

    fn top(&self) -> &Frame {
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn rule(&self, id: ModeId) -> &'a CompiledMode {
        self.language.mode(id)
    }

    fn search(&mut self, id: ModeId, side: Side, limit: usize) -> Option<Range<usize>> {
        let key = (id, side, limit);
        match self.searches.get(&key) {
            Some(None) => return None,
            Some(Some(hit)) if hit.start >= self.pos => return Some(hit.clone()),
            _ => {}
        }
        let rule = self.rule(id);
        let haystack = &self.text[..limit];
        let found = match side {
            Side::Begin => rule.find_begin(haystack, self.pos),
            Side::End => rule.find_end(haystack, self.pos),
        };
        self.searches.insert(key, found.clone());
        found
    }

    fn next_candidate(&mut self, limit: usize) -> Option<Candidate> {
        let top = self.stack.len() - 1;
        let mut best: Option<Candidate> = None;

        let children = &self.rule(self.stack[top].id).mode.contains;
        for &child in children {
            let Some(range) = self.search(child, Side::Begin, limit) else {
                continue;
            };
            if range.is_empty() || self.would_stall(child, range.start) {
                continue;
            }
            if best.as_ref().map_or(true, |b| range.start < b.start()) {
                best = Some(Candidate::Begin { rule: child, range });
            }
        }

        let mut frame = top;
        while frame > 0 {
            let id = self.stack[frame].id;
            if let Some(range) = self.search(id, Side::End, limit) {
                if best.as_ref().map_or(true, |b| range.start < b.start()) {
                    best = Some(Candidate::End { frame, range });
                }
            }
            if !self.rule(id).mode.ends_with_parent {
                break;
            }
            frame -= 1;
        }
        best
    }

    fn would_stall(&self, id: ModeId, start: usize) -> bool {
        self.rule(id).mode.return_begin && start == self.reentry_pos && self.reentered.contains(&id)
    }

    fn note_reentry(&mut self, id: ModeId, start: usize) {
        if start != self.reentry_pos {
            self.reentry_pos = start;
            self.reentered.clear();
        }
        self.reentered.insert(id);
    }

    /// Plain text from the cursor up to `end`, split into keywords of the top frame.
    fn text_until(&mut self, end: usize) {
        if end > self.pos {
            let hits = self.keyword_nodes(self.top().id, self.pos..end);
            self.top_mut().node.children.extend(hits);
            self.pos = end;
        }
    }

    fn keyword_nodes(&mut self, id: ModeId, range: Range<usize>) -> Vec<Node> {
        let Some(matcher) = self.rule(id).keywords() else {
            return Vec::new();
        };
        let offset = range.start;
        matcher
            .hits(&self.text[range])
            .into_iter()
            .map(|hit| {
                self.relevance += hit.relevance;
                Node::leaf(hit.scope, hit.range.start + offset..hit.range.end + offset)
            })
            .collect()
    }

    fn open(&mut self, id: ModeId, range: Range<usize>) {
        let rule = self.rule(id);
        let mode = &rule.mode;
        self.relevance += mode.relevance;
        let parent_limit = self.top().limit;
        let mut node = Node::new(mode.scope, range.start..range.end);

        if mode.return_begin {
            self.note_reentry(id, range.start);
            let limit = match mode.kind() {
                RuleKind::Leaf | RuleKind::KeywordSet => range.end.min(parent_limit),
                RuleKind::Span => parent_limit,
            };
            self.pos = range.start;
            self.stack.push(Frame { id, node, limit });
        } else {
            if let Some(scope) = mode.begin_scope {
                node.children.push(Node::leaf(scope, range.clone()));
            } else {
                let hits = self.keyword_nodes(id, range.clone());
                node.children.extend(hits);
            }
            self.pos = range.end;
            if mode.kind() != RuleKind::Span {
                self.top_mut().node.children.push(node);
                if mode.ends_parent && self.stack.len() > 1 {
                    self.close_cascade(range.end);
                }
                return;
            }
            self.stack.push(Frame {
                id,
                node,
                limit: parent_limit,
            });
        }

        if let Some(name) = &mode.sub_language {
            self.embed(rule, name);
        }
    }

    /// Hand the interior of the top frame, up to its end match, to another language.
    fn embed(&mut self, rule: &CompiledMode, name: &str) {
        let limit = self.top().limit;
        let end = self
            .search(rule.id, Side::End, limit)
            .map_or(limit, |r| r.start);
        if end <= self.pos {
            return;
        }
        match self.embedded.sub_language(name) {
            Some(sub) => {
                let (mut inner, relevance) =
                    Scanner::new(sub, self.embedded, self.text, self.pos..end).run();
                inner.scope = None;
                inner.language = Some(sub.name().to_string());
                if rule.mode.relevance > 0 {
                    self.relevance += relevance;
                }
                self.top_mut().node.children.push(inner);
            }
            None => {
                tracing::debug!(
                    language = name,
                    "sub-language not registered, leaving region unhighlighted"
                );
            }
        }
        self.pos = end;
    }

    /// Close frame `frame` on an end match. Frames above it close where the match
    /// starts.
    fn close(&mut self, frame: usize, range: Range<usize>) {
        while self.stack.len() - 1 > frame {
            self.pop_frame(range.start);
        }
        let mode = &self.rule(self.top().id).mode;
        let end = if mode.return_end {
            range.start
        } else {
            if let Some(scope) = mode.end_scope {
                self.top_mut().node.children.push(Node::leaf(scope, range.clone()));
            }
            range.end
        };
        self.pos = self.pos.max(end);
        self.close_cascade(end);
    }

    /// Pop the top frame, then keep popping while the popped rule ends its parent.
    fn close_cascade(&mut self, end: usize) {
        loop {
            let ends_parent = self.rule(self.top().id).mode.ends_parent;
            self.pop_frame(end);
            if !ends_parent || self.stack.len() <= 1 {
                break;
            }
        }
    }

    fn pop_frame(&mut self, end: usize) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(mut frame) = self.stack.pop() {
            frame.node.range.end = end.max(frame.node.range.start);
            self.top_mut().node.children.push(frame.node);
        }
    }
}
