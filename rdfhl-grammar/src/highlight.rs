//! Highlighting output
//!
//!     The scanner produces a tree of [`Node`]s over byte ranges of the source. A node
//!     stands for one opened rule or one keyword hit; text inside a node that none of
//!     its children cover is plain text of that node. Nothing in the tree holds text,
//!     so the tree is cheap to keep next to the source it describes.
//!
//!     Most consumers want a flat view instead, see [`Highlight::tokens`]: maximal runs
//!     of text sharing the same stack of scopes.

use std::ops::Range;

use serde::Serialize;

use crate::scope::Scope;

/// One node of the highlight tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    /// Set on the node that hands its interior to another language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub range: Range<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(scope: Option<Scope>, range: Range<usize>) -> Self {
        Node {
            scope,
            language: None,
            range,
            children: Vec::new(),
        }
    }

    /// A node without children.
    pub fn leaf(scope: Scope, range: Range<usize>) -> Self {
        Node::new(Some(scope), range)
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.range.clone()]
    }

    /// This node and every descendant, depth first.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            out.push(node);
            pending.extend(node.children.iter().rev());
        }
        out
    }
}

/// A run of text with the scopes enclosing it, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub range: Range<usize>,
    pub scopes: Vec<Scope>,
    /// Language the run was highlighted with. Differs from the document language
    /// inside embedded regions.
    pub language: String,
}

impl Token {
    /// The innermost scope, if any.
    pub fn scope(&self) -> Option<Scope> {
        self.scopes.last().copied()
    }
}

/// Result of highlighting one document with one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub language: String,
    pub relevance: u32,
    #[serde(skip)]
    pub source: String,
    pub root: Node,
}

impl Highlight {
    /// Flatten the tree into runs. Runs cover the source without gaps.
    pub fn tokens(&self) -> Vec<Token> {
        let mut out = Vec::new();
        let mut scopes = Vec::new();
        self.flatten(&self.root, &mut scopes, &self.language, &mut out);
        out
    }

    fn flatten(&self, node: &Node, scopes: &mut Vec<Scope>, language: &str, out: &mut Vec<Token>) {
        let language = node.language.as_deref().unwrap_or(language);
        if let Some(scope) = node.scope {
            scopes.push(scope);
        }
        let mut cursor = node.range.start;
        for child in &node.children {
            self.push_run(cursor..child.range.start, scopes, language, out);
            self.flatten(child, scopes, language, out);
            cursor = child.range.end;
        }
        self.push_run(cursor..node.range.end, scopes, language, out);
        if node.scope.is_some() {
            scopes.pop();
        }
    }

    fn push_run(&self, range: Range<usize>, scopes: &[Scope], language: &str, out: &mut Vec<Token>) {
        if range.is_empty() {
            return;
        }
        if let Some(last) = out.last_mut() {
            if last.range.end == range.start && last.scopes == scopes && last.language == language {
                last.range.end = range.end;
                last.text.push_str(&self.source[range]);
                return;
            }
        }
        out.push(Token {
            text: self.source[range.clone()].to_string(),
            range,
            scopes: scopes.to_vec(),
            language: language.to_string(),
        });
    }

    /// Scopes enclosing the byte at `offset`, outermost first.
    pub fn scopes_at(&self, offset: usize) -> Vec<Scope> {
        let mut scopes = Vec::new();
        let mut node = &self.root;
        loop {
            if let Some(scope) = node.scope {
                scopes.push(scope);
            }
            match node.children.iter().find(|c| c.range.contains(&offset)) {
                Some(child) => node = child,
                None => return scopes,
            }
        }
    }

    /// Language in effect at `offset`.
    pub fn language_at(&self, offset: usize) -> &str {
        let mut language = self.language.as_str();
        let mut node = &self.root;
        while let Some(child) = node.children.iter().find(|c| c.range.contains(&offset)) {
            if let Some(name) = &child.language {
                language = name;
            }
            node = child;
        }
        language
    }

    /// Text of every node classified as `scope`, in document order.
    pub fn texts(&self, scope: Scope) -> Vec<&str> {
        self.root
            .descendants()
            .into_iter()
            .filter(|n| n.scope == Some(scope))
            .map(|n| n.text(&self.source))
            .collect()
    }

    /// The source with scopes rendered inline as `[scope:text]`, for test snapshots.
    pub fn to_debug_string(&self) -> String {
        let mut out = String::new();
        self.debug_node(&self.root, &mut out);
        out
    }

    fn debug_node(&self, node: &Node, out: &mut String) {
        let open = match (&node.language, node.scope) {
            (Some(language), _) => Some(format!("[{}>", language)),
            (None, Some(scope)) => Some(format!("[{}:", scope)),
            (None, None) => None,
        };
        if let Some(open) = &open {
            out.push_str(open);
        }
        let mut cursor = node.range.start;
        for child in &node.children {
            out.push_str(&self.source[cursor..child.range.start]);
            self.debug_node(child, out);
            cursor = child.range.end;
        }
        out.push_str(&self.source[cursor..node.range.end]);
        if open.is_some() {
            out.push(']');
        }
    }
}
