//! Rendering highlights
//!
//! Three output forms:
//!
//! - `html`: nested `<span class="...">` markup, class names prefixed the way web
//!   highlighting themes expect (`hljs-keyword`). Embedded regions are wrapped in a
//!   `language-<name>` span.
//! - `json`: the highlight tree through serde.
//! - `tokens`: one line per run, scopes then the quoted text. Meant for eyeballing
//!   and test snapshots.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::highlight::{Highlight, Node};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
    Tokens,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Html, OutputFormat::Json, OutputFormat::Tokens];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Tokens => "tokens",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown output format '{}' (expected html, json or tokens)", s))
    }
}

/// Render in the given format.
pub fn render(highlight: &Highlight, format: OutputFormat, class_prefix: &str) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Html => Ok(to_html(highlight, class_prefix)),
        OutputFormat::Json => to_json(highlight),
        OutputFormat::Tokens => Ok(to_token_lines(highlight)),
    }
}

/// HTML markup for the whole source.
pub fn to_html(highlight: &Highlight, class_prefix: &str) -> String {
    let mut out = String::with_capacity(highlight.source.len() * 2);
    // The root carries the document language; only embedded regions get a wrapper.
    html_children(&highlight.root, &highlight.source, class_prefix, &mut out);
    out
}

fn html_node(node: &Node, source: &str, prefix: &str, out: &mut String) {
    let class = match (&node.language, node.scope) {
        (Some(language), _) => Some(format!("language-{}", language)),
        (None, Some(scope)) => Some(format!("{}{}", prefix, scope.class_name())),
        (None, None) => None,
    };
    if let Some(class) = &class {
        out.push_str(&format!("<span class=\"{}\">", escape_html(class)));
    }
    html_children(node, source, prefix, out);
    if class.is_some() {
        out.push_str("</span>");
    }
}

fn html_children(node: &Node, source: &str, prefix: &str, out: &mut String) {
    let mut cursor = node.range.start;
    for child in &node.children {
        out.push_str(&escape_html(&source[cursor..child.range.start]));
        html_node(child, source, prefix, out);
        cursor = child.range.end;
    }
    out.push_str(&escape_html(&source[cursor..node.range.end]));
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&#x27;")
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    language: &'a str,
    relevance: u32,
    tokens: Vec<crate::highlight::Token>,
    tree: &'a Node,
}

/// Pretty-printed JSON with the token runs and the tree.
pub fn to_json(highlight: &Highlight) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput {
        language: &highlight.language,
        relevance: highlight.relevance,
        tokens: highlight.tokens(),
        tree: &highlight.root,
    })
}

/// One line per run: `scope.scope  "text"`, `-` for unscoped runs.
pub fn to_token_lines(highlight: &Highlight) -> String {
    let mut out = String::new();
    for token in highlight.tokens() {
        let mut scopes: Vec<String> = token.scopes.iter().map(|s| s.to_string()).collect();
        if token.language != highlight.language {
            scopes.insert(0, format!("{}>", token.language));
        }
        let label = if scopes.is_empty() {
            "-".to_string()
        } else {
            scopes.join(".")
        };
        out.push_str(&format!("{:<24} {:?}\n", label, token.text));
    }
    out
}
