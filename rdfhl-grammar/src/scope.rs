//! Classification tags attached to matched text.
//!
//!     A scope is purely presentational. It carries no validation meaning: a span
//!     classified as `literal` is only claimed to look like one. The names follow the
//!     class names used by web highlighting themes, so [`Scope::class_name`] can be
//!     prefixed and dropped straight into markup.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scope {
    #[serde(rename = "keyword")]
    Keyword,
    #[serde(rename = "built_in")]
    BuiltIn,
    #[serde(rename = "literal")]
    Literal,
    #[serde(rename = "function")]
    Function,
    #[serde(rename = "type")]
    Type,
    #[serde(rename = "symbol")]
    Symbol,
    #[serde(rename = "template-variable")]
    TemplateVariable,
    #[serde(rename = "variable")]
    Variable,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "comment")]
    Comment,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "regexp")]
    Regexp,
    #[serde(rename = "escape")]
    Escape,
    #[serde(rename = "attr")]
    Attr,
    #[serde(rename = "punctuation")]
    Punctuation,
}

impl Scope {
    pub const ALL: [Scope; 17] = [
        Scope::Keyword,
        Scope::BuiltIn,
        Scope::Literal,
        Scope::Function,
        Scope::Type,
        Scope::Symbol,
        Scope::TemplateVariable,
        Scope::Variable,
        Scope::String,
        Scope::Number,
        Scope::Comment,
        Scope::Title,
        Scope::Name,
        Scope::Regexp,
        Scope::Escape,
        Scope::Attr,
        Scope::Punctuation,
    ];

    /// The bare class name, without any theme prefix.
    pub fn class_name(self) -> &'static str {
        match self {
            Scope::Keyword => "keyword",
            Scope::BuiltIn => "built_in",
            Scope::Literal => "literal",
            Scope::Function => "function",
            Scope::Type => "type",
            Scope::Symbol => "symbol",
            Scope::TemplateVariable => "template-variable",
            Scope::Variable => "variable",
            Scope::String => "string",
            Scope::Number => "number",
            Scope::Comment => "comment",
            Scope::Title => "title",
            Scope::Name => "name",
            Scope::Regexp => "regexp",
            Scope::Escape => "escape",
            Scope::Attr => "attr",
            Scope::Punctuation => "punctuation",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.class_name() == s)
            .ok_or_else(|| format!("unknown scope '{}'", s))
    }
}
