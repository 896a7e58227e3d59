//! ShExC (Shape Expressions compact syntax) grammar
//!
//!     Largely transcribed from the ShExC grammar. Terminals are rebuilt here rather
//!     than borrowed from Turtle: ShExC restricts names to ASCII, so the character
//!     classes differ.
//!
//! Recursion
//!
//!     Three productions refer to each other:
//!
//!         shape  ->  tripleExpression  ->  shapeExpression content  ->  shape
//!
//!     `shape` is allocated with no nested rules, the other two are built around it,
//!     and `shape`'s nested rules are assigned last. This is the only rule in any
//!     grammar that is modified after allocation.
//!
//! Relevance
//!
//!     Anything that opens on a bare IRI or prefixed name weighs 0: documents that merely
//!     mention URLs are not ShExC. Sigil forms (`@<shape>`, `$<label>`, `&<label>`) and
//!     the directives are the strong signals. A `{ ... }` shape weighs a little: it is
//!     what tells a schema without sigils apart from Turtle sharing its prefixes.
//!
//! Limitations
//!
//!     Classes are assigned by rule, not by position, so the predicate and the datatype
//!     of a triple constraint get the same class.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::GrammarError;
use crate::keywords::Keywords;
use crate::language::Language;
use crate::mode::{End, Mode, ModeArena, ModeId};
use crate::scope::Scope;

pub const NAME: &str = "shexc";

const SHAPE_EXPRESSION_KEYWORDS: &str = "and or not closed abstract extends restricts \
    iri bnode literal nonliteral length minlength maxlength \
    mininclusive minexclusive maxinclusive maxexclusive";

const HEX: &str = "[0-9a-fA-F]";

fn uchar() -> String {
    format!(r"\\(?:u{hex}{{4}}|U{hex}{{8}})", hex = HEX)
}

fn iriref() -> String {
    format!(r#"<(?:[^<>"{{}}|^`\\]|{})*>"#, uchar())
}

fn percent() -> String {
    format!("%{hex}{hex}", hex = HEX)
}

fn pn_local_esc() -> String {
    r"\\[_~.!$&'()*+,;=/?#@%-]".to_string()
}

fn plx() -> String {
    format!("(?:{}|{})", percent(), pn_local_esc())
}

fn pname_ns() -> String {
    "(?:[a-zA-Z](?:[a-zA-Z_0-9.-]*[a-zA-Z_0-9-])?)?:".to_string()
}

fn pn_local() -> String {
    format!(
        "(?:[a-zA-Z_:0-9]|{plx})(?:(?:[a-zA-Z_0-9:.-]|{plx})*(?:[a-zA-Z_0-9:-]|{plx}))?",
        plx = plx()
    )
}

fn prefixed_name() -> String {
    format!("(?:{ns}{local}|{ns})", ns = pname_ns(), local = pn_local())
}

/// An IRI in any form: prefixed name or `<...>`.
pub fn iris_pattern() -> String {
    format!("(?:{}|{})", prefixed_name(), iriref())
}

/// Named productions a grammar can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Production {
    Iriref,
    PrefixedName,
    Prefix,
    Base,
    Import,
    Shape,
    ShapeExpression,
    TripleExpression,
    TripleExprLabel,
    Inclusion,
    #[default]
    ShexDoc,
}

impl Production {
    pub const ALL: [Production; 11] = [
        Production::Iriref,
        Production::PrefixedName,
        Production::Prefix,
        Production::Base,
        Production::Import,
        Production::Shape,
        Production::ShapeExpression,
        Production::TripleExpression,
        Production::TripleExprLabel,
        Production::Inclusion,
        Production::ShexDoc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Production::Iriref => "IRIREF",
            Production::PrefixedName => "prefixedName",
            Production::Prefix => "prefix",
            Production::Base => "base",
            Production::Import => "import",
            Production::Shape => "shape",
            Production::ShapeExpression => "shapeExpression",
            Production::TripleExpression => "tripleExpression",
            Production::TripleExprLabel => "tripleExprLabel",
            Production::Inclusion => "inclusion",
            Production::ShexDoc => "shexDoc",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Production::ALL.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Production {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Production::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| GrammarError::UnknownProduction {
                name: s.to_string(),
                known: Production::names(),
            })
    }
}

/// Construction options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShexcOptions {
    /// Production the grammar starts from; `shexDoc` when absent or blank.
    pub starting_production: Option<String>,
}

impl ShexcOptions {
    pub fn starting_at(production: impl Into<String>) -> Self {
        ShexcOptions {
            starting_production: Some(production.into()),
        }
    }

    pub fn production(&self) -> Result<Production, GrammarError> {
        match &self.starting_production {
            Some(name) if !name.trim().is_empty() => name.parse(),
            _ => Ok(Production::default()),
        }
    }
}

/// Rule ids of every production.
#[derive(Debug, Clone, Copy)]
pub struct ShexcProductions {
    pub iriref: ModeId,
    pub prefixed_name: ModeId,
    pub prefix: ModeId,
    pub base: ModeId,
    pub import: ModeId,
    pub shape: ModeId,
    pub shape_expression: ModeId,
    pub triple_expression: ModeId,
    pub triple_expr_label: ModeId,
    pub inclusion: ModeId,
    pub shex_doc: ModeId,
}

impl ShexcProductions {
    pub fn get(&self, production: Production) -> ModeId {
        match production {
            Production::Iriref => self.iriref,
            Production::PrefixedName => self.prefixed_name,
            Production::Prefix => self.prefix,
            Production::Base => self.base,
            Production::Import => self.import,
            Production::Shape => self.shape,
            Production::ShapeExpression => self.shape_expression,
            Production::TripleExpression => self.triple_expression,
            Production::TripleExprLabel => self.triple_expr_label,
            Production::Inclusion => self.inclusion,
            Production::ShexDoc => self.shex_doc,
        }
    }
}

/// Allocate every production.
pub fn productions(arena: &mut ModeArena) -> ShexcProductions {
    let common = *arena.standard();
    let iris = iris_pattern();

    let percent = arena.alloc(
        Mode::leaf(percent())
            .label("shexc.percent")
            .scope(Scope::Escape)
            .relevance(0),
    );
    let uchar = arena.alloc(
        Mode::leaf(uchar())
            .label("shexc.uchar")
            .scope(Scope::Escape)
            .relevance(0),
    );
    let local_esc = arena.alloc(
        Mode::leaf(pn_local_esc())
            .label("shexc.pn_local_esc")
            .scope(Scope::Escape)
            .relevance(0),
    );

    let iriref = arena.alloc(
        Mode::span("<", ">")
            .label("shexc.IRIREF")
            .scope(Scope::Symbol)
            .relevance(0)
            .contains(vec![percent, uchar]),
    );
    let namespace = arena.alloc(
        Mode::leaf(pname_ns())
            .label("shexc.pname_ns")
            .scope(Scope::Type)
            .relevance(0),
    );
    let local = arena.alloc(
        Mode::leaf(pn_local())
            .label("shexc.pn_local")
            .scope(Scope::Variable)
            .relevance(0)
            .return_begin()
            .contains(vec![percent, local_esc]),
    );
    let prefixed_name = arena.alloc(
        Mode::leaf(prefixed_name())
            .label("shexc.prefixedName")
            .relevance(0)
            .return_begin()
            .contains(vec![namespace, local]),
    );

    // Directives run to end of input; the IRI closes them.
    let closing_iriref = arena.variant(iriref, |m| m.label("shexc.IRIREF.closing").ends_parent());
    let directive = |arena: &mut ModeArena, word: &str, label, contains| {
        arena.alloc(
            Mode::begin_keywords(word)
                .label(label)
                .end(End::EndOfInput)
                .return_begin()
                .relevance(5)
                .contains(contains),
        )
    };
    let prefix = directive(arena, "prefix", "shexc.prefix", vec![namespace, closing_iriref]);
    let base = directive(arena, "base", "shexc.base", vec![closing_iriref]);
    let import = directive(arena, "import", "shexc.import", vec![closing_iriref]);

    let shape = arena.alloc(
        Mode::span(r"\{", r"\}")
            .label("shexc.shape")
            .relevance(2),
    );

    let shape_label = arena.alloc(
        Mode::leaf(iris.clone())
            .label("shexc.shapeExprLabel")
            .scope(Scope::Title)
            .relevance(0)
            .return_begin()
            .contains(vec![percent, uchar]),
    );
    let sigil = |arena: &mut ModeArena, sigil: &str, label| {
        arena.alloc(
            Mode::leaf(format!("{}{}", sigil, iris))
                .label(label)
                .scope(Scope::Name)
                .relevance(10)
                .return_begin()
                .contains(vec![percent, uchar]),
        )
    };
    let shape_ref = sigil(arena, "@", "shexc.shapeRef");
    let triple_expr_label = sigil(arena, r"\$", "shexc.tripleExprLabel");
    let inclusion = sigil(arena, "&", "shexc.inclusion");

    let extra_closed = arena.alloc(
        Mode::begin_keywords("extra closed")
            .label("shexc.extraPropertySet")
            .end(End::Pattern(r"\{".to_string()))
            .return_end()
            .relevance(10)
            .contains(vec![iriref, prefixed_name]),
    );
    let content_model = vec![
        common.hash_comment,
        common.c_block_comment,
        shape_label,
        shape_ref,
        extra_closed,
        common.regexp,
        shape,
    ];
    let keywords = Arc::new(Keywords::new().with(Scope::Keyword, SHAPE_EXPRESSION_KEYWORDS));

    let shape_expression = arena.alloc(
        Mode::leaf(iris.clone())
            .label("shexc.shapeExpression")
            .end(End::EndOfInput)
            .return_begin()
            .keywords(keywords.clone())
            .relevance(0)
            .contains(content_model.clone()),
    );
    let mut triple_content = vec![triple_expr_label, inclusion, iriref, prefixed_name];
    triple_content.extend(content_model);
    let triple_expression = arena.alloc(
        Mode::leaf(iris)
            .label("shexc.tripleExpression")
            .end(End::EndOfInput)
            .return_begin()
            .ends_with_parent()
            .keywords(keywords)
            .relevance(0)
            .contains(triple_content),
    );

    let shex_doc = arena.alloc(
        Mode::root()
            .label("shexc.shexDoc")
            .relevance(10)
            .contains(vec![
                common.hash_comment,
                common.c_block_comment,
                prefix,
                base,
                import,
                shape_expression,
            ]),
    );

    arena.set_contains(shape, vec![triple_expr_label, inclusion, triple_expression]);

    ShexcProductions {
        iriref,
        prefixed_name,
        prefix,
        base,
        import,
        shape,
        shape_expression,
        triple_expression,
        triple_expr_label,
        inclusion,
        shex_doc,
    }
}

pub fn define(arena: &mut ModeArena, options: &ShexcOptions) -> Result<Language, GrammarError> {
    Ok(define_at(arena, options.production()?))
}

/// Build the grammar rooted at an already validated production.
pub fn define_at(arena: &mut ModeArena, start: Production) -> Language {
    let productions = productions(arena);
    Language::new(NAME, "ShExC", productions.get(start))
        .case_insensitive(start == Production::ShexDoc)
}
