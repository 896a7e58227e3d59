//! Turtle grammar
//!
//!     Rules, in scan order:
//!
//!         directive       @prefix / @base                         keyword
//!         langtag         @en, @en-GB                             type
//!         datatype        ^^xsd:int, ^^<http://...>               type
//!         iri_literal     <http://...>                            literal
//!         blank_node      _:b0                                    template-variable
//!         pname           ex:thing, ex:                           symbol
//!         triple strings  '''...''', """..."""                    string
//!         strings         '...', "..."                            string
//!         number          42, -1.5e3                              number
//!         comment         # ...                                   comment
//!
//!     Order matters twice. The directive must come before the language tag, which would
//!     otherwise read `@prefix` as a tag. The triple-quoted strings must come before the
//!     single-quoted ones, which would otherwise read `"""` as an empty string followed
//!     by an opening quote.
//!
//!     Relevance: `@prefix`/`@base` weigh 10, blank node labels and datatypes 10.
//!     Quoted strings are reset to 0 since quoting says nothing about the language, and
//!     `a` is a built-in worth 0 because it is also an English word.

use std::sync::Arc;

use crate::keywords::Keywords;
use crate::language::Language;
use crate::mode::{Mode, ModeArena, ModeId};
use crate::scope::Scope;
use crate::terminals;

pub const NAME: &str = "turtle";
pub const ALIASES: [&str; 2] = ["ttl", "n3"];

/// Rules Turtle hands to grammars built on top of it.
#[derive(Debug, Clone)]
pub struct TurtleExports {
    pub langtag: ModeId,
    pub datatype: ModeId,
    pub iri_literal: ModeId,
    pub blank_node: ModeId,
    pub pname: ModeId,
    pub triple_apos_string: ModeId,
    pub triple_quote_string: ModeId,
    pub apos_string_literal: ModeId,
    pub quote_string_literal: ModeId,
    pub number: ModeId,
    pub keywords: Arc<Keywords>,
}

impl TurtleExports {
    /// Exported rules by name.
    pub fn modes(&self) -> [(&'static str, ModeId); 10] {
        [
            ("LANGTAG", self.langtag),
            ("DATATYPE", self.datatype),
            ("IRI_LITERAL", self.iri_literal),
            ("BLANK_NODE", self.blank_node),
            ("PNAME", self.pname),
            ("TRIPLE_APOS_STRING", self.triple_apos_string),
            ("TRIPLE_QUOTE_STRING", self.triple_quote_string),
            ("APOS_STRING_LITERAL", self.apos_string_literal),
            ("QUOTE_STRING_LITERAL", self.quote_string_literal),
            ("NUMBER", self.number),
        ]
    }
}

/// The Turtle keyword table.
pub fn keywords() -> Keywords {
    Keywords::new()
        .with(Scope::Keyword, "BASE|2 PREFIX|5 @base|10 @prefix|10")
        .with(Scope::Literal, "true false")
        .with(Scope::BuiltIn, "a|0")
        .lexeme(r"@?\w+")
}

pub fn define(arena: &mut ModeArena) -> (Language, TurtleExports) {
    let common = *arena.standard();
    let table = Arc::new(keywords());

    let percent = arena.alloc(
        Mode::leaf(terminals::percent())
            .label("turtle.percent")
            .scope(Scope::Escape)
            .relevance(0),
    );
    let uchar = arena.alloc(
        Mode::leaf(terminals::uchar())
            .label("turtle.uchar")
            .scope(Scope::Escape)
            .relevance(0),
    );
    let local_esc = arena.alloc(
        Mode::leaf(terminals::pn_local_esc())
            .label("turtle.pn_local_esc")
            .scope(Scope::Escape)
            .relevance(0),
    );

    let directive = arena.alloc(
        Mode::begin_keywords("@prefix @base")
            .label("turtle.directive")
            .keywords(table.clone())
            .relevance(0),
    );
    let langtag = arena.alloc(
        Mode::leaf(r"@[a-zA-Z]+(?:-[a-zA-Z0-9]+)*")
            .label("turtle.langtag")
            .scope(Scope::Type)
            .relevance(0),
    );
    let datatype = arena.alloc(
        Mode::leaf(format!(
            r"\^\^(?:{}|{})",
            terminals::pname_ln(),
            terminals::iriref()
        ))
        .label("turtle.datatype")
        .scope(Scope::Type)
        .relevance(10),
    );
    // XML tags look like relative IRIs too, hence the low weight.
    let iri_literal = arena.alloc(
        Mode::span("<", ">")
            .label("turtle.iri_literal")
            .scope(Scope::Literal)
            .relevance(1)
            .contains(vec![percent, uchar]),
    );
    let blank_node = arena.alloc(
        Mode::leaf(terminals::blank_node_label())
            .label("turtle.blank_node")
            .scope(Scope::TemplateVariable)
            .relevance(10),
    );
    let pname = arena.alloc(
        Mode::leaf(terminals::pname_ns_or_ln())
            .label("turtle.pname")
            .scope(Scope::Symbol)
            .relevance(0)
            .return_begin()
            .contains(vec![percent, local_esc]),
    );
    let triple_apos_string = arena.alloc(
        Mode::span("'''", "'''")
            .label("turtle.triple_apos_string")
            .scope(Scope::String)
            .relevance(0)
            .contains(vec![common.backslash_escape]),
    );
    let triple_quote_string = arena.alloc(
        Mode::span("\"\"\"", "\"\"\"")
            .label("turtle.triple_quote_string")
            .scope(Scope::String)
            .relevance(0)
            .contains(vec![common.backslash_escape]),
    );
    let apos_string_literal = arena.variant(common.apos_string, |m| {
        m.label("turtle.apos_string_literal").relevance(0)
    });
    let quote_string_literal = arena.variant(common.quote_string, |m| {
        m.label("turtle.quote_string_literal").relevance(0)
    });

    let root = arena.alloc(
        Mode::root()
            .label("turtle")
            .keywords(table.clone())
            .contains(vec![
                directive,
                langtag,
                datatype,
                iri_literal,
                blank_node,
                pname,
                triple_apos_string,
                triple_quote_string,
                apos_string_literal,
                quote_string_literal,
                common.c_number,
                common.hash_comment,
            ]),
    );

    let language = Language::new(NAME, "Turtle", root)
        .aliases(&ALIASES)
        .case_insensitive(true);
    let exports = TurtleExports {
        langtag,
        datatype,
        iri_literal,
        blank_node,
        pname,
        triple_apos_string,
        triple_quote_string,
        apos_string_literal,
        quote_string_literal,
        number: common.c_number,
        keywords: table,
    };
    (language, exports)
}
