//! JSON grammar, the sub-language SPARQL hands embedded documents to.

use std::sync::Arc;

use crate::keywords::Keywords;
use crate::language::Language;
use crate::mode::{Mode, ModeArena};
use crate::scope::Scope;

pub const NAME: &str = "json";
pub const ALIASES: [&str; 1] = ["jsonc"];

pub fn define(arena: &mut ModeArena) -> Language {
    let common = *arena.standard();
    let table = Arc::new(Keywords::new().with(Scope::Literal, "true false null"));

    let attribute = arena.alloc(
        Mode::leaf(r#""(?:\\.|[^\\"\r\n])*"(?=\s*:)"#)
            .label("json.attribute")
            .scope(Scope::Attr),
    );
    let punctuation = arena.alloc(
        Mode::leaf(r"[{}\[\],:]")
            .label("json.punctuation")
            .scope(Scope::Punctuation)
            .relevance(0),
    );
    let string = arena.variant(common.quote_string, |m| {
        m.label("json.string").relevance(0)
    });

    let root = arena.alloc(
        Mode::root()
            .label("json")
            .keywords(table)
            .contains(vec![
                attribute,
                punctuation,
                string,
                common.c_number,
                common.c_line_comment,
                common.c_block_comment,
            ]),
    );

    Language::new(NAME, "JSON", root).aliases(&ALIASES)
}
