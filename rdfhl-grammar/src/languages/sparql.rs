//! SPARQL grammar, built on the rules Turtle exports
//!
//!     The Turtle bundle is a constructor argument: SPARQL reuses the very same rule
//!     objects (language tags, datatypes, IRIs, blank nodes, prefixed names, strings,
//!     numbers) and only adds what SPARQL has on its own:
//!
//!         - a case-insensitive keyword table split into keywords, functions,
//!           literals and built-ins, layered over Turtle's table so `PREFIX` and
//!           `BASE` weigh the same in both languages;
//!         - variables, `?name` and `$name`;
//!         - triple-quoted strings whose content opens with `{`, handed to the JSON
//!           grammar.
//!
//!     The JSON rules sit before the plain triple-quoted strings. Both open on the same
//!     delimiter, and the JSON-shaped one must get first refusal.
//!
//!     Words that double as English (`in`, `from`, `with`, `as`, `by`) weigh 0. The
//!     query skeleton (`SELECT`, `WHERE`, `ORDER`, `LIMIT`) weighs a little, so a
//!     query that opens with the same `PREFIX` lines as a Turtle document still
//!     outranks it. Words no other language uses (`optional`, `strstarts`, `isIRI`)
//!     carry the strongest signal.

use std::sync::Arc;

use crate::keywords::Keywords;
use crate::language::Language;
use crate::languages::json;
use crate::languages::turtle::TurtleExports;
use crate::mode::{Mode, ModeArena, ModeId};
use crate::scope::Scope;
use crate::terminals;

pub const NAME: &str = "sparql";
pub const ALIASES: [&str; 3] = ["rql", "rq", "ru"];

const KEYWORDS: &str = "SELECT|2 CONSTRUCT|5 DESCRIBE|2 ASK|2 \
    WHERE|1 FROM|0 NAMED|2 GRAPH|2 OPTIONAL|5 UNION|0 MINUS|2 FILTER|2 BIND|2 \
    VALUES|2 SERVICE|5 SILENT|2 GROUP|1 BY|0 HAVING|0 ORDER|1 ASC|0 DESC|0 \
    LIMIT|1 OFFSET|1 DISTINCT|0 REDUCED|5 AS|0 INSERT|1 DELETE|1 DATA|0 WITH|0 \
    USING|0 DEFAULT|0 ALL|0 LOAD|2 CLEAR|2 DROP|0 CREATE|0 ADD|0 MOVE|0 COPY|0 \
    TO|0 INTO|0 NOT|0 EXISTS|0 IN|0 UNDEF|5";

const FUNCTIONS: &str = "STR|0 LANG|2 LANGMATCHES|5 DATATYPE|2 BOUND|5 IRI|2 URI|0 \
    BNODE|5 RAND|0 ABS|0 CEIL|0 FLOOR|0 ROUND|0 CONCAT|0 STRLEN|2 UCASE|2 LCASE|2 \
    ENCODE_FOR_URI|5 CONTAINS|0 STRSTARTS|5 STRENDS|5 STRBEFORE|5 STRAFTER|5 \
    YEAR|0 MONTH|0 DAY|0 HOURS|0 MINUTES|0 SECONDS|0 TIMEZONE|0 TZ|0 NOW|0 UUID|0 \
    STRUUID|5 MD5|0 SHA1|0 SHA256|0 SHA384|0 SHA512|0 COALESCE|0 IF|0 STRLANG|5 \
    STRDT|5 sameTerm|5 isIRI|5 isURI|5 isBLANK|5 isLITERAL|5 isNUMERIC|5 REGEX|0 \
    SUBSTR|0 REPLACE|0 COUNT|0 SUM|0 MIN|0 MAX|0 AVG|0 SAMPLE|0 GROUP_CONCAT|2 \
    SEPARATOR|2";

/// The SPARQL keyword table, on top of Turtle's.
pub fn keywords(turtle: &Arc<Keywords>) -> Keywords {
    Keywords::extending(turtle.clone())
        .with(Scope::Keyword, KEYWORDS)
        .with(Scope::Function, FUNCTIONS)
        .with(Scope::Literal, "true|0 false|0")
        .with(Scope::BuiltIn, "a|0")
}

/// `?name` or `$name`.
pub fn variable_pattern() -> String {
    let start = format!("{}0-9", terminals::pn_chars_u());
    format!(
        "[?$][{start}][{start}\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}]*",
        start = start
    )
}

/// Triple-quoted string handing a JSON document to the JSON grammar.
fn json_string(arena: &mut ModeArena, quote: &str, label: &'static str) -> ModeId {
    arena.alloc(
        Mode::span(format!(r"{}(?=\s*\{{)", quote), quote.to_string())
            .label(label)
            .begin_scope(Scope::String)
            .end_scope(Scope::String)
            .relevance(0)
            .sub_language(json::NAME),
    )
}

pub fn define(arena: &mut ModeArena, turtle: &TurtleExports) -> Language {
    let common = *arena.standard();
    let table = Arc::new(keywords(&turtle.keywords));

    let variable = arena.alloc(
        Mode::leaf(variable_pattern())
            .label("sparql.variable")
            .scope(Scope::Variable),
    );
    let json_apos = json_string(arena, "'''", "sparql.triple_apos_json");
    let json_quote = json_string(arena, "\"\"\"", "sparql.triple_quote_json");

    let root = arena.alloc(
        Mode::root()
            .label("sparql")
            .keywords(table)
            .contains(vec![
                turtle.langtag,
                turtle.datatype,
                turtle.iri_literal,
                turtle.blank_node,
                turtle.pname,
                variable,
                json_apos,
                json_quote,
                turtle.triple_apos_string,
                turtle.triple_quote_string,
                turtle.apos_string_literal,
                turtle.quote_string_literal,
                turtle.number,
                common.hash_comment,
            ]),
    );

    Language::new(NAME, "SPARQL", root)
        .aliases(&ALIASES)
        .case_insensitive(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::turtle;

    #[test]
    fn json_strings_precede_plain_triple_strings() {
        let mut arena = ModeArena::new();
        let (_, exports) = turtle::define(&mut arena);
        let lang = define(&mut arena, &exports);
        let order = &arena.get(lang.root).contains;
        let labels: Vec<_> = order.iter().map(|id| arena.get(*id).label).collect();
        let at = |label| labels.iter().position(|l| *l == Some(label)).unwrap();
        assert!(at("sparql.triple_apos_json") < at("turtle.triple_apos_string"));
        assert!(at("sparql.triple_quote_json") < at("turtle.triple_quote_string"));
    }

    fn table() -> Keywords {
        keywords(&Arc::new(turtle::keywords()))
    }

    #[test]
    fn common_words_weigh_nothing() {
        let table = table();
        for word in ["in", "from", "with", "as", "by"] {
            assert_eq!(table.get(word, true).unwrap().relevance, 0, "{}", word);
        }
        for word in ["select", "where", "order", "limit", "optional"] {
            assert!(table.get(word, true).unwrap().relevance > 0, "{}", word);
        }
    }

    #[test]
    fn directives_weigh_as_in_turtle() {
        let table = table();
        assert_eq!(table.get("prefix", true).unwrap().relevance, 5);
        assert_eq!(table.get("base", true).unwrap().relevance, 2);
        assert_eq!(table.get("true", true).unwrap().relevance, 0);
    }

    #[test]
    fn partitions() {
        let table = table();
        assert_eq!(table.get("SELECT", true).unwrap().scope, Scope::Keyword);
        assert_eq!(table.get("strstarts", true).unwrap().scope, Scope::Function);
        assert_eq!(table.get("TRUE", true).unwrap().scope, Scope::Literal);
        assert_eq!(table.get("a", true).unwrap().scope, Scope::BuiltIn);
    }
}
