//! Turtle highlighting, end to end through the registry
//!
//! Tests address text by content (see rdfhl_grammar::testing) and check:
//! - directives, IRIs and the terminating dot
//! - escapes inside IRIs and prefixed names
//! - string delimiter precedence
//! - relevance signals

use rdfhl_grammar::testing::assert_highlight;
use rdfhl_grammar::{Highlight, Registry, Scope};
use rstest::rstest;

fn turtle(source: &str) -> Highlight {
    Registry::with_defaults()
        .highlight(source, "turtle")
        .expect("turtle to be registered")
}

#[rstest]
#[case("@prefix ex: <http://example.org/> .", "@prefix")]
#[case("@base <http://example.org/> .", "@base")]
#[case("@PREFIX ex: <http://example.org/> .", "@PREFIX")]
fn test_directive_keyword_iri_and_dot(#[case] source: &str, #[case] directive: &str) {
    let hl = turtle(source);
    assert_highlight(&hl)
        .language("turtle")
        .node(directive, Scope::Keyword)
        .node("<http://example.org/>", Scope::Literal)
        .unscoped(" .");
}

#[test]
fn test_directive_weighs_ten() {
    let hl = turtle("@prefix ex: <http://example.org/> .");
    // @prefix (10) plus the IRI (1); the prefixed name weighs nothing
    assert_highlight(&hl).relevance(11);
}

#[test]
fn test_sparql_style_directive() {
    let hl = turtle("PREFIX ex: <http://example.org/>");
    assert_highlight(&hl)
        .node("PREFIX", Scope::Keyword)
        .node("ex:", Scope::Symbol)
        .relevance(6);
}

#[test]
fn test_namespace_is_symbol() {
    let hl = turtle("@prefix foaf: <http://xmlns.com/foaf/0.1/> .");
    assert_highlight(&hl).node("foaf:", Scope::Symbol);
}

#[rstest]
#[case("<http://example.org/a%20b>", "%20")]
#[case("<http://example.org/%C3%A9>", "%C3")]
#[case(r"<http://example.org/\u00E9>", r"\u00E9")]
fn test_escapes_inside_iri(#[case] source: &str, #[case] escape: &str) {
    let hl = turtle(source);
    assert_highlight(&hl)
        .span(escape)
        .is_node(Scope::Escape)
        .within(Scope::Literal);
    assert_highlight(&hl).span("http").innermost(Scope::Literal);
}

#[rstest]
#[case("ex:a%20b", "%20")]
#[case(r"ex:a\,b", r"\,")]
#[case("ex:%41", "%41")]
fn test_escapes_inside_prefixed_name(#[case] source: &str, #[case] escape: &str) {
    let hl = turtle(source);
    assert_highlight(&hl)
        .node(source, Scope::Symbol)
        .span(escape)
        .is_node(Scope::Escape)
        .within(Scope::Symbol);
}

#[test]
fn test_triple_quotes_win_over_single_quotes() {
    let hl = turtle(r#"ex:s ex:p """a "quoted" b""" ."#);
    assert_highlight(&hl)
        .node(r#""""a "quoted" b""""#, Scope::String)
        .unscoped(" .");
}

#[test]
fn test_triple_apostrophes_hold_single_apostrophes() {
    let hl = turtle("ex:s ex:p '''it's''' .");
    assert_highlight(&hl).node("'''it's'''", Scope::String);
}

#[test]
fn test_string_escapes_do_not_close_string() {
    let hl = turtle(r#"ex:s ex:p "a \" b" ."#);
    assert_highlight(&hl).node(r#""a \" b""#, Scope::String);
}

#[test]
fn test_unterminated_string_runs_to_end() {
    let hl = turtle("ex:s ex:p \"never closed");
    assert_highlight(&hl).node("\"never closed", Scope::String);
}

#[test]
fn test_literal_annotations() {
    let hl = turtle(r#"ex:s ex:p "chat"@fr-BE, "1"^^xsd:int, "2"^^<http://www.w3.org/2001/XMLSchema#int> ."#);
    assert_highlight(&hl)
        .node("@fr-BE", Scope::Type)
        .node("^^xsd:int", Scope::Type)
        .node("^^<http://www.w3.org/2001/XMLSchema#int>", Scope::Type)
        .no_scope(Scope::Comment);
}

#[test]
fn test_blank_nodes_and_a() {
    let hl = turtle("_:b0 a ex:Thing .");
    assert_highlight(&hl)
        .node("_:b0", Scope::TemplateVariable)
        .node("a", Scope::BuiltIn)
        .node("ex:Thing", Scope::Symbol)
        .relevance(10);
}

#[test]
fn test_numbers_booleans_comments() {
    let hl = turtle("ex:s ex:p 42, -1.5e3, true # done\nex:t ex:q false .");
    assert_highlight(&hl)
        .node("42", Scope::Number)
        .node("-1.5e3", Scope::Number)
        .node("true", Scope::Literal)
        .node("false", Scope::Literal)
        .node("# done", Scope::Comment);
}

#[test]
fn test_hash_inside_iri_is_not_a_comment() {
    let hl = turtle("<http://example.org/#frag> a ex:C .");
    assert_highlight(&hl)
        .node("<http://example.org/#frag>", Scope::Literal)
        .no_scope(Scope::Comment);
}

#[test]
fn test_debug_rendering() {
    let hl = turtle(r#"@prefix ex: <http://example.org/> . ex:s a ex:C ; ex:p "v"@en, 42 ."#);
    insta::assert_snapshot!(
        hl.to_debug_string(),
        @r#"[turtle>[keyword:@prefix] [symbol:ex:] [literal:<http://example.org/>] . [symbol:ex:s] [built_in:a] [symbol:ex:C] ; [symbol:ex:p] [string:"v"][type:@en], [number:42] .]"#
    );
}
