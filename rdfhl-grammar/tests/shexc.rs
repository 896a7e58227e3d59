//! ShExC highlighting, end to end
//!
//! Covers the directives, the recursive shape productions, the relevance policy and
//! the starting production option.

use rdfhl_grammar::languages::shexc::{self, Production, ShexcOptions};
use rdfhl_grammar::testing::assert_highlight;
use rdfhl_grammar::{GrammarError, Highlight, Registry, Scope};
use rstest::rstest;

const PERSON: &str = "PREFIX ex: <http://example.org/>
PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>

# people
ex:PersonShape CLOSED {
  $ex:nameExpr ex:name xsd:string ;
  ex:knows @ex:PersonShape * ;
  &ex:Contact ;
  ex:address {
    ex:city xsd:string
  }
}
";

fn shexc(source: &str) -> Highlight {
    Registry::with_defaults()
        .highlight(source, "shexc")
        .expect("shexc to be registered")
}

#[test]
fn test_prefix_directive() {
    let hl = shexc(PERSON);
    assert_highlight(&hl)
        .node("PREFIX", Scope::Keyword)
        .node("ex:", Scope::Type)
        .node("<http://example.org/>", Scope::Symbol)
        .node("# people", Scope::Comment);
}

#[rstest]
#[case("BASE <http://example.org/>\nex:S {}", "BASE")]
#[case("import <http://example.org/other.shex>\nex:S {}", "import")]
fn test_other_directives(#[case] source: &str, #[case] keyword: &str) {
    let hl = shexc(source);
    assert_highlight(&hl)
        .node(keyword, Scope::Keyword)
        .span("<http://example.org/")
        .within(Scope::Symbol);
    // The IRI closes the directive, so the shape label is read as one.
    assert_highlight(&hl).node("ex:S", Scope::Title);
}

#[test]
fn test_shape_declaration() {
    let hl = shexc(PERSON);
    assert_highlight(&hl)
        .node("ex:PersonShape", Scope::Title)
        .node("CLOSED", Scope::Keyword)
        .node("$ex:nameExpr", Scope::Name)
        .node("@ex:PersonShape", Scope::Name)
        .node("&ex:Contact", Scope::Name);
}

#[test]
fn test_triple_constraints_split_prefixed_names() {
    let hl = shexc(PERSON);
    let doc = assert_highlight(&hl);
    doc.span("ex:name ").outside(Scope::Title);
    doc.span_nth("name", 1).is_node(Scope::Variable);
    doc.span_nth("xsd:", 1).is_node(Scope::Type);
    doc.node("string", Scope::Variable);
}

#[test]
fn test_nested_shapes() {
    let hl = shexc(PERSON);
    let doc = assert_highlight(&hl);
    doc.node("city", Scope::Variable);
    // Text after the outer shape closes is back at the top level.
    let hl = shexc("ex:A { ex:p { ex:q . } }\n# after");
    assert_highlight(&hl).node("# after", Scope::Comment);
}

#[test]
fn test_regexp_facet() {
    let hl = shexc("ex:S { ex:code xsd:string /^[A-Z]{3}$/ }");
    assert_highlight(&hl).node("/^[A-Z]{3}$/", Scope::Regexp);
}

#[test]
fn test_shape_expression_keywords() {
    let hl = shexc("ex:S IRI AND NOT BNODE\nex:T LITERAL MinLength 3");
    assert_highlight(&hl)
        .node("IRI", Scope::Keyword)
        .node("AND", Scope::Keyword)
        .node("NOT", Scope::Keyword)
        .node("BNODE", Scope::Keyword)
        .node("LITERAL", Scope::Keyword)
        .node("MinLength", Scope::Keyword);
}

#[test]
fn test_bare_iris_carry_no_weight() {
    let hl = shexc("<http://example.org/a> <http://example.org/b> ex:c");
    assert_highlight(&hl).relevance(0);
}

#[test]
fn test_sigils_carry_weight() {
    let plain = shexc("ex:S { ex:p ex:T }").relevance;
    let reference = shexc("ex:S { ex:p @ex:T }").relevance;
    assert!(plain < 10);
    assert!(reference >= plain + 10);
}

#[test]
fn test_schema_without_sigils_detects_as_shexc() {
    let source = "PREFIX ex: <http://example.org/>\n\
                  PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>\n\
                  ex:S { ex:p xsd:string ; ex:q ex:T }\n";
    let ranked = Registry::with_defaults()
        .detect_among(source, &["turtle", "sparql", "shexc"])
        .unwrap();
    assert_eq!(ranked[0].language, "shexc");
    assert!(ranked[0].relevance > ranked[1].relevance);
}

#[test]
fn test_person_detects_as_shexc() {
    let ranked = Registry::with_defaults().detect(PERSON).unwrap();
    assert_eq!(ranked[0].language, "shexc");
}

#[test]
fn test_unknown_starting_production() {
    let mut registry = Registry::new();
    let err = registry
        .register_shexc(&ShexcOptions::starting_at("shapeDecl"))
        .unwrap_err();
    match &err {
        GrammarError::UnknownProduction { name, known } => {
            assert_eq!(name, "shapeDecl");
            assert_eq!(known, &Production::names());
        }
        other => panic!("Expected UnknownProduction, got {:?}", other),
    }
    assert!(err.to_string().contains("shexDoc"));
    assert!(!registry.has("shexc"));
}

#[test]
fn test_default_production_is_shex_doc() {
    let mut registry = Registry::new();
    registry.register_shexc(&ShexcOptions::default()).unwrap();
    let language = registry.get("shexc").unwrap();
    assert_eq!(registry.arena().get(language.root).label, Some("shexc.shexDoc"));
    assert!(language.case_insensitive);
}

#[rstest]
#[case("shape", "{ ex:p ex:o }")]
#[case("tripleExpression", "ex:p ex:o")]
#[case("IRIREF", "<http://example.org/>")]
fn test_starting_at_inner_productions(#[case] production: &str, #[case] source: &str) {
    let mut registry = Registry::new();
    registry
        .register_shexc(&ShexcOptions::starting_at(production))
        .unwrap();
    let language = registry.get("shexc").unwrap();
    let root = registry.arena().get(language.root);
    assert_eq!(root.label.map(|l| l.trim_start_matches("shexc.")), Some(production));
    // Highlighting from an inner production still covers the whole source.
    let hl = registry.highlight(source, "shexc").unwrap();
    assert_eq!(hl.root.range, 0..source.len());
}

#[test]
fn test_every_production_name_parses() {
    for name in Production::names() {
        let production: Production = name.parse().unwrap();
        assert_eq!(production.name(), name);
    }
    assert_eq!(shexc::NAME, "shexc");
}
