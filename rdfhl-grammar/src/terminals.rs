//! Lexical terminals shared by the Turtle and SPARQL grammars
//!
//!     These builders return regular-expression *sources*, not compiled expressions.
//!     Terminals refer to each other (a prefixed name holds a local name, which may hold
//!     percent encodings), so they are composed by string concatenation and only the
//!     finished rule patterns get compiled.
//!
//!     The productions follow the Turtle terminal grammar:
//!
//!         IRIREF          "<" ([^#x00-#x20<>"{}|^`\] | UCHAR)* ">"
//!         PNAME_NS        PN_PREFIX? ":"
//!         PNAME_LN        PNAME_NS PN_LOCAL
//!         BLANK_NODE      "_:" (PN_CHARS_U | [0-9]) ((PN_CHARS | ".")* PN_CHARS)?
//!         PN_LOCAL        (PN_CHARS_U | ":" | [0-9] | PLX) ((PN_CHARS | "." | ":" | PLX)* (PN_CHARS | ":" | PLX))?
//!         PLX             PERCENT | PN_LOCAL_ESC
//!
//!     Character-class builders (`pn_chars_*`) return the *body* of a class, without
//!     brackets, so callers can extend them.

/// One hexadecimal digit.
pub const HEX: &str = "[0-9A-Fa-f]";

/// `\uXXXX` or `\UXXXXXXXX`.
pub fn uchar() -> String {
    format!(r"\\(?:u{hex}{{4}}|U{hex}{{8}})", hex = HEX)
}

/// A full `<...>` IRI reference.
pub fn iriref() -> String {
    format!(r#"<(?:[^\x00-\x20<>"{{}}|^`\\]|{})*>"#, uchar())
}

pub fn pn_chars_base() -> String {
    [
        "A-Za-z",
        "\u{00C0}-\u{00D6}",
        "\u{00D8}-\u{00F6}",
        "\u{00F8}-\u{02FF}",
        "\u{0370}-\u{037D}",
        "\u{037F}-\u{1FFF}",
        "\u{200C}-\u{200D}",
        "\u{2070}-\u{218F}",
        "\u{2C00}-\u{2FEF}",
        "\u{3001}-\u{D7FF}",
        "\u{F900}-\u{FDCF}",
        "\u{FDF0}-\u{FFFD}",
        "\u{10000}-\u{EFFFF}",
    ]
    .concat()
}

pub fn pn_chars_u() -> String {
    format!("{}_", pn_chars_base())
}

/// Leading `-` keeps the hyphen literal wherever the body is spliced.
pub fn pn_chars() -> String {
    format!(
        "-{}0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}",
        pn_chars_u()
    )
}

pub fn pn_prefix() -> String {
    let chars = pn_chars();
    format!(
        "[{base}](?:[{chars}.]*[{chars}])?",
        base = pn_chars_base(),
        chars = chars
    )
}

/// `%` and two hex digits.
pub fn percent() -> String {
    format!("%{hex}{hex}", hex = HEX)
}

/// Backslash escapes allowed in local names.
pub fn pn_local_esc() -> String {
    r"\\[_~.!$&'()*+,;=/?#@%-]".to_string()
}

pub fn plx() -> String {
    format!("(?:{}|{})", percent(), pn_local_esc())
}

pub fn pname_ns() -> String {
    format!("(?:{})?:", pn_prefix())
}

pub fn pn_local() -> String {
    let chars = pn_chars();
    let plx = plx();
    format!(
        "(?:[{u}:0-9]|{plx})(?:(?:[{chars}.:]|{plx})*(?:[{chars}:]|{plx}))?",
        u = pn_chars_u(),
        chars = chars,
        plx = plx
    )
}

pub fn pname_ln() -> String {
    format!("{}{}", pname_ns(), pn_local())
}

/// A bare namespace or a full prefixed name.
pub fn pname_ns_or_ln() -> String {
    format!("{}(?:{})?", pname_ns(), pn_local())
}

pub fn blank_node_label() -> String {
    let chars = pn_chars();
    format!(
        "_:[{u}0-9](?:[{chars}.]*[{chars}])?",
        u = pn_chars_u(),
        chars = chars
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use rstest::rstest;

    fn whole(fragment: &str) -> Regex {
        Regex::new(&format!("^(?:{})$", fragment)).unwrap()
    }

    fn fragments() -> Vec<(&'static str, String)> {
        vec![
            ("HEX", HEX.to_string()),
            ("UCHAR", uchar()),
            ("IRIREF", iriref()),
            ("PN_PREFIX", pn_prefix()),
            ("PERCENT", percent()),
            ("PN_LOCAL_ESC", pn_local_esc()),
            ("PLX", plx()),
            ("PNAME_NS", pname_ns()),
            ("PN_LOCAL", pn_local()),
            ("PNAME_LN", pname_ln()),
            ("PNAME_NS_OR_LN", pname_ns_or_ln()),
            ("BLANK_NODE_LABEL", blank_node_label()),
        ]
    }

    #[test]
    fn every_fragment_compiles() {
        for (name, fragment) in fragments() {
            assert!(Regex::new(&fragment).is_ok(), "{} does not compile", name);
        }
    }

    #[rstest]
    #[case("%2F", true)]
    #[case("%af", true)]
    #[case("%2G", false)]
    #[case("%2", false)]
    fn percent_needs_two_hex_digits(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(whole(&percent()).is_match(input), expected);
    }

    #[rstest]
    #[case(r"\u00E9", true)]
    #[case(r"\U0001F600", true)]
    #[case(r"\u00E", false)]
    #[case(r"\x41", false)]
    fn uchar_forms(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(whole(&uchar()).is_match(input), expected);
    }

    #[rstest]
    #[case("<http://example.org/a>", true)]
    #[case("<>", true)]
    #[case(r"<http://example.org/\u00E9>", true)]
    #[case("<http://example.org/a b>", false)]
    #[case("<http://example.org/{x}>", false)]
    fn iriref_excludes_reserved_characters(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(whole(&iriref()).is_match(input), expected);
    }

    #[rstest]
    #[case(":", true)]
    #[case("ex:", true)]
    #[case("ex:thing", true)]
    #[case("ex:a.b", true)]
    #[case("ex:a%20b", true)]
    #[case(r"ex:a\,b", true)]
    #[case("dbr:Zürich", true)]
    #[case("ex:a.", false)]
    #[case("1ex:a", false)]
    fn prefixed_names(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(whole(&pname_ns_or_ln()).is_match(input), expected);
    }

    #[test]
    fn local_name_stops_before_trailing_dot() {
        let re = Regex::new(&pname_ln()).unwrap();
        assert_eq!(re.find("ex:thing .").unwrap().as_str(), "ex:thing");
        assert_eq!(re.find("ex:thing.").unwrap().as_str(), "ex:thing");
    }

    #[rstest]
    #[case("_:b0", true)]
    #[case("_:node-1", true)]
    #[case("_:a.b", true)]
    #[case("_:-a", false)]
    #[case("_:", false)]
    fn blank_node_labels(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(whole(&blank_node_label()).is_match(input), expected);
    }

    #[test]
    fn supplementary_plane_letters_are_name_characters() {
        assert!(whole(&pn_prefix()).is_match("\u{10400}x"));
    }
}
