//! Rules every grammar can borrow: comments, quoted strings, numbers, regexps.
//!
//! These are allocated once per arena, so every grammar using the hash comment
//! uses the same rule.

use crate::mode::{Mode, ModeId};
use crate::scope::Scope;

/// Ids of the shared rules of an arena.
#[derive(Debug, Clone, Copy)]
pub struct StandardModes {
    pub backslash_escape: ModeId,
    pub apos_string: ModeId,
    pub quote_string: ModeId,
    pub c_number: ModeId,
    pub hash_comment: ModeId,
    pub c_line_comment: ModeId,
    pub c_block_comment: ModeId,
    pub regexp: ModeId,
}

/// Decimal, fractional, exponent and hexadecimal forms.
pub const C_NUMBER_RE: &str =
    r"(-?)(\b0[xX][a-fA-F0-9]+|(\b\d+(\.\d*)?|\.\d+)([eE][-+]?\d+)?)";

impl StandardModes {
    pub(crate) fn build(alloc: &mut dyn FnMut(Mode) -> ModeId) -> Self {
        let backslash_escape = alloc(
            Mode::leaf(r"\\[\s\S]")
                .label("standard.backslash_escape")
                .relevance(0),
        );
        let apos_string = alloc(
            Mode::span("'", "'")
                .label("standard.apos_string")
                .scope(Scope::String)
                .contains(vec![backslash_escape]),
        );
        let quote_string = alloc(
            Mode::span("\"", "\"")
                .label("standard.quote_string")
                .scope(Scope::String)
                .contains(vec![backslash_escape]),
        );
        let c_number = alloc(
            Mode::leaf(C_NUMBER_RE)
                .label("standard.c_number")
                .scope(Scope::Number)
                .relevance(0),
        );
        let hash_comment = alloc(
            Mode::span("#", "$")
                .label("standard.hash_comment")
                .scope(Scope::Comment)
                .relevance(0),
        );
        let c_line_comment = alloc(
            Mode::span("//", "$")
                .label("standard.c_line_comment")
                .scope(Scope::Comment)
                .relevance(0),
        );
        let c_block_comment = alloc(
            Mode::span(r"/\*", r"\*/")
                .label("standard.c_block_comment")
                .scope(Scope::Comment)
                .relevance(0),
        );
        let regexp = alloc(
            Mode::leaf(r"/(?:[^\\/\n]|\\.)*/")
                .label("standard.regexp")
                .scope(Scope::Regexp),
        );
        StandardModes {
            backslash_escape,
            apos_string,
            quote_string,
            c_number,
            hash_comment,
            c_line_comment,
            c_block_comment,
            regexp,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::mode::{End, ModeArena};

    #[test]
    fn strings_share_the_escape_rule() {
        let arena = ModeArena::new();
        let common = arena.standard();
        assert_eq!(arena.get(common.apos_string).contains, vec![common.backslash_escape]);
        assert_eq!(arena.get(common.quote_string).contains, vec![common.backslash_escape]);
    }

    #[test]
    fn hash_comment_runs_to_end_of_line() {
        let arena = ModeArena::new();
        let comment = arena.get(arena.standard().hash_comment);
        assert_eq!(comment.end, End::Pattern("$".to_string()));
    }
}
