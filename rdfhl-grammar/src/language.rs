//! A registered language: names plus the root rule of its grammar.

use serde::Serialize;

use crate::mode::ModeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Registry name, e.g. `turtle`.
    pub name: String,
    /// Human readable name, e.g. `Turtle`.
    pub display_name: String,
    pub aliases: Vec<String>,
    /// Applies to every pattern and keyword of the grammar.
    pub case_insensitive: bool,
    pub root: ModeId,
}

impl Language {
    pub fn new(name: &str, display_name: &str, root: ModeId) -> Self {
        Language {
            name: name.to_string(),
            display_name: display_name.to_string(),
            aliases: Vec::new(),
            case_insensitive: false,
            root,
        }
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Whether `name` is this language's name or one of its aliases, ignoring case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{Mode, ModeArena};

    #[test]
    fn answers_to_name_and_aliases() {
        let mut arena = ModeArena::new();
        let root = arena.alloc(Mode::root());
        let lang = Language::new("turtle", "Turtle", root).aliases(&["ttl", "n3"]);
        assert!(lang.answers_to("turtle"));
        assert!(lang.answers_to("TTL"));
        assert!(lang.answers_to("n3"));
        assert!(!lang.answers_to("sparql"));
    }
}
