//! Error types for grammar construction and highlighting.

use thiserror::Error;

use crate::mode::ModeId;

/// Errors raised while building, registering or running a grammar.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// A grammar was asked to start from a production it does not define.
    #[error("starting production {name} not found in {}", .known.join(", "))]
    UnknownProduction { name: String, known: Vec<&'static str> },

    /// A grammar was registered before the grammar it builds on.
    #[error("language '{language}' requires '{requires}' to be registered first")]
    MissingPrerequisite {
        language: &'static str,
        requires: &'static str,
    },

    /// No registered language answers to this name or alias.
    #[error("language '{0}' is not registered")]
    LanguageNotFound(String),

    /// A grammar refers to a rule its arena never allocated.
    #[error("rule {0:?} is not allocated in this arena")]
    UnknownRule(ModeId),

    /// A rule pattern failed to compile.
    #[error("rule {mode:?} has an invalid pattern /{pattern}/: {message}")]
    Pattern {
        mode: ModeId,
        pattern: String,
        message: String,
    },
}

impl GrammarError {
    /// Create a pattern error from any regex engine error.
    pub fn pattern(mode: ModeId, pattern: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Pattern {
            mode,
            pattern: pattern.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_production_lists_alternatives() {
        let err = GrammarError::UnknownProduction {
            name: "nope".to_string(),
            known: vec!["shexDoc", "shape"],
        };
        assert_eq!(
            err.to_string(),
            "starting production nope not found in shexDoc, shape"
        );
    }

    #[test]
    fn missing_prerequisite_names_both_languages() {
        let err = GrammarError::MissingPrerequisite {
            language: "sparql",
            requires: "turtle",
        };
        assert!(err.to_string().contains("'sparql' requires 'turtle'"));
    }
}
