//! Language registry
//!
//! The registry owns the rule arena every grammar is built in, plus the registered
//! languages in registration order. Grammars are compiled lazily, once per language,
//! the first time they are used; after that highlighting only reads.
//!
//! Languages are found by name or alias, ignoring case. Registering a language
//! under a name that is already taken replaces the earlier one.

use once_cell::sync::OnceCell;

use crate::compile::CompiledLanguage;
use crate::error::GrammarError;
use crate::highlight::Highlight;
use crate::language::Language;
use crate::languages::shexc::{self, ShexcOptions};
use crate::languages::turtle::{self, TurtleExports};
use crate::languages::{json, sparql};
use crate::mode::ModeArena;
use crate::scan::{self, SubLanguages};

/// Built-in languages in the order [`Registry::with_defaults`] registers them.
pub const BUILTIN_LANGUAGES: [&str; 4] = [json::NAME, turtle::NAME, sparql::NAME, shexc::NAME];

/// What to register when building a registry from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Built-in languages to register, in order.
    pub languages: Vec<String>,
    pub shexc: ShexcOptions,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            languages: BUILTIN_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            shexc: ShexcOptions::default(),
        }
    }
}

/// One language's score in a detection run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Detection {
    pub language: String,
    pub relevance: u32,
}

struct Registered {
    language: Language,
    compiled: OnceCell<CompiledLanguage>,
}

impl Registered {
    fn new(language: Language) -> Self {
        Registered {
            language,
            compiled: OnceCell::new(),
        }
    }
}

/// Registry of highlighting languages
///
/// ```ignore
/// let registry = Registry::with_defaults();
/// let highlight = registry.highlight("@prefix ex: <http://example.org/> .", "ttl")?;
/// ```
pub struct Registry {
    arena: ModeArena,
    languages: Vec<Registered>,
    turtle: Option<TurtleExports>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Registry {
            arena: ModeArena::new(),
            languages: Vec::new(),
            turtle: None,
        }
    }

    /// Create a registry with every built-in language
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_json();
        let exports = registry.register_turtle();
        registry.add_sparql(&exports);
        let language = shexc::define_at(&mut registry.arena, Default::default());
        registry.register(language);
        registry
    }

    /// Register the built-in languages a configuration names, in its order.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, GrammarError> {
        let mut registry = Self::new();
        for name in &config.languages {
            match name.to_ascii_lowercase().as_str() {
                json::NAME => registry.register_json(),
                turtle::NAME => {
                    registry.register_turtle();
                }
                sparql::NAME => registry.register_sparql()?,
                shexc::NAME => registry.register_shexc(&config.shexc)?,
                _ => return Err(GrammarError::LanguageNotFound(name.clone())),
            }
        }
        Ok(registry)
    }

    pub fn arena(&self) -> &ModeArena {
        &self.arena
    }

    /// Arena to build custom grammars in before passing them to [`Registry::register`].
    pub fn arena_mut(&mut self) -> &mut ModeArena {
        &mut self.arena
    }

    /// Register a language built in this registry's arena
    ///
    /// If a language with the same name already exists, it will be replaced.
    pub fn register(&mut self, language: Language) {
        tracing::debug!(language = %language.name, aliases = ?language.aliases, "registering language");
        let name = language.name.clone();
        match self.languages.iter_mut().find(|r| r.language.name == name) {
            Some(slot) => {
                tracing::info!(language = %name, "replacing registered language");
                *slot = Registered::new(language);
            }
            None => self.languages.push(Registered::new(language)),
        }
    }

    pub fn register_json(&mut self) {
        let language = json::define(&mut self.arena);
        self.register(language);
    }

    /// Register Turtle and keep its exported rules for grammars built on it.
    pub fn register_turtle(&mut self) -> TurtleExports {
        let (language, exports) = turtle::define(&mut self.arena);
        self.register(language);
        self.turtle = Some(exports.clone());
        exports
    }

    /// Register SPARQL on top of the registered Turtle rules.
    pub fn register_sparql(&mut self) -> Result<(), GrammarError> {
        let exports = self
            .turtle
            .clone()
            .ok_or(GrammarError::MissingPrerequisite {
                language: sparql::NAME,
                requires: turtle::NAME,
            })?;
        self.add_sparql(&exports);
        Ok(())
    }

    fn add_sparql(&mut self, exports: &TurtleExports) {
        let language = sparql::define(&mut self.arena, exports);
        self.register(language);
    }

    pub fn register_shexc(&mut self, options: &ShexcOptions) -> Result<(), GrammarError> {
        let language = shexc::define(&mut self.arena, options)?;
        self.register(language);
        Ok(())
    }

    /// Rules exported by the registered Turtle grammar.
    pub fn turtle_exports(&self) -> Option<&TurtleExports> {
        self.turtle.as_ref()
    }

    fn entry(&self, name: &str) -> Result<&Registered, GrammarError> {
        self.languages
            .iter()
            .find(|r| r.language.name.eq_ignore_ascii_case(name))
            .or_else(|| self.languages.iter().find(|r| r.language.answers_to(name)))
            .ok_or_else(|| GrammarError::LanguageNotFound(name.to_string()))
    }

    /// Get a language by name or alias
    pub fn get(&self, name: &str) -> Result<&Language, GrammarError> {
        self.entry(name).map(|r| &r.language)
    }

    /// Check if a language answers to a name or alias
    pub fn has(&self, name: &str) -> bool {
        self.entry(name).is_ok()
    }

    /// List all registered language names (sorted)
    pub fn list_languages(&self) -> Vec<String> {
        let mut names: Vec<_> = self.languages.iter().map(|r| r.language.name.clone()).collect();
        names.sort();
        names
    }

    /// Registered languages in registration order
    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter().map(|r| &r.language)
    }

    /// The compiled grammar of a language, compiling it on first use.
    pub fn compiled(&self, name: &str) -> Result<&CompiledLanguage, GrammarError> {
        let entry = self.entry(name)?;
        entry
            .compiled
            .get_or_try_init(|| CompiledLanguage::compile(&self.arena, &entry.language))
    }

    /// Highlight source text with the named language
    pub fn highlight(&self, source: &str, name: &str) -> Result<Highlight, GrammarError> {
        let compiled = self.compiled(name)?;
        let highlight = scan::highlight(compiled, source, self);
        tracing::trace!(
            language = %highlight.language,
            relevance = highlight.relevance,
            bytes = source.len(),
            "highlighted"
        );
        Ok(highlight)
    }

    /// Score every registered language against `source`, best first.
    pub fn detect(&self, source: &str) -> Result<Vec<Detection>, GrammarError> {
        let names: Vec<String> = self.languages().map(|l| l.name.clone()).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        self.detect_among(source, &names)
    }

    /// Score the named languages against `source`, best first. Ties keep the given
    /// order.
    pub fn detect_among(&self, source: &str, names: &[&str]) -> Result<Vec<Detection>, GrammarError> {
        let mut ranked = Vec::with_capacity(names.len());
        for name in names {
            let highlight = self.highlight(source, name)?;
            ranked.push(Detection {
                language: highlight.language,
                relevance: highlight.relevance,
            });
        }
        ranked.sort_by(|a, b| b.relevance.cmp(&a.relevance));
        tracing::debug!(candidates = ranked.len(), best = ?ranked.first(), "detection finished");
        Ok(ranked)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SubLanguages for Registry {
    fn sub_language(&self, name: &str) -> Option<&CompiledLanguage> {
        match self.compiled(name) {
            Ok(compiled) => Some(compiled),
            Err(GrammarError::LanguageNotFound(_)) => None,
            Err(err) => {
                tracing::warn!(language = name, error = %err, "sub-language failed to compile");
                None
            }
        }
    }
}
