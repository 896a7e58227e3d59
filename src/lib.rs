//! # rdfhl
//!
//! Syntax highlighting grammars for Turtle, SPARQL and ShExC.
//!
//! This crate ties the workspace together: the grammars and registry from
//! [`rdfhl_grammar`], the layered configuration from [`rdfhl_config`], and the
//! [`theme`] model for pages that show highlighted code.
//!
//! ```text
//! let config = rdfhl::config::load_defaults()?;
//! let registry = rdfhl::registry(&config)?;
//! let hl = registry.highlight("SELECT * WHERE { ?s ?p ?o }", "sparql")?;
//! println!("{}", rdfhl::render(&hl, &config)?);
//! ```

pub mod theme;

pub use rdfhl_config as config;
pub use rdfhl_grammar as grammar;

pub use rdfhl_config::{Loader, RdfhlConfig};
pub use rdfhl_grammar::{
    Detection, GrammarError, Highlight, Language, OutputFormat, Registry, RegistryConfig, Scope,
    Token,
};
pub use theme::{Theme, ThemeToggle};

/// Build the registry a configuration describes.
pub fn registry(config: &RdfhlConfig) -> Result<Registry, GrammarError> {
    Registry::from_config(&config.registry_config())
}

/// Render with the configured format and class prefix.
pub fn render(highlight: &Highlight, config: &RdfhlConfig) -> Result<String, serde_json::Error> {
    rdfhl_grammar::render::render(
        highlight,
        config.output_format(),
        &config.highlight.class_prefix,
    )
}
