//! Shared configuration loader for the rdfhl tools.
//!
//! `defaults/rdfhl.default.toml` is embedded into every binary so the documented
//! defaults and runtime behavior cannot drift apart. Callers layer user files and
//! single-key overrides on top through [`Loader`] before deserializing into
//! [`RdfhlConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use rdfhl_grammar::languages::shexc::ShexcOptions;
use rdfhl_grammar::{OutputFormat, RegistryConfig};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/rdfhl.default.toml");

/// Top-level configuration consumed by rdfhl applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RdfhlConfig {
    pub registry: RegistrySection,
    pub highlight: HighlightConfig,
    pub shexc: ShexcConfig,
    pub detect: DetectConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySection {
    pub languages: Vec<String>,
}

/// Output knobs for `rdfhl highlight`.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    pub class_prefix: String,
    pub format: FormatSetting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatSetting {
    Html,
    Json,
    Tokens,
}

impl From<FormatSetting> for OutputFormat {
    fn from(setting: FormatSetting) -> Self {
        match setting {
            FormatSetting::Html => OutputFormat::Html,
            FormatSetting::Json => OutputFormat::Json,
            FormatSetting::Tokens => OutputFormat::Tokens,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShexcConfig {
    pub starting_production: String,
}

/// Language guessing.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectConfig {
    pub languages: Vec<String>,
    pub min_relevance: u32,
}

/// Names shared with the page script that toggles light and dark themes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub data_attribute: String,
    pub toggle_id: String,
    pub popup_id: String,
}

impl RdfhlConfig {
    /// Registry construction settings derived from the `registry` and `shexc` sections.
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            languages: self.registry.languages.clone(),
            shexc: ShexcOptions::starting_at(self.shexc.starting_production.clone()),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.highlight.format.into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RdfhlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RdfhlConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdfhl_grammar::languages::shexc::Production;
    use rdfhl_grammar::Registry;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.highlight.class_prefix, "hljs-");
        assert_eq!(config.output_format(), OutputFormat::Html);
        assert_eq!(config.shexc.starting_production, "shexDoc");
        assert_eq!(config.detect.languages, vec!["turtle", "sparql", "shexc"]);
        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.theme.data_attribute, "data-theme");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("highlight.format", "tokens")
            .expect("override to apply")
            .set_override("shexc.starting_production", "tripleExpression")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output_format(), OutputFormat::Tokens);
        assert_eq!(
            config.registry_config().shexc.production().unwrap(),
            Production::TripleExpression
        );
    }

    #[test]
    fn user_file_overrides_single_keys() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[highlight]\nclass_prefix = \"rdf-\"").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.highlight.class_prefix, "rdf-");
        assert_eq!(config.output_format(), OutputFormat::Html);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/rdfhl.toml")
            .build()
            .unwrap();
        assert_eq!(config.detect.min_relevance, 1);
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new().with_file("/nonexistent/rdfhl.toml").build().is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("highlight.format", "yaml")
            .unwrap()
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn default_registry_config_builds_every_language() {
        let config = load_defaults().unwrap();
        let registry = Registry::from_config(&config.registry_config()).unwrap();
        assert_eq!(
            registry.list_languages(),
            vec!["json", "shexc", "sparql", "turtle"]
        );
    }

    #[test]
    fn blank_starting_production_means_shex_doc() {
        let config = Loader::new()
            .set_override("shexc.starting_production", "")
            .unwrap()
            .build()
            .unwrap();
        let registry = Registry::from_config(&config.registry_config()).unwrap();
        assert!(registry.get("shexc").unwrap().case_insensitive);
    }

    #[test]
    fn registry_order_is_checked() {
        let config = Loader::new()
            .set_override("registry.languages", vec!["sparql", "turtle"])
            .unwrap()
            .build()
            .unwrap();
        assert!(Registry::from_config(&config.registry_config()).is_err());
    }
}
