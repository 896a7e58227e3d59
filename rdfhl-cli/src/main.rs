//! Command-line interface for rdfhl
//! Highlights Turtle, SPARQL and ShExC files and guesses which of them a file is written in.
//!
//! Usage:
//!   rdfhl highlight `<path>` [--lang `<name>`] [--format html|json|tokens]   - Highlight a file
//!   rdfhl detect `<path>`                                              - Rank languages by relevance
//!   rdfhl languages                                                    - List registered languages
//!
//! Global options: `--config <file>` layers a TOML file over the built-in defaults,
//! `--verbose` turns on debug logging. `RUST_LOG` takes precedence over both levels.

use std::io::Read;
use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};
use rdfhl_config::{Loader, RdfhlConfig};
use rdfhl_grammar::render::render;
use rdfhl_grammar::{OutputFormat, Registry};
use tracing_subscriber::EnvFilter;

/// Looked up in the working directory when no `--config` is given.
const LOCAL_CONFIG: &str = "rdfhl.toml";

fn main() {
    let matches = build_cli().get_matches();

    init_tracing(matches.get_flag("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let registry = Registry::from_config(&config.registry_config()).unwrap_or_else(|e| {
        eprintln!("Registry error: {}", e);
        std::process::exit(1);
    });

    let result = match matches.subcommand() {
        Some(("highlight", sub)) => handle_highlight_command(&registry, &config, sub),
        Some(("detect", sub)) => handle_detect_command(&registry, &config, sub),
        Some(("languages", _)) => {
            handle_languages_command(&registry);
            Ok(())
        }
        _ => Ok(()),
    };

    if let Err(message) = result {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("rdfhl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Syntax highlighting for Turtle, SPARQL and ShExC")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log registry and scanner activity to stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("highlight")
                .about("Highlight a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the input file, '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("lang")
                        .long("lang")
                        .short('l')
                        .help("Language name or alias (default: from the extension, else detected)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: html, json or tokens (default: from config)"),
                )
                .arg(
                    Arg::new("class-prefix")
                        .long("class-prefix")
                        .help("Prefix for HTML class names (default: from config)"),
                ),
        )
        .subcommand(
            Command::new("detect")
                .about("Rank candidate languages by relevance")
                .arg(
                    Arg::new("path")
                        .help("Path to the input file, '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the ranking as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("languages").about("List registered languages and their aliases"))
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("rdfhl_grammar=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

/// Defaults, then `rdfhl.toml` from the working directory or the `--config` file,
/// then the command-line overrides.
fn load_config(matches: &ArgMatches) -> Result<RdfhlConfig, rdfhl_config::ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    if let Some(("highlight", sub)) = matches.subcommand() {
        if let Some(format) = sub.get_one::<String>("format") {
            loader = loader.set_override("highlight.format", format.as_str())?;
        }
        if let Some(prefix) = sub.get_one::<String>("class-prefix") {
            loader = loader.set_override("highlight.class_prefix", prefix.as_str())?;
        }
    }
    let config = loader.build()?;
    tracing::debug!(languages = ?config.registry.languages, "configuration loaded");
    Ok(config)
}

fn read_input(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| format!("Error reading stdin: {}", e))?;
        return Ok(source);
    }
    std::fs::read_to_string(path).map_err(|e| format!("Error reading {}: {}", path, e))
}

/// Handle the highlight command
fn handle_highlight_command(
    registry: &Registry,
    config: &RdfhlConfig,
    matches: &ArgMatches,
) -> Result<(), String> {
    let path = matches
        .get_one::<String>("path")
        .ok_or("Missing input path")?;
    let source = read_input(path)?;

    let language = match matches.get_one::<String>("lang") {
        Some(lang) => registry
            .get(lang)
            .map_err(|e| format!("{} (available: {})", e, registry.list_languages().join(", ")))?
            .name
            .clone(),
        None => match language_for_path(registry, path) {
            Some(name) => name,
            None => best_detection(registry, config, &source)?,
        },
    };

    let highlight = registry
        .highlight(&source, &language)
        .map_err(|e| format!("Highlight error: {}", e))?;
    let format = config.output_format();
    let output = render(&highlight, format, &config.highlight.class_prefix)
        .map_err(|e| format!("Error formatting output: {}", e))?;

    print!("{}", output);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

/// Handle the detect command
fn handle_detect_command(
    registry: &Registry,
    config: &RdfhlConfig,
    matches: &ArgMatches,
) -> Result<(), String> {
    let path = matches
        .get_one::<String>("path")
        .ok_or("Missing input path")?;
    let source = read_input(path)?;

    let ranked = registry
        .detect_among(&source, &candidates(registry, config))
        .map_err(|e| format!("Detection error: {}", e))?;

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&ranked)
            .map_err(|e| format!("Error formatting output: {}", e))?;
        println!("{}", json);
    } else {
        for detection in &ranked {
            println!("{:<8} {}", detection.language, detection.relevance);
        }
    }

    match ranked.first() {
        Some(best) if best.relevance >= config.detect.min_relevance => Ok(()),
        _ => Err("No language detected".to_string()),
    }
}

/// Handle the languages command
fn handle_languages_command(registry: &Registry) {
    println!("Registered languages:\n");
    for language in registry.languages() {
        if language.aliases.is_empty() {
            println!("  {}", language.name);
        } else {
            println!("  {} ({})", language.name, language.aliases.join(", "));
        }
        println!("    {}", language.display_name);
        println!();
    }
}

/// Configured detection candidates that are actually registered.
fn candidates<'a>(registry: &Registry, config: &'a RdfhlConfig) -> Vec<&'a str> {
    config
        .detect
        .languages
        .iter()
        .map(String::as_str)
        .filter(|name| {
            let known = registry.has(name);
            if !known {
                tracing::warn!(language = %name, "detection candidate is not registered");
            }
            known
        })
        .collect()
}

fn best_detection(
    registry: &Registry,
    config: &RdfhlConfig,
    source: &str,
) -> Result<String, String> {
    let ranked = registry
        .detect_among(source, &candidates(registry, config))
        .map_err(|e| format!("Detection error: {}", e))?;
    match ranked.into_iter().next() {
        Some(best) if best.relevance >= config.detect.min_relevance => {
            tracing::debug!(language = %best.language, relevance = best.relevance, "detected");
            Ok(best.language)
        }
        _ => Err("Could not detect the language, pass --lang".to_string()),
    }
}

/// The language a file extension names, if any.
fn language_for_path(registry: &Registry, path: &str) -> Option<String> {
    let extension = Path::new(path).extension()?.to_str()?;
    let name = match extension {
        "shex" => "shexc",
        other => other,
    };
    registry.get(name).ok().map(|l| l.name.clone())
}
