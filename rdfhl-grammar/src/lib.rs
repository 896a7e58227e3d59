//! Highlighting grammars for Turtle, SPARQL and ShExC
//!
//!     Grammars here are data: ordered tables of rules, each one a begin pattern, an
//!     optional end pattern, nested rules and a classification. They are built once into
//!     a rule arena, registered by name, and then only read.
//!
//! Architecture
//!
//!     - Rule model: rules, their flags and the arena that owns them (mode.rs)
//!     - Grammars: one construction function per language (languages/)
//!     - Registry: names, aliases, lazy compilation, detection (registry.rs)
//!     - Scanner: a reference evaluator that runs a compiled grammar over text
//!       (compile.rs, scan.rs)
//!     - Output: the highlight tree and its renderings (highlight.rs, render.rs)
//!
//!     This is a pure lib: it powers the rdfhl CLI but assumes no shell environment.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── scope.rs            # classification tags
//!     ├── keywords.rs         # keyword tables with relevance
//!     ├── mode.rs             # rules and the rule arena
//!     ├── standard.rs         # shared comment/string/number rules
//!     ├── terminals.rs        # IRI and prefixed-name pattern fragments
//!     ├── language.rs
//!     ├── languages
//!     │   ├── json.rs
//!     │   ├── turtle.rs
//!     │   ├── sparql.rs       # built on turtle's exported rules
//!     │   └── shexc.rs        # self-contained, recursive
//!     ├── registry.rs
//!     ├── compile.rs
//!     ├── scan.rs
//!     ├── highlight.rs
//!     ├── render.rs
//!     └── testing.rs          # fluent assertions used by the tests
//!
//! Testing
//!
//!     Unit tests sit next to the code. Grammar behavior is tested end to end under
//!     tests/, one file per language, through the registry and [`testing::assert_highlight`].
//!
//! Dependency Order
//!
//!     terminals -> turtle -> sparql. ShExC and JSON stand alone. SPARQL takes Turtle's
//!     exported rules as a constructor argument, so the order is enforced by types, and
//!     the registry refuses to build SPARQL before Turtle.

pub mod compile;
pub mod error;
pub mod highlight;
pub mod keywords;
pub mod language;
pub mod languages;
pub mod mode;
pub mod registry;
pub mod render;
pub mod scan;
pub mod scope;
pub mod standard;
pub mod terminals;
pub mod testing;

pub use error::GrammarError;
pub use highlight::{Highlight, Node, Token};
pub use language::Language;
pub use mode::{Begin, End, Mode, ModeArena, ModeId};
pub use registry::{Detection, Registry, RegistryConfig};
pub use render::OutputFormat;
pub use scope::Scope;
