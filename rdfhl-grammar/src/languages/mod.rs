//! The grammars
//!
//!     Each grammar is a construction function over a [`crate::mode::ModeArena`]:
//!
//!         json::define(arena)                 -> Language
//!         turtle::define(arena)               -> (Language, TurtleExports)
//!         sparql::define(arena, &exports)     -> Language
//!         shexc::define(arena, &options)      -> Result<Language, GrammarError>
//!
//!     SPARQL is the only grammar with a prerequisite, and it takes it as an argument.
//!     [`crate::registry::Registry`] wires the calls together in dependency order.

pub mod json;
pub mod shexc;
pub mod sparql;
pub mod turtle;
