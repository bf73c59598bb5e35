//! Pokedex CLI library.
//!
//! Command handlers, global flags, output formatting and terminal styling
//! for the `pokedex` binary.

pub mod commands;
pub mod options;
pub mod output;
pub mod terminal;
