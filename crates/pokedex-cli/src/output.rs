//! Output formatting for command results.
//!
//! Text output reuses the plain renderers from `pokedex_lib::output`; the
//! matchup table additionally gets tier and type colors when stdout is a
//! capable terminal. JSON output serializes the same summaries.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use pokedex_lib::{display_name, EvolutionSummary, MatchupSummary, PokemonSummary};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// Result of the `cache-clear` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CacheClearOutput {
    pub cache_dir: String,
    pub removed: usize,
}

impl CacheClearOutput {
    pub fn render_plain(&self) -> String {
        match self.removed {
            0 => format!("No cached responses in {}\n", self.cache_dir),
            1 => format!("Removed 1 cached response from {}\n", self.cache_dir),
            n => format!("Removed {n} cached responses from {}\n", self.cache_dir),
        }
    }
}

impl OutputFormat {
    pub fn render_evolution(self, summary: &EvolutionSummary) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", summary.render_plain()),
            OutputFormat::Json => print_json(summary)?,
        }
        Ok(())
    }

    pub fn render_matchups(self, summary: &MatchupSummary) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", styled_matchups(summary, &ColorPalette::detect())),
            OutputFormat::Json => print_json(summary)?,
        }
        Ok(())
    }

    pub fn render_pokemon(self, summary: &PokemonSummary) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", summary.render_plain()),
            OutputFormat::Json => print_json(summary)?,
        }
        Ok(())
    }

    pub fn render_cache_clear(self, output: &CacheClearOutput) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", output.render_plain()),
            OutputFormat::Json => print_json(output)?,
        }
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Matchup table text with tier labels and type names colored.
///
/// With a plain palette this is identical to
/// [`MatchupSummary::render_plain`].
pub fn styled_matchups(summary: &MatchupSummary, palette: &ColorPalette) -> String {
    if !palette.is_colored() {
        return summary.render_plain();
    }

    let mut buffer = String::new();
    let types = summary
        .types
        .iter()
        .map(|ty| palette.type_name(*ty))
        .collect::<Vec<_>>()
        .join("/");
    let _ = writeln!(
        buffer,
        "Type matchups for {}{}{} ({}):",
        palette.bold,
        display_name(&summary.pokemon.name),
        palette.reset,
        types
    );
    if summary.tiers.is_empty() {
        let _ = writeln!(buffer, "  no types to evaluate");
        return buffer;
    }
    for (tier, members) in summary.tiers.iter() {
        let members = members
            .iter()
            .map(|ty| palette.type_name(*ty))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            buffer,
            "  {}{}{} {}({}){}: {}",
            palette.tier(tier),
            tier.label(),
            palette.reset,
            palette.gray,
            tier.factor_label(),
            palette.reset,
            members
        );
    }
    buffer
}
