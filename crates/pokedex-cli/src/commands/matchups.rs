//! Matchups command handler.

use anyhow::{Context, Result};

use pokedex_lib::{MatchupSummary, PokeApi, ResourceSource};

use crate::output::OutputFormat;

/// Print the defensive type matchup table of a creature.
pub fn handle_matchups<S: ResourceSource>(
    api: &PokeApi<S>,
    pokemon: &str,
    format: OutputFormat,
) -> Result<()> {
    let matchups = api
        .matchups_for(pokemon)
        .with_context(|| format!("failed to compute type matchups for '{pokemon}'"))?;
    format.render_matchups(&MatchupSummary::from(&matchups))
}
