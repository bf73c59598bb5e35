//! Evolution command handler.

use anyhow::{Context, Result};

use pokedex_lib::{EvolutionSummary, PokeApi, ResourceSource};

use crate::output::OutputFormat;

/// Print every renderable evolution chain of the creature's family.
pub fn handle_evolution<S: ResourceSource>(
    api: &PokeApi<S>,
    pokemon: &str,
    format: OutputFormat,
) -> Result<()> {
    let evolution = api
        .evolution_chains_for(pokemon)
        .with_context(|| format!("failed to load the evolution family of '{pokemon}'"))?;
    format.render_evolution(&EvolutionSummary::from(&evolution))
}
