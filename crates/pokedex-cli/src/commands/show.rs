//! Show command handler.

use anyhow::{Context, Result};

use pokedex_lib::{PokeApi, PokemonSummary, ResourceSource};

use crate::output::OutputFormat;

/// Print types, size, base stats and flavor text of a creature.
pub fn handle_show<S: ResourceSource>(
    api: &PokeApi<S>,
    pokemon: &str,
    format: OutputFormat,
) -> Result<()> {
    let details = api
        .fetch_pokemon(pokemon)
        .with_context(|| format!("failed to load '{pokemon}'"))?;
    let species = api
        .fetch_species(&details)
        .with_context(|| format!("failed to load the species of '{}'", details.name))?;
    format.render_pokemon(&PokemonSummary::new(&details, Some(&species)))
}
