//! Pokedex library entry points.
//!
//! This crate flattens evolution-chain trees into displayable paths, folds
//! type damage relations into a defensive matchup table, and fetches the
//! PokeAPI data both algorithms need. Higher-level consumers (the CLI) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod api;
pub mod cache;
pub mod error;
pub mod evolution;
pub mod matchup;
pub mod output;
pub mod pokemon;
pub mod resource;
pub mod trigger;
pub mod types;

pub use api::{
    ApiConfig, ConfiguredSource, CreatureEvolution, CreatureMatchups, HttpSource, LocalSource,
    PokeApi, ResourceSource, API_SOURCE_ENV, DEFAULT_API_BASE,
};
pub use cache::{default_cache_dir, ResponseCache, DEFAULT_CACHE_TTL};
pub use error::{Error, Result};
pub use evolution::{
    build_paths, renderable_chains, EvolutionChain, EvolutionDetail, EvolutionNode, EvolutionStage,
};
pub use matchup::{compute_matchups, DamageMap, MatchupTable, MatchupTier, TypeRelations};
pub use output::{display_name, EvolutionSummary, MatchupSummary, PokemonSummary};
pub use pokemon::{Pokemon, PokemonSpecies};
pub use resource::{resource_id, NamedResource};
pub use trigger::{format_trigger, format_triggers};
pub use types::TypeName;
