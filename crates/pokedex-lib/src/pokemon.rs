//! Creature detail and species records.
//!
//! Only the fields the library consumes are modelled; serde ignores the rest
//! of the (large) PokeAPI payloads.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resource::NamedResource;
use crate::types::TypeName;

/// Body of a `pokemon/{name or id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Height in decimetres.
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight: u32,
    pub species: NamedResource,
    #[serde(default)]
    pub types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonTypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

impl Pokemon {
    /// Type references ordered by slot.
    pub fn type_refs(&self) -> Vec<&NamedResource> {
        let mut slots: Vec<&PokemonTypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots.into_iter().map(|slot| &slot.type_ref).collect()
    }

    /// Parsed types ordered by slot.
    pub fn type_names(&self) -> Result<Vec<TypeName>> {
        self.type_refs()
            .into_iter()
            .map(|type_ref| TypeName::parse(&type_ref.name))
            .collect()
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Sum of all base stats.
    pub fn base_stat_total(&self) -> u32 {
        self.stats.iter().map(|stat| stat.base_stat).sum()
    }
}

/// Body of a `pokemon-species/{id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonSpecies {
    pub id: u32,
    pub name: String,
    pub evolution_chain: Option<ApiLink>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

/// Unnamed resource reference (`{ "url": ... }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLink {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
    #[serde(default)]
    pub version: Option<NamedResource>,
}

impl PokemonSpecies {
    /// First flavor text in `language`, with line breaks and form feeds collapsed.
    pub fn flavor_text(&self, language: &str) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| normalize_flavor_text(&entry.flavor_text))
    }
}

fn normalize_flavor_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
