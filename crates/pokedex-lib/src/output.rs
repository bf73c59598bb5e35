use std::fmt::Write;

use serde::Serialize;

use crate::api::{CreatureEvolution, CreatureMatchups};
use crate::evolution::{renderable_chains, EvolutionChain};
use crate::matchup::MatchupTable;
use crate::pokemon::{Pokemon, PokemonSpecies};
use crate::trigger::format_triggers;
use crate::types::TypeName;

/// Language used for flavor text.
pub const FLAVOR_TEXT_LANGUAGE: &str = "en";

/// Capitalise the first letter of an API name (`bulbasaur` -> `Bulbasaur`).
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Creature identity shared by every summary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatureRef {
    pub id: u32,
    pub name: String,
}

impl From<&Pokemon> for CreatureRef {
    fn from(pokemon: &Pokemon) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name.clone(),
        }
    }
}

/// One stage of a rendered evolution chain.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StageView {
    pub id: u32,
    pub name: String,
    /// Formatted conditions for evolving into this stage.
    pub triggers: Vec<String>,
}

/// Evolution chains worth displaying for a creature.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EvolutionSummary {
    pub pokemon: CreatureRef,
    pub chains: Vec<Vec<StageView>>,
}

impl EvolutionSummary {
    pub fn new(pokemon: &Pokemon, chains: &[EvolutionChain]) -> Self {
        let chains = renderable_chains(chains)
            .into_iter()
            .map(|chain| {
                chain
                    .stages()
                    .iter()
                    .map(|stage| StageView {
                        id: stage.id,
                        name: stage.name.clone(),
                        triggers: format_triggers(stage.details()),
                    })
                    .collect()
            })
            .collect();
        Self {
            pokemon: pokemon.into(),
            chains,
        }
    }

    pub fn evolves(&self) -> bool {
        !self.chains.is_empty()
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let name = display_name(&self.pokemon.name);
        if !self.evolves() {
            let _ = writeln!(buffer, "{name} does not evolve.");
            return buffer;
        }

        let _ = writeln!(buffer, "Evolution chains for {name}:");
        for chain in &self.chains {
            let line = chain
                .iter()
                .enumerate()
                .map(|(index, stage)| {
                    let label = format!("{} (#{})", display_name(&stage.name), stage.id);
                    if index == 0 || stage.triggers.is_empty() {
                        label
                    } else {
                        format!("[{}] {}", stage.triggers.join(" / "), label)
                    }
                })
                .collect::<Vec<_>>()
                .join(" -> ");
            let _ = writeln!(buffer, "  {line}");
        }
        buffer
    }
}

impl From<&CreatureEvolution> for EvolutionSummary {
    fn from(value: &CreatureEvolution) -> Self {
        EvolutionSummary::new(&value.pokemon, &value.chains)
    }
}

/// Defensive matchup table for a creature.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MatchupSummary {
    pub pokemon: CreatureRef,
    pub types: Vec<TypeName>,
    pub tiers: MatchupTable,
}

impl MatchupSummary {
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Type matchups for {} ({}):",
            display_name(&self.pokemon.name),
            join_types(&self.types, "/")
        );
        if self.tiers.is_empty() {
            let _ = writeln!(buffer, "  no types to evaluate");
            return buffer;
        }
        for (tier, members) in self.tiers.iter() {
            let _ = writeln!(
                buffer,
                "  {} ({}): {}",
                tier.label(),
                tier.factor_label(),
                join_types(members, ", ")
            );
        }
        buffer
    }
}

impl From<&CreatureMatchups> for MatchupSummary {
    fn from(value: &CreatureMatchups) -> Self {
        Self {
            pokemon: (&value.pokemon).into(),
            types: value.types.clone(),
            tiers: value.table.clone(),
        }
    }
}

/// Named base stat.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatView {
    pub name: String,
    pub base: u32,
}

/// Detail view of a creature.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PokemonSummary {
    pub pokemon: CreatureRef,
    pub types: Vec<String>,
    pub height_m: f64,
    pub weight_kg: f64,
    pub stats: Vec<StatView>,
    pub base_stat_total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,
}

impl PokemonSummary {
    pub fn new(pokemon: &Pokemon, species: Option<&PokemonSpecies>) -> Self {
        Self {
            pokemon: pokemon.into(),
            types: pokemon
                .type_refs()
                .into_iter()
                .map(|type_ref| type_ref.name.clone())
                .collect(),
            height_m: pokemon.height_m(),
            weight_kg: pokemon.weight_kg(),
            stats: pokemon
                .stats
                .iter()
                .map(|stat| StatView {
                    name: stat.stat.name.clone(),
                    base: stat.base_stat,
                })
                .collect(),
            base_stat_total: pokemon.base_stat_total(),
            flavor_text: species.and_then(|s| s.flavor_text(FLAVOR_TEXT_LANGUAGE)),
        }
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "#{:03} {}",
            self.pokemon.id,
            display_name(&self.pokemon.name)
        );
        let _ = writeln!(buffer, "Types:  {}", self.types.join("/"));
        let _ = writeln!(
            buffer,
            "Height: {:.1} m  Weight: {:.1} kg",
            self.height_m, self.weight_kg
        );
        if !self.stats.is_empty() {
            let _ = writeln!(buffer, "Base stats:");
            for stat in &self.stats {
                let _ = writeln!(buffer, "  {:<16} {:>3}", stat.name, stat.base);
            }
            let _ = writeln!(buffer, "  {:<16} {:>3}", "total", self.base_stat_total);
        }
        if let Some(text) = &self.flavor_text {
            let _ = writeln!(buffer, "{text}");
        }
        buffer
    }
}

fn join_types(types: &[TypeName], separator: &str) -> String {
    types
        .iter()
        .map(|ty| ty.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_capitalises_first_letter() {
        assert_eq!(display_name("bulbasaur"), "Bulbasaur");
        assert_eq!(display_name("mr-mime"), "Mr-mime");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn non_evolving_summary_says_so() {
        let summary = EvolutionSummary {
            pokemon: CreatureRef {
                id: 128,
                name: "tauros".to_string(),
            },
            chains: Vec::new(),
        };
        assert_eq!(summary.render_plain(), "Tauros does not evolve.\n");
    }

    #[test]
    fn chain_line_annotates_transitions() {
        let stage = |id, name: &str, triggers: &[&str]| StageView {
            id,
            name: name.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
        };
        let summary = EvolutionSummary {
            pokemon: CreatureRef {
                id: 1,
                name: "bulbasaur".to_string(),
            },
            chains: vec![vec![
                stage(1, "bulbasaur", &[]),
                stage(2, "ivysaur", &["Lvl 16"]),
                stage(3, "venusaur", &["Lvl 32"]),
            ]],
        };
        assert_eq!(
            summary.render_plain(),
            "Evolution chains for Bulbasaur:\n  Bulbasaur (#1) -> [Lvl 16] Ivysaur (#2) -> [Lvl 32] Venusaur (#3)\n"
        );
    }
}
