//! Evolution-chain trees and their flattening into linear paths.
//!
//! PokeAPI describes a family as a tree rooted at the base species. Each node
//! lists the conditions for evolving *into* it and the species it can evolve
//! into next. [`build_paths`] turns the tree into one [`EvolutionChain`] per
//! leaf so a family like Eevee's renders as parallel rows.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resource::{resource_id, NamedResource};

/// Body of an `evolution-chain/{id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChainResponse {
    pub id: u32,
    pub chain: EvolutionNode,
}

/// One species within an evolution-chain tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvolutionNode {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<EvolutionNode>,
    #[serde(default)]
    pub is_baby: bool,
}

impl EvolutionNode {
    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        if self.evolves_to.is_empty() {
            1
        } else {
            self.evolves_to.iter().map(EvolutionNode::leaf_count).sum()
        }
    }
}

/// Conditions for a single way of evolving into a species.
///
/// Every field is optional in the wire format; absent and `null` values both
/// deserialize to the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionDetail {
    pub min_level: Option<u32>,
    pub item: Option<NamedResource>,
    pub trigger: Option<NamedResource>,
    pub min_happiness: Option<u32>,
    pub min_affection: Option<u32>,
    pub min_beauty: Option<u32>,
    pub held_item: Option<NamedResource>,
    pub known_move: Option<NamedResource>,
    pub known_move_type: Option<NamedResource>,
    pub location: Option<NamedResource>,
    pub time_of_day: Option<String>,
    #[serde(deserialize_with = "null_as_false")]
    pub needs_overworld_rain: bool,
    pub relative_physical_stats: Option<i32>,
    pub gender: Option<u8>,
    pub party_species: Option<NamedResource>,
    pub party_type: Option<NamedResource>,
    pub trade_species: Option<NamedResource>,
    #[serde(deserialize_with = "null_as_false")]
    pub turn_upside_down: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// A species placed at a specific position of an evolution path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionStage {
    pub id: u32,
    pub name: String,
    pub url: String,
    /// Conditions for evolving into this stage; `None` for the base species.
    pub evolution_details: Option<Vec<EvolutionDetail>>,
}

impl EvolutionStage {
    fn from_node(node: &EvolutionNode) -> Result<Self> {
        let id = resource_id(&node.species.url)?;
        let evolution_details = if node.evolution_details.is_empty() {
            None
        } else {
            Some(node.evolution_details.clone())
        };
        Ok(Self {
            id,
            name: node.species.name.clone(),
            url: node.species.url.clone(),
            evolution_details,
        })
    }

    /// Details for this stage, empty for the base species.
    pub fn details(&self) -> &[EvolutionDetail] {
        self.evolution_details.as_deref().unwrap_or(&[])
    }
}

/// Ordered stages from the family root to one leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EvolutionChain {
    stages: Vec<EvolutionStage>,
}

impl EvolutionChain {
    pub fn stages(&self) -> &[EvolutionStage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn first(&self) -> Option<&EvolutionStage> {
        self.stages.first()
    }

    pub fn last(&self) -> Option<&EvolutionStage> {
        self.stages.last()
    }

    /// A chain is only worth displaying when an actual evolution exists.
    pub fn is_renderable(&self) -> bool {
        self.stages.len() > 1
    }

    /// Whether the chain passes through the species with `id`.
    pub fn contains(&self, id: u32) -> bool {
        self.stages.iter().any(|stage| stage.id == id)
    }
}

/// Flatten an evolution tree into one chain per leaf.
///
/// Chains share the stages of their common prefix and are emitted in
/// depth-first, child order. A root without children yields a single chain of
/// length one. Any node whose species URL has no numeric id aborts the whole
/// traversal.
pub fn build_paths(root: &EvolutionNode) -> Result<Vec<EvolutionChain>> {
    let mut chains = Vec::with_capacity(root.leaf_count());
    let mut path = Vec::new();
    walk(root, &mut path, &mut chains)?;
    Ok(chains)
}

fn walk(
    node: &EvolutionNode,
    path: &mut Vec<EvolutionStage>,
    chains: &mut Vec<EvolutionChain>,
) -> Result<()> {
    path.push(EvolutionStage::from_node(node)?);

    if node.evolves_to.is_empty() {
        chains.push(EvolutionChain {
            stages: path.clone(),
        });
    } else {
        for child in &node.evolves_to {
            walk(child, path, chains)?;
        }
    }

    path.pop();
    Ok(())
}

/// Keep only chains that describe an actual evolution.
pub fn renderable_chains(chains: &[EvolutionChain]) -> Vec<&EvolutionChain> {
    chains
        .iter()
        .filter(|chain| chain.is_renderable())
        .collect()
}
