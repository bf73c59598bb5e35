//! Defensive type matchups.
//!
//! A creature's one or two types each contribute damage relations. Folding
//! them multiplicatively over the 18 attacking types gives the effective
//! damage multiplier, which is then bucketed into [`MatchupTier`]s.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resource::NamedResource;
use crate::types::{TypeName, TYPE_COUNT};

/// Maximum number of types a creature can carry.
pub const MAX_CREATURE_TYPES: usize = 2;

/// Attacking types that deal modified damage to one defending type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeRelations {
    pub double_damage_from: BTreeSet<TypeName>,
    pub half_damage_from: BTreeSet<TypeName>,
    pub no_damage_from: BTreeSet<TypeName>,
}

impl TypeRelations {
    /// Convert the wire representation, rejecting unknown type names.
    pub fn from_wire(wire: &DamageRelationsWire) -> Result<Self> {
        Ok(Self {
            double_damage_from: parse_set(&wire.double_damage_from)?,
            half_damage_from: parse_set(&wire.half_damage_from)?,
            no_damage_from: parse_set(&wire.no_damage_from)?,
        })
    }
}

fn parse_set(resources: &[NamedResource]) -> Result<BTreeSet<TypeName>> {
    resources
        .iter()
        .map(|resource| TypeName::parse(&resource.name))
        .collect()
}

/// `damage_relations` object of a `type/{id}` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DamageRelationsWire {
    pub double_damage_from: Vec<NamedResource>,
    pub half_damage_from: Vec<NamedResource>,
    pub no_damage_from: Vec<NamedResource>,
    pub double_damage_to: Vec<NamedResource>,
    pub half_damage_to: Vec<NamedResource>,
    pub no_damage_to: Vec<NamedResource>,
}

/// Body of a `type/{id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeResponse {
    pub id: u32,
    pub name: String,
    pub damage_relations: DamageRelationsWire,
}

/// Bucket of damage multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchupTier {
    SuperWeak,
    Weak,
    Normal,
    Resistant,
    SuperResistant,
    Immune,
}

impl MatchupTier {
    pub const ALL: [MatchupTier; 6] = [
        MatchupTier::SuperWeak,
        MatchupTier::Weak,
        MatchupTier::Normal,
        MatchupTier::Resistant,
        MatchupTier::SuperResistant,
        MatchupTier::Immune,
    ];

    /// Multiplier represented by the tier.
    pub fn multiplier(self) -> f64 {
        match self {
            MatchupTier::SuperWeak => 4.0,
            MatchupTier::Weak => 2.0,
            MatchupTier::Normal => 1.0,
            MatchupTier::Resistant => 0.5,
            MatchupTier::SuperResistant => 0.25,
            MatchupTier::Immune => 0.0,
        }
    }

    /// Tier for an exact multiplier.
    ///
    /// Products of 2, 0.5 and 0 are exact in binary floating point, so exact
    /// comparison is sound for every reachable value.
    pub fn from_multiplier(multiplier: f64) -> Option<Self> {
        MatchupTier::ALL
            .into_iter()
            .find(|tier| tier.multiplier() == multiplier)
    }

    /// Label shown in text output.
    pub fn label(self) -> &'static str {
        match self {
            MatchupTier::SuperWeak => "Super weak",
            MatchupTier::Weak => "Weak",
            MatchupTier::Normal => "Normal",
            MatchupTier::Resistant => "Resistant",
            MatchupTier::SuperResistant => "Super resistant",
            MatchupTier::Immune => "Immune",
        }
    }

    /// Short multiplier notation such as `x2` or `x0.25`.
    pub fn factor_label(self) -> &'static str {
        match self {
            MatchupTier::SuperWeak => "x4",
            MatchupTier::Weak => "x2",
            MatchupTier::Normal => "x1",
            MatchupTier::Resistant => "x0.5",
            MatchupTier::SuperResistant => "x0.25",
            MatchupTier::Immune => "x0",
        }
    }
}

impl fmt::Display for MatchupTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Effective damage multiplier per attacking type.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageMap {
    multipliers: [f64; TYPE_COUNT],
}

impl Default for DamageMap {
    fn default() -> Self {
        Self {
            multipliers: [1.0; TYPE_COUNT],
        }
    }
}

impl DamageMap {
    /// Fold the relations of each creature type into a fresh map.
    ///
    /// Repeated creature types are applied once. Fails when more than two
    /// distinct types are given or when relations for one of them are missing.
    pub fn compute(
        creature_types: &[TypeName],
        relations: &HashMap<TypeName, TypeRelations>,
    ) -> Result<Self> {
        let distinct = distinct_types(creature_types);
        if distinct.len() > MAX_CREATURE_TYPES {
            return Err(Error::TooManyTypes {
                count: distinct.len(),
            });
        }

        let mut map = DamageMap::default();
        for type_name in distinct {
            let relation = relations
                .get(&type_name)
                .ok_or(Error::MissingTypeRelations { type_name })?;
            map.apply(relation);
        }
        Ok(map)
    }

    fn apply(&mut self, relations: &TypeRelations) {
        for attacking in &relations.double_damage_from {
            self.multipliers[attacking.index()] *= 2.0;
        }
        for attacking in &relations.half_damage_from {
            self.multipliers[attacking.index()] *= 0.5;
        }
        for attacking in &relations.no_damage_from {
            self.multipliers[attacking.index()] *= 0.0;
        }
    }

    pub fn multiplier(&self, attacking: TypeName) -> f64 {
        self.multipliers[attacking.index()]
    }

    /// `(attacking type, multiplier)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeName, f64)> + '_ {
        TypeName::ALL
            .into_iter()
            .map(move |ty| (ty, self.multipliers[ty.index()]))
    }
}

/// Attacking types grouped by tier; empty tiers are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchupTable {
    tiers: BTreeMap<MatchupTier, Vec<TypeName>>,
}

impl MatchupTable {
    /// Partition all 18 types of `map` into tiers.
    pub fn from_damage_map(map: &DamageMap) -> Result<Self> {
        let mut tiers: BTreeMap<MatchupTier, Vec<TypeName>> = BTreeMap::new();
        for (attacking, multiplier) in map.iter() {
            let tier =
                MatchupTier::from_multiplier(multiplier).ok_or(Error::UnclassifiedMultiplier {
                    attacking,
                    multiplier,
                })?;
            tiers.entry(tier).or_default().push(attacking);
        }
        Ok(Self { tiers })
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Types in `tier`, empty when the tier has no members.
    pub fn get(&self, tier: MatchupTier) -> &[TypeName] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tier holding `attacking`, if the table is non-empty.
    pub fn tier_of(&self, attacking: TypeName) -> Option<MatchupTier> {
        self.tiers
            .iter()
            .find(|(_, members)| members.contains(&attacking))
            .map(|(tier, _)| *tier)
    }

    /// Non-empty tiers, strongest weakness first.
    pub fn iter(&self) -> impl Iterator<Item = (MatchupTier, &[TypeName])> {
        self.tiers
            .iter()
            .map(|(tier, members)| (*tier, members.as_slice()))
    }

    /// Total number of types across all tiers.
    pub fn type_count(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }
}

/// Compute the defensive matchup table for a creature.
///
/// An empty type list has nothing to compute and returns an empty table.
pub fn compute_matchups(
    creature_types: &[TypeName],
    relations: &HashMap<TypeName, TypeRelations>,
) -> Result<MatchupTable> {
    if creature_types.is_empty() {
        return Ok(MatchupTable::default());
    }
    let map = DamageMap::compute(creature_types, relations)?;
    MatchupTable::from_damage_map(&map)
}

fn distinct_types(types: &[TypeName]) -> Vec<TypeName> {
    let mut distinct = Vec::with_capacity(types.len());
    for ty in types {
        if !distinct.contains(ty) {
            distinct.push(*ty);
        }
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use TypeName::*;

    fn relations(double: &[TypeName], half: &[TypeName], none: &[TypeName]) -> TypeRelations {
        TypeRelations {
            double_damage_from: double.iter().copied().collect(),
            half_damage_from: half.iter().copied().collect(),
            no_damage_from: none.iter().copied().collect(),
        }
    }

    fn ghost() -> TypeRelations {
        relations(&[Ghost, Dark], &[Poison, Bug], &[Normal, Fighting])
    }

    #[test]
    fn tiers_round_trip_their_multiplier() {
        for tier in MatchupTier::ALL {
            assert_eq!(MatchupTier::from_multiplier(tier.multiplier()), Some(tier));
        }
        assert_eq!(MatchupTier::from_multiplier(8.0), None);
    }

    #[test]
    fn empty_type_list_yields_empty_table() {
        let table = compute_matchups(&[], &HashMap::new()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn single_type_stays_within_single_factor_values() {
        let lookup = HashMap::from([(Ghost, ghost())]);
        let map = DamageMap::compute(&[Ghost], &lookup).unwrap();
        for (_, multiplier) in map.iter() {
            assert!([2.0, 1.0, 0.5, 0.0].contains(&multiplier));
        }
        assert_eq!(map.multiplier(Normal), 0.0);
        assert_eq!(map.multiplier(Dark), 2.0);
        assert_eq!(map.multiplier(Bug), 0.5);
        assert_eq!(map.multiplier(Fire), 1.0);
    }

    #[test]
    fn shared_weakness_compounds_to_super_weak() {
        let lookup = HashMap::from([
            (Grass, relations(&[Fire], &[], &[])),
            (Bug, relations(&[Fire], &[], &[])),
        ]);
        let table = compute_matchups(&[Grass, Bug], &lookup).unwrap();
        assert_eq!(table.get(MatchupTier::SuperWeak), &[Fire]);
    }

    #[test]
    fn immunity_dominates_weakness() {
        let lookup = HashMap::from([
            (Ghost, ghost()),
            (Normal, relations(&[Fighting], &[], &[Ghost])),
        ]);
        let table = compute_matchups(&[Normal, Ghost], &lookup).unwrap();
        assert_eq!(table.tier_of(Fighting), Some(MatchupTier::Immune));
        assert_eq!(table.tier_of(Ghost), Some(MatchupTier::Immune));
        assert_eq!(table.tier_of(Normal), Some(MatchupTier::Immune));
    }

    #[test]
    fn repeated_creature_type_applies_once() {
        let lookup = HashMap::from([(Ghost, ghost())]);
        let table = compute_matchups(&[Ghost, Ghost], &lookup).unwrap();
        assert!(table.get(MatchupTier::SuperWeak).is_empty());
        assert_eq!(table.get(MatchupTier::Weak), &[Ghost, Dark]);
    }

    #[test]
    fn three_types_are_rejected() {
        let err = compute_matchups(&[Fire, Water, Grass], &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::TooManyTypes { count: 3 }));
    }

    #[test]
    fn missing_relations_fail_instead_of_partial_table() {
        let lookup = HashMap::from([(Ghost, ghost())]);
        let err = compute_matchups(&[Ghost, Poison], &lookup).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingTypeRelations { type_name: Poison }
        ));
    }

    #[test]
    fn every_type_lands_in_exactly_one_tier() {
        let lookup = HashMap::from([
            (Ghost, ghost()),
            (
                Steel,
                relations(
                    &[Fire, Fighting, Ground],
                    &[
                        Normal, Flying, Rock, Bug, Steel, Grass, Psychic, Ice, Dragon, Fairy,
                    ],
                    &[Poison],
                ),
            ),
        ]);
        let table = compute_matchups(&[Steel, Ghost], &lookup).unwrap();
        assert_eq!(table.type_count(), TYPE_COUNT);
        for ty in TypeName::ALL {
            let hits = table
                .iter()
                .filter(|(_, members)| members.contains(&ty))
                .count();
            assert_eq!(hits, 1, "{ty} should appear exactly once");
        }
    }

    #[test]
    fn wire_relations_reject_unknown_names() {
        let wire = DamageRelationsWire {
            double_damage_from: vec![NamedResource::new(
                "shadow",
                "https://pokeapi.co/api/v2/type/10002/",
            )],
            ..DamageRelationsWire::default()
        };
        assert!(matches!(
            TypeRelations::from_wire(&wire),
            Err(Error::UnknownType { .. })
        ));
    }
}
