//! The closed set of elemental types.
//!
//! PokeAPI identifies types by lowercase name. Names are parsed into
//! [`TypeName`] at the deserialization boundary so the rest of the crate never
//! handles an unknown type key.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Number of elemental types known to the catalog.
pub const TYPE_COUNT: usize = 18;

/// One of the 18 elemental types.
///
/// Declaration order is the display order used when listing types, and is
/// also the `Ord` used by sorted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeName {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Steel,
    Dark,
    Fairy,
}

impl TypeName {
    /// All types in display order.
    pub const ALL: [TypeName; TYPE_COUNT] = [
        TypeName::Normal,
        TypeName::Fire,
        TypeName::Water,
        TypeName::Electric,
        TypeName::Grass,
        TypeName::Ice,
        TypeName::Fighting,
        TypeName::Poison,
        TypeName::Ground,
        TypeName::Flying,
        TypeName::Psychic,
        TypeName::Bug,
        TypeName::Rock,
        TypeName::Ghost,
        TypeName::Dragon,
        TypeName::Steel,
        TypeName::Dark,
        TypeName::Fairy,
    ];

    /// Lowercase API name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::Normal => "normal",
            TypeName::Fire => "fire",
            TypeName::Water => "water",
            TypeName::Electric => "electric",
            TypeName::Grass => "grass",
            TypeName::Ice => "ice",
            TypeName::Fighting => "fighting",
            TypeName::Poison => "poison",
            TypeName::Ground => "ground",
            TypeName::Flying => "flying",
            TypeName::Psychic => "psychic",
            TypeName::Bug => "bug",
            TypeName::Rock => "rock",
            TypeName::Ghost => "ghost",
            TypeName::Dragon => "dragon",
            TypeName::Steel => "steel",
            TypeName::Dark => "dark",
            TypeName::Fairy => "fairy",
        }
    }

    /// Position of the type within [`TypeName::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse an API type name, attaching close matches to the error.
    pub fn parse(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        TypeName::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == normalized)
            .ok_or_else(|| Error::UnknownType {
                name: name.to_string(),
                suggestions: suggest(&normalized, 3),
            })
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TypeName::parse(s)
    }
}

fn suggest(name: &str, limit: usize) -> Vec<String> {
    let mut scored: Vec<(f64, &'static str)> = TypeName::ALL
        .iter()
        .map(|candidate| {
            let label = candidate.as_str();
            (strsim::jaro_winkler(name, label), label)
        })
        .filter(|(score, _)| *score >= 0.8)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, label)| label.to_string())
        .collect()
}
