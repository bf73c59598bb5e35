use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Reference to another API resource, as PokeAPI embeds them everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Numeric id of the referenced resource.
    pub fn id(&self) -> Result<u32> {
        resource_id(&self.url)
    }

    /// Name with dashes replaced by spaces (`fire-stone` -> `fire stone`).
    pub fn spaced_name(&self) -> String {
        self.name.replace('-', " ")
    }
}

/// Extract the numeric id from a canonical resource URL.
///
/// Canonical URLs end with a slash, so the id is the second-to-last segment:
/// `https://pokeapi.co/api/v2/pokemon-species/133/` yields `133`.
pub fn resource_id(url: &str) -> Result<u32> {
    let malformed = || Error::MalformedResourceUrl {
        url: url.to_string(),
    };

    let mut segments = url.rsplit('/');
    let _trailing = segments.next().ok_or_else(malformed)?;
    segments
        .next()
        .filter(|segment| !segment.is_empty())
        .and_then(|segment| segment.parse::<u32>().ok())
        .ok_or_else(malformed)
}
