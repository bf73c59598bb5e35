use std::path::PathBuf;

use thiserror::Error;

use crate::types::TypeName;

/// Convenient result alias for the Pokedex library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A resource URL did not carry a numeric id in its second-to-last segment.
    #[error("malformed resource url: {url:?}")]
    MalformedResourceUrl { url: String },

    /// Raised when a type name is not one of the 18 known elemental types.
    #[error("unknown type name: {name}{}", format_suggestions(.suggestions))]
    UnknownType {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a creature carries more than two distinct types.
    #[error("a creature has at most two types, got {count}")]
    TooManyTypes { count: usize },

    /// Raised when the damage relations for one of the creature's types are missing.
    #[error("damage relations for type {type_name} are unavailable")]
    MissingTypeRelations { type_name: TypeName },

    /// Raised when a folded multiplier does not map onto a matchup tier.
    #[error("multiplier {multiplier} for attacking type {attacking} does not match any tier")]
    UnclassifiedMultiplier {
        attacking: TypeName,
        multiplier: f64,
    },

    /// Raised when the API (or local source) has no resource at the given URL.
    #[error("resource not found: {url}")]
    ResourceNotFound { url: String },

    /// No suitable cache directory could be resolved for storing responses.
    #[error("failed to resolve cache directories for api responses")]
    CacheDirsUnavailable,

    /// Raised when the local source root does not exist.
    #[error("local api source not found at {path}")]
    LocalSourceMissing { path: PathBuf },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_lists_single_suggestion() {
        let err = Error::UnknownType {
            name: "fier".to_string(),
            suggestions: vec!["fire".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown type name: fier. Did you mean 'fire'?"
        );
    }

    #[test]
    fn unknown_type_without_suggestions_is_bare() {
        let err = Error::UnknownType {
            name: "stellar".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown type name: stellar");
    }
}
