//! PokeAPI access.
//!
//! [`PokeApi`] is a typed facade over a [`ResourceSource`], which only knows
//! how to turn a URL into a response body. [`HttpSource`] talks to the real
//! API through the on-disk [`ResponseCache`]; [`LocalSource`] reads responses
//! from a directory laid out like the API, which tests and offline use rely on.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::cache::{default_cache_dir, ResponseCache, DEFAULT_CACHE_TTL};
use crate::error::{Error, Result};
use crate::evolution::{build_paths, EvolutionChain, EvolutionChainResponse, EvolutionNode};
use crate::matchup::{compute_matchups, MatchupTable, TypeRelations, TypeResponse};
use crate::pokemon::{Pokemon, PokemonSpecies};
use crate::resource::NamedResource;
use crate::types::TypeName;

/// Public PokeAPI v2 endpoint.
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
const API_BASE_ENV: &str = "POKEDEX_API_BASE";
/// Directory override: when set, responses are read from disk instead of HTTP.
pub const API_SOURCE_ENV: &str = "POKEDEX_API_SOURCE";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const API_PATH_MARKER: &str = "/api/v2/";

/// Settings for reaching the API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Cache directory; `None` resolves the platform default.
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl: Duration,
    pub use_cache: bool,
    pub timeout: Duration,
    /// Read responses from this directory instead of the network.
    pub local_source: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            cache_dir: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            use_cache: true,
            timeout: REQUEST_TIMEOUT,
            local_source: None,
        }
    }
}

impl ApiConfig {
    /// Defaults overridden by `POKEDEX_API_BASE` and `POKEDEX_API_SOURCE`.
    ///
    /// The cache directory is left unresolved here; `POKEDEX_CACHE_DIR` is
    /// honoured when the HTTP source resolves its default.
    pub fn from_env() -> Self {
        let mut config = ApiConfig::default();
        if let Ok(base) = env::var(API_BASE_ENV) {
            let trimmed = base.trim();
            if !trimmed.is_empty() {
                config.base_url = trimmed.to_string();
            }
        }
        if let Some(source) = env::var_os(API_SOURCE_ENV) {
            config.local_source = Some(PathBuf::from(source));
        }
        config
    }
}

/// Something that can resolve an API URL to a response body.
pub trait ResourceSource: Send + Sync {
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Fetches over HTTPS, consulting the response cache first.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    cache: Option<ResponseCache>,
}

impl HttpSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent())
            .build()
            .map_err(Error::Http)?;

        let cache = if config.use_cache {
            let dir = match &config.cache_dir {
                Some(dir) => dir.clone(),
                None => default_cache_dir()?,
            };
            Some(ResponseCache::new(dir, config.cache_ttl))
        } else {
            None
        };

        Ok(Self { client, cache })
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    fn cached(&self, url: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        match cache.get(url) {
            Ok(body) => body,
            Err(error) => {
                warn!(%error, %url, "failed to read cached response");
                None
            }
        }
    }
}

impl ResourceSource for HttpSource {
    fn fetch_text(&self, url: &str) -> Result<String> {
        if let Some(body) = self.cached(url) {
            return Ok(body);
        }

        info!(%url, "fetching api resource");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::ResourceNotFound {
                url: url.to_string(),
            });
        }

        let body = response.error_for_status()?.text()?;
        if let Some(cache) = &self.cache {
            if let Err(error) = cache.put(url, &body) {
                warn!(%error, %url, "failed to cache api response");
            }
        }
        Ok(body)
    }
}

fn user_agent() -> String {
    format!("pokedex-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}

/// Reads responses from a directory mirroring the API path layout.
///
/// `https://pokeapi.co/api/v2/type/12/` maps to `<root>/type/12.json`.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::LocalSourceMissing { path: root });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `url`, or `None` when the URL escapes the root.
    pub fn path_for(&self, url: &str) -> Option<PathBuf> {
        let relative = url
            .split_once(API_PATH_MARKER)
            .map_or(url, |(_, rest)| rest)
            .trim_matches('/');
        if relative.is_empty() {
            return None;
        }

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            warn!(%url, "refusing url that escapes the local source root");
            return None;
        }

        let mut path = self.root.join(relative);
        path.as_mut_os_string().push(".json");
        Some(path)
    }
}

impl ResourceSource for LocalSource {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let not_found = || Error::ResourceNotFound {
            url: url.to_string(),
        };
        let path = self.path_for(url).ok_or_else(not_found)?;
        if !path.is_file() {
            return Err(not_found());
        }
        debug!(%url, path = %path.display(), "reading local api resource");
        Ok(fs::read_to_string(path)?)
    }
}

/// Source chosen from an [`ApiConfig`].
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpSource),
    Local(LocalSource),
}

impl ConfiguredSource {
    /// Local directory when configured, HTTP otherwise.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        match &config.local_source {
            Some(root) => {
                info!(root = %root.display(), "using local api source");
                Ok(ConfiguredSource::Local(LocalSource::new(root.clone())?))
            }
            None => Ok(ConfiguredSource::Http(HttpSource::new(config)?)),
        }
    }

    /// Response cache in use, if any.
    pub fn cache(&self) -> Option<&ResponseCache> {
        match self {
            ConfiguredSource::Http(source) => source.cache(),
            ConfiguredSource::Local(_) => None,
        }
    }
}

impl ResourceSource for ConfiguredSource {
    fn fetch_text(&self, url: &str) -> Result<String> {
        match self {
            ConfiguredSource::Http(source) => source.fetch_text(url),
            ConfiguredSource::Local(source) => source.fetch_text(url),
        }
    }
}

/// A creature together with its flattened evolution family.
#[derive(Debug, Clone)]
pub struct CreatureEvolution {
    pub pokemon: Pokemon,
    pub chains: Vec<EvolutionChain>,
}

/// A creature together with its defensive matchup table.
#[derive(Debug, Clone)]
pub struct CreatureMatchups {
    pub pokemon: Pokemon,
    pub types: Vec<TypeName>,
    pub table: MatchupTable,
}

/// Typed PokeAPI client.
#[derive(Debug, Clone)]
pub struct PokeApi<S> {
    source: S,
    base_url: String,
}

impl PokeApi<ConfiguredSource> {
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(PokeApi::new(
            ConfiguredSource::from_config(config)?,
            config.base_url.clone(),
        ))
    }
}

impl<S: ResourceSource> PokeApi<S> {
    pub fn new(source: S, base_url: impl Into<String>) -> Self {
        Self {
            source,
            base_url: base_url.into(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Canonical URL of `kind/{name_or_id}/` under the configured base.
    pub fn resource_url(&self, kind: &str, name_or_id: &str) -> String {
        format!(
            "{}/{}/{}/",
            self.base_url.trim_end_matches('/'),
            kind,
            name_or_id.trim().to_ascii_lowercase()
        )
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.source.fetch_text(url)?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn fetch_pokemon(&self, name_or_id: &str) -> Result<Pokemon> {
        self.get(&self.resource_url("pokemon", name_or_id))
    }

    pub fn fetch_species_by_url(&self, url: &str) -> Result<PokemonSpecies> {
        self.get(url)
    }

    /// Root node of the evolution-chain resource at `url`.
    pub fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionNode> {
        let response: EvolutionChainResponse = self.get(url)?;
        Ok(response.chain)
    }

    /// Defensive damage relations of the type resource at `url`.
    pub fn fetch_type_relations(&self, url: &str) -> Result<(TypeName, TypeRelations)> {
        let response: TypeResponse = self.get(url)?;
        let name = TypeName::parse(&response.name)?;
        let relations = TypeRelations::from_wire(&response.damage_relations)?;
        Ok((name, relations))
    }

    /// Fetch relations for every type concurrently and wait for all of them.
    ///
    /// Any single failure fails the whole lookup.
    pub fn fetch_relations_for(
        &self,
        types: &[&NamedResource],
    ) -> Result<HashMap<TypeName, TypeRelations>> {
        let results: Vec<Result<(TypeName, TypeRelations)>> = thread::scope(|scope| {
            let handles: Vec<_> = types
                .iter()
                .map(|type_ref| scope.spawn(move || self.fetch_type_relations(&type_ref.url)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });

        results.into_iter().collect()
    }

    pub fn fetch_species(&self, pokemon: &Pokemon) -> Result<PokemonSpecies> {
        self.fetch_species_by_url(&pokemon.species.url)
    }

    /// Resolve a creature and flatten its evolution family.
    ///
    /// A species without an evolution-chain link yields no chains.
    pub fn evolution_chains_for(&self, name_or_id: &str) -> Result<CreatureEvolution> {
        let pokemon = self.fetch_pokemon(name_or_id)?;
        let species = self.fetch_species(&pokemon)?;
        let chains = match &species.evolution_chain {
            Some(link) => build_paths(&self.fetch_evolution_chain(&link.url)?)?,
            None => Vec::new(),
        };
        debug!(pokemon = %pokemon.name, chains = chains.len(), "built evolution paths");
        Ok(CreatureEvolution { pokemon, chains })
    }

    /// Resolve a creature and compute its defensive matchup table.
    pub fn matchups_for(&self, name_or_id: &str) -> Result<CreatureMatchups> {
        let pokemon = self.fetch_pokemon(name_or_id)?;
        let types = pokemon.type_names()?;
        let relations = self.fetch_relations_for(&pokemon.type_refs())?;
        let table = compute_matchups(&types, &relations)?;
        Ok(CreatureMatchups {
            pokemon,
            types,
            table,
        })
    }
}
