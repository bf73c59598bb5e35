//! Cache-clear command handler.

use anyhow::{Context, Result};

use pokedex_lib::{default_cache_dir, ApiConfig, ResponseCache};

use crate::output::{CacheClearOutput, OutputFormat};

/// Remove every cached API response.
pub fn handle_cache_clear(config: &ApiConfig, format: OutputFormat) -> Result<()> {
    let dir = match &config.cache_dir {
        Some(dir) => dir.clone(),
        None => default_cache_dir().context("failed to resolve the cache directory")?,
    };
    let cache = ResponseCache::new(dir, config.cache_ttl);
    let removed = cache
        .clear()
        .with_context(|| format!("failed to clear cache at {}", cache.dir().display()))?;
    tracing::debug!(removed, dir = %cache.dir().display(), "cleared response cache");

    format.render_cache_clear(&CacheClearOutput {
        cache_dir: cache.dir().display().to_string(),
        removed,
    })
}
