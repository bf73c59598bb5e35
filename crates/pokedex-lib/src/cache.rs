//! On-disk cache of raw API responses.
//!
//! Each response body is stored next to a small marker file recording when
//! and from which URL it was fetched. Entries older than the configured TTL
//! are ignored and refetched. Derived data (evolution paths, matchup tables)
//! is never cached.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use directories::BaseDirs;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Error, Result};

const CACHE_DIR_NAME: &str = "pokedex";
const CACHE_DIR_ENV: &str = "POKEDEX_CACHE_DIR";
const BODY_EXTENSION: &str = "json";
const MARKER_EXTENSION: &str = "fetched";

/// Default lifetime of a cached response (72 hours).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(72 * 60 * 60);

/// Resolve the cache directory: `POKEDEX_CACHE_DIR` when set, otherwise the
/// platform cache directory.
pub fn default_cache_dir() -> Result<PathBuf> {
    if let Some(override_dir) = env::var_os(CACHE_DIR_ENV) {
        return Ok(PathBuf::from(override_dir));
    }

    let dirs = BaseDirs::new().ok_or(Error::CacheDirsUnavailable)?;
    Ok(dirs.cache_dir().join(CACHE_DIR_NAME))
}

/// Response cache rooted at a directory.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached body for `url`, if present and fresh.
    pub fn get(&self, url: &str) -> Result<Option<String>> {
        let body_path = self.body_path(url);
        if !body_path.exists() {
            debug!(%url, "cache miss");
            return Ok(None);
        }

        let Some(marker) = read_marker(&marker_path(&body_path))? else {
            warn!(path = %body_path.display(), "cached response lacks a readable marker");
            return Ok(None);
        };

        if marker.url != url {
            debug!(%url, cached = %marker.url, "cache entry belongs to another url");
            return Ok(None);
        }

        let age = now_secs().saturating_sub(marker.fetched_at);
        if age >= self.ttl.as_secs() {
            debug!(%url, age_secs = age, "cached response is stale");
            return Ok(None);
        }

        debug!(%url, age_secs = age, "cache hit");
        Ok(Some(fs::read_to_string(body_path)?))
    }

    /// Store `body` for `url`, replacing any previous entry.
    pub fn put(&self, url: &str, body: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let body_path = self.body_path(url);
        write_atomic(&body_path, body.as_bytes())?;

        let marker = CacheMarker {
            fetched_at: now_secs(),
            url: url.to_string(),
        };
        write_atomic(&marker_path(&body_path), marker.format().as_bytes())
    }

    /// Remove every cached response and return how many were removed.
    ///
    /// Only bodies with a readable marker, and readable orphaned markers, are
    /// deleted. Other files in the directory are left alone.
    pub fn clear(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(MARKER_EXTENSION) {
                continue;
            }
            if read_marker(&path)?.is_none() {
                debug!(path = %path.display(), "skipping unreadable cache marker");
                continue;
            }

            let body_path = path.with_extension(BODY_EXTENSION);
            if body_path.is_file() {
                fs::remove_file(&body_path)?;
                removed += 1;
            }
            fs::remove_file(&path)?;
        }
        Ok(removed)
    }

    fn body_path(&self, url: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", cache_key(url), BODY_EXTENSION))
    }
}

fn marker_path(body_path: &Path) -> PathBuf {
    body_path.with_extension(MARKER_EXTENSION)
}

fn cache_key(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let sanitized = sanitize_component(without_scheme);
    let trimmed = sanitized.trim_matches('_');
    if trimmed.is_empty() {
        "root".to_string()
    } else {
        trimmed.to_string()
    }
}

fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

fn write_atomic(destination: &Path, contents: &[u8]) -> Result<()> {
    let parent = destination.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(destination).map_err(|err| err.error)?;
    Ok(())
}

fn read_marker(path: &Path) -> Result<Option<CacheMarker>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    Ok(CacheMarker::from_str(&contents).ok())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheMarker {
    fetched_at: u64,
    url: String,
}

impl CacheMarker {
    fn format(&self) -> String {
        format!("fetched_at={}\nurl={}\n", self.fetched_at, self.url)
    }
}

impl FromStr for CacheMarker {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut fetched_at = None;
        let mut url = None;

        for line in s.lines() {
            if let Some(value) = line.strip_prefix("fetched_at=") {
                fetched_at = value.trim().parse::<u64>().ok();
            } else if let Some(value) = line.strip_prefix("url=") {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    url = Some(trimmed.to_string());
                }
            }
        }

        match (fetched_at, url) {
            (Some(fetched_at), Some(url)) => Ok(Self { fetched_at, url }),
            _ => Err(()),
        }
    }
}
