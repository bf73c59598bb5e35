//! Flags shared by every subcommand.

use std::path::PathBuf;

use clap::Args;

use pokedex_lib::ApiConfig;

use crate::output::OutputFormat;

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Override the response cache directory.
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Always fetch from the API and do not store responses.
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Override the PokeAPI base URL.
    #[arg(long, global = true)]
    pub api_base: Option<String>,
}

impl GlobalOptions {
    /// Environment configuration with command-line flags applied on top.
    pub fn api_config(&self) -> ApiConfig {
        self.apply(ApiConfig::from_env())
    }

    fn apply(&self, mut config: ApiConfig) -> ApiConfig {
        if let Some(base) = &self.api_base {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
        if self.no_cache {
            config.use_cache = false;
        }
        config
    }
}
