use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pokedex_cli::commands::{cache, evolution, matchups, show};
use pokedex_cli::options::GlobalOptions;
use pokedex_lib::{ApiConfig, ConfiguredSource, PokeApi};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pokedex evolution and type matchup lookups")]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the evolution chains of a creature's family.
    Evolution {
        /// Creature name or national dex number.
        pokemon: String,
    },
    /// Print the defensive type matchup table of a creature.
    Matchups {
        /// Creature name or national dex number.
        pokemon: String,
    },
    /// Print types, size, base stats and flavor text of a creature.
    Show {
        /// Creature name or national dex number.
        pokemon: String,
    },
    /// Remove every cached API response.
    CacheClear,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.global.api_config();
    let format = cli.global.format;

    match cli.command {
        Command::Evolution { pokemon } => {
            evolution::handle_evolution(&client(&config)?, &pokemon, format)
        }
        Command::Matchups { pokemon } => {
            matchups::handle_matchups(&client(&config)?, &pokemon, format)
        }
        Command::Show { pokemon } => show::handle_show(&client(&config)?, &pokemon, format),
        Command::CacheClear => cache::handle_cache_clear(&config, format),
    }
}

fn client(config: &ApiConfig) -> Result<PokeApi<ConfiguredSource>> {
    PokeApi::from_config(config).context("failed to configure the PokeAPI client")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
