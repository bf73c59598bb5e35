#![allow(dead_code)]

use std::path::PathBuf;

use pokedex_lib::{LocalSource, PokeApi, DEFAULT_API_BASE};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/pokeapi")
}

pub fn fixture_api() -> PokeApi<LocalSource> {
    let source = LocalSource::new(fixtures_dir()).expect("fixture api directory present");
    PokeApi::new(source, DEFAULT_API_BASE)
}
