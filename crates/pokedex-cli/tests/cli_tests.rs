//! Integration tests for the `pokedex` binary.
//!
//! Every command runs against the JSON fixtures through `POKEDEX_API_SOURCE`,
//! so no test touches the network.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use pokedex_lib::{ResponseCache, DEFAULT_CACHE_TTL};

/// Directory of recorded PokeAPI responses.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/pokeapi")
}

fn pokedex() -> Command {
    let mut cmd = Command::cargo_bin("pokedex").expect("binary exists");
    cmd.env("POKEDEX_API_SOURCE", fixtures_dir())
        .env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("POKEDEX_API_BASE")
        .env_remove("POKEDEX_CACHE_DIR");
    cmd
}

fn json_stdout(args: &[&str]) -> serde_json::Value {
    let output = pokedex()
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("valid JSON output")
}

// =============================================================================
// evolution
// =============================================================================

#[test]
fn evolution_prints_linear_chain() {
    pokedex()
        .args(["evolution", "bulbasaur"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Evolution chains for Bulbasaur:\n  Bulbasaur (#1) -> [Lvl 16] Ivysaur (#2) -> [Lvl 32] Venusaur (#3)\n",
        ));
}

#[test]
fn evolution_prints_one_line_per_branch() {
    let assert = pokedex().args(["evolution", "eevee"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");

    let chain_lines: Vec<&str> = stdout.lines().skip(1).collect();
    assert_eq!(chain_lines.len(), 8);
    assert!(chain_lines
        .iter()
        .all(|line| line.starts_with("  Eevee (#133) -> ")));
    assert!(stdout.contains("[Use water stone] Vaporeon (#134)"));
    assert!(stdout.contains("[Happiness 160, day] Espeon (#196)"));
}

#[test]
fn evolution_reports_non_evolving_species() {
    pokedex()
        .args(["evolution", "tauros"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Tauros does not evolve.\n"));
}

#[test]
fn evolution_json_lists_stages_with_triggers() {
    let json = json_stdout(&["--format", "json", "evolution", "gengar"]);

    assert_eq!(json["pokemon"]["name"], "gengar");
    let chain = json["chains"][0].as_array().expect("chain array");
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0]["id"], 92);
    assert_eq!(chain[0]["triggers"].as_array().map(Vec::len), Some(0));
    assert_eq!(chain[2]["name"], "gengar");
    assert_eq!(chain[2]["triggers"][0], "Trade");
}

#[test]
fn evolution_json_for_non_evolving_species_has_no_chains() {
    let json = json_stdout(&["evolution", "tauros", "--format", "json"]);
    assert_eq!(json["chains"].as_array().map(Vec::len), Some(0));
}

#[test]
fn malformed_family_fails_with_context() {
    pokedex()
        .args(["evolution", "missingno"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to load the evolution family of 'missingno'",
        ));
}

#[test]
fn unknown_creature_fails() {
    pokedex()
        .args(["evolution", "agumon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("agumon"));
}

// =============================================================================
// matchups
// =============================================================================

#[test]
fn matchups_prints_bulbasaur_table() {
    pokedex()
        .args(["matchups", "bulbasaur"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Type matchups for Bulbasaur (grass/poison):\n\
             \x20 Weak (x2): fire, ice, flying, psychic\n\
             \x20 Normal (x1): normal, poison, ground, bug, rock, ghost, dragon, steel, dark\n\
             \x20 Resistant (x0.5): water, electric, fighting, fairy\n\
             \x20 Super resistant (x0.25): grass\n",
        ));
}

#[test]
fn matchups_accepts_dex_number() {
    pokedex()
        .args(["matchups", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Type matchups for Bulbasaur (grass/poison):",
        ));
}

#[test]
fn matchups_json_groups_types_by_tier() {
    let json = json_stdout(&["--format", "json", "matchups", "gengar"]);

    assert_eq!(json["types"], serde_json::json!(["ghost", "poison"]));
    let tiers = json["tiers"].as_object().expect("tier map");
    let total: usize = tiers
        .values()
        .filter_map(|members| members.as_array())
        .map(Vec::len)
        .sum();
    assert_eq!(total, 18);
    assert_eq!(
        json["tiers"]["immune"],
        serde_json::json!(["normal", "fighting"])
    );
}

#[test]
fn matchups_fail_when_type_data_is_missing() {
    pokedex()
        .args(["matchups", "charizard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to compute type matchups for 'charizard'",
        ));
}

// =============================================================================
// show
// =============================================================================

#[test]
fn show_prints_details_and_flavor_text() {
    pokedex()
        .args(["show", "bulbasaur"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#001 Bulbasaur\n"))
        .stdout(predicate::str::contains("Types:  grass/poison"))
        .stdout(predicate::str::contains("Height: 0.7 m  Weight: 6.9 kg"))
        .stdout(predicate::str::contains("total            318"))
        .stdout(predicate::str::contains(
            "A strange seed was planted on its back at birth.",
        ));
}

#[test]
fn show_json_includes_stats() {
    let json = json_stdout(&["--format", "json", "show", "bulbasaur"]);
    assert_eq!(json["pokemon"]["id"], 1);
    assert_eq!(json["types"], serde_json::json!(["grass", "poison"]));
    assert_eq!(json["base_stat_total"], 318);
    assert_eq!(json["stats"][0]["name"], "hp");
}

// =============================================================================
// cache-clear
// =============================================================================

#[test]
fn cache_clear_removes_cached_responses() {
    let temp = TempDir::new().expect("create temp dir");
    let cache = ResponseCache::new(temp.path(), DEFAULT_CACHE_TTL);
    cache
        .put("https://pokeapi.co/api/v2/type/12/", "{}")
        .expect("seed cache");
    cache
        .put("https://pokeapi.co/api/v2/type/4/", "{}")
        .expect("seed cache");
    std::fs::write(temp.path().join("package.json"), "{}").expect("write user file");

    pokedex()
        .args(["--cache-dir", temp.path().to_str().unwrap(), "cache-clear"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Removed 2 cached responses from ",
        ));

    let left: Vec<_> = std::fs::read_dir(temp.path())
        .expect("read cache dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name())
        .collect();
    assert_eq!(left, vec![std::ffi::OsString::from("package.json")]);
}

#[test]
fn cache_clear_honours_cache_dir_env() {
    let temp = TempDir::new().expect("create temp dir");
    let json = {
        let output = pokedex()
            .env("POKEDEX_CACHE_DIR", temp.path())
            .args(["--format", "json", "cache-clear"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice::<serde_json::Value>(&output).expect("valid JSON output")
    };

    assert_eq!(json["removed"], 0);
    assert_eq!(json["cache_dir"], temp.path().display().to_string());
}

// =============================================================================
// argument handling
// =============================================================================

#[test]
fn missing_creature_argument_is_a_usage_error() {
    pokedex()
        .arg("matchups")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_format_is_rejected() {
    pokedex()
        .args(["--format", "yaml", "show", "bulbasaur"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("yaml"));
}
