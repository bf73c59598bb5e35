mod common;

use pokedex_lib::{build_paths, renderable_chains, Error, EvolutionSummary};

use common::fixture_api;

#[test]
fn linear_family_yields_one_chain_of_full_depth() {
    let api = fixture_api();
    let root = api
        .fetch_evolution_chain("https://pokeapi.co/api/v2/evolution-chain/1/")
        .expect("bulbasaur chain loads");

    let chains = build_paths(&root).expect("chain is well formed");
    assert_eq!(chains.len(), 1);

    let names: Vec<&str> = chains[0]
        .stages()
        .iter()
        .map(|stage| stage.name.as_str())
        .collect();
    assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);
    assert!(chains[0].stages()[0].evolution_details.is_none());
}

#[test]
fn branching_family_yields_one_chain_per_leaf() {
    let api = fixture_api();
    let root = api
        .fetch_evolution_chain("https://pokeapi.co/api/v2/evolution-chain/67/")
        .expect("eevee chain loads");

    let chains = build_paths(&root).expect("chain is well formed");
    assert_eq!(chains.len(), 8);
    assert_eq!(chains.len(), root.leaf_count());

    for chain in &chains {
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.first().map(|s| s.id), Some(133));
    }

    let leaves: Vec<u32> = chains
        .iter()
        .filter_map(|c| c.last())
        .map(|s| s.id)
        .collect();
    assert_eq!(leaves, vec![134, 135, 136, 196, 197, 470, 471, 700]);
}

#[test]
fn non_evolving_species_has_no_renderable_chain() {
    let api = fixture_api();
    let evolution = api.evolution_chains_for("tauros").expect("tauros resolves");

    assert_eq!(evolution.chains.len(), 1);
    assert_eq!(evolution.chains[0].len(), 1);
    assert!(renderable_chains(&evolution.chains).is_empty());

    let summary = EvolutionSummary::from(&evolution);
    assert!(!summary.evolves());
    assert_eq!(summary.render_plain(), "Tauros does not evolve.\n");
}

#[test]
fn summary_formats_triggers_per_stage() {
    let api = fixture_api();
    let evolution = api.evolution_chains_for("eevee").expect("eevee resolves");
    let summary = EvolutionSummary::from(&evolution);

    let triggers: Vec<Vec<String>> = summary
        .chains
        .iter()
        .map(|chain| chain[1].triggers.clone())
        .collect();
    assert_eq!(triggers[0], vec!["Use water stone"]);
    assert_eq!(triggers[3], vec!["Happiness 160, day"]);
    assert_eq!(triggers[5], vec!["In eterna forest", "Use leaf stone"]);
    assert_eq!(triggers[7], vec!["Affection 2, Knows fairy type move"]);
    assert!(summary
        .chains
        .iter()
        .all(|chain| chain[0].triggers.is_empty()));
}

#[test]
fn trade_evolution_is_labelled() {
    let api = fixture_api();
    let evolution = api.evolution_chains_for("gengar").expect("gengar resolves");
    let summary = EvolutionSummary::from(&evolution);

    assert_eq!(summary.chains.len(), 1);
    assert_eq!(
        summary.render_plain(),
        "Evolution chains for Gengar:\n  Gastly (#92) -> [Lvl 25] Haunter (#93) -> [Trade] Gengar (#94)\n"
    );
}

#[test]
fn malformed_species_url_aborts_the_whole_family() {
    let api = fixture_api();
    let err = api
        .evolution_chains_for("missingno")
        .expect_err("malformed chain must not produce partial paths");
    match err {
        Error::MalformedResourceUrl { url } => {
            assert_eq!(url, "https://pokeapi.co/api/v2/pokemon-species/")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn unknown_creature_is_reported_as_missing_resource() {
    let api = fixture_api();
    let err = api
        .evolution_chains_for("agumon")
        .expect_err("no such fixture");
    assert!(matches!(err, Error::ResourceNotFound { .. }));
}
