//! Human-readable evolution trigger descriptions.

use crate::evolution::EvolutionDetail;

const TRADE_TRIGGER: &str = "trade";
const SUPPRESSED_FALLBACK: &str = "level up";

/// Describe every condition present in `detail`, joined with `", "`.
///
/// Conditions are listed in a fixed order: level, item use, trade, happiness,
/// affection, beauty, held item, known move, known move type, location, time
/// of day, rain, relative physical stats, gender, party species, party type,
/// traded-for species, upside-down. Zero thresholds and empty strings count as
/// absent.
///
/// When no condition matched, the trigger name is used instead, except that a
/// bare `level up` yields an empty string. PokeAPI reports `level-up` for
/// several conditions this formatter does not model, so the fallback can hide
/// them.
pub fn format_trigger(detail: &EvolutionDetail) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(level) = positive(detail.min_level) {
        parts.push(format!("Lvl {level}"));
    }
    if let Some(item) = &detail.item {
        parts.push(format!("Use {}", item.spaced_name()));
    }
    if detail
        .trigger
        .as_ref()
        .is_some_and(|trigger| trigger.name == TRADE_TRIGGER)
    {
        parts.push("Trade".to_string());
    }

    if let Some(happiness) = positive(detail.min_happiness) {
        parts.push(format!("Happiness {happiness}"));
    }
    if let Some(affection) = positive(detail.min_affection) {
        parts.push(format!("Affection {affection}"));
    }
    if let Some(beauty) = positive(detail.min_beauty) {
        parts.push(format!("Beauty {beauty}"));
    }

    if let Some(held) = &detail.held_item {
        parts.push(format!("Hold {}", held.spaced_name()));
    }
    if let Some(known) = &detail.known_move {
        parts.push(format!("Knows {}", known.spaced_name()));
    }
    if let Some(move_type) = &detail.known_move_type {
        parts.push(format!("Knows {} type move", move_type.name));
    }

    if let Some(location) = &detail.location {
        parts.push(format!("In {}", location.spaced_name()));
    }
    if let Some(time) = detail.time_of_day.as_deref().filter(|t| !t.is_empty()) {
        parts.push(time.to_string());
    }
    if detail.needs_overworld_rain {
        parts.push("In Rain".to_string());
    }

    match detail.relative_physical_stats {
        Some(1) => parts.push("Atk > Def".to_string()),
        Some(-1) => parts.push("Def > Atk".to_string()),
        Some(0) => parts.push("Atk = Def".to_string()),
        _ => {}
    }

    match detail.gender {
        Some(1) => parts.push("Female".to_string()),
        Some(2) => parts.push("Male".to_string()),
        _ => {}
    }

    if let Some(species) = &detail.party_species {
        parts.push(format!("With {}", species.spaced_name()));
    }
    if let Some(party_type) = &detail.party_type {
        parts.push(format!("With {} type", party_type.name));
    }
    if let Some(traded_for) = &detail.trade_species {
        parts.push(format!("For {}", traded_for.spaced_name()));
    }
    if detail.turn_upside_down {
        parts.push("Turn upside down".to_string());
    }

    if parts.is_empty() {
        if let Some(trigger) = &detail.trigger {
            let name = trigger.spaced_name();
            if name != SUPPRESSED_FALLBACK {
                parts.push(name);
            }
        }
    }

    parts.join(", ")
}

/// Format each detail, dropping the ones that produce no text.
pub fn format_triggers(details: &[EvolutionDetail]) -> Vec<String> {
    details
        .iter()
        .map(format_trigger)
        .filter(|text| !text.is_empty())
        .collect()
}

fn positive(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}
