//! Build script: reads /cards/athletes.json, /cards/synergies.json and
//! /cards/squads.json and generates Rust source that statically constructs
//! the standard catalog. The core crate embeds card data without any runtime
//! JSON parsing, keeping it no_std compatible.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

// ── JSON schema types (build-time only) ──────────────────────────────────────

#[derive(Deserialize)]
struct JsonAthlete {
    id: u32,
    name: String,
    short: String,
    role: String,
    power: i32,
    zones: Vec<u8>,
    #[serde(default)]
    icons: BTreeMap<String, String>,
    effect: Option<JsonEffect>,
}

#[derive(Deserialize)]
struct JsonEffect {
    #[serde(rename = "type")]
    effect_type: String,
    count: Option<u8>,
    steps: Option<u8>,
}

#[derive(Deserialize)]
struct JsonSynergy {
    id: u32,
    name: String,
    #[serde(rename = "type")]
    synergy_type: String,
    stars: i32,
}

#[derive(Deserialize)]
struct JsonSquad {
    starters: Vec<u32>,
    bench: Vec<u32>,
}

#[derive(Deserialize)]
struct JsonSquads {
    home: JsonSquad,
    away: JsonSquad,
}

// ── Code generation helpers ──────────────────────────────────────────────────

fn gen_role(role: &str) -> String {
    match role {
        "Forward" | "Midfielder" | "Defender" => format!("Role::{role}"),
        other => panic!("Unknown role: {other}"),
    }
}

fn gen_position(key: &str) -> String {
    let variant = match key {
        "leftTop" => "LeftTop",
        "leftMiddle" => "LeftMiddle",
        "leftBottom" => "LeftBottom",
        "rightTop" => "RightTop",
        "rightMiddle" => "RightMiddle",
        "rightBottom" => "RightBottom",
        other => panic!("Unknown icon position: {other}"),
    };
    format!("IconPosition::{variant}")
}

fn gen_kind(kind: &str) -> String {
    match kind {
        "Attack" | "Defense" | "Pass" | "Press" => format!("IconKind::{kind}"),
        other => panic!("Unknown icon kind: {other}"),
    }
}

fn gen_effect(effect: Option<&JsonEffect>) -> String {
    let Some(effect) = effect else {
        return "ImmediateEffect::None".to_string();
    };
    match effect.effect_type.as_str() {
        "DrawSynergy" => {
            let count = effect.count.expect("DrawSynergy needs a count");
            format!("ImmediateEffect::DrawSynergy {{ count: {count} }}")
        }
        "DrawSynergyChoose" => {
            let count = effect.count.expect("DrawSynergyChoose needs a count");
            format!("ImmediateEffect::DrawSynergyChoose {{ count: {count} }}")
        }
        "StealSynergy" => "ImmediateEffect::StealSynergy".to_string(),
        "InstantShot" => "ImmediateEffect::InstantShot".to_string(),
        "IgnoreDefense" => "ImmediateEffect::IgnoreDefense".to_string(),
        "MoveControl" => {
            let steps = effect.steps.expect("MoveControl needs steps");
            format!("ImmediateEffect::MoveControl {{ steps: {steps} }}")
        }
        other => panic!("Unknown effect type: {other}"),
    }
}

fn gen_athlete(card: &JsonAthlete) -> String {
    let id = card.id;
    let name = &card.name;
    let short = &card.short;
    let role = gen_role(&card.role);
    let power = card.power;
    let icons: String = card
        .icons
        .iter()
        .map(|(position, kind)| {
            format!(".with({}, {})", gen_position(position), gen_kind(kind))
        })
        .collect();
    let zones: Vec<String> = card
        .zones
        .iter()
        .map(|z| {
            assert!(*z < 4, "card {id} lists zone {z}");
            z.to_string()
        })
        .collect();
    let effect = gen_effect(card.effect.as_ref());

    format!(
        r#"        AthleteCard {{
            id: CardId({id}),
            name: String::from("{name}"),
            short_name: String::from("{short}"),
            role: {role},
            base_power: {power},
            icons: EdgeIcons::none(){icons},
            zones: ZoneSet::from_zones(&[{zones}]),
            effect: {effect},
        }}"#,
        zones = zones.join(", ")
    )
}

fn gen_synergy(card: &JsonSynergy) -> String {
    let id = card.id;
    let name = &card.name;
    let stars = card.stars;
    let synergy_type = match card.synergy_type.as_str() {
        "Attack" | "Defense" | "Special" | "Tackle" | "SetPiece" => &card.synergy_type,
        other => panic!("Unknown synergy type: {other}"),
    };
    format!(
        r#"        SynergyCard {{ id: SynergyId({id}), name: String::from("{name}"), synergy_type: SynergyType::{synergy_type}, stars: {stars} }}"#
    )
}

fn gen_squad(squad: &JsonSquad) -> String {
    let ids = |list: &[u32]| {
        list.iter()
            .map(|id| format!("CardId({id})"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Squad {{ starters: vec![{}], bench: vec![{}] }}",
        ids(&squad.starters),
        ids(&squad.bench)
    )
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn read(path: &Path) -> String {
    println!("cargo:rerun-if-changed={}", path.display());
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let cards_dir = Path::new(&manifest_dir).join("../cards");

    let athletes: Vec<JsonAthlete> = serde_json::from_str(&read(&cards_dir.join("athletes.json")))
        .expect("Failed to parse athletes.json");
    let synergies: Vec<JsonSynergy> =
        serde_json::from_str(&read(&cards_dir.join("synergies.json")))
            .expect("Failed to parse synergies.json");
    let squads: JsonSquads = serde_json::from_str(&read(&cards_dir.join("squads.json")))
        .expect("Failed to parse squads.json");

    let athlete_entries: Vec<String> = athletes.iter().map(gen_athlete).collect();
    let synergy_entries: Vec<String> = synergies.iter().map(gen_synergy).collect();

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("catalog_generated.rs");

    let generated = format!(
        r#"// Auto-generated from the JSON files in /cards. DO NOT EDIT
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use crate::types::*;

/// Returns every athlete defined in athletes.json.
pub fn get_all_athletes() -> Vec<AthleteCard> {{
    vec![
{}
    ]
}}

/// Returns the synergy deck defined in synergies.json, unshuffled.
pub fn get_synergy_deck() -> Vec<SynergyCard> {{
    vec![
{}
    ]
}}

/// Returns the (home, away) squads defined in squads.json.
pub fn get_standard_squads() -> (Squad, Squad) {{
    ({}, {})
}}
"#,
        athlete_entries.join(",\n"),
        synergy_entries.join(",\n"),
        gen_squad(&squads.home),
        gen_squad(&squads.away),
    );

    fs::write(&dest, generated).expect("Failed to write generated catalog file");
}
