//! Command dispatch for the `shinsen` binary.
//!
//! `battle` runs one battle, `simulate` runs the Monte Carlo aggregator,
//! `validate` checks datasets. Data files under `data/` are optional: when
//! they are missing (or hold fewer than six units) the battle/simulate
//! commands fall back to a built-in demo matchup so the binary works out of
//! the box.

use std::collections::HashSet;

use crate::battle::engine::{run_battle, BattleResult};
use crate::battle::tuning::Tuning;
use crate::data::loader::{
    build_skill_index, load_skill_records, load_tuning, load_unit_records, DEFAULT_SKILLS_PATH,
    DEFAULT_TUNING_PATH, DEFAULT_UNITS_PATH,
};
use crate::data::skill::{EffectRecord, SkillRecord};
use crate::data::unit::{build_unit, SkillIndex, UnitRecord};
use crate::data::validate::{validate_skill_records, validate_unit_records};
use crate::parallel::pool::WorkerPool;
use crate::sim::aggregate::{simulate_many, simulate_many_parallel};

pub const TEAM_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Battle,
    Simulate,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("battle") => Some(Command::Battle),
        Some("simulate") => Some(Command::Simulate),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Battle) => handle_battle(args),
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: shinsen <battle|simulate|validate>");
            2
        }
    }
}

/// Everything one trial needs: immutable records plus the tuning. Each
/// battle builds wholly fresh units from these.
struct Scenario {
    tuning: Tuning,
    team_a: Vec<UnitRecord>,
    team_b: Vec<UnitRecord>,
    skills: SkillIndex,
}

impl Scenario {
    fn run_once(&self, seed: u64) -> BattleResult {
        let roster = |records: &[UnitRecord]| {
            records
                .iter()
                .map(|record| build_unit(record, &self.skills, record.max_soldiers))
                .collect()
        };
        run_battle(&self.tuning, seed, roster(&self.team_a), roster(&self.team_b))
    }
}

/// Loads the configured matchup, or the demo one when data is missing. The
/// first three unit records form team A and the next three team B, each at
/// full troop strength.
fn load_scenario() -> Scenario {
    let units = load_unit_records(DEFAULT_UNITS_PATH);
    let skills = load_skill_records(DEFAULT_SKILLS_PATH);

    let (units, skill_records) = match (units, skills) {
        (Some(units), Some(skills)) if units.len() >= TEAM_SIZE * 2 => (units, skills),
        _ => {
            eprintln!("no usable data/ files found; running the built-in demo matchup");
            (demo_units(), demo_skills())
        }
    };

    Scenario {
        tuning: load_tuning(DEFAULT_TUNING_PATH),
        team_a: units[..TEAM_SIZE].to_vec(),
        team_b: units[TEAM_SIZE..TEAM_SIZE * 2].to_vec(),
        skills: build_skill_index(&skill_records),
    }
}

fn handle_battle(args: &[String]) -> i32 {
    let seed = parse_u64_arg(args.get(2), "seed", 7);
    let scenario = load_scenario();
    let result = scenario.run_once(seed);

    match serde_json::to_string_pretty(&result) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize battle result: {err}");
            1
        }
    }
}

fn handle_simulate(args: &[String]) -> i32 {
    let trials = parse_usize_arg(args.get(2), "trials", 500);
    let seed = parse_u64_arg(args.get(3), "seed", 123);
    let parallel = args.iter().any(|arg| arg == "--parallel");
    let as_table = args.iter().any(|arg| arg == "--table");

    let scenario = load_scenario();
    let factory = |sub_seed: u64| scenario.run_once(sub_seed);
    let result = if parallel {
        simulate_many_parallel(factory, trials, seed, &WorkerPool::default())
    } else {
        simulate_many(factory, trials, seed)
    };

    if as_table {
        println!("trials\twin_rate_a\twin_rate_b\tdraw_rate\tmean_loss_a\tmean_loss_b");
        println!(
            "{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}",
            result.trials,
            result.win_rate_a,
            result.win_rate_b,
            result.draw_rate,
            result.loss_a.mean,
            result.loss_b.mean
        );
        return 0;
    }

    match serde_json::to_string_pretty(&result) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize aggregate result: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let units_path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_UNITS_PATH);
    let skills_path = args.get(3).map(String::as_str).unwrap_or(DEFAULT_SKILLS_PATH);

    let Some(skill_records) = load_skill_records(skills_path) else {
        eprintln!("unable to read or parse skill dataset '{skills_path}'");
        return 1;
    };
    let Some(unit_records) = load_unit_records(units_path) else {
        eprintln!("unable to read or parse unit dataset '{units_path}'");
        return 1;
    };

    let known_skills: HashSet<String> = skill_records
        .iter()
        .map(|record| record.skill_id.clone())
        .collect();

    let mut report = validate_skill_records(&skill_records);
    let unit_report = validate_unit_records(&unit_records, &known_skills);
    report.diagnostics.extend(unit_report.diagnostics);

    if report.diagnostics.is_empty() {
        println!("validation passed: {units_path}, {skills_path}");
        return 0;
    }

    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    if report.has_errors() {
        eprintln!("validation failed: {} finding(s)", report.diagnostics.len());
        1
    } else {
        println!(
            "validation passed with {} warning(s): {units_path}, {skills_path}",
            report.diagnostics.len()
        );
        0
    }
}

fn parse_u64_arg(raw: Option<&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok()).unwrap_or_else(|| {
        if let Some(value) = raw {
            eprintln!("invalid {name} '{value}', defaulting to {default}");
        }
        default
    })
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok()).unwrap_or_else(|| {
        if let Some(value) = raw {
            eprintln!("invalid {name} '{value}', defaulting to {default}");
        }
        default
    })
}

/// Built-in demo skills covering every effect kind.
pub fn demo_skills() -> Vec<SkillRecord> {
    fn effect(kind: &str) -> EffectRecord {
        EffectRecord { kind: kind.to_string(), ..EffectRecord::default() }
    }
    fn skill(id: &str, name: &str, slot: &str, timing: &str, proc: f64, effects: Vec<EffectRecord>) -> SkillRecord {
        SkillRecord {
            skill_id: id.to_string(),
            name: name.to_string(),
            display_name: None,
            slot: slot.to_string(),
            timing: timing.to_string(),
            proc,
            effects,
        }
    }

    vec![
        skill("S_RAID", "Cavalry Raid", "unique", "after_attack", 0.30, vec![EffectRecord {
            rate: Some(1.5),
            ..effect("physical_damage")
        }]),
        skill("S_VOLLEY", "Crossbow Volley", "unique", "after_attack", 0.35, vec![EffectRecord {
            rate: Some(1.2),
            ..effect("physical_damage")
        }]),
        skill("S_WALL", "Iron Wall", "unique", "start", 0.20, vec![EffectRecord {
            rate: Some(0.8),
            ..effect("heal")
        }]),
        skill("S_FIRE", "Fire Attack", "learn20", "start", 0.35, vec![EffectRecord {
            rate: Some(1.8),
            ..effect("strategy_damage")
        }]),
        skill("S_PANIC", "Sowing Discord", "learn20", "after_attack", 0.25, vec![
            EffectRecord { rate: Some(0.8), ..effect("strategy_damage") },
            EffectRecord { name: Some("confusion".to_string()), turns: Some(1), ..effect("status") },
        ]),
        skill("S_MEND", "Field Triage", "awaken", "start", 0.40, vec![EffectRecord {
            rate: Some(1.2),
            target: Some("ally_lowest".to_string()),
            count: Some(2),
            ..effect("heal")
        }]),
    ]
}

/// Built-in demo matchup: two balanced three-unit formations.
pub fn demo_units() -> Vec<UnitRecord> {
    fn unit(
        id: &str,
        name: &str,
        stats: [f64; 4],
        unique: &str,
        learn20: Option<&str>,
        awaken: Option<&str>,
    ) -> UnitRecord {
        UnitRecord {
            unit_id: id.to_string(),
            name: name.to_string(),
            base_stats: crate::battle::unit::BaseStats {
                str: stats[0],
                int: stats[1],
                lea: stats[2],
                spd: stats[3],
            },
            max_soldiers: 10_000,
            unique_skill_id: unique.to_string(),
            learn20_skill_id: learn20.map(str::to_string),
            awaken_skill_id: awaken.map(str::to_string),
        }
    }

    vec![
        unit("U_NOBU", "Nobunaga", [95.0, 88.0, 90.0, 82.0], "S_RAID", Some("S_FIRE"), None),
        unit("U_HIDE", "Hideyoshi", [78.0, 94.0, 85.0, 76.0], "S_VOLLEY", Some("S_PANIC"), Some("S_MEND")),
        unit("U_IEYA", "Ieyasu", [84.0, 90.0, 96.0, 70.0], "S_WALL", None, Some("S_MEND")),
        unit("U_SHIN", "Shingen", [92.0, 91.0, 94.0, 74.0], "S_RAID", Some("S_FIRE"), None),
        unit("U_KEN", "Kenshin", [98.0, 82.0, 88.0, 86.0], "S_VOLLEY", Some("S_PANIC"), None),
        unit("U_MASA", "Masamune", [88.0, 86.0, 84.0, 90.0], "S_WALL", Some("S_FIRE"), Some("S_MEND")),
    ]
}
