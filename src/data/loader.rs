//! Load unit/skill/tuning JSON and build lookup indexes. Graceful fallback
//! when data is missing: loaders return `None` (or defaults, for tuning)
//! rather than failing, so callers can substitute built-in demo data.

use std::collections::HashMap;
use std::fs;

use crate::battle::tuning::Tuning;
use crate::data::skill::SkillRecord;
use crate::data::unit::{SkillIndex, UnitRecord};

pub const DEFAULT_UNITS_PATH: &str = "data/units.json";
pub const DEFAULT_SKILLS_PATH: &str = "data/skills.json";
pub const DEFAULT_TUNING_PATH: &str = "data/tuning.json";

/// Load unit records from a JSON array. Returns None if the file is missing
/// or unparseable.
pub fn load_unit_records(path: &str) -> Option<Vec<UnitRecord>> {
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Load skill records from a JSON array. Returns None if the file is missing
/// or unparseable.
pub fn load_skill_records(path: &str) -> Option<Vec<SkillRecord>> {
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Load tuning overrides. A missing or unparseable file is a valid (default)
/// configuration; present keys override, absent keys keep their defaults.
pub fn load_tuning(path: &str) -> Tuning {
    fs::read_to_string(path)
        .ok()
        .and_then(|data| serde_json::from_str(&data).ok())
        .unwrap_or_default()
}

/// Unit records by id. Entries without an id are skipped.
pub fn build_unit_index(records: &[UnitRecord]) -> HashMap<String, UnitRecord> {
    records
        .iter()
        .filter(|record| !record.unit_id.is_empty())
        .map(|record| (record.unit_id.clone(), record.clone()))
        .collect()
}

/// Decoded skills by id, each shared behind an `Arc`. Entries without an id
/// are skipped.
pub fn build_skill_index(records: &[SkillRecord]) -> SkillIndex {
    records
        .iter()
        .filter(|record| !record.skill_id.is_empty())
        .map(|record| (record.skill_id.clone(), record.to_shared_skill()))
        .collect()
}
