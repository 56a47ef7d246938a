//! Unit configuration records and battle-time unit construction.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::battle::skill::{Skill, SkillSlot};
use crate::battle::unit::{BaseStats, Unit};

pub const DEFAULT_MAX_SOLDIERS: u32 = 10_000;

/// Persisted unit definition (shinsen schema). The troop count is NOT part of
/// the record; it is chosen per battle and clamped on construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitRecord {
    pub unit_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_stats: BaseStats,
    #[serde(default = "default_max_soldiers")]
    pub max_soldiers: u32,
    #[serde(default)]
    pub unique_skill_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learn20_skill_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awaken_skill_id: Option<String>,
}

fn default_max_soldiers() -> u32 {
    DEFAULT_MAX_SOLDIERS
}

/// Decoded skills by id, shared read-only across every battle and trial.
pub type SkillIndex = HashMap<String, Arc<Skill>>;

/// Builds a fresh battle unit from its record.
///
/// `soldiers` clamps to `[0, max_soldiers]`. A unique skill id with no entry
/// in the index resolves to an inert placeholder named after the unit, so a
/// dangling reference degrades to "no skill" instead of failing the battle.
/// Optional slots with dangling ids stay empty.
pub fn build_unit(record: &UnitRecord, skills: &SkillIndex, soldiers: u32) -> Unit {
    let unique_skill = skills
        .get(&record.unique_skill_id)
        .cloned()
        .unwrap_or_else(|| {
            Arc::new(Skill::placeholder(
                &record.unique_skill_id,
                &record.name,
                SkillSlot::Unique,
            ))
        });
    let optional_skill = |id: &Option<String>| {
        id.as_ref().and_then(|skill_id| skills.get(skill_id).cloned())
    };

    Unit {
        id: record.unit_id.clone(),
        name: record.name.clone(),
        stats: record.base_stats,
        max_soldiers: record.max_soldiers,
        soldiers: soldiers.min(record.max_soldiers),
        unique_skill,
        learn20_skill: optional_skill(&record.learn20_skill_id),
        awaken_skill: optional_skill(&record.awaken_skill_id),
        statuses: HashMap::new(),
    }
}
