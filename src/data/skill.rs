//! Skill configuration records.
//!
//! The persisted shape mirrors `skills.json`: loosely-typed, every field
//! beyond `skill_id` optional. Missing or malformed optionals are not errors;
//! they resolve to documented defaults, and unrecognized effect types decode
//! to nothing so future effect kinds stay no-ops instead of failures.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::battle::skill::{HealTarget, Skill, SkillEffect, SkillSlot, SkillTiming};

/// One effect descriptor as persisted: a type tag plus whichever parameters
/// that type reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectRecord {
    /// Type tag; an absent tag decodes to an empty string, which no effect
    /// kind matches.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<u32>,
}

impl EffectRecord {
    /// Decodes to the interpreter's closed vocabulary. `None` for
    /// unrecognized type tags.
    pub fn to_effect(&self) -> Option<SkillEffect> {
        let rate = self.rate.unwrap_or(1.0);
        match self.kind.as_str() {
            "physical_damage" => Some(SkillEffect::PhysicalDamage { rate }),
            "strategy_damage" => Some(SkillEffect::StrategyDamage { rate }),
            "heal" => Some(SkillEffect::Heal {
                rate,
                target: match self.target.as_deref() {
                    Some("ally_lowest") => HealTarget::AllyLowest,
                    _ => HealTarget::Caster,
                },
                count: self.count.unwrap_or(1) as usize,
            }),
            "status" => Some(SkillEffect::Inflict {
                name: self.name.clone().unwrap_or_default(),
                turns: self.turns.unwrap_or(1),
            }),
            _ => None,
        }
    }
}

/// Persisted skill definition (shinsen schema). Loaded once, decoded to an
/// immutable [Skill] shared across battles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRecord {
    pub skill_id: String,
    #[serde(default)]
    pub name: String,
    /// Optional UI label; wins over `name` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default = "default_slot")]
    pub slot: String,
    #[serde(default = "default_timing")]
    pub timing: String,
    #[serde(default)]
    pub proc: f64,
    #[serde(default)]
    pub effects: Vec<EffectRecord>,
}

fn default_slot() -> String {
    "learn20".to_string()
}

fn default_timing() -> String {
    "after_attack".to_string()
}

impl SkillRecord {
    /// Label shown to users and used as the trigger-count key:
    /// `display_name` > `name` > `skill_id`.
    pub fn display_label(&self) -> &str {
        match &self.display_name {
            Some(label) if !label.is_empty() => label,
            _ if !self.name.is_empty() => &self.name,
            _ => &self.skill_id,
        }
    }

    pub fn to_skill(&self) -> Skill {
        Skill {
            id: self.skill_id.clone(),
            name: self.display_label().to_string(),
            slot: match self.slot.as_str() {
                "unique" => SkillSlot::Unique,
                "awaken" => SkillSlot::Awaken,
                _ => SkillSlot::Learn20,
            },
            timing: match self.timing.as_str() {
                "start" => SkillTiming::Start,
                _ => SkillTiming::AfterAttack,
            },
            proc: self.proc.clamp(0.0, 1.0),
            effects: self.effects.iter().filter_map(EffectRecord::to_effect).collect(),
        }
    }

    pub fn to_shared_skill(&self) -> Arc<Skill> {
        Arc::new(self.to_skill())
    }
}
