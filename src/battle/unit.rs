//! Units and their mutable battle state: soldiers and active statuses.
//!
//! A `Unit` is constructed fresh for every battle from immutable configuration
//! records and discarded at battle end; nothing here is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::battle::skill::Skill;

/// Stack count ceiling for re-applied statuses.
pub const MAX_STATUS_STACKS: u32 = 99;

/// The four base stats. Field names follow the record schema
/// (str/int/lea/spd = physical attack, strategic attack, defense-related,
/// speed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(default)]
    pub str: f64,
    #[serde(default)]
    pub int: f64,
    #[serde(default)]
    pub lea: f64,
    #[serde(default)]
    pub spd: f64,
}

/// An active status effect on a unit. Expires when `turns_left` reaches 0 at
/// the end-of-turn tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub name: String,
    pub turns_left: u32,
    pub stacks: u32,
}

#[derive(Debug, Clone)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub stats: BaseStats,
    pub max_soldiers: u32,
    pub soldiers: u32,
    pub unique_skill: Arc<Skill>,
    pub learn20_skill: Option<Arc<Skill>>,
    pub awaken_skill: Option<Arc<Skill>>,
    pub statuses: HashMap<String, Status>,
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        self.soldiers > 0
    }

    pub fn has_status(&self, name: &str) -> bool {
        self.statuses
            .get(name)
            .map(|status| status.turns_left > 0)
            .unwrap_or(false)
    }

    /// Applies or refreshes a status. Re-application keeps the longer of the
    /// two durations and adds stacks up to [MAX_STATUS_STACKS].
    pub fn add_status(&mut self, name: &str, turns: u32, stacks: u32) {
        match self.statuses.get_mut(name) {
            Some(status) => {
                status.turns_left = status.turns_left.max(turns);
                status.stacks = (status.stacks + stacks).min(MAX_STATUS_STACKS);
            }
            None => {
                self.statuses.insert(
                    name.to_string(),
                    Status {
                        name: name.to_string(),
                        turns_left: turns,
                        stacks: stacks.min(MAX_STATUS_STACKS),
                    },
                );
            }
        }
    }

    /// End-of-turn tick: every status loses one turn; expired entries are
    /// removed.
    pub fn tick_statuses(&mut self) {
        self.statuses.retain(|_, status| {
            status.turns_left = status.turns_left.saturating_sub(1);
            status.turns_left > 0
        });
    }

    /// Subtracts damage, floored at 0 soldiers.
    pub fn take_damage(&mut self, amount: u32) {
        self.soldiers = self.soldiers.saturating_sub(amount);
    }

    /// Adds healed soldiers, capped at `max_soldiers`. The uncapped amount is
    /// the caller's to report; only the roster state clamps.
    pub fn receive_heal(&mut self, amount: u32) {
        self.soldiers = self.soldiers.saturating_add(amount).min(self.max_soldiers);
    }

    /// The unit's equipped skills in slot order: unique, learn20, awaken.
    pub fn skills(&self) -> Vec<Arc<Skill>> {
        let mut out = Vec::with_capacity(3);
        out.push(Arc::clone(&self.unique_skill));
        if let Some(skill) = &self.learn20_skill {
            out.push(Arc::clone(skill));
        }
        if let Some(skill) = &self.awaken_skill {
            out.push(Arc::clone(skill));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::skill::{SkillSlot, CONFUSION};

    fn test_unit(soldiers: u32, max_soldiers: u32) -> Unit {
        Unit {
            id: "U_TEST".to_string(),
            name: "Test".to_string(),
            stats: BaseStats::default(),
            max_soldiers,
            soldiers,
            unique_skill: Arc::new(Skill::placeholder("S_NONE", "Test", SkillSlot::Unique)),
            learn20_skill: None,
            awaken_skill: None,
            statuses: HashMap::new(),
        }
    }

    #[test]
    fn damage_floors_at_zero_soldiers() {
        let mut unit = test_unit(100, 100);
        unit.take_damage(250);
        assert_eq!(unit.soldiers, 0);
        assert!(!unit.is_alive());
    }

    #[test]
    fn heal_clamps_at_max_soldiers() {
        let mut unit = test_unit(90, 100);
        unit.receive_heal(50);
        assert_eq!(unit.soldiers, 100);
    }

    #[test]
    fn status_reapplication_refreshes_duration_and_adds_stacks() {
        let mut unit = test_unit(100, 100);
        unit.add_status(CONFUSION, 3, 1);
        unit.add_status(CONFUSION, 1, 2);

        let status = unit.statuses.get(CONFUSION).expect("status present");
        assert_eq!(status.turns_left, 3, "shorter re-application never shortens");
        assert_eq!(status.stacks, 3);
    }

    #[test]
    fn status_stacks_cap_at_ninety_nine() {
        let mut unit = test_unit(100, 100);
        for _ in 0..200 {
            unit.add_status(CONFUSION, 2, 1);
        }
        assert_eq!(unit.statuses[CONFUSION].stacks, MAX_STATUS_STACKS);
    }

    #[test]
    fn tick_expires_statuses_at_zero_turns() {
        let mut unit = test_unit(100, 100);
        unit.add_status(CONFUSION, 2, 1);

        unit.tick_statuses();
        assert!(unit.has_status(CONFUSION));

        unit.tick_statuses();
        assert!(!unit.has_status(CONFUSION));
        assert!(unit.statuses.is_empty());
    }
}
