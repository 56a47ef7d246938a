//! Skill definitions: slot/timing classification, activation probability and
//! the closed effect vocabulary the interpreter understands.
//!
//! Skills are decoded once from configuration records and shared read-only
//! (`Arc<Skill>`) across units, battles and trials.

/// Status name the resolver treats specially: an afflicted unit skips its
/// action while the `confusion_skip_action` tunable is on.
pub const CONFUSION: &str = "confusion";

/// Acquisition source of a skill. Purely descriptive; resolution logic never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillSlot {
    Unique,
    Learn20,
    Awaken,
}

/// When a skill is eligible to activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillTiming {
    /// Once per turn, before any basic attacks resolve.
    Start,
    /// Only if the unit's own basic attack this turn did not defeat its target.
    AfterAttack,
}

/// Recipient selector for heal effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealTarget {
    /// The casting unit itself.
    Caster,
    /// Up to `count` living allies ordered by ascending soldier count.
    AllyLowest,
}

/// One step of a skill's effect list. Closed vocabulary; record decoding drops
/// unrecognized tags so new effect kinds stay forward-compatible no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillEffect {
    PhysicalDamage { rate: f64 },
    StrategyDamage { rate: f64 },
    Heal { rate: f64, target: HealTarget, count: usize },
    Inflict { name: String, turns: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub id: String,
    /// Display label; trigger counts are keyed by this.
    pub name: String,
    pub slot: SkillSlot,
    pub timing: SkillTiming,
    /// Activation probability in `[0, 1]`, sampled each time the timing
    /// condition is met.
    pub proc: f64,
    /// Applied in declaration order on activation.
    pub effects: Vec<SkillEffect>,
}

impl Skill {
    /// Inert stand-in used when a unit references a skill id that is not in
    /// the dataset: never procs, does nothing.
    pub fn placeholder(id: &str, name: &str, slot: SkillSlot) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slot,
            timing: SkillTiming::AfterAttack,
            proc: 0.0,
            effects: Vec::new(),
        }
    }
}
