//! Tunable formula and resolver parameters.
//!
//! Loaded from a flat JSON mapping; any absent key falls back to its
//! documented default, so an empty `{}` (or a missing file) is a valid
//! configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fraction of `lea` mixed into physical attack power.
    pub attack_mix_lea: f64,
    /// Multiplier on the defender's `lea` subtracted from physical attack.
    pub defense_factor_physical: f64,
    pub physical_scale: f64,
    /// Multiplier on the defender's `int` subtracted from strategy attack.
    pub defense_factor_strategy: f64,
    pub strategy_scale: f64,
    pub heal_scale: f64,
    /// Lower/upper bound of the uniform jitter applied to every damage and
    /// heal roll.
    pub random_min: f64,
    pub random_max: f64,
    /// Battle length before a draw is declared.
    pub max_turns: u32,
    /// When true, a confused unit skips its action for the turn.
    pub confusion_skip_action: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            attack_mix_lea: 0.5,
            defense_factor_physical: 0.7,
            physical_scale: 20.0,
            defense_factor_strategy: 0.8,
            strategy_scale: 22.0,
            heal_scale: 18.0,
            random_min: 0.95,
            random_max: 1.05,
            max_turns: 8,
            confusion_skip_action: true,
        }
    }
}

impl Tuning {
    /// Deterministic variant used by tests and golden scenarios: the jitter
    /// interval collapses to exactly 1.0.
    pub fn without_jitter(mut self) -> Self {
        self.random_min = 1.0;
        self.random_max = 1.0;
        self
    }
}
