//! Damage and heal formulas.
//!
//! Pure except for the uniform jitter draw each roll consumes from the
//! battle's generator. All amounts are floored to an integer with a minimum
//! of 1; the caller applies them to roster state.

use crate::battle::rng::Rng;
use crate::battle::tuning::Tuning;
use crate::battle::unit::Unit;

/// Fraction of maximum soldiers still fielded, degrading output as troops
/// dwindle. A zero-max unit scales at 1.0 (it is also dead and never acts).
pub fn troop_scale(unit: &Unit) -> f64 {
    if unit.max_soldiers == 0 {
        1.0
    } else {
        unit.soldiers as f64 / unit.max_soldiers as f64
    }
}

/// Physical damage: `str` (plus a tunable share of `lea`) against the
/// defender's `lea`.
pub fn physical_damage(
    tuning: &Tuning,
    rng: &mut Rng,
    attacker: &Unit,
    defender: &Unit,
    rate: f64,
) -> u32 {
    let attack = attacker.stats.str + tuning.attack_mix_lea * attacker.stats.lea;
    let defense = defender.stats.lea;
    let base = (attack - tuning.defense_factor_physical * defense).max(0.0);
    roll(tuning, rng, base * rate * tuning.physical_scale * troop_scale(attacker))
}

/// Strategy damage: `int` against `int`, with its own defense factor and
/// scale.
pub fn strategy_damage(
    tuning: &Tuning,
    rng: &mut Rng,
    attacker: &Unit,
    defender: &Unit,
    rate: f64,
) -> u32 {
    let base =
        (attacker.stats.int - tuning.defense_factor_strategy * defender.stats.int).max(0.0);
    roll(tuning, rng, base * rate * tuning.strategy_scale * troop_scale(attacker))
}

/// Soldiers restored by one heal roll, scaled off the healer's `int`. The
/// returned amount is uncapped; the recipient clamps at its maximum.
pub fn heal_amount(tuning: &Tuning, rng: &mut Rng, healer: &Unit, rate: f64) -> u32 {
    roll(tuning, rng, healer.stats.int * rate * tuning.heal_scale)
}

fn roll(tuning: &Tuning, rng: &mut Rng, amount: f64) -> u32 {
    let jittered = amount * rng.uniform(tuning.random_min, tuning.random_max);
    jittered.max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::skill::{Skill, SkillSlot};
    use crate::battle::unit::BaseStats;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn unit_with(stats: BaseStats, soldiers: u32, max_soldiers: u32) -> Unit {
        Unit {
            id: "U".to_string(),
            name: "U".to_string(),
            stats,
            max_soldiers,
            soldiers,
            unique_skill: Arc::new(Skill::placeholder("S", "S", SkillSlot::Unique)),
            learn20_skill: None,
            awaken_skill: None,
            statuses: HashMap::new(),
        }
    }

    fn flat_tuning() -> Tuning {
        Tuning::default().without_jitter()
    }

    #[test]
    fn physical_damage_is_deterministic_without_jitter() {
        let tuning = flat_tuning();
        let attacker = unit_with(
            BaseStats { str: 100.0, int: 0.0, lea: 40.0, spd: 0.0 },
            10_000,
            10_000,
        );
        let defender = unit_with(
            BaseStats { str: 0.0, int: 0.0, lea: 50.0, spd: 0.0 },
            10_000,
            10_000,
        );

        // attack = 100 + 0.5*40 = 120; defense = 0.7*50 = 35; base = 85; *20 = 1700.
        let mut rng = Rng::new(1);
        assert_eq!(physical_damage(&tuning, &mut rng, &attacker, &defender, 1.0), 1700);
    }

    #[test]
    fn damage_never_drops_below_one() {
        let tuning = flat_tuning();
        let attacker = unit_with(
            BaseStats { str: 1.0, int: 0.0, lea: 0.0, spd: 0.0 },
            10_000,
            10_000,
        );
        let defender = unit_with(
            BaseStats { str: 0.0, int: 0.0, lea: 500.0, spd: 0.0 },
            10_000,
            10_000,
        );

        let mut rng = Rng::new(1);
        assert_eq!(physical_damage(&tuning, &mut rng, &attacker, &defender, 1.0), 1);
    }

    #[test]
    fn troop_scale_degrades_output_proportionally() {
        let tuning = flat_tuning();
        let stats = BaseStats { str: 100.0, int: 0.0, lea: 0.0, spd: 0.0 };
        let full = unit_with(stats, 10_000, 10_000);
        let half = unit_with(stats, 5_000, 10_000);
        let defender = unit_with(BaseStats::default(), 10_000, 10_000);

        let mut rng = Rng::new(1);
        let full_damage = physical_damage(&tuning, &mut rng, &full, &defender, 1.0);
        let half_damage = physical_damage(&tuning, &mut rng, &half, &defender, 1.0);
        assert_eq!(half_damage * 2, full_damage);
    }

    #[test]
    fn zero_max_soldiers_scales_at_one() {
        let ghost = unit_with(BaseStats::default(), 0, 0);
        assert_eq!(troop_scale(&ghost), 1.0);
    }

    #[test]
    fn strategy_damage_uses_int_pair() {
        let tuning = flat_tuning();
        let attacker = unit_with(
            BaseStats { str: 0.0, int: 100.0, lea: 0.0, spd: 0.0 },
            10_000,
            10_000,
        );
        let defender = unit_with(
            BaseStats { str: 0.0, int: 50.0, lea: 0.0, spd: 0.0 },
            10_000,
            10_000,
        );

        // base = 100 - 0.8*50 = 60; *22 = 1320.
        let mut rng = Rng::new(1);
        assert_eq!(strategy_damage(&tuning, &mut rng, &attacker, &defender, 1.0), 1320);
    }

    #[test]
    fn heal_amount_scales_off_healer_int() {
        let tuning = flat_tuning();
        let healer = unit_with(
            BaseStats { str: 0.0, int: 80.0, lea: 0.0, spd: 0.0 },
            10_000,
            10_000,
        );

        // 80 * 1.0 * 18 = 1440.
        let mut rng = Rng::new(1);
        assert_eq!(heal_amount(&tuning, &mut rng, &healer, 1.0), 1440);
    }

    #[test]
    fn jitter_bounds_the_roll() {
        let tuning = Tuning::default();
        let attacker = unit_with(
            BaseStats { str: 100.0, int: 0.0, lea: 0.0, spd: 0.0 },
            10_000,
            10_000,
        );
        let defender = unit_with(BaseStats::default(), 10_000, 10_000);

        let mut rng = Rng::new(5);
        for _ in 0..200 {
            let damage = physical_damage(&tuning, &mut rng, &attacker, &defender, 1.0);
            // 2000 * U(0.95, 1.05), floored.
            assert!((1900..=2100).contains(&damage), "roll out of band: {damage}");
        }
    }
}
