//! Effect interpreter.
//!
//! Applies a skill's effect list in declaration order against resolved
//! targets. Activation (`proc`) gating happens in the resolver before this is
//! called; everything here applies unconditionally.

use crate::battle::engine::{Battlefield, UnitRef};
use crate::battle::formula;
use crate::battle::rng::Rng;
use crate::battle::skill::{HealTarget, Skill, SkillEffect, CONFUSION};
use crate::battle::tuning::Tuning;

/// Applies every effect of `skill`, cast by `caster` with `target` as the
/// primary enemy. Heals resolve their recipients fresh per effect.
pub fn apply_skill(
    tuning: &Tuning,
    rng: &mut Rng,
    field: &mut Battlefield,
    skill: &Skill,
    caster: UnitRef,
    target: UnitRef,
) {
    for effect in &skill.effects {
        match effect {
            SkillEffect::PhysicalDamage { rate } => {
                let damage =
                    formula::physical_damage(tuning, rng, field.unit(caster), field.unit(target), *rate);
                field.unit_mut(target).take_damage(damage);
            }
            SkillEffect::StrategyDamage { rate } => {
                let damage =
                    formula::strategy_damage(tuning, rng, field.unit(caster), field.unit(target), *rate);
                field.unit_mut(target).take_damage(damage);
            }
            SkillEffect::Heal { rate, target: selector, count } => {
                let recipients = match selector {
                    HealTarget::AllyLowest => field.weakest_living(caster.side, *count),
                    HealTarget::Caster => vec![caster.index],
                };
                for index in recipients {
                    let amount = formula::heal_amount(tuning, rng, field.unit(caster), *rate);
                    field
                        .unit_mut(UnitRef { side: caster.side, index })
                        .receive_heal(amount);
                }
            }
            SkillEffect::Inflict { name, turns } => {
                // Only confusion is wired into the resolver today; other
                // status names pass through without effect.
                if name == CONFUSION {
                    field.unit_mut(target).add_status(CONFUSION, *turns, 1);
                }
            }
        }
    }
}
