//! Turn-by-turn battle resolver.
//!
//! A battle is a strictly sequential state machine over two three-unit teams:
//! pre-turn termination check, speed-ordered start-timing skills, basic
//! attacks with after-attack skills, then the end-of-turn status tick. All
//! randomness comes from the single seeded generator owned by the battle, so
//! a (rosters, tuning, seed) triple replays bit-for-bit.

use std::collections::HashMap;

use serde::Serialize;

use crate::battle::effects::apply_skill;
use crate::battle::formula;
use crate::battle::rng::Rng;
use crate::battle::skill::{SkillTiming, CONFUSION};
use crate::battle::tuning::Tuning;
use crate::battle::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// Position of one unit on the battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRef {
    pub side: Side,
    pub index: usize,
}

/// Both rosters, addressed by [UnitRef]. Mutated in place for the duration of
/// one battle.
#[derive(Debug)]
pub struct Battlefield {
    teams: [Vec<Unit>; 2],
}

impl Battlefield {
    pub fn new(team_a: Vec<Unit>, team_b: Vec<Unit>) -> Self {
        Self { teams: [team_a, team_b] }
    }

    pub fn team(&self, side: Side) -> &[Unit] {
        &self.teams[side.index()]
    }

    pub fn unit(&self, at: UnitRef) -> &Unit {
        &self.teams[at.side.index()][at.index]
    }

    pub fn unit_mut(&mut self, at: UnitRef) -> &mut Unit {
        &mut self.teams[at.side.index()][at.index]
    }

    pub fn has_living(&self, side: Side) -> bool {
        self.team(side).iter().any(Unit::is_alive)
    }

    pub fn living_indices(&self, side: Side) -> Vec<usize> {
        self.team(side)
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.is_alive())
            .map(|(index, _)| index)
            .collect()
    }

    /// Indices of up to `count` living units on `side`, ascending by soldier
    /// count. Ties keep roster order (stable sort).
    pub fn weakest_living(&self, side: Side, count: usize) -> Vec<usize> {
        let mut indices = self.living_indices(side);
        indices.sort_by_key(|&index| self.team(side)[index].soldiers);
        indices.truncate(count);
        indices
    }

    pub fn total_soldiers(&self, side: Side) -> u64 {
        self.team(side).iter().map(|unit| u64::from(unit.soldiers)).sum()
    }

    fn tick_statuses(&mut self) {
        for team in &mut self.teams {
            for unit in team.iter_mut().filter(|unit| unit.is_alive()) {
                unit.tick_statuses();
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    A,
    B,
    #[serde(rename = "draw")]
    Draw,
}

/// Outcome of a single battle, fed into the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleResult {
    pub winner: Winner,
    /// Complete turns elapsed when the battle ended.
    pub turns: u32,
    pub loss_rate_a: f64,
    pub loss_rate_b: f64,
    /// Skill display label -> activation count during this battle.
    pub triggers: HashMap<String, u64>,
}

/// Runs one battle to its terminal state.
pub fn run_battle(tuning: &Tuning, seed: u64, team_a: Vec<Unit>, team_b: Vec<Unit>) -> BattleResult {
    let mut field = Battlefield::new(team_a, team_b);
    let mut rng = Rng::new(seed);
    let mut triggers: HashMap<String, u64> = HashMap::new();
    let initial = [field.total_soldiers(Side::A), field.total_soldiers(Side::B)];

    for turn in 1..=tuning.max_turns {
        // A simultaneous wipe is a draw, not a win for whichever side happens
        // to be checked first.
        match (field.has_living(Side::A), field.has_living(Side::B)) {
            (false, false) => return finalize(Winner::Draw, turn - 1, initial, &field, triggers),
            (false, true) => return finalize(Winner::B, turn - 1, initial, &field, triggers),
            (true, false) => return finalize(Winner::A, turn - 1, initial, &field, triggers),
            (true, true) => {}
        }

        let order = turn_order(&field, &mut rng);

        for &actor in &order {
            run_start_phase(tuning, &mut rng, &mut field, &mut triggers, actor);
        }
        for &actor in &order {
            run_attack_phase(tuning, &mut rng, &mut field, &mut triggers, actor);
        }

        field.tick_statuses();
    }

    finalize(Winner::Draw, tuning.max_turns, initial, &field, triggers)
}

/// All living units, fastest first. Equal speeds are broken by a fresh random
/// draw per unit, used purely as a secondary sort key.
fn turn_order(field: &Battlefield, rng: &mut Rng) -> Vec<UnitRef> {
    let mut keyed: Vec<(UnitRef, f64, f64)> = Vec::new();
    for side in [Side::A, Side::B] {
        for index in field.living_indices(side) {
            let at = UnitRef { side, index };
            keyed.push((at, field.unit(at).stats.spd, rng.next_f64()));
        }
    }
    keyed.sort_by(|x, y| y.1.total_cmp(&x.1).then(y.2.total_cmp(&x.2)));
    keyed.into_iter().map(|(at, _, _)| at).collect()
}

fn skips_action(tuning: &Tuning, unit: &Unit) -> bool {
    tuning.confusion_skip_action && unit.has_status(CONFUSION)
}

/// Picks one living enemy uniformly at random, or None when the pool is empty
/// (which short-circuits the actor's action with no effect).
fn pick_enemy(field: &Battlefield, rng: &mut Rng, actor: UnitRef) -> Option<UnitRef> {
    let enemy_side = actor.side.opponent();
    let pool = field.living_indices(enemy_side);
    if pool.is_empty() {
        return None;
    }
    Some(UnitRef { side: enemy_side, index: pool[rng.pick_index(pool.len())] })
}

fn run_start_phase(
    tuning: &Tuning,
    rng: &mut Rng,
    field: &mut Battlefield,
    triggers: &mut HashMap<String, u64>,
    actor: UnitRef,
) {
    let unit = field.unit(actor);
    if !unit.is_alive() || skips_action(tuning, unit) {
        return;
    }
    let Some(target) = pick_enemy(field, rng, actor) else {
        return;
    };

    for skill in field.unit(actor).skills() {
        if skill.timing == SkillTiming::Start && rng.chance(skill.proc) {
            record_trigger(triggers, &skill.name);
            apply_skill(tuning, rng, field, &skill, actor, target);
        }
    }
}

fn run_attack_phase(
    tuning: &Tuning,
    rng: &mut Rng,
    field: &mut Battlefield,
    triggers: &mut HashMap<String, u64>,
    actor: UnitRef,
) {
    // Re-check: the actor may have died during the start pass.
    let unit = field.unit(actor);
    if !unit.is_alive() || skips_action(tuning, unit) {
        return;
    }
    let Some(target) = pick_enemy(field, rng, actor) else {
        return;
    };

    let damage = formula::physical_damage(tuning, rng, field.unit(actor), field.unit(target), 1.0);
    field.unit_mut(target).take_damage(damage);

    // After-attack skills fire only when the basic attack left the target
    // standing. The survival check happens once; a kill by an earlier skill
    // does not stop the remaining ones.
    if !field.unit(target).is_alive() {
        return;
    }
    for skill in field.unit(actor).skills() {
        if skill.timing == SkillTiming::AfterAttack && rng.chance(skill.proc) {
            record_trigger(triggers, &skill.name);
            apply_skill(tuning, rng, field, &skill, actor, target);
        }
    }
}

fn record_trigger(triggers: &mut HashMap<String, u64>, name: &str) {
    *triggers.entry(name.to_string()).or_insert(0) += 1;
}

fn finalize(
    winner: Winner,
    turns: u32,
    initial: [u64; 2],
    field: &Battlefield,
    triggers: HashMap<String, u64>,
) -> BattleResult {
    // Healing can leave a roster above its starting total, so the loss rate
    // may legitimately go negative.
    let loss_rate = |initial: u64, remaining: u64| {
        if initial == 0 {
            0.0
        } else {
            (initial as f64 - remaining as f64) / initial as f64
        }
    };
    BattleResult {
        winner,
        turns,
        loss_rate_a: loss_rate(initial[0], field.total_soldiers(Side::A)),
        loss_rate_b: loss_rate(initial[1], field.total_soldiers(Side::B)),
        triggers,
    }
}
