//! Monte Carlo aggregation over many independent battles.
//!
//! Sub-seeds for all trials are derived from the top-level seed on one
//! sequential generator before any trial runs, so the aggregate depends only
//! on (factory, trials, seed) — never on execution order or thread count.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::battle::engine::{BattleResult, Winner};
use crate::battle::rng::Rng;
use crate::parallel::batch::batch_ranges;
use crate::parallel::pool::WorkerPool;
use crate::sim::stats::{summarize, DistributionSummary};

/// How many of the most-triggered skills the aggregate reports.
pub const TOP_TRIGGER_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTriggerCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub trials: usize,
    pub wins_a: u64,
    pub wins_b: u64,
    pub draws: u64,
    pub win_rate_a: f64,
    pub win_rate_b: f64,
    pub draw_rate: f64,
    pub loss_a: DistributionSummary,
    pub loss_b: DistributionSummary,
    /// Top skills by total trigger count across all trials, descending;
    /// equal counts order by name so the report is stable.
    pub top_triggers: Vec<SkillTriggerCount>,
}

/// Running fold of battle results. Also the per-batch partial for the
/// parallel runner; merge order is fixed by batch order, keeping the final
/// aggregate identical to a sequential run.
#[derive(Debug, Default)]
struct Accumulator {
    wins_a: u64,
    wins_b: u64,
    draws: u64,
    loss_a: Vec<f64>,
    loss_b: Vec<f64>,
    triggers: HashMap<String, u64>,
}

impl Accumulator {
    fn fold(&mut self, result: &BattleResult) {
        match result.winner {
            Winner::A => self.wins_a += 1,
            Winner::B => self.wins_b += 1,
            Winner::Draw => self.draws += 1,
        }
        self.loss_a.push(result.loss_rate_a);
        self.loss_b.push(result.loss_rate_b);
        for (name, count) in &result.triggers {
            *self.triggers.entry(name.clone()).or_insert(0) += count;
        }
    }

    fn merge(&mut self, other: Accumulator) {
        self.wins_a += other.wins_a;
        self.wins_b += other.wins_b;
        self.draws += other.draws;
        self.loss_a.extend(other.loss_a);
        self.loss_b.extend(other.loss_b);
        for (name, count) in other.triggers {
            *self.triggers.entry(name).or_insert(0) += count;
        }
    }

    fn finish(self, trials: usize) -> AggregateResult {
        let rate = |count: u64| {
            if trials == 0 {
                0.0
            } else {
                count as f64 / trials as f64
            }
        };

        let mut ranked: Vec<SkillTriggerCount> = self
            .triggers
            .into_iter()
            .map(|(name, count)| SkillTriggerCount { name, count })
            .collect();
        ranked.sort_by(|x, y| y.count.cmp(&x.count).then_with(|| x.name.cmp(&y.name)));
        ranked.truncate(TOP_TRIGGER_LIMIT);

        AggregateResult {
            trials,
            wins_a: self.wins_a,
            wins_b: self.wins_b,
            draws: self.draws,
            win_rate_a: rate(self.wins_a),
            win_rate_b: rate(self.wins_b),
            draw_rate: rate(self.draws),
            loss_a: summarize(&self.loss_a),
            loss_b: summarize(&self.loss_b),
            top_triggers: ranked,
        }
    }
}

/// One independent sub-seed per trial, drawn sequentially from the top-level
/// seed. The caller's seed is never handed to a trial directly.
pub fn derive_sub_seeds(seed: u64, trials: usize) -> Vec<u64> {
    let mut rng = Rng::new(seed);
    (0..trials).map(|_| rng.next_u64()).collect()
}

/// Runs `trials` battles sequentially and folds their results.
///
/// The factory must construct wholly fresh unit instances per call from
/// immutable configuration; a unit object is never reused across battles.
pub fn simulate_many<F>(mut factory: F, trials: usize, seed: u64) -> AggregateResult
where
    F: FnMut(u64) -> BattleResult,
{
    let mut accumulator = Accumulator::default();
    for sub_seed in derive_sub_seeds(seed, trials) {
        accumulator.fold(&factory(sub_seed));
    }
    accumulator.finish(trials)
}

/// Like [simulate_many] but distributes trials across worker threads via
/// Rayon. Sub-seeds are assigned before dispatch and partial aggregates merge
/// in batch order, so the result is identical to the sequential run.
pub fn simulate_many_parallel<F>(
    factory: F,
    trials: usize,
    seed: u64,
    pool: &WorkerPool,
) -> AggregateResult
where
    F: Fn(u64) -> BattleResult + Sync,
{
    let sub_seeds = derive_sub_seeds(seed, trials);
    pool.install(|| {
        let batches = batch_ranges(trials, rayon::current_num_threads().max(1) * 4);
        let partials: Vec<Accumulator> = batches
            .into_par_iter()
            .map(|(start, end)| {
                let mut partial = Accumulator::default();
                for &sub_seed in &sub_seeds[start..end] {
                    partial.fold(&factory(sub_seed));
                }
                partial
            })
            .collect();

        let mut total = Accumulator::default();
        for partial in partials {
            total.merge(partial);
        }
        total.finish(trials)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_seeds_are_reproducible_and_distinct_from_the_parent() {
        let first = derive_sub_seeds(42, 100);
        let second = derive_sub_seeds(42, 100);
        assert_eq!(first, second);
        assert!(!first.contains(&42), "caller's seed must not run a trial");
    }

    #[test]
    fn zero_trials_yield_zero_rates() {
        let result = simulate_many(|_| unreachable!("no trials requested"), 0, 7);
        assert_eq!(result.trials, 0);
        assert_eq!(result.win_rate_a, 0.0);
        assert_eq!(result.draw_rate, 0.0);
        assert_eq!(result.loss_a, DistributionSummary::default());
        assert!(result.top_triggers.is_empty());
    }

    #[test]
    fn trigger_ranking_orders_by_count_then_name() {
        let mut accumulator = Accumulator::default();
        accumulator.triggers.insert("Bravo".to_string(), 3);
        accumulator.triggers.insert("Alpha".to_string(), 3);
        accumulator.triggers.insert("Zulu".to_string(), 9);

        let ranked = accumulator.finish(1).top_triggers;
        let names: Vec<&str> = ranked.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Zulu", "Alpha", "Bravo"]);
    }

    #[test]
    fn trigger_ranking_truncates_to_the_report_limit() {
        let mut accumulator = Accumulator::default();
        for index in 0..TOP_TRIGGER_LIMIT + 5 {
            accumulator.triggers.insert(format!("skill_{index:02}"), index as u64);
        }
        assert_eq!(accumulator.finish(1).top_triggers.len(), TOP_TRIGGER_LIMIT);
    }
}
