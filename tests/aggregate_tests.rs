use shinsen::battle::engine::BattleResult;
use shinsen::battle::Tuning;
use shinsen::cli::{demo_skills, demo_units};
use shinsen::data::{build_skill_index, build_unit, SkillIndex, UnitRecord};
use shinsen::parallel::WorkerPool;
use shinsen::sim::{simulate_many, simulate_many_parallel, TOP_TRIGGER_LIMIT};

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "expected {b}, got {a}");
}

/// Fresh-units-per-trial factory over the built-in demo matchup.
struct DemoMatchup {
    tuning: Tuning,
    units: Vec<UnitRecord>,
    skills: SkillIndex,
}

impl DemoMatchup {
    fn new() -> Self {
        Self {
            tuning: Tuning::default(),
            units: demo_units(),
            skills: build_skill_index(&demo_skills()),
        }
    }

    fn run_once(&self, seed: u64) -> BattleResult {
        let roster = |records: &[UnitRecord]| {
            records
                .iter()
                .map(|record| build_unit(record, &self.skills, record.max_soldiers))
                .collect()
        };
        shinsen::battle::run_battle(
            &self.tuning,
            seed,
            roster(&self.units[..3]),
            roster(&self.units[3..6]),
        )
    }
}

#[test]
fn repeated_runs_with_one_seed_are_identical() {
    let matchup = DemoMatchup::new();
    let first = simulate_many(|seed| matchup.run_once(seed), 100, 42);
    let second = simulate_many(|seed| matchup.run_once(seed), 100, 42);
    assert_eq!(first, second);
}

#[test]
fn outcome_rates_partition_the_trials() {
    let matchup = DemoMatchup::new();
    let result = simulate_many(|seed| matchup.run_once(seed), 100, 42);

    assert_eq!(result.trials, 100);
    assert_eq!(result.wins_a + result.wins_b + result.draws, 100);
    approx_eq(result.win_rate_a + result.win_rate_b + result.draw_rate, 1.0, 1e-9);
}

#[test]
fn different_top_level_seeds_change_the_aggregate() {
    let matchup = DemoMatchup::new();
    let first = simulate_many(|seed| matchup.run_once(seed), 200, 1);
    let second = simulate_many(|seed| matchup.run_once(seed), 200, 2);
    assert_ne!(first, second);
}

#[test]
fn parallel_aggregate_matches_sequential_exactly() {
    let matchup = DemoMatchup::new();
    let sequential = simulate_many(|seed| matchup.run_once(seed), 250, 9);

    for workers in [1, 2, 4] {
        let parallel = simulate_many_parallel(
            |seed| matchup.run_once(seed),
            250,
            9,
            &WorkerPool::with_workers(workers),
        );
        assert_eq!(parallel, sequential, "{workers} workers");
    }
}

#[test]
fn loss_summaries_are_plausible_distributions() {
    let matchup = DemoMatchup::new();
    let result = simulate_many(|seed| matchup.run_once(seed), 300, 17);

    for summary in [result.loss_a, result.loss_b] {
        assert!(summary.min <= summary.median && summary.median <= summary.max);
        assert!(summary.min <= summary.mean && summary.mean <= summary.max);
        assert!(summary.stdev >= 0.0);
        assert!(summary.max <= 1.0, "losses cannot exceed the starting roster");
    }
}

#[test]
fn trigger_report_is_sorted_bounded_and_sums_battles() {
    let matchup = DemoMatchup::new();
    let result = simulate_many(|seed| matchup.run_once(seed), 300, 23);

    assert!(!result.top_triggers.is_empty(), "demo skills should fire over 300 trials");
    assert!(result.top_triggers.len() <= TOP_TRIGGER_LIMIT);
    for window in result.top_triggers.windows(2) {
        assert!(window[0].count >= window[1].count, "descending by count");
    }
    for entry in &result.top_triggers {
        assert!(entry.count > 0);
    }
}
