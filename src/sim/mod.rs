pub mod aggregate;
pub mod stats;

pub use aggregate::{
    derive_sub_seeds, simulate_many, simulate_many_parallel, AggregateResult, SkillTriggerCount,
    TOP_TRIGGER_LIMIT,
};
pub use stats::{summarize, DistributionSummary};
