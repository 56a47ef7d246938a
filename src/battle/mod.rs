pub mod effects;
pub mod engine;
pub mod formula;
pub mod rng;
pub mod skill;
pub mod tuning;
pub mod unit;

pub use engine::{run_battle, BattleResult, Battlefield, Side, UnitRef, Winner};
pub use rng::Rng;
pub use skill::{HealTarget, Skill, SkillEffect, SkillSlot, SkillTiming, CONFUSION};
pub use tuning::Tuning;
pub use unit::{BaseStats, Status, Unit, MAX_STATUS_STACKS};
