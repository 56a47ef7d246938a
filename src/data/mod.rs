pub mod loader;
pub mod skill;
pub mod unit;
pub mod validate;

pub use loader::{
    build_skill_index, build_unit_index, load_skill_records, load_tuning, load_unit_records,
    DEFAULT_SKILLS_PATH, DEFAULT_TUNING_PATH, DEFAULT_UNITS_PATH,
};
pub use skill::{EffectRecord, SkillRecord};
pub use unit::{build_unit, SkillIndex, UnitRecord, DEFAULT_MAX_SOLDIERS};
pub use validate::{
    validate_skill_dataset, validate_skill_records, validate_unit_dataset, validate_unit_records,
    ValidationDiagnostic, ValidationReport, ValidationSeverity,
};
