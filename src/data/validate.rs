//! Dataset validation for unit and skill JSON files.
//!
//! Severity model: errors are records the simulator cannot use meaningfully
//! (missing/duplicate ids, out-of-range numbers); warnings are values the
//! simulator will silently default or ignore (unknown slots, timings, effect
//! types, heal targets), surfaced here so data authors catch typos.

use std::collections::HashSet;
use std::fmt;

use crate::data::loader::{load_skill_records, load_unit_records};
use crate::data::skill::SkillRecord;
use crate::data::unit::UnitRecord;

const SLOT_ENUM: &[&str] = &["unique", "learn20", "awaken"];
const TIMING_ENUM: &[&str] = &["start", "after_attack"];
const EFFECT_TYPE_ENUM: &[&str] = &["physical_damage", "strategy_damage", "heal", "status"];
const HEAL_TARGET_ENUM: &[&str] = &["ally_lowest"];
const STATUS_NAME_ENUM: &[&str] = &["confusion"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Validates a skills.json file. `Err` only for unreadable/unparseable input;
/// per-record findings land in the report.
pub fn validate_skill_dataset(path: &str) -> Result<ValidationReport, String> {
    let records = load_skill_records(path)
        .ok_or_else(|| format!("unable to read or parse skill dataset '{path}'"))?;
    Ok(validate_skill_records(&records))
}

pub fn validate_skill_records(records: &[SkillRecord]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_ids = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let context = format!("skill[{index}] id='{}'", record.skill_id);

        if record.skill_id.trim().is_empty() {
            report.push(ValidationSeverity::Error, &context, "missing non-empty 'skill_id'");
        } else if !seen_ids.insert(record.skill_id.clone()) {
            report.push(
                ValidationSeverity::Error,
                &context,
                format!("duplicate skill_id '{}'", record.skill_id),
            );
        }

        if !(0.0..=1.0).contains(&record.proc) || !record.proc.is_finite() {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.proc"),
                format!("proc {} outside [0, 1]", record.proc),
            );
        }

        if !SLOT_ENUM.contains(&record.slot.as_str()) {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.slot"),
                format!("unknown slot '{}' (defaults to learn20)", record.slot),
            );
        }

        if !TIMING_ENUM.contains(&record.timing.as_str()) {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.timing"),
                format!("unknown timing '{}' (defaults to after_attack)", record.timing),
            );
        }

        for (effect_index, effect) in record.effects.iter().enumerate() {
            let effect_context = format!("{context}.effects[{effect_index}]");

            if !EFFECT_TYPE_ENUM.contains(&effect.kind.as_str()) {
                report.push(
                    ValidationSeverity::Warning,
                    &effect_context,
                    format!("unrecognized effect type '{}' (ignored by simulator)", effect.kind),
                );
                continue;
            }

            if let Some(rate) = effect.rate {
                if !rate.is_finite() || rate < 0.0 {
                    report.push(
                        ValidationSeverity::Error,
                        format!("{effect_context}.rate"),
                        format!("rate {rate} is not a non-negative finite number"),
                    );
                }
            }

            match effect.kind.as_str() {
                "heal" => {
                    if let Some(target) = effect.target.as_deref() {
                        if !HEAL_TARGET_ENUM.contains(&target) {
                            report.push(
                                ValidationSeverity::Warning,
                                format!("{effect_context}.target"),
                                format!("unknown heal target '{target}' (defaults to the caster)"),
                            );
                        }
                    }
                    if effect.count == Some(0) {
                        report.push(
                            ValidationSeverity::Warning,
                            format!("{effect_context}.count"),
                            "heal count 0 never selects a recipient",
                        );
                    }
                }
                "status" => {
                    match effect.name.as_deref() {
                        Some(name) if STATUS_NAME_ENUM.contains(&name) => {}
                        Some(name) => report.push(
                            ValidationSeverity::Info,
                            format!("{effect_context}.name"),
                            format!("status '{name}' is not wired into the resolver and has no effect"),
                        ),
                        None => report.push(
                            ValidationSeverity::Error,
                            format!("{effect_context}.name"),
                            "status effect is missing 'name'",
                        ),
                    }
                    if effect.turns == Some(0) {
                        report.push(
                            ValidationSeverity::Warning,
                            format!("{effect_context}.turns"),
                            "status with 0 turns expires before it can act",
                        );
                    }
                }
                _ => {}
            }
        }
    }

    report
}

/// Validates a units.json file against a set of known skill ids.
pub fn validate_unit_dataset(path: &str, known_skills: &HashSet<String>) -> Result<ValidationReport, String> {
    let records = load_unit_records(path)
        .ok_or_else(|| format!("unable to read or parse unit dataset '{path}'"))?;
    Ok(validate_unit_records(&records, known_skills))
}

pub fn validate_unit_records(
    records: &[UnitRecord],
    known_skills: &HashSet<String>,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_ids = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let context = format!("unit[{index}] id='{}'", record.unit_id);

        if record.unit_id.trim().is_empty() {
            report.push(ValidationSeverity::Error, &context, "missing non-empty 'unit_id'");
        } else if !seen_ids.insert(record.unit_id.clone()) {
            report.push(
                ValidationSeverity::Error,
                &context,
                format!("duplicate unit_id '{}'", record.unit_id),
            );
        }

        if record.name.trim().is_empty() {
            report.push(ValidationSeverity::Warning, &context, "missing display 'name'");
        }

        let stats = [
            ("str", record.base_stats.str),
            ("int", record.base_stats.int),
            ("lea", record.base_stats.lea),
            ("spd", record.base_stats.spd),
        ];
        for (label, value) in stats {
            if !value.is_finite() || value < 0.0 {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}.base_stats.{label}"),
                    format!("stat {value} is not a non-negative finite number"),
                );
            }
        }

        if record.max_soldiers == 0 {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.max_soldiers"),
                "max_soldiers 0 means the unit can never field troops",
            );
        }

        let skill_refs = [
            ("unique_skill_id", Some(&record.unique_skill_id)),
            ("learn20_skill_id", record.learn20_skill_id.as_ref()),
            ("awaken_skill_id", record.awaken_skill_id.as_ref()),
        ];
        for (label, id) in skill_refs {
            if let Some(id) = id {
                if !id.is_empty() && !known_skills.contains(id) {
                    report.push(
                        ValidationSeverity::Warning,
                        format!("{context}.{label}"),
                        format!("references unknown skill '{id}' (resolves to an inert placeholder)"),
                    );
                }
            }
        }
    }

    report
}
