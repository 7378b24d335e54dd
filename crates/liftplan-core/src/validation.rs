//! Structural validation of plan records in either format.
//!
//! Validators take untyped JSON so they can describe every defect of a
//! malformed record at once. They never fail: each problem becomes one
//! human-readable message in a [`ValidationReport`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{format::detect_day_format, format::detect_format, models::PlanFormat};

const MODULE_TYPES: [&str; 4] = ["warmup", "main", "core", "cooldown"];

/// Outcome of validating a plan record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Appends another report's findings to this one.
    pub fn merge(mut self, other: ValidationReport) -> Self {
        self.errors.extend(other.errors);
        self.is_valid = self.errors.is_empty();
        self
    }
}

/// Full validation: structural rules, plus the modular rules for every day
/// that carries modules.
///
/// A plan classified as modular gets the strict pass, which also requires
/// every day to be modular. A mixed plan still gets its modular days checked.
pub fn validate(plan: &Value) -> ValidationReport {
    let report = validate_structure(plan);
    if detect_format(plan) == Some(PlanFormat::Modular) {
        report.merge(validate_modular(plan))
    } else {
        report.merge(validate_modular_days(plan))
    }
}

/// Top-level, per-day and per-format structural checks.
pub fn validate_structure(plan: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    let Some(plan) = plan.as_object() else {
        return ValidationReport::from_errors(vec!["Plan must be a JSON object".to_string()]);
    };

    require_text(plan, "name", "Plan", &mut errors);
    require_text(plan, "description", "Plan", &mut errors);

    match plan.get("workouts") {
        Some(Value::Array(days)) if days.is_empty() => {
            errors.push("Plan must contain at least one workout day".to_string());
        }
        Some(Value::Array(days)) => {
            for (index, day) in days.iter().enumerate() {
                validate_day(day, &format!("Day {}", index + 1), &mut errors);
            }
        }
        Some(_) => errors.push("Plan 'workouts' must be an array".to_string()),
        None => errors.push("Plan 'workouts' is required".to_string()),
    }

    ValidationReport::from_errors(errors)
}

fn validate_day(day: &Value, label: &str, errors: &mut Vec<String>) {
    let Some(fields) = day.as_object() else {
        errors.push(format!("{label}: must be an object"));
        return;
    };

    require_text(fields, "day", label, errors);
    require_text(fields, "name", label, errors);

    match detect_day_format(day) {
        Some(PlanFormat::Modular) => {
            let modules = fields.get("modules").and_then(Value::as_array);
            for (index, module) in modules.into_iter().flatten().enumerate() {
                validate_module(module, &format!("{label}, module {}", index + 1), errors);
            }
        }
        Some(PlanFormat::Legacy) => {
            let exercises = fields.get("exercises").and_then(Value::as_array);
            validate_exercises(exercises.into_iter().flatten(), label, errors);
        }
        None => {
            if fields.contains_key("modules") {
                errors.push(format!("{label}: 'modules' must be an array"));
            } else if fields.contains_key("exercises") {
                errors.push(format!("{label}: 'exercises' must be an array"));
            } else {
                errors.push(format!("{label}: must have either 'modules' or 'exercises'"));
            }
        }
    }
}

fn validate_module(module: &Value, label: &str, errors: &mut Vec<String>) {
    let Some(fields) = module.as_object() else {
        errors.push(format!("{label}: must be an object"));
        return;
    };

    match fields.get("type").and_then(Value::as_str) {
        Some(kind) if MODULE_TYPES.contains(&kind) => {}
        Some(kind) => errors.push(format!(
            "{label}: invalid module type '{kind}' (expected one of {})",
            MODULE_TYPES.join(", ")
        )),
        None => errors.push(format!("{label}: 'type' is required")),
    }

    require_text(fields, "name", label, errors);

    match fields.get("exercises") {
        Some(Value::Array(exercises)) => validate_exercises(exercises.iter(), label, errors),
        Some(_) => errors.push(format!("{label}: 'exercises' must be an array")),
        None => errors.push(format!("{label}: 'exercises' is required")),
    }
}

fn validate_exercises<'a>(
    exercises: impl Iterator<Item = &'a Value>,
    label: &str,
    errors: &mut Vec<String>,
) {
    for (index, exercise) in exercises.enumerate() {
        let label = format!("{label}, exercise {}", index + 1);
        let Some(fields) = exercise.as_object() else {
            errors.push(format!("{label}: must be an object"));
            continue;
        };

        match fields.get("exercise_id") {
            Some(id) if id.as_u64().is_some() => {}
            Some(_) => errors.push(format!("{label}: 'exercise_id' must be a non-negative integer")),
            None => errors.push(format!("{label}: 'exercise_id' is required")),
        }

        require_text(fields, "exercise_name", &label, errors);

        match fields.get("sets") {
            Some(sets) if as_u32(sets).is_some_and(|n| n >= 1) => {}
            Some(_) => errors.push(format!("{label}: 'sets' must be an integer of at least 1")),
            None => errors.push(format!("{label}: 'sets' is required")),
        }

        match fields.get("reps") {
            Some(Value::String(_)) => {}
            Some(reps) if as_u32(reps).is_some() => {}
            Some(_) => errors.push(format!(
                "{label}: 'reps' must be a non-negative integer or a string such as \"8-12\""
            )),
            None => errors.push(format!("{label}: 'reps' is required")),
        }

        for key in ["rest", "suggested_weight", "notes"] {
            match fields.get(key) {
                None | Some(Value::String(_)) => {}
                Some(Value::Null) if key != "rest" => {}
                Some(_) => errors.push(format!("{label}: '{key}' must be a string")),
            }
        }

        if let Some(muscles) = fields.get("primary_muscles")
            && !muscles
                .as_array()
                .is_some_and(|muscles| muscles.iter().all(Value::is_string))
        {
            errors.push(format!("{label}: 'primary_muscles' must be an array of strings"));
        }
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

/// Second-pass rules that only apply to modular plans.
///
/// Requires `enabled_modules` at plan level and, per day, gapless 0-based
/// module orders and exactly one non-empty `main` module.
pub fn validate_modular(plan: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    let Some(fields) = plan.as_object() else {
        return ValidationReport::from_errors(vec!["Plan must be a JSON object".to_string()]);
    };

    require_enabled_modules(fields, &mut errors);

    let days = fields.get("workouts").and_then(Value::as_array);
    for (index, day) in days.into_iter().flatten().enumerate() {
        let label = format!("Day {}", index + 1);
        match day.get("modules").and_then(Value::as_array) {
            Some(modules) => validate_module_layout(modules, &label, &mut errors),
            None => errors.push(format!("{label}: modular plans require a 'modules' array")),
        }
    }

    ValidationReport::from_errors(errors)
}

/// Modular rules for the modular days of a plan that is not modular as a
/// whole. Plans without any modular day pass untouched.
fn validate_modular_days(plan: &Value) -> ValidationReport {
    // non-objects are already reported by the structural pass
    let Some(fields) = plan.as_object() else {
        return ValidationReport::from_errors(Vec::new());
    };
    let mut errors = Vec::new();

    let days = fields.get("workouts").and_then(Value::as_array);
    let modular_days: Vec<(usize, &Vec<Value>)> = days
        .into_iter()
        .flatten()
        .enumerate()
        .filter(|(_, day)| detect_day_format(day) == Some(PlanFormat::Modular))
        .filter_map(|(index, day)| day.get("modules").and_then(Value::as_array).map(|m| (index, m)))
        .collect();

    if !modular_days.is_empty() {
        require_enabled_modules(fields, &mut errors);
    }
    for (index, modules) in modular_days {
        validate_module_layout(modules, &format!("Day {}", index + 1), &mut errors);
    }

    ValidationReport::from_errors(errors)
}

fn require_enabled_modules(fields: &Map<String, Value>, errors: &mut Vec<String>) {
    if !fields.get("enabled_modules").is_some_and(Value::is_array) {
        errors.push("Modular plan must declare 'enabled_modules'".to_string());
    }
}

fn validate_module_layout(modules: &[Value], label: &str, errors: &mut Vec<String>) {
    let mut orders = Vec::with_capacity(modules.len());
    for (index, module) in modules.iter().enumerate() {
        match module.get("order").and_then(as_u32) {
            Some(order) => orders.push(order),
            None => errors.push(format!(
                "{label}, module {}: 'order' must be a non-negative integer",
                index + 1
            )),
        }
    }

    if orders.len() == modules.len() {
        let mut sorted = orders.clone();
        sorted.sort_unstable();
        if !sorted.iter().map(|order| *order as usize).eq(0..modules.len()) {
            errors.push(format!(
                "{label}: module orders must be sequential starting at 0 (found {orders:?})"
            ));
        }
    }

    let mains: Vec<&Value> = modules
        .iter()
        .filter(|module| module.get("type").and_then(Value::as_str) == Some("main"))
        .collect();

    match mains.as_slice() {
        [] => errors.push(format!("{label}: a 'main' module is required")),
        [main] => {
            let has_exercises = main
                .get("exercises")
                .and_then(Value::as_array)
                .is_some_and(|exercises| !exercises.is_empty());
            if !has_exercises {
                errors.push(format!(
                    "{label}: the 'main' module must contain at least one exercise"
                ));
            }
        }
        many => errors.push(format!(
            "{label}: only one 'main' module is allowed (found {})",
            many.len()
        )),
    }
}

fn require_text(fields: &Map<String, Value>, key: &str, label: &str, errors: &mut Vec<String>) {
    match fields.get(key) {
        Some(Value::String(text)) if !text.trim().is_empty() => {}
        Some(Value::String(_)) => errors.push(format!("{label}: '{key}' must not be empty")),
        Some(_) => errors.push(format!("{label}: '{key}' must be a string")),
        None => errors.push(format!("{label}: '{key}' is required")),
    }
}
