//! Format detection for untyped plan records.
//!
//! Detection is total: any JSON value can be classified and nothing here
//! fails. An unclassifiable record yields `None`.

use serde_json::Value;

use crate::models::PlanFormat;

/// Classifies a single day record by which content list it exposes.
///
/// A `modules` array means modular, even when `exercises` is also present.
/// An `exercises` array without `modules` means legacy.
pub fn detect_day_format(day: &Value) -> Option<PlanFormat> {
    if day.get("modules").is_some_and(Value::is_array) {
        Some(PlanFormat::Modular)
    } else if day.get("exercises").is_some_and(Value::is_array) {
        Some(PlanFormat::Legacy)
    } else {
        None
    }
}

/// Classifies a plan record, or a bare day record.
///
/// A plan is legacy as soon as any of its days is legacy, since such a plan
/// still needs migration. It is modular when every classifiable day is
/// modular.
pub fn detect_format(record: &Value) -> Option<PlanFormat> {
    let Some(days) = record.get("workouts").and_then(Value::as_array) else {
        return detect_day_format(record);
    };

    days.iter()
        .filter_map(detect_day_format)
        .fold(None, |acc, format| match (acc, format) {
            (Some(PlanFormat::Legacy), _) | (_, PlanFormat::Legacy) => Some(PlanFormat::Legacy),
            _ => Some(PlanFormat::Modular),
        })
}
