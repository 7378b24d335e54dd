//! Working-weight suggestions and progression policy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{PerformanceSet, RepTarget};

/// Reps in reserve assumed when a prescription does not specify one.
pub const DEFAULT_TARGET_RIR: u32 = 2;

/// Plate increment that suggestions are rounded to.
pub const WEIGHT_INCREMENT: f64 = 2.5;

/// Upper bound on effective reps and the share of 1RM used up to it.
const INTENSITY_TABLE: [(f64, f64); 5] = [
    (3.0, 0.90),
    (5.0, 0.85),
    (8.0, 0.80),
    (12.0, 0.75),
    (15.0, 0.70),
];
const HIGH_REP_INTENSITY: f64 = 0.65;

/// Number of newest sets inspected by the progression policy.
const PROGRESSION_WINDOW: usize = 3;
const MIN_HISTORY: usize = 2;
const HEAVY_LOAD_THRESHOLD: f64 = 100.0;
const HEAVY_STEP: f64 = 5.0;
const LIGHT_STEP: f64 = 2.5;
const DECREASE_FLOOR: f64 = 0.9;
const SHORTFALL_RATIO: f64 = 0.8;

/// Fraction of 1RM appropriate for a number of effective reps.
pub fn intensity_for(effective_reps: f64) -> f64 {
    INTENSITY_TABLE
        .iter()
        .find(|(limit, _)| effective_reps <= *limit)
        .map_or(HIGH_REP_INTENSITY, |(_, intensity)| *intensity)
}

/// Rounds a load to the nearest [`WEIGHT_INCREMENT`].
pub fn round_to_increment(weight: f64) -> f64 {
    (weight / WEIGHT_INCREMENT).round() * WEIGHT_INCREMENT
}

/// Working weight for a rep prescription given a one-rep max.
///
/// Effective reps are the midpoint of the target range plus the target reps
/// in reserve.
pub fn suggest_weight(one_rep_max: f64, target: RepTarget, target_rir: u32) -> f64 {
    if one_rep_max <= 0.0 {
        return 0.0;
    }
    let effective_reps = target.midpoint() + f64::from(target_rir);
    round_to_increment(one_rep_max * intensity_for(effective_reps))
}

/// Direction of a progression recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increase,
    Hold,
    Decrease,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Increase => "increase",
            Trend::Hold => "hold",
            Trend::Decrease => "decrease",
        };
        f.write_str(label)
    }
}

/// Adjusted suggestion with a one-line rationale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Progression {
    pub weight: f64,
    pub trend: Trend,
    pub note: String,
}

fn step_for(current: f64) -> f64 {
    if current > HEAVY_LOAD_THRESHOLD {
        HEAVY_STEP
    } else {
        LIGHT_STEP
    }
}

/// Adjusts `current` from the newest logged sets for the exercise.
///
/// `recent_sets` are ordered oldest to newest. Only the newest three are
/// inspected:
///
/// - all three reach `target.max` reps with RIR at most 1: increase
/// - any falls below 80% of `target.min`, or two or more hit RIR 0: decrease,
///   never below 90% of `current`
/// - otherwise: hold
///
/// With fewer than two sets the baseline is returned unchanged.
pub fn suggest_progression(
    recent_sets: &[PerformanceSet],
    current: f64,
    target: RepTarget,
) -> Progression {
    if recent_sets.len() < MIN_HISTORY {
        return Progression {
            weight: current,
            trend: Trend::Hold,
            note: "Not enough recent sets to judge a trend, using the baseline suggestion"
                .to_string(),
        };
    }

    let window = &recent_sets[recent_sets.len().saturating_sub(PROGRESSION_WINDOW)..];
    let step = step_for(current);

    let all_strong = window.len() == PROGRESSION_WINDOW
        && window
            .iter()
            .all(|set| set.reps >= target.max && set.rir.is_some_and(|rir| rir <= 1));
    if all_strong {
        return Progression {
            weight: current + step,
            trend: Trend::Increase,
            note: format!(
                "Consistent performance: last {PROGRESSION_WINDOW} sets reached {} reps with RIR 1 or less, adding {step}",
                target.max
            ),
        };
    }

    let shortfall = window
        .iter()
        .any(|set| f64::from(set.reps) < SHORTFALL_RATIO * f64::from(target.min));
    let failures = window.iter().filter(|set| set.rir == Some(0)).count();
    if shortfall || failures >= 2 {
        let reason = if shortfall {
            "Recent sets fell well short of the target reps"
        } else {
            "Repeated sets taken to failure"
        };
        return Progression {
            weight: (current - step).max(current * DECREASE_FLOOR),
            trend: Trend::Decrease,
            note: format!("{reason}, reducing by up to {step}"),
        };
    }

    Progression {
        weight: current,
        trend: Trend::Hold,
        note: "Performance is on target, hold the current weight".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(weight: f64, reps: u32, rir: Option<u8>) -> PerformanceSet {
        PerformanceSet::new(weight, reps, rir)
    }

    fn range(min: u32, max: u32) -> RepTarget {
        RepTarget::new(min, max).unwrap()
    }

    #[test]
    fn test_suggest_weight_for_range() {
        // midpoint 10 + RIR 2 = 12 effective reps -> 75%
        assert_eq!(suggest_weight(100.0, range(8, 12), DEFAULT_TARGET_RIR), 75.0);
    }

    #[test]
    fn test_suggest_weight_rounds_to_increment() {
        // 5 + 2 = 7 effective reps -> 80% of 123 = 98.4
        assert_eq!(suggest_weight(123.0, range(5, 5), 2), 97.5);
        // 3 + 0 effective reps -> 90% of 140 = 126
        assert_eq!(suggest_weight(140.0, range(3, 3), 0), 125.0);
        assert_eq!(suggest_weight(0.0, range(5, 5), 2), 0.0);
    }

    #[test]
    fn test_intensity_table_edges() {
        assert_eq!(intensity_for(1.0), 0.90);
        assert_eq!(intensity_for(3.0), 0.90);
        assert_eq!(intensity_for(3.5), 0.85);
        assert_eq!(intensity_for(8.0), 0.80);
        assert_eq!(intensity_for(12.0), 0.75);
        assert_eq!(intensity_for(15.0), 0.70);
        assert_eq!(intensity_for(15.5), 0.65);
    }

    #[test]
    fn test_consistent_sets_increase_load() {
        let sets = [set(80.0, 10, Some(1)), set(80.0, 10, Some(1)), set(80.0, 11, Some(0))];
        let progression = suggest_progression(&sets, 80.0, range(10, 10));
        assert_eq!(progression.weight, 82.5);
        assert_eq!(progression.trend, Trend::Increase);
        assert!(progression.note.to_lowercase().contains("consistent performance"));
    }

    #[test]
    fn test_heavy_loads_use_larger_step() {
        let sets = [set(120.0, 5, Some(1)); 3];
        let progression = suggest_progression(&sets, 120.0, range(5, 5));
        assert_eq!(progression.weight, 125.0);
    }

    #[test]
    fn test_only_newest_sets_count() {
        let sets = [
            set(80.0, 3, Some(0)),
            set(80.0, 10, Some(1)),
            set(80.0, 10, Some(1)),
            set(80.0, 10, Some(1)),
        ];
        assert_eq!(
            suggest_progression(&sets, 80.0, range(10, 10)).trend,
            Trend::Increase
        );
    }

    #[test]
    fn test_shortfall_decreases_load() {
        let sets = [set(80.0, 10, Some(2)), set(80.0, 7, Some(1))];
        let progression = suggest_progression(&sets, 80.0, range(10, 10));
        assert_eq!(progression.trend, Trend::Decrease);
        assert_eq!(progression.weight, 77.5);
    }

    #[test]
    fn test_repeated_failure_decreases_with_floor() {
        let sets = [set(20.0, 8, Some(0)), set(20.0, 8, Some(0)), set(20.0, 9, Some(2))];
        let progression = suggest_progression(&sets, 20.0, range(8, 10));
        assert_eq!(progression.trend, Trend::Decrease);
        // 20 - 2.5 = 17.5 is below the 90% floor of 18
        assert_eq!(progression.weight, 18.0);
    }

    #[test]
    fn test_on_target_holds() {
        let sets = [set(60.0, 9, Some(2)), set(60.0, 10, Some(1)), set(60.0, 8, Some(2))];
        let progression = suggest_progression(&sets, 60.0, range(8, 12));
        assert_eq!(progression.trend, Trend::Hold);
        assert_eq!(progression.weight, 60.0);
    }

    #[test]
    fn test_short_history_returns_baseline() {
        let progression = suggest_progression(&[set(80.0, 12, Some(0))], 80.0, range(10, 10));
        assert_eq!(progression.trend, Trend::Hold);
        assert_eq!(progression.weight, 80.0);

        let two_strong = [set(80.0, 12, Some(1)), set(80.0, 12, Some(1))];
        assert_eq!(
            suggest_progression(&two_strong, 80.0, range(10, 10)).trend,
            Trend::Hold
        );
    }
}
