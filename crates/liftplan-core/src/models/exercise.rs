//! Prescribed exercise definition and rep prescriptions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A prescribed exercise within a day or module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutExercise {
    /// Catalog identifier of the exercise
    pub exercise_id: u64,

    /// Catalog name, copied when the plan was authored
    pub exercise_name: String,

    /// Number of prescribed sets (at least one)
    pub sets: u32,

    /// Prescribed repetitions, either a count or a range such as "8-12"
    pub reps: Reps,

    /// Rest interval between sets, e.g. "90s"
    #[serde(default)]
    pub rest: String,

    /// Starting load hint such as "60kg" or "Start light"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_weight: Option<String>,

    /// Free-text coaching notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Primary muscles, copied from the catalog at authoring time
    #[serde(default)]
    pub primary_muscles: Vec<String>,
}

/// Repetition prescription as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Text(String),
}

impl Reps {
    /// Numeric target, if the prescription can be read as a count or range.
    pub fn target(&self) -> Option<RepTarget> {
        match self {
            Reps::Count(n) => RepTarget::new(*n, *n).ok(),
            Reps::Text(text) => text.parse().ok(),
        }
    }
}

impl From<u32> for Reps {
    fn from(n: u32) -> Self {
        Reps::Count(n)
    }
}

impl From<&str> for Reps {
    fn from(s: &str) -> Self {
        Reps::Text(s.to_string())
    }
}

/// Inclusive numeric rep target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepTarget {
    pub min: u32,
    pub max: u32,
}

impl RepTarget {
    /// Creates a target, rejecting zero and inverted ranges.
    pub fn new(min: u32, max: u32) -> Result<Self, String> {
        if min == 0 {
            return Err("rep target must be at least 1".to_string());
        }
        if min > max {
            return Err(format!("rep range {min}-{max} is inverted"));
        }
        Ok(Self { min, max })
    }

    /// A single rep count.
    pub fn exact(reps: u32) -> Result<Self, String> {
        Self::new(reps, reps)
    }

    pub fn midpoint(&self) -> f64 {
        (f64::from(self.min) + f64::from(self.max)) / 2.0
    }
}

impl FromStr for RepTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("Invalid rep prescription: {s}"))
        };

        match s.split_once(['-', '–']) {
            Some((low, high)) => Self::new(parse(low)?, parse(high)?),
            None => Self::exact(parse(s)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rep_target_parses_ranges_and_counts() {
        assert_eq!("8-12".parse::<RepTarget>(), Ok(RepTarget { min: 8, max: 12 }));
        assert_eq!("8 - 12".parse::<RepTarget>(), Ok(RepTarget { min: 8, max: 12 }));
        assert_eq!("6–8".parse::<RepTarget>(), Ok(RepTarget { min: 6, max: 8 }));
        assert_eq!("5".parse::<RepTarget>(), Ok(RepTarget { min: 5, max: 5 }));
    }

    #[test]
    fn test_midpoint_of_extreme_range() {
        let target: RepTarget = "4294967295-4294967295".parse().unwrap();
        assert_eq!(target.midpoint(), f64::from(u32::MAX));
        assert_eq!(RepTarget { min: 8, max: 12 }.midpoint(), 10.0);
    }

    #[test]
    fn test_rep_target_rejects_garbage() {
        assert!("AMRAP".parse::<RepTarget>().is_err());
        assert!("12-8".parse::<RepTarget>().is_err());
        assert!("0".parse::<RepTarget>().is_err());
        assert!("".parse::<RepTarget>().is_err());
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(RepTarget { min: 8, max: 12 }.midpoint(), 10.0);
        assert_eq!(RepTarget { min: 8, max: 11 }.midpoint(), 9.5);
    }

    #[test]
    fn test_reps_deserialize_either_shape() {
        let count: Reps = serde_json::from_str("10").unwrap();
        let range: Reps = serde_json::from_str("\"8-12\"").unwrap();
        assert_eq!(count, Reps::Count(10));
        assert_eq!(range, Reps::Text("8-12".to_string()));
        assert_eq!(range.target(), Some(RepTarget { min: 8, max: 12 }));
        assert_eq!(Reps::from("to failure").target(), None);
    }
}
