//! Parameter structures for liftplan operations.
//!
//! These structs are shared by every interface (CLI, MCP) and carry no
//! framework derives beyond serde. Interface layers wrap them: the CLI
//! converts its clap `Args` structs with `From`, and the MCP server
//! deserializes them directly through a transparent wrapper. JSON schemas
//! for MCP tools come from the optional `schema` feature.
//!
//! Numeric inputs arrive unchecked. Types that need range checks expose a
//! `validate` method that turns them into domain values or an
//! [`PlanError::InvalidInput`].

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{PlanError, Result},
    models::{MAX_RIR, PerformanceSet, PlanFormat, RepTarget},
    strength::DEFAULT_TARGET_RIR,
};

/// Generic parameters for operations requiring just an ID.
///
/// Used for show, delete, stats, migrate and resolve on plans, and for
/// per-exercise history queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for validating or saving a freshly generated plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SavePlan {
    /// The complete plan record, in legacy or modular format
    pub plan: Value,
}

/// Parameters for replacing a stored plan with a revised version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RevisePlan {
    /// ID of the stored plan to replace
    pub id: u64,
    /// The revised plan record
    pub plan: Value,
    /// Revision the revision was based on; the write is refused if the
    /// stored plan has moved past it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
}

/// Parameters for exporting a stored plan in a chosen format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExportPlan {
    /// ID of the stored plan
    pub id: u64,
    /// Target format: 'legacy' or 'modular'
    pub format: String,
}

impl ExportPlan {
    /// Parses the requested format.
    pub fn validate(&self) -> Result<PlanFormat> {
        self.format.parse().map_err(|_| {
            PlanError::invalid_input("format").with_reason(format!(
                "Invalid format: {}. Must be 'legacy' or 'modular'",
                self.format
            ))
        })
    }
}

fn performance_set(weight: f64, reps: u32, rir: Option<u32>) -> Result<PerformanceSet> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(PlanError::invalid_input("weight")
            .with_reason(format!("Weight must be a non-negative number, got {weight}")));
    }
    let rir = rir.map(checked_rir).transpose()?;
    Ok(PerformanceSet::new(weight, reps, rir))
}

fn checked_rir(rir: u32) -> Result<u8> {
    u8::try_from(rir)
        .ok()
        .filter(|rir| *rir <= MAX_RIR)
        .ok_or_else(|| {
            PlanError::invalid_input("rir")
                .with_reason(format!("Reps in reserve must be between 0 and {MAX_RIR}, got {rir}"))
        })
}

fn rep_target(reps: &str) -> Result<RepTarget> {
    reps.parse()
        .map_err(|e: String| PlanError::invalid_input("reps").with_reason(e))
}

/// Parameters for logging a performed set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct LogSet {
    /// Catalog ID of the exercise performed
    pub exercise_id: u64,
    /// Load lifted (non-negative)
    pub weight: f64,
    /// Completed repetitions
    pub reps: u32,
    /// Reps in reserve (0-10), if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rir: Option<u32>,
}

impl LogSet {
    /// Checks ranges and returns the set to store.
    ///
    /// # Errors
    ///
    /// * `PlanError::InvalidInput` - negative or non-finite weight
    /// * `PlanError::InvalidInput` - RIR above 10
    pub fn validate(&self) -> Result<PerformanceSet> {
        performance_set(self.weight, self.reps, self.rir)
    }
}

/// Parameters for estimating a one-rep max from a single set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EstimateOneRepMax {
    /// Load lifted
    pub weight: f64,
    /// Completed repetitions
    pub reps: u32,
    /// Reps in reserve (0-10), if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rir: Option<u32>,
}

impl EstimateOneRepMax {
    pub fn validate(&self) -> Result<PerformanceSet> {
        performance_set(self.weight, self.reps, self.rir)
    }
}

/// Parameters for a working-weight suggestion from a known one-rep max.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SuggestWeight {
    /// Current one-rep max
    pub one_rep_max: f64,
    /// Rep prescription such as "5" or "8-12"
    pub reps: String,
    /// Target reps in reserve (defaults to 2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rir: Option<u32>,
}

impl SuggestWeight {
    /// Returns the parsed rep target and the target RIR.
    pub fn validate(&self) -> Result<(RepTarget, u32)> {
        if !self.one_rep_max.is_finite() || self.one_rep_max < 0.0 {
            return Err(PlanError::invalid_input("one_rep_max")
                .with_reason("One-rep max must be a non-negative number"));
        }
        let rir = checked_rir(self.rir.unwrap_or(DEFAULT_TARGET_RIR))?;
        Ok((rep_target(&self.reps)?, u32::from(rir)))
    }
}

/// Parameters for a history-based load recommendation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RecommendLoad {
    /// Catalog ID of the exercise
    pub exercise_id: u64,
    /// Rep prescription such as "5" or "8-12"
    pub reps: String,
    /// Target reps in reserve (defaults to 2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rir: Option<u32>,
}

impl RecommendLoad {
    /// Returns the parsed rep target and the target RIR.
    pub fn validate(&self) -> Result<(RepTarget, u32)> {
        let rir = checked_rir(self.rir.unwrap_or(DEFAULT_TARGET_RIR))?;
        Ok((rep_target(&self.reps)?, u32::from(rir)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_set_validate() {
        let params = LogSet {
            exercise_id: 1,
            weight: 100.0,
            reps: 5,
            rir: Some(2),
        };
        assert_eq!(params.validate().unwrap(), PerformanceSet::new(100.0, 5, Some(2)));
    }

    #[test]
    fn test_log_set_rejects_out_of_range_values() {
        let negative = LogSet {
            exercise_id: 1,
            weight: -5.0,
            reps: 5,
            rir: None,
        };
        match negative.validate().unwrap_err() {
            PlanError::InvalidInput { field, .. } => assert_eq!(field, "weight"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }

        let too_much_reserve = LogSet {
            exercise_id: 1,
            weight: 50.0,
            reps: 5,
            rir: Some(11),
        };
        match too_much_reserve.validate().unwrap_err() {
            PlanError::InvalidInput { field, reason } => {
                assert_eq!(field, "rir");
                assert!(reason.contains("between 0 and 10"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_recommend_load_defaults_rir() {
        let params = RecommendLoad {
            exercise_id: 3,
            reps: "8-12".to_string(),
            rir: None,
        };
        let (target, rir) = params.validate().unwrap();
        assert_eq!(target, RepTarget { min: 8, max: 12 });
        assert_eq!(rir, DEFAULT_TARGET_RIR);
    }

    #[test]
    fn test_unparseable_reps_are_invalid_input() {
        let params = SuggestWeight {
            one_rep_max: 100.0,
            reps: "AMRAP".to_string(),
            rir: None,
        };
        assert!(matches!(
            params.validate(),
            Err(PlanError::InvalidInput { ref field, .. }) if field == "reps"
        ));
    }

    #[test]
    fn test_export_format() {
        let params = ExportPlan {
            id: 1,
            format: "Legacy".to_string(),
        };
        assert_eq!(params.validate().unwrap(), PlanFormat::Legacy);

        let params = ExportPlan {
            id: 1,
            format: "xml".to_string(),
        };
        assert!(params.validate().is_err());
    }
}
