//! In-place migration of stored legacy plans to the modular format.
//!
//! Migration never returns `Err`. Every failure, including store failures,
//! ends up in [`MigrationOutcome::errors`] with `success: false`, and nothing
//! is written unless the converted plan is complete and valid. The write
//! itself is a compare-and-swap on the revision read at load time, so two
//! concurrent migrations of the same plan cannot both apply.

use jiff::Timestamp;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::Planner;
use crate::{
    convert::to_modular,
    db::{Database, PlanRecord},
    error::{PlanError, Result},
    format::detect_format,
    models::{PlanFormat, WorkoutPlan},
    params::Id,
    validation::validate,
};

/// Version tag stamped on migrated plans.
pub const MODULAR_FORMAT_VERSION: &str = "2.0";

/// Result of migrating one stored plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub plan_id: u64,
    pub success: bool,
    /// Whether the stored record was rewritten
    pub changed: bool,
    pub errors: Vec<String>,
}

impl MigrationOutcome {
    fn unchanged(plan_id: u64) -> Self {
        Self {
            plan_id,
            success: true,
            changed: false,
            errors: Vec::new(),
        }
    }

    fn migrated(plan_id: u64) -> Self {
        Self {
            plan_id,
            success: true,
            changed: true,
            errors: Vec::new(),
        }
    }

    fn failed(plan_id: u64, errors: Vec<String>) -> Self {
        warn!("Migration of plan {plan_id} failed: {}", errors.join("; "));
        Self {
            plan_id,
            success: false,
            changed: false,
            errors,
        }
    }
}

/// Detects and converts a loaded record.
///
/// Returns `Ok(None)` when the record is already modular.
fn convert_record(record: &PlanRecord) -> std::result::Result<Option<WorkoutPlan>, Vec<String>> {
    let report = validate(&record.payload);
    if !report.is_valid {
        warn!(
            "Plan {} has validation issues before migration: {}",
            record.id,
            report.errors.join("; ")
        );
    }

    match detect_format(&record.payload) {
        Some(PlanFormat::Modular) => return Ok(None),
        Some(PlanFormat::Legacy) => {}
        None => return Err(vec!["Unable to determine plan format".to_string()]),
    }

    let plan = WorkoutPlan::from_value(record.payload.clone()).map_err(|e| vec![e.to_string()])?;

    let mut converted = to_modular(plan);
    converted.workout_type = Some(PlanFormat::Modular);
    converted.format_version = Some(MODULAR_FORMAT_VERSION.to_string());
    converted.migrated_at = Some(Timestamp::now());

    let value = converted.to_value().map_err(|e| vec![e.to_string()])?;
    let check = validate(&value);
    if !check.is_valid {
        return Err(check.errors);
    }

    Ok(Some(converted))
}

/// Whether the stored record for `plan_id` is modular right now.
fn stored_as_modular(db: &Database, plan_id: u64) -> bool {
    db.get_plan_record(plan_id)
        .ok()
        .flatten()
        .is_some_and(|record| detect_format(&record.payload) == Some(PlanFormat::Modular))
}

/// Writes a converted plan back over `record`, guarded by its revision.
///
/// Losing the revision race to another migration still counts as success:
/// the plan ends up modular either way.
fn persist(db: &mut Database, record: &PlanRecord, converted: &WorkoutPlan) -> MigrationOutcome {
    match db.update_plan(record.id, record.revision, converted) {
        Ok(stored) => {
            info!(
                "Migrated plan {} to modular (revision {})",
                stored.id, stored.revision
            );
            MigrationOutcome::migrated(record.id)
        }
        Err(PlanError::RevisionConflict { .. }) if stored_as_modular(db, record.id) => {
            debug!(
                "Plan {} was migrated concurrently, nothing left to write",
                record.id
            );
            MigrationOutcome::unchanged(record.id)
        }
        Err(e) => MigrationOutcome::failed(record.id, vec![e.to_string()]),
    }
}

/// Load, detect, convert and persist one plan.
fn migrate_with(db: &mut Database, plan_id: u64) -> MigrationOutcome {
    let record = match db.get_plan_record(plan_id) {
        Ok(Some(record)) => record,
        Ok(None) => {
            return MigrationOutcome::failed(
                plan_id,
                vec![PlanError::PlanNotFound { id: plan_id }.to_string()],
            );
        }
        Err(e) => return MigrationOutcome::failed(plan_id, vec![e.to_string()]),
    };

    match convert_record(&record) {
        Ok(Some(converted)) => persist(db, &record, &converted),
        Ok(None) => {
            debug!("Plan {plan_id} is already modular, nothing to migrate");
            MigrationOutcome::unchanged(plan_id)
        }
        Err(errors) => MigrationOutcome::failed(plan_id, errors),
    }
}

impl Planner {
    /// Migrates one stored plan to the modular format.
    ///
    /// Idempotent: a plan that is already modular reports success without
    /// being rewritten.
    pub async fn migrate_plan(&self, params: &Id) -> MigrationOutcome {
        let plan_id = params.id;

        let result = self
            .with_database(move |db| Ok(migrate_with(db, plan_id)))
            .await;

        result.unwrap_or_else(|e| MigrationOutcome::failed(plan_id, vec![e.to_string()]))
    }

    /// Migrates every stored legacy plan, one outcome per plan.
    ///
    /// A failing plan does not stop the others.
    pub async fn migrate_all_plans(&self) -> Result<Vec<MigrationOutcome>> {
        self.with_database(|db| {
            let ids = db.list_plan_ids(PlanFormat::Legacy)?;
            Ok(ids.into_iter().map(|id| migrate_with(db, id)).collect())
        })
        .await
    }
}
