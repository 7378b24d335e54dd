//! Plan operations for the Planner.

use log::{info, warn};

use super::Planner;
use crate::{
    convert::{to_legacy, to_modular},
    error::{PlanError, Result},
    models::{PlanFormat, PlanSummary, StoredPlan, WorkoutPlan},
    params::{ExportPlan, Id, RevisePlan, SavePlan},
    stats::{PlanStats, compute_stats},
    validation::validate,
};

/// Validates a candidate plan and parses it, refusing anything with defects.
///
/// A record that passes validation but still does not fit the typed model is
/// refused the same way, with the parse failure as its only error.
fn checked_plan(candidate: &serde_json::Value) -> Result<WorkoutPlan> {
    let report = validate(candidate);
    if !report.is_valid {
        return Err(PlanError::InvalidPlan {
            errors: report.errors,
        });
    }
    WorkoutPlan::from_value(candidate.clone()).map_err(|e| PlanError::InvalidPlan {
        errors: vec![e.to_string()],
    })
}

impl Planner {
    /// Validates and stores a new plan.
    ///
    /// Persistence is refused with [`PlanError::InvalidPlan`] when the plan
    /// fails validation; every defect is listed.
    pub async fn save_plan(&self, params: &SavePlan) -> Result<StoredPlan> {
        let plan = checked_plan(&params.plan)?;

        let stored = self.with_database(move |db| db.insert_plan(&plan)).await?;
        info!(
            "Saved plan {} '{}' ({})",
            stored.id,
            stored.plan.name,
            stored.format.as_str()
        );
        Ok(stored)
    }

    /// Replaces a stored plan with a revised version.
    ///
    /// The write only succeeds if the stored revision still matches the one
    /// given in `params`, or the one read just before writing when none is
    /// given.
    pub async fn revise_plan(&self, params: &RevisePlan) -> Result<StoredPlan> {
        let plan = checked_plan(&params.plan)?;
        let plan_id = params.id;
        let expected = params.revision;

        let stored = self
            .with_database(move |db| {
                let revision = match expected {
                    Some(revision) => revision,
                    None => {
                        db.get_plan_record(plan_id)?
                            .ok_or(PlanError::PlanNotFound { id: plan_id })?
                            .revision
                    }
                };
                db.update_plan(plan_id, revision, &plan)
            })
            .await?;

        info!("Revised plan {} to revision {}", stored.id, stored.revision);
        Ok(stored)
    }

    /// Retrieves a plan by its ID.
    ///
    /// Stored plans are not re-validated strictly: defects are logged as
    /// warnings and the plan is returned as long as it parses.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<StoredPlan>> {
        let plan_id = params.id;

        let record = self
            .with_database(move |db| db.get_plan_record(plan_id))
            .await?;

        let Some(record) = record else {
            return Ok(None);
        };

        let report = validate(&record.payload);
        if !report.is_valid {
            warn!(
                "Stored plan {} has {} validation issue(s): {}",
                record.id,
                report.errors.len(),
                report.errors.join("; ")
            );
        }

        record.into_stored().map(Some)
    }

    /// Retrieves a plan by its ID, failing when it does not exist.
    pub async fn require_plan(&self, params: &Id) -> Result<StoredPlan> {
        self.get_plan(params)
            .await?
            .ok_or(PlanError::PlanNotFound { id: params.id })
    }

    /// Lists summaries of every stored plan.
    ///
    /// Rows whose payload no longer parses are skipped with a warning.
    pub async fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        let records = self.with_database(|db| db.list_plan_records()).await?;

        Ok(records
            .into_iter()
            .filter_map(|record| {
                let id = record.id;
                match record.into_stored() {
                    Ok(stored) => Some(PlanSummary::from(&stored)),
                    Err(e) => {
                        warn!("Skipping unreadable plan {id}: {e}");
                        None
                    }
                }
            })
            .collect())
    }

    /// Deletes a plan, returning what was removed.
    pub async fn delete_plan(&self, params: &Id) -> Result<Option<StoredPlan>> {
        let plan_id = params.id;

        let deleted = self
            .with_database(move |db| {
                let Some(record) = db.get_plan_record(plan_id)? else {
                    return Ok(None);
                };
                db.delete_plan(plan_id)?;
                record.into_stored().map(Some)
            })
            .await?;

        if deleted.is_some() {
            info!("Deleted plan {plan_id}");
        }
        Ok(deleted)
    }

    /// Summary metrics over a stored plan.
    pub async fn plan_stats(&self, params: &Id) -> Result<PlanStats> {
        let stored = self.require_plan(params).await?;
        Ok(compute_stats(&stored.plan))
    }

    /// Renders a stored plan in the requested format.
    ///
    /// The stored record is left untouched.
    pub async fn export_plan(&self, params: &ExportPlan) -> Result<WorkoutPlan> {
        let format = params.validate()?;
        let stored = self.require_plan(&Id { id: params.id }).await?;

        Ok(match format {
            PlanFormat::Legacy => to_legacy(stored.plan),
            PlanFormat::Modular => to_modular(stored.plan),
        })
    }
}
