//! Exercise catalog operations for the Planner.

use log::info;
use serde::{Deserialize, Serialize};

use super::Planner;
use crate::{
    error::{PlanError, Result},
    models::{CatalogExercise, StoredPlan},
    params::Id,
    resolver::{ExerciseResolver, ResolutionReport},
};

/// A plan after resolution against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResolution {
    pub plan: StoredPlan,
    pub report: ResolutionReport,
}

impl Planner {
    /// Inserts or replaces catalog entries by ID.
    pub async fn import_catalog(&self, exercises: Vec<CatalogExercise>) -> Result<usize> {
        let count = self
            .with_database(move |db| db.upsert_exercises(&exercises))
            .await?;
        info!("Imported {count} catalog exercise(s)");
        Ok(count)
    }

    /// Lists the catalog ordered by ID.
    pub async fn list_catalog(&self) -> Result<Vec<CatalogExercise>> {
        self.with_database(|db| db.list_exercises()).await
    }

    /// Reconciles a stored plan's exercises with the catalog and saves the
    /// result.
    ///
    /// Unresolved exercises never fail the operation; they are listed in the
    /// report. The plan is only rewritten when resolution changed something.
    pub async fn resolve_plan(&self, params: &Id) -> Result<PlanResolution> {
        let plan_id = params.id;

        self.with_database(move |db| {
            let stored = db
                .get_plan_record(plan_id)?
                .ok_or(PlanError::PlanNotFound { id: plan_id })?
                .into_stored()?;
            let catalog = db.list_exercises()?;

            let (resolved, report) = ExerciseResolver::new(&catalog).resolve_plan(stored.plan.clone());

            let plan = if resolved == stored.plan {
                stored
            } else {
                db.update_plan(plan_id, stored.revision, &resolved)?
            };

            Ok(PlanResolution { plan, report })
        })
        .await
    }
}
