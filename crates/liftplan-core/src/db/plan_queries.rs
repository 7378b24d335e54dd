//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, Row, params, types::Type};
use serde_json::Value;

use crate::{
    error::{DatabaseResultExt, PlanError, Result},
    models::{PlanFormat, StoredPlan, WorkoutPlan},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (name, format, format_version, revision, payload, created_at, updated_at, migrated_at) VALUES (?1, ?2, ?3, 1, ?4, ?5, ?5, ?6)";
const SELECT_PLAN_SQL: &str =
    "SELECT id, format, revision, payload, created_at, updated_at FROM plans WHERE id = ?1";
const LIST_PLANS_SQL: &str =
    "SELECT id, format, revision, payload, created_at, updated_at FROM plans ORDER BY id";
const LIST_PLAN_IDS_BY_FORMAT_SQL: &str = "SELECT id FROM plans WHERE format = ?1 ORDER BY id";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET name = ?1, format = ?2, format_version = ?3, payload = ?4, migrated_at = ?5, updated_at = ?6, revision = revision + 1 WHERE id = ?7 AND revision = ?8";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

/// A stored plan row with its payload still untyped.
///
/// Stored data may predate current validation rules, so callers that need
/// to inspect or repair it work from this record rather than the typed
/// model.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRecord {
    pub id: u64,
    pub format: PlanFormat,
    pub revision: u64,
    pub payload: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PlanRecord {
    /// Parses the payload into a typed stored plan.
    pub fn into_stored(self) -> Result<StoredPlan> {
        Ok(StoredPlan {
            id: self.id,
            format: self.format,
            revision: self.revision,
            created_at: self.created_at,
            updated_at: self.updated_at,
            plan: WorkoutPlan::from_value(self.payload)?,
        })
    }
}

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

pub(super) fn parse_timestamp(row: &Row<'_>, column: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(column)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<PlanRecord> {
    let format_str: String = row.get(1)?;
    let format = format_str
        .parse::<PlanFormat>()
        .map_err(|e| conversion_error(1, e))?;

    let payload: String = row.get(3)?;
    let payload = serde_json::from_str(&payload)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(PlanRecord {
        id: row.get::<_, i64>(0)? as u64,
        format,
        revision: row.get::<_, i64>(2)? as u64,
        payload,
        created_at: parse_timestamp(row, 4)?,
        updated_at: parse_timestamp(row, 5)?,
    })
}

impl super::Database {
    /// Stores a new plan at revision 1.
    pub fn insert_plan(&mut self, plan: &WorkoutPlan) -> Result<StoredPlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let format = plan.format();
        let payload = serde_json::to_string(plan)?;

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                plan.name,
                format.as_str(),
                plan.format_version,
                payload,
                now.to_string(),
                plan.migrated_at.map(|t| t.to_string()),
            ],
        )
        .db_context("Failed to insert plan")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(StoredPlan {
            id,
            format,
            revision: 1,
            created_at: now,
            updated_at: now,
            plan: plan.clone(),
        })
    }

    /// Retrieves a plan row without interpreting its payload.
    pub fn get_plan_record(&self, id: u64) -> Result<Option<PlanRecord>> {
        self.connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], record_from_row)
            .optional()
            .db_context("Failed to query plan")
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, id: u64) -> Result<Option<StoredPlan>> {
        self.get_plan_record(id)?
            .map(PlanRecord::into_stored)
            .transpose()
    }

    /// Lists every stored plan row in insertion order.
    pub fn list_plan_records(&self) -> Result<Vec<PlanRecord>> {
        let mut stmt = self
            .connection
            .prepare(LIST_PLANS_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_map([], record_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")
    }

    /// IDs of all plans stored in the given format.
    pub fn list_plan_ids(&self, format: PlanFormat) -> Result<Vec<u64>> {
        let mut stmt = self
            .connection
            .prepare(LIST_PLAN_IDS_BY_FORMAT_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_map(params![format.as_str()], |row| {
            row.get::<_, i64>(0).map(|id| id as u64)
        })
        .db_context("Failed to query plan ids")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch plan ids")
    }

    /// Replaces a plan's payload if it is still at `expected_revision`.
    ///
    /// The whole row is rewritten in one statement. A stale revision yields
    /// [`PlanError::RevisionConflict`] and leaves the row untouched.
    pub fn update_plan(
        &mut self,
        id: u64,
        expected_revision: u64,
        plan: &WorkoutPlan,
    ) -> Result<StoredPlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let payload = serde_json::to_string(plan)?;

        let changed = tx
            .execute(
                UPDATE_PLAN_SQL,
                params![
                    plan.name,
                    plan.format().as_str(),
                    plan.format_version,
                    payload,
                    plan.migrated_at.map(|t| t.to_string()),
                    now.to_string(),
                    id as i64,
                    expected_revision as i64,
                ],
            )
            .db_context("Failed to update plan")?;

        if changed == 0 {
            let exists: bool = tx
                .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
                .db_context("Failed to check plan existence")?;
            return Err(if exists {
                PlanError::RevisionConflict {
                    id,
                    expected: expected_revision,
                }
            } else {
                PlanError::PlanNotFound { id }
            });
        }

        let record = tx
            .query_row(SELECT_PLAN_SQL, params![id as i64], record_from_row)
            .db_context("Failed to reload plan")?;

        tx.commit().db_context("Failed to commit transaction")?;

        record.into_stored()
    }

    /// Deletes a plan. Returns whether a row was removed.
    pub fn delete_plan(&mut self, id: u64) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;
        Ok(deleted > 0)
    }
}
