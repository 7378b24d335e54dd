//! Logged performance sets.

use jiff::Timestamp;
use rusqlite::{Row, params};

use super::plan_queries::parse_timestamp;
use crate::{
    error::{DatabaseResultExt, Result},
    models::{PerformanceRecord, PerformanceSet},
};

const INSERT_SET_SQL: &str = "INSERT INTO performance_sets (exercise_id, weight, reps, rir, performed_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SETS_FOR_EXERCISE_SQL: &str = "SELECT id, exercise_id, weight, reps, rir, performed_at FROM performance_sets WHERE exercise_id = ?1 ORDER BY id";
const RECENT_SETS_SQL: &str = "SELECT id, exercise_id, weight, reps, rir, performed_at FROM performance_sets WHERE exercise_id = ?1 ORDER BY id DESC LIMIT ?2";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<PerformanceRecord> {
    Ok(PerformanceRecord {
        id: row.get::<_, i64>(0)? as u64,
        exercise_id: row.get::<_, i64>(1)? as u64,
        set: PerformanceSet {
            weight: row.get(2)?,
            reps: row.get(3)?,
            rir: row.get(4)?,
        },
        performed_at: parse_timestamp(row, 5)?,
    })
}

impl super::Database {
    /// Appends a performed set to an exercise's history.
    pub fn insert_set(&mut self, exercise_id: u64, set: PerformanceSet) -> Result<PerformanceRecord> {
        let now = Timestamp::now();

        self.connection
            .execute(
                INSERT_SET_SQL,
                params![
                    exercise_id as i64,
                    set.weight,
                    set.reps,
                    set.rir,
                    now.to_string()
                ],
            )
            .db_context("Failed to insert performance set")?;

        Ok(PerformanceRecord {
            id: self.connection.last_insert_rowid() as u64,
            exercise_id,
            set,
            performed_at: now,
        })
    }

    /// Full history of an exercise, oldest first.
    pub fn sets_for_exercise(&self, exercise_id: u64) -> Result<Vec<PerformanceRecord>> {
        let mut stmt = self
            .connection
            .prepare(SETS_FOR_EXERCISE_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_map(params![exercise_id as i64], record_from_row)
            .db_context("Failed to query performance sets")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch performance sets")
    }

    /// The newest `limit` sets of an exercise, returned oldest first.
    pub fn recent_sets(&self, exercise_id: u64, limit: usize) -> Result<Vec<PerformanceRecord>> {
        let mut stmt = self
            .connection
            .prepare(RECENT_SETS_SQL)
            .db_context("Failed to prepare query")?;

        let mut sets = stmt
            .query_map(params![exercise_id as i64, limit as i64], record_from_row)
            .db_context("Failed to query performance sets")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch performance sets")?;

        sets.reverse();
        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use crate::{db::Database, models::PerformanceSet};

    #[test]
    fn test_recent_sets_are_chronological() {
        let mut db = Database::in_memory().unwrap();
        for reps in 1..=5 {
            db.insert_set(7, PerformanceSet::new(100.0, reps, Some(2)))
                .unwrap();
        }
        db.insert_set(8, PerformanceSet::new(60.0, 10, None)).unwrap();

        let recent: Vec<u32> = db
            .recent_sets(7, 3)
            .unwrap()
            .iter()
            .map(|record| record.set.reps)
            .collect();
        assert_eq!(recent, vec![3, 4, 5]);

        let all = db.sets_for_exercise(8).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].set.rir, None);
    }
}
