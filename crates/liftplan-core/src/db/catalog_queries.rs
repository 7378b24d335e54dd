//! Exercise catalog storage.

use rusqlite::{Row, params, types::Type};

use crate::{
    error::{DatabaseResultExt, Result},
    models::CatalogExercise,
};

const UPSERT_EXERCISE_SQL: &str = "INSERT INTO exercises (id, name, primary_muscles) VALUES (?1, ?2, ?3) ON CONFLICT(id) DO UPDATE SET name = excluded.name, primary_muscles = excluded.primary_muscles";
const LIST_EXERCISES_SQL: &str = "SELECT id, name, primary_muscles FROM exercises ORDER BY id";

fn exercise_from_row(row: &Row<'_>) -> rusqlite::Result<CatalogExercise> {
    let muscles: String = row.get(2)?;
    let primary_muscles = serde_json::from_str(&muscles)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(CatalogExercise {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        primary_muscles,
    })
}

impl super::Database {
    /// Inserts or replaces catalog entries by ID. Returns how many were written.
    pub fn upsert_exercises(&mut self, exercises: &[CatalogExercise]) -> Result<usize> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for exercise in exercises {
            let muscles = serde_json::to_string(&exercise.primary_muscles)?;
            tx.execute(
                UPSERT_EXERCISE_SQL,
                params![exercise.id as i64, exercise.name, muscles],
            )
            .db_context("Failed to store catalog exercise")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(exercises.len())
    }

    /// Lists the whole catalog ordered by ID.
    pub fn list_exercises(&self) -> Result<Vec<CatalogExercise>> {
        let mut stmt = self
            .connection
            .prepare(LIST_EXERCISES_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_map([], exercise_from_row)
            .db_context("Failed to query catalog")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch catalog")
    }
}

#[cfg(test)]
mod tests {
    use crate::{db::Database, models::CatalogExercise};

    fn exercise(id: u64, name: &str, muscles: &[&str]) -> CatalogExercise {
        CatalogExercise {
            id,
            name: name.to_string(),
            primary_muscles: muscles.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_upsert_replaces_existing_entries() {
        let mut db = Database::in_memory().unwrap();
        db.upsert_exercises(&[
            exercise(2, "Bench Press", &["chest"]),
            exercise(1, "Squat", &["quads"]),
        ])
        .unwrap();
        db.upsert_exercises(&[exercise(1, "Back Squat", &["quads", "glutes"])])
            .unwrap();

        let catalog = db.list_exercises().unwrap();
        assert_eq!(
            catalog,
            vec![
                exercise(1, "Back Squat", &["quads", "glutes"]),
                exercise(2, "Bench Press", &["chest"]),
            ]
        );
    }
}
