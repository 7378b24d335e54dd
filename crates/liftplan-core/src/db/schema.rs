//! Database schema initialization.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Creates any missing tables and indexes from the embedded SQL file.
    ///
    /// Every statement is `IF NOT EXISTS`, so reopening a database is a no-op.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::Database;

    fn plan_columns(db: &Database) -> Vec<String> {
        let mut stmt = db
            .connection
            .prepare("SELECT name FROM pragma_table_info('plans') ORDER BY cid")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap()
    }

    #[test]
    fn test_fresh_schema_has_every_plan_column() {
        let db = Database::in_memory().unwrap();
        assert_eq!(
            plan_columns(&db),
            [
                "id",
                "name",
                "format",
                "format_version",
                "revision",
                "payload",
                "created_at",
                "updated_at",
                "migrated_at",
            ]
        );
    }

    #[test]
    fn test_reopening_keeps_schema() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("schema.db");

        let first = Database::new(&path).unwrap();
        let columns = plan_columns(&first);
        drop(first);

        let second = Database::new(&path).unwrap();
        assert_eq!(plan_columns(&second), columns);
    }
}
