//! Shared helpers for liftplan-core integration tests.

use liftplan_core::{Planner, PlannerBuilder, StoredPlan, params::SavePlan};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Builds a planner over a fresh temporary database.
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("liftplan.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// A three-day legacy plan with mixed rep prescriptions.
pub fn legacy_plan() -> Value {
    json!({
        "name": "Full Body Basics",
        "description": "Three full-body sessions",
        "duration_weeks": 6,
        "days_per_week": 3,
        "difficulty": "beginner",
        "goals": ["strength", "technique"],
        "workouts": [
            {
                "day": "Monday", "name": "A", "description": "Squat focus",
                "exercises": [
                    { "exercise_id": 1, "exercise_name": "Back Squat", "sets": 3, "reps": 5,
                      "rest": "3 min", "suggested_weight": "Start light", "primary_muscles": ["quads", "glutes"] },
                    { "exercise_id": 2, "exercise_name": "Bench Press", "sets": 3, "reps": "8-10",
                      "rest": "2 min", "primary_muscles": ["chest"] }
                ]
            },
            {
                "day": "Wednesday", "name": "B", "total_duration_minutes": 40,
                "exercises": [
                    { "exercise_id": 3, "exercise_name": "Deadlift", "sets": 1, "reps": 5,
                      "notes": "Reset every rep", "primary_muscles": ["hamstrings", "back"] }
                ]
            },
            {
                "day": "Friday", "name": "C",
                "exercises": [
                    { "exercise_id": 4, "exercise_name": "Overhead Press", "sets": 3, "reps": "6-8",
                      "primary_muscles": ["shoulders"] },
                    { "exercise_id": 5, "exercise_name": "Chin-up", "sets": 3, "reps": "AMRAP",
                      "primary_muscles": ["back", "biceps"] }
                ]
            }
        ]
    })
}

pub async fn save(planner: &Planner, plan: Value) -> StoredPlan {
    planner
        .save_plan(&SavePlan { plan })
        .await
        .expect("Failed to save plan")
}
