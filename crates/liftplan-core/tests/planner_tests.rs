mod common;

use common::{create_test_planner, legacy_plan, save};
use liftplan_core::{
    PlanFormat,
    convert::{to_legacy, to_modular},
    models::WorkoutPlan,
    params::{ExportPlan, Id},
    validation::validate,
};
use serde_json::json;

#[tokio::test]
async fn test_concurrent_migrations_apply_once() {
    let (_temp_dir, planner) = create_test_planner().await;
    let stored = save(&planner, legacy_plan()).await;
    let id = Id { id: stored.id };

    let (first, second) = tokio::join!(planner.migrate_plan(&id), planner.migrate_plan(&id));

    assert!(first.success && second.success, "outcomes: {first:?} {second:?}");
    let applied = [&first, &second].iter().filter(|o| o.changed).count();
    assert_eq!(applied, 1, "outcomes: {first:?} {second:?}");

    let migrated = planner.require_plan(&id).await.unwrap();
    assert_eq!(migrated.format, PlanFormat::Modular);
    assert_eq!(migrated.revision, 2);
}

#[tokio::test]
async fn test_migrated_plan_exports_back_to_original_exercises() {
    let (_temp_dir, planner) = create_test_planner().await;
    let stored = save(&planner, legacy_plan()).await;
    let original = stored.plan.clone();

    assert!(planner.migrate_plan(&Id { id: stored.id }).await.success);

    let exported = planner
        .export_plan(&ExportPlan {
            id: stored.id,
            format: "legacy".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(exported.format(), PlanFormat::Legacy);
    for (before, after) in original.workouts.iter().zip(&exported.workouts) {
        let before: Vec<_> = before.exercises().collect();
        let after: Vec<_> = after.exercises().collect();
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(b.exercise_id, a.exercise_id);
            assert_eq!(b.sets, a.sets);
            assert_eq!(b.reps, a.reps);
            assert_eq!(b.rest, a.rest);
            assert_eq!(b.suggested_weight, a.suggested_weight);
            assert_eq!(b.primary_muscles, a.primary_muscles);
        }
    }

    // Authored notes survive; empty ones carry the module they came from
    let deadlift = exported.exercises().find(|e| e.exercise_id == 3).unwrap();
    assert_eq!(deadlift.notes.as_deref(), Some("Reset every rep"));
    let squat = exported.exercises().find(|e| e.exercise_id == 1).unwrap();
    assert_eq!(squat.notes.as_deref(), Some("Main Workout - Squat focus"));
}

#[test]
fn test_validator_is_total() {
    let inputs = [
        json!(null),
        json!({}),
        json!([]),
        json!("plan"),
        json!(42),
        json!({ "name": [], "description": {}, "workouts": "none" }),
        json!({ "name": "x", "description": "y", "workouts": [null, [], {"modules": 3}] }),
        json!({ "name": "x", "description": "y", "workouts": [{ "day": "Mon", "name": "A",
            "modules": [{ "type": "main", "order": "first", "exercises": [{ "sets": -1 }] }] }] }),
    ];

    for input in inputs {
        let report = validate(&input);
        assert!(!report.is_valid, "{input} should be invalid");
        assert!(!report.errors.is_empty());
    }
}

#[test]
fn test_round_trip_keeps_exercise_content() {
    let plan = WorkoutPlan::from_value(legacy_plan()).unwrap();
    let modular = to_modular(plan.clone());
    assert!(validate(&modular.to_value().unwrap()).is_valid);

    let legacy = to_legacy(modular);
    let counts: Vec<usize> = legacy.workouts.iter().map(|d| d.exercise_count()).collect();
    assert_eq!(counts, vec![2, 1, 2]);

    let names: Vec<&str> = legacy.exercises().map(|e| e.exercise_name.as_str()).collect();
    let original: Vec<&str> = plan.exercises().map(|e| e.exercise_name.as_str()).collect();
    assert_eq!(names, original);
}
