//! Tests for the planner module.

use serde_json::{Value, json};
use tempfile::TempDir;

use super::*;
use crate::{
    error::PlanError,
    models::{CatalogExercise, DayContent, ModuleType, PlanFormat},
    params::{ExportPlan, Id, LogSet, RecommendLoad, RevisePlan, SavePlan},
    strength::Trend,
};

/// Helper function to create a test planner
async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

fn legacy_plan() -> Value {
    json!({
        "name": "Upper Lower",
        "description": "Four day split",
        "duration_weeks": 8,
        "days_per_week": 2,
        "difficulty": "intermediate",
        "goals": ["strength"],
        "workouts": [
            {
                "day": "Monday",
                "name": "Upper",
                "description": "Press and pull",
                "total_duration_minutes": 45,
                "exercises": [
                    { "exercise_id": 10, "exercise_name": "Bench Press", "sets": 4, "reps": "6-8",
                      "rest": "2 min", "primary_muscles": ["chest", "triceps"] },
                    { "exercise_id": 11, "exercise_name": "Barbell Row", "sets": 4, "reps": 8,
                      "rest": "2 min", "primary_muscles": ["back"] }
                ]
            },
            {
                "day": "Thursday",
                "name": "Lower",
                "exercises": [
                    { "exercise_id": 12, "exercise_name": "Squat", "sets": 5, "reps": 5,
                      "primary_muscles": ["quads"] },
                    { "exercise_id": 99, "exercise_name": "romanian deadlift", "sets": 3, "reps": "10",
                      "primary_muscles": ["hamstrings", "back"] }
                ]
            }
        ]
    })
}

async fn save(planner: &Planner, plan: Value) -> crate::models::StoredPlan {
    planner
        .save_plan(&SavePlan { plan })
        .await
        .expect("Failed to save plan")
}

#[tokio::test]
async fn test_save_and_get_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let stored = save(&planner, legacy_plan()).await;
    assert_eq!(stored.revision, 1);
    assert_eq!(stored.format, PlanFormat::Legacy);

    let loaded = planner
        .get_plan(&Id { id: stored.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(loaded.plan.name, "Upper Lower");
    assert_eq!(loaded.plan.exercises().count(), 4);

    let missing = planner.get_plan(&Id { id: 999 }).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_save_refuses_invalid_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let mut plan = legacy_plan();
    plan["name"] = json!("");
    plan["workouts"][1] = json!({ "day": "Friday", "name": "Nothing" });

    match planner.save_plan(&SavePlan { plan }).await {
        Err(PlanError::InvalidPlan { errors }) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().any(|e| e.contains("'name' must not be empty")));
            assert!(errors.iter().any(|e| e.contains("Day 2: must have either")));
        }
        other => panic!("Expected InvalidPlan error, got {other:?}"),
    }

    assert!(planner.list_plans().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_lists_every_missing_exercise_field() {
    let (_temp_dir, planner) = create_test_planner().await;

    let mut plan = legacy_plan();
    plan["workouts"][0]["exercises"][0]
        .as_object_mut()
        .unwrap()
        .remove("reps");
    plan["workouts"][1]["exercises"][1]
        .as_object_mut()
        .unwrap()
        .remove("exercise_id");

    match planner.save_plan(&SavePlan { plan }).await {
        Err(PlanError::InvalidPlan { errors }) => assert_eq!(
            errors,
            vec![
                "Day 1, exercise 1: 'reps' is required".to_string(),
                "Day 2, exercise 2: 'exercise_id' is required".to_string(),
            ]
        ),
        other => panic!("Expected InvalidPlan error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_save_refuses_mixed_plan_with_broken_modules() {
    let (_temp_dir, planner) = create_test_planner().await;

    let mut plan = legacy_plan();
    plan["enabled_modules"] = json!(["warmup", "core"]);
    plan["workouts"][1] = json!({
        "day": "Thursday",
        "name": "Lower",
        "modules": [
            { "type": "warmup", "name": "Warm-up", "order": 0, "exercises": [] },
            { "type": "core", "name": "Core", "order": 3, "exercises": [] }
        ]
    });

    match planner.save_plan(&SavePlan { plan }).await {
        Err(PlanError::InvalidPlan { errors }) => {
            assert!(errors.iter().any(|e| e.contains("orders must be sequential")));
            assert!(errors.iter().any(|e| e.contains("a 'main' module is required")));
        }
        other => panic!("Expected InvalidPlan error, got {other:?}"),
    }
    assert!(planner.list_plans().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_revise_plan_checks_revision() {
    let (_temp_dir, planner) = create_test_planner().await;
    let stored = save(&planner, legacy_plan()).await;

    let mut revised = legacy_plan();
    revised["name"] = json!("Upper Lower v2");

    let updated = planner
        .revise_plan(&RevisePlan {
            id: stored.id,
            plan: revised.clone(),
            revision: Some(1),
        })
        .await
        .expect("Failed to revise plan");
    assert_eq!(updated.revision, 2);
    assert_eq!(updated.plan.name, "Upper Lower v2");

    let stale = planner
        .revise_plan(&RevisePlan {
            id: stored.id,
            plan: revised,
            revision: Some(1),
        })
        .await;
    assert!(matches!(
        stale,
        Err(PlanError::RevisionConflict { expected: 1, .. })
    ));

    let missing = planner
        .revise_plan(&RevisePlan {
            id: 404,
            plan: legacy_plan(),
            revision: None,
        })
        .await;
    assert!(matches!(missing, Err(PlanError::PlanNotFound { id: 404 })));
}

#[tokio::test]
async fn test_list_and_delete_plans() {
    let (_temp_dir, planner) = create_test_planner().await;
    let first = save(&planner, legacy_plan()).await;
    save(&planner, legacy_plan()).await;

    let summaries = planner.list_plans().await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, first.id);
    assert_eq!(summaries[0].days, 2);
    assert_eq!(summaries[0].total_exercises, 4);

    let deleted = planner.delete_plan(&Id { id: first.id }).await.unwrap();
    assert_eq!(deleted.map(|plan| plan.id), Some(first.id));
    assert!(planner.delete_plan(&Id { id: first.id }).await.unwrap().is_none());
    assert_eq!(planner.list_plans().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_plan_stats() {
    let (_temp_dir, planner) = create_test_planner().await;
    let stored = save(&planner, legacy_plan()).await;

    let stats = planner.plan_stats(&Id { id: stored.id }).await.unwrap();
    assert_eq!(stats.total_exercises, 4);
    assert_eq!(stats.total_modules, 0);
    // 45 minutes and an estimated 7 minutes for two exercises
    assert_eq!(stats.average_duration, 26);
    assert_eq!(stats.unique_muscle_groups, 5);

    assert!(matches!(
        planner.plan_stats(&Id { id: 77 }).await,
        Err(PlanError::PlanNotFound { id: 77 })
    ));
}

#[tokio::test]
async fn test_export_does_not_touch_stored_plan() {
    let (_temp_dir, planner) = create_test_planner().await;
    let stored = save(&planner, legacy_plan()).await;

    let modular = planner
        .export_plan(&ExportPlan {
            id: stored.id,
            format: "modular".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(modular.format(), PlanFormat::Modular);
    assert_eq!(
        modular.enabled_modules,
        Some(vec![ModuleType::Warmup, ModuleType::Main, ModuleType::Cooldown])
    );

    let reloaded = planner.require_plan(&Id { id: stored.id }).await.unwrap();
    assert_eq!(reloaded.format, PlanFormat::Legacy);
    assert_eq!(reloaded.revision, 1);
}

#[tokio::test]
async fn test_migrate_plan_is_idempotent() {
    let (_temp_dir, planner) = create_test_planner().await;
    let stored = save(&planner, legacy_plan()).await;
    let id = Id { id: stored.id };

    let first = planner.migrate_plan(&id).await;
    assert!(first.success);
    assert!(first.changed);
    let after_first = planner.require_plan(&id).await.unwrap();

    let second = planner.migrate_plan(&id).await;
    assert!(second.success);
    assert!(!second.changed);
    assert!(second.errors.is_empty());

    let after_second = planner.require_plan(&id).await.unwrap();
    assert_eq!(after_second, after_first);
    assert_eq!(after_second.format, PlanFormat::Modular);

    let DayContent::Modules(modules) = &after_second.plan.workouts[0].content else {
        panic!("Expected modular day");
    };
    assert_eq!(modules.len(), 3);
    assert_eq!(modules[1].exercises.len(), 2);
}

#[tokio::test]
async fn test_migrate_all_plans() {
    let (_temp_dir, planner) = create_test_planner().await;
    save(&planner, legacy_plan()).await;
    let legacy = save(&planner, legacy_plan()).await;
    planner.migrate_plan(&Id { id: legacy.id }).await;

    let outcomes = planner.migrate_all_plans().await.unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].success);

    let summaries = planner.list_plans().await.unwrap();
    assert!(summaries.iter().all(|s| s.format == PlanFormat::Modular));
}

#[tokio::test]
async fn test_resolve_plan_against_catalog() {
    let (_temp_dir, planner) = create_test_planner().await;
    let stored = save(&planner, legacy_plan()).await;

    planner
        .import_catalog(vec![
            CatalogExercise {
                id: 10,
                name: "Bench Press".to_string(),
                primary_muscles: vec!["chest".to_string(), "front delts".to_string()],
            },
            CatalogExercise {
                id: 31,
                name: "Romanian Deadlift (Barbell)".to_string(),
                primary_muscles: vec!["hamstrings".to_string(), "glutes".to_string()],
            },
        ])
        .await
        .unwrap();
    assert_eq!(planner.list_catalog().await.unwrap().len(), 2);

    let resolution = planner.resolve_plan(&Id { id: stored.id }).await.unwrap();
    assert_eq!(resolution.report.by_id, 1);
    assert_eq!(resolution.report.by_name, 1);
    assert_eq!(
        resolution.report.unresolved,
        vec!["Barbell Row".to_string(), "Squat".to_string()]
    );
    assert_eq!(resolution.plan.revision, 2);

    let rdl = resolution
        .plan
        .plan
        .exercises()
        .find(|e| e.exercise_id == 31)
        .expect("deadlift re-pointed to the catalog entry");
    assert_eq!(rdl.exercise_name, "Romanian Deadlift (Barbell)");

    // Nothing left to change, so no new revision
    let again = planner.resolve_plan(&Id { id: stored.id }).await.unwrap();
    assert_eq!(again.plan.revision, 2);
}

#[tokio::test]
async fn test_recommend_load_from_history() {
    let (_temp_dir, planner) = create_test_planner().await;
    let params = RecommendLoad {
        exercise_id: 12,
        reps: "5".to_string(),
        rir: None,
    };

    assert!(planner.recommend_load(&params).await.unwrap().is_none());

    for _ in 0..3 {
        planner
            .log_set(&LogSet {
                exercise_id: 12,
                weight: 100.0,
                reps: 5,
                rir: Some(0),
            })
            .await
            .unwrap();
    }

    let best = planner.best_one_rep_max(&Id { id: 12 }).await.unwrap().unwrap();
    assert_eq!(best.value, 116.67);

    let recommendation = planner.recommend_load(&params).await.unwrap().unwrap();
    // 5 reps + 2 RIR -> 80% of 116.67, rounded to 92.5
    assert_eq!(recommendation.baseline, 92.5);
    assert_eq!(recommendation.progression.trend, Trend::Increase);
    assert_eq!(recommendation.progression.weight, 95.0);
    assert!(
        recommendation
            .progression
            .note
            .starts_with("Consistent performance")
    );
}

#[tokio::test]
async fn test_log_set_rejects_bad_rir() {
    let (_temp_dir, planner) = create_test_planner().await;
    let result = planner
        .log_set(&LogSet {
            exercise_id: 1,
            weight: 50.0,
            reps: 8,
            rir: Some(12),
        })
        .await;
    assert!(matches!(result, Err(PlanError::InvalidInput { .. })));
    assert!(planner.exercise_history(&Id { id: 1 }).await.unwrap().is_empty());
}
