//! Display implementations for domain models.
//!
//! Output is markdown: plans render as a heading per day, module headings
//! below modular days and one bullet per exercise.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    convert::day_duration,
    models::{
        CatalogExercise, DayContent, Difficulty, ModuleType, OneRepMaxEstimate, PerformanceRecord,
        PlanFormat, PlanSummary, Reps, StoredPlan, WorkoutDay, WorkoutExercise, WorkoutModule,
        WorkoutPlan,
    },
    planner::{LoadRecommendation, MigrationOutcome, PlanResolution},
    stats::PlanStats,
    strength::Progression,
    validation::ValidationReport,
};

impl fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reps::Count(n) => write!(f, "{n}"),
            Reps::Text(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for WorkoutExercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}** (#{}): {} x {}",
            self.exercise_name, self.exercise_id, self.sets, self.reps
        )?;
        if !self.rest.trim().is_empty() {
            write!(f, ", rest {}", self.rest)?;
        }
        if let Some(weight) = &self.suggested_weight {
            write!(f, ", weight {weight}")?;
        }
        writeln!(f)?;

        if !self.primary_muscles.is_empty() {
            writeln!(f, "  - Muscles: {}", self.primary_muscles.join(", "))?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "  - Notes: {notes}")?;
        }
        Ok(())
    }
}

impl fmt::Display for WorkoutModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({}, {} min)",
            self.order, self.name, self.module_type, self.duration_minutes
        )?;
        writeln!(f)?;

        if !self.description.trim().is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }

        for exercise in &self.exercises {
            write!(f, "{exercise}")?;
        }
        if !self.exercises.is_empty() {
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for WorkoutDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let estimated = if self.total_duration_minutes.is_some() {
            ""
        } else {
            ", estimated"
        };
        writeln!(
            f,
            "## {}: {} ({} min{estimated})",
            self.day,
            self.name,
            day_duration(self)
        )?;
        writeln!(f)?;

        if !self.description.trim().is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }

        match &self.content {
            DayContent::Exercises(exercises) => {
                for exercise in exercises {
                    write!(f, "{exercise}")?;
                }
                writeln!(f)?;
            }
            DayContent::Modules(modules) => {
                let mut ordered: Vec<&WorkoutModule> = modules.iter().collect();
                ordered.sort_by_key(|module| module.order);
                for module in ordered {
                    write!(f, "{module}")?;
                }
            }
        }
        Ok(())
    }
}

/// Metadata bullets, description and days, shared by plan and stored plan.
fn fmt_plan_body(plan: &WorkoutPlan, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "- Difficulty: {}", plan.difficulty)?;
    if plan.duration_weeks > 0 || plan.days_per_week > 0 {
        writeln!(
            f,
            "- Schedule: {} weeks, {} days per week",
            plan.duration_weeks, plan.days_per_week
        )?;
    }
    if !plan.goals.is_empty() {
        writeln!(f, "- Goals: {}", plan.goals.join(", "))?;
    }
    if let Some(modules) = &plan.enabled_modules {
        let names: Vec<&str> = modules.iter().map(ModuleType::as_str).collect();
        writeln!(f, "- Modules: {}", names.join(", "))?;
    }
    if let Some(version) = &plan.format_version {
        writeln!(f, "- Format version: {version}")?;
    }
    if let Some(migrated_at) = &plan.migrated_at {
        writeln!(f, "- Migrated: {}", LocalDateTime(migrated_at))?;
    }

    if !plan.description.trim().is_empty() {
        writeln!(f)?;
        writeln!(f, "{}", plan.description)?;
    }
    writeln!(f)?;

    for day in &plan.workouts {
        write!(f, "{day}")?;
    }
    Ok(())
}

impl fmt::Display for WorkoutPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- Format: {}", self.format())?;
        fmt_plan_body(self, f)
    }
}

impl fmt::Display for StoredPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.plan.name)?;
        writeln!(f)?;
        writeln!(f, "- Format: {}", self.format)?;
        writeln!(f, "- Revision: {}", self.revision)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        fmt_plan_body(&self.plan, f)
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Format**: {} | **Difficulty**: {}",
            self.format, self.difficulty
        )?;
        writeln!(
            f,
            "- **Days**: {} | **Exercises**: {}",
            self.days, self.total_exercises
        )?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for PlanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Exercises: {}", self.total_exercises)?;
        writeln!(f, "- Modules: {}", self.total_modules)?;
        writeln!(f, "- Average day: {} min", self.average_duration)?;
        writeln!(f, "- Muscle groups: {}", self.unique_muscle_groups)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            return writeln!(f, "Plan is valid.");
        }
        writeln!(f, "Plan has {} problem(s):", self.errors.len())?;
        writeln!(f)?;
        for error in &self.errors {
            writeln!(f, "- {error}")?;
        }
        Ok(())
    }
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match (self.success, self.changed) {
            (true, true) => "migrated to modular",
            (true, false) => "already modular, unchanged",
            (false, _) => "migration failed",
        };
        writeln!(f, "- Plan {}: {status}", self.plan_id)?;
        for error in &self.errors {
            writeln!(f, "  - {error}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CatalogExercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** (#{})", self.name, self.id)?;
        if !self.primary_muscles.is_empty() {
            write!(f, ": {}", self.primary_muscles.join(", "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for PlanResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Resolved {} exercise(s) by id and {} by name.",
            self.report.by_id, self.report.by_name
        )?;
        if !self.report.unresolved.is_empty() {
            writeln!(f)?;
            writeln!(f, "Not found in the catalog:")?;
            writeln!(f)?;
            for name in &self.report.unresolved {
                writeln!(f, "- {name}")?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.plan)
    }
}

impl fmt::Display for PerformanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- Set {}: exercise #{}, {} x {}",
            self.id, self.exercise_id, self.set.weight, self.set.reps
        )?;
        if let Some(rir) = self.set.rir {
            write!(f, " @ RIR {rir}")?;
        }
        writeln!(f, " ({})", LocalDateTime(&self.performed_at))
    }
}

impl fmt::Display for OneRepMaxEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Estimated 1RM: **{}** ({}, {} confidence)",
            self.value,
            self.formula.as_str(),
            self.confidence.as_str()
        )
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Next weight: **{}** ({})", self.weight, self.trend)?;
        writeln!(f)?;
        writeln!(f, "{}", self.note)
    }
}

impl fmt::Display for LoadRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Exercise #{}", self.exercise_id)?;
        writeln!(f)?;
        write!(f, "{}", self.one_rep_max)?;
        writeln!(f, "Baseline suggestion: {}", self.baseline)?;
        writeln!(f)?;
        write!(f, "{}", self.progression)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        convert::to_modular,
        models::{Confidence, OneRepMaxFormula},
    };

    use super::*;

    fn plan() -> WorkoutPlan {
        WorkoutPlan::from_value(json!({
            "name": "Push Day",
            "description": "Chest focus",
            "difficulty": "advanced",
            "workouts": [{
                "day": "Monday", "name": "Push",
                "exercises": [
                    { "exercise_id": 4, "exercise_name": "Dips", "sets": 3, "reps": "8-12",
                      "rest": "90s", "notes": "Lean forward", "primary_muscles": ["chest"] }
                ]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_legacy_plan_display() {
        let output = plan().to_string();
        assert!(output.starts_with("# Push Day\n"));
        assert!(output.contains("- Format: legacy"));
        assert!(output.contains("- Difficulty: advanced"));
        assert!(output.contains("## Monday: Push (4 min, estimated)"));
        assert!(output.contains("- **Dips** (#4): 3 x 8-12, rest 90s"));
        assert!(output.contains("  - Notes: Lean forward"));
    }

    #[test]
    fn test_modular_plan_lists_modules_in_order() {
        let output = to_modular(plan()).to_string();
        let warmup = output.find("### 0. Warm-up (warmup, 10 min)").unwrap();
        let main = output.find("### 1. Main Workout (main, 4 min)").unwrap();
        let cooldown = output.find("### 2. Cool-down (cooldown, 10 min)").unwrap();
        assert!(warmup < main && main < cooldown);
        assert!(output.contains("- Modules: warmup, main, cooldown"));
    }

    #[test]
    fn test_validation_report_display() {
        let report = ValidationReport {
            is_valid: false,
            errors: vec!["Plan: 'name' is required".to_string()],
        };
        assert_eq!(
            report.to_string(),
            "Plan has 1 problem(s):\n\n- Plan: 'name' is required\n"
        );
    }

    #[test]
    fn test_estimate_display() {
        let estimate = OneRepMaxEstimate {
            value: 116.67,
            formula: OneRepMaxFormula::Epley,
            confidence: Confidence::High,
        };
        assert_eq!(
            estimate.to_string(),
            "Estimated 1RM: **116.67** (Epley, high confidence)\n"
        );
    }
}
