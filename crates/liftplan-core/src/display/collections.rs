//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::{
    models::{CatalogExercise, PlanSummary},
    planner::MigrationOutcome,
};

/// Newtype wrapper for displaying a list of plan summaries.
///
/// # Examples
///
/// ```rust
/// use liftplan_core::{display::PlanSummaries, models::{Difficulty, PlanFormat, PlanSummary}};
/// use jiff::Timestamp;
///
/// let summaries = PlanSummaries(vec![PlanSummary {
///     id: 1,
///     name: "Upper Lower".to_string(),
///     format: PlanFormat::Modular,
///     difficulty: Difficulty::Intermediate,
///     days: 4,
///     total_exercises: 20,
///     updated_at: Timestamp::now(),
/// }]);
/// assert!(summaries.to_string().contains("## Upper Lower (ID: 1)"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the exercise catalog.
pub struct CatalogEntries(pub Vec<CatalogExercise>);

impl fmt::Display for CatalogEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "The exercise catalog is empty.");
        }
        for exercise in &self.0 {
            write!(f, "{exercise}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a batch of migration outcomes.
pub struct MigrationOutcomes(pub Vec<MigrationOutcome>);

impl fmt::Display for MigrationOutcomes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No legacy plans to migrate.");
        }

        let migrated = self.0.iter().filter(|o| o.changed).count();
        let failed = self.0.iter().filter(|o| !o.success).count();
        writeln!(
            f,
            "Migrated {migrated} of {} plan(s), {failed} failed.",
            self.0.len()
        )?;
        writeln!(f)?;
        for outcome in &self.0 {
            write!(f, "{outcome}")?;
        }
        Ok(())
    }
}
