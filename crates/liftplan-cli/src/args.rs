//! Command-line argument definitions using clap.
//!
//! Each `*Args` struct carries the clap attributes for one command and
//! converts into the matching core parameter type with `From`, so the core
//! crate stays free of clap.

use std::{fmt, path::PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use liftplan_core::params::{EstimateOneRepMax, Id, LogSet, RecommendLoad, SuggestWeight};

/// Workout plan validation, format migration and load progression
///
/// liftplan stores AI-generated workout plans, checks their structure,
/// migrates flat legacy plans to the modular format and turns logged sets
/// into one-rep-max estimates and working-weight recommendations. Run
/// `liftplan serve` to expose the same operations over MCP.
#[derive(Parser)]
#[command(version, about, name = "liftplan")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/liftplan/liftplan.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate, store, migrate and export workout plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage the exercise catalog
    #[command(alias = "c")]
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Log sets and get strength estimates and load suggestions
    #[command(alias = "l")]
    Lift {
        #[command(subcommand)]
        command: LiftCommands,
    },
    /// Start the MCP server
    Serve,
}

// ============================================================================
// Plan commands
// ============================================================================

/// A plan read from a JSON file
#[derive(ClapArgs)]
pub struct PlanFileArgs {
    /// Path to a JSON plan file, or '-' for stdin
    pub file: PathBuf,
}

/// Replace a stored plan with a revised version
#[derive(ClapArgs)]
pub struct RevisePlanArgs {
    /// ID of the plan to revise
    pub id: u64,
    /// Path to the revised JSON plan file, or '-' for stdin
    pub file: PathBuf,
    /// Only apply if the stored plan is still at this revision
    #[arg(long)]
    pub revision: Option<u64>,
}

/// Select a stored plan by ID
#[derive(ClapArgs)]
pub struct PlanIdArgs {
    /// ID of the plan
    pub id: u64,
}

impl From<PlanIdArgs> for Id {
    fn from(val: PlanIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a plan permanently
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Wire format of a plan
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Flat exercise list per day
    Legacy,
    /// Ordered warmup/main/core/cooldown modules per day
    Modular,
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Legacy => write!(f, "legacy"),
            FormatArg::Modular => write!(f, "modular"),
        }
    }
}

/// Print a stored plan as JSON in either format
#[derive(ClapArgs)]
pub struct ExportPlanArgs {
    /// ID of the plan to export
    pub id: u64,
    /// Format to export in
    #[arg(long, value_enum, default_value_t = FormatArg::Modular)]
    pub format: FormatArg,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Check a plan file without storing it
    #[command(alias = "v")]
    Validate(PlanFileArgs),
    /// Validate and store a plan file
    #[command(alias = "a")]
    Save(PlanFileArgs),
    /// Replace a stored plan with a revised version
    #[command(alias = "r")]
    Revise(RevisePlanArgs),
    /// Show details of a specific plan
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Summary metrics of a plan
    Stats(PlanIdArgs),
    /// Print a stored plan as JSON in either format
    #[command(alias = "e")]
    Export(ExportPlanArgs),
    /// Migrate a legacy plan to the modular format in place
    #[command(alias = "m")]
    Migrate(PlanIdArgs),
    /// Migrate every stored legacy plan
    MigrateAll,
    /// Reconcile a plan's exercises with the catalog
    Resolve(PlanIdArgs),
}

// ============================================================================
// Catalog commands
// ============================================================================

/// Load catalog entries from a JSON array file
#[derive(ClapArgs)]
pub struct ImportCatalogArgs {
    /// Path to a JSON array of {id, name, primary_muscles}, or '-' for stdin
    pub file: PathBuf,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Insert or replace catalog exercises from a file
    #[command(alias = "i")]
    Import(ImportCatalogArgs),
    /// List the catalog
    #[command(aliases = ["l", "ls"])]
    List,
}

// ============================================================================
// Lift commands
// ============================================================================

/// Record a performed set
#[derive(ClapArgs)]
pub struct LogSetArgs {
    /// Catalog ID of the exercise
    pub exercise_id: u64,
    /// Load lifted
    pub weight: f64,
    /// Completed repetitions
    pub reps: u32,
    /// Reps in reserve (0-10)
    #[arg(long)]
    pub rir: Option<u32>,
}

impl From<LogSetArgs> for LogSet {
    fn from(val: LogSetArgs) -> Self {
        LogSet {
            exercise_id: val.exercise_id,
            weight: val.weight,
            reps: val.reps,
            rir: val.rir,
        }
    }
}

/// Estimate a one-rep max from a single set
#[derive(ClapArgs)]
pub struct EstimateArgs {
    /// Load lifted
    pub weight: f64,
    /// Completed repetitions
    pub reps: u32,
    /// Reps in reserve (0-10)
    #[arg(long)]
    pub rir: Option<u32>,
}

impl From<EstimateArgs> for EstimateOneRepMax {
    fn from(val: EstimateArgs) -> Self {
        EstimateOneRepMax {
            weight: val.weight,
            reps: val.reps,
            rir: val.rir,
        }
    }
}

/// Select an exercise by catalog ID
#[derive(ClapArgs)]
pub struct ExerciseArgs {
    /// Catalog ID of the exercise
    pub exercise_id: u64,
}

impl From<ExerciseArgs> for Id {
    fn from(val: ExerciseArgs) -> Self {
        Id {
            id: val.exercise_id,
        }
    }
}

/// Working weight from a known one-rep max
#[derive(ClapArgs)]
pub struct SuggestArgs {
    /// Current one-rep max
    pub one_rep_max: f64,
    /// Rep prescription such as 5 or 8-12
    pub reps: String,
    /// Target reps in reserve (defaults to 2)
    #[arg(long)]
    pub rir: Option<u32>,
}

impl From<SuggestArgs> for SuggestWeight {
    fn from(val: SuggestArgs) -> Self {
        SuggestWeight {
            one_rep_max: val.one_rep_max,
            reps: val.reps,
            rir: val.rir,
        }
    }
}

/// Working weight from logged history
#[derive(ClapArgs)]
pub struct RecommendArgs {
    /// Catalog ID of the exercise
    pub exercise_id: u64,
    /// Rep prescription such as 5 or 8-12
    pub reps: String,
    /// Target reps in reserve (defaults to 2)
    #[arg(long)]
    pub rir: Option<u32>,
}

impl From<RecommendArgs> for RecommendLoad {
    fn from(val: RecommendArgs) -> Self {
        RecommendLoad {
            exercise_id: val.exercise_id,
            reps: val.reps,
            rir: val.rir,
        }
    }
}

#[derive(Subcommand)]
pub enum LiftCommands {
    /// Record a performed set
    #[command(alias = "l")]
    Log(LogSetArgs),
    /// Show the logged sets of an exercise
    #[command(alias = "h")]
    History(ExerciseArgs),
    /// Estimate a one-rep max from a single set
    #[command(alias = "e")]
    Estimate(EstimateArgs),
    /// Best one-rep-max estimate from logged history
    #[command(alias = "b")]
    Best(ExerciseArgs),
    /// Working weight from a known one-rep max
    #[command(alias = "s")]
    Suggest(SuggestArgs),
    /// Working weight and trend from logged history
    #[command(alias = "r")]
    Recommend(RecommendArgs),
}
