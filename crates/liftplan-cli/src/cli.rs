//! Command handlers for the liftplan CLI.
//!
//! Every handler calls one [`Planner`] operation (or a pure core function),
//! formats the result as markdown through its `Display` implementation and
//! hands it to the [`TerminalRenderer`]. Exported plans are the exception:
//! they are printed as raw JSON so they can be piped into other tools.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result, bail};
use liftplan_core::{
    Planner,
    display::{CatalogEntries, MigrationOutcomes, OperationStatus, PlanSummaries},
    models::CatalogExercise,
    params::{
        EstimateOneRepMax, ExportPlan, Id, LogSet, RecommendLoad, RevisePlan, SavePlan,
        SuggestWeight,
    },
    strength::{estimate_one_rep_max, suggest_weight},
    validation::validate,
};
use serde_json::Value;

use crate::{
    args::{CatalogCommands, DeletePlanArgs, LiftCommands, PlanCommands},
    renderer::TerminalRenderer,
};

/// Reads a JSON document from a file, or from stdin when the path is `-`.
fn read_json(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read JSON from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Validate(args) => self.validate_plan(&args.file),
            PlanCommands::Save(args) => self.save_plan(&args.file).await,
            PlanCommands::Revise(args) => {
                let params = RevisePlan {
                    id: args.id,
                    plan: read_json(&args.file)?,
                    revision: args.revision,
                };
                self.revise_plan(&params).await
            }
            PlanCommands::Show(args) => self.show_plan(&args.into()).await,
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Delete(args) => self.delete_plan(args).await,
            PlanCommands::Stats(args) => self.plan_stats(&args.into()).await,
            PlanCommands::Export(args) => {
                let params = ExportPlan {
                    id: args.id,
                    format: args.format.to_string(),
                };
                self.export_plan(&params).await
            }
            PlanCommands::Migrate(args) => self.migrate_plan(&args.into()).await,
            PlanCommands::MigrateAll => self.migrate_all_plans().await,
            PlanCommands::Resolve(args) => self.resolve_plan(&args.into()).await,
        }
    }

    pub async fn handle_catalog_command(&self, command: CatalogCommands) -> Result<()> {
        match command {
            CatalogCommands::Import(args) => self.import_catalog(&args.file).await,
            CatalogCommands::List => self.list_catalog().await,
        }
    }

    pub async fn handle_lift_command(&self, command: LiftCommands) -> Result<()> {
        match command {
            LiftCommands::Log(args) => self.log_set(args.into()).await,
            LiftCommands::History(args) => self.history(&args.into()).await,
            LiftCommands::Estimate(args) => self.estimate(&args.into()),
            LiftCommands::Best(args) => self.best(&args.into()).await,
            LiftCommands::Suggest(args) => self.suggest(&args.into()),
            LiftCommands::Recommend(args) => self.recommend(args.into()).await,
        }
    }

    // ------------------------------------------------------------------
    // Plans
    // ------------------------------------------------------------------

    fn validate_plan(&self, file: &Path) -> Result<()> {
        let report = validate(&read_json(file)?);
        self.renderer.render(&format!("# Validation\n\n{report}"))?;

        if !report.is_valid {
            bail!("{} validation error(s) in {}", report.errors.len(), file.display());
        }
        Ok(())
    }

    async fn save_plan(&self, file: &Path) -> Result<()> {
        let params = SavePlan {
            plan: read_json(file)?,
        };
        let stored = self
            .planner
            .save_plan(&params)
            .await
            .context("Failed to save plan")?;

        let status = OperationStatus::success(format!("Saved plan with ID {}", stored.id));
        self.renderer.render(&format!("{status}\n{stored}"))
    }

    async fn revise_plan(&self, params: &RevisePlan) -> Result<()> {
        let stored = self
            .planner
            .revise_plan(params)
            .await
            .with_context(|| format!("Failed to revise plan {}", params.id))?;

        let status = OperationStatus::success(format!(
            "Plan {} is now at revision {}",
            stored.id, stored.revision
        ));
        self.renderer.render(&format!("{status}\n{stored}"))
    }

    async fn show_plan(&self, params: &Id) -> Result<()> {
        match self.planner.get_plan(params).await? {
            Some(stored) => self.renderer.render(&stored.to_string()),
            None => bail!("Plan with ID {} not found", params.id),
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = PlanSummaries(self.planner.list_plans().await?);
        self.renderer.render(&format!("# Plans\n\n{summaries}"))
    }

    async fn delete_plan(&self, args: DeletePlanArgs) -> Result<()> {
        if !args.confirm {
            bail!(
                "Refusing to delete plan {} without --confirm. This cannot be undone.",
                args.id
            );
        }

        match self.planner.delete_plan(&Id { id: args.id }).await? {
            Some(deleted) => {
                let status = OperationStatus::success(format!(
                    "Deleted plan {} '{}'",
                    deleted.id, deleted.plan.name
                ));
                self.renderer.render(&status.to_string())
            }
            None => bail!("Plan with ID {} not found", args.id),
        }
    }

    async fn plan_stats(&self, params: &Id) -> Result<()> {
        let stats = self.planner.plan_stats(params).await?;
        self.renderer
            .render(&format!("# Stats for plan {}\n\n{stats}", params.id))
    }

    async fn export_plan(&self, params: &ExportPlan) -> Result<()> {
        let plan = self
            .planner
            .export_plan(params)
            .await
            .with_context(|| format!("Failed to export plan {}", params.id))?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        Ok(())
    }

    async fn migrate_plan(&self, params: &Id) -> Result<()> {
        let outcome = self.planner.migrate_plan(params).await;
        self.renderer.render(&outcome.to_string())?;

        if !outcome.success {
            bail!("Migration of plan {} failed", params.id);
        }
        Ok(())
    }

    async fn migrate_all_plans(&self) -> Result<()> {
        let outcomes = MigrationOutcomes(self.planner.migrate_all_plans().await?);
        self.renderer.render(&format!("# Migration\n\n{outcomes}"))?;

        let failed = outcomes.0.iter().filter(|o| !o.success).count();
        if failed > 0 {
            bail!("{failed} plan(s) could not be migrated");
        }
        Ok(())
    }

    async fn resolve_plan(&self, params: &Id) -> Result<()> {
        let resolution = self
            .planner
            .resolve_plan(params)
            .await
            .with_context(|| format!("Failed to resolve plan {}", params.id))?;
        self.renderer.render(&resolution.to_string())
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    async fn import_catalog(&self, file: &Path) -> Result<()> {
        let exercises: Vec<CatalogExercise> = serde_json::from_value(read_json(file)?)
            .context("Catalog file must be an array of {id, name, primary_muscles}")?;

        let count = self.planner.import_catalog(exercises).await?;
        let status = OperationStatus::success(format!("Imported {count} catalog exercise(s)"));
        self.renderer.render(&status.to_string())
    }

    async fn list_catalog(&self) -> Result<()> {
        let catalog = CatalogEntries(self.planner.list_catalog().await?);
        self.renderer
            .render(&format!("# Exercise Catalog\n\n{catalog}"))
    }

    // ------------------------------------------------------------------
    // Lifts
    // ------------------------------------------------------------------

    async fn log_set(&self, params: LogSet) -> Result<()> {
        let record = self.planner.log_set(&params).await?;
        let status = OperationStatus::success(format!("Logged set with ID {}", record.id));
        self.renderer.render(&format!("{status}\n{record}"))
    }

    async fn history(&self, params: &Id) -> Result<()> {
        let history = self.planner.exercise_history(params).await?;
        let mut output = format!("# History for exercise #{}\n\n", params.id);
        if history.is_empty() {
            output.push_str("No sets logged.\n");
        }
        for record in &history {
            output.push_str(&record.to_string());
        }
        self.renderer.render(&output)
    }

    fn estimate(&self, params: &EstimateOneRepMax) -> Result<()> {
        let set = params.validate()?;
        self.renderer
            .render(&estimate_one_rep_max(&set).to_string())
    }

    async fn best(&self, params: &Id) -> Result<()> {
        match self.planner.best_one_rep_max(params).await? {
            Some(estimate) => self.renderer.render(&estimate.to_string()),
            None => self
                .renderer
                .render(&format!("No usable sets logged for exercise #{}.\n", params.id)),
        }
    }

    fn suggest(&self, params: &SuggestWeight) -> Result<()> {
        let (target, rir) = params.validate()?;
        let weight = suggest_weight(params.one_rep_max, target, rir);
        self.renderer.render(&format!(
            "Suggested working weight: **{weight}** for {} reps at RIR {rir}\n",
            params.reps
        ))
    }

    async fn recommend(&self, params: RecommendLoad) -> Result<()> {
        match self.planner.recommend_load(&params).await? {
            Some(recommendation) => self.renderer.render(&recommendation.to_string()),
            None => self.renderer.render(&format!(
                "No usable sets logged for exercise #{}.\n",
                params.exercise_id
            )),
        }
    }
}
