//! MCP tool handler implementations.
//!
//! Tool arguments are the core parameter structs, wrapped in [`McpParams`] so
//! that they pick up a JSON schema without the core crate depending on rmcp.

use std::sync::Arc;

use liftplan_core::{
    Planner, display::PlanSummaries, params as core, strength::estimate_one_rep_max,
    validation::validate,
};
use log::debug;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types
///
/// Deserializes transparently into the wrapped type and forwards its JSON
/// schema.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type SavePlan = McpParams<core::SavePlan>;
pub type RevisePlan = McpParams<core::RevisePlan>;
pub type ExportPlan = McpParams<core::ExportPlan>;
pub type LogSet = McpParams<core::LogSet>;
pub type EstimateOneRepMax = McpParams<core::EstimateOneRepMax>;
pub type RecommendLoad = McpParams<core::RecommendLoad>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(output.to_string())]))
}

fn json(value: &impl serde::Serialize) -> McpResult {
    let output = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(format!("Failed to serialize result: {e}"), None))?;
    text(output)
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Planner>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Planner>) -> Self {
        Self { planner }
    }

    pub async fn validate_plan(&self, Parameters(params): Parameters<SavePlan>) -> McpResult {
        debug!("validate_plan: {:?}", params);
        json(&validate(&params.as_ref().plan))
    }

    pub async fn save_plan(&self, Parameters(params): Parameters<SavePlan>) -> McpResult {
        debug!("save_plan: {:?}", params);

        let stored = self
            .planner
            .save_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to save plan", e))?;

        text(format!(
            "Saved plan with ID {} at revision {}.\n\n{stored}",
            stored.id, stored.revision
        ))
    }

    pub async fn revise_plan(&self, Parameters(params): Parameters<RevisePlan>) -> McpResult {
        debug!("revise_plan: {:?}", params);

        let stored = self
            .planner
            .revise_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to revise plan", e))?;

        text(format!(
            "Plan {} is now at revision {}.\n\n{stored}",
            stored.id, stored.revision
        ))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {:?}", params);

        let stored = self
            .planner
            .require_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", e))?;
        text(stored)
    }

    pub async fn list_plans(&self) -> McpResult {
        debug!("list_plans");

        let summaries = self
            .planner
            .list_plans()
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", e))?;
        text(format!("# Plans\n\n{}", PlanSummaries(summaries)))
    }

    pub async fn plan_stats(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("plan_stats: {:?}", params);

        let stats = self
            .planner
            .plan_stats(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to compute plan stats", e))?;
        json(&stats)
    }

    pub async fn migrate_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("migrate_plan: {:?}", params);
        json(&self.planner.migrate_plan(params.as_ref()).await)
    }

    pub async fn resolve_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("resolve_plan: {:?}", params);

        let resolution = self
            .planner
            .resolve_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to resolve plan", e))?;
        text(resolution)
    }

    pub async fn export_plan(&self, Parameters(params): Parameters<ExportPlan>) -> McpResult {
        debug!("export_plan: {:?}", params);

        let plan = self
            .planner
            .export_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to export plan", e))?;
        json(&plan)
    }

    pub async fn log_set(&self, Parameters(params): Parameters<LogSet>) -> McpResult {
        debug!("log_set: {:?}", params);

        let record = self
            .planner
            .log_set(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to log set", e))?;
        text(format!("Logged set with ID {}.\n\n{record}", record.id))
    }

    pub async fn estimate_one_rep_max(
        &self,
        Parameters(params): Parameters<EstimateOneRepMax>,
    ) -> McpResult {
        debug!("estimate_one_rep_max: {:?}", params);

        let set = params
            .as_ref()
            .validate()
            .map_err(|e| to_mcp_error("Invalid set", e))?;
        json(&estimate_one_rep_max(&set))
    }

    pub async fn recommend_load(&self, Parameters(params): Parameters<RecommendLoad>) -> McpResult {
        debug!("recommend_load: {:?}", params);

        let recommendation = self
            .planner
            .recommend_load(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to recommend load", e))?;

        match recommendation {
            Some(recommendation) => json(&recommendation),
            None => text(format!(
                "No usable sets logged for exercise #{}. Log sets with log_set first.",
                params.as_ref().exercise_id
            )),
        }
    }
}
