//! MCP server implementation for liftplan
//!
//! Exposes plan validation, storage, migration and load recommendations to a
//! plan-generating model over the Model Context Protocol.

use std::sync::Arc;

use anyhow::Result;
use liftplan_core::Planner;
use log::{debug, error, info};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::signal::unix::{SignalKind, signal};

pub mod errors;
pub mod handlers;

pub use handlers::{
    EstimateOneRepMax, ExportPlan, Id, LogSet, McpResult, RecommendLoad, RevisePlan, SavePlan,
};

const INSTRUCTIONS: &str = r#"liftplan stores and checks workout plans produced by a plan generator, and tracks logged sets to recommend loads.

## Plan Formats
- **Legacy**: each day holds a flat `exercises` list
- **Modular**: each day holds ordered `modules` (warmup, main, core, cooldown); exactly one non-empty `main` module per day, orders 0, 1, 2, ... without gaps, and a plan-level `enabled_modules` list

## Workflow
1. Check a generated plan with `validate_plan`; fix every reported error
2. Store it with `save_plan`; the returned ID and revision identify it
3. Replace it later with `revise_plan`, passing the revision you edited
4. Convert stored legacy plans in place with `migrate_plan`
5. Use `resolve_plan` to attach catalog IDs to exercises referenced by name

## Training
- Record performed sets with `log_set`
- `estimate_one_rep_max` scores a single set; `recommend_load` combines the best estimate with the trend of recent sets"#;

/// MCP server for liftplan
#[derive(Clone)]
pub struct LiftplanMcpServer {
    planner: Arc<Planner>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LiftplanMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "validate_plan",
        description = "Check a plan record without storing it. Accepts legacy or modular plans and returns every structural problem found, so all of them can be fixed in one pass."
    )]
    async fn validate_plan(&self, params: Parameters<SavePlan>) -> McpResult {
        self.handlers().validate_plan(params).await
    }

    #[tool(
        name = "save_plan",
        description = "Store a new plan. The plan must pass validation; otherwise nothing is written and the errors are returned. Returns the new plan ID and its revision."
    )]
    async fn save_plan(&self, params: Parameters<SavePlan>) -> McpResult {
        self.handlers().save_plan(params).await
    }

    #[tool(
        name = "revise_plan",
        description = "Replace a stored plan with a revised version. Pass the revision you based the edit on; the write is refused if the plan changed in the meantime."
    )]
    async fn revise_plan(&self, params: Parameters<RevisePlan>) -> McpResult {
        self.handlers().revise_plan(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Display a stored plan with all of its days, modules and exercises."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List stored plans with their IDs, formats, day counts and revisions."
    )]
    async fn list_plans(&self) -> McpResult {
        self.handlers().list_plans().await
    }

    #[tool(
        name = "plan_stats",
        description = "Summary metrics of a stored plan: exercise and module counts, average day duration in minutes, and distinct primary muscle groups."
    )]
    async fn plan_stats(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().plan_stats(params).await
    }

    #[tool(
        name = "migrate_plan",
        description = "Convert a stored legacy plan to the modular format in place. Plans that are already modular are left untouched. Always returns an outcome with success flag and errors."
    )]
    async fn migrate_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().migrate_plan(params).await
    }

    #[tool(
        name = "resolve_plan",
        description = "Attach exercise catalog IDs to a stored plan. Exercises are matched by catalog ID first, then by case-insensitive name; exercises with no catalog entry are kept as they are and reported as unresolved."
    )]
    async fn resolve_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().resolve_plan(params).await
    }

    #[tool(
        name = "export_plan",
        description = "Return a stored plan as JSON in the requested format ('legacy' or 'modular') without changing what is stored."
    )]
    async fn export_plan(&self, params: Parameters<ExportPlan>) -> McpResult {
        self.handlers().export_plan(params).await
    }

    #[tool(
        name = "log_set",
        description = "Record a performed set for a catalog exercise: weight, completed reps and optional reps in reserve (0-10)."
    )]
    async fn log_set(&self, params: Parameters<LogSet>) -> McpResult {
        self.handlers().log_set(params).await
    }

    #[tool(
        name = "estimate_one_rep_max",
        description = "Estimate a one-rep max from a single set. The formula is picked from reps plus reps in reserve and the result carries a confidence level."
    )]
    async fn estimate_one_rep_max(&self, params: Parameters<EstimateOneRepMax>) -> McpResult {
        self.handlers().estimate_one_rep_max(params).await
    }

    #[tool(
        name = "recommend_load",
        description = "Recommend a working weight for an exercise and rep prescription (e.g. '5' or '8-12') from its logged history, adjusted up or down by the trend of the newest sets."
    )]
    async fn recommend_load(&self, params: Parameters<RecommendLoad>) -> McpResult {
        self.handlers().recommend_load(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for LiftplanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: LiftplanMcpServer) -> Result<()> {
    use rmcp::{ServiceExt, transport::stdio};

    info!("Starting liftplan MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
