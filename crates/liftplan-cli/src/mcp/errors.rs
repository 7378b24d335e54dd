//! Error handling utilities for MCP server

use liftplan_core::PlanError;
use rmcp::ErrorData;

/// Converts a planner error into an MCP error.
///
/// Problems with the caller's input become `invalid_params` so the client can
/// correct and retry; everything else is an internal error.
pub fn to_mcp_error(message: &str, error: PlanError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlanError::InvalidInput { .. }
        | PlanError::InvalidPlan { .. }
        | PlanError::PlanNotFound { .. }
        | PlanError::RevisionConflict { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
