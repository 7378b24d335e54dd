//! Markdown formatting for terminal and MCP output.
//!
//! Domain types implement [`std::fmt::Display`] directly (see [`models`]).
//! Collections and status messages get newtype wrappers so that empty lists
//! and headings are handled in one place.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (PlanSummaries, CatalogEntries,
//!   MigrationOutcomes)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use liftplan_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Plan 3 deleted".to_string());
//! assert_eq!(status.to_string(), "Success: Plan 3 deleted\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod status;

pub use collections::{CatalogEntries, MigrationOutcomes, PlanSummaries};
pub use datetime::LocalDateTime;
pub use status::OperationStatus;
