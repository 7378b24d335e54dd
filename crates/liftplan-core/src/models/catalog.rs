//! Authoritative exercise catalog entries.

use serde::{Deserialize, Serialize};

/// One exercise as known to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogExercise {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub primary_muscles: Vec<String>,
}
