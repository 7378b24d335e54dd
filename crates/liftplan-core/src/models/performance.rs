//! Logged training history and derived strength estimates.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Highest reps-in-reserve value a lifter can report.
pub const MAX_RIR: u8 = 10;

/// An actually performed set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSet {
    /// Load lifted (non-negative)
    pub weight: f64,

    /// Completed repetitions
    pub reps: u32,

    /// Reps in reserve (0-10), when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rir: Option<u8>,
}

impl PerformanceSet {
    pub fn new(weight: f64, reps: u32, rir: Option<u8>) -> Self {
        Self { weight, reps, rir }
    }

    /// Reps to failure: performed reps plus reported reserve.
    pub fn effective_reps(&self) -> u32 {
        self.reps
            .saturating_add(u32::from(self.rir.unwrap_or(0).min(MAX_RIR)))
    }
}

/// A stored performance set for a catalog exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceRecord {
    pub id: u64,
    pub exercise_id: u64,
    #[serde(flatten)]
    pub set: PerformanceSet,
    pub performed_at: Timestamp,
}

/// Confidence grade of a one-rep-max estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Ranking weight used when choosing the best of several estimates.
    pub fn weight(&self) -> u32 {
        match self {
            Confidence::High => 3,
            Confidence::Medium => 2,
            Confidence::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Formula (or blend) that produced an estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OneRepMaxFormula {
    #[serde(rename = "Epley")]
    Epley,
    #[serde(rename = "Epley/Brzycki")]
    EpleyBrzyckiMean,
    #[serde(rename = "Lander")]
    Lander,
}

impl OneRepMaxFormula {
    pub fn as_str(&self) -> &'static str {
        match self {
            OneRepMaxFormula::Epley => "Epley",
            OneRepMaxFormula::EpleyBrzyckiMean => "Epley/Brzycki",
            OneRepMaxFormula::Lander => "Lander",
        }
    }
}

/// Derived one-repetition-maximum estimate. Never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OneRepMaxEstimate {
    pub value: f64,
    pub formula: OneRepMaxFormula,
    pub confidence: Confidence,
}
