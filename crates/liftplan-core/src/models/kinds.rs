//! Closed enumerations shared across the plan model.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wire representation of a workout plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlanFormat {
    /// Days carry a flat `exercises` list
    Legacy,

    /// Days carry an ordered `modules` list
    Modular,
}

impl FromStr for PlanFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(PlanFormat::Legacy),
            "modular" => Ok(PlanFormat::Modular),
            _ => Err(format!("Invalid plan format: {s}")),
        }
    }
}

impl PlanFormat {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanFormat::Legacy => "legacy",
            PlanFormat::Modular => "modular",
        }
    }
}

/// Phase of a training day in modular format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Warmup,
    Main,
    Core,
    Cooldown,
}

impl ModuleType {
    /// Every module type, in canonical session order.
    pub const ALL: [ModuleType; 4] = [
        ModuleType::Warmup,
        ModuleType::Main,
        ModuleType::Core,
        ModuleType::Cooldown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Warmup => "warmup",
            ModuleType::Main => "main",
            ModuleType::Core => "core",
            ModuleType::Cooldown => "cooldown",
        }
    }
}

impl FromStr for ModuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warmup" => Ok(ModuleType::Warmup),
            "main" => Ok(ModuleType::Main),
            "core" => Ok(ModuleType::Core),
            "cooldown" => Ok(ModuleType::Cooldown),
            _ => Err(format!("Invalid module type: {s}")),
        }
    }
}

/// Difficulty tier of a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}
