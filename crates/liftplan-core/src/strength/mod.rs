//! Strength estimation and load progression.
//!
//! - [`estimate`]: one-repetition-maximum estimates from performed sets
//! - [`load`]: working-weight suggestions and trend-based progression

pub mod estimate;
pub mod load;

pub use estimate::{best_one_rep_max, brzycki, epley, estimate_one_rep_max, lander};
pub use load::{
    DEFAULT_TARGET_RIR, Progression, Trend, intensity_for, round_to_increment, suggest_progression,
    suggest_weight,
};
