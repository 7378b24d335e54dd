//! One-repetition-maximum estimation.
//!
//! The formula is chosen by *effective reps* (performed reps plus reps in
//! reserve), since that is the number of reps the lifter could have done to
//! failure:
//!
//! | Effective reps | Formula                    | Confidence |
//! |----------------|----------------------------|------------|
//! | 1 to 5         | Epley                      | high       |
//! | 6 to 10        | mean of Epley and Brzycki  | high       |
//! | 11 to 15       | Lander                     | medium     |
//! | above 15       | Lander                     | low        |
//!
//! A formula that breaks down at extreme rep counts falls back to the raw
//! weight rather than failing.

use crate::models::{Confidence, OneRepMaxEstimate, OneRepMaxFormula, PerformanceSet};

/// Epley: `weight x (1 + reps / 30)`
pub fn epley(weight: f64, reps: u32) -> f64 {
    weight * (1.0 + f64::from(reps) / 30.0)
}

/// Brzycki: `weight x 36 / (37 - reps)`
///
/// Undefined from 37 reps on, where the raw weight is returned.
pub fn brzycki(weight: f64, reps: u32) -> f64 {
    if reps >= 37 {
        return weight;
    }
    weight * 36.0 / (37.0 - f64::from(reps))
}

/// Lander: `100 x weight / (101.3 - 2.67123 x reps)`
///
/// Returns the raw weight once the denominator is no longer positive.
pub fn lander(weight: f64, reps: u32) -> f64 {
    let denominator = 101.3 - 2.67123 * f64::from(reps);
    if denominator <= 0.0 {
        return weight;
    }
    100.0 * weight / denominator
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimates the one-rep max for a single performed set.
pub fn estimate_one_rep_max(set: &PerformanceSet) -> OneRepMaxEstimate {
    let reps = set.effective_reps();
    let weight = set.weight;

    let (value, formula, confidence) = match reps {
        0..=5 => (epley(weight, reps), OneRepMaxFormula::Epley, Confidence::High),
        6..=10 => (
            (epley(weight, reps) + brzycki(weight, reps)) / 2.0,
            OneRepMaxFormula::EpleyBrzyckiMean,
            Confidence::High,
        ),
        11..=15 => (lander(weight, reps), OneRepMaxFormula::Lander, Confidence::Medium),
        _ => (lander(weight, reps), OneRepMaxFormula::Lander, Confidence::Low),
    };

    OneRepMaxEstimate {
        value: round2(value),
        formula,
        confidence,
    }
}

/// Ranking score: confidence first, estimate size within a confidence tier.
fn score(estimate: &OneRepMaxEstimate) -> f64 {
    f64::from(estimate.confidence.weight()) * 1000.0 + estimate.value
}

/// Picks the best estimate across several sets.
///
/// Sets without positive weight and reps are ignored; `None` when nothing
/// usable remains.
pub fn best_one_rep_max(sets: &[PerformanceSet]) -> Option<OneRepMaxEstimate> {
    sets.iter()
        .filter(|set| set.weight > 0.0 && set.reps > 0)
        .map(estimate_one_rep_max)
        .max_by(|a, b| score(a).total_cmp(&score(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(weight: f64, reps: u32, rir: Option<u8>) -> PerformanceSet {
        PerformanceSet::new(weight, reps, rir)
    }

    #[test]
    fn test_epley_for_low_reps() {
        let estimate = estimate_one_rep_max(&set(100.0, 5, Some(0)));
        assert_eq!(estimate.value, 116.67);
        assert_eq!(estimate.formula, OneRepMaxFormula::Epley);
        assert_eq!(estimate.formula.as_str(), "Epley");
        assert_eq!(estimate.confidence, Confidence::High);
    }

    #[test]
    fn test_reserve_moves_set_into_blended_bracket() {
        // 5 reps + 3 RIR = 8 effective reps
        let estimate = estimate_one_rep_max(&set(100.0, 5, Some(3)));
        let expected = (epley(100.0, 8) + brzycki(100.0, 8)) / 2.0;
        assert_eq!(estimate.formula, OneRepMaxFormula::EpleyBrzyckiMean);
        assert_eq!(estimate.confidence, Confidence::High);
        assert!((estimate.value - expected).abs() < 0.01);
        assert_eq!(estimate.value, 125.4);
    }

    #[test]
    fn test_lander_brackets() {
        let medium = estimate_one_rep_max(&set(60.0, 12, None));
        assert_eq!(medium.formula, OneRepMaxFormula::Lander);
        assert_eq!(medium.confidence, Confidence::Medium);
        assert!((medium.value - lander(60.0, 12)).abs() < 0.01);

        let low = estimate_one_rep_max(&set(40.0, 14, Some(4)));
        assert_eq!(low.formula, OneRepMaxFormula::Lander);
        assert_eq!(low.confidence, Confidence::Low);
    }

    #[test]
    fn test_formula_fallbacks() {
        assert_eq!(brzycki(80.0, 37), 80.0);
        assert_eq!(brzycki(80.0, 50), 80.0);
        assert_eq!(lander(80.0, 38), 80.0);
        assert!(lander(80.0, 37) > 80.0);
    }

    #[test]
    fn test_extreme_reps_saturate() {
        let huge = set(100.0, u32::MAX, Some(5));
        assert_eq!(huge.effective_reps(), u32::MAX);

        // past every formula's range, so Lander falls back to the raw weight
        let estimate = estimate_one_rep_max(&huge);
        assert_eq!(estimate.formula, OneRepMaxFormula::Lander);
        assert_eq!(estimate.confidence, Confidence::Low);
        assert_eq!(estimate.value, 100.0);
    }

    #[test]
    fn test_estimate_increases_with_weight() {
        for (reps, rir) in [(1, None), (5, Some(2)), (9, Some(1)), (14, None), (25, Some(10)), (40, None)] {
            let mut previous = f64::MIN;
            for weight in [20.0, 42.5, 60.0, 100.0, 180.0, 250.0] {
                let value = estimate_one_rep_max(&set(weight, reps, rir)).value;
                assert!(value > previous, "not increasing at {weight} x {reps}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_best_prefers_confidence_over_size() {
        let sets = [
            set(60.0, 20, None), // low confidence, large estimate
            set(100.0, 3, Some(1)),
            set(110.0, 2, Some(0)),
            set(0.0, 5, None),
            set(140.0, 0, None),
        ];
        let best = best_one_rep_max(&sets).expect("usable sets present");
        assert_eq!(best.confidence, Confidence::High);
        assert_eq!(best.value, estimate_one_rep_max(&sets[2]).value);
    }

    #[test]
    fn test_best_ignores_unusable_sets() {
        assert_eq!(best_one_rep_max(&[]), None);
        assert_eq!(best_one_rep_max(&[set(0.0, 5, None), set(50.0, 0, Some(2))]), None);
    }
}
