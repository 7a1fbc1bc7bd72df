// ABOUTME: Nutrition progress computation for the daily calorie and protein bars
// ABOUTME: Clamped display ratios with a separate over-target flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::defaults;
use crate::models::{FoodLogEntry, NutritionTargets, Profile};

/// Progress of one consumed total toward its daily target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressMeasure {
    /// Consumed amount so far today
    pub total: f64,
    /// Daily target the total is measured against
    pub target: f64,
    /// Display fraction in `[0, 1]`, clamped at 1 even when over target
    pub ratio: f64,
    /// Whether the total exceeds the target
    ///
    /// Kept as its own flag because the clamped ratio reads 1.0 for both
    /// "exactly on target" and "far past it".
    pub over_target: bool,
}

/// Daily nutrition progress for the dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionProgress {
    /// Calorie progress
    pub calories: ProgressMeasure,
    /// Protein progress
    pub protein: ProgressMeasure,
}

/// Measure a consumed total against a target
///
/// The ratio is `min(total / target, 1.0)`. A non-positive target cannot
/// produce a meaningful fraction, so anything consumed counts as full and
/// over target.
#[must_use]
pub fn progress_toward(total: f64, target: f64) -> ProgressMeasure {
    let ratio = if target > 0.0 {
        (total / target).min(1.0)
    } else if total > 0.0 {
        1.0
    } else {
        0.0
    };
    ProgressMeasure {
        total,
        target,
        ratio,
        over_target: total > target,
    }
}

/// Sum today's calories and protein, treating missing fields as zero
#[must_use]
pub fn daily_totals(entries: &[FoodLogEntry]) -> (f64, f64) {
    // Explicit +0.0 seed: `iter::Sum` for floats yields -0.0 on an empty
    // iterator, which would render as "-0" where these totals are displayed.
    let total_calories = entries
        .iter()
        .fold(0.0, |acc, e| acc + e.kcal.unwrap_or(0.0));
    let total_protein = entries
        .iter()
        .fold(0.0, |acc, e| acc + e.protein.unwrap_or(0.0));
    (total_calories, total_protein)
}

/// Compute both dashboard progress bars from today's food log
#[must_use]
pub fn nutrition_progress(entries: &[FoodLogEntry], targets: NutritionTargets) -> NutritionProgress {
    let (total_calories, total_protein) = daily_totals(entries);
    NutritionProgress {
        calories: progress_toward(total_calories, targets.calories),
        protein: progress_toward(total_protein, targets.protein),
    }
}

/// Targets to measure progress against for a possibly incomplete profile
///
/// Uses the profile's computed target cache when present and falls back to
/// the application defaults of 2000 kcal and 120 g protein otherwise.
#[must_use]
pub fn effective_targets(profile: Option<&Profile>) -> NutritionTargets {
    profile
        .and_then(|p| p.targets)
        .unwrap_or(NutritionTargets {
            calories: defaults::CALORIE_TARGET,
            protein: defaults::PROTEIN_TARGET,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kcal: Option<f64>, protein: Option<f64>) -> FoodLogEntry {
        FoodLogEntry {
            id: None,
            name: "test meal".to_owned(),
            kcal,
            protein,
            carbs: None,
            fat: None,
            date: "1/15/2026".to_owned(),
            timestamp: 0,
            time: "12:00:00".to_owned(),
        }
    }

    #[test]
    fn test_ratio_clamps_at_one_with_separate_over_flag() {
        let measure = progress_toward(2500.0, 2000.0);
        assert!((measure.ratio - 1.0).abs() < f64::EPSILON);
        assert!(measure.over_target);
    }

    #[test]
    fn test_exactly_on_target_is_full_but_not_over() {
        let measure = progress_toward(2000.0, 2000.0);
        assert!((measure.ratio - 1.0).abs() < f64::EPSILON);
        assert!(!measure.over_target);
    }

    #[test]
    fn test_partial_progress() {
        let measure = progress_toward(90.0, 120.0);
        assert!((measure.ratio - 0.75).abs() < f64::EPSILON);
        assert!(!measure.over_target);
    }

    #[test]
    fn test_missing_fields_count_as_zero() {
        let entries = vec![
            entry(Some(450.0), Some(30.0)),
            entry(None, Some(12.5)),
            entry(Some(200.0), None),
        ];

        let (calories, protein) = daily_totals(&entries);
        assert!((calories - 650.0).abs() < f64::EPSILON);
        assert!((protein - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_target_edge() {
        assert!((progress_toward(0.0, 0.0).ratio).abs() < f64::EPSILON);
        let measure = progress_toward(100.0, 0.0);
        assert!((measure.ratio - 1.0).abs() < f64::EPSILON);
        assert!(measure.over_target);
    }

    #[test]
    fn test_effective_targets_fall_back_to_defaults() {
        let targets = effective_targets(None);
        assert!((targets.calories - 2000.0).abs() < f64::EPSILON);
        assert!((targets.protein - 120.0).abs() < f64::EPSILON);

        let profile = Profile {
            targets: Some(NutritionTargets {
                calories: 2633.0,
                protein: 150.0,
            }),
            ..Profile::default()
        };
        let targets = effective_targets(Some(&profile));
        assert!((targets.calories - 2633.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dashboard_progress_from_entries() {
        let entries = vec![entry(Some(1200.0), Some(80.0)), entry(Some(1300.0), Some(20.0))];
        let progress = nutrition_progress(
            &entries,
            NutritionTargets {
                calories: 2000.0,
                protein: 120.0,
            },
        );

        assert!((progress.calories.ratio - 1.0).abs() < f64::EPSILON);
        assert!(progress.calories.over_target);
        assert!((progress.protein.ratio - 100.0 / 120.0).abs() < f64::EPSILON);
        assert!(!progress.protein.over_target);
    }
}
