// ABOUTME: Daily energy target calculation from body weight and profile data
// ABOUTME: Mifflin-St Jeor BMR, activity-scaled TDEE, goal-adjusted calorie and protein targets
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Energy Target Module
//!
//! Computes the daily calorie and protein targets shown on the dashboard
//! and cached on the profile. The calculation is pure and idempotent:
//! identical inputs always yield the identical result, and incomplete
//! inputs yield no result at all rather than a misleading number.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use serde::{Deserialize, Serialize};

use crate::models::{ActivityLevel, FitnessGoal, Gender, NutritionTargets, Profile};

/// Protein recommendation in grams per kilogram of body weight
const PROTEIN_G_PER_KG: f64 = 2.0;

/// Complete energy target calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyTargets {
    /// Basal Metabolic Rate in kcal/day, unrounded
    pub bmr: f64,
    /// Total Daily Energy Expenditure in kcal/day, rounded to a whole number
    pub tdee: f64,
    /// Daily calorie target: TDEE shifted by the goal adjustment
    pub calories: f64,
    /// Daily protein target in grams, rounded to a whole number
    pub protein: f64,
}

impl EnergyTargets {
    /// The slice of the result the profile document caches
    #[must_use]
    pub const fn as_nutrition_targets(&self) -> NutritionTargets {
        NutritionTargets {
            calories: self.calories,
            protein: self.protein,
        }
    }
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
/// - Men: +5
/// - Women: -161
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
#[must_use]
pub fn mifflin_st_jeor_bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let gender_constant = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + gender_constant
}

/// Compute the full energy target set for a user
///
/// Steps:
/// 1. BMR via Mifflin-St Jeor.
/// 2. TDEE = round(BMR x activity multiplier), five-tier table from
///    [`ActivityLevel::multiplier`].
/// 3. Calories = TDEE shifted by [`FitnessGoal::calorie_adjustment`]
///    (-500 to lose weight, +300 to build muscle, unchanged to maintain).
/// 4. Protein = round(2.0 x `weight_kg`).
///
/// Returns `None` when weight, height, or age is missing: callers must
/// fall back to previously stored targets or the application defaults
/// instead of computing from a partial profile.
#[must_use]
pub fn compute_energy_targets(weight_kg: Option<f64>, profile: &Profile) -> Option<EnergyTargets> {
    let weight_kg = weight_kg?;
    let height_cm = profile.height?;
    let age = profile.age?;

    let bmr = mifflin_st_jeor_bmr(weight_kg, height_cm, age, profile.gender);
    let tdee = (bmr * profile.activity_level.multiplier()).round();
    let calories = tdee + profile.goal.calorie_adjustment();
    let protein = (weight_kg * PROTEIN_G_PER_KG).round();

    Some(EnergyTargets {
        bmr,
        tdee,
        calories,
        protein,
    })
}
