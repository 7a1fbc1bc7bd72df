// ABOUTME: User profile model with derived nutrition target cache
// ABOUTME: Gender, activity tier, and goal enums matching the stored display strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

/// Biological gender used by the Mifflin-St Jeor constant
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Male (+5 constant)
    #[default]
    Male,
    /// Female (-161 constant)
    Female,
}

impl Gender {
    /// Parse gender from string
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "female" | "f" => Self::Female,
            _ => Self::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("Male"),
            Self::Female => f.write_str("Female"),
        }
    }
}

/// Five-tier activity level scaling BMR into TDEE
///
/// Wire strings match the profile documents the backend already stores
/// (`"Lightly Active"`, not `lightly_active`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActivityLevel {
    /// Little or no exercise (multiplier 1.2)
    #[default]
    Sedentary,
    /// Exercise 1-3 days/week (multiplier 1.375)
    #[serde(rename = "Lightly Active")]
    LightlyActive,
    /// Exercise 3-5 days/week (multiplier 1.55)
    #[serde(rename = "Moderately Active")]
    ModeratelyActive,
    /// Exercise 6-7 days/week (multiplier 1.725)
    #[serde(rename = "Very Active")]
    VeryActive,
    /// Physical job plus hard daily training (multiplier 1.9)
    #[serde(rename = "Extra Active")]
    ExtraActive,
}

impl ActivityLevel {
    /// TDEE multiplier for this tier
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtraActive => 1.9,
        }
    }

    /// Parse activity level from string
    ///
    /// Unknown tiers fall back to `Sedentary`, which carries the lowest
    /// multiplier and therefore never overstates a calorie target.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "lightlyactive" | "light" => Self::LightlyActive,
            "moderatelyactive" | "moderate" => Self::ModeratelyActive,
            "veryactive" => Self::VeryActive,
            "extraactive" | "extremelyactive" => Self::ExtraActive,
            _ => Self::Sedentary,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sedentary => f.write_str("Sedentary"),
            Self::LightlyActive => f.write_str("Lightly Active"),
            Self::ModeratelyActive => f.write_str("Moderately Active"),
            Self::VeryActive => f.write_str("Very Active"),
            Self::ExtraActive => f.write_str("Extra Active"),
        }
    }
}

/// Training goal adjusting the daily calorie target
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FitnessGoal {
    /// Cut 500 kcal/day below expenditure
    #[serde(rename = "Lose Weight")]
    LoseWeight,
    /// Add 300 kcal/day above expenditure
    #[serde(rename = "Build Muscle")]
    BuildMuscle,
    /// Eat at expenditure
    #[default]
    Maintain,
}

impl FitnessGoal {
    /// Daily calorie adjustment relative to TDEE
    #[must_use]
    pub const fn calorie_adjustment(&self) -> f64 {
        match self {
            Self::LoseWeight => -500.0,
            Self::BuildMuscle => 300.0,
            Self::Maintain => 0.0,
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoseWeight => f.write_str("Lose Weight"),
            Self::BuildMuscle => f.write_str("Build Muscle"),
            Self::Maintain => f.write_str("Maintain"),
        }
    }
}

/// Cached nutrition targets stored inside the profile document
///
/// Always the most recent output of the target calculation (or the static
/// fallback when the profile cannot produce one), never hand-edited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Daily calorie target in kcal
    pub calories: f64,
    /// Daily protein target in grams
    pub protein: f64,
}

/// Per-user profile singleton
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Gender for the BMR constant (stored documents default to Male, the
    /// form's first option, when never edited)
    #[serde(default)]
    pub gender: Gender,
    /// Training goal
    #[serde(default)]
    pub goal: FitnessGoal,
    /// Activity tier
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Derived target cache, recomputed on every profile save
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<NutritionTargets>,
}
