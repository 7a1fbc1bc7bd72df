// ABOUTME: Derived metrics engine entry point
// ABOUTME: Pure computations over stored logs and profile data, no I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Derived Metrics Engine
//!
//! Pure functions computing the numbers the dashboard displays from stored
//! profile and log data: nutrition-progress ratios, daily energy targets,
//! and windowed trend series. Nothing here performs I/O or holds state;
//! every function is re-entrant and safe to recompute on each snapshot.

/// Daily calorie and protein target calculation
pub mod energy;
/// Progress of today's intake toward the daily targets
pub mod nutrition;
/// Windowed series preparation for the history graphs
pub mod trends;

pub use energy::{compute_energy_targets, mifflin_st_jeor_bmr, EnergyTargets};
pub use nutrition::{
    daily_totals, effective_targets, nutrition_progress, progress_toward, NutritionProgress,
    ProgressMeasure,
};
pub use trends::{trend_series, TrendPoint, TrendSeries};
