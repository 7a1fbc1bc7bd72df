// ABOUTME: Daily biometric log model keyed by calendar date
// ABOUTME: DailyLog, WorkoutIntensity, and the typed single-field update used by merge writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Subjective workout intensity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkoutIntensity {
    /// Easy session, conversation pace
    Low,
    /// Moderate effort
    Medium,
    /// All-out or near-maximal effort
    High,
}

impl WorkoutIntensity {
    /// Parse intensity from string
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "high" => Self::High,
            "medium" | "moderate" => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// One biometric record per user per calendar day
///
/// The backend keys these documents by ISO calendar date and merges later
/// writes into the same day, so every measurement field is optional and
/// absent fields survive partial updates untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    /// Calendar day this log belongs to (also the document key)
    pub date: NaiveDate,
    /// Body weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Hours slept the previous night
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Perceived stress, 1 (calm) to 5 (maxed out)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<u8>,
    /// Perceived energy, 1 (drained) to 5 (fresh)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<u8>,
    /// Glasses of water logged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<u32>,
    /// Free-text workout description (e.g. "Upper Body")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    /// Workout duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_duration: Option<u32>,
    /// Subjective workout intensity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_intensity: Option<WorkoutIntensity>,
    /// Waist measurement in inches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    /// Hip measurement in inches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip: Option<f64>,
    /// Chest measurement in inches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
}

impl DailyLog {
    /// Create an empty log for the given calendar day
    #[must_use]
    pub const fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            weight: None,
            sleep_hours: None,
            stress_level: None,
            energy_level: None,
            water_intake: None,
            workout_type: None,
            workout_duration: None,
            workout_intensity: None,
            waist: None,
            hip: None,
            chest: None,
        }
    }

    /// Apply a single typed field update, returning the modified log
    #[must_use]
    pub fn with_field(mut self, field: DailyLogField) -> Self {
        field.apply(&mut self);
        self
    }
}

/// A single typed daily-log field update
///
/// The dashboard edits one measurement at a time; each edit becomes a merge
/// write against that day's document carrying the updated field.
#[derive(Debug, Clone, PartialEq)]
pub enum DailyLogField {
    /// Body weight in kilograms
    Weight(f64),
    /// Hours slept
    SleepHours(f64),
    /// Stress rating 1-5
    StressLevel(u8),
    /// Energy rating 1-5
    EnergyLevel(u8),
    /// Glasses of water
    WaterIntake(u32),
    /// Workout description
    WorkoutType(String),
    /// Workout duration in minutes
    WorkoutDuration(u32),
    /// Workout intensity
    WorkoutIntensity(WorkoutIntensity),
    /// Waist measurement in inches
    Waist(f64),
    /// Hip measurement in inches
    Hip(f64),
    /// Chest measurement in inches
    Chest(f64),
}

impl DailyLogField {
    /// Write this field's value into the given log
    pub fn apply(self, log: &mut DailyLog) {
        match self {
            Self::Weight(v) => log.weight = Some(v),
            Self::SleepHours(v) => log.sleep_hours = Some(v),
            Self::StressLevel(v) => log.stress_level = Some(v),
            Self::EnergyLevel(v) => log.energy_level = Some(v),
            Self::WaterIntake(v) => log.water_intake = Some(v),
            Self::WorkoutType(v) => log.workout_type = Some(v),
            Self::WorkoutDuration(v) => log.workout_duration = Some(v),
            Self::WorkoutIntensity(v) => log.workout_intensity = Some(v),
            Self::Waist(v) => log.waist = Some(v),
            Self::Hip(v) => log.hip = Some(v),
            Self::Chest(v) => log.chest = Some(v),
        }
    }
}
