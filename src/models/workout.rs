// ABOUTME: Weekly workout plan model matching the generated JSON schema
// ABOUTME: Plan documents persist the plan array with creation time and preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// One exercise within a day's session
///
/// Sets and reps stay strings because the generator emits ranges and
/// durations (`"8-12"`, `"30 sec"`) as often as plain counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name, e.g. "Pushups"
    pub name: String,
    /// Set count as written by the generator
    pub sets: String,
    /// Rep count or duration as written by the generator
    pub reps: String,
}

/// One day of the weekly plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day name, e.g. "Monday"
    pub day: String,
    /// Session focus, e.g. "Upper Body" or "Rest"
    #[serde(rename = "type")]
    pub focus: String,
    /// Exercises for the day, empty on rest days
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl DayPlan {
    /// Whether this day is a rest day
    #[must_use]
    pub fn is_rest_day(&self) -> bool {
        self.exercises.is_empty()
    }
}

/// Envelope the generator is instructed to return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Seven entries, Monday through Sunday
    pub weekly_plan: Vec<DayPlan>,
}

/// Inputs the user picked on the planner form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPreferences {
    /// Training days per week
    pub days: u8,
    /// Available equipment, e.g. "Bodyweight" or "Full Gym"
    pub equipment: String,
    /// Training emphasis, e.g. "Full Body"
    pub focus: String,
}

impl Default for PlanPreferences {
    fn default() -> Self {
        Self {
            days: 3,
            equipment: "Bodyweight".to_owned(),
            focus: "Full Body".to_owned(),
        }
    }
}

/// Stored shape of the current plan document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanDocument {
    /// The seven-day plan
    pub plan: Vec<DayPlan>,
    /// Creation time in epoch milliseconds
    pub created_at: i64,
    /// Preferences the plan was generated from
    pub preferences: PlanPreferences,
}

impl WorkoutPlanDocument {
    /// Wrap a generated plan with its preferences at a creation time
    #[must_use]
    pub fn new(plan: WorkoutPlan, preferences: PlanPreferences, created_at: i64) -> Self {
        Self {
            plan: plan.weekly_plan,
            created_at,
            preferences,
        }
    }
}
