// ABOUTME: System prompts for generative calls loaded at compile time
// ABOUTME: Personas for the trainer chat, food analysis, and workout planner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! This module provides system prompts for generative calls.
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Personal trainer persona for the coach chat
///
/// Instructs the model to ground its answer in the body-data and food
/// snapshot the prompt carries and to keep replies brief and friendly.
pub const TRAINER_SYSTEM_PROMPT: &str = include_str!("trainer_system.md");

/// Nutritionist persona for the food analysis call
///
/// Constrains the reply to a single JSON object with the
/// name/kcal/protein/carbs/fat schema the food log parses.
pub const FOOD_ANALYSIS_SYSTEM_PROMPT: &str = include_str!("food_analysis_system.md");

/// Fitness coach persona for the weekly plan call
pub const WORKOUT_PLAN_SYSTEM_PROMPT: &str = include_str!("workout_plan_system.md");

/// Get the system prompt for the trainer chat
#[must_use]
pub const fn get_trainer_system_prompt() -> &'static str {
    TRAINER_SYSTEM_PROMPT
}

/// Get the system prompt for the food analysis call
#[must_use]
pub const fn get_food_analysis_system_prompt() -> &'static str {
    FOOD_ANALYSIS_SYSTEM_PROMPT
}

/// Get the system prompt for the workout plan call
#[must_use]
pub const fn get_workout_plan_system_prompt() -> &'static str {
    WORKOUT_PLAN_SYSTEM_PROMPT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_are_not_empty() {
        assert!(!get_trainer_system_prompt().trim().is_empty());
        assert!(!get_food_analysis_system_prompt().trim().is_empty());
        assert!(!get_workout_plan_system_prompt().trim().is_empty());
    }

    #[test]
    fn test_food_analysis_prompt_names_every_schema_key() {
        for key in ["name", "kcal", "protein", "carbs", "fat"] {
            assert!(
                FOOD_ANALYSIS_SYSTEM_PROMPT.contains(&format!("\"{key}\"")),
                "missing key {key}"
            );
        }
    }
}
