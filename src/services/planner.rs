// ABOUTME: Weekly workout plan generation service over the coach persona
// ABOUTME: Prompts for a strict JSON plan, parses defensively, and persists wholesale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Display;

use tracing::warn;

use crate::errors::AppResult;
use crate::llm::prompts::WORKOUT_PLAN_SYSTEM_PROMPT;
use crate::llm::{parse_structured, GenerateRequest, TextGenerator};
use crate::logging::AppLogger;
use crate::models::{PlanPreferences, Profile, WorkoutPlan, WorkoutPlanDocument};
use crate::store::{DocumentStore, UserScope};

fn metric<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "unspecified".to_owned(), |v| v.to_string())
}

/// Planning prompt with the profile, preferences, and the exact reply schema
fn build_prompt(profile: &Profile, preferences: &PlanPreferences) -> String {
    format!(
        "Create a weekly workout plan for a {} year old {} who wants to \"{}\".\n\
         Current stats: Height {} cm.\n\
         Preferences: {} days/week, Equipment: {}, Focus: {}.\n\n\
         Return ONLY a valid JSON object with this key: \"weekly_plan\".\n\
         \"weekly_plan\" should be an array of objects for each workout day (or rest day).\n\
         Each object format: {{ \"day\": \"Monday\", \"type\": \"Upper Body\", \"exercises\": [{{\"name\": \"Pushups\", \"sets\": \"3\", \"reps\": \"12\"}}] }}.\n\
         For Rest days, exercises should be empty array.",
        metric(profile.age),
        profile.gender,
        profile.goal,
        metric(profile.height),
        preferences.days,
        preferences.equipment,
        preferences.focus,
    )
}

/// Generate a weekly plan for the given profile and preferences.
///
/// Business rules:
/// - A failed or exhausted remote call yields `None`
/// - A reply that does not match the plan schema is logged and discarded;
///   the previous plan stays in place
pub async fn generate_plan(
    generator: &dyn TextGenerator,
    profile: &Profile,
    preferences: &PlanPreferences,
) -> Option<WorkoutPlan> {
    let request = GenerateRequest::new(build_prompt(profile, preferences))
        .with_system(WORKOUT_PLAN_SYSTEM_PROMPT)
        .expecting_json();
    let reply = generator.generate(&request).await?;

    match parse_structured::<WorkoutPlan>("workout plan", &reply) {
        Ok(plan) => Some(plan),
        Err(err) => {
            AppLogger::log_discarded_reply("workout plan", &err.message);
            None
        }
    }
}

/// Generate a plan and replace the stored current plan with it.
///
/// The plan document is replaced wholesale, never merged: a regenerated
/// plan supersedes the old one including its preferences and creation time.
///
/// # Errors
///
/// Returns store errors on write failure. A failed generation is `Ok(None)`
/// and leaves the stored plan untouched.
pub async fn generate_and_save_plan(
    store: &dyn DocumentStore,
    generator: &dyn TextGenerator,
    scope: &UserScope,
    profile: &Profile,
    preferences: PlanPreferences,
    created_at: i64,
) -> AppResult<Option<WorkoutPlanDocument>> {
    let Some(plan) = generate_plan(generator, profile, &preferences).await else {
        return Ok(None);
    };

    let document = WorkoutPlanDocument::new(plan, preferences, created_at);
    store
        .set(&scope.workout_plan(), serde_json::to_value(&document)?)
        .await?;
    Ok(Some(document))
}

/// Load the stored current plan, if any.
///
/// A stored document that no longer decodes is logged and treated as
/// absent so the planner can regenerate over it.
///
/// # Errors
///
/// Returns store errors on read failure.
pub async fn load_current_plan(
    store: &dyn DocumentStore,
    scope: &UserScope,
) -> AppResult<Option<WorkoutPlanDocument>> {
    let Some(document) = store.get(&scope.workout_plan()).await? else {
        return Ok(None);
    };

    match document.decode() {
        Ok(plan) => Ok(Some(plan)),
        Err(err) => {
            warn!("Discarding malformed stored workout plan: {err}");
            Ok(None)
        }
    }
}
