// ABOUTME: Core data models for the fitness tracking client
// ABOUTME: Daily logs, food entries, profiles, and workout plans as stored by the document backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! This module contains the core data structures the client reads from and
//! writes to the hosted document store. The store owns their lifecycle; the
//! client only moves plain records around.
//!
//! ## Design Principles
//!
//! - **Wire Compatible**: Field names and enum strings match the documents
//!   the backend already holds, so existing user data round-trips untouched
//! - **Sparse Friendly**: Optional fields accommodate partially filled logs
//! - **Serializable**: All models support JSON serialization
//! - **Type Safe**: Strong typing prevents common data handling errors
//!
//! ## Core Models
//!
//! - `DailyLog`: One biometric record per user per calendar day
//! - `FoodLogEntry`: One analyzed meal, immutable once logged
//! - `Profile`: Singleton per user, carries the derived target cache
//! - `WorkoutPlan`: Seven-day plan regenerated wholesale on request

mod daily_log;
mod food;
mod profile;
mod workout;

pub use daily_log::{DailyLog, DailyLogField, WorkoutIntensity};
pub use food::{FoodAnalysis, FoodLogEntry};
pub use profile::{ActivityLevel, FitnessGoal, Gender, NutritionTargets, Profile};
pub use workout::{DayPlan, Exercise, PlanPreferences, WorkoutPlan, WorkoutPlanDocument};
