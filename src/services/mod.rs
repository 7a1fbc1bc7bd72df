// ABOUTME: Domain service layer for business logic above the store and generator
// ABOUTME: Provides UI-agnostic operations reusable from any rendering frontend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! This module contains UI-agnostic business logic above the document store
//! and the text generator. Services take their collaborators as explicit
//! parameters (`&dyn DocumentStore`, `&dyn TextGenerator`, [`UserScope`])
//! rather than reading ambient globals, ensuring consistent business rules
//! regardless of the frontend and making every operation testable against
//! the in-memory store and a scripted generator.
//!
//! [`UserScope`]: crate::store::UserScope

/// Daily coaching analysis built from today's biometrics and meals
pub mod coach;

/// Meal analysis and the per-user food log
pub mod food;

/// Daily biometric journal: single-field merge updates and history
pub mod journal;

/// Weekly workout plan generation and persistence
pub mod planner;

/// Profile editing with derived target recomputation
pub mod profile;
