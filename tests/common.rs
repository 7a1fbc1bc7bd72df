// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging init, store and scope builders, and a scripted generator
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `pierre_fitness_client`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::sync::{Mutex, Once};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use pierre_fitness_client::llm::{GenerateRequest, TextGenerator};
use pierre_fitness_client::models::{ActivityLevel, FitnessGoal, Gender, Profile};
use pierre_fitness_client::store::{InMemoryStore, UserScope};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test store setup
pub fn create_test_store() -> InMemoryStore {
    init_test_logging();
    InMemoryStore::new()
}

/// Scope with a unique user so tests sharing a store never collide
pub fn create_test_scope() -> UserScope {
    UserScope::new("pierre-fitness", format!("user-{}", Uuid::new_v4()))
}

/// Parse an ISO calendar date literal
pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Profile carrying every input the target calculation needs
pub fn complete_profile() -> Profile {
    Profile {
        height: Some(175.0),
        age: Some(30),
        gender: Gender::Male,
        goal: FitnessGoal::Maintain,
        activity_level: ActivityLevel::ModeratelyActive,
        targets: None,
    }
}

/// JSON reply matching the food-analysis schema
pub fn meal_reply(name: &str, kcal: f64, protein: f64) -> String {
    format!(r#"{{"name": "{name}", "kcal": {kcal}, "protein": {protein}, "carbs": 40, "fat": 15}}"#)
}

/// Generator double that scripts its replies and records every request
///
/// Replies are consumed front to back; once the script runs out the
/// generator keeps returning its final entry. An empty script means every
/// call fails the way an exhausted remote call does.
pub struct ScriptedGenerator {
    script: Mutex<Vec<Option<String>>>,
    seen: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedGenerator {
    /// Generator that answers every request with the same reply
    pub fn replying(reply: &str) -> Self {
        Self {
            script: Mutex::new(vec![Some(reply.to_owned())]),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Generator whose calls all fail
    pub fn failing() -> Self {
        Self {
            script: Mutex::new(Vec::new()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Generator that walks a reply sequence, sticking on the last entry
    pub fn with_script(replies: Vec<Option<String>>) -> Self {
        Self {
            script: Mutex::new(replies),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Every request seen so far, in call order
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> GenerateRequest {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, request: &GenerateRequest) -> Option<String> {
        self.seen.lock().unwrap().push(request.clone());
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.remove(0)
        } else {
            script.first().cloned().flatten()
        }
    }
}
