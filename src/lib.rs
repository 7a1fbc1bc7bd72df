// ABOUTME: Main library entry point for the Pierre fitness client
// ABOUTME: Personal tracking core with AI coaching over a hosted document store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Fitness Client
//!
//! A headless personal fitness-tracking client: daily biometrics, food
//! intake, and workout plans live in a hosted document store, while all
//! natural-language reasoning is delegated to a generative-text endpoint.
//! This crate is the portable core a rendering frontend binds to.
//!
//! ## Features
//!
//! - **Resilient remote calls**: one bounded retry policy with exponential
//!   backoff and jitter on rate limits and a flat delay on transport faults
//! - **Derived metrics**: nutrition progress ratios and Mifflin-St Jeor
//!   energy targets as pure, idempotent computations
//! - **Live data binding**: document and collection watches that push the
//!   authoritative latest snapshot after every change
//! - **Defensive parsing**: structured generator replies that fail their
//!   schema are logged and discarded, never crash the client
//!
//! ## Architecture
//!
//! - **Models**: plain records as the backend stores them
//! - **Store**: the document store collaborator behind a trait, plus the
//!   per-user path scheme and the in-memory backend
//! - **LLM**: the generative endpoint client and its retry policy
//! - **Intelligence**: pure derived-metric computations
//! - **Services**: UI-agnostic operations wiring the above together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_fitness_client::config::environment::ClientConfig;
//! use pierre_fitness_client::errors::AppResult;
//! use pierre_fitness_client::llm::GeminiClient;
//! use pierre_fitness_client::store::UserScope;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ClientConfig::from_env()?;
//!     let generator = GeminiClient::new(config.gemini);
//!     let scope = UserScope::new(config.store.app_id, "user-1");
//!
//!     println!("Fitness client ready for {}", scope.profile());
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by frontends and integration tests (tests/).
// They must remain `pub` so external consumers can access them.

/// Configuration management for the two external collaborators
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling system with standard error codes
pub mod errors;

/// Pure derived-metric computations: energy targets, progress, trends
pub mod intelligence;

/// Generative-text endpoint client with bounded retry
pub mod llm;

/// Logging and structured observability utilities
pub mod logging;

/// Data models as stored by the document backend
pub mod models;

/// UI-agnostic domain services over the store and generator
pub mod services;

/// Document store abstraction, path scheme, and live subscriptions
pub mod store;
