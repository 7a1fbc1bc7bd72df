// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Groups service identity, nutrition defaults, and remote call tuning in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Application constants grouped by domain. Values that mirror what the
//! hosted backend already stores (display strings, default targets) live
//! here so the rest of the crate never hardcodes them inline.

/// Service identity used in structured logs
pub mod service_names {
    /// Canonical service name for this client
    pub const FITNESS_CLIENT: &str = "pierre-fitness-client";
}

/// Nutrition fallbacks used when no computed target exists
pub mod defaults {
    /// Daily calorie target shown before a profile can produce one
    pub const CALORIE_TARGET: f64 = 2000.0;

    /// Daily protein target in grams shown before a profile can produce one
    pub const PROTEIN_TARGET: f64 = 120.0;
}

/// Tuning for the resilient remote call
pub mod remote_call {
    /// Maximum retries after the initial attempt
    pub const MAX_RETRIES: u32 = 5;

    /// Base delay for exponential backoff, in milliseconds
    pub const BASE_DELAY_MS: u64 = 2_000;

    /// Upper bound (exclusive) of the uniform jitter added to each backoff delay
    pub const MAX_JITTER_MS: u64 = 1_000;

    /// Flat delay applied after a transport-level failure, in milliseconds
    pub const TRANSPORT_DELAY_MS: u64 = 2_000;
}

/// Display window sizes for historical views
pub mod trends {
    /// Number of most recent daily entries shown in trend graphs
    pub const WINDOW_DAYS: usize = 7;
}
