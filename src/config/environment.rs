// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables and runtime configuration parsing for the client
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration management

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::llm::{API_BASE_URL, DEFAULT_MODEL};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

/// Configuration for the generative-text endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key passed as a query parameter on every request
    pub api_key: String,
    /// Model identifier (e.g. `gemini-2.5-flash`)
    pub model: String,
    /// Base URL of the generative language API
    pub api_base: String,
}

impl GeminiConfig {
    /// Load the Gemini configuration from environment variables
    ///
    /// Reads `GEMINI_API_KEY` (required), `GEMINI_MODEL`, and
    /// `GEMINI_API_BASE` (both optional with service defaults).
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ConfigMissing` if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            AppError::new(
                ErrorCode::ConfigMissing,
                "GEMINI_API_KEY environment variable not set",
            )
        })?;

        Ok(Self {
            api_key,
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned()),
            api_base: env::var("GEMINI_API_BASE").unwrap_or_else(|_| API_BASE_URL.to_owned()),
        })
    }
}

/// Configuration for the hosted document store collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Application namespace all per-user collections live under
    pub app_id: String,
}

impl StoreConfig {
    /// Load the store configuration from environment variables
    ///
    /// Reads `FITNESS_APP_ID`, defaulting to the service name when unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            app_id: env::var("FITNESS_APP_ID").unwrap_or_else(|_| "pierre-fitness".to_owned()),
        }
    }
}

/// Complete client configuration
///
/// Constructed once at startup and handed to collaborators explicitly.
/// The remote call wrapper and the store-backed services never reach for
/// environment state themselves.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Generative endpoint settings
    pub gemini: GeminiConfig,
    /// Document store settings
    pub store: StoreConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load the full client configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is missing.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        Ok(Self {
            gemini: GeminiConfig::from_env()?,
            store: StoreConfig::from_env(),
            logging: LoggingConfig::from_env(),
        })
    }
}
