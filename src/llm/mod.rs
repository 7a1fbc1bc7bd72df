// ABOUTME: Text-generation abstraction over the remote generative endpoint
// ABOUTME: Defines the request shape, output format flag, and the resilient call contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generative Text Client
//!
//! One outbound call powers every intelligent feature in the client: the
//! coach chat, the food analysis, and the workout planner all send a prompt
//! plus a system instruction and read back a single text fragment.
//!
//! The contract is deliberately forgiving. [`TextGenerator::generate`]
//! returns `Option<String>`, absorbing rate limits (retried with backoff
//! and jitter), transport failures (retried with a flat delay), other HTTP
//! failures (abandoned at once), and unexpected envelope shapes. Callers
//! see either usable text or `None`, decide their own user-facing message,
//! and parse structured replies defensively via [`parse_structured`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use pierre_fitness_client::llm::{GenerateRequest, TextGenerator};
//!
//! async fn example(generator: &dyn TextGenerator) {
//!     let request = GenerateRequest::new("Suggest a 10 minute warm-up")
//!         .with_system("You are a professional fitness coach.");
//!     let reply = generator.generate(&request).await;
//! }
//! ```

mod gemini;
pub mod prompts;
mod retry;

pub use gemini::{GeminiClient, API_BASE_URL, DEFAULT_MODEL};
pub use retry::{AttemptError, RetryPolicy};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::errors::{AppError, AppResult};

/// Requested shape of the generated reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Free-form prose
    #[default]
    Text,
    /// Ask the endpoint to constrain output to a JSON document
    Json,
}

/// One logical request to the generative endpoint
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// User-visible prompt text
    pub prompt: String,
    /// Persona and formatting instruction sent out of band
    pub system_instruction: Option<String>,
    /// Requested reply shape
    pub format: ResponseFormat,
}

impl GenerateRequest {
    /// Create a free-form request from a prompt
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            format: ResponseFormat::Text,
        }
    }

    /// Set the system instruction
    #[must_use]
    pub fn with_system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Request a JSON-constrained reply
    #[must_use]
    pub const fn expecting_json(mut self) -> Self {
        self.format = ResponseFormat::Json;
        self
    }
}

/// Resilient text-generation contract
///
/// Implementations own their retry behavior and never surface transport or
/// rate-limit errors to callers: a request either yields text or `None`.
/// Each call runs an independent attempt budget with no throttle state
/// shared across invocations.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short identifier used in log lines
    fn name(&self) -> &'static str;

    /// Send one logical request, retrying internally as needed
    async fn generate(&self, request: &GenerateRequest) -> Option<String>;
}

/// Parse a structured reply the endpoint was asked to produce
///
/// The endpoint does not validate the per-call-site schema, so replies are
/// parsed defensively: a malformed document becomes a typed error the
/// caller logs and discards, leaving prior state untouched.
///
/// # Errors
///
/// Returns `ErrorCode::MalformedResponse` when the text is not valid JSON
/// or does not match the expected shape.
pub fn parse_structured<T: DeserializeOwned>(call_site: &str, text: &str) -> AppResult<T> {
    serde_json::from_str(strip_markdown_fences(text)).map_err(|e| {
        AppError::malformed_response(format!("{call_site} reply did not match schema: {e}"))
    })
}

/// Trim the ```json fences some models wrap structured replies in
fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Reply {
        name: String,
        kcal: f64,
    }

    #[test]
    fn test_request_builders() {
        let request = GenerateRequest::new("analyze this meal")
            .with_system("You are a nutritionist.")
            .expecting_json();

        assert_eq!(request.prompt, "analyze this meal");
        assert_eq!(
            request.system_instruction.as_deref(),
            Some("You are a nutritionist.")
        );
        assert_eq!(request.format, ResponseFormat::Json);
    }

    #[test]
    fn test_parse_structured_accepts_plain_json() {
        let reply: Reply =
            parse_structured("food analysis", r#"{"name": "Oatmeal", "kcal": 150}"#).unwrap();
        assert_eq!(reply.name, "Oatmeal");
    }

    #[test]
    fn test_parse_structured_strips_markdown_fences() {
        let fenced = "```json\n{\"name\": \"Oatmeal\", \"kcal\": 150}\n```";
        let reply: Reply = parse_structured("food analysis", fenced).unwrap();
        assert!((reply.kcal - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_structured_reports_schema_mismatch() {
        let err = parse_structured::<Reply>("food analysis", "I had a nice salad").unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::MalformedResponse);
        assert!(err.message.contains("food analysis"));
    }
}
