// ABOUTME: Google Gemini client implementing the resilient text-generation contract
// ABOUTME: Posts to generateContent with retry on 429 and transport failure, null on the rest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Client
//!
//! Implementation of the [`TextGenerator`] trait for Google's Gemini models
//! via the Generative Language API.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio: <https://makersuite.google.com/app/apikey>. The model
//! and API base can be overridden with `GEMINI_MODEL` and `GEMINI_API_BASE`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pierre_fitness_client::config::GeminiConfig;
//! use pierre_fitness_client::llm::{GeminiClient, GenerateRequest, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new(GeminiConfig::from_env()?);
//!     let request = GenerateRequest::new("Suggest a simple high-protein breakfast");
//!     if let Some(reply) = client.generate(&request).await {
//!         println!("{reply}");
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::retry::{AttemptError, RetryPolicy};
use super::{GenerateRequest, ResponseFormat, TextGenerator};
use crate::config::GeminiConfig;
use crate::errors::AppError;
use crate::logging::AppLogger;

/// Default model to use
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Generative Language API
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<RequestContent>,
    generation_config: GenerationConfig,
}

/// Content block carrying the prompt or system instruction
#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

/// Single text part of a content block
#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

/// Generation configuration, `{}` unless a JSON reply is requested
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

/// Success envelope, every level optional so an unexpected shape
/// degrades to absence instead of a parse error
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ReplyContent>,
}

#[derive(Debug, Deserialize)]
struct ReplyContent {
    parts: Option<Vec<ReplyPart>>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

// ============================================================================
// Client Implementation
// ============================================================================

/// Google Gemini text-generation client
///
/// Holds no per-call state: the retry budget starts fresh on every
/// [`TextGenerator::generate`] invocation and nothing is throttled across
/// calls.
pub struct GeminiClient {
    api_key: String,
    client: Client,
    model: String,
    api_base: String,
    retry: RetryPolicy,
}

impl GeminiClient {
    /// Create a client from resolved configuration
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            api_key: config.api_key,
            client: Client::new(),
            model: config.model,
            api_base: config.api_base,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy, mainly to shrink budgets in tests
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build the `generateContent` URL with the key as query parameter
    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        )
    }

    /// Convert a request into the Gemini wire shape
    fn build_wire_request(request: &GenerateRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system_instruction.as_ref().map(|instruction| {
                RequestContent {
                    parts: vec![RequestPart {
                        text: instruction.clone(),
                    }],
                }
            }),
            generation_config: GenerationConfig {
                response_mime_type: (request.format == ResponseFormat::Json)
                    .then_some("application/json"),
            },
        }
    }

    /// Issue one attempt and classify its outcome for the retry policy
    ///
    /// 429 and transport failures are retryable. Any other non-success
    /// status is fatal: those failures (bad request, auth) would repeat
    /// identically, so the call abandons at once. A 200 whose body does not
    /// match the expected envelope succeeds with no text.
    async fn attempt(&self, url: &str, body: &GeminiRequest) -> Result<Option<String>, AttemptError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AttemptError::RateLimited);
        }
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Gemini API returned failure status");
            return Err(AttemptError::Fatal(AppError::external_service(
                "gemini",
                format!("generateContent returned {status}: {body_text}"),
            )));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        let Ok(envelope) = serde_json::from_str::<GeminiResponse>(&body_text) else {
            warn!("Gemini API returned a body that is not a response envelope");
            return Ok(None);
        };
        Ok(Self::extract_text(envelope))
    }

    /// First generated text fragment, or `None` if any envelope level is
    /// missing or the fragment is empty
    fn extract_text(envelope: GeminiResponse) -> Option<String> {
        let text = envelope
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text?;
        (!text.is_empty()).then_some(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %self.model, format = ?request.format))]
    async fn generate(&self, request: &GenerateRequest) -> Option<String> {
        let url = self.build_url();
        let body = Self::build_wire_request(request);

        let started = Instant::now();
        let attempts = AtomicU32::new(0);
        let outcome = self
            .retry
            .run("Gemini generateContent", || {
                attempts.fetch_add(1, Ordering::Relaxed);
                self.attempt(&url, &body)
            })
            .await;

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_remote_call(
            "generateContent",
            attempts.load(Ordering::Relaxed),
            outcome.is_ok(),
            duration_ms,
        );

        match outcome {
            Ok(text) => {
                if text.is_none() {
                    debug!("Gemini reply carried no usable text");
                }
                text
            }
            Err(err) => {
                warn!(error = %err, "Gemini call abandoned");
                None
            }
        }
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &"[REDACTED]")
            // Omit `client` field as HTTP clients are not useful to debug
            .finish_non_exhaustive()
    }
}
