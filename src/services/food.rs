// ABOUTME: Meal analysis service turning free-text descriptions into logged entries
// ABOUTME: Structured generator replies are parsed defensively and discarded on mismatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Local};
use tracing::warn;

use crate::errors::AppResult;
use crate::llm::prompts::FOOD_ANALYSIS_SYSTEM_PROMPT;
use crate::llm::{parse_structured, GenerateRequest, TextGenerator};
use crate::logging::AppLogger;
use crate::models::{FoodAnalysis, FoodLogEntry};
use crate::store::{CollectionWatch, DocumentStore, UserScope};

/// Display-locale date string entries are stamped and filtered with
fn display_date(at: DateTime<Local>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

/// Analyze a described meal and append it to the food log.
///
/// Business rules:
/// - A blank description is a no-op, no request is sent
/// - A failed or exhausted remote call yields `Ok(None)`; the generator has
///   already logged the diagnostics
/// - A reply that does not match the analysis schema is logged and
///   discarded, leaving the log untouched (recoverable, never an error)
/// - Entries are stamped with the capture time: display date for the today
///   filter, epoch milliseconds for ordering, and a wall-clock time label
///
/// # Errors
///
/// Returns store errors on write failure.
pub async fn analyze_and_log_meal(
    store: &dyn DocumentStore,
    generator: &dyn TextGenerator,
    scope: &UserScope,
    description: &str,
    at: DateTime<Local>,
) -> AppResult<Option<FoodLogEntry>> {
    let description = description.trim();
    if description.is_empty() {
        return Ok(None);
    }

    let request = GenerateRequest::new(format!("Analyze this meal: {description}"))
        .with_system(FOOD_ANALYSIS_SYSTEM_PROMPT)
        .expecting_json();
    let Some(reply) = generator.generate(&request).await else {
        return Ok(None);
    };

    let analysis = match parse_structured::<FoodAnalysis>("food analysis", &reply) {
        Ok(analysis) => analysis,
        Err(err) => {
            AppLogger::log_discarded_reply("food analysis", &err.message);
            return Ok(None);
        }
    };

    let mut entry = FoodLogEntry::from_analysis(
        analysis,
        display_date(at),
        at.timestamp_millis(),
        at.format("%H:%M").to_string(),
    );
    let id = store
        .add(&scope.food_logs(), serde_json::to_value(&entry)?)
        .await?;
    entry.id = Some(id);
    Ok(Some(entry))
}

/// Entries logged on the given day, newest first.
///
/// The log keeps every entry ever written; the day's view filters by the
/// stored display-date string and orders by capture timestamp. Stored
/// documents that no longer decode are logged and skipped.
///
/// # Errors
///
/// Returns store errors on read failure.
pub async fn entries_for_day(
    store: &dyn DocumentStore,
    scope: &UserScope,
    day: DateTime<Local>,
) -> AppResult<Vec<FoodLogEntry>> {
    let today = display_date(day);
    let documents = store.list(&scope.food_logs()).await?;

    let mut entries: Vec<FoodLogEntry> = documents
        .iter()
        .filter_map(|document| match document.decode::<FoodLogEntry>() {
            Ok(mut entry) => {
                entry.id = Some(document.id.clone());
                Some(entry)
            }
            Err(err) => {
                warn!("Skipping malformed food log {}: {err}", document.id);
                None
            }
        })
        .filter(|entry| entry.date == today)
        .collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(entries)
}

/// Delete one logged entry by id.
///
/// # Errors
///
/// Returns store errors on delete failure. Deleting an id that is already
/// gone is a no-op.
pub async fn delete_entry(store: &dyn DocumentStore, scope: &UserScope, id: &str) -> AppResult<()> {
    store.delete(&scope.food_log(id)).await
}

/// Subscribe to the food log collection
pub async fn watch_food_logs(store: &dyn DocumentStore, scope: &UserScope) -> CollectionWatch {
    store.watch_collection(&scope.food_logs()).await
}
