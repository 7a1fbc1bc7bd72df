// ABOUTME: Daily biometric journal service over the per-user dailyLogs collection
// ABOUTME: Single-field merge updates, newest-first history, and live watch helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use tracing::warn;

use crate::errors::AppResult;
use crate::models::{DailyLog, DailyLogField};
use crate::store::{CollectionWatch, DocumentStore, DocumentWatch, UserScope};

/// Load the log for one calendar day, defaulting to an empty log.
///
/// Business rules:
/// - A missing document yields an empty log for that day, not an error
/// - A stored document that no longer decodes is logged and treated as
///   absent, so one bad record never blocks the day's journal
///
/// # Errors
///
/// Returns store errors on read failure.
pub async fn load_daily_log(
    store: &dyn DocumentStore,
    scope: &UserScope,
    date: NaiveDate,
) -> AppResult<DailyLog> {
    let Some(document) = store.get(&scope.daily_log(date)).await? else {
        return Ok(DailyLog::for_date(date));
    };

    Ok(document.decode().unwrap_or_else(|err| {
        warn!("Discarding malformed daily log for {date}: {err}");
        DailyLog::for_date(date)
    }))
}

/// Apply one field edit to a day's log and persist it.
///
/// Business rules:
/// - The write merges the full current log plus the edited field, so the
///   date key is always present and unrelated same-day fields survive
/// - Editing a day with no log yet creates its document
///
/// # Errors
///
/// Returns store errors on read or write failure.
pub async fn update_daily_field(
    store: &dyn DocumentStore,
    scope: &UserScope,
    date: NaiveDate,
    field: DailyLogField,
) -> AppResult<DailyLog> {
    let updated = load_daily_log(store, scope, date).await?.with_field(field);
    store
        .set_merge(&scope.daily_log(date), serde_json::to_value(&updated)?)
        .await?;
    Ok(updated)
}

/// Load the full journal history, newest day first.
///
/// Stored documents that no longer decode are logged and skipped.
///
/// # Errors
///
/// Returns store errors on read failure.
pub async fn load_history(store: &dyn DocumentStore, scope: &UserScope) -> AppResult<Vec<DailyLog>> {
    let documents = store.list(&scope.daily_logs()).await?;
    let mut logs: Vec<DailyLog> = documents
        .iter()
        .filter_map(|document| match document.decode() {
            Ok(log) => Some(log),
            Err(err) => {
                warn!("Skipping malformed daily log {}: {err}", document.id);
                None
            }
        })
        .collect();
    logs.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(logs)
}

/// Most recently logged body weight from a newest-first history
#[must_use]
pub fn latest_weight(history: &[DailyLog]) -> Option<f64> {
    history.iter().find_map(|log| log.weight)
}

/// Subscribe to one day's log document
pub async fn watch_daily_log(
    store: &dyn DocumentStore,
    scope: &UserScope,
    date: NaiveDate,
) -> DocumentWatch {
    store.watch_document(&scope.daily_log(date)).await
}

/// Subscribe to the whole journal collection
pub async fn watch_history(store: &dyn DocumentStore, scope: &UserScope) -> CollectionWatch {
    store.watch_collection(&scope.daily_logs()).await
}
