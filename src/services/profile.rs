// ABOUTME: Profile editing service keeping the derived target cache honest
// ABOUTME: Targets are always recomputed on save, never taken from the edit form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::warn;

use crate::errors::AppResult;
use crate::intelligence::{compute_energy_targets, effective_targets};
use crate::models::{NutritionTargets, Profile};
use crate::services::journal;
use crate::store::{DocumentStore, DocumentWatch, UserScope};

/// Load the stored profile, if any.
///
/// A stored document that no longer decodes is logged and treated as
/// absent; the next save rebuilds it from the edit form.
///
/// # Errors
///
/// Returns store errors on read failure.
pub async fn load_profile(store: &dyn DocumentStore, scope: &UserScope) -> AppResult<Option<Profile>> {
    let Some(document) = store.get(&scope.profile()).await? else {
        return Ok(None);
    };

    match document.decode() {
        Ok(profile) => Ok(Some(profile)),
        Err(err) => {
            warn!("Discarding malformed stored profile: {err}");
            Ok(None)
        }
    }
}

/// Persist an edited profile, recomputing its target cache.
///
/// Business rules:
/// - Targets in the incoming profile are ignored; the cache is always the
///   freshest output of the target calculation
/// - When the calculation abstains (weight, height, or age missing) the
///   previously stored targets are kept, so one incomplete edit never
///   erases a valid cache
/// - The write merges, leaving fields this client does not model untouched
///
/// # Errors
///
/// Returns store errors on read or write failure.
pub async fn save_profile(
    store: &dyn DocumentStore,
    scope: &UserScope,
    mut profile: Profile,
    current_weight: Option<f64>,
) -> AppResult<Profile> {
    profile.targets = match compute_energy_targets(current_weight, &profile) {
        Some(computed) => Some(computed.as_nutrition_targets()),
        None => load_profile(store, scope)
            .await?
            .and_then(|stored| stored.targets),
    };

    store
        .set_merge(&scope.profile(), serde_json::to_value(&profile)?)
        .await?;
    Ok(profile)
}

/// Persist an edited profile using the most recently journaled weight.
///
/// # Errors
///
/// Returns store errors on read or write failure.
pub async fn save_profile_with_latest_weight(
    store: &dyn DocumentStore,
    scope: &UserScope,
    profile: Profile,
) -> AppResult<Profile> {
    let history = journal::load_history(store, scope).await?;
    save_profile(store, scope, profile, journal::latest_weight(&history)).await
}

/// Targets the nutrition display should track right now.
///
/// Falls back to the static defaults when no profile or cache exists.
///
/// # Errors
///
/// Returns store errors on read failure.
pub async fn current_targets(
    store: &dyn DocumentStore,
    scope: &UserScope,
) -> AppResult<NutritionTargets> {
    let profile = load_profile(store, scope).await?;
    Ok(effective_targets(profile.as_ref()))
}

/// Subscribe to the profile document
pub async fn watch_profile(store: &dyn DocumentStore, scope: &UserScope) -> DocumentWatch {
    store.watch_document(&scope.profile()).await
}
