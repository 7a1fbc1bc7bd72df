// ABOUTME: Food log entry model and the structured analysis reply it is built from
// ABOUTME: Entries are immutable once analyzed and filtered client-side by display date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Structured reply the nutritionist prompt asks the model for
///
/// This is the ad-hoc schema of the food-analysis call site. Parsing is
/// defensive at the caller: a reply that does not match is logged and
/// discarded, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodAnalysis {
    /// Recognized dish name
    pub name: String,
    /// Estimated calories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kcal: Option<f64>,
    /// Estimated protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Estimated carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Estimated fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

/// One analyzed meal as stored in the per-user food log collection
///
/// Immutable once created; users delete entries individually instead of
/// editing them. Macro fields stay optional because the model occasionally
/// omits one; sums treat absent values as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    /// Document id assigned by the store (absent until persisted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Dish name
    pub name: String,
    /// Calories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kcal: Option<f64>,
    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    /// Display-locale date string used for the today filter
    pub date: String,
    /// Epoch milliseconds used for newest-first ordering
    pub timestamp: i64,
    /// Display time string (e.g. "18:45")
    pub time: String,
}

impl FoodLogEntry {
    /// Build a log entry from an analysis reply plus capture-time metadata
    #[must_use]
    pub fn from_analysis(
        analysis: FoodAnalysis,
        date: impl Into<String>,
        timestamp: i64,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: analysis.name,
            kcal: analysis.kcal,
            protein: analysis.protein,
            carbs: analysis.carbs,
            fat: analysis.fat,
            date: date.into(),
            timestamp,
            time: time.into(),
        }
    }
}
