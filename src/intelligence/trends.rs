// ABOUTME: Trend series preparation for the small history graphs
// ABOUTME: Windows the newest entries and scales values into display heights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;

use crate::constants::trends::WINDOW_DAYS;
use crate::models::DailyLog;

/// One plotted point of a trend graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    /// Calendar day of the measurement
    pub date: NaiveDate,
    /// Measured value, zero when the log has no reading for the metric
    pub value: f64,
}

/// A windowed metric series ready to plot
///
/// Points run oldest to newest across the window. The floor and ceiling pad
/// the observed range by one unit on each side so a flat series still draws
/// mid-chart instead of hugging an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    /// Points in chronological order, at most one window's worth
    pub points: Vec<TrendPoint>,
    /// Bottom of the display scale
    pub floor: f64,
    /// Top of the display scale
    pub ceiling: f64,
}

impl TrendSeries {
    /// Whether there is anything to plot
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scale a value into a `[0, 1]` display height
    #[must_use]
    pub fn normalized(&self, value: f64) -> f64 {
        let range = self.ceiling - self.floor;
        if range > 0.0 {
            (value - self.floor) / range
        } else {
            0.0
        }
    }
}

/// Build a plottable series for one metric from log history
///
/// `history` is expected newest-first, the order the journal returns it in;
/// the window keeps the most recent entries and flips them chronological.
#[must_use]
pub fn trend_series<F>(history: &[DailyLog], select: F) -> TrendSeries
where
    F: Fn(&DailyLog) -> Option<f64>,
{
    let points: Vec<TrendPoint> = history
        .iter()
        .take(WINDOW_DAYS)
        .rev()
        .map(|log| TrendPoint {
            date: log.date,
            value: select(log).unwrap_or(0.0),
        })
        .collect();

    if points.is_empty() {
        return TrendSeries {
            points,
            floor: 0.0,
            ceiling: 0.0,
        };
    }

    let mut lowest = f64::INFINITY;
    let mut highest = f64::NEG_INFINITY;
    for point in &points {
        lowest = lowest.min(point.value);
        highest = highest.max(point.value);
    }

    TrendSeries {
        points,
        floor: lowest - 1.0,
        ceiling: highest + 1.0,
    }
}
