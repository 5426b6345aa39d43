//! Point accumulation for chart series.
//!
//! Exact series keep every point.  Sum series fold a point into the previous
//! one when both share a timestamp.  Only adjacent points are folded: a
//! timestamp that reappears after a different one starts a new point.

use billing_core::models::{DataPoint, MatchMode};

// ── fold_sum ──────────────────────────────────────────────────────────────────

/// Append `point`, or add its value to the last point if the timestamps match.
pub fn fold_sum(points: &mut Vec<DataPoint>, point: DataPoint) {
    match points.last_mut() {
        Some(last) if last.timestamp_ms == point.timestamp_ms => last.value += point.value,
        _ => points.push(point),
    }
}

// ── SeriesAccumulator ─────────────────────────────────────────────────────────

/// Collects the points of one series as matching records arrive.
#[derive(Debug, Clone)]
pub struct SeriesAccumulator {
    mode: MatchMode,
    points: Vec<DataPoint>,
}

impl SeriesAccumulator {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, point: DataPoint) {
        match self.mode {
            MatchMode::Exact => self.points.push(point),
            MatchMode::Sum => fold_sum(&mut self.points, point),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<DataPoint> {
        self.points
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
