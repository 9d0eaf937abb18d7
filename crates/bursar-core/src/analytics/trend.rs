//! Spending trend construction

use crate::models::TrendPoint;

/// Placeholder series used when a user has no trend data. The two
/// entry-point families historically shipped different shapes, and both are
/// load-bearing for their charts, so the caller picks one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendFallback {
    /// Insights-report and forecast responses: `(i, 50 + i*10)` for days 1-5.
    Report,
    /// Budget read/save responses: a fixed five-point literal.
    Snapshot,
}

impl TrendFallback {
    pub fn series(&self) -> Vec<TrendPoint> {
        match self {
            TrendFallback::Report => (1..=5)
                .map(|day| TrendPoint {
                    day,
                    amount: f64::from(50 + day * 10),
                })
                .collect(),
            TrendFallback::Snapshot => vec![
                TrendPoint { day: 1, amount: 50.0 },
                TrendPoint { day: 2, amount: 75.0 },
                TrendPoint { day: 3, amount: 30.0 },
                TrendPoint { day: 4, amount: 90.0 },
                TrendPoint { day: 5, amount: 60.0 },
            ],
        }
    }
}

/// Order day/amount pairs ascending by day. The sort is stable, so
/// same-day points keep their input order.
pub fn build_trend(mut points: Vec<TrendPoint>) -> Vec<TrendPoint> {
    points.sort_by_key(|point| point.day);
    points
}

/// Like [`build_trend`], substituting the given placeholder series when the
/// input is empty.
pub fn trend_or_fallback(points: Vec<TrendPoint>, fallback: TrendFallback) -> Vec<TrendPoint> {
    if points.is_empty() {
        tracing::debug!(fallback = ?fallback, "no trend data, using placeholder series");
        return fallback.series();
    }
    build_trend(points)
}
