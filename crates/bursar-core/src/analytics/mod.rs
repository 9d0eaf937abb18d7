//! Spending analytics
//!
//! Pure, synchronous computations over already-fetched records. No function
//! here touches a store or retains state, so all of them are safe to call
//! from any number of parallel request handlers.
//!
//! - `aggregate` - groups transactions by category and day
//! - `trend` - orders day/amount pairs and supplies the fallback series
//! - `forecast` - predicts next-period spending from recent history
//! - `compare` - measures spending against the declared budget
//! - `insights` - composes the results into recommendation strings

pub mod aggregate;
pub mod compare;
pub mod forecast;
pub mod insights;
pub mod trend;

pub use aggregate::{aggregate, SpendingAggregate};
pub use compare::{compare, BudgetComparison};
pub use forecast::{forecast_recent_weighted, Forecast};
pub use insights::{generate_insights, InsightPath};
pub use trend::{build_trend, trend_or_fallback, TrendFallback};

/// Round to 2 decimal places (monetary display precision).
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
