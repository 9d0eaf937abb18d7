//! Next-period spending forecast
//!
//! The weighted recent-history heuristic over amounts in stored order. The
//! trained-model strategy lives in [`crate::spending_model`]; both produce a
//! non-negative prediction rounded to 2 decimals.

use super::round2;

/// Weights for the last three amounts, most recent first.
const RECENT_WEIGHTS: [f64; 3] = [0.6, 0.3, 0.1];

/// A predicted next-period spend with its one-line explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub amount: f64,
    pub explanation: String,
}

/// Predict next-period spending from past transaction amounts in stored
/// order (not date-sorted).
///
/// With at least 3 amounts the last three are combined at 0.6/0.3/0.1,
/// most recent weighted heaviest. With fewer, the arithmetic mean. With
/// none, zero.
pub fn forecast_recent_weighted(amounts: &[f64]) -> Forecast {
    if amounts.is_empty() {
        return Forecast {
            amount: 0.0,
            explanation: "No spending history available to forecast from.".to_string(),
        };
    }

    if amounts.len() < 3 {
        let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
        return Forecast {
            amount: round2(mean).max(0.0),
            explanation: format!(
                "Based on the average of your last {} transaction(s).",
                amounts.len()
            ),
        };
    }

    let recent = &amounts[amounts.len() - 3..];
    let weighted = recent[2] * RECENT_WEIGHTS[0]
        + recent[1] * RECENT_WEIGHTS[1]
        + recent[0] * RECENT_WEIGHTS[2];

    Forecast {
        amount: round2(weighted).max(0.0),
        explanation: "Based on your last 3 transactions, weighted toward the most recent."
            .to_string(),
    }
}
