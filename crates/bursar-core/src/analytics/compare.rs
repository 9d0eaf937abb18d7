//! Budget comparison
//!
//! Remaining budget, per-category even-share overspend warnings, and the
//! highest/lowest spending categories.

use std::collections::BTreeMap;

use super::round2;

/// Sentinel category when a batch has no spending at all.
pub const NO_DATA: &str = "No Data";

#[derive(Debug, Clone)]
pub struct BudgetComparison {
    /// `round2(budget - spentOrPredicted)`, clamped to 0 when negative or
    /// non-finite. Never negative, never NaN.
    pub remaining_budget: f64,
    /// One warning per category exceeding its even share of the total
    /// budget, in category order.
    pub overspend_warnings: Vec<String>,
    pub highest_category: String,
    pub lowest_category: String,
    /// The highest category's share of total spend, clamped to [0, 100].
    pub highest_share_pct: f64,
}

/// Compare accumulated category spending against the declared total budget.
///
/// `spent_or_predicted` is whichever figure the caller budgets against:
/// actual spend on the report path, the forecast on the prediction path.
/// Ties on highest/lowest resolve to the alphabetically-first category
/// (the map iterates in key order).
pub fn compare(
    category_totals: &BTreeMap<String, f64>,
    total_budget: f64,
    spent_or_predicted: f64,
    total_spent: f64,
    currency: &str,
) -> BudgetComparison {
    let mut remaining_budget = round2(total_budget - spent_or_predicted);
    if !remaining_budget.is_finite() || remaining_budget < 0.0 {
        remaining_budget = 0.0;
    }

    let mut overspend_warnings = Vec::new();
    if !category_totals.is_empty() {
        let even_share = total_budget / category_totals.len() as f64;
        for (name, amount) in category_totals {
            if *amount > even_share {
                overspend_warnings.push(format!(
                    "Spending on {} is {}{:.2} over its even share of the budget.",
                    name,
                    currency,
                    amount - even_share
                ));
            }
        }
    }

    let mut highest: Option<(&str, f64)> = None;
    let mut lowest: Option<(&str, f64)> = None;
    for (name, amount) in category_totals {
        if highest.map_or(true, |(_, max)| *amount > max) {
            highest = Some((name, *amount));
        }
        if lowest.map_or(true, |(_, min)| *amount < min) {
            lowest = Some((name, *amount));
        }
    }

    let highest_amount = highest.map(|(_, amount)| amount).unwrap_or(0.0);
    let mut highest_share_pct = (highest_amount / total_spent.max(1.0)) * 100.0;
    if !highest_share_pct.is_finite() {
        highest_share_pct = 0.0;
    }

    BudgetComparison {
        remaining_budget,
        overspend_warnings,
        highest_category: highest
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| NO_DATA.to_string()),
        lowest_category: lowest
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| NO_DATA.to_string()),
        highest_share_pct: highest_share_pct.clamp(0.0, 100.0),
    }
}
