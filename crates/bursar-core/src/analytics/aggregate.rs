//! Transaction aggregation
//!
//! One pass over a transaction batch yields everything the downstream
//! computations need: category totals, the largest single transaction, the
//! overall total and daily average, and the raw day/amount pairs the trend
//! builder orders.

use std::collections::BTreeMap;

use crate::models::{LargestTransaction, Transaction, TrendPoint};

use super::round2;

/// Sentinel date for the largest transaction of an empty batch.
pub const NO_TRANSACTIONS_DATE: &str = "No Transactions Yet";

/// Derived figures for one transaction batch.
#[derive(Debug, Clone)]
pub struct SpendingAggregate {
    /// Category name to accumulated amount. A BTreeMap keeps iteration
    /// (and therefore downstream tie-breaking) alphabetical.
    pub category_totals: BTreeMap<String, f64>,
    /// Maximum by amount, first-seen wins ties.
    pub largest_transaction: LargestTransaction,
    pub total_spent: f64,
    pub daily_average_spending: f64,
    /// Per-transaction (day, amount) pairs in scan order, for the trend
    /// builder.
    pub day_amounts: Vec<TrendPoint>,
}

/// Group a transaction batch by category and day of month.
///
/// Negative amounts (refunds) are excluded from every figure. An empty
/// batch is not an error at this layer; the calling boundary decides
/// whether to surface it.
pub fn aggregate(transactions: &[Transaction]) -> SpendingAggregate {
    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut largest: Option<LargestTransaction> = None;
    let mut total_spent = 0.0;
    let mut counted: usize = 0;
    let mut day_amounts = Vec::new();

    for tx in transactions {
        if tx.amount < 0.0 {
            tracing::warn!(amount = tx.amount, "skipping negative-amount transaction");
            continue;
        }

        *category_totals
            .entry(tx.category_label().to_string())
            .or_insert(0.0) += tx.amount;
        total_spent += tx.amount;
        counted += 1;
        day_amounts.push(TrendPoint {
            day: tx.day_of_month(),
            amount: tx.amount,
        });

        if largest.as_ref().map_or(true, |max| tx.amount > max.amount) {
            largest = Some(LargestTransaction {
                amount: tx.amount,
                date: tx.date_label(),
            });
        }
    }

    tracing::debug!(
        transactions = counted,
        categories = category_totals.len(),
        total_spent,
        "aggregated transaction batch"
    );

    SpendingAggregate {
        category_totals,
        largest_transaction: largest.unwrap_or_else(|| LargestTransaction {
            amount: 0.0,
            date: NO_TRANSACTIONS_DATE.to_string(),
        }),
        total_spent,
        daily_average_spending: round2(total_spent / counted.max(1) as f64),
        day_amounts,
    }
}
