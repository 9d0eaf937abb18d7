//! Domain models for Bursar

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single spending transaction, as stored by the persistence collaborator.
/// Immutable once stored; the core only reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: f64,
    /// Missing or blank categories aggregate under "Other"
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<TransactionDate>,
}

impl Transaction {
    /// Category label used for aggregation.
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Other",
        }
    }

    /// Day-of-month index used for trend building. A transaction without a
    /// date lands on day 1.
    pub fn day_of_month(&self) -> u32 {
        self.date.as_ref().map(TransactionDate::day_of_month).unwrap_or(1)
    }

    /// Display form of the date for the largest-transaction readout.
    pub fn date_label(&self) -> String {
        match &self.date {
            Some(date) => date.to_string(),
            None => "Unknown".to_string(),
        }
    }
}

/// Transaction dates arrive either as structured calendar dates or as raw
/// strings, depending on the collaborator that stored them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionDate {
    Calendar(NaiveDate),
    Text(String),
}

impl TransactionDate {
    /// Day-of-month index. String dates take the trailing numeric token of
    /// `YYYY-MM-DD`; anything unparseable falls back to day 1.
    pub fn day_of_month(&self) -> u32 {
        match self {
            Self::Calendar(date) => date.day(),
            Self::Text(raw) => raw
                .rsplit('-')
                .next()
                .and_then(|token| token.trim().parse::<u32>().ok())
                .filter(|day| (1..=31).contains(day))
                .unwrap_or(1),
        }
    }
}

impl std::fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calendar(date) => write!(f, "{}", date),
            Self::Text(raw) => write!(f, "{}", raw),
        }
    }
}

/// One day-of-month to amount pair on a spending trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: u32,
    pub amount: f64,
}

/// A user's declared budget. Replaced wholesale on save. Also doubles as
/// the budget-read response shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(alias = "totalBudget")]
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
    #[serde(rename = "spendingTrends", default)]
    pub spending_trends: Vec<TrendPoint>,
}

/// One category allocation inside a budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    pub allocated: f64,
    #[serde(default)]
    pub spent: f64,
}

/// A user-defined savings target, mutated only through the goal ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub target: f64,
    pub saved: f64,
    pub deadline: NaiveDate,
}

impl Goal {
    /// Progress toward the target, clamped to [0, 100].
    pub fn progress(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        ((self.saved / self.target) * 100.0).clamp(0.0, 100.0)
    }
}

/// Transport form of a goal: identifier as a string, progress precomputed.
#[derive(Debug, Clone, Serialize)]
pub struct GoalView {
    pub id: String,
    pub name: String,
    pub target: f64,
    pub saved: f64,
    pub deadline: NaiveDate,
    pub progress: f64,
}

impl From<&Goal> for GoalView {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id.to_string(),
            name: goal.name.clone(),
            target: goal.target,
            saved: goal.saved,
            deadline: goal.deadline,
            progress: goal.progress(),
        }
    }
}

/// Profile attributes feeding the trained spending model. Every field has a
/// neutral default so a missing profile still produces a prediction:
/// numerics default to 0, categoricals to the empty string (which one-hot
/// encodes to all zeros).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub age: f64,
    pub monthly_income: f64,
    pub financial_aid: f64,
    pub tuition: f64,
    pub gender: String,
    pub year_in_school: String,
    pub major: String,
    pub preferred_payment_method: String,
}

/// The largest single transaction seen in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargestTransaction {
    pub amount: f64,
    pub date: String,
}

/// One slice of the spending distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub name: String,
    pub value: f64,
}

/// Insights-report response shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingReport {
    pub highest_spending_category: String,
    pub lowest_spending_category: String,
    pub daily_average_spending: f64,
    pub largest_transaction: LargestTransaction,
    pub spending_trends: Vec<TrendPoint>,
    pub spending_distribution: Vec<DistributionSlice>,
    pub recommendations: Vec<String>,
}

/// Forecast response shape. Snake_case fields except the two chart feeds,
/// which keep their historical camelCase wire names.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub predicted_spending: f64,
    pub predicted_explanation: String,
    pub budget: f64,
    pub remaining_budget: f64,
    pub insights: Vec<String>,
    #[serde(rename = "spendingDistribution")]
    pub spending_distribution: Vec<DistributionSlice>,
    #[serde(rename = "spendingTrends")]
    pub spending_trends: Vec<TrendPoint>,
}

/// Model-prediction response shape.
#[derive(Debug, Clone, Serialize)]
pub struct ModelPrediction {
    pub predicted_spending: f64,
    pub budget: f64,
    pub feedback: Vec<String>,
}
