//! Boundary service
//!
//! Composes the pure analytics functions into the response shapes the
//! outer HTTP layer returns. One instance is constructed at startup with
//! the injected stores and the optional model handle; every method is a
//! synchronous computation over a single round of store reads.
//!
//! Only validation and not-found errors cross this boundary. Numeric
//! degeneracies (empty batches, zero budgets) resolve to defaults inside
//! the analytics functions.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::analytics::{
    aggregate, compare, forecast_recent_weighted, generate_insights, round2, trend_or_fallback,
    InsightPath, TrendFallback,
};
use crate::config::CoreConfig;
use crate::error::{Error, Result};
use crate::models::{
    BudgetConfig, DistributionSlice, ForecastReport, ModelPrediction, SpendingReport,
};
use crate::spending_model::SpendingModel;
use crate::store::{BudgetStore, ProfileStore, TransactionStore};

pub struct AnalyticsService {
    transactions: Arc<dyn TransactionStore>,
    budgets: Arc<dyn BudgetStore>,
    profiles: Arc<dyn ProfileStore>,
    model: Option<SpendingModel>,
    config: CoreConfig,
}

impl AnalyticsService {
    pub fn new(
        transactions: Arc<dyn TransactionStore>,
        budgets: Arc<dyn BudgetStore>,
        profiles: Arc<dyn ProfileStore>,
        config: CoreConfig,
    ) -> Self {
        Self {
            transactions,
            budgets,
            profiles,
            model: None,
            config,
        }
    }

    /// Attach the trained spending model. Load failures should abort
    /// startup at the embedder; there is no per-request fallback.
    pub fn with_model(mut self, model: SpendingModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Budget-read shape. Missing trend data falls back to the snapshot
    /// series.
    pub fn budget_snapshot(&self, user_id: &str) -> Result<BudgetConfig> {
        let user = parse_user_id(user_id)?;
        let mut budget = self
            .budgets
            .budget_for_user(user)?
            .ok_or_else(|| Error::NotFound(format!("no budget data for user {}", user)))?;
        budget.spending_trends =
            trend_or_fallback(budget.spending_trends, TrendFallback::Snapshot);
        Ok(budget)
    }

    /// Replace the user's budget wholesale.
    pub fn save_budget(&self, user_id: &str, budget: BudgetConfig) -> Result<()> {
        let user = parse_user_id(user_id)?;
        if !budget.budget.is_finite() || budget.budget < 0.0 {
            return Err(Error::Validation(
                "total budget must be a non-negative amount".to_string(),
            ));
        }
        if budget
            .categories
            .iter()
            .any(|category| category.allocated < 0.0 || category.spent < 0.0)
        {
            return Err(Error::Validation(
                "category amounts must be non-negative".to_string(),
            ));
        }

        self.budgets.save_budget(user, budget)?;
        tracing::info!(user_id = user, "budget saved");
        Ok(())
    }

    /// Insights-report shape. A user with no transactions is a not-found
    /// at this entry point.
    pub fn spending_report(&self, user_id: &str) -> Result<SpendingReport> {
        let user = parse_user_id(user_id)?;
        let transactions = self.transactions.transactions_for_user(user)?;
        if transactions.is_empty() {
            return Err(Error::NotFound(format!(
                "no transactions for user {}",
                user
            )));
        }

        let budget = self.budgets.budget_for_user(user)?.unwrap_or_default();
        let spending = aggregate(&transactions);
        let comparison = compare(
            &spending.category_totals,
            budget.budget,
            spending.total_spent,
            spending.total_spent,
            &self.config.currency,
        );
        let recommendations = generate_insights(
            &budget.categories,
            &comparison,
            InsightPath::Report,
            &self.config.currency,
        );

        tracing::info!(
            user_id = user,
            recommendations = recommendations.len(),
            "spending report generated"
        );

        Ok(SpendingReport {
            highest_spending_category: comparison.highest_category,
            lowest_spending_category: comparison.lowest_category,
            daily_average_spending: spending.daily_average_spending,
            largest_transaction: spending.largest_transaction,
            spending_trends: trend_or_fallback(spending.day_amounts, TrendFallback::Report),
            spending_distribution: distribution(&spending.category_totals),
            recommendations,
        })
    }

    /// Forecast shape. An empty history is not an error here: the forecast
    /// is 0 and the whole budget remains.
    pub fn forecast(&self, user_id: &str) -> Result<ForecastReport> {
        let user = parse_user_id(user_id)?;
        let transactions = self.transactions.transactions_for_user(user)?;
        let budget = self.budgets.budget_for_user(user)?.unwrap_or_default();

        let spending = aggregate(&transactions);
        let amounts: Vec<f64> = transactions
            .iter()
            .map(|tx| tx.amount)
            .filter(|amount| *amount >= 0.0)
            .collect();
        let forecast = forecast_recent_weighted(&amounts);
        let comparison = compare(
            &spending.category_totals,
            budget.budget,
            forecast.amount,
            spending.total_spent,
            &self.config.currency,
        );
        let insights = generate_insights(
            &budget.categories,
            &comparison,
            InsightPath::Forecast,
            &self.config.currency,
        );

        tracing::info!(
            user_id = user,
            predicted = forecast.amount,
            "forecast generated"
        );

        Ok(ForecastReport {
            predicted_spending: forecast.amount,
            predicted_explanation: forecast.explanation,
            budget: budget.budget,
            remaining_budget: comparison.remaining_budget,
            insights,
            spending_distribution: distribution(&spending.category_totals),
            spending_trends: trend_or_fallback(spending.day_amounts, TrendFallback::Report),
        })
    }

    /// Model-prediction shape. Requires the trained model handle; a missing
    /// profile predicts from neutral defaults.
    pub fn predict_spending(&self, user_id: &str) -> Result<ModelPrediction> {
        let user = parse_user_id(user_id)?;
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| Error::Model("no spending model loaded".to_string()))?;

        let profile = self.profiles.profile_for_user(user)?.unwrap_or_default();
        let budget = self.budgets.budget_for_user(user)?.unwrap_or_default();

        let predicted = model.predict(&profile);
        let feedback = prediction_feedback(predicted, budget.budget, &self.config.currency);

        tracing::info!(user_id = user, predicted, "model prediction generated");

        Ok(ModelPrediction {
            predicted_spending: predicted,
            budget: budget.budget,
            feedback,
        })
    }
}

/// Parse a transport user id. Missing and malformed ids are both
/// validation failures; existence is checked per entry point.
fn parse_user_id(user_id: &str) -> Result<i64> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("user id is required".to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| Error::Validation(format!("invalid user id: {}", user_id)))
}

fn distribution(category_totals: &BTreeMap<String, f64>) -> Vec<DistributionSlice> {
    category_totals
        .iter()
        .map(|(name, value)| DistributionSlice {
            name: name.clone(),
            value: round2(*value),
        })
        .collect()
}

/// Feedback strings for the model-prediction path.
fn prediction_feedback(predicted: f64, budget: f64, currency: &str) -> Vec<String> {
    if budget <= 0.0 {
        return vec![
            "No budget set. Set a budget to compare it against the prediction.".to_string(),
        ];
    }

    if predicted > budget {
        vec![format!(
            "Predicted spending exceeds your budget by {}{:.2}. Consider adjusting your plans.",
            currency,
            predicted - budget
        )]
    } else if predicted > budget * 0.9 {
        vec![format!(
            "Predicted spending is within {}{:.2} of your budget. Watch discretionary purchases.",
            currency,
            budget - predicted
        )]
    } else {
        vec![format!(
            "Predicted spending leaves {}{:.2} of your budget unspent.",
            currency,
            budget - predicted
        )]
    }
}
