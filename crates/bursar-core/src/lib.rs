//! Bursar Core Library
//!
//! Shared analytics for the Bursar student-finance tool:
//! - Transaction aggregation: category totals, trends, largest transaction
//! - Next-period spending forecasts: recent-history heuristic or trained model
//! - Budget comparison and recommendation generation
//! - Savings goal ledger with atomic contributions
//! - Injected persistence boundary (store traits + in-memory implementation)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bursar_core::{AnalyticsService, CoreConfig, MemoryStore, SpendingModel};
//!
//! let store = Arc::new(MemoryStore::new());
//! let config = CoreConfig::load()?;
//! let mut service = AnalyticsService::new(store.clone(), store.clone(), store, config.clone());
//! if let Some(path) = &config.model_path {
//!     service = service.with_model(SpendingModel::load(path)?);
//! }
//! let report = service.spending_report("42")?;
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod goals;
pub mod models;
pub mod service;
pub mod spending_model;
pub mod store;

pub use analytics::{
    aggregate, build_trend, compare, forecast_recent_weighted, generate_insights,
    trend_or_fallback, BudgetComparison, Forecast, InsightPath, SpendingAggregate, TrendFallback,
};
pub use config::CoreConfig;
pub use error::{Error, Result};
pub use goals::GoalLedger;
pub use models::{
    BudgetCategory, BudgetConfig, DistributionSlice, ForecastReport, Goal, GoalView,
    LargestTransaction, ModelPrediction, SpendingReport, Transaction, TransactionDate, TrendPoint,
    UserProfile,
};
pub use service::AnalyticsService;
pub use spending_model::SpendingModel;
pub use store::{
    BudgetStore, GoalStore, MemoryStore, NewGoal, ProfileStore, TransactionStore,
};
