//! Persistence boundary
//!
//! The core never talks to a database directly. Embedders inject these
//! store traits, constructed once at startup; the analytics functions stay
//! pure over whatever the stores return.
//!
//! - `TransactionStore` - read-only transaction history
//! - `BudgetStore` - budget read and wholesale replace
//! - `ProfileStore` - read-only user profiles for the model path
//! - `GoalStore` - savings goals, with the contribution increment kept
//!   atomic at this boundary

mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{BudgetConfig, Goal, Transaction, UserProfile};

pub trait TransactionStore: Send + Sync {
    /// All transactions for a user, in stored order.
    fn transactions_for_user(&self, user_id: i64) -> Result<Vec<Transaction>>;
}

pub trait BudgetStore: Send + Sync {
    fn budget_for_user(&self, user_id: i64) -> Result<Option<BudgetConfig>>;

    /// Replace the user's budget wholesale.
    fn save_budget(&self, user_id: i64, budget: BudgetConfig) -> Result<()>;
}

pub trait ProfileStore: Send + Sync {
    fn profile_for_user(&self, user_id: i64) -> Result<Option<UserProfile>>;
}

/// Parameters for creating a goal. Saved balances always start at zero.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub user_id: i64,
    pub name: String,
    pub target: f64,
    pub deadline: NaiveDate,
}

pub trait GoalStore: Send + Sync {
    fn insert_goal(&self, goal: NewGoal) -> Result<Goal>;

    fn goal(&self, goal_id: i64) -> Result<Option<Goal>>;

    /// Atomically add `amount` to the goal's saved balance.
    ///
    /// Lookup, target-cap check, and increment happen under one critical
    /// section so concurrent contributions cannot lose updates.
    fn add_to_saved(&self, goal_id: i64, amount: f64) -> Result<Goal>;

    /// Delete a goal. Returns whether it existed.
    fn delete_goal(&self, goal_id: i64) -> Result<bool>;

    fn goals_for_user(&self, user_id: i64) -> Result<Vec<Goal>>;
}
