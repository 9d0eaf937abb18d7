//! In-process store
//!
//! Thread-safe implementation of all four store traits, used by tests and
//! single-process embedders. Each collection sits behind its own `RwLock`;
//! goal contributions take the goals write lock for the whole
//! read-check-increment sequence.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::{BudgetConfig, Goal, Transaction, UserProfile};

use super::{BudgetStore, GoalStore, NewGoal, ProfileStore, TransactionStore};

#[derive(Debug)]
pub struct MemoryStore {
    transactions: RwLock<HashMap<i64, Vec<Transaction>>>,
    budgets: RwLock<HashMap<i64, BudgetConfig>>,
    profiles: RwLock<HashMap<i64, UserProfile>>,
    goals: RwLock<HashMap<i64, Goal>>,
    next_goal_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            transactions: RwLock::new(HashMap::new()),
            budgets: RwLock::new(HashMap::new()),
            profiles: RwLock::new(HashMap::new()),
            goals: RwLock::new(HashMap::new()),
            next_goal_id: AtomicI64::new(1),
        }
    }
}

fn poisoned() -> Error {
    Error::Storage("store lock poisoned".to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user's transaction history.
    pub fn put_transactions(&self, user_id: i64, transactions: Vec<Transaction>) -> Result<()> {
        self.transactions
            .write()
            .map_err(|_| poisoned())?
            .insert(user_id, transactions);
        Ok(())
    }

    /// Seed a user's profile.
    pub fn put_profile(&self, user_id: i64, profile: UserProfile) -> Result<()> {
        self.profiles
            .write()
            .map_err(|_| poisoned())?
            .insert(user_id, profile);
        Ok(())
    }
}

impl TransactionStore for MemoryStore {
    fn transactions_for_user(&self, user_id: i64) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .read()
            .map_err(|_| poisoned())?
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

impl BudgetStore for MemoryStore {
    fn budget_for_user(&self, user_id: i64) -> Result<Option<BudgetConfig>> {
        Ok(self
            .budgets
            .read()
            .map_err(|_| poisoned())?
            .get(&user_id)
            .cloned())
    }

    fn save_budget(&self, user_id: i64, budget: BudgetConfig) -> Result<()> {
        self.budgets
            .write()
            .map_err(|_| poisoned())?
            .insert(user_id, budget);
        Ok(())
    }
}

impl ProfileStore for MemoryStore {
    fn profile_for_user(&self, user_id: i64) -> Result<Option<UserProfile>> {
        Ok(self
            .profiles
            .read()
            .map_err(|_| poisoned())?
            .get(&user_id)
            .cloned())
    }
}

impl GoalStore for MemoryStore {
    fn insert_goal(&self, goal: NewGoal) -> Result<Goal> {
        let id = self.next_goal_id.fetch_add(1, Ordering::SeqCst);
        let goal = Goal {
            id,
            user_id: goal.user_id,
            name: goal.name,
            target: goal.target,
            saved: 0.0,
            deadline: goal.deadline,
        };
        self.goals
            .write()
            .map_err(|_| poisoned())?
            .insert(id, goal.clone());
        Ok(goal)
    }

    fn goal(&self, goal_id: i64) -> Result<Option<Goal>> {
        Ok(self
            .goals
            .read()
            .map_err(|_| poisoned())?
            .get(&goal_id)
            .cloned())
    }

    fn add_to_saved(&self, goal_id: i64, amount: f64) -> Result<Goal> {
        let mut goals = self.goals.write().map_err(|_| poisoned())?;
        let goal = goals
            .get_mut(&goal_id)
            .ok_or_else(|| Error::NotFound(format!("no goal with id {}", goal_id)))?;

        if goal.saved + amount > goal.target {
            return Err(Error::Validation(format!(
                "contribution exceeds the goal target ({} saved of {})",
                goal.saved, goal.target
            )));
        }

        goal.saved += amount;
        Ok(goal.clone())
    }

    fn delete_goal(&self, goal_id: i64) -> Result<bool> {
        Ok(self
            .goals
            .write()
            .map_err(|_| poisoned())?
            .remove(&goal_id)
            .is_some())
    }

    fn goals_for_user(&self, user_id: i64) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .goals
            .read()
            .map_err(|_| poisoned())?
            .values()
            .filter(|goal| goal.user_id == user_id)
            .cloned()
            .collect();
        goals.sort_by_key(|goal| goal.id);
        Ok(goals)
    }
}
