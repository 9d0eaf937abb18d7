//! Savings goal ledger
//!
//! Validation and transport mapping around the injected goal store. All
//! state lives behind the store; the increment itself is atomic at that
//! boundary, so the ledger stays safe under concurrent contributions.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{Goal, GoalView};
use crate::store::{GoalStore, NewGoal};

pub struct GoalLedger {
    store: Arc<dyn GoalStore>,
}

impl GoalLedger {
    pub fn new(store: Arc<dyn GoalStore>) -> Self {
        Self { store }
    }

    /// Create a goal with nothing saved yet.
    pub fn create(
        &self,
        user_id: i64,
        name: &str,
        target: f64,
        deadline: NaiveDate,
    ) -> Result<Goal> {
        if name.trim().is_empty() {
            return Err(Error::Validation("goal name is required".to_string()));
        }
        if !(target > 0.0) {
            return Err(Error::Validation(
                "goal target must be a positive amount".to_string(),
            ));
        }

        let goal = self.store.insert_goal(NewGoal {
            user_id,
            name: name.trim().to_string(),
            target,
            deadline,
        })?;
        tracing::info!(goal_id = goal.id, user_id, "goal created");
        Ok(goal)
    }

    /// Apply a contribution to a goal's saved balance.
    pub fn contribute(&self, goal_id: i64, amount: f64) -> Result<Goal> {
        if !(amount > 0.0) {
            return Err(Error::Validation(
                "contribution amount must be positive".to_string(),
            ));
        }

        let goal = self.store.add_to_saved(goal_id, amount)?;
        tracing::debug!(goal_id, amount, saved = goal.saved, "contribution applied");
        Ok(goal)
    }

    pub fn delete(&self, goal_id: i64) -> Result<()> {
        if self.store.delete_goal(goal_id)? {
            tracing::info!(goal_id, "goal deleted");
            Ok(())
        } else {
            Err(Error::NotFound(format!("no goal with id {}", goal_id)))
        }
    }

    /// All of a user's goals in transport form.
    pub fn list(&self, user_id: i64) -> Result<Vec<GoalView>> {
        Ok(self
            .store
            .goals_for_user(user_id)?
            .iter()
            .map(GoalView::from)
            .collect())
    }
}
