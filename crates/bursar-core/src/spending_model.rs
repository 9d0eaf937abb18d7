//! Trained spending model
//!
//! Loads the regression artifact exported by the external training pipeline
//! and reproduces its prediction contract: standardized numeric features and
//! one-hot encoded categorical features feeding an ensemble of regression
//! trees whose outputs are averaged.
//!
//! The artifact is loaded once at startup and treated as read-only from then
//! on, so a single instance can be shared across request handlers. A missing
//! or malformed artifact fails the load; there is no per-request degradation.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::analytics::round2;
use crate::error::{Error, Result};
use crate::models::UserProfile;

/// Numeric profile features, in artifact order: age, monthly_income,
/// financial_aid, tuition.
const NUMERIC_FEATURES: usize = 4;

/// Fitted standardization parameters for the numeric features.
#[derive(Debug, Clone, Deserialize)]
struct Scaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

/// Fitted one-hot vocabulary for one categorical feature. Values outside
/// the vocabulary encode to all zeros.
#[derive(Debug, Clone, Deserialize)]
struct CategoricalEncoding {
    name: String,
    values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk from the root to a leaf. Bounded by the node count so a
    /// malformed artifact cannot loop forever.
    fn predict(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { value }) => return *value,
                None => return 0.0,
            }
        }
        0.0
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ModelArtifact {
    scaler: Scaler,
    categorical: Vec<CategoricalEncoding>,
    trees: Vec<Tree>,
}

/// The loaded regression model. Immutable after load.
#[derive(Debug, Clone)]
pub struct SpendingModel {
    artifact: ModelArtifact,
}

impl SpendingModel {
    /// Load the artifact from disk. Any failure here is fatal for the
    /// model-backed forecast strategy.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::Model(format!(
                "cannot read model artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)
            .map_err(|e| Error::Model(format!("malformed model artifact: {}", e)))?;

        if artifact.scaler.means.len() != NUMERIC_FEATURES
            || artifact.scaler.stds.len() != NUMERIC_FEATURES
        {
            return Err(Error::Model(format!(
                "scaler expects {} numeric features, artifact has {}/{}",
                NUMERIC_FEATURES,
                artifact.scaler.means.len(),
                artifact.scaler.stds.len()
            )));
        }
        if artifact.trees.is_empty() {
            return Err(Error::Model("model artifact contains no trees".to_string()));
        }

        tracing::info!(
            trees = artifact.trees.len(),
            path = %path.display(),
            "spending model loaded"
        );
        Ok(Self { artifact })
    }

    /// Predict total spending for a profile, rounded to 2 decimals and
    /// clamped non-negative.
    pub fn predict(&self, profile: &UserProfile) -> f64 {
        let features = self.encode(profile);
        let sum: f64 = self
            .artifact
            .trees
            .iter()
            .map(|tree| tree.predict(&features))
            .sum();
        round2(sum / self.artifact.trees.len() as f64).max(0.0)
    }

    /// Feature vector: standardized numerics followed by the one-hot blocks
    /// in artifact order. A zero-variance numeric standardizes to 0.
    fn encode(&self, profile: &UserProfile) -> Vec<f64> {
        let numerics = [
            profile.age,
            profile.monthly_income,
            profile.financial_aid,
            profile.tuition,
        ];

        let mut features = Vec::with_capacity(NUMERIC_FEATURES);
        for ((value, mean), std) in numerics
            .iter()
            .zip(&self.artifact.scaler.means)
            .zip(&self.artifact.scaler.stds)
        {
            features.push(if *std > 0.0 { (value - mean) / std } else { 0.0 });
        }

        for encoding in &self.artifact.categorical {
            let value = categorical_value(profile, &encoding.name);
            for candidate in &encoding.values {
                features.push(if candidate == value { 1.0 } else { 0.0 });
            }
        }

        features
    }
}

fn categorical_value<'a>(profile: &'a UserProfile, name: &str) -> &'a str {
    match name {
        "gender" => &profile.gender,
        "year_in_school" => &profile.year_in_school,
        "major" => &profile.major,
        "preferred_payment_method" => &profile.preferred_payment_method,
        _ => "",
    }
}
