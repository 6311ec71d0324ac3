//! Pre-trained regression model: a random-forest regressor stored as
//! flattened decision trees.
//!
//! The artifact carries each tree as a node array; split nodes reference
//! child nodes by index. Prediction walks each tree to a leaf and averages
//! the leaf values across the forest. The model exposes exactly what the
//! pipeline depends on: `predict` and its expected input width.

use chrono::{DateTime, Utc};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// A node in a flattened regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
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

/// One regression tree. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk from the root to a leaf. Assumes the tree passed
    /// [`Tree::check`] at load, so traversal terminates.
    fn predict(&self, row: ArrayView1<f64>) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Structural check: child indices strictly descend the node array
    /// (no cycles) and feature indices fit the declared input width.
    fn check(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= n_features {
                    return Err(format!(
                        "node {idx} splits on feature {feature}, model width is {n_features}"
                    ));
                }
                if *left <= idx || *right <= idx || *left >= self.nodes.len() || *right >= self.nodes.len()
                {
                    return Err(format!("node {idx} has invalid child indices"));
                }
            }
        }
        Ok(())
    }
}

/// Training-run metrics carried with the model artifact, shown on the
/// model info endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub r2_score: f64,
    pub mse: f64,
    pub trained_at: DateTime<Utc>,
}

/// Fitted random-forest regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionForest {
    n_features: usize,
    trees: Vec<Tree>,
    metadata: ModelMetadata,
}

impl RegressionForest {
    pub fn new(n_features: usize, trees: Vec<Tree>, metadata: ModelMetadata) -> Self {
        Self {
            n_features,
            trees,
            metadata,
        }
    }

    /// Input width the forest was fit on.
    pub fn n_features_in(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Predict the regression target for one scaled feature row.
    ///
    /// The caller guards the row width against [`Self::n_features_in`]
    /// before invoking.
    pub fn predict(&self, row: ArrayView1<f64>) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        sum / self.trees.len() as f64
    }

    /// Validate forest structure once at artifact load.
    pub fn check(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check(self.n_features)
                .map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }
}
