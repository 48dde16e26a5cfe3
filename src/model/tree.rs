use super::{FeatureSchema, FeatureVector, Model, check_row_width};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
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

/// Flat regression tree. Node 0 is the root; children always sit at a
/// higher index than their parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, width: usize) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } = *node
            {
                if feature >= width {
                    return Err(format!(
                        "node {} splits on feature {} but schema has {} features",
                        idx, feature, width
                    ));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {} has a non-finite threshold", idx));
                }
                for child in [left, right] {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(format!("node {} points to invalid child {}", idx, child));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walks from the root to a leaf. A tree that never went through
    /// `validate` yields an inference error instead of panicking or looping.
    fn evaluate(&self, row: &[f64]) -> Result<f64> {
        let mut idx = 0;
        loop {
            let node = self
                .nodes
                .get(idx)
                .ok_or_else(|| Error::inference(format!("tree has no node {}", idx)))?;
            match *node {
                TreeNode::Leaf { value } => return Ok(value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = row.get(feature).ok_or_else(|| {
                        Error::inference(format!(
                            "node {} splits on feature {} but row has {} features",
                            idx,
                            feature,
                            row.len()
                        ))
                    })?;
                    let next = if *x <= threshold { left } else { right };
                    // children must move forward, otherwise the walk never ends
                    if next <= idx {
                        return Err(Error::inference(format!(
                            "node {} points back to node {}",
                            idx, next
                        )));
                    }
                    idx = next;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest: average of tree outputs.
    #[default]
    Mean,
    /// Gradient boosting: sum of tree outputs.
    Sum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub schema: FeatureSchema,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub aggregation: Aggregation,
    pub trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::invalid_model("tree ensemble has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.schema.width())
                .map_err(|e| Error::invalid_model(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }
}

impl Model for TreeEnsemble {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>> {
        batch
            .iter()
            .map(|row| {
                check_row_width(row, self.schema.width())?;
                let x = row.to_f64();
                let total = self
                    .trees
                    .iter()
                    .map(|t| t.evaluate(&x))
                    .sum::<Result<f64>>()?;
                if self.trees.is_empty() {
                    return Err(Error::inference("tree ensemble has no trees"));
                }
                let combined = match self.aggregation {
                    Aggregation::Mean => total / self.trees.len() as f64,
                    Aggregation::Sum => total,
                };
                Ok(self.base_score + combined)
            })
            .collect()
    }
}
