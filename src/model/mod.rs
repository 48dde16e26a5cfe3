mod linear;
mod schema;
mod tree;

pub use linear::LinearModel;
pub use schema::*;
pub use tree::{Aggregation, RegressionTree, TreeEnsemble, TreeNode};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};
use tracing::{debug, info};

/// A trained regression model. Implementations are immutable once loaded and
/// are invoked concurrently through `&self`.
pub trait Model: Send + Sync {
    /// Input layout the model was trained on.
    fn schema(&self) -> &FeatureSchema;

    /// Predicts one scalar per row of `batch`.
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>>;
}

pub(crate) fn check_row_width(row: &FeatureVector, expected: usize) -> Result<()> {
    if row.len() != expected {
        return Err(Error::inference(format!(
            "row has {} features, model expects {}",
            row.len(),
            expected
        )));
    }
    Ok(())
}

/// On-disk model file, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        Ok(artifact)
    }

    pub fn into_model(self) -> Result<Arc<dyn Model>> {
        match self {
            Self::Linear(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
            Self::TreeEnsemble(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::TreeEnsemble(_) => "tree_ensemble",
        }
    }
}

/// Reads and validates a model artifact. Called once at startup.
pub async fn load_model(path: impl AsRef<Path>) -> Result<Arc<dyn Model>> {
    let path = path.as_ref();
    debug!("Loading model artifact from: {}", path.display());

    let json = tokio::fs::read_to_string(path).await?;
    let artifact = ModelArtifact::from_json(&json)?;
    let kind = artifact.kind();
    let model = artifact.into_model()?;

    info!(
        "Loaded {} model from {} with schema {}",
        kind,
        path.display(),
        model.schema()
    );
    Ok(model)
}
