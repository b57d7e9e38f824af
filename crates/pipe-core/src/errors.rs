//! Errores del core (motor de pasos local).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreError {
    #[error("dependency cycle detected at step '{step}'")]
    DependencyCycle { step: String },
    #[error("artifact missing for completed step '{step}'")]
    MissingArtifact { step: String },
    #[error("step work failed: {0}")]
    WorkFailed(String),
    #[error("invalid input for step '{step}': {reason}")]
    InvalidInput { step: String, reason: String },
    #[error("internal: {0}")]
    Internal(String),
}
