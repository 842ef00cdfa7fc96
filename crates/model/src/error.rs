//! Error types for the screenplay model core.

use thiserror::Error;

use crate::entity::{EntityId, EntityKind};

/// A record failed one of its kind's validation rules
#[derive(Debug, Clone, PartialEq, Error)]
#[error("validation failed for {kind} field '{field}': {reason}")]
pub struct ValidationError {
    pub kind: EntityKind,
    pub field: &'static str,
    pub reason: String,
}

/// General error type for the model core
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("failed to initialize {kind} collection: {detail}")]
    Initialization { kind: EntityKind, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// NotFound for the given kind and id
    pub fn not_found(kind: EntityKind, id: EntityId) -> Self {
        ModelError::NotFound { kind, id }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
