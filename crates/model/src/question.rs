//! Question - an open point about the model itself.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityKind, EntityMeta};

/// An open question raised while the model was being built
///
/// Questions are bookkeeping only: nothing references them and they
/// reference nothing, so they never take part in gap computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// What this question is about
    pub asks_about: String,
}

impl Question {
    /// Create a new question with a fresh id and timestamps
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        asks_about: impl Into<String>,
    ) -> Self {
        Self {
            meta: EntityMeta::new(name, description),
            asks_about: asks_about.into(),
        }
    }
}

/// Partial update for a question
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub asks_about: Option<String>,
}

impl Entity for Question {
    const KIND: EntityKind = EntityKind::Question;
    type Patch = QuestionPatch;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn apply_patch(&mut self, patch: QuestionPatch) {
        if let Some(name) = patch.name {
            self.meta.name = name;
        }
        if let Some(description) = patch.description {
            self.meta.description = description;
        }
        if let Some(asks_about) = patch.asks_about {
            self.asks_about = asks_about;
        }
    }
}
