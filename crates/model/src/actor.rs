//! Actor - a persona or external system that performs tasks.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityKind, EntityMeta};

/// A persona or external system capable of performing tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Capability tags this actor offers
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Free-text limitations on what this actor may do
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl Actor {
    /// Create a new actor with a fresh id and timestamps
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::new(name, description),
            abilities: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Builder: set ability tags
    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set constraints
    pub fn with_constraints(
        mut self,
        constraints: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.constraints = constraints.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether this actor carries the given capability tag
    pub fn has_ability(&self, ability: &str) -> bool {
        self.abilities.iter().any(|a| a == ability)
    }
}

/// Partial update for an actor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub abilities: Option<Vec<String>>,
    pub constraints: Option<Vec<String>>,
}

impl Entity for Actor {
    const KIND: EntityKind = EntityKind::Actor;
    type Patch = ActorPatch;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn apply_patch(&mut self, patch: ActorPatch) {
        if let Some(name) = patch.name {
            self.meta.name = name;
        }
        if let Some(description) = patch.description {
            self.meta.description = description;
        }
        if let Some(abilities) = patch.abilities {
            self.abilities = abilities;
        }
        if let Some(constraints) = patch.constraints {
            self.constraints = constraints;
        }
    }
}
