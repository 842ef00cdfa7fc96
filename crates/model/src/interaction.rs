//! Interaction - a low-level exchange between an actor and the system.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityKind, EntityMeta};

/// A single low-level exchange with the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// What must hold before this interaction can happen
    #[serde(default)]
    pub preconditions: Vec<String>,
    /// What holds after this interaction completes
    #[serde(default)]
    pub effects: Vec<String>,
}

impl Interaction {
    /// Create a new interaction with a fresh id and timestamps
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::new(name, description),
            preconditions: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Builder: set preconditions
    pub fn with_preconditions(
        mut self,
        preconditions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.preconditions = preconditions.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set effects
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.effects = effects.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update for an interaction
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub preconditions: Option<Vec<String>>,
    pub effects: Option<Vec<String>>,
}

impl Entity for Interaction {
    const KIND: EntityKind = EntityKind::Interaction;
    type Patch = InteractionPatch;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn apply_patch(&mut self, patch: InteractionPatch) {
        if let Some(name) = patch.name {
            self.meta.name = name;
        }
        if let Some(description) = patch.description {
            self.meta.description = description;
        }
        if let Some(preconditions) = patch.preconditions {
            self.preconditions = preconditions;
        }
        if let Some(effects) = patch.effects {
            self.effects = effects;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_creation() {
        let interaction = Interaction::new("Submit payment form", "POST /payments")
            .with_preconditions(["Basket is not empty"])
            .with_effects(["Order created"]);

        assert_eq!(interaction.preconditions.len(), 1);
        assert_eq!(interaction.effects, vec!["Order created"]);
        assert!(interaction.validate().is_ok());
    }
}
