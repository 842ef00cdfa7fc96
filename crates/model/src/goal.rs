//! Goal - an outcome an actor wants to reach.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, EntityMeta};

/// Priority of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An outcome one or more actors want to reach
///
/// `assigned_to` holds actor ids and is not checked against the actor
/// collection at write time; a dangling assignment surfaces as a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// What "done" looks like for this goal
    #[serde(default)]
    pub success_criteria: Vec<String>,
    pub priority: Priority,
    /// Ids of actors pursuing this goal, possibly dangling
    #[serde(default)]
    pub assigned_to: Vec<EntityId>,
}

impl Goal {
    /// Create a new goal with a fresh id and timestamps
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            meta: EntityMeta::new(name, description),
            success_criteria: Vec::new(),
            priority,
            assigned_to: Vec::new(),
        }
    }

    /// Builder: set success criteria
    pub fn with_success_criteria(
        mut self,
        criteria: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.success_criteria = criteria.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set assigned actor ids
    pub fn with_assigned_to(mut self, actor_ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.assigned_to = actor_ids.into_iter().collect();
        self
    }

    /// Check whether the actor id appears in `assigned_to`
    pub fn is_assigned_to(&self, actor_id: EntityId) -> bool {
        self.assigned_to.contains(&actor_id)
    }
}

/// Partial update for a goal
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub success_criteria: Option<Vec<String>>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<Vec<EntityId>>,
}

impl Entity for Goal {
    const KIND: EntityKind = EntityKind::Goal;
    type Patch = GoalPatch;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn apply_patch(&mut self, patch: GoalPatch) {
        if let Some(name) = patch.name {
            self.meta.name = name;
        }
        if let Some(description) = patch.description {
            self.meta.description = description;
        }
        if let Some(success_criteria) = patch.success_criteria {
            self.success_criteria = success_criteria;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
    }
}
