//! Task - a unit of work an actor performs toward a goal.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, EntityMeta};

/// A unit of work, broken down into interactions and linked to goals
///
/// Both reference lists may hold ids of entities that do not exist yet;
/// those show up as gaps in the next snapshot rather than failing here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Capability tags an actor needs to perform this task
    #[serde(default)]
    pub required_abilities: Vec<String>,
    /// Ids of the interactions this task is made of, possibly dangling
    #[serde(default)]
    pub composed_of: Vec<EntityId>,
    /// Ids of the goals this task contributes to, possibly dangling
    #[serde(default)]
    pub goal_ids: Vec<EntityId>,
}

impl Task {
    /// Create a new task with a fresh id and timestamps
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::new(name, description),
            required_abilities: Vec::new(),
            composed_of: Vec::new(),
            goal_ids: Vec::new(),
        }
    }

    /// Builder: set required ability tags
    pub fn with_required_abilities(
        mut self,
        abilities: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.required_abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the interaction ids this task is composed of
    pub fn with_composed_of(mut self, interaction_ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.composed_of = interaction_ids.into_iter().collect();
        self
    }

    /// Builder: set the goal ids this task contributes to
    pub fn with_goal_ids(mut self, goal_ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.goal_ids = goal_ids.into_iter().collect();
        self
    }

    /// Check whether this task contributes to the given goal
    pub fn contributes_to(&self, goal_id: EntityId) -> bool {
        self.goal_ids.contains(&goal_id)
    }
}

/// Partial update for a task
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub required_abilities: Option<Vec<String>>,
    pub composed_of: Option<Vec<EntityId>>,
    pub goal_ids: Option<Vec<EntityId>>,
}

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Task;
    type Patch = TaskPatch;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(name) = patch.name {
            self.meta.name = name;
        }
        if let Some(description) = patch.description {
            self.meta.description = description;
        }
        if let Some(required_abilities) = patch.required_abilities {
            self.required_abilities = required_abilities;
        }
        if let Some(composed_of) = patch.composed_of {
            self.composed_of = composed_of;
        }
        if let Some(goal_ids) = patch.goal_ids {
            self.goal_ids = goal_ids;
        }
    }
}
