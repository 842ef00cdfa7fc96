//! Journey - a recorded walk of one actor through the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, EntityMeta};

/// Result of executing one journey step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    Success,
    Failure,
    Blocked,
}

impl StepOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepOutcome::Success => "success",
            StepOutcome::Failure => "failure",
            StepOutcome::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One executed step of a journey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyStep {
    /// Task that was attempted, possibly dangling
    pub task_id: EntityId,
    pub outcome: StepOutcome,
    pub timestamp: DateTime<Utc>,
}

impl JourneyStep {
    /// Record a step attempted now
    pub fn new(task_id: EntityId, outcome: StepOutcome) -> Self {
        Self {
            task_id,
            outcome,
            timestamp: Utc::now(),
        }
    }
}

/// A recorded walk of one actor through tasks toward goals
///
/// All three reference fields may dangle; journeys themselves are never
/// reference targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// The actor walking this journey, possibly dangling
    pub actor_id: EntityId,
    /// Goals this journey works toward, possibly dangling
    #[serde(default)]
    pub goal_ids: Vec<EntityId>,
    /// Steps taken so far, oldest first
    #[serde(default)]
    pub steps: Vec<JourneyStep>,
}

impl Journey {
    /// Create a new journey with a fresh id and timestamps
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        actor_id: EntityId,
    ) -> Self {
        Self {
            meta: EntityMeta::new(name, description),
            actor_id,
            goal_ids: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Builder: set the goal ids this journey works toward
    pub fn with_goal_ids(mut self, goal_ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.goal_ids = goal_ids.into_iter().collect();
        self
    }

    /// A journey is untested until at least one step has been recorded
    pub fn is_untested(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Partial update for a journey
///
/// `steps` is replaceable here for surface parity with the other list
/// fields; the step-recording composition operation is the only core
/// code path that grows it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JourneyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub actor_id: Option<EntityId>,
    pub goal_ids: Option<Vec<EntityId>>,
    pub steps: Option<Vec<JourneyStep>>,
}

impl Entity for Journey {
    const KIND: EntityKind = EntityKind::Journey;
    type Patch = JourneyPatch;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn apply_patch(&mut self, patch: JourneyPatch) {
        if let Some(name) = patch.name {
            self.meta.name = name;
        }
        if let Some(description) = patch.description {
            self.meta.description = description;
        }
        if let Some(actor_id) = patch.actor_id {
            self.actor_id = actor_id;
        }
        if let Some(goal_ids) = patch.goal_ids {
            self.goal_ids = goal_ids;
        }
        if let Some(steps) = patch.steps {
            self.steps = steps;
        }
    }
}
