//! Gap - a materialized placeholder for a referenced-but-missing entity.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// Entity kind a dangling reference was expected to resolve to
///
/// Only these four kinds can be reference targets; questions and
/// journeys are never referenced by anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedKind {
    Actor,
    Goal,
    Task,
    Interaction,
}

impl ExpectedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedKind::Actor => "actor",
            ExpectedKind::Goal => "goal",
            ExpectedKind::Task => "task",
            ExpectedKind::Interaction => "interaction",
        }
    }
}

impl std::fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference target that does not currently exist
///
/// Derived on demand from a snapshot; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    /// The dangling identifier itself
    pub id: EntityId,
    /// Kind of the field that first referenced the missing id
    pub expected_type: ExpectedKind,
    /// Ids of entities referencing the missing target, first-seen order,
    /// each at most once
    pub referenced_by: Vec<EntityId>,
}

impl Gap {
    pub fn new(id: EntityId, expected_type: ExpectedKind) -> Self {
        Self {
            id,
            expected_type,
            referenced_by: Vec::new(),
        }
    }

    /// Record a referencing entity, collapsing repeat mentions
    pub fn add_referencer(&mut self, referencer: EntityId) {
        if !self.referenced_by.contains(&referencer) {
            self.referenced_by.push(referencer);
        }
    }
}
