//! Change events emitted by the persistence layer.

use crate::actor::Actor;
use crate::entity::{Entity, EntityId, EntityKind};
use crate::goal::Goal;
use crate::interaction::Interaction;
use crate::journey::Journey;
use crate::question::Question;
use crate::task::Task;

/// A stored record of any of the six kinds
#[derive(Debug, Clone, PartialEq)]
pub enum AnyEntity {
    Actor(Actor),
    Goal(Goal),
    Task(Task),
    Interaction(Interaction),
    Question(Question),
    Journey(Journey),
}

impl AnyEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            AnyEntity::Actor(_) => EntityKind::Actor,
            AnyEntity::Goal(_) => EntityKind::Goal,
            AnyEntity::Task(_) => EntityKind::Task,
            AnyEntity::Interaction(_) => EntityKind::Interaction,
            AnyEntity::Question(_) => EntityKind::Question,
            AnyEntity::Journey(_) => EntityKind::Journey,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            AnyEntity::Actor(a) => a.id(),
            AnyEntity::Goal(g) => g.id(),
            AnyEntity::Task(t) => t.id(),
            AnyEntity::Interaction(i) => i.id(),
            AnyEntity::Question(q) => q.id(),
            AnyEntity::Journey(j) => j.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AnyEntity::Actor(a) => a.name(),
            AnyEntity::Goal(g) => g.name(),
            AnyEntity::Task(t) => t.name(),
            AnyEntity::Interaction(i) => i.name(),
            AnyEntity::Question(q) => q.name(),
            AnyEntity::Journey(j) => j.name(),
        }
    }
}

impl From<Actor> for AnyEntity {
    fn from(actor: Actor) -> Self {
        AnyEntity::Actor(actor)
    }
}

impl From<Goal> for AnyEntity {
    fn from(goal: Goal) -> Self {
        AnyEntity::Goal(goal)
    }
}

impl From<Task> for AnyEntity {
    fn from(task: Task) -> Self {
        AnyEntity::Task(task)
    }
}

impl From<Interaction> for AnyEntity {
    fn from(interaction: Interaction) -> Self {
        AnyEntity::Interaction(interaction)
    }
}

impl From<Question> for AnyEntity {
    fn from(question: Question) -> Self {
        AnyEntity::Question(question)
    }
}

impl From<Journey> for AnyEntity {
    fn from(journey: Journey) -> Self {
        AnyEntity::Journey(journey)
    }
}

/// What a change event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Create => "create",
            ChangeKind::Update => "update",
            ChangeKind::Delete => "delete",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the store's change feed
///
/// Create and update carry the full record; delete carries only the kind
/// and id, so consumers resolve anything else from prior events or accept
/// non-existence.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    Created(AnyEntity),
    Updated(AnyEntity),
    Deleted { kind: EntityKind, id: EntityId },
}

impl ChangeEvent {
    pub fn change_kind(&self) -> ChangeKind {
        match self {
            ChangeEvent::Created(_) => ChangeKind::Create,
            ChangeEvent::Updated(_) => ChangeKind::Update,
            ChangeEvent::Deleted { .. } => ChangeKind::Delete,
        }
    }

    pub fn entity_kind(&self) -> EntityKind {
        match self {
            ChangeEvent::Created(entity) | ChangeEvent::Updated(entity) => entity.kind(),
            ChangeEvent::Deleted { kind, .. } => *kind,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            ChangeEvent::Created(entity) | ChangeEvent::Updated(entity) => entity.id(),
            ChangeEvent::Deleted { id, .. } => *id,
        }
    }

    /// The full record, when this event carries one
    pub fn data(&self) -> Option<&AnyEntity> {
        match self {
            ChangeEvent::Created(entity) | ChangeEvent::Updated(entity) => Some(entity),
            ChangeEvent::Deleted { .. } => None,
        }
    }
}
