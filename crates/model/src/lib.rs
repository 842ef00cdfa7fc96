//! # Screenplay Model
//!
//! Entity kinds, validation rules, and change events for the screenplay
//! domain model: actors, goals, tasks, interactions, questions, and
//! journeys, plus the derived gap placeholders that stand in for
//! referenced-but-missing entities.
//!
//! Cross-reference fields are plain identifier lists and are never
//! checked against the store at write time. Dangling references are
//! normal data here; the consistency layer reconciles them into gaps
//! when a snapshot is assembled.

pub mod actor;
pub mod entity;
pub mod error;
pub mod event;
pub mod gap;
pub mod goal;
pub mod interaction;
pub mod journey;
pub mod question;
pub mod snapshot;
pub mod task;

// Re-exports
pub use actor::{Actor, ActorPatch};
pub use entity::{Entity, EntityId, EntityKind, EntityMeta};
pub use error::{ModelError, Result, ValidationError};
pub use event::{AnyEntity, ChangeEvent, ChangeKind};
pub use gap::{ExpectedKind, Gap};
pub use goal::{Goal, GoalPatch, Priority};
pub use interaction::{Interaction, InteractionPatch};
pub use journey::{Journey, JourneyPatch, JourneyStep, StepOutcome};
pub use question::{Question, QuestionPatch};
pub use snapshot::ModelSnapshot;
pub use task::{Task, TaskPatch};
