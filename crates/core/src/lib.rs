//! # Screenplay Core
//!
//! The service layer tying the model together: one [`ModelService`]
//! owning the durable store and exposing definition, composition,
//! query, and snapshot operations to a host.

mod config;
mod service;

pub use config::ServiceConfig;
pub use service::ModelService;

// Re-export the layers hosts reach through the service
pub use screenplay_consistency::compute_gaps;
pub use screenplay_model::{
    Actor, ActorPatch, AnyEntity, ChangeEvent, ChangeKind, Entity, EntityId, EntityKind,
    EntityMeta, ExpectedKind, Gap, Goal, GoalPatch, Interaction, InteractionPatch, Journey,
    JourneyPatch, JourneyStep, ModelError, ModelSnapshot, Priority, Question, QuestionPatch,
    Result, StepOutcome, Task, TaskPatch, ValidationError,
};
pub use screenplay_queries::{ActorGoalCheck, GoalAchievability};
pub use screenplay_store::{ModelStore, Stored, SubscriptionId};
