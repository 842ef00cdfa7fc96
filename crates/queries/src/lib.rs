//! # Screenplay Queries
//!
//! Read-only reasoning over a screenplay model: ability-gap analysis
//! between actors and the goals assigned to them, plus the filter
//! queries that surface under-specified corners of the model.
//!
//! Everything here takes plain slices of entities and returns owned or
//! borrowed reports. Nothing in this crate mutates the model.

mod achievability;
mod filters;

pub use achievability::{
    check_actor_can_achieve_goal, find_unachievable_goals, ActorGoalCheck, GoalAchievability,
};
pub use filters::{
    find_actors_without_ability, find_by_name, find_tasks_without_interactions,
    find_untested_journeys,
};
