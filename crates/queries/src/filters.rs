//! Simple filter queries over the model's collections.

use screenplay_model::{Actor, Entity, Journey, Task};

/// Actors whose ability list lacks the given tag
pub fn find_actors_without_ability<'a>(actors: &'a [Actor], ability: &str) -> Vec<&'a Actor> {
    actors
        .iter()
        .filter(|actor| !actor.has_ability(ability))
        .collect()
}

/// Tasks with no interactions yet, i.e. still to be decomposed
pub fn find_tasks_without_interactions(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.composed_of.is_empty())
        .collect()
}

/// Journeys that have never had a step recorded
pub fn find_untested_journeys(journeys: &[Journey]) -> Vec<&Journey> {
    journeys
        .iter()
        .filter(|journey| journey.is_untested())
        .collect()
}

/// Name lookup: case-insensitive, leading/trailing whitespace ignored,
/// first match wins under duplicate names. Callers use this to avoid
/// defining the same entity twice.
pub fn find_by_name<'a, T: Entity>(records: &'a [T], name: &str) -> Option<&'a T> {
    let normalized = name.trim().to_lowercase();
    records
        .iter()
        .find(|record| record.name().trim().to_lowercase() == normalized)
}
