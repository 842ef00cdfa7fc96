//! Full-model snapshot handed to readers.

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::gap::Gap;
use crate::goal::Goal;
use crate::interaction::Interaction;
use crate::journey::Journey;
use crate::question::Question;
use crate::task::Task;

/// Every stored entity across the six kinds, plus the computed gap set
///
/// Collections keep store insertion order. `gaps` is derived; an empty
/// list on a freshly assembled snapshot means the consistency pass has
/// not run yet, not that the model is consistent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub actors: Vec<Actor>,
    pub goals: Vec<Goal>,
    pub tasks: Vec<Task>,
    pub interactions: Vec<Interaction>,
    pub questions: Vec<Question>,
    pub journeys: Vec<Journey>,
    #[serde(default)]
    pub gaps: Vec<Gap>,
}

impl ModelSnapshot {
    /// Number of stored entities, gaps excluded
    pub fn entity_count(&self) -> usize {
        self.actors.len()
            + self.goals.len()
            + self.tasks.len()
            + self.interactions.len()
            + self.questions.len()
            + self.journeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }
}
