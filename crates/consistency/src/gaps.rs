//! Gap computation over a full model snapshot.

use std::collections::HashSet;

use screenplay_model::{Entity, EntityId, ExpectedKind, Gap, ModelSnapshot};

/// Collects gaps in discovery order while scanning reference fields
struct GapSet {
    real_ids: HashSet<EntityId>,
    gaps: Vec<Gap>,
}

impl GapSet {
    fn new(real_ids: HashSet<EntityId>) -> Self {
        Self {
            real_ids,
            gaps: Vec::new(),
        }
    }

    /// Record one reference. Does nothing if the target exists; otherwise
    /// resolves or creates the gap for it. The first field to mention a
    /// missing id fixes the gap's expected type; later references only
    /// add referencers.
    fn record(&mut self, target: EntityId, expected: ExpectedKind, referencer: EntityId) {
        if self.real_ids.contains(&target) {
            return;
        }
        match self.gaps.iter_mut().find(|gap| gap.id == target) {
            Some(gap) => gap.add_referencer(referencer),
            None => {
                let mut gap = Gap::new(target, expected);
                gap.add_referencer(referencer);
                self.gaps.push(gap);
            }
        }
    }
}

/// Compute the gap set for a snapshot.
///
/// Pure and recomputed on demand; `snapshot.gaps` is ignored. An id is
/// "real" if any actor, goal, task, or interaction carries it; question
/// and journey ids are never reference targets. Reference fields are
/// scanned in a fixed order: goal assignments, task compositions, task
/// goal links, then journey actors, goal links, and steps. Each
/// referencing entity appears at most once per gap.
pub fn compute_gaps(snapshot: &ModelSnapshot) -> Vec<Gap> {
    let real_ids: HashSet<EntityId> = snapshot
        .actors
        .iter()
        .map(|actor| actor.id())
        .chain(snapshot.goals.iter().map(|goal| goal.id()))
        .chain(snapshot.tasks.iter().map(|task| task.id()))
        .chain(snapshot.interactions.iter().map(|interaction| interaction.id()))
        .collect();

    let mut set = GapSet::new(real_ids);

    for goal in &snapshot.goals {
        for actor_id in &goal.assigned_to {
            set.record(*actor_id, ExpectedKind::Actor, goal.id());
        }
    }
    for task in &snapshot.tasks {
        for interaction_id in &task.composed_of {
            set.record(*interaction_id, ExpectedKind::Interaction, task.id());
        }
    }
    for task in &snapshot.tasks {
        for goal_id in &task.goal_ids {
            set.record(*goal_id, ExpectedKind::Goal, task.id());
        }
    }
    for journey in &snapshot.journeys {
        set.record(journey.actor_id, ExpectedKind::Actor, journey.id());
    }
    for journey in &snapshot.journeys {
        for goal_id in &journey.goal_ids {
            set.record(*goal_id, ExpectedKind::Goal, journey.id());
        }
    }
    for journey in &snapshot.journeys {
        for step in &journey.steps {
            set.record(step.task_id, ExpectedKind::Task, journey.id());
        }
    }

    set.gaps
}
