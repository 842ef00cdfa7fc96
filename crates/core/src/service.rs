//! ModelService - the single object a host embeds to drive the model.

use std::path::PathBuf;

use screenplay_consistency::compute_gaps;
use screenplay_model::{
    Actor, EntityId, EntityKind, Goal, GoalPatch, Interaction, Journey, JourneyPatch, JourneyStep,
    ModelError, ModelSnapshot, Priority, Question, Result, StepOutcome, Task, TaskPatch,
};
use screenplay_queries::{
    check_actor_can_achieve_goal, find_actors_without_ability, find_tasks_without_interactions,
    find_unachievable_goals, find_untested_journeys, ActorGoalCheck, GoalAchievability,
};
use screenplay_store::{ModelStore, Stored};

use crate::config::ServiceConfig;

/// The embedding surface for hosts: owns the durable store and exposes
/// definition, composition, query, and snapshot operations in one place.
///
/// Construct one per data directory. Reads take `&self`; every mutation
/// takes `&mut self` and completes durably before returning. Hosts that
/// need raw CRUD or the change feed reach the store through
/// [`ModelService::store`] and [`ModelService::store_mut`].
#[derive(Debug)]
pub struct ModelService {
    store: ModelStore,
}

impl ModelService {
    /// Open the service over the configured data directory
    pub fn open(config: &ServiceConfig) -> Result<Self> {
        Self::open_dir(config.data_dir.clone())
    }

    /// Open the service over an explicit data directory
    pub fn open_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = ModelStore::open(dir)?;
        Ok(Self { store })
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    /// Mutable access to the underlying store, for raw CRUD and the
    /// change feed
    pub fn store_mut(&mut self) -> &mut ModelStore {
        &mut self.store
    }

    // ========== Definition ==========

    /// Define a new actor
    pub fn define_actor(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        abilities: impl IntoIterator<Item = impl Into<String>>,
        constraints: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Actor> {
        self.store.save(
            Actor::new(name, description)
                .with_abilities(abilities)
                .with_constraints(constraints),
        )
    }

    /// Define a new goal; `assigned_to` may name actors that do not
    /// exist yet
    pub fn define_goal(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        success_criteria: impl IntoIterator<Item = impl Into<String>>,
        assigned_to: impl IntoIterator<Item = EntityId>,
    ) -> Result<Goal> {
        self.store.save(
            Goal::new(name, description, priority)
                .with_success_criteria(success_criteria)
                .with_assigned_to(assigned_to),
        )
    }

    /// Define a new task; both reference lists may dangle
    pub fn define_task(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        required_abilities: impl IntoIterator<Item = impl Into<String>>,
        composed_of: impl IntoIterator<Item = EntityId>,
        goal_ids: impl IntoIterator<Item = EntityId>,
    ) -> Result<Task> {
        self.store.save(
            Task::new(name, description)
                .with_required_abilities(required_abilities)
                .with_composed_of(composed_of)
                .with_goal_ids(goal_ids),
        )
    }

    /// Define a new interaction
    pub fn define_interaction(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        preconditions: impl IntoIterator<Item = impl Into<String>>,
        effects: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Interaction> {
        self.store.save(
            Interaction::new(name, description)
                .with_preconditions(preconditions)
                .with_effects(effects),
        )
    }

    /// Define a new question
    pub fn define_question(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        asks_about: impl Into<String>,
    ) -> Result<Question> {
        self.store.save(Question::new(name, description, asks_about))
    }

    /// Define a new journey for an actor; `actor_id` and `goal_ids` may
    /// dangle
    pub fn define_journey(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        actor_id: EntityId,
        goal_ids: impl IntoIterator<Item = EntityId>,
    ) -> Result<Journey> {
        self.store
            .save(Journey::new(name, description, actor_id).with_goal_ids(goal_ids))
    }

    // ========== Composition ==========

    /// Add the actor to the goal's assignment list.
    ///
    /// Membership is checked first, so a repeat call leaves the actor in
    /// the list exactly once; the update and its event still run either
    /// way. Fails with NotFound before touching anything if the goal is
    /// absent. The actor itself is never looked up.
    pub fn assign_goal_to_actor(&mut self, goal_id: EntityId, actor_id: EntityId) -> Result<Goal> {
        let goal = self
            .store
            .get::<Goal>(goal_id)
            .ok_or(ModelError::not_found(EntityKind::Goal, goal_id))?;
        let mut assigned_to = goal.assigned_to.clone();
        if !assigned_to.contains(&actor_id) {
            assigned_to.push(actor_id);
        }
        tracing::debug!(goal = %goal_id, actor = %actor_id, "assign actor to goal");
        self.store.update::<Goal>(
            goal_id,
            GoalPatch {
                assigned_to: Some(assigned_to),
                ..Default::default()
            },
        )
    }

    /// Remove the actor from the goal's assignment list; removing an
    /// absent actor still runs the update
    pub fn unassign_goal_from_actor(
        &mut self,
        goal_id: EntityId,
        actor_id: EntityId,
    ) -> Result<Goal> {
        let goal = self
            .store
            .get::<Goal>(goal_id)
            .ok_or(ModelError::not_found(EntityKind::Goal, goal_id))?;
        let assigned_to: Vec<EntityId> = goal
            .assigned_to
            .iter()
            .copied()
            .filter(|id| *id != actor_id)
            .collect();
        tracing::debug!(goal = %goal_id, actor = %actor_id, "unassign actor from goal");
        self.store.update::<Goal>(
            goal_id,
            GoalPatch {
                assigned_to: Some(assigned_to),
                ..Default::default()
            },
        )
    }

    /// Add the interaction to the task's composition list
    pub fn add_interaction_to_task(
        &mut self,
        task_id: EntityId,
        interaction_id: EntityId,
    ) -> Result<Task> {
        let task = self
            .store
            .get::<Task>(task_id)
            .ok_or(ModelError::not_found(EntityKind::Task, task_id))?;
        let mut composed_of = task.composed_of.clone();
        if !composed_of.contains(&interaction_id) {
            composed_of.push(interaction_id);
        }
        tracing::debug!(task = %task_id, interaction = %interaction_id, "add interaction to task");
        self.store.update::<Task>(
            task_id,
            TaskPatch {
                composed_of: Some(composed_of),
                ..Default::default()
            },
        )
    }

    /// Remove the interaction from the task's composition list
    pub fn remove_interaction_from_task(
        &mut self,
        task_id: EntityId,
        interaction_id: EntityId,
    ) -> Result<Task> {
        let task = self
            .store
            .get::<Task>(task_id)
            .ok_or(ModelError::not_found(EntityKind::Task, task_id))?;
        let composed_of: Vec<EntityId> = task
            .composed_of
            .iter()
            .copied()
            .filter(|id| *id != interaction_id)
            .collect();
        tracing::debug!(task = %task_id, interaction = %interaction_id, "remove interaction from task");
        self.store.update::<Task>(
            task_id,
            TaskPatch {
                composed_of: Some(composed_of),
                ..Default::default()
            },
        )
    }

    /// Add the goal to the journey's goal list
    pub fn add_goal_to_journey(&mut self, journey_id: EntityId, goal_id: EntityId) -> Result<Journey> {
        let journey = self
            .store
            .get::<Journey>(journey_id)
            .ok_or(ModelError::not_found(EntityKind::Journey, journey_id))?;
        let mut goal_ids = journey.goal_ids.clone();
        if !goal_ids.contains(&goal_id) {
            goal_ids.push(goal_id);
        }
        tracing::debug!(journey = %journey_id, goal = %goal_id, "add goal to journey");
        self.store.update::<Journey>(
            journey_id,
            JourneyPatch {
                goal_ids: Some(goal_ids),
                ..Default::default()
            },
        )
    }

    /// Remove the goal from the journey's goal list
    pub fn remove_goal_from_journey(
        &mut self,
        journey_id: EntityId,
        goal_id: EntityId,
    ) -> Result<Journey> {
        let journey = self
            .store
            .get::<Journey>(journey_id)
            .ok_or(ModelError::not_found(EntityKind::Journey, journey_id))?;
        let goal_ids: Vec<EntityId> = journey
            .goal_ids
            .iter()
            .copied()
            .filter(|id| *id != goal_id)
            .collect();
        tracing::debug!(journey = %journey_id, goal = %goal_id, "remove goal from journey");
        self.store.update::<Journey>(
            journey_id,
            JourneyPatch {
                goal_ids: Some(goal_ids),
                ..Default::default()
            },
        )
    }

    /// Append a step to the journey, stamped with the current time.
    ///
    /// Steps are append-only; repeating a task records another attempt
    /// rather than collapsing into the previous one.
    pub fn record_journey_step(
        &mut self,
        journey_id: EntityId,
        task_id: EntityId,
        outcome: StepOutcome,
    ) -> Result<Journey> {
        let journey = self
            .store
            .get::<Journey>(journey_id)
            .ok_or(ModelError::not_found(EntityKind::Journey, journey_id))?;
        let mut steps = journey.steps.clone();
        steps.push(JourneyStep::new(task_id, outcome));
        tracing::debug!(journey = %journey_id, task = %task_id, outcome = %outcome, "record journey step");
        self.store.update::<Journey>(
            journey_id,
            JourneyPatch {
                steps: Some(steps),
                ..Default::default()
            },
        )
    }

    // ========== Queries ==========

    /// Check whether the actor can achieve the goal through the tasks
    /// that reference it. Both entities must exist; the check itself
    /// never mutates.
    pub fn actor_can_achieve_goal(
        &self,
        actor_id: EntityId,
        goal_id: EntityId,
    ) -> Result<ActorGoalCheck> {
        let actor = self
            .store
            .get::<Actor>(actor_id)
            .ok_or(ModelError::not_found(EntityKind::Actor, actor_id))?;
        let goal = self
            .store
            .get::<Goal>(goal_id)
            .ok_or(ModelError::not_found(EntityKind::Goal, goal_id))?;
        Ok(check_actor_can_achieve_goal(
            actor,
            goal,
            self.store.get_all::<Task>(),
        ))
    }

    /// Goals whose assigned actors cannot currently reach them,
    /// optionally restricted to goals assigned to one actor
    pub fn unachievable_goals(&self, actor_filter: Option<EntityId>) -> Vec<GoalAchievability<'_>> {
        find_unachievable_goals(
            self.store.get_all::<Goal>(),
            self.store.get_all::<Actor>(),
            self.store.get_all::<Task>(),
            actor_filter,
        )
    }

    /// Actors whose ability list excludes the given tag
    pub fn actors_without_ability(&self, ability: &str) -> Vec<&Actor> {
        find_actors_without_ability(self.store.get_all::<Actor>(), ability)
    }

    /// Tasks not yet broken down into interactions
    pub fn tasks_without_interactions(&self) -> Vec<&Task> {
        find_tasks_without_interactions(self.store.get_all::<Task>())
    }

    /// Journeys with no recorded steps
    pub fn untested_journeys(&self) -> Vec<&Journey> {
        find_untested_journeys(self.store.get_all::<Journey>())
    }

    /// Case- and whitespace-insensitive name lookup, first match wins
    pub fn find_by_name<T: Stored>(&self, name: &str) -> Option<&T> {
        screenplay_queries::find_by_name(self.store.get_all::<T>(), name)
    }

    // ========== Snapshot ==========

    /// The full model: every collection plus a freshly computed gap set
    pub fn full_model(&self) -> ModelSnapshot {
        let mut snapshot = self.store.snapshot();
        snapshot.gaps = compute_gaps(&snapshot);
        snapshot
    }

    /// Delete every entity across all kinds
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenplay_model::{ChangeEvent, ChangeKind, Entity, ExpectedKind};
    use std::sync::{Arc, Mutex};
    use tempfile::{tempdir, TempDir};

    fn open_service() -> (TempDir, ModelService) {
        let dir = tempdir().unwrap();
        let service = ModelService::open_dir(dir.path()).unwrap();
        (dir, service)
    }

    fn capture_events(service: &mut ModelService) -> Arc<Mutex<Vec<ChangeEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        service
            .store_mut()
            .subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        events
    }

    #[test]
    fn test_open_creates_data_dir_from_config() {
        let dir = tempdir().unwrap();
        let config = ServiceConfig {
            data_dir: dir.path().join("model"),
        };

        let service = ModelService::open(&config).unwrap();
        assert_eq!(service.store().base_dir(), config.data_dir.as_path());
        assert!(config.data_dir.join("actors.json").exists());
    }

    #[test]
    fn test_define_operations_persist_records() {
        let (_dir, mut service) = open_service();

        let actor = service
            .define_actor(
                "Maria",
                "A registered customer",
                ["place-order"],
                ["no corporate account"],
            )
            .unwrap();
        let goal = service
            .define_goal(
                "Buy a gift",
                "",
                Priority::High,
                ["Order confirmed"],
                [actor.id()],
            )
            .unwrap();
        let interaction = service
            .define_interaction("Submit payment", "", ["cart is non-empty"], ["order created"])
            .unwrap();
        let task = service
            .define_task(
                "Check out",
                "",
                ["place-order"],
                [interaction.id()],
                [goal.id()],
            )
            .unwrap();
        let question = service
            .define_question("Guest checkout?", "", "accounts")
            .unwrap();
        let journey = service
            .define_journey("First purchase", "", actor.id(), [goal.id()])
            .unwrap();

        assert_eq!(service.store().entity_count(), 6);
        assert_eq!(
            service.store().get::<Task>(task.id()).unwrap().composed_of,
            vec![interaction.id()]
        );
        assert_eq!(
            service.store().get::<Question>(question.id()).unwrap().asks_about,
            "accounts"
        );
        assert!(service.store().get::<Journey>(journey.id()).unwrap().is_untested());
    }

    #[test]
    fn test_find_by_name_ignores_case_and_padding() {
        let (_dir, mut service) = open_service();
        service
            .define_actor("Maria", "", Vec::<String>::new(), Vec::<String>::new())
            .unwrap();

        let found: &Actor = service.find_by_name("  MARIA ").unwrap();
        assert_eq!(found.name(), "Maria");
        assert!(service.find_by_name::<Goal>("Maria").is_none());
    }

    #[test]
    fn test_assign_twice_keeps_actor_once_but_still_updates() {
        let (_dir, mut service) = open_service();
        let actor = service
            .define_actor("Maria", "", Vec::<String>::new(), Vec::<String>::new())
            .unwrap();
        let goal = service
            .define_goal("Buy a gift", "", Priority::High, Vec::<String>::new(), Vec::new())
            .unwrap();

        service.assign_goal_to_actor(goal.id(), actor.id()).unwrap();
        let events = capture_events(&mut service);
        let second = service.assign_goal_to_actor(goal.id(), actor.id()).unwrap();

        assert_eq!(second.assigned_to, vec![actor.id()]);
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].change_kind(), ChangeKind::Update);
    }

    #[test]
    fn test_unassign_removes_actor_and_tolerates_absence() {
        let (_dir, mut service) = open_service();
        let actor = service
            .define_actor("Maria", "", Vec::<String>::new(), Vec::<String>::new())
            .unwrap();
        let goal = service
            .define_goal("Buy a gift", "", Priority::Low, Vec::<String>::new(), [actor.id()])
            .unwrap();

        let unassigned = service.unassign_goal_from_actor(goal.id(), actor.id()).unwrap();
        assert!(unassigned.assigned_to.is_empty());

        let again = service.unassign_goal_from_actor(goal.id(), actor.id()).unwrap();
        assert!(again.assigned_to.is_empty());
    }

    #[test]
    fn test_composition_fails_closed_when_target_missing() {
        let (_dir, mut service) = open_service();
        let actor = service
            .define_actor("Maria", "", Vec::<String>::new(), Vec::<String>::new())
            .unwrap();
        let events = capture_events(&mut service);

        let err = service
            .assign_goal_to_actor(EntityId::new(), actor.id())
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::NotFound {
                kind: EntityKind::Goal,
                ..
            }
        ));

        let err = service
            .record_journey_step(EntityId::new(), EntityId::new(), StepOutcome::Success)
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::NotFound {
                kind: EntityKind::Journey,
                ..
            }
        ));
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_task_interaction_membership_round_trip() {
        let (_dir, mut service) = open_service();
        let task = service
            .define_task("Check out", "", Vec::<String>::new(), Vec::new(), Vec::new())
            .unwrap();
        let interaction = service
            .define_interaction("Submit payment", "", Vec::<String>::new(), Vec::<String>::new())
            .unwrap();

        service.add_interaction_to_task(task.id(), interaction.id()).unwrap();
        let after_repeat = service
            .add_interaction_to_task(task.id(), interaction.id())
            .unwrap();
        assert_eq!(after_repeat.composed_of, vec![interaction.id()]);

        let removed = service
            .remove_interaction_from_task(task.id(), interaction.id())
            .unwrap();
        assert!(removed.composed_of.is_empty());
    }

    #[test]
    fn test_journey_goal_membership_round_trip() {
        let (_dir, mut service) = open_service();
        let journey = service
            .define_journey("First purchase", "", EntityId::new(), Vec::new())
            .unwrap();
        let goal = service
            .define_goal("Buy a gift", "", Priority::Medium, Vec::<String>::new(), Vec::new())
            .unwrap();

        service.add_goal_to_journey(journey.id(), goal.id()).unwrap();
        let after_repeat = service.add_goal_to_journey(journey.id(), goal.id()).unwrap();
        assert_eq!(after_repeat.goal_ids, vec![goal.id()]);

        let removed = service.remove_goal_from_journey(journey.id(), goal.id()).unwrap();
        assert!(removed.goal_ids.is_empty());
    }

    #[test]
    fn test_record_journey_step_appends_every_call() {
        let (_dir, mut service) = open_service();
        let journey = service
            .define_journey("First purchase", "", EntityId::new(), Vec::new())
            .unwrap();
        let task_id = EntityId::new();

        service
            .record_journey_step(journey.id(), task_id, StepOutcome::Failure)
            .unwrap();
        let updated = service
            .record_journey_step(journey.id(), task_id, StepOutcome::Success)
            .unwrap();

        assert_eq!(updated.steps.len(), 2);
        assert_eq!(updated.steps[0].outcome, StepOutcome::Failure);
        assert_eq!(updated.steps[1].outcome, StepOutcome::Success);
        assert!(updated.steps[1].timestamp >= updated.steps[0].timestamp);
    }

    #[test]
    fn test_full_model_materializes_gap_for_deleted_actor() {
        let (_dir, mut service) = open_service();
        let actor = service
            .define_actor("Maria", "", ["x"], Vec::<String>::new())
            .unwrap();
        let goal = service
            .define_goal("Buy a gift", "", Priority::High, Vec::<String>::new(), [actor.id()])
            .unwrap();
        assert!(service.full_model().gaps.is_empty());

        service.store_mut().delete::<Actor>(actor.id()).unwrap();

        let snapshot = service.full_model();
        assert_eq!(snapshot.gaps.len(), 1);
        assert_eq!(snapshot.gaps[0].id, actor.id());
        assert_eq!(snapshot.gaps[0].expected_type, ExpectedKind::Actor);
        assert_eq!(snapshot.gaps[0].referenced_by, vec![goal.id()]);
    }

    #[test]
    fn test_full_model_reports_unknown_interaction_reference() {
        let (_dir, mut service) = open_service();
        let task = service
            .define_task(
                "Check out",
                "",
                Vec::<String>::new(),
                [EntityId::new()],
                Vec::new(),
            )
            .unwrap();

        let snapshot = service.full_model();
        assert_eq!(snapshot.gaps.len(), 1);
        assert_eq!(snapshot.gaps[0].expected_type, ExpectedKind::Interaction);
        assert_eq!(snapshot.gaps[0].referenced_by, vec![task.id()]);
    }

    #[test]
    fn test_actor_can_achieve_goal_reports_missing_abilities() {
        let (_dir, mut service) = open_service();
        let actor = service
            .define_actor("X", "", ["a"], Vec::<String>::new())
            .unwrap();
        let goal = service
            .define_goal("Gx", "", Priority::Medium, Vec::<String>::new(), [actor.id()])
            .unwrap();
        service
            .define_task("Tx", "", ["a", "b"], Vec::new(), [goal.id()])
            .unwrap();

        let check = service.actor_can_achieve_goal(actor.id(), goal.id()).unwrap();
        assert!(!check.can_achieve);
        assert_eq!(check.missing_abilities, vec!["b"]);
    }

    #[test]
    fn test_actor_can_achieve_goal_requires_both_entities() {
        let (_dir, mut service) = open_service();
        let actor = service
            .define_actor("Maria", "", Vec::<String>::new(), Vec::<String>::new())
            .unwrap();

        let err = service
            .actor_can_achieve_goal(EntityId::new(), EntityId::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::NotFound {
                kind: EntityKind::Actor,
                ..
            }
        ));

        let err = service
            .actor_can_achieve_goal(actor.id(), EntityId::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::NotFound {
                kind: EntityKind::Goal,
                ..
            }
        ));
    }

    #[test]
    fn test_unachievable_goals_spot_missing_tasks() {
        let (_dir, mut service) = open_service();
        let actor = service
            .define_actor("Maria", "", ["place-order"], Vec::<String>::new())
            .unwrap();
        let stuck = service
            .define_goal("Stuck", "", Priority::High, Vec::<String>::new(), [actor.id()])
            .unwrap();
        let reachable = service
            .define_goal("Reachable", "", Priority::Low, Vec::<String>::new(), [actor.id()])
            .unwrap();
        service
            .define_task("Check out", "", ["place-order"], Vec::new(), [reachable.id()])
            .unwrap();

        let report = service.unachievable_goals(None);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].goal.id(), stuck.id());
        assert!(report[0].reason.contains("No tasks defined yet"));
    }

    #[test]
    fn test_filter_queries_surface_underspecified_corners() {
        let (_dir, mut service) = open_service();
        let actor = service
            .define_actor("Maria", "", ["browse-catalog"], Vec::<String>::new())
            .unwrap();
        let bare_task = service
            .define_task("Check out", "", Vec::<String>::new(), Vec::new(), Vec::new())
            .unwrap();
        let journey = service
            .define_journey("First purchase", "", actor.id(), Vec::new())
            .unwrap();

        let lacking = service.actors_without_ability("place-order");
        assert_eq!(lacking.len(), 1);
        assert_eq!(lacking[0].id(), actor.id());
        assert!(service.actors_without_ability("browse-catalog").is_empty());

        assert_eq!(service.tasks_without_interactions()[0].id(), bare_task.id());
        assert_eq!(service.untested_journeys()[0].id(), journey.id());

        service
            .record_journey_step(journey.id(), bare_task.id(), StepOutcome::Success)
            .unwrap();
        assert!(service.untested_journeys().is_empty());
    }

    #[test]
    fn test_clear_empties_whole_model() {
        let (_dir, mut service) = open_service();
        let actor = service
            .define_actor("Maria", "", Vec::<String>::new(), Vec::<String>::new())
            .unwrap();
        service
            .define_journey("First purchase", "", actor.id(), Vec::new())
            .unwrap();

        service.clear().unwrap();

        let snapshot = service.full_model();
        assert!(snapshot.is_empty());
        assert!(snapshot.gaps.is_empty());
        assert_eq!(service.store().entity_count(), 0);
    }
}
