//! Goal-achievability reasoning: can an actor reach a goal through the
//! tasks that lead to it, and which goals are stuck.

use serde::Serialize;

use screenplay_model::{Actor, Entity, EntityId, Goal, Task};

/// Result of checking one actor against one goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorGoalCheck {
    pub can_achieve: bool,
    pub reason: String,
    pub actor_abilities: Vec<String>,
    pub required_abilities: Vec<String>,
    pub missing_abilities: Vec<String>,
}

/// One goal its assigned actors cannot reach
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalAchievability<'a> {
    pub goal: &'a Goal,
    pub is_achievable: bool,
    pub reason: String,
    pub assigned_actors: Vec<&'a Actor>,
    pub missing_abilities: Vec<String>,
}

/// First-seen-order union of ability tags
fn distinct<'a>(abilities: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for ability in abilities {
        if !seen.contains(ability) {
            seen.push(ability.clone());
        }
    }
    seen
}

/// Check whether `actor` can achieve `goal` through any task that
/// references it.
///
/// Fails closed when the actor is not assigned to the goal or when no
/// task leads to it. Succeeds on the first referencing task whose
/// required abilities the actor fully covers; otherwise reports the
/// union of missing abilities across every referencing task.
pub fn check_actor_can_achieve_goal(actor: &Actor, goal: &Goal, tasks: &[Task]) -> ActorGoalCheck {
    if !goal.is_assigned_to(actor.id()) {
        return ActorGoalCheck {
            can_achieve: false,
            reason: format!(
                "Actor \"{}\" is not assigned to goal \"{}\"",
                actor.name(),
                goal.name()
            ),
            actor_abilities: actor.abilities.clone(),
            required_abilities: Vec::new(),
            missing_abilities: Vec::new(),
        };
    }

    let relevant: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.contributes_to(goal.id()))
        .collect();
    if relevant.is_empty() {
        return ActorGoalCheck {
            can_achieve: false,
            reason: format!(
                "No tasks defined yet for goal \"{}\". Cannot determine missing abilities.",
                goal.name()
            ),
            actor_abilities: actor.abilities.clone(),
            required_abilities: Vec::new(),
            missing_abilities: Vec::new(),
        };
    }

    // One fully-covered task is enough; first such task wins.
    for task in &relevant {
        let required = distinct(&task.required_abilities);
        if required.iter().all(|ability| actor.has_ability(ability)) {
            return ActorGoalCheck {
                can_achieve: true,
                reason: format!(
                    "Actor \"{}\" can perform task \"{}\"",
                    actor.name(),
                    task.name()
                ),
                actor_abilities: actor.abilities.clone(),
                required_abilities: required,
                missing_abilities: Vec::new(),
            };
        }
    }

    let required = distinct(relevant.iter().flat_map(|task| &task.required_abilities));
    let missing: Vec<String> = required
        .iter()
        .filter(|ability| !actor.has_ability(ability))
        .cloned()
        .collect();
    ActorGoalCheck {
        can_achieve: false,
        reason: format!(
            "Actor \"{}\" cannot perform any task for goal \"{}\". Missing abilities: {}",
            actor.name(),
            goal.name(),
            missing.join(", ")
        ),
        actor_abilities: actor.abilities.clone(),
        required_abilities: required,
        missing_abilities: missing,
    }
}

/// Goals no assigned actor can currently reach, with the reason.
///
/// A goal makes the list when its assignments resolve to zero existing
/// actors (empty assignment and all-dangling assignment get distinct
/// reasons), when no task references it, or when no single assigned
/// actor fully covers any single referencing task. In the last case the
/// report aggregates the union of required abilities across referencing
/// tasks against the union of abilities across assigned actors.
/// Achievable goals are omitted.
pub fn find_unachievable_goals<'a>(
    goals: &'a [Goal],
    actors: &'a [Actor],
    tasks: &'a [Task],
    actor_filter: Option<EntityId>,
) -> Vec<GoalAchievability<'a>> {
    let mut unachievable = Vec::new();

    for goal in goals {
        if let Some(actor_id) = actor_filter {
            if !goal.is_assigned_to(actor_id) {
                continue;
            }
        }

        // Assigned actors that actually exist, in assignment order.
        let assigned: Vec<&Actor> = goal
            .assigned_to
            .iter()
            .filter_map(|id| actors.iter().find(|actor| actor.id() == *id))
            .collect();

        if assigned.is_empty() {
            let reason = if goal.assigned_to.is_empty() {
                "No actors assigned to this goal"
            } else {
                "All assigned actors are missing (gaps)"
            };
            unachievable.push(GoalAchievability {
                goal,
                is_achievable: false,
                reason: reason.to_string(),
                assigned_actors: Vec::new(),
                missing_abilities: Vec::new(),
            });
            continue;
        }

        let relevant: Vec<&Task> = tasks
            .iter()
            .filter(|task| task.contributes_to(goal.id()))
            .collect();
        if relevant.is_empty() {
            unachievable.push(GoalAchievability {
                goal,
                is_achievable: false,
                reason: format!("No tasks defined yet for goal \"{}\"", goal.name()),
                assigned_actors: assigned,
                missing_abilities: Vec::new(),
            });
            continue;
        }

        let has_capable_actor = assigned.iter().any(|actor| {
            relevant.iter().any(|task| {
                task.required_abilities
                    .iter()
                    .all(|ability| actor.has_ability(ability))
            })
        });
        if has_capable_actor {
            continue;
        }

        let required = distinct(relevant.iter().flat_map(|task| &task.required_abilities));
        let offered = distinct(assigned.iter().flat_map(|actor| &actor.abilities));
        let missing: Vec<String> = required
            .into_iter()
            .filter(|ability| !offered.contains(ability))
            .collect();
        let reason = format!(
            "None of the assigned actors can perform tasks for goal \"{}\". Missing abilities: {}",
            goal.name(),
            missing.join(", ")
        );
        unachievable.push(GoalAchievability {
            goal,
            is_achievable: false,
            reason,
            assigned_actors: assigned,
            missing_abilities: missing,
        });
    }

    unachievable
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenplay_model::Priority;

    #[test]
    fn test_unassigned_actor_fails_closed() {
        let actor = Actor::new("Maria", "").with_abilities(["place-order"]);
        let goal = Goal::new("Buy a gift", "", Priority::High);

        let check = check_actor_can_achieve_goal(&actor, &goal, &[]);
        assert!(!check.can_achieve);
        assert!(check.reason.contains("is not assigned"));
        assert!(check.required_abilities.is_empty());
    }

    #[test]
    fn test_goal_without_tasks_fails_closed() {
        let actor = Actor::new("Maria", "");
        let goal = Goal::new("Buy a gift", "", Priority::High).with_assigned_to([actor.id()]);

        let check = check_actor_can_achieve_goal(&actor, &goal, &[]);
        assert!(!check.can_achieve);
        assert!(check.reason.contains("No tasks defined yet"));
    }

    #[test]
    fn test_first_fully_covered_task_wins() {
        let actor = Actor::new("Maria", "").with_abilities(["browse-catalog"]);
        let goal = Goal::new("Buy a gift", "", Priority::High).with_assigned_to([actor.id()]);
        let heavy = Task::new("Check out", "")
            .with_required_abilities(["place-order"])
            .with_goal_ids([goal.id()]);
        let light = Task::new("Browse", "")
            .with_required_abilities(["browse-catalog"])
            .with_goal_ids([goal.id()]);

        let check = check_actor_can_achieve_goal(&actor, &goal, &[heavy, light]);
        assert!(check.can_achieve);
        assert!(check.reason.contains("can perform task \"Browse\""));
        assert_eq!(check.required_abilities, vec!["browse-catalog"]);
        assert!(check.missing_abilities.is_empty());
    }

    #[test]
    fn test_partial_coverage_reports_missing_abilities() {
        let actor = Actor::new("X", "").with_abilities(["a"]);
        let goal = Goal::new("Gx", "", Priority::Medium).with_assigned_to([actor.id()]);
        let task = Task::new("Tx", "")
            .with_required_abilities(["a", "b"])
            .with_goal_ids([goal.id()]);

        let check = check_actor_can_achieve_goal(&actor, &goal, &[task]);
        assert!(!check.can_achieve);
        assert_eq!(check.required_abilities, vec!["a", "b"]);
        assert_eq!(check.missing_abilities, vec!["b"]);
        assert!(check.reason.contains("Missing abilities: b"));
    }

    #[test]
    fn test_missing_abilities_union_spans_all_referencing_tasks() {
        let actor = Actor::new("X", "").with_abilities(["a"]);
        let goal = Goal::new("Gx", "", Priority::Medium).with_assigned_to([actor.id()]);
        let first = Task::new("T1", "")
            .with_required_abilities(["a", "b"])
            .with_goal_ids([goal.id()]);
        let second = Task::new("T2", "")
            .with_required_abilities(["b", "c"])
            .with_goal_ids([goal.id()]);

        let check = check_actor_can_achieve_goal(&actor, &goal, &[first, second]);
        assert!(!check.can_achieve);
        assert_eq!(check.required_abilities, vec!["a", "b", "c"]);
        assert_eq!(check.missing_abilities, vec!["b", "c"]);
    }

    #[test]
    fn test_empty_and_dangling_assignments_get_distinct_reasons() {
        let orphan = Goal::new("Orphan", "", Priority::Low);
        let ghost = Goal::new("Ghost", "", Priority::Low).with_assigned_to([EntityId::new()]);
        let goals = vec![orphan, ghost];

        let report = find_unachievable_goals(&goals, &[], &[], None);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].reason, "No actors assigned to this goal");
        assert_eq!(report[1].reason, "All assigned actors are missing (gaps)");
        assert!(report.iter().all(|entry| entry.assigned_actors.is_empty()));
        assert!(report.iter().all(|entry| !entry.is_achievable));
    }

    #[test]
    fn test_goal_without_tasks_is_unachievable() {
        let actor = Actor::new("Maria", "");
        let goal = Goal::new("Buy a gift", "", Priority::High).with_assigned_to([actor.id()]);
        let actors = vec![actor];
        let goals = vec![goal];

        let report = find_unachievable_goals(&goals, &actors, &[], None);
        assert_eq!(report.len(), 1);
        assert!(report[0].reason.contains("No tasks defined yet"));
        assert_eq!(report[0].assigned_actors.len(), 1);
    }

    #[test]
    fn test_union_of_actors_against_union_of_tasks() {
        // Neither actor alone covers the task, and together they still
        // lack "c".
        let first = Actor::new("A1", "").with_abilities(["a"]);
        let second = Actor::new("A2", "").with_abilities(["b"]);
        let goal = Goal::new("Gx", "", Priority::High)
            .with_assigned_to([first.id(), second.id()]);
        let task = Task::new("Tx", "")
            .with_required_abilities(["a", "b", "c"])
            .with_goal_ids([goal.id()]);
        let actors = vec![first, second];
        let goals = vec![goal];
        let tasks = vec![task];

        let report = find_unachievable_goals(&goals, &actors, &tasks, None);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].missing_abilities, vec!["c"]);
        assert_eq!(report[0].assigned_actors.len(), 2);
    }

    #[test]
    fn test_achievable_goals_are_omitted() {
        let actor = Actor::new("Maria", "").with_abilities(["place-order"]);
        let goal = Goal::new("Buy a gift", "", Priority::High).with_assigned_to([actor.id()]);
        let task = Task::new("Check out", "")
            .with_required_abilities(["place-order"])
            .with_goal_ids([goal.id()]);
        let actors = vec![actor];
        let goals = vec![goal];
        let tasks = vec![task];

        assert!(find_unachievable_goals(&goals, &actors, &tasks, None).is_empty());
    }

    #[test]
    fn test_actor_filter_restricts_checked_goals() {
        let actor = Actor::new("Maria", "");
        let mine = Goal::new("Mine", "", Priority::Low).with_assigned_to([actor.id()]);
        let other = Goal::new("Other", "", Priority::Low).with_assigned_to([EntityId::new()]);
        let actors = vec![actor.clone()];
        let goals = vec![mine, other];

        let report = find_unachievable_goals(&goals, &actors, &[], Some(actor.id()));
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].goal.name(), "Mine");
    }
}
