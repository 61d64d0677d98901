//! When steps for board move BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::{actor::Role, task::services::MoveTaskRequest};

#[when(r#"the {role} moves the task to "{status}""#)]
fn move_task(world: &mut BoardWorld, role: String, status: String) -> Result<(), eyre::Report> {
    let actor = world
        .actor
        .ok_or_else(|| eyre::eyre!("missing actor in scenario world"))?;
    let expected_role =
        Role::try_from(role.as_str()).map_err(|err| eyre::eyre!("invalid role: {err}"))?;
    eyre::ensure!(
        actor.role() == expected_role,
        "scenario actor is a {}, not a {expected_role}",
        actor.role()
    );

    let task_id = world.task()?.id();
    let result = run_async(
        world
            .workflow
            .move_task(&actor, MoveTaskRequest::new(task_id, status)),
    );
    if let Ok(moved) = &result {
        world.task = Some(moved.clone());
    }
    world.last_move = Some(result);
    Ok(())
}
