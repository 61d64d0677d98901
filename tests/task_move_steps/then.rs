//! Then steps for board move BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::{
    activity::domain::{ActivityAction, ActivityLogEntry},
    task::{domain::TaskStatus, ports::TaskRepository},
};

fn moves(world: &BoardWorld) -> Result<Vec<ActivityLogEntry>, eyre::Report> {
    Ok(world
        .activity
        .entries()?
        .into_iter()
        .filter(|entry| entry.action() == ActivityAction::MovedTask)
        .collect())
}

#[then("the move succeeds")]
fn move_succeeds(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_move.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected the move to succeed, got {err}")),
        None => Err(eyre::eyre!("no move was attempted")),
    }
}

#[then(r#"the move is denied with "{code}""#)]
fn move_denied(world: &BoardWorld, code: String) -> Result<(), eyre::Report> {
    let result = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no move was attempted"))?;
    let reason = result
        .as_ref()
        .err()
        .and_then(|err| err.denial_reason())
        .ok_or_else(|| eyre::eyre!("expected a denial, got {result:?}"))?;
    eyre::ensure!(
        reason.code() == code,
        "expected denial {code}, got {}",
        reason.code()
    );
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &BoardWorld, status: String) -> Result<(), eyre::Report> {
    let expected =
        TaskStatus::try_from(status.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let task_id = world.task()?.id();
    let stored = run_async(world.tasks.find_by_id(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} disappeared"))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then(r#"one "{action}" entry is recorded with previous status "{status}""#)]
fn one_move_recorded(world: &BoardWorld, action: String, status: String) -> Result<(), eyre::Report> {
    let expected_action =
        ActivityAction::try_from(action.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let recorded = moves(world)?;
    eyre::ensure!(recorded.len() == 1, "expected one move, found {}", recorded.len());
    let entry = recorded
        .first()
        .ok_or_else(|| eyre::eyre!("missing move entry"))?;
    eyre::ensure!(entry.action() == expected_action);
    eyre::ensure!(
        entry.details()["previous_status"] == status.as_str(),
        "unexpected details {}",
        entry.details()
    );
    Ok(())
}

#[then("no move is recorded")]
fn no_move_recorded(world: &BoardWorld) -> Result<(), eyre::Report> {
    let recorded = moves(world)?;
    eyre::ensure!(recorded.is_empty(), "expected no moves, found {}", recorded.len());
    Ok(())
}
