//! A task's full journey across the board.

use super::helpers::{Board, board};
use rstest::rstest;
use taskboard::{
    activity::domain::ActivityAction,
    actor::Actor,
    task::{
        domain::TaskStatus,
        services::{CreateTaskRequest, MoveTaskError, MoveTaskRequest},
    },
    workflow::DenialReason,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_travels_from_todo_to_done(board: Board) -> Result<(), eyre::Report> {
    let project = board.project().await?;
    let admin = Actor::admin();
    let employee = Actor::employee();
    let tester = Actor::tester();

    let task = board
        .lifecycle
        .create_task(
            &admin,
            CreateTaskRequest::new(project, "Export CSV").with_assignees([employee.id()]),
        )
        .await?;

    for target in ["in-progress", "review"] {
        board
            .workflow
            .move_task(&employee, MoveTaskRequest::new(task.id(), target))
            .await?;
    }

    let rejected = board
        .workflow
        .move_task(&tester, MoveTaskRequest::new(task.id(), "todo"))
        .await;
    eyre::ensure!(matches!(
        rejected,
        Err(MoveTaskError::Denied {
            reason: DenialReason::InvalidTransitionForRole,
            ..
        })
    ));

    let done = board
        .workflow
        .move_task(&tester, MoveTaskRequest::new(task.id(), "done"))
        .await?;
    eyre::ensure!(done.status() == TaskStatus::Done);

    let stuck = board
        .workflow
        .move_task(&employee, MoveTaskRequest::new(task.id(), "review"))
        .await;
    eyre::ensure!(
        stuck.as_ref().err().and_then(MoveTaskError::denial_reason)
            == Some(DenialReason::InvalidTransitionForRole),
        "done is terminal for employees"
    );

    let actions: Vec<_> = board
        .activity
        .entries()?
        .iter()
        .map(|entry| entry.action())
        .collect();
    eyre::ensure!(
        actions
            == vec![
                ActivityAction::CreatedTask,
                ActivityAction::MovedTask,
                ActivityAction::MovedTask,
                ActivityAction::MovedTask,
            ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_tester_moves_send_work_back(board: Board) -> Result<(), eyre::Report> {
    let project = board.project().await?;
    let admin = Actor::admin();
    let tester = Actor::tester();
    let task = board
        .lifecycle
        .create_task(
            &admin,
            CreateTaskRequest::new(project, "Flaky test").with_status("review"),
        )
        .await?;

    let options = board.workflow.move_options(&tester, task.id()).await?;
    eyre::ensure!(options == vec![TaskStatus::InProgress, TaskStatus::Done]);

    let reopened = board
        .workflow
        .move_task(&tester, MoveTaskRequest::new(task.id(), "in-progress"))
        .await?;
    eyre::ensure!(reopened.status() == TaskStatus::InProgress);

    let queue = board.lifecycle.my_tasks(&tester).await?;
    eyre::ensure!(queue.is_empty(), "nothing left awaiting review");
    Ok(())
}
