//! Recent-activity feed over service traffic.

use super::helpers::{Board, board};
use rstest::rstest;
use taskboard::{
    activity::domain::ActivityAction,
    actor::Actor,
    task::services::{CreateTaskRequest, MoveTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_shows_latest_actions_first(board: Board) -> Result<(), eyre::Report> {
    let project = board.project().await?;
    let admin = Actor::admin();
    let task = board
        .lifecycle
        .create_task(&admin, CreateTaskRequest::new(project, "Feed me"))
        .await?;
    board
        .workflow
        .move_task(&admin, MoveTaskRequest::new(task.id(), "done"))
        .await?;
    board.lifecycle.delete_task(&admin, task.id()).await?;

    let feed = board.feed.recent().await?;
    let actions: Vec<_> = feed.iter().map(|entry| entry.action()).collect();

    eyre::ensure!(
        actions
            == vec![
                ActivityAction::DeletedTask,
                ActivityAction::MovedTask,
                ActivityAction::CreatedTask,
            ]
    );
    eyre::ensure!(feed.iter().all(|entry| entry.actor() == admin.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_is_limited_to_fifty_entries(board: Board) -> Result<(), eyre::Report> {
    let admin = Actor::admin();
    let project = board.project().await?;
    for index in 0..55 {
        board
            .lifecycle
            .create_task(&admin, CreateTaskRequest::new(project, format!("Task {index}")))
            .await?;
    }

    let feed = board.feed.recent().await?;

    eyre::ensure!(feed.len() == 50);
    eyre::ensure!(feed.first().map(|entry| entry.details()["title"].clone())
        == Some(serde_json::json!("Task 54")));
    Ok(())
}
