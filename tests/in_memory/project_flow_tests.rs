//! Projects, membership, and project removal over shared services.

use super::helpers::{Board, board};
use rstest::rstest;
use taskboard::{
    activity::domain::{ActivityAction, EntityType},
    actor::Actor,
    project::services::{CreateProjectRequest, ProjectError},
    task::{ports::TaskRepository, services::CreateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigned_employee_sees_the_project(board: Board) -> Result<(), eyre::Report> {
    let admin = Actor::admin();
    let employee = Actor::employee();
    let project = board
        .projects
        .create_project(&admin, CreateProjectRequest::new("Website relaunch"))
        .await?;
    eyre::ensure!(board.projects.list_projects(&employee).await?.is_empty());

    board
        .lifecycle
        .create_task(
            &admin,
            CreateTaskRequest::new(project.id(), "Wireframes").with_assignees([employee.id()]),
        )
        .await?;

    let visible = board.projects.list_projects(&employee).await?;
    eyre::ensure!(visible.iter().map(|listed| listed.id()).eq([project.id()]));
    let overview = board.projects.project_overview(project.id()).await?;
    eyre::ensure!(overview.members == vec![employee.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_removes_its_tasks(board: Board) -> Result<(), eyre::Report> {
    let admin = Actor::admin();
    let project = board
        .projects
        .create_project(&admin, CreateProjectRequest::new("Short lived"))
        .await?;
    let task = board
        .lifecycle
        .create_task(&admin, CreateTaskRequest::new(project.id(), "Doomed"))
        .await?;
    board
        .lifecycle
        .add_comment(&Actor::tester(), task.id(), "still reproducible")
        .await?;

    board.projects.delete_project(&admin, project.id()).await?;

    eyre::ensure!(board.tasks.find_by_id(task.id()).await?.is_none());
    eyre::ensure!(board.lifecycle.comments(task.id()).await?.is_empty());
    let gone = board.projects.project_overview(project.id()).await;
    eyre::ensure!(matches!(gone, Err(ProjectError::NotFound(_))));

    let feed = board.feed.recent().await?;
    let latest = feed.first().ok_or_else(|| eyre::eyre!("feed is empty"))?;
    eyre::ensure!(latest.action() == ActivityAction::DeletedProject);
    eyre::ensure!(latest.entity_type() == EntityType::Project);
    eyre::ensure!(latest.details()["removed_tasks"] == 1);
    Ok(())
}
