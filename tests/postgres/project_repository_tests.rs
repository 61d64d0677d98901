//! `PostgresProjectRepository` against a migrated database.

use super::helpers::{BoxError, fresh_database, project_at, test_runtime};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use taskboard::{
    actor::UserId,
    project::{
        adapters::postgres::PostgresProjectRepository,
        domain::{Project, ProjectEdit, ProjectId, ProjectStatus},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectScope},
    },
};

fn ids(projects: &[Project]) -> Vec<ProjectId> {
    projects.iter().map(Project::id).collect()
}

#[rstest]
fn stored_project_round_trips_and_rejects_duplicates(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    let (_guard, pool) = fresh_database(shared_test_cluster, "project_store")?;
    let repo = PostgresProjectRepository::new(pool);
    let rt = test_runtime()?;

    rt.block_on(async {
        let project = project_at("Round trip", 0)?;
        repo.store(&project).await?;

        assert_eq!(repo.find_by_id(project.id()).await?, Some(project.clone()));
        let again = repo.store(&project).await;
        assert!(matches!(
            again,
            Err(ProjectRepositoryError::DuplicateProject(id)) if id == project.id()
        ));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn member_scope_lists_newest_first(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    let (_guard, pool) = fresh_database(shared_test_cluster, "project_scope")?;
    let repo = PostgresProjectRepository::new(pool);
    let rt = test_runtime()?;

    rt.block_on(async {
        let alice = UserId::new();
        let oldest = project_at("Oldest", 0)?;
        let middle = project_at("Middle", 5)?;
        let newest = project_at("Newest", 10)?;
        for project in [&middle, &newest, &oldest] {
            repo.store(project).await?;
        }
        repo.add_members(oldest.id(), &[alice]).await?;
        repo.add_members(newest.id(), &[alice]).await?;

        let everything = repo.list(ProjectScope::All).await?;
        let mine = repo.list(ProjectScope::MemberOf(alice)).await?;

        assert_eq!(
            ids(&everything),
            vec![newest.id(), middle.id(), oldest.id()]
        );
        assert_eq!(ids(&mine), vec![newest.id(), oldest.id()]);
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn members_keep_join_order_and_ignore_repeats(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    let (_guard, pool) = fresh_database(shared_test_cluster, "project_members")?;
    let repo = PostgresProjectRepository::new(pool);
    let rt = test_runtime()?;

    rt.block_on(async {
        let (alice, bob, carol) = (UserId::new(), UserId::new(), UserId::new());
        let project = project_at("Team", 0)?;
        repo.store(&project).await?;

        assert_eq!(repo.add_members(project.id(), &[bob, alice]).await?, 2);
        assert_eq!(repo.add_members(project.id(), &[alice, carol]).await?, 1);
        assert_eq!(repo.add_members(project.id(), &[]).await?, 0);
        assert_eq!(repo.members(project.id()).await?, vec![bob, alice, carol]);
        assert!(repo.is_member(project.id(), carol).await?);

        let missing = ProjectId::new();
        let result = repo.add_members(missing, &[alice]).await;
        assert!(matches!(result, Err(ProjectRepositoryError::NotFound(id)) if id == missing));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn update_and_delete_report_missing_projects(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    let (_guard, pool) = fresh_database(shared_test_cluster, "project_update_delete")?;
    let repo = PostgresProjectRepository::new(pool);
    let rt = test_runtime()?;

    rt.block_on(async {
        let alice = UserId::new();
        let mut project = project_at("Closing", 0)?;
        repo.store(&project).await?;
        repo.add_members(project.id(), &[alice]).await?;

        project.apply_edit(
            ProjectEdit {
                status: Some(ProjectStatus::Completed),
                description: Some("wrapped up".to_owned()),
                ..ProjectEdit::default()
            },
            &DefaultClock,
        )?;
        repo.update(&project).await?;
        let stored = repo
            .find_by_id(project.id())
            .await?
            .ok_or("project disappeared")?;
        assert_eq!(stored.status(), ProjectStatus::Completed);
        assert_eq!(stored.description(), Some("wrapped up"));

        let removed = repo.delete(project.id()).await?;
        assert_eq!(removed.id(), project.id());
        assert!(repo.members(project.id()).await?.is_empty());
        assert!(matches!(
            repo.update(&project).await,
            Err(ProjectRepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(project.id()).await,
            Err(ProjectRepositoryError::NotFound(_))
        ));
        Ok::<(), BoxError>(())
    })
}
