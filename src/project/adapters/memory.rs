//! In-memory project repository.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::actor::UserId;
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult, ProjectScope},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    members: HashMap<ProjectId, Vec<UserId>>,
}

impl InMemoryProjectState {
    fn is_member(&self, id: ProjectId, user_id: UserId) -> bool {
        self.members
            .get(&id)
            .is_some_and(|users| users.contains(&user_id))
    }
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ProjectRepositoryResult<RwLockReadGuard<'_, InMemoryProjectState>> {
        self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ProjectRepositoryResult<RwLockWriteGuard<'_, InMemoryProjectState>> {
        self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .projects
            .get_mut(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        *stored = project.clone();
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<Project> {
        let mut state = self.write()?;
        let removed = state
            .projects
            .remove(&id)
            .ok_or(ProjectRepositoryError::NotFound(id))?;
        state.members.remove(&id);
        Ok(removed)
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list(&self, scope: ProjectScope) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read()?;
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|project| match scope {
                ProjectScope::All => true,
                ProjectScope::MemberOf(user_id) => state.is_member(project.id(), user_id),
            })
            .cloned()
            .collect();
        projects.sort_by_key(|project| (Reverse(project.created_at()), project.id().into_inner()));
        Ok(projects)
    }

    async fn add_members(
        &self,
        id: ProjectId,
        users: &[UserId],
    ) -> ProjectRepositoryResult<usize> {
        let mut state = self.write()?;
        if !state.projects.contains_key(&id) {
            return Err(ProjectRepositoryError::NotFound(id));
        }
        let members = state.members.entry(id).or_default();
        let before = members.len();
        for user_id in users {
            if !members.contains(user_id) {
                members.push(*user_id);
            }
        }
        Ok(members.len().saturating_sub(before))
    }

    async fn is_member(&self, id: ProjectId, user_id: UserId) -> ProjectRepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.is_member(id, user_id))
    }

    async fn members(&self, id: ProjectId) -> ProjectRepositoryResult<Vec<UserId>> {
        let state = self.read()?;
        Ok(state.members.get(&id).cloned().unwrap_or_default())
    }
}
