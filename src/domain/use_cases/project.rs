use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::{
    entities::project::{CleanupReport, Project, ProjectRequest},
    errors::AppError,
    repositories::project::ProjectRepository,
    use_cases::seed::{self, SeedOutcome},
};

#[derive(Clone)]
pub struct ProjectHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
}

impl ProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        ProjectHandler { project_repo }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await
    }

    pub async fn list_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_featured_projects().await
    }

    pub async fn list_projects_by_category(&self, category: &str) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects_by_category(category).await
    }

    pub async fn list_project_categories(&self) -> Result<Vec<String>, AppError> {
        self.project_repo.list_project_categories().await
    }

    pub async fn get_project_by_id(&self, id: i64) -> Result<Project, AppError> {
        self.project_repo.get_project_by_id(id).await
    }

    /// Validates and stores a new project, stamping both timestamps with today
    pub async fn create_project(&self, request: ProjectRequest) -> Result<Project, AppError> {
        request.validate()?;

        let created = self.project_repo.create_project(&request.prepare_for_insert()).await?;
        info!(project_id = created.id, "Project created");

        Ok(created)
    }

    /// Replaces every field of project `id`; `createdAt` is kept
    pub async fn update_project(&self, id: i64, request: ProjectRequest) -> Result<Project, AppError> {
        request.validate()?;

        let updated = self.project_repo.update_project(id, &request.prepare_for_update()).await?;
        info!(project_id = id, "Project updated");

        Ok(updated)
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        self.project_repo.delete_project(id).await?;
        info!(project_id = id, "Project deleted");

        Ok(())
    }

    pub async fn count_projects(&self) -> Result<i64, AppError> {
        self.project_repo.count_projects().await
    }

    /// Removes every project whose title repeats an earlier (lower id) one
    pub async fn cleanup_duplicates(&self) -> Result<CleanupReport, AppError> {
        let report = self.project_repo.remove_duplicate_projects().await?;
        info!(
            before = report.before,
            removed = report.removed,
            after = report.after,
            "Duplicate projects removed"
        );

        Ok(report)
    }

    /// Deletes all projects. The sample set comes back on the next seeded startup.
    pub async fn reset_projects(&self) -> Result<u64, AppError> {
        let removed = self.project_repo.delete_all_projects().await?;
        info!(removed, "All projects deleted");

        Ok(removed)
    }

    pub async fn seed_projects(&self) -> Result<SeedOutcome, AppError> {
        seed::seed_projects_if_empty(self.project_repo.as_ref()).await
    }
}
