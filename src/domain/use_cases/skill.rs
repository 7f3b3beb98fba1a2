use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::{
    entities::skill::{Skill, SkillRequest},
    errors::AppError,
    repositories::skill::SkillRepository,
};

#[derive(Clone)]
pub struct SkillHandler {
    pub skill_repo: Arc<dyn SkillRepository>,
}

impl SkillHandler {
    pub fn new(skill_repo: Arc<dyn SkillRepository>) -> Self {
        SkillHandler { skill_repo }
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.skill_repo.list_skills().await
    }

    pub async fn list_skills_by_category(&self, category: &str) -> Result<Vec<Skill>, AppError> {
        self.skill_repo.list_skills_by_category(category).await
    }

    pub async fn list_skill_categories(&self) -> Result<Vec<String>, AppError> {
        self.skill_repo.list_skill_categories().await
    }

    pub async fn get_skill_by_id(&self, id: i64) -> Result<Skill, AppError> {
        self.skill_repo.get_skill_by_id(id).await
    }

    /// Validates and stores a new skill. A duplicate name is a conflict.
    pub async fn create_skill(&self, request: SkillRequest) -> Result<Skill, AppError> {
        request.validate()?;

        let created = self.skill_repo.create_skill(&request.prepare_for_insert()).await?;
        info!(skill_id = created.id, name = %created.name, "Skill created");

        Ok(created)
    }

    pub async fn update_skill(&self, id: i64, request: SkillRequest) -> Result<Skill, AppError> {
        request.validate()?;

        let updated = self.skill_repo.update_skill(id, &request.prepare_for_update()).await?;
        info!(skill_id = id, "Skill updated");

        Ok(updated)
    }

    pub async fn delete_skill(&self, id: i64) -> Result<(), AppError> {
        self.skill_repo.delete_skill(id).await?;
        info!(skill_id = id, "Skill deleted");

        Ok(())
    }
}
