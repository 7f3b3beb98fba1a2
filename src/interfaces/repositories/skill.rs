use std::borrow::Cow;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    entities::{
        seed::SeedOutcome,
        skill::{Skill, SkillInsert},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxSkillRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn create_skill(&self, skill: &SkillInsert) -> Result<Skill, AppError>;
    /// Inserts `skills` only when the table is empty, under a table lock
    async fn seed_skills(&self, skills: &[SkillInsert]) -> Result<SeedOutcome, AppError>;
    async fn get_skill_by_id(&self, id: i64) -> Result<Skill, AppError>;
    /// All skills, highest `level` first
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError>;
    /// Skills in one category, highest `level` first
    async fn list_skills_by_category(&self, category: &str) -> Result<Vec<Skill>, AppError>;
    async fn list_skill_categories(&self) -> Result<Vec<String>, AppError>;
    async fn update_skill(&self, id: i64, skill: &SkillInsert) -> Result<Skill, AppError>;
    async fn delete_skill(&self, id: i64) -> Result<(), AppError>;
    async fn count_skills(&self) -> Result<i64, AppError>;
}

impl SqlxSkillRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

fn map_name_conflict(e: sqlx::Error, name: &str) -> AppError {
    match e {
        sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
            AppError::Conflict(format!("Skill '{}' already exists", name))
        }
        _ => AppError::from(e),
    }
}

async fn insert_skill(tx: &mut Transaction<'_, Postgres>, skill: &SkillInsert) -> Result<Skill, AppError> {
    sqlx::query_as(
        r#"
        INSERT INTO skills (name, level, category, icon, color, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&skill.name)
    .bind(skill.level)
    .bind(&skill.category)
    .bind(&skill.icon)
    .bind(&skill.color)
    .bind(skill.created_at)
    .bind(skill.updated_at)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| map_name_conflict(e, &skill.name))
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn create_skill(&self, skill: &SkillInsert) -> Result<Skill, AppError> {
        let mut tx = self.pool.begin().await?;
        let created = insert_skill(&mut tx, skill).await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn seed_skills(&self, skills: &[SkillInsert]) -> Result<SeedOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("LOCK TABLE skills IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM skills")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tx.rollback().await?;
            return Ok(SeedOutcome::Skipped(existing));
        }

        for skill in skills {
            insert_skill(&mut tx, skill).await?;
        }

        tx.commit().await?;
        Ok(SeedOutcome::Seeded(skills.len()))
    }

    async fn get_skill_by_id(&self, id: i64) -> Result<Skill, AppError> {
        sqlx::query_as("SELECT * FROM skills WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Skill {}", id)))
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as("SELECT * FROM skills ORDER BY level DESC, id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(skills)
    }

    async fn list_skills_by_category(&self, category: &str) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as(
            "SELECT * FROM skills WHERE category = $1 ORDER BY level DESC, id ASC",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    async fn list_skill_categories(&self) -> Result<Vec<String>, AppError> {
        let categories: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT category FROM skills ORDER BY category")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    async fn update_skill(&self, id: i64, skill: &SkillInsert) -> Result<Skill, AppError> {
        sqlx::query_as(
            r#"
            UPDATE skills SET
                name = $1,
                level = $2,
                category = $3,
                icon = $4,
                color = $5,
                updated_at = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&skill.name)
        .bind(skill.level)
        .bind(&skill.category)
        .bind(&skill.icon)
        .bind(&skill.color)
        .bind(skill.updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, &skill.name))?
        .ok_or_else(|| AppError::NotFound(format!("Skill {}", id)))
    }

    async fn delete_skill(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Skill {}", id)));
        }

        Ok(())
    }

    async fn count_skills(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM skills")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
