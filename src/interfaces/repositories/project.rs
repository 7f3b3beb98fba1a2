use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres, Transaction};

use crate::{
    entities::{
        project::{CleanupReport, Project, ProjectInsert, ProjectRow},
        seed::SeedOutcome,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Inserts a project and its technologies, returning the stored record
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;

    /// Inserts `projects` only when the table is empty. The check and the
    /// inserts hold a table lock, so concurrent callers seed at most once.
    async fn seed_projects(&self, projects: &[ProjectInsert]) -> Result<SeedOutcome, AppError>;

    async fn get_project_by_id(&self, id: i64) -> Result<Project, AppError>;

    /// All projects, newest `date` first
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;

    /// Featured projects, newest `date` first
    async fn list_featured_projects(&self) -> Result<Vec<Project>, AppError>;

    /// Projects in one category, newest `date` first
    async fn list_projects_by_category(&self, category: &str) -> Result<Vec<Project>, AppError>;

    /// Distinct categories in ascending order
    async fn list_project_categories(&self) -> Result<Vec<String>, AppError>;

    /// Replaces every column of an existing project
    async fn update_project(&self, id: i64, project: &ProjectInsert) -> Result<Project, AppError>;

    async fn delete_project(&self, id: i64) -> Result<(), AppError>;

    async fn count_projects(&self) -> Result<i64, AppError>;

    /// Keeps the lowest id of every group of projects sharing a title
    async fn remove_duplicate_projects(&self) -> Result<CleanupReport, AppError>;

    /// Deletes every project, returning how many rows went away
    async fn delete_all_projects(&self) -> Result<u64, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

/// Loads the ordered technologies of `rows` and assembles full projects,
/// preserving the order of `rows`.
async fn attach_technologies<'e, E>(executor: E, rows: Vec<ProjectRow>) -> Result<Vec<Project>, AppError>
where
    E: Executor<'e, Database = Postgres>,
{
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

    let pairs: Vec<(i64, String)> = sqlx::query_as(
        r#"
        SELECT project_id, technology
        FROM project_technologies
        WHERE project_id = ANY($1)
        ORDER BY project_id, position
        "#,
    )
    .bind(&ids)
    .fetch_all(executor)
    .await?;

    let mut by_project: HashMap<i64, Vec<String>> = HashMap::new();
    for (project_id, technology) in pairs {
        by_project.entry(project_id).or_default().push(technology);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let technologies = by_project.remove(&row.id).unwrap_or_default();
            Project::from_row(row, technologies)
        })
        .collect())
}

async fn replace_technologies(
    tx: &mut Transaction<'_, Postgres>,
    project_id: i64,
    technologies: &[String],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM project_technologies WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut **tx)
        .await?;

    if technologies.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO project_technologies (project_id, position, technology)
        SELECT $1, (t.ord - 1)::INTEGER, t.technology
        FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS t(technology, ord)
        "#,
    )
    .bind(project_id)
    .bind(technologies)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_project(
    tx: &mut Transaction<'_, Postgres>,
    project: &ProjectInsert,
) -> Result<Project, AppError> {
    let row: ProjectRow = sqlx::query_as(
        r#"
        INSERT INTO projects (
            title, description, long_description, image_url, github_url,
            live_url, featured, category, date, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.long_description)
    .bind(&project.image_url)
    .bind(&project.github_url)
    .bind(&project.live_url)
    .bind(project.featured)
    .bind(&project.category)
    .bind(project.date)
    .bind(project.created_at)
    .bind(project.updated_at)
    .fetch_one(&mut **tx)
    .await?;

    replace_technologies(tx, row.id, &project.technologies).await?;

    Ok(Project::from_row(row, project.technologies.clone()))
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let mut tx = self.pool.begin().await?;
        let created = insert_project(&mut tx, project).await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn seed_projects(&self, projects: &[ProjectInsert]) -> Result<SeedOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // Conflicts with itself, so a second seeder waits here until the first commits
        sqlx::query("LOCK TABLE projects IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tx.rollback().await?;
            return Ok(SeedOutcome::Skipped(existing));
        }

        for project in projects {
            insert_project(&mut tx, project).await?;
        }

        tx.commit().await?;
        Ok(SeedOutcome::Seeded(projects.len()))
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Project, AppError> {
        let row: ProjectRow = sqlx::query_as("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", id)))?;

        attach_technologies(&self.pool, vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("Project {}", id)))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let rows: Vec<ProjectRow> = sqlx::query_as("SELECT * FROM projects ORDER BY date DESC, id ASC")
            .fetch_all(&self.pool)
            .await?;

        attach_technologies(&self.pool, rows).await
    }

    async fn list_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT * FROM projects WHERE featured = TRUE ORDER BY date DESC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        attach_technologies(&self.pool, rows).await
    }

    async fn list_projects_by_category(&self, category: &str) -> Result<Vec<Project>, AppError> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT * FROM projects WHERE category = $1 ORDER BY date DESC, id ASC",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        attach_technologies(&self.pool, rows).await
    }

    async fn list_project_categories(&self) -> Result<Vec<String>, AppError> {
        let categories: Vec<String> = sqlx::query_scalar("SELECT DISTINCT category FROM projects ORDER BY category")
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }

    async fn update_project(&self, id: i64, project: &ProjectInsert) -> Result<Project, AppError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<ProjectRow> = sqlx::query_as(
            r#"
            UPDATE projects SET
                title = $1,
                description = $2,
                long_description = $3,
                image_url = $4,
                github_url = $5,
                live_url = $6,
                featured = $7,
                category = $8,
                date = $9,
                updated_at = $10
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.long_description)
        .bind(&project.image_url)
        .bind(&project.github_url)
        .bind(&project.live_url)
        .bind(project.featured)
        .bind(&project.category)
        .bind(project.date)
        .bind(project.updated_at)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping `tx` on this path rolls back
        let row = row.ok_or_else(|| AppError::NotFound(format!("Project {}", id)))?;

        replace_technologies(&mut tx, id, &project.technologies).await?;
        tx.commit().await?;

        Ok(Project::from_row(row, project.technologies.clone()))
    }

    async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| {
                if result.rows_affected() == 0 {
                    Err(AppError::NotFound(format!("Project {}", id)))
                } else {
                    Ok(())
                }
            })?
    }

    async fn count_projects(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn remove_duplicate_projects(&self) -> Result<CleanupReport, AppError> {
        let mut tx = self.pool.begin().await?;

        let before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&mut *tx)
            .await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM projects p1
            USING projects p2
            WHERE p1.title = p2.title
              AND p1.id > p2.id
            "#,
        )
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(CleanupReport { before, removed, after })
    }

    async fn delete_all_projects(&self) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        // project_technologies rows go with their parent via ON DELETE CASCADE
        let removed = sqlx::query("DELETE FROM projects")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(removed)
    }
}
