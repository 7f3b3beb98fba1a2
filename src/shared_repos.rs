use crate::repositories::sqlx_repo::{SqlxContactRepo, SqlxProjectRepo, SqlxSkillRepo};


#[derive(Clone)]
pub struct SharedRepositories {
    pub project_repo: SqlxProjectRepo,
    pub skill_repo: SqlxSkillRepo,
    pub contact_repo: SqlxContactRepo,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let project_repo = SqlxProjectRepo::new(pool.clone());
        let skill_repo = SqlxSkillRepo::new(pool.clone());
        let contact_repo = SqlxContactRepo::new(pool);

        SharedRepositories {
            project_repo,
            skill_repo,
            contact_repo,
        }
    }
}
