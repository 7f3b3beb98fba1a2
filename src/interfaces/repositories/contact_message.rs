use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::contact_message::{ContactMessage, ContactMessageInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact_message(&self, msg: &ContactMessageInsert) -> Result<ContactMessage, AppError>;
    async fn get_contact_message_by_id(&self, id: i64) -> Result<ContactMessage, AppError>;
    /// Newest first
    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError>;
    /// Unread only, newest first
    async fn list_unread_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError>;
    async fn count_unread_contact_messages(&self) -> Result<i64, AppError>;
    async fn mark_contact_message_read(&self, id: i64) -> Result<ContactMessage, AppError>;
    async fn delete_contact_message(&self, id: i64) -> Result<(), AppError>;
}

impl SqlxContactRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_contact_message(&self, msg: &ContactMessageInsert) -> Result<ContactMessage, AppError> {
        let saved = sqlx::query_as(
            r#"
            INSERT INTO contact_messages (name, email, subject, message, is_read, created_at)
            VALUES ($1, $2, $3, $4, FALSE, $5)
            RETURNING *
            "#,
        )
        .bind(&msg.name)
        .bind(&msg.email)
        .bind(&msg.subject)
        .bind(&msg.message)
        .bind(msg.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn get_contact_message_by_id(&self, id: i64) -> Result<ContactMessage, AppError> {
        sqlx::query_as("SELECT * FROM contact_messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contact message {}", id)))
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        let messages = sqlx::query_as("SELECT * FROM contact_messages ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(messages)
    }

    async fn list_unread_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        let messages = sqlx::query_as(
            "SELECT * FROM contact_messages WHERE is_read = FALSE ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn count_unread_contact_messages(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE is_read = FALSE")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn mark_contact_message_read(&self, id: i64) -> Result<ContactMessage, AppError> {
        sqlx::query_as("UPDATE contact_messages SET is_read = TRUE WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contact message {}", id)))
    }

    async fn delete_contact_message(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| {
                if result.rows_affected() == 0 {
                    Err(AppError::NotFound(format!("Contact message {}", id)))
                } else {
                    Ok(())
                }
            })?
    }
}
