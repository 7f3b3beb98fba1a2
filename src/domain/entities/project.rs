use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::validation::{not_blank, technologies_fit, MAX_TEXT_LEN, MAX_URL_LEN};

// ───── Database Models ───────────────────────────────────────────────

/// A `projects` row. Technologies live in `project_technologies`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub image_url: Option<String>,
    pub github_url: String,
    pub live_url: Option<String>,
    pub featured: bool,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub technologies: Vec<String>,
    pub image_url: Option<String>,
    pub github_url: String,
    pub live_url: Option<String>,
    pub featured: bool,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub technologies: Vec<String>,
    pub image_url: Option<String>,
    pub github_url: String,
    pub live_url: Option<String>,
    pub featured: bool,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

impl Project {
    pub fn from_row(row: ProjectRow, technologies: Vec<String>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            long_description: row.long_description,
            technologies,
            image_url: row.image_url,
            github_url: row.github_url,
            live_url: row.live_url,
            featured: row.featured,
            category: row.category,
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Outcome of the duplicate-title cleanup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    pub before: i64,
    pub removed: u64,
    pub after: i64,
}

// ───── Input & Validation ───────────────────────────────────────────

/// Body of `POST /projects` and `PUT /projects/{id}`.
///
/// Updates replace every column: an omitted `imageUrl`, `liveUrl` or
/// `technologies` clears the stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = MAX_TEXT_LEN, message = "Title must be at most 255 characters")
    )]
    pub title: String,

    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,

    #[validate(custom(function = "not_blank", message = "Long description is required"))]
    pub long_description: String,

    #[serde(default)]
    #[validate(custom(function = "technologies_fit"))]
    pub technologies: Vec<String>,

    #[serde(default)]
    #[validate(length(max = MAX_URL_LEN, message = "Image URL must be at most 1024 characters"))]
    pub image_url: Option<String>,

    #[validate(
        custom(function = "not_blank", message = "GitHub URL is required"),
        length(max = MAX_URL_LEN, message = "GitHub URL must be at most 1024 characters")
    )]
    pub github_url: String,

    #[serde(default)]
    #[validate(length(max = MAX_URL_LEN, message = "Live URL must be at most 1024 characters"))]
    pub live_url: Option<String>,

    pub featured: bool,

    #[validate(
        custom(function = "not_blank", message = "Category is required"),
        length(max = MAX_TEXT_LEN, message = "Category must be at most 255 characters")
    )]
    pub category: String,

    pub date: NaiveDate,
}

// ───── Insert Preparation Logic ─────────────────────────────────────

impl ProjectRequest {
    pub fn prepare_for_insert(&self) -> ProjectInsert {
        let today = Utc::now().date_naive();
        ProjectInsert {
            title: self.title.clone(),
            description: self.description.clone(),
            long_description: self.long_description.clone(),
            technologies: self.technologies.clone(),
            image_url: self.image_url.clone(),
            github_url: self.github_url.clone(),
            live_url: self.live_url.clone(),
            featured: self.featured,
            category: self.category.clone(),
            date: self.date,
            created_at: today,
            updated_at: today,
        }
    }

    /// `created_at` is carried along but never written by an update.
    pub fn prepare_for_update(&self) -> ProjectInsert {
        self.prepare_for_insert()
    }
}
