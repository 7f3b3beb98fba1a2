use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::validation::{not_blank, MAX_TEXT_LEN};

pub const MIN_LEVEL: i32 = 0;
pub const MAX_LEVEL: i32 = 100;
pub const MAX_COLOR_LEN: u64 = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub category: String,
    pub icon: String,
    pub color: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillInsert {
    pub name: String,
    pub level: i32,
    pub category: String,
    pub icon: String,
    pub color: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

/// Body of `POST /skills` and `PUT /skills/{id}`. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SkillRequest {
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = MAX_TEXT_LEN, message = "Name must be at most 255 characters")
    )]
    pub name: String,

    #[validate(range(min = MIN_LEVEL, max = MAX_LEVEL, message = "Level must be between 0 and 100"))]
    pub level: i32,

    #[validate(
        custom(function = "not_blank", message = "Category is required"),
        length(max = MAX_TEXT_LEN, message = "Category must be at most 255 characters")
    )]
    pub category: String,

    #[validate(
        custom(function = "not_blank", message = "Icon is required"),
        length(max = MAX_TEXT_LEN, message = "Icon must be at most 255 characters")
    )]
    pub icon: String,

    #[validate(
        custom(function = "not_blank", message = "Color is required"),
        length(max = MAX_COLOR_LEN, message = "Color must be at most 64 characters")
    )]
    pub color: String,
}

impl SkillRequest {
    pub fn new(name: &str, level: i32, category: &str, icon: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            level,
            category: category.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }

    pub fn prepare_for_insert(&self) -> SkillInsert {
        let today = Utc::now().date_naive();
        SkillInsert {
            name: self.name.clone(),
            level: self.level,
            category: self.category.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
            created_at: today,
            updated_at: today,
        }
    }

    pub fn prepare_for_update(&self) -> SkillInsert {
        self.prepare_for_insert()
    }
}
