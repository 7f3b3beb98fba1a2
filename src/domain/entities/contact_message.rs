use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::validation::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessageInsert {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /contact/send`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 255, message = "Name is too long")
    )]
    pub name: String,

    #[validate(
        email(message = "A valid email address is required"),
        length(max = 255, message = "Email is too long")
    )]
    pub email: String,

    #[validate(
        custom(function = "not_blank", message = "Subject is required"),
        length(max = 255, message = "Subject is too long")
    )]
    pub subject: String,

    #[validate(
        custom(function = "not_blank", message = "Message is required"),
        length(max = 5000, message = "Message is too long")
    )]
    pub message: String,
}

impl ContactForm {
    pub fn prepare_for_insert(&self) -> ContactMessageInsert {
        ContactMessageInsert {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.clone(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Collaboration".into(),
            message: "Let's build something".into(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let bad = ContactForm { email: "not-an-email".into(), ..form() };
        assert!(bad.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn blank_message_is_rejected() {
        let bad = ContactForm { message: "  ".into(), ..form() };
        assert!(bad.validate().unwrap_err().field_errors().contains_key("message"));
    }

    #[test]
    fn serialized_message_uses_is_read_key() {
        let msg = ContactMessage {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
            is_read: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(msg).unwrap();
        assert_eq!(json["isRead"], false);
        assert!(json.get("createdAt").is_some());
    }
}
