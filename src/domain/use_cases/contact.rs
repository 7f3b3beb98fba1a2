use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::{
    entities::contact_message::{ContactForm, ContactMessage},
    errors::AppError,
    repositories::contact_message::ContactRepository,
    use_cases::notification::ContactNotifier,
};

#[derive(Clone)]
pub struct ContactHandler {
    pub contact_repo: Arc<dyn ContactRepository>,
    pub notifier: ContactNotifier,
}

impl ContactHandler {
    pub fn new(contact_repo: Arc<dyn ContactRepository>, notifier: ContactNotifier) -> Self {
        ContactHandler { contact_repo, notifier }
    }

    /// Stores the submission, then sends the owner notification and the
    /// auto-reply. Email failures never fail the submission.
    pub async fn submit_contact_message(&self, form: ContactForm) -> Result<ContactMessage, AppError> {
        form.validate()?;

        let saved = self.contact_repo.create_contact_message(&form.prepare_for_insert()).await?;
        info!(contact_id = saved.id, "Contact message stored");

        self.notifier.notify_owner(&saved).await;
        self.notifier.send_auto_reply(&saved).await;

        Ok(saved)
    }

    pub async fn get_contact_message_by_id(&self, id: i64) -> Result<ContactMessage, AppError> {
        self.contact_repo.get_contact_message_by_id(id).await
    }

    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.contact_repo.list_contact_messages().await
    }

    pub async fn list_unread_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.contact_repo.list_unread_contact_messages().await
    }

    pub async fn count_unread_contact_messages(&self) -> Result<i64, AppError> {
        self.contact_repo.count_unread_contact_messages().await
    }

    /// Marks a message read. Marking an already read message is a no-op.
    pub async fn mark_contact_message_read(&self, id: i64) -> Result<ContactMessage, AppError> {
        self.contact_repo.mark_contact_message_read(id).await
    }

    pub async fn delete_contact_message(&self, id: i64) -> Result<(), AppError> {
        self.contact_repo.delete_contact_message(id).await?;
        info!(contact_id = id, "Contact message deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::contact_message::ContactMessageInsert,
        errors::MailError,
        mail::smtp::{DisabledEmailSender, EmailSender},
        repositories::contact_message::MockContactRepository,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSender {
        recipients: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EmailSender for RecordingSender {
        async fn send_email(&self, to: &str, _subject: &str, _body: &str) -> Result<(), MailError> {
            self.recipients.lock().unwrap().push(to.to_string());
            Ok(())
        }
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Nice portfolio".into(),
        }
    }

    fn stored(id: i64, insert: &ContactMessageInsert) -> ContactMessage {
        ContactMessage {
            id,
            name: insert.name.clone(),
            email: insert.email.clone(),
            subject: insert.subject.clone(),
            message: insert.message.clone(),
            is_read: false,
            created_at: insert.created_at,
        }
    }

    fn saving_repo() -> MockContactRepository {
        let mut repo = MockContactRepository::new();
        repo.expect_create_contact_message()
            .times(1)
            .returning(|insert| Ok(stored(1, insert)));
        repo
    }

    #[tokio::test]
    async fn submission_notifies_owner_then_submitter() {
        let sender = Arc::new(RecordingSender::default());
        let notifier = ContactNotifier::new(sender.clone(), "owner@example.com", "Gourav Kumar");
        let handler = ContactHandler::new(Arc::new(saving_repo()), notifier);

        let saved = handler.submit_contact_message(form()).await.unwrap();

        assert_eq!(saved.id, 1);
        assert!(!saved.is_read);
        assert_eq!(
            *sender.recipients.lock().unwrap(),
            vec!["owner@example.com".to_string(), "ada@example.com".to_string()]
        );
    }

    #[tokio::test]
    async fn submission_succeeds_when_mail_is_unavailable() {
        let notifier = ContactNotifier::new(Arc::new(DisabledEmailSender), "owner@example.com", "Gourav Kumar");
        let handler = ContactHandler::new(Arc::new(saving_repo()), notifier);

        let saved = handler.submit_contact_message(form()).await.unwrap();

        assert_eq!(saved.email, "ada@example.com");
    }

    #[tokio::test]
    async fn invalid_submission_is_neither_stored_nor_mailed() {
        let mut repo = MockContactRepository::new();
        repo.expect_create_contact_message().never();
        let sender = Arc::new(RecordingSender::default());
        let notifier = ContactNotifier::new(sender.clone(), "owner@example.com", "Gourav Kumar");
        let handler = ContactHandler::new(Arc::new(repo), notifier);

        let result = handler
            .submit_contact_message(ContactForm { email: "nope".into(), ..form() })
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(sender.recipients.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_skips_mail() {
        let mut repo = MockContactRepository::new();
        repo.expect_create_contact_message()
            .returning(|_| Err(AppError::InternalError("db down".into())));
        let sender = Arc::new(RecordingSender::default());
        let notifier = ContactNotifier::new(sender.clone(), "owner@example.com", "Gourav Kumar");
        let handler = ContactHandler::new(Arc::new(repo), notifier);

        assert!(handler.submit_contact_message(form()).await.is_err());
        assert!(sender.recipients.lock().unwrap().is_empty());
    }
}
