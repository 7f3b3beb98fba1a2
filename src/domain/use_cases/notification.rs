use std::{fmt, sync::Arc};

use tracing::{error, info};

use crate::{entities::contact_message::ContactMessage, mail::smtp::EmailSender};

/// Sends the two emails that accompany a contact submission. Both are
/// best-effort: failures are logged and never returned.
#[derive(Clone)]
pub struct ContactNotifier {
    sender: Arc<dyn EmailSender>,
    owner_address: String,
    owner_name: String,
}

impl fmt::Debug for ContactNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactNotifier")
            .field("sender", &"<dyn EmailSender>")
            .field("owner_address", &self.owner_address)
            .field("owner_name", &self.owner_name)
            .finish()
    }
}

impl ContactNotifier {
    pub fn new(sender: Arc<dyn EmailSender>, owner_address: &str, owner_name: &str) -> Self {
        Self {
            sender,
            owner_address: owner_address.to_string(),
            owner_name: owner_name.to_string(),
        }
    }

    /// Forwards a summary of the submission to the site owner
    pub async fn notify_owner(&self, message: &ContactMessage) {
        let subject = format!("Portfolio Contact: {}", message.subject);
        let body = owner_notification_body(&self.owner_name, message);

        match self.sender.send_email(&self.owner_address, &subject, &body).await {
            Ok(()) => info!(contact_id = message.id, "Owner notification sent"),
            Err(e) => error!(contact_id = message.id, error = %e, "Failed to send owner notification"),
        }
    }

    /// Thanks the submitter at the address they provided
    pub async fn send_auto_reply(&self, message: &ContactMessage) {
        let subject = format!("Thank you for contacting {}", self.owner_name);
        let body = auto_reply_body(&self.owner_name, message);

        match self.sender.send_email(&message.email, &subject, &body).await {
            Ok(()) => info!(contact_id = message.id, "Auto-reply sent"),
            Err(e) => error!(contact_id = message.id, error = %e, "Failed to send auto-reply"),
        }
    }
}

fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or(full_name)
}

fn owner_notification_body(owner_name: &str, message: &ContactMessage) -> String {
    format!(
        "Hello {},\n\n\
         You have received a new message from your portfolio website:\n\n\
         From: {}\n\
         Email: {}\n\
         Subject: {}\n\
         Message: {}\n\n\
         ---\n\
         This message was sent from your portfolio contact form.",
        first_name(owner_name),
        message.name,
        message.email,
        message.subject,
        message.message,
    )
}

fn auto_reply_body(owner_name: &str, message: &ContactMessage) -> String {
    format!(
        "Dear {},\n\n\
         Thank you for reaching out to me through my portfolio website!\n\n\
         I have received your message regarding: {}\n\n\
         I will review your message and get back to you as soon as possible.\n\n\
         Best regards,\n\
         {}",
        message.name, message.subject, owner_name,
    )
}
