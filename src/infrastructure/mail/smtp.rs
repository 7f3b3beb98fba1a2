use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

use tracing::{info, warn};

use crate::{errors::MailError, settings::AppConfig};

/// Outbound plain-text email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// The wire half of [`SmtpEmailSender`], split out so message building can be
/// exercised without an SMTP server.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), MailError>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), MailError> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| MailError::Transport(e.to_string()))
    }
}

pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
    from: Mailbox,
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse()
        .map_err(|e: lettre::address::AddressError| {
            MailError::InvalidAddress(address.to_string(), e.to_string())
        })
}

impl SmtpEmailSender {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_email: &str) -> Result<Self, MailError> {
        Ok(Self {
            mailer,
            from: parse_mailbox(from_email)?,
        })
    }

    /// Builds the SMTP transport from `mail_*` settings.
    ///
    /// With credentials the connection is upgraded with STARTTLS, or uses
    /// implicit TLS on port 465. Without credentials a plain connection is
    /// opened, which suits local relays such as Mailpit.
    pub fn from_config(config: &AppConfig) -> Result<Self, MailError> {
        let host = config
            .mail_host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(MailError::NotConfigured)?;

        let credentials = match (&config.mail_username, &config.mail_password) {
            (Some(user), Some(pass)) if !user.trim().is_empty() => {
                Some(Credentials::new(user.clone(), pass.clone()))
            }
            _ => None,
        };

        let transport = match credentials {
            Some(creds) => {
                let builder = if config.mail_port == 465 {
                    AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                } else {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                }
                .map_err(|e| MailError::Transport(e.to_string()))?;

                builder
                    .port(config.mail_port)
                    .credentials(creds)
                    .timeout(Some(config.mail_timeout()))
                    .build()
            }
            None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .port(config.mail_port)
                .timeout(Some(config.mail_timeout()))
                .build(),
        };

        info!("SMTP transport configured for {}:{}", host, config.mail_port);

        Self::new_with_mailer(Box::new(transport), &config.mail_from)
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(to)?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::MessageBuild(e.to_string()))?;

        self.mailer.send(email).await
    }
}

/// Installed when no mail host is configured; every send reports
/// [`MailError::NotConfigured`].
pub struct DisabledEmailSender;

#[async_trait]
impl EmailSender for DisabledEmailSender {
    async fn send_email(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

/// Picks the sender for the current settings. A missing or broken SMTP
/// configuration degrades to [`DisabledEmailSender`] instead of failing startup.
pub fn email_sender_from_config(config: &AppConfig) -> Arc<dyn EmailSender> {
    if !config.mail_enabled() {
        warn!("No mail host configured, contact notifications are disabled");
        return Arc::new(DisabledEmailSender);
    }

    match SmtpEmailSender::from_config(config) {
        Ok(sender) => Arc::new(sender),
        Err(e) => {
            warn!(error = %e, "SMTP transport unavailable, contact notifications are disabled");
            Arc::new(DisabledEmailSender)
        }
    }
}
