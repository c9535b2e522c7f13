use std::sync::Arc;

use async_trait::async_trait;
use campusdesk_config::EmailConfig;
use campusdesk_core::AppError;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Delivers rendered emails.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError>;
}

/// SMTP delivery through lettre.
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, AppError> {
        if self.config.smtp_username.is_empty() {
            return Ok(
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.smtp_host)
                    .port(self.config.smtp_port)
                    .build(),
            );
        }

        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal_error(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build(),
        )
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, email), fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let message = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal_error(format!("Invalid from email: {}", e)))?,
            )
            .to(email
                .to
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid to email: {}", e)))?)
            .subject(email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(email.text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(email.html_body),
                    ),
            )
            .map_err(|e| AppError::internal_error(format!("Failed to build email: {}", e)))?;

        self.transport()?
            .send(message)
            .await
            .map_err(|e| AppError::internal_error(format!("Failed to send email: {}", e)))?;

        tracing::info!("Email sent");
        Ok(())
    }
}

/// Used when SMTP is disabled: writes the email to the log instead.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.text_body,
            "SMTP disabled; email not sent"
        );
        Ok(())
    }
}

pub fn mailer_from_config(config: &EmailConfig) -> Arc<dyn Mailer> {
    if config.enabled {
        Arc::new(SmtpMailer::new(config.clone()))
    } else {
        Arc::new(LogMailer)
    }
}

/// "1 hour", "15 minutes", "2 hours 30 minutes", "45 seconds".
fn describe_lifetime(secs: i64) -> String {
    fn unit(n: i64, name: &str) -> String {
        if n == 1 {
            format!("1 {name}")
        } else {
            format!("{n} {name}s")
        }
    }

    let secs = secs.max(0);
    let (hours, minutes) = (secs / 3600, secs % 3600 / 60);
    match (hours, minutes) {
        (0, 0) => unit(secs, "second"),
        (0, m) => unit(m, "minute"),
        (h, 0) => unit(h, "hour"),
        (h, m) => format!("{} {}", unit(h, "hour"), unit(m, "minute")),
    }
}

/// Renders and sends the account emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<dyn Mailer>,
    frontend_url: String,
}

impl EmailService {
    pub fn new(mailer: Arc<dyn Mailer>, config: &EmailConfig) -> Self {
        Self {
            mailer,
            frontend_url: config.frontend_url.clone(),
        }
    }

    pub fn reset_link(&self, reset_token: &str) -> String {
        format!("{}/reset-password?token={}", self.frontend_url, reset_token)
    }

    /// `valid_for_secs` is the reset token lifetime, quoted in the email.
    #[instrument(skip(self, reset_token))]
    pub async fn send_password_reset_email(
        &self,
        to_email: &str,
        to_name: &str,
        reset_token: &str,
        valid_for_secs: i64,
    ) -> Result<(), AppError> {
        let reset_link = self.reset_link(reset_token);
        let lifetime = describe_lifetime(valid_for_secs);

        let text_body = format!(
            "Hi {to_name},\n\n\
             You requested to reset your CampusDesk password.\n\n\
             Open the link below to choose a new password:\n\
             {reset_link}\n\n\
             This link will expire in {lifetime}.\n\n\
             If you didn't request this, you can ignore this email.\n"
        );
        let html_body = format!(
            "<p>Hi {to_name},</p>\
             <p>You requested to reset your CampusDesk password.</p>\
             <p><a href=\"{reset_link}\">Choose a new password</a></p>\
             <p>This link will expire in {lifetime}. If you didn't request this, you can ignore this email.</p>"
        );

        self.mailer
            .send(OutgoingEmail {
                to: to_email.to_string(),
                subject: "Password Reset Request".to_string(),
                text_body,
                html_body,
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn send_password_reset_confirmation(
        &self,
        to_email: &str,
        to_name: &str,
    ) -> Result<(), AppError> {
        let text_body = format!(
            "Hi {to_name},\n\n\
             Your CampusDesk password has been reset.\n\n\
             If you didn't make this change, contact your school administrator immediately.\n"
        );
        let html_body = format!(
            "<p>Hi {to_name},</p>\
             <p>Your CampusDesk password has been reset.</p>\
             <p>If you didn't make this change, contact your school administrator immediately.</p>"
        );

        self.mailer
            .send(OutgoingEmail {
                to: to_email.to_string(),
                subject: "Password Reset Successful".to_string(),
                text_body,
                html_body,
            })
            .await
    }
}
