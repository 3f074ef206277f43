//! Email service for the signup welcome mail

use crate::config::EmailConfig;
use anyhow::{anyhow, Result};
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Email service for sending emails
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Check if outbound email is enabled and usable
    pub fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.smtp_host.is_empty()
    }

    /// Send the signup welcome mail to a freshly registered user
    pub async fn send_signup_mail(&self, to_email: &str) -> Result<()> {
        if !self.is_enabled() {
            return Err(anyhow!("SMTP is not configured, signup mail skipped"));
        }

        let email = Message::builder()
            .from(
                self.config
                    .from_address
                    .parse()
                    .map_err(|e| anyhow!("Invalid from address: {}", e))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| anyhow!("Invalid to address: {}", e))?)
            .subject("signup complete")
            .header(ContentType::TEXT_PLAIN)
            .body("Sign up complete!".to_string())
            .map_err(|e| anyhow!("Failed to build email: {}", e))?;

        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
                .map_err(|e| anyhow!("Failed to create SMTP transport: {}", e))?
                .credentials(creds)
                .port(self.config.smtp_port)
                .build();

        mailer
            .send(email)
            .await
            .map_err(|e| anyhow!("Failed to send email: {}", e))?;

        Ok(())
    }
}
