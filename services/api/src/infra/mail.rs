use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::Mailbox,
    transport::smtp::authentication::Credentials,
};
use tracing::info;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::domain::repository::Mailer;
use crate::domain::types::OutgoingEmail;
use crate::error::MailError;

/// Relays mail through an SMTP server, upgrading the connection with STARTTLS
/// before credentials are sent.
#[derive(Clone)]
pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        from: &str,
    ) -> Result<Self, MailError> {
        let from = from
            .parse()
            .map_err(|_| MailError::Address(from.to_owned()))?;
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(port);
        if !username.is_empty() {
            builder =
                builder.credentials(Credentials::new(username.to_owned(), password.to_owned()));
        }
        Ok(Self {
            from,
            transport: builder.build(),
        })
    }
}

#[async_trait::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|_| MailError::Address(email.to.clone()))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .body(email.body.clone())
            .map_err(MailError::Build)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Writes each message to a text file. Used when no SMTP host is configured.
#[derive(Clone)]
pub struct OutboxDirMailer {
    dir: PathBuf,
}

impl OutboxDirMailer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait::async_trait]
impl Mailer for OutboxDirMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(MailError::Outbox)?;
        let file_name = format!(
            "{}_{}.txt",
            Utc::now().format("%Y%m%d%H%M%S"),
            Uuid::now_v7()
        );
        let contents = format!(
            "To: {}\nSubject: {}\n\n{}\n",
            email.to, email.subject, email.body
        );
        tokio::fs::write(self.dir.join(file_name), contents)
            .await
            .map_err(MailError::Outbox)?;
        Ok(())
    }
}

/// SMTP when `SMTP_HOST` is set, otherwise the file outbox.
pub fn build_mailer(config: &ApiConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config.smtp_host.as_deref() {
        Some(host) => {
            info!(host, port = config.smtp_port, "using SMTP mailer");
            Ok(Arc::new(SmtpMailer::new(
                host,
                config.smtp_port,
                &config.smtp_username,
                &config.smtp_password,
                &config.mail_from,
            )?))
        }
        None => {
            info!(dir = %config.mail_outbox_dir.display(), "using outbox directory mailer");
            Ok(Arc::new(OutboxDirMailer::new(&config.mail_outbox_dir)))
        }
    }
}
