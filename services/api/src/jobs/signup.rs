use std::sync::Arc;

use crate::domain::repository::Mailer;
use crate::domain::types::{OutgoingEmail, User};
use crate::jobs::{Job, JobRun};

pub const SIGNUP_EMAIL: &str = "send_signup_email";

pub const WELCOME_SUBJECT: &str = "Welcome to Cookbook";

pub fn render_welcome(username: &str) -> String {
    format!(
        "Hello {username},\n\n\
         Thanks for signing up. Start sharing your recipes and liking others'.\n"
    )
}

/// One-shot welcome email, enqueued after registration.
pub struct SignupEmailJob {
    pub mailer: Arc<dyn Mailer>,
    pub email: OutgoingEmail,
}

impl SignupEmailJob {
    pub fn new(mailer: Arc<dyn Mailer>, user: &User) -> Self {
        Self {
            mailer,
            email: OutgoingEmail {
                to: user.email.clone(),
                subject: WELCOME_SUBJECT.to_owned(),
                body: render_welcome(&user.username),
            },
        }
    }
}

#[async_trait::async_trait]
impl Job for SignupEmailJob {
    fn name(&self) -> &str {
        SIGNUP_EMAIL
    }

    async fn run(&self, _run: JobRun) -> anyhow::Result<()> {
        self.mailer.send(&self.email).await?;
        tracing::info!(to = %self.email.to, "signup email sent");
        Ok(())
    }
}
