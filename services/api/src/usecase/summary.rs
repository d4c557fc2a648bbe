use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::repository::{JobRunRepository, LikeRepository, Mailer, UserRepository};
use crate::domain::types::OutgoingEmail;
use crate::error::ApiError;

/// Job name under which daily runs are claimed.
pub const DAILY_LIKES_SUMMARY: &str = "send_daily_likes_summary";

pub const SUMMARY_SUBJECT: &str = "Daily Likes Summary";

pub fn render_summary(username: &str, likes_count: u64) -> String {
    format!(
        "Hello {username},\n\n\
         Your recipes received a total of {likes_count} likes.\n\n\
         Thanks for sharing your cooking!\n"
    )
}

/// Counters from one pass over all users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryReport {
    pub users_scanned: u64,
    pub emails_sent: u64,
    pub emails_failed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Another run already claimed this date; nothing was sent.
    AlreadyRan,
    Completed(SummaryReport),
}

pub struct SendDailySummaryUseCase<U: UserRepository, L: LikeRepository, J: JobRunRepository> {
    pub users: U,
    pub likes: L,
    pub runs: J,
    pub mailer: Arc<dyn Mailer>,
}

impl<U: UserRepository, L: LikeRepository, J: JobRunRepository> SendDailySummaryUseCase<U, L, J> {
    /// Email every author whose recipes have at least one like.
    ///
    /// A failed send is logged and counted; the loop continues. Storage
    /// errors abort the run. `force` skips the per-date claim.
    pub async fn execute(&self, date: NaiveDate, force: bool) -> Result<SummaryOutcome, ApiError> {
        if !force && !self.runs.claim(DAILY_LIKES_SUMMARY, date).await? {
            info!(%date, "daily likes summary already ran");
            return Ok(SummaryOutcome::AlreadyRan);
        }

        let mut report = SummaryReport::default();
        for user in self.users.list_all().await? {
            report.users_scanned += 1;
            let likes_count = self.likes.count_for_author(user.id).await?;
            if likes_count == 0 {
                continue;
            }
            let email = OutgoingEmail {
                to: user.email.clone(),
                subject: SUMMARY_SUBJECT.to_owned(),
                body: render_summary(&user.username, likes_count),
            };
            match self.mailer.send(&email).await {
                Ok(()) => report.emails_sent += 1,
                Err(e) => {
                    warn!(user_id = %user.id, error = %e, "failed to send likes summary");
                    report.emails_failed += 1;
                }
            }
        }
        Ok(SummaryOutcome::Completed(report))
    }
}
