use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::domain::repository::Mailer;
use crate::infra::db::{DbJobRunRepository, DbLikeRepository, DbUserRepository};
use crate::jobs::{Job, JobRun};
use crate::usecase::summary::{DAILY_LIKES_SUMMARY, SendDailySummaryUseCase, SummaryOutcome};

/// Emails each author the total likes across their recipes.
pub struct DailyLikesSummaryJob {
    pub db: DatabaseConnection,
    pub mailer: Arc<dyn Mailer>,
}

#[async_trait::async_trait]
impl Job for DailyLikesSummaryJob {
    fn name(&self) -> &str {
        DAILY_LIKES_SUMMARY
    }

    async fn run(&self, run: JobRun) -> anyhow::Result<()> {
        let uc = SendDailySummaryUseCase {
            users: DbUserRepository {
                db: self.db.clone(),
            },
            likes: DbLikeRepository {
                db: self.db.clone(),
            },
            runs: DbJobRunRepository {
                db: self.db.clone(),
            },
            mailer: Arc::clone(&self.mailer),
        };
        match uc.execute(run.date, run.force).await? {
            SummaryOutcome::AlreadyRan => {
                info!(date = %run.date, "skipped: summary already sent for this date");
            }
            SummaryOutcome::Completed(report) => {
                info!(
                    date = %run.date,
                    users_scanned = report.users_scanned,
                    emails_sent = report.emails_sent,
                    emails_failed = report.emails_failed,
                    "daily likes summary finished"
                );
            }
        }
        Ok(())
    }
}
