//! Process-local job registry: named daily jobs plus fire-and-forget enqueue.
//!
//! Built once at startup and shared by `Arc`. The `worker` binary owns the
//! daily schedule; the API process only enqueues one-shot jobs.

pub mod signup;
pub mod summary;

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Context handed to each job invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobRun {
    /// UTC date the run is for.
    pub date: NaiveDate,
    /// Skip once-per-day guards.
    pub force: bool,
}

impl JobRun {
    pub fn today() -> Self {
        Self {
            date: Utc::now().date_naive(),
            force: false,
        }
    }
}

#[async_trait::async_trait]
pub trait Job: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self, run: JobRun) -> anyhow::Result<()>;
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("no job registered as {0:?}")]
    UnknownJob(String),
    #[error("job {name:?} failed")]
    Failed {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

struct DailyJob {
    at: NaiveTime,
    job: Arc<dyn Job>,
}

#[derive(Default)]
pub struct JobRegistry {
    daily: Vec<DailyJob>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `job` every day at `at` (UTC).
    pub fn register_daily(&mut self, at: NaiveTime, job: Arc<dyn Job>) {
        info!(job = job.name(), %at, "registered daily job");
        self.daily.push(DailyJob { at, job });
    }

    pub fn names(&self) -> Vec<&str> {
        self.daily.iter().map(|d| d.job.name()).collect()
    }

    /// Run `job` in the background. Failures are logged, never returned.
    pub fn enqueue<J: Job + 'static>(&self, job: J) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = job.run(JobRun::today()).await {
                error!(job = job.name(), error = ?e, "enqueued job failed");
            }
        })
    }

    /// Run a registered job immediately, for today's date.
    pub async fn run_now(&self, name: &str, force: bool) -> Result<(), JobError> {
        let entry = self
            .daily
            .iter()
            .find(|d| d.job.name() == name)
            .ok_or_else(|| JobError::UnknownJob(name.to_owned()))?;
        let run = JobRun {
            force,
            ..JobRun::today()
        };
        entry.job.run(run).await.map_err(|source| JobError::Failed {
            name: name.to_owned(),
            source,
        })
    }

    /// Sleep until the next scheduled time, run every job due then, repeat.
    /// Returns only if nothing is registered.
    pub async fn run_forever(&self) {
        let mut last_fire = Utc::now();
        loop {
            let now = Utc::now();
            // Never fire the same instant twice if the timer wakes early.
            let Some((fire_at, due)) = self.next_fire(now.max(last_fire)) else {
                warn!("no daily jobs registered; scheduler exiting");
                return;
            };
            let names: Vec<&str> = due.iter().map(|j| j.name()).collect();
            info!(%fire_at, jobs = ?names, "next scheduled run");
            let wait = (fire_at - now).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;
            last_fire = fire_at;

            let run = JobRun {
                date: fire_at.date_naive(),
                force: false,
            };
            for job in due {
                match job.run(run).await {
                    Ok(()) => info!(job = job.name(), date = %run.date, "scheduled job finished"),
                    Err(e) => error!(job = job.name(), error = ?e, "scheduled job failed"),
                }
            }
        }
    }

    /// Earliest upcoming fire time and every job due at that instant.
    fn next_fire(&self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, Vec<Arc<dyn Job>>)> {
        let fire_at = self
            .daily
            .iter()
            .map(|d| next_fire_after(d.at, now))
            .min()?;
        let due = self
            .daily
            .iter()
            .filter(|d| next_fire_after(d.at, now) == fire_at)
            .map(|d| Arc::clone(&d.job))
            .collect();
        Some((fire_at, due))
    }
}

/// The first instant strictly after `now` whose UTC time of day is `at`.
pub fn next_fire_after(at: NaiveTime, now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive().and_time(at).and_utc();
    if today > now {
        today
    } else {
        today
            .checked_add_days(Days::new(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
