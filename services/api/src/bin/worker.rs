//! Background worker: runs the daily likes summary on its schedule, or once on demand.

use std::sync::Arc;

use clap::Parser;
use sea_orm::Database;
use tracing::{error, info};

use cookbook_core::config::Config;
use cookbook_core::tracing::init_tracing;

use cookbook_api::config::ApiConfig;
use cookbook_api::infra::mail::build_mailer;
use cookbook_api::jobs::JobRegistry;
use cookbook_api::jobs::summary::DailyLikesSummaryJob;
use cookbook_api::usecase::summary::DAILY_LIKES_SUMMARY;

#[derive(Parser)]
#[command(name = "worker", about = "Cookbook scheduled jobs")]
struct Cli {
    /// Run the daily likes summary once for today and exit.
    #[arg(long)]
    run_once: bool,

    /// Send even if today's summary was already sent.
    #[arg(long, requires = "run_once")]
    force: bool,
}

#[tokio::main]
async fn main() {
    init_tracing("info,sqlx=warn");

    let cli = Cli::parse();
    let config = ApiConfig::from_env();
    let summary_at = config.summary_at().expect("SUMMARY_AT must be HH:MM");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");
    let mailer = build_mailer(&config).expect("failed to build mailer");

    let mut registry = JobRegistry::new();
    registry.register_daily(summary_at, Arc::new(DailyLikesSummaryJob { db, mailer }));

    if cli.run_once {
        if let Err(e) = registry.run_now(DAILY_LIKES_SUMMARY, cli.force).await {
            error!(error = ?e, "run failed");
            std::process::exit(1);
        }
        return;
    }

    info!(jobs = ?registry.names(), "worker started");
    registry.run_forever().await;
}
