use std::path::PathBuf;

use chrono::NaiveTime;
use serde::Deserialize;

use cookbook_core::config::Config;

/// API and worker configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for access and refresh tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3000). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// SMTP relay. When unset, mail is written to `mail_outbox_dir` instead.
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
    #[serde(default = "default_mail_outbox_dir")]
    pub mail_outbox_dir: PathBuf,
    /// UTC time of day for the likes summary, `HH:MM`. Env var: `SUMMARY_AT`.
    #[serde(default = "default_summary_at")]
    pub summary_at: String,
}

impl Config for ApiConfig {}

fn default_api_port() -> u16 {
    3000
}

fn default_smtp_port() -> u16 {
    587
}

fn default_mail_from() -> String {
    "Cookbook <no-reply@cookbook.local>".to_owned()
}

fn default_mail_outbox_dir() -> PathBuf {
    PathBuf::from("./tmp/mail")
}

fn default_summary_at() -> String {
    "00:00".to_owned()
}

impl ApiConfig {
    pub fn summary_at(&self) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(&self.summary_at, "%H:%M")
    }
}
