use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub time: TimeConfig,
    pub ledger: LedgerConfig,
    pub policy: PolicyConfig,
    pub auth: AuthConfig,
    pub calendar: CalendarConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                port: env_or("PORT", 8080)?,
            },
            time: TimeConfig {
                // Offset (in whole hours) applied when projecting the
                // slot grid's wall-clock times onto a calendar date.
                tz_offset_hours: env_or("APP_TZ_OFFSET_HOURS", 0)?,
                // Optional grid override, e.g. "08:30-09:30=1°;...".
                grid_spec: std::env::var("APP_GRID_SLOTS").ok(),
            },
            ledger: LedgerConfig {
                admission_timeout: Duration::from_millis(env_or(
                    "ADMISSION_TIMEOUT_MS",
                    5_000,
                )?),
            },
            policy: PolicyConfig {
                min_duration_minutes: env_or("POLICY_MIN_DURATION_MINUTES", 15)?,
                max_duration_minutes: env_or("POLICY_MAX_DURATION_MINUTES", 60)?,
                max_advance_days: env_or("POLICY_MAX_ADVANCE_DAYS", 90)?,
                weekly_limit: env_or("POLICY_WEEKLY_LIMIT", 1)?,
            },
            auth: AuthConfig {
                bootstrap_admin_email: env_or_else("BOOTSTRAP_ADMIN_EMAIL", || {
                    "admin@frontera.local".into()
                }),
                bootstrap_admin_name: env_or_else("BOOTSTRAP_ADMIN_NAME", || {
                    "Administrator".into()
                }),
                bootstrap_admin_token: env_or_else("BOOTSTRAP_ADMIN_TOKEN", || {
                    "frontera-bootstrap-token".into()
                }),
            },
            calendar: CalendarConfig {
                events_url: env_or_else("CALENDAR_EVENTS_URL", || {
                    "https://www.googleapis.com/calendar/v3/calendars/primary/events".into()
                }),
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct TimeConfig {
    pub tz_offset_hours: i32,
    pub grid_spec: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub admission_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub min_duration_minutes: i64,
    pub max_duration_minutes: i64,
    pub max_advance_days: i64,
    pub weekly_limit: usize,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub bootstrap_admin_email: String,
    pub bootstrap_admin_name: String,
    pub bootstrap_admin_token: String,
}

#[derive(Debug, Clone)]
pub struct CalendarConfig {
    pub events_url: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(v) => v
            .parse()
            .with_context(|| format!("failed to parse environment variable {key}")),
    }
}

fn env_or_else(key: &str, default: impl FnOnce() -> String) -> String {
    std::env::var(key).unwrap_or_else(|_| default())
}
