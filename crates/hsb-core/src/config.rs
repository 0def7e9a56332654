use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Typed configuration, read once at startup and passed by reference into
/// the components that need it. Never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Config {
    // Required credentials
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: i64,

    // Polling
    pub endpoint: String,
    pub retry_period: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present).
    ///
    /// Must run before any network or bot client is constructed: a missing
    /// credential is fatal and the process exits without entering the loop.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let practicum_token = require_non_empty("PRACTICUM_TOKEN", env_str("PRACTICUM_TOKEN"))?;
        let telegram_token = require_non_empty("TELEGRAM_TOKEN", env_str("TELEGRAM_TOKEN"))?;
        let chat_id_raw = require_non_empty("TELEGRAM_CHAT_ID", env_str("TELEGRAM_CHAT_ID"))?;
        let telegram_chat_id = chat_id_raw.trim().parse::<i64>().map_err(|_| {
            Error::Config(format!(
                "TELEGRAM_CHAT_ID is not a valid chat id: {chat_id_raw}"
            ))
        })?;

        let endpoint = env_str("ENDPOINT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let retry_period =
            Duration::from_secs(env_u64("RETRY_PERIOD").unwrap_or(DEFAULT_RETRY_PERIOD_SECS));
        let request_timeout = Duration::from_secs(
            env_u64("REQUEST_TIMEOUT").unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            retry_period,
            request_timeout,
        })
    }
}

/// The three credentials are required; fail loudly, naming the absent one.
fn require_non_empty(name: &'static str, value: Option<String>) -> Result<String> {
    match value.and_then(non_empty) {
        Some(v) => Ok(v),
        None => {
            tracing::error!(
                "required environment variable {name} is missing or empty, stopping"
            );
            Err(Error::MissingConfiguration(name))
        }
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
