use async_trait::async_trait;

use crate::{domain::ChatId, Result};

/// Port over the homework-review API.
///
/// One time-windowed fetch per call. No retries here: the poll loop's
/// sleep/repeat cycle is the retry strategy.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch review updates since the given UNIX timestamp.
    ///
    /// Returns the decoded JSON payload as-is; shape checking is the
    /// caller's job (`review::check_response`).
    async fn fetch(&self, since: i64) -> Result<serde_json::Value>;
}

/// Port over the messaging bot. One fixed destination, plain text.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;
}
