//! The poll-detect-notify loop.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, error};

use crate::{
    config::Config,
    domain::{ChatId, Report},
    ports::{Notifier, StatusSource},
    review::{check_response, parse_status},
    Result,
};

/// Polls the review API on a fixed interval and relays status changes to
/// the configured chat.
///
/// Owns the poll cursor and the last sent report exclusively; no other
/// component reads or writes them. Strictly sequential: one
/// fetch-validate-format-notify cycle completes before the next begins.
pub struct StatusWatcher {
    cfg: Arc<Config>,
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    cursor: i64,
    last_report: Report,
}

impl StatusWatcher {
    pub fn new(
        cfg: Arc<Config>,
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            cfg,
            source,
            notifier,
            cursor: Utc::now().timestamp(),
            last_report: Report::default(),
        }
    }

    /// Run forever. Only external process termination stops the loop:
    /// every iteration-level failure is reported to the chat and absorbed.
    pub async fn run(mut self) {
        loop {
            self.run_once().await;
            sleep(self.cfg.retry_period).await;
        }
    }

    /// One fetch-validate-format-notify cycle, without the sleep.
    pub async fn run_once(&mut self) {
        let report = match self.poll().await {
            Ok(report) => report,
            Err(e) => {
                error!("iteration failed: {e}");
                Report {
                    homework: String::new(),
                    text: format!("Сбой в работе программы: {e}"),
                }
            }
        };

        if report == self.last_report {
            debug!("В ответе нет новых статусов.");
            return;
        }

        // Best-effort: a delivery failure is logged, never re-raised. The
        // report is not recorded as sent, so the next cycle retries it.
        match self.notifier.send_text(self.chat_id(), &report.text).await {
            Ok(()) => self.last_report = report,
            Err(e) => error!("failed to deliver report: {e}"),
        }
    }

    async fn poll(&mut self) -> Result<Report> {
        let raw = self.source.fetch(self.cursor).await?;
        let response = check_response(raw)?;

        let Some(record) = response.homeworks.first() else {
            // The cursor stays put while the window is empty, so repeated
            // empty polls produce an identical report and dedup suppresses
            // them. Nothing is missed: the window only grows.
            return Ok(Report {
                homework: String::new(),
                text: format!(
                    "За период от {} до настоящего момента домашних работ нет.",
                    self.cursor
                ),
            });
        };

        let text = parse_status(record)?;
        let homework = record
            .get("homework_name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();

        self.cursor = response.current_date;
        Ok(Report { homework, text })
    }

    fn chat_id(&self) -> ChatId {
        ChatId(self.cfg.telegram_chat_id)
    }
}
