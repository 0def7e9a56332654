use std::sync::Arc;

use anyhow::Context;

use hsb_core::{config::Config, poll::StatusWatcher};
use hsb_practicum::PracticumClient;
use hsb_telegram::TelegramNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hsb_core::logging::init("hsb");

    // Validated before any network or bot client exists; a missing
    // credential exits non-zero right here, without entering the loop.
    let cfg = Arc::new(Config::load().context("configuration check failed")?);

    let source = Arc::new(PracticumClient::new(
        cfg.endpoint.clone(),
        cfg.practicum_token.clone(),
        cfg.request_timeout,
    ));
    let notifier = Arc::new(TelegramNotifier::from_token(&cfg.telegram_token));

    tracing::info!(
        "homework status bot started, polling every {}s",
        cfg.retry_period.as_secs()
    );

    StatusWatcher::new(cfg, source, notifier).run().await;

    Ok(())
}
