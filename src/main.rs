use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use eol_watch::{
    load_config, CatalogueChecker, EndOfLifeHttpClient, LookaheadWindow,
    NilNotifier, Notifier, SlackNotifier,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(Level::INFO);
            error!("invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    init_tracing(cfg.log_level);
    info!("catalogue = {}", cfg.catalogue_file.display());

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.request_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let resolver = EndOfLifeHttpClient::with_client(http.clone(), cfg.api_base_url.clone());
    let notifier: Box<dyn Notifier> = match &cfg.slack_webhook_url {
        Some(url) => Box::new(SlackNotifier::with_client(http, url.clone())),
        None => {
            info!("SLACK_WEBHOOK_URL not set, notifications are disabled");
            Box::new(NilNotifier::new())
        }
    };

    let checker = CatalogueChecker::new(
        cfg.catalogue_file.clone().into(),
        &resolver,
        &*notifier,
    )
    .with_window(LookaheadWindow::months(cfg.lookahead_months));

    if let Err(e) = checker.notify_near_end_of_life().await {
        error!("check failed: {:#}", anyhow::Error::from(e));
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
