//! # Chirp Binary
//!
//! Assembles the interaction layer against a live backend: configuration,
//! HTTP adapter, file reader and terminal prompt are wired into one
//! dispatcher, the first timeline page is turned into a document, and the
//! REPL replays typed commands as the UI events a browser page would have
//! produced.

mod repl;
mod term;

use std::time::Duration;

use anyhow::Context;
use api_adapters::HttpTimelineApi;
use configs::AppConfig;
use domains::ports::TimelineApi;
use media_adapters::DataUrlReader;
use services::{fragments, Dispatcher};
use term::StdinConfirm;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let AppConfig { backend, viewer, scroll } = AppConfig::load().context("loading configuration")?;

    let mut api = HttpTimelineApi::new(
        backend.base_url.as_str(),
        Duration::from_secs(backend.request_timeout_secs),
    )?;
    if let Some(token) = backend.session_token {
        api = api.with_session_token(token);
    }

    tracing::info!(base_url = %backend.base_url, "fetching initial timeline");
    let posts = api
        .posts_page(1)
        .await
        .context("fetching the first timeline page")?;
    let document = fragments::timeline_page(&posts, viewer.user_id);

    let dispatcher = Dispatcher::new(
        Box::new(api),
        Box::new(StdinConfirm),
        Box::new(DataUrlReader::new()),
        document,
    )
    .with_scroll_threshold(scroll.threshold_px);

    repl::run(&dispatcher).await
}
