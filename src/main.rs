//! `embed-widget`: resolve an embed's settings and print the rendered widget.

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::cargo_common_metadata)]

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use embed_widget::EmbedWidget;
use embed_widget::config::AppConfig;
use embed_widget::history::{ChatEntry, ChatHistory};
use embed_widget::platform::{HeadlessPlatform, HeadlessScrollSurface};
use embed_widget::settings::SettingsResolver;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    // Initialize tracing (M-LOG-STRUCTURED); stdout carries the output
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let script = config.widget.script_attributes();

    let mut resolver = SettingsResolver::http();
    if let Some(token) = config.auth.fallback_bearer_token() {
        resolver = resolver.with_fallback_bearer_token(token);
    }

    let mut widget = EmbedWidget::mount(
        resolver,
        script,
        Arc::new(HeadlessPlatform::new()),
        Arc::new(HeadlessScrollSurface::new()),
    );
    let settings = widget
        .settings_loaded()
        .await
        .context("settings resolution task ended without a result")?;

    info!(
        session_id = %widget.session_id(),
        embed_id = settings.embed_id.as_deref().unwrap_or_default(),
        "Widget mounted"
    );

    if config.render.print_settings {
        println!("{}", serde_json::to_string_pretty(settings.as_ref())?);
        return Ok(());
    }

    if let Some(path) = &config.render.history {
        let raw = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read history file {}", path.display()))?;
        let entries: Vec<ChatEntry> =
            serde_json::from_slice(&raw).context("history file is not a JSON entry list")?;
        widget.set_history(ChatHistory::from_entries(entries));
    }
    if config.render.open {
        widget.toggle_open_chat(true);
    }

    println!("{}", widget.render());
    Ok(())
}
