//! HTTP server for the chatbot instructions widget.
//!
//! Usage: `chatbot-instructions-server [config.toml]`. Without an argument the
//! path comes from `CHATBOT_INSTRUCTIONS_CONFIG`, else defaults are used.

use std::path::PathBuf;
use std::sync::Arc;

use chatbot_instructions::microsvc::{serve, Service};
use chatbot_instructions::{
    InMemorySettingsStore, JsonFileSettingsStore, SettingsStore, Widget, WidgetConfig,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = WidgetConfig::load(path.as_deref())?;
    if config.nonce_secret.is_empty() {
        tracing::warn!("nonce_secret not configured; tokens will not survive a restart");
    }

    match config.store_path.clone() {
        Some(store_path) => {
            tracing::info!(path = %store_path.display(), "using JSON file settings store");
            run(JsonFileSettingsStore::new(store_path), &config).await
        }
        None => {
            tracing::info!("using in-memory settings store");
            run(InMemorySettingsStore::new(), &config).await
        }
    }
}

async fn run<S: SettingsStore + 'static>(
    settings: S,
    config: &WidgetConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let widget = Widget::from_config(settings, config);
    let service = Arc::new(Service::new(widget));
    serve(service, &config.listen_addr).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
