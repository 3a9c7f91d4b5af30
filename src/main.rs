mod app;

use app::DropVaultApp;
use dropvault::DropVaultConfig;
use eframe::CreationContext;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dropvault=info")),
        )
        .init();

    let config = DropVaultConfig::load()?;
    tracing::info!(
        max_file_size = config.max_file_size_bytes,
        tick_interval_ms = config.tick_interval_ms,
        allowed_types = config.allowed_media_types.len(),
        "Loaded configuration"
    );
    let app = DropVaultApp::new(config)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DropVault",
        options,
        Box::new(move |_cc: &CreationContext| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("failed to start DropVault window: {e}"))
}
