#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod bridge;
mod state;
mod ui;

use tracing_subscriber::EnvFilter;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let wallet_bridge = bridge::WalletBridge::from_env()
        .map_err(|e| eyre::eyre!("failed to initialize wallet bridge: {e}"))?;
    tracing::info!(cluster = wallet_bridge.cluster(), "starting Revi DApps");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Revi DApps",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::App::new(cc, wallet_bridge)))),
    )
    .map_err(|e| eyre::eyre!("failed to start ui: {e}"))
}
