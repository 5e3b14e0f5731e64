use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::DashboardApp;

#[derive(Parser, Debug)]
struct Cli {
    /// Base URL of the decision service; overrides dashboard.toml and env.
    #[arg(long)]
    service_url: Option<String>,
    /// Settings file to read instead of ./dashboard.toml.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let settings = config::load_settings(cli.config.as_deref(), cli.service_url);
    tracing::info!(service_url = %settings.service_url, "dashboard starting");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SmartWarehouse AI")
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([1024.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "SmartWarehouse AI",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(cmd_tx, ui_rx, settings)))),
    )
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn cli_accepts_service_url_override() {
        let cli = Cli::try_parse_from(["dashboard_gui", "--service-url", "http://10.0.0.5:9000"])
            .expect("parse");
        assert_eq!(cli.service_url.as_deref(), Some("http://10.0.0.5:9000"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_defaults_to_no_overrides() {
        let cli = Cli::try_parse_from(["dashboard_gui"]).expect("parse");
        assert!(cli.service_url.is_none());
        assert!(cli.config.is_none());
    }
}
