//! GCapricorn - Human Protein Atlas prognostics dashboard

use eframe::egui;
use gcapricorn::config::AppConfig;
use gcapricorn::gui::GCapricornApp;
use gcapricorn::logging;

fn main() -> anyhow::Result<()> {
    logging::init();
    let config = AppConfig::load();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("GCapricorn"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "GCapricorn",
        options,
        Box::new(move |cc| Ok(Box::new(GCapricornApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the dashboard window: {e}"))
}
