mod app;
mod convert;
mod display;
mod messages;
mod panels;
mod touch;
mod worker;

use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([320.0, 240.0])
            .with_title("Panorama"),
        ..Default::default()
    };

    eframe::run_native(
        "Panorama",
        options,
        Box::new(move |cc| Ok(Box::new(app::PanoramaApp::new(&cc.egui_ctx, config_path)))),
    )
}
