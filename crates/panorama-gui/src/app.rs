use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

use panorama_core::assets::LoadCompletion;
use panorama_core::config::ViewerConfig;
use panorama_core::viewer::ImageViewer;
use tracing::{error, info};

use crate::display::{BarIndicator, EguiDisplay};
use crate::messages::LoaderResult;
use crate::panels;
use crate::touch::TouchTracker;
use crate::worker::{spawn_loader, ChannelLoader};

pub type Viewer = ImageViewer<ChannelLoader, EguiDisplay, BarIndicator>;

pub struct PanoramaApp {
    pub result_tx: mpsc::Sender<LoaderResult>,
    pub result_rx: mpsc::Receiver<LoaderResult>,
    pub viewer: Option<Viewer>,
    /// Config waiting for the first frame that knows the container size.
    pub pending_config: Option<ViewerConfig>,
    pub config_path: Option<PathBuf>,
    pub touches: TouchTracker,
    pub status: String,
    pub show_about: bool,
    generation: u64,
    max_texture_side: usize,
}

impl PanoramaApp {
    pub fn new(ctx: &egui::Context, config_path: Option<PathBuf>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();

        let mut status = String::new();
        let config = match config_path.as_deref() {
            Some(path) => match ViewerConfig::load(path) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded viewer config");
                    config
                }
                Err(e) => {
                    error!(path = %path.display(), "Failed to load config: {e}");
                    status = format!("Config error: {e}");
                    ViewerConfig::default()
                }
            },
            None => ViewerConfig::default(),
        };

        Self {
            result_tx,
            result_rx,
            viewer: None,
            pending_config: Some(config),
            config_path,
            touches: TouchTracker::default(),
            status,
            show_about: false,
            generation: 0,
            max_texture_side: ctx.input(|i| i.max_texture_side),
        }
    }

    /// Locators are relative to the config file's directory, or to the
    /// working directory when running on defaults.
    fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Build the viewer from the pending config once the container size is known.
    pub fn ensure_viewer(&mut self, ctx: &egui::Context, container_size: [f32; 2]) {
        let Some(config) = self.pending_config.take() else {
            return;
        };

        self.generation += 1;
        self.touches.clear();
        let loader = spawn_loader(
            self.base_dir(),
            self.max_texture_side,
            self.generation,
            self.result_tx.clone(),
            ctx.clone(),
        );
        let display = EguiDisplay::new(config.zoom.min_scale);

        match ImageViewer::new(config, container_size, loader, display, BarIndicator::default()) {
            Ok(mut viewer) => {
                viewer.start(Instant::now());
                self.viewer = Some(viewer);
                ctx.request_repaint();
            }
            Err(e) => {
                error!("Failed to start viewer: {e}");
                self.status = format!("Viewer error: {e}");
                self.viewer = None;
            }
        }
    }

    /// Replace the running viewer. Results still in flight from the old
    /// loader are dropped by generation.
    pub fn open_config(&mut self, path: PathBuf, config: ViewerConfig) {
        info!(path = %path.display(), "Opening viewer config");
        self.status = format!("Config: {}", path.display());
        self.config_path = Some(path);
        self.pending_config = Some(config);
        self.viewer = None;
    }

    /// Drain all pending results from background threads.
    fn poll_results(&mut self, ctx: &egui::Context, now: Instant) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                LoaderResult::Loaded {
                    generation,
                    completion,
                } => {
                    if generation != self.generation {
                        continue;
                    }
                    if let Err(ref message) = completion.outcome {
                        self.status = format!("Failed to load {}: {message}", completion.tier);
                    }
                    if let Some(viewer) = self.viewer.as_mut() {
                        viewer.on_asset_loaded(upload_texture(ctx, completion), now);
                    }
                }
                LoaderResult::ConfigOpened { path, config } => {
                    self.open_config(path, config);
                }
                LoaderResult::Error { message } => {
                    error!("{message}");
                    self.status = message;
                }
            }
        }
    }
}

fn upload_texture(
    ctx: &egui::Context,
    completion: LoadCompletion<egui::ColorImage>,
) -> LoadCompletion<egui::TextureHandle> {
    let LoadCompletion {
        tier,
        locator,
        outcome,
    } = completion;
    let outcome =
        outcome.map(|image| ctx.load_texture(locator.as_str(), image, egui::TextureOptions::LINEAR));
    LoadCompletion {
        tier,
        locator,
        outcome,
    }
}

impl eframe::App for PanoramaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.poll_results(ctx, now);

        if let Some(viewer) = self.viewer.as_mut() {
            viewer.tick(now);
            if let Some(deadline) = viewer.next_deadline() {
                ctx.request_repaint_after(deadline.saturating_duration_since(now));
            }
        }

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Panorama")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Panorama");
                        ui.label("Multi-resolution image viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
