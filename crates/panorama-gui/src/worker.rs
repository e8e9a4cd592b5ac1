use std::path::{Path, PathBuf};
use std::sync::mpsc;

use panorama_core::assets::{AssetLoader, LoadCompletion, LoadRequest};
use panorama_core::io::variants::load_master;
use tracing::{debug, warn};

use crate::convert::to_color_image;
use crate::messages::LoaderResult;

/// [`AssetLoader`] that forwards requests to the loader thread. Textures are
/// created on the UI thread once the decoded image comes back.
pub struct ChannelLoader {
    cmd_tx: mpsc::Sender<LoadRequest>,
}

impl AssetLoader for ChannelLoader {
    type Asset = egui::TextureHandle;

    fn load(&mut self, request: LoadRequest) {
        debug!(tier = %request.tier, locator = %request.locator, "Queueing load");
        if self.cmd_tx.send(request).is_err() {
            warn!("Loader thread is gone, request dropped");
        }
    }
}

/// Spawn the loader thread. Locators are resolved against `base_dir` and every
/// file is decoded on the rayon pool so several tiers can decode at once.
pub fn spawn_loader(
    base_dir: PathBuf,
    max_texture_side: usize,
    generation: u64,
    result_tx: mpsc::Sender<LoaderResult>,
    ctx: egui::Context,
) -> ChannelLoader {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoadRequest>();

    std::thread::Builder::new()
        .name("panorama-loader".into())
        .spawn(move || {
            loader_loop(cmd_rx, &base_dir, max_texture_side, generation, result_tx, ctx);
        })
        .expect("Failed to spawn loader thread");

    ChannelLoader { cmd_tx }
}

fn send(tx: &mpsc::Sender<LoaderResult>, ctx: &egui::Context, result: LoaderResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn loader_loop(
    cmd_rx: mpsc::Receiver<LoadRequest>,
    base_dir: &Path,
    max_texture_side: usize,
    generation: u64,
    tx: mpsc::Sender<LoaderResult>,
    ctx: egui::Context,
) {
    while let Ok(request) = cmd_rx.recv() {
        let path = base_dir.join(&request.locator);
        let tx = tx.clone();
        let ctx = ctx.clone();
        rayon::spawn(move || {
            let completion = match load_master(&path) {
                Ok(image) => {
                    debug!(path = %path.display(), "Decoded");
                    LoadCompletion::success(request, to_color_image(&image, max_texture_side))
                }
                Err(e) => LoadCompletion::failure(request, format!("{}: {e}", path.display())),
            };
            send(&tx, &ctx, LoaderResult::Loaded { generation, completion });
        });
    }
    debug!(generation, "Loader thread exiting");
}
