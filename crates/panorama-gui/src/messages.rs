use std::path::PathBuf;

use panorama_core::assets::LoadCompletion;
use panorama_core::config::ViewerConfig;

/// Results sent from background threads to the UI thread.
pub enum LoaderResult {
    /// A decoded tier, tagged with the loader generation that requested it.
    Loaded {
        generation: u64,
        completion: LoadCompletion<egui::ColorImage>,
    },

    ConfigOpened { path: PathBuf, config: ViewerConfig },

    Error { message: String },
}
