use panorama_core::sink::{CursorMode, DisplaySink, LoadingIndicator};
use panorama_core::viewport::ViewportState;

/// What the viewport panel paints: the current tier's texture, its transform
/// and the cursor to show while hovering.
pub struct EguiDisplay {
    pub texture: Option<egui::TextureHandle>,
    pub transform: ViewportState,
    pub cursor: CursorMode,
}

impl EguiDisplay {
    pub fn new(scale: f32) -> Self {
        Self {
            texture: None,
            transform: ViewportState::identity(scale),
            cursor: CursorMode::Grab,
        }
    }

    pub fn cursor_icon(&self) -> egui::CursorIcon {
        match self.cursor {
            CursorMode::Grab => egui::CursorIcon::Grab,
            CursorMode::Grabbing => egui::CursorIcon::Grabbing,
        }
    }
}

impl DisplaySink<egui::TextureHandle> for EguiDisplay {
    fn set_background_asset(&mut self, _locator: &str, asset: &egui::TextureHandle) {
        self.texture = Some(asset.clone());
    }

    fn set_transform(&mut self, state: ViewportState) {
        self.transform = state;
    }

    fn set_cursor(&mut self, mode: CursorMode) {
        self.cursor = mode;
    }
}

/// Thin loading bar along the top edge of the viewport.
#[derive(Default)]
pub struct BarIndicator {
    pub visible: bool,
    pub percent: u8,
}

impl BarIndicator {
    pub fn fraction(&self) -> f32 {
        f32::from(self.percent.min(100)) / 100.0
    }
}

impl LoadingIndicator for BarIndicator {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn set_progress_percent(&mut self, percent: u8) {
        self.percent = percent;
    }
}
