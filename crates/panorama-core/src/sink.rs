//! Collaborator interfaces the viewer drives. The host (a window, a canvas,
//! a test recorder) implements them; the core never touches pixels itself.

use crate::viewport::ViewportState;

/// Pointer cursor shown over the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorMode {
    Grab,
    Grabbing,
}

/// Where the displayed asset and its transform end up.
pub trait DisplaySink<A> {
    /// Replace the displayed asset. `asset` is the handle the loader produced for `locator`.
    fn set_background_asset(&mut self, locator: &str, asset: &A);

    /// Repaint with the given (already clamped) transform.
    fn set_transform(&mut self, state: ViewportState);

    fn set_cursor(&mut self, mode: CursorMode);
}

/// Loading bar shown while a tier is fetched on demand.
pub trait LoadingIndicator {
    fn show(&mut self);
    fn hide(&mut self);
    fn set_progress_percent(&mut self, percent: u8);
}
