use crate::config::ZoomConfig;

/// Current zoom and pan of the displayed image.
///
/// Translation is in container pixels, measured from the centered position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl ViewportState {
    pub fn identity(scale: f32) -> Self {
        Self {
            scale,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

/// Owns the [`ViewportState`] and keeps it inside the zoom and pan bounds.
///
/// Every mutator finishes with [`Viewport::clamp`], so the state observed
/// from outside always satisfies `min_scale <= scale <= max_scale` and
/// `|translate| <= max_offset(scale)`.
#[derive(Clone, Debug)]
pub struct Viewport {
    state: ViewportState,
    min_scale: f32,
    max_scale: f32,
    /// Unscaled content size in container pixels.
    content_size: [f32; 2],
    container_size: [f32; 2],
}

impl Viewport {
    /// Viewport whose content fills the container at scale 1.
    pub fn new(zoom: &ZoomConfig, container_size: [f32; 2]) -> Self {
        Self::with_content_size(zoom, container_size, container_size)
    }

    pub fn with_content_size(
        zoom: &ZoomConfig,
        container_size: [f32; 2],
        content_size: [f32; 2],
    ) -> Self {
        Self {
            state: ViewportState::identity(zoom.min_scale),
            min_scale: zoom.min_scale,
            max_scale: zoom.max_scale,
            content_size: sanitize_size(content_size),
            container_size: sanitize_size(container_size),
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn scale(&self) -> f32 {
        self.state.scale
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    pub fn container_size(&self) -> [f32; 2] {
        self.container_size
    }

    pub fn content_size(&self) -> [f32; 2] {
        self.content_size
    }

    /// Clamp a candidate scale into `[min_scale, max_scale]`. A non-finite
    /// candidate leaves the current scale unchanged.
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        if scale.is_finite() {
            scale.clamp(self.min_scale, self.max_scale)
        } else {
            self.state.scale
        }
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.state.scale = self.clamp_scale(scale);
        self.clamp();
    }

    pub fn set_translation(&mut self, translate_x: f32, translate_y: f32) {
        self.state.translate_x = translate_x;
        self.state.translate_y = translate_y;
        self.clamp();
    }

    /// Multiply the scale by `scale_factor` and shift the translation.
    pub fn apply_delta(&mut self, scale_factor: f32, dx: f32, dy: f32) {
        self.state.scale = self.clamp_scale(self.state.scale * scale_factor);
        self.state.translate_x += dx;
        self.state.translate_y += dy;
        self.clamp();
    }

    /// Largest allowed `|translate_x|` and `|translate_y|` at the current scale.
    pub fn max_offset(&self) -> (f32, f32) {
        if self.state.scale <= self.min_scale {
            return (0.0, 0.0);
        }
        let scaled_w = self.content_size[0] * self.state.scale;
        let scaled_h = self.content_size[1] * self.state.scale;
        let max_x = ((scaled_w - self.container_size[0]) / 2.0).max(0.0);
        let max_y = ((scaled_h - self.container_size[1]) / 2.0).max(0.0);
        (max_x, max_y)
    }

    pub fn clamp(&mut self) {
        self.state.scale = self.clamp_scale(self.state.scale);

        if self.state.scale <= self.min_scale {
            self.state.translate_x = 0.0;
            self.state.translate_y = 0.0;
            return;
        }

        let (max_x, max_y) = self.max_offset();
        self.state.translate_x = clamp_offset(self.state.translate_x, max_x);
        self.state.translate_y = clamp_offset(self.state.translate_y, max_y);
    }

    /// Back to `min_scale`, centered.
    pub fn reset_transform(&mut self) {
        self.state = ViewportState::identity(self.min_scale);
    }

    pub fn resize(&mut self, container_size: [f32; 2], content_size: [f32; 2]) {
        self.container_size = sanitize_size(container_size);
        self.content_size = sanitize_size(content_size);
        self.clamp();
    }
}

fn clamp_offset(value: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-max, max)
    } else {
        0.0
    }
}

fn sanitize_size(size: [f32; 2]) -> [f32; 2] {
    size.map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 })
}
