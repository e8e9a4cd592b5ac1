use tracing::debug;

use crate::consts::PINCH_DISTANCE_EPSILON;
use crate::sink::CursorMode;
use crate::viewport::ViewportState;

/// A finger position in container pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Raw input the viewer reacts to, in container pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Positive `delta_y` scrolls away from the user and zooms out.
    Wheel { delta_y: f32 },
    MouseDown { x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    MouseUp,
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    /// `remaining` holds the fingers still on the surface.
    TouchEnd { remaining: Vec<TouchPoint> },
    DoubleClick,
    Resize { width: f32, height: f32 },
}

/// What an input event asks the viewer to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAction {
    None,
    /// Set the scale to this (not yet clamped) value.
    Zoom { scale: f32 },
    /// Set the translation to this (not yet clamped) value.
    Pan { translate_x: f32, translate_y: f32 },
    Cursor(CursorMode),
    Reset,
    Resize { width: f32, height: f32 },
}

/// Anchor between the pointer and the translation, held while dragging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    anchor_x: f32,
    anchor_y: f32,
}

impl DragSession {
    pub fn begin(x: f32, y: f32, state: &ViewportState) -> Self {
        Self {
            anchor_x: x - state.translate_x,
            anchor_y: y - state.translate_y,
        }
    }

    pub fn translation_at(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.anchor_x, y - self.anchor_y)
    }
}

/// Finger spread and scale captured when the second finger lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSession {
    initial_distance: f32,
    initial_scale: f32,
}

impl PinchSession {
    pub fn begin(a: TouchPoint, b: TouchPoint, scale: f32) -> Self {
        Self {
            initial_distance: touch_distance(a, b),
            initial_scale: scale,
        }
    }

    pub fn initial_distance(&self) -> f32 {
        self.initial_distance
    }

    /// Scale for the current spread, before clamping. A degenerate starting
    /// spread keeps the starting scale.
    pub fn scale_at(&self, current_distance: f32) -> f32 {
        let degenerate = self.initial_distance.is_nan() || self.initial_distance <= PINCH_DISTANCE_EPSILON;
        if degenerate || !current_distance.is_finite() {
            return self.initial_scale;
        }
        let scale = self.initial_scale * current_distance / self.initial_distance;
        if scale.is_finite() {
            scale
        } else {
            self.initial_scale
        }
    }
}

pub fn touch_distance(a: TouchPoint, b: TouchPoint) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Turns input events into [`GestureAction`]s, tracking drag and pinch sessions.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    drag: Option<DragSession>,
    pinch: Option<PinchSession>,
    wheel_zoom_in: f32,
    wheel_zoom_out: f32,
}

impl GestureTracker {
    pub fn new(wheel_zoom_in: f32, wheel_zoom_out: f32) -> Self {
        Self {
            drag: None,
            pinch: None,
            wheel_zoom_in,
            wheel_zoom_out,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Drop any drag or pinch in progress.
    pub fn cancel(&mut self) {
        self.drag = None;
        self.pinch = None;
    }

    pub fn handle(&mut self, event: &InputEvent, state: &ViewportState) -> GestureAction {
        match event {
            InputEvent::Wheel { delta_y } => {
                if *delta_y == 0.0 || delta_y.is_nan() {
                    return GestureAction::None;
                }
                let factor = if *delta_y > 0.0 {
                    self.wheel_zoom_out
                } else {
                    self.wheel_zoom_in
                };
                GestureAction::Zoom {
                    scale: state.scale * factor,
                }
            }
            InputEvent::MouseDown { x, y } => {
                self.drag = Some(DragSession::begin(*x, *y, state));
                GestureAction::Cursor(CursorMode::Grabbing)
            }
            InputEvent::MouseMove { x, y } => match self.drag {
                Some(drag) => {
                    let (translate_x, translate_y) = drag.translation_at(*x, *y);
                    GestureAction::Pan {
                        translate_x,
                        translate_y,
                    }
                }
                None => GestureAction::None,
            },
            InputEvent::MouseUp => {
                self.drag = None;
                GestureAction::Cursor(CursorMode::Grab)
            }
            InputEvent::TouchStart { touches } => {
                self.begin_touches(touches, state);
                GestureAction::None
            }
            InputEvent::TouchMove { touches } => self.move_touches(touches, state),
            InputEvent::TouchEnd { remaining } => {
                self.drag = None;
                self.pinch = None;
                self.begin_touches(remaining, state);
                GestureAction::None
            }
            InputEvent::DoubleClick => GestureAction::Reset,
            InputEvent::Resize { width, height } => GestureAction::Resize {
                width: *width,
                height: *height,
            },
        }
    }

    fn begin_touches(&mut self, touches: &[TouchPoint], state: &ViewportState) {
        match touches {
            [] => {}
            [single] => {
                self.pinch = None;
                self.drag = Some(DragSession::begin(single.x, single.y, state));
            }
            [a, b] => {
                self.drag = None;
                let pinch = PinchSession::begin(*a, *b, state.scale);
                debug!(
                    "Pinch started at distance {:.1}, scale {:.2}",
                    pinch.initial_distance(),
                    state.scale
                );
                self.pinch = Some(pinch);
            }
            // Extra fingers neither start nor restart a pinch.
            _ => self.drag = None,
        }
    }

    fn move_touches(&mut self, touches: &[TouchPoint], state: &ViewportState) -> GestureAction {
        match touches {
            [a, b] => match self.pinch {
                Some(pinch) => GestureAction::Zoom {
                    scale: pinch.scale_at(touch_distance(*a, *b)),
                },
                None => {
                    self.begin_touches(touches, state);
                    GestureAction::None
                }
            },
            [single] => match self.drag {
                Some(drag) => {
                    let (translate_x, translate_y) = drag.translation_at(single.x, single.y);
                    GestureAction::Pan {
                        translate_x,
                        translate_y,
                    }
                }
                None => GestureAction::None,
            },
            _ => GestureAction::None,
        }
    }
}
