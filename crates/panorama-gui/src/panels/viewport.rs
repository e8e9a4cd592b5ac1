use std::time::Instant;

use panorama_core::gesture::{InputEvent, TouchPoint};

use crate::app::PanoramaApp;
use crate::display::{BarIndicator, EguiDisplay};
use crate::touch::TouchTracker;

const PROGRESS_BAR_HEIGHT: f32 = 3.0;

pub fn show(ctx: &egui::Context, app: &mut PanoramaApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            paint_background(ui, rect);

            app.ensure_viewer(ctx, [rect.width(), rect.height()]);
            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

            let Some(viewer) = app.viewer.as_mut() else {
                show_placeholder(ui, &app.status);
                return;
            };

            let now = Instant::now();
            if viewer.viewport().container_size() != [rect.width(), rect.height()] {
                viewer.handle_input(
                    &InputEvent::Resize {
                        width: rect.width(),
                        height: rect.height(),
                    },
                    now,
                );
            }
            for event in collect_input(ui, &response, rect, &mut app.touches, viewer.is_dragging()) {
                viewer.handle_input(&event, now);
            }

            if response.hovered() {
                ctx.set_cursor_icon(viewer.display().cursor_icon());
            }

            if !paint_image(ui, rect, viewer.display()) {
                show_placeholder(ui, "Loading...");
            }
            paint_progress(ui, rect, viewer.indicator());
        });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(20));
}

/// Translate this frame's egui input into viewer events, in coordinates
/// relative to the panel's top-left corner. Touch input wins over the
/// pointer events egui synthesizes from it.
fn collect_input(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: egui::Rect,
    touches: &mut TouchTracker,
    dragging: bool,
) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let origin = rect.min;

    ui.input(|i| {
        let mut saw_touch = false;
        for event in &i.events {
            if let egui::Event::Touch { id, phase, pos, .. } = event {
                saw_touch = true;
                if *phase == egui::TouchPhase::Start && !rect.contains(*pos) {
                    continue;
                }
                let p = *pos - origin;
                if let Some(e) = touches.apply(*id, *phase, TouchPoint::new(p.x, p.y)) {
                    events.push(e);
                }
            }
        }
        if saw_touch || touches.is_active() {
            return;
        }

        if response.hovered() && i.raw_scroll_delta.y != 0.0 {
            // egui reports scrolling toward the user as negative
            events.push(InputEvent::Wheel {
                delta_y: -i.raw_scroll_delta.y,
            });
        }

        let pointer = i.pointer.latest_pos().map(|p| p - origin);
        if let Some(p) = pointer {
            if i.pointer.primary_pressed() && response.hovered() {
                events.push(InputEvent::MouseDown { x: p.x, y: p.y });
            } else if dragging && i.pointer.is_moving() {
                events.push(InputEvent::MouseMove { x: p.x, y: p.y });
            }
        }
        if i.pointer.primary_released() && (dragging || response.hovered()) {
            events.push(InputEvent::MouseUp);
        }
    });

    if response.double_clicked() {
        events.push(InputEvent::DoubleClick);
    }
    events
}

/// Paint the displayed tier filling the container, scaled about its center and
/// shifted by the translation. Returns false when nothing is loaded yet.
fn paint_image(ui: &egui::Ui, rect: egui::Rect, display: &EguiDisplay) -> bool {
    let Some(texture) = display.texture.as_ref() else {
        return false;
    };

    let t = display.transform;
    let center = rect.center() + egui::vec2(t.translate_x, t.translate_y);
    let img_rect = egui::Rect::from_center_size(center, rect.size() * t.scale);

    ui.painter_at(rect).image(
        texture.id(),
        img_rect,
        cover_uv(texture.size_vec2(), rect.size()),
        egui::Color32::WHITE,
    );
    true
}

/// UV window that crops the image to the container's aspect ratio, centered.
fn cover_uv(image: egui::Vec2, container: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || container.x <= 0.0 || container.y <= 0.0 {
        return full;
    }

    let image_aspect = image.x / image.y;
    let container_aspect = container.x / container.y;
    if image_aspect > container_aspect {
        let span = container_aspect / image_aspect;
        let min = (1.0 - span) / 2.0;
        egui::Rect::from_min_max(egui::pos2(min, 0.0), egui::pos2(min + span, 1.0))
    } else {
        let span = image_aspect / container_aspect;
        let min = (1.0 - span) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, min), egui::pos2(1.0, min + span))
    }
}

fn paint_progress(ui: &egui::Ui, rect: egui::Rect, indicator: &BarIndicator) {
    if !indicator.visible {
        return;
    }
    let bar = egui::Rect::from_min_size(
        rect.min,
        egui::vec2(rect.width() * indicator.fraction(), PROGRESS_BAR_HEIGHT),
    );
    ui.painter()
        .rect_filled(bar, 0.0, egui::Color32::from_rgb(90, 170, 255));
}

fn show_placeholder(ui: &mut egui::Ui, text: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(120)),
        );
    });
}
