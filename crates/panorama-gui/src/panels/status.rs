use panorama_core::switcher::SwitchState;

use crate::app::PanoramaApp;

pub fn show(ctx: &egui::Context, app: &mut PanoramaApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            if let Some(viewer) = app.viewer.as_ref() {
                ui.label(format!("Tier: {}", viewer.current_tier()));
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", viewer.viewport_state().scale * 100.0));
                ui.separator();
                match viewer.switch_state() {
                    SwitchState::Idle => ui.label("Idle"),
                    SwitchState::Loading(tier) => ui.label(format!(
                        "Loading {tier} ({}%)",
                        viewer.indicator().percent
                    )),
                };
                if let Some(locator) = viewer.displayed_locator() {
                    ui.separator();
                    ui.label(locator);
                }
            }
            if !app.status.is_empty() {
                ui.separator();
                ui.label(&app.status);
            }
        });
        ui.add_space(2.0);
    });
}
