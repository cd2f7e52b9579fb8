use egui::Ui;

use crate::app::styles::mode_color;
use crate::i18n::t;
use crate::state::AppState;
use crate::ui::toolbar::mode_label;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let mode = state.controller.mode();
        ui.colored_label(mode_color(mode), format!("{}: {}", t("status.mode"), mode_label(mode)));

        ui.separator();

        match state.controller.gizmo_mesh() {
            Some(id) => {
                let name = state
                    .controller
                    .scene
                    .get_node(id)
                    .map(|n| n.name.as_str())
                    .unwrap_or(id);
                ui.label(format!("{}: {name}", t("status.picked")));
            }
            None => {
                ui.weak(t("status.ready"));
            }
        }

        if let Some(drag) = state.controller.drag() {
            ui.separator();
            ui.colored_label(
                egui::Color32::from_rgb(255, 200, 100),
                format!("{} {:?}", t("status.dragging"), drag.axis),
            );
        }

        if let Some(err) = &state.last_error {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(240, 100, 100), err);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("Gizmo Scene v{}", env!("CARGO_PKG_VERSION")));
        });
    });
}
