//! Mode toolbar: one toggle per interaction mode

use egui::Ui;
use shared::InteractionMode;

use crate::app::keyboard::MODE_KEYS;
use crate::app::styles::mode_color;
use crate::i18n::t;
use crate::state::AppState;

pub fn mode_label(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Action => t("mode.action"),
        InteractionMode::Position => t("mode.position"),
        InteractionMode::Scale => t("mode.scale"),
        InteractionMode::Rotation => t("mode.rotation"),
    }
}

fn mode_tip(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Action => t("tip.action"),
        InteractionMode::Position => t("tip.position"),
        InteractionMode::Scale => t("tip.scale"),
        InteractionMode::Rotation => t("tip.rotation"),
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let current = state.controller.mode();

        for (key, mode) in MODE_KEYS {
            let text = egui::RichText::new(format!("{}  {}", mode_label(mode), key.name()))
                .color(mode_color(mode));
            let response = ui
                .selectable_label(current == mode, text)
                .on_hover_text(mode_tip(mode));
            if response.clicked() {
                // Route through the string entry point like every other caller
                if let Err(e) = state.controller.set_mode(mode.as_str()) {
                    state.last_error = Some(e.to_string());
                }
            }
        }

        ui.separator();

        if ui
            .add_enabled(state.controller.scene.can_undo(), egui::Button::new("⟲"))
            .on_hover_text(t("menu.undo"))
            .clicked()
        {
            state.controller.undo();
        }
        if ui
            .add_enabled(state.controller.scene.can_redo(), egui::Button::new("⟳"))
            .on_hover_text(t("menu.redo"))
            .clicked()
        {
            state.controller.redo();
        }
    });
}
