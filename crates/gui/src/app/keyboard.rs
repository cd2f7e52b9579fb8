//! Keyboard shortcut handling

use eframe::egui;
use shared::InteractionMode;

use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Mode hotkeys, in toolbar order
pub const MODE_KEYS: [(egui::Key, InteractionMode); 4] = [
    (egui::Key::Q, InteractionMode::Action),
    (egui::Key::W, InteractionMode::Position),
    (egui::Key::E, InteractionMode::Rotation),
    (egui::Key::R, InteractionMode::Scale),
];

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        let plain = !i.modifiers.command && !i.modifiers.alt;

        // Ctrl+Z: undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            state.controller.undo();
        }
        // Ctrl+Shift+Z or Ctrl+Y: redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            state.controller.redo();
        }

        if plain {
            for (key, mode) in MODE_KEYS {
                if i.key_pressed(key) {
                    state.controller.apply_mode(mode);
                }
            }
        }

        // Escape: drop highlight and gizmo attachment
        if i.key_pressed(egui::Key::Escape) {
            state.controller.clear_selection();
        }

        // F: focus camera on the picked mesh
        if plain && i.key_pressed(egui::Key::F) {
            if let Some(id) = state.controller.gizmo_mesh().map(str::to_owned) {
                if let Some(center) = viewport.aabb_center(&mut state.controller, &id) {
                    viewport.focus_on(center);
                }
            }
        }
    });
}
