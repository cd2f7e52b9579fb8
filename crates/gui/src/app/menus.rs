//! Application menu bar and settings window

use eframe::egui;

use crate::i18n::t;
use crate::state::{AppSettings, AppState, Language};
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.new")).clicked() {
            state.controller.set_scene(shared::SceneDescription::default_scene());
            viewport.reset_camera(&state.controller.scene.scene.camera);
            state.last_error = None;
            ui.close_menu();
        }
        if ui.button(t("menu.open")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match crate::state::SceneState::load_from(&path) {
                    Ok(scene) => {
                        state.controller.set_scene(scene);
                        viewport.reset_camera(&state.controller.scene.scene.camera);
                        state.last_error = None;
                        tracing::info!("Loaded scene from {}", path.display());
                    }
                    Err(e) => {
                        tracing::error!("{e}");
                        state.last_error = Some(e);
                    }
                }
            }
        }
        if ui.button(t("menu.save")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.save_title"))
                .add_filter("JSON", &["json"])
                .set_file_name("scene.json")
                .save_file()
            {
                if let Err(e) = state.controller.save_to(&path) {
                    tracing::error!("{e}");
                    state.last_error = Some(e);
                }
            }
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.edit"), |ui| {
        if ui
            .add_enabled(state.controller.scene.can_undo(), egui::Button::new(t("menu.undo")))
            .clicked()
        {
            state.controller.undo();
            ui.close_menu();
        }
        if ui
            .add_enabled(state.controller.scene.can_redo(), egui::Button::new(t("menu.redo")))
            .clicked()
        {
            state.controller.redo();
            ui.close_menu();
        }
        ui.separator();
        if ui
            .add_enabled(
                state.controller.gizmo_mesh().is_some(),
                egui::Button::new(t("menu.deselect")),
            )
            .clicked()
        {
            state.controller.clear_selection();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.toolbar, t("menu.toolbar"));
        ui.checkbox(&mut state.panels.properties, t("menu.properties"));
        ui.checkbox(&mut state.panels.status_bar, t("menu.status_bar"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera(&state.controller.scene.scene.camera);
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for &language in Language::all() {
                if ui
                    .selectable_label(state.settings.ui.language == language, language.display_name())
                    .clicked()
                {
                    state.settings.ui.language = language;
                    super::apply_language(language);
                    ui.close_menu();
                }
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_grid_settings(ui, &mut state.settings);
                show_axes_settings(ui, &mut state.settings);
                show_viewport_settings(ui, &mut state.settings);
                show_gizmo_settings(ui, &mut state.settings);
                show_ui_settings(ui, &mut state.settings);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open && state.show_settings_window;
}

fn show_grid_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.grid"));
    ui.checkbox(&mut settings.grid.visible, t("settings.grid_visible"));

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_size"));
        ui.add(
            egui::DragValue::new(&mut settings.grid.size)
                .speed(0.1)
                .range(0.1..=10.0),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_range"));
        ui.add(egui::DragValue::new(&mut settings.grid.range).speed(1).range(1..=50));
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_opacity"));
        ui.add(egui::Slider::new(&mut settings.grid.opacity, 0.0..=1.0));
    });
    ui.add_space(10.0);
}

fn show_axes_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.axes"));
    ui.checkbox(&mut settings.axes.visible, t("settings.axes_visible"));
    ui.checkbox(&mut settings.axes.show_labels, t("settings.axes_labels"));

    ui.horizontal(|ui| {
        ui.label(t("settings.axes_length"));
        ui.add(
            egui::DragValue::new(&mut settings.axes.length)
                .speed(0.1)
                .range(0.1..=10.0),
        );
    });
    ui.add_space(10.0);
}

fn show_viewport_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.viewport"));
    ui.horizontal(|ui| {
        ui.label(t("settings.bg_color"));
        let [r, g, b] = settings.viewport.background_color;
        let mut color = egui::Color32::from_rgb(r, g, b);
        if ui.color_edit_button_srgba(&mut color).changed() {
            settings.viewport.background_color = [color.r(), color.g(), color.b()];
        }
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.mesh_color"));
        ui.color_edit_button_rgb(&mut settings.viewport.mesh_color);
    });
    ui.add_space(10.0);
}

fn show_gizmo_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.gizmo"));
    ui.horizontal(|ui| {
        ui.label(t("settings.gizmo_size"));
        ui.add(
            egui::DragValue::new(&mut settings.gizmo.size_px)
                .speed(1.0)
                .range(40.0..=240.0)
                .suffix(" px"),
        );
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.rotation_snap"));
        ui.add(
            egui::DragValue::new(&mut settings.gizmo.rotation_snap_deg)
                .speed(1.0)
                .range(0.0..=90.0)
                .suffix("°"),
        );
    });
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.settings.save();
        }
        if ui.button(t("settings.reset")).clicked() {
            state.settings = AppSettings::default();
            super::apply_language(state.settings.ui.language);
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
