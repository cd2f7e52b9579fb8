//! Main application module

pub(crate) mod keyboard;
mod menus;
pub(crate) mod styles;

use eframe::egui;

use crate::i18n;
use crate::state::{AppState, Language};
use crate::ui::{properties, status_bar, toolbar};
use crate::viewport::ViewportPanel;
use crate::LaunchOptions;

/// Main application
pub struct EditorApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// Last saved scene version (for autosave)
    last_saved_version: u64,
}

impl EditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, options: LaunchOptions) -> Self {
        let mut state = AppState::default();
        apply_language(state.settings.ui.language);

        // CLI argument takes priority, then autosave
        if let Some(scene) = options.scene {
            state.controller.set_scene(scene);
        } else if let Some(autosave) = crate::state::SceneState::load_autosave() {
            state.controller.set_scene(autosave);
            tracing::info!("Loaded autosave scene");
        }
        if let Some(mode) = options.mode {
            state.controller.apply_mode(mode);
        }

        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let mut viewport = ViewportPanel::new(&state.controller.scene.scene.camera);
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        let last_font_size = state.settings.ui.font_size;
        let last_saved_version = state.controller.scene.version();

        Self {
            state,
            viewport,
            last_font_size,
            last_saved_version,
        }
    }
}

pub(crate) fn apply_language(language: Language) {
    i18n::set_lang(match language {
        Language::Ru => i18n::Lang::Ru,
        Language::En => i18n::Lang::En,
    });
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        // Autosave scene if changed, but never mid-drag
        let current_version = self.state.controller.scene.version();
        if current_version != self.last_saved_version && self.state.controller.drag().is_none() {
            self.state.controller.autosave();
            self.last_saved_version = current_version;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state, &mut self.viewport);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        menus::settings_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        if self.state.panels.toolbar {
            egui::TopBottomPanel::top("toolbar")
                .frame(
                    egui::Frame::side_top_panel(&ctx.style())
                        .inner_margin(egui::Margin::symmetric(8, 4)),
                )
                .show(ctx, |ui| {
                    toolbar::show(ui, &mut self.state);
                });
        }

        // ── Status bar ───────────────────────────────────────
        if self.state.panels.status_bar {
            egui::TopBottomPanel::bottom("status_bar")
                .exact_height(22.0)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style())
                        .inner_margin(egui::Margin::symmetric(8, 2)),
                )
                .show(ctx, |ui| {
                    status_bar::show(ui, &self.state);
                });
        }

        // ── Right panel: Properties ──────────────────────────
        if self.state.panels.properties {
            egui::SidePanel::right("properties")
                .default_width(260.0)
                .width_range(200.0..=420.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("props_scroll")
                        .show(ui, |ui| {
                            properties::show(ui, &mut self.state);
                        });
                });
        }

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        self.state.controller.autosave();
        self.state.settings.save();
        if let Some(gl) = gl {
            self.viewport.destroy_gl(gl);
        }
    }
}
