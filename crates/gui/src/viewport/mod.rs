//! 3D viewport panel with OpenGL rendering

mod gl_renderer;
mod overlays;
mod renderer;
pub use gizmo_scene_lib::viewport::{camera, gizmo, interaction, mesh};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use egui::Ui;
use shared::{CameraDescription, SceneDescription, DEFAULT_DIFFUSE, GROUND_ID};

use crate::state::controller::SceneController;
use crate::state::AppState;
use camera::ArcBallCamera;
use gizmo::build_gizmo_lines;
use gl_renderer::GlRenderer;
use interaction::{gizmo_world_size, PointerTool, PressOutcome};
use mesh::{LineMeshData, MeshData};

/// Lift above the ground's top face so the grid is not z-fighting with it
const GRID_LIFT: f32 = 0.002;

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    camera: ArcBallCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    pointer: PointerTool,
}

impl ViewportPanel {
    pub fn new(camera: &CameraDescription) -> Self {
        Self {
            camera: ArcBallCamera::from_description(camera),
            gl_renderer: None,
            pointer: PointerTool::default(),
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        match GlRenderer::new(gl) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("GL renderer unavailable, using wireframe fallback: {e}"),
        }
    }

    pub fn destroy_gl(&mut self, gl: &glow::Context) {
        if let Some(renderer) = self.gl_renderer.take() {
            if let Ok(mut r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }

    pub fn reset_camera(&mut self, camera: &CameraDescription) {
        self.camera = ArcBallCamera::from_description(camera);
    }

    /// Focus camera on a specific point
    pub fn focus_on(&mut self, target: glam::Vec3) {
        self.camera.target = target;
    }

    /// AABB center of a mesh, rebuilding the cache if needed
    pub fn aabb_center(&self, controller: &mut SceneController, id: &str) -> Option<glam::Vec3> {
        controller.mesh_cache().aabbs().get(id).map(|aabb| aabb.center())
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        self.handle_pointer(&response, ui, rect, state);
        self.handle_camera(&response, ui);

        if !ui.is_rect_visible(rect) {
            return;
        }

        let gizmo_lines = self.gizmo_lines(state, rect);
        self.render(ui, rect, state, gizmo_lines);
        self.draw_overlays(ui, rect, state);
    }

    /// Picking and gizmo dragging with the primary button
    fn handle_pointer(
        &mut self,
        response: &egui::Response,
        ui: &Ui,
        rect: egui::Rect,
        state: &mut AppState,
    ) {
        let size_px = state.settings.gizmo.size_px;
        let alt = ui.input(|i| i.modifiers.alt);

        self.pointer
            .hover(&state.controller, &self.camera, rect, response.hover_pos(), size_px);

        // Pick on press rather than on click so a press on a handle can turn into a drag
        let pressed = ui.input(|i| i.pointer.primary_pressed());
        if pressed && response.hovered() && !alt {
            if let Some(pos) = response.interact_pointer_pos().or_else(|| response.hover_pos()) {
                match self
                    .pointer
                    .press(&mut state.controller, &self.camera, rect, pos, size_px)
                {
                    PressOutcome::Handle(axis) => tracing::debug!("Grabbed {axis:?} handle"),
                    PressOutcome::Picked(id) => tracing::debug!("Picked '{id}'"),
                    PressOutcome::Miss => {}
                }
            }
        }

        if self.pointer.is_dragging() {
            if response.dragged_by(egui::PointerButton::Primary) {
                if let Some(pos) = response.interact_pointer_pos() {
                    let settings = &state.settings;
                    self.pointer.drag_to(
                        &mut state.controller,
                        &self.camera,
                        rect,
                        pos,
                        size_px,
                        |a| settings.snap_rotation(a),
                    );
                }
            }
            if ui.input(|i| i.pointer.primary_released()) {
                self.pointer.release(&mut state.controller);
            }
        }
    }

    fn handle_camera(&mut self, response: &egui::Response, ui: &Ui) {
        if self.pointer.is_dragging() {
            return;
        }

        if response.dragged_by(egui::PointerButton::Middle)
            || (response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.alt))
        {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(delta.x * 0.01, delta.y * 0.01);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }
    }

    fn gizmo_lines(&self, state: &AppState, rect: egui::Rect) -> Option<LineMeshData> {
        let controller = &state.controller;
        let kind = controller.gizmo()?.kind;
        let center = controller.gizmo_center()?;
        let size = gizmo_world_size(&self.camera, center, rect, state.settings.gizmo.size_px);
        Some(build_gizmo_lines(
            kind,
            center,
            size,
            self.pointer.active_axis(controller),
        ))
    }

    fn render(
        &self,
        ui: &mut Ui,
        rect: egui::Rect,
        state: &mut AppState,
        gizmo_lines: Option<LineMeshData>,
    ) {
        let mesh_color = state.settings.viewport.mesh_color;
        let light = state.controller.scene.scene.light.clone();
        let (grid_y, mut meshes, rebuild_count) = {
            let cache = state.controller.mesh_cache();
            let grid_y = cache
                .aabbs()
                .get(GROUND_ID)
                .map_or(0.0, |aabb| aabb.max.y + GRID_LIFT);
            (grid_y, cache.meshes_clone(), cache.rebuild_count())
        };
        apply_mesh_color(&mut meshes, &state.controller.scene.scene, mesh_color);

        let Some(gl_renderer) = &self.gl_renderer else {
            renderer::paint_viewport(
                ui,
                rect,
                &self.camera,
                state,
                &meshes,
                grid_y,
                gizmo_lines.as_ref(),
            );
            return;
        };

        let version = rebuild_count ^ mesh_color_key(mesh_color);

        let renderer = gl_renderer.clone();
        let camera = self.camera.clone();
        let grid_settings = state.settings.grid.clone();
        let axes_settings = state.settings.axes.clone();
        let bg_color = state.settings.viewport.background_color;

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer.lock() {
                    r.update_grid(gl, &grid_settings);
                    r.update_axes(gl, &axes_settings);
                    r.sync_from_meshes(gl, &meshes, version);
                    r.sync_gizmo(gl, gizmo_lines.as_ref());

                    let params = gl_renderer::RenderParams {
                        viewport,
                        grid_visible: grid_settings.visible,
                        grid_y,
                        axes_visible: axes_settings.visible,
                        bg_color,
                        light: light.clone(),
                    };
                    r.paint(gl, &camera, &params);
                }
            })),
        };

        ui.painter().add(callback);
    }

    fn draw_overlays(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let painter = ui.painter_at(rect);

        if state.settings.axes.visible && state.settings.axes.show_labels && self.gl_renderer.is_some() {
            overlays::draw_axis_labels(&painter, rect, &self.camera, state.settings.axes.length);
        }
        overlays::draw_camera_info(&painter, rect, &self.camera);
        overlays::draw_gizmo_label(&painter, rect, &self.camera, state);
    }
}

/// Recolor unhighlighted meshes with the user's mesh color
fn apply_mesh_color(meshes: &mut HashMap<String, MeshData>, scene: &SceneDescription, color: [f32; 3]) {
    if color == DEFAULT_DIFFUSE {
        return;
    }
    for (id, mesh) in meshes.iter_mut() {
        if scene.node(id).is_some_and(|n| n.material.is_none()) {
            mesh.set_color(color);
        }
    }
}

/// Folds the default mesh color into the upload key so a color change re-uploads
fn mesh_color_key(color: [f32; 3]) -> u64 {
    color
        .iter()
        .fold(0u64, |acc, c| acc.rotate_left(21) ^ u64::from(c.to_bits()))
}
