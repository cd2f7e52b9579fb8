//! Wireframe rendering for the viewport, used when no GL context is available

use std::collections::HashMap;

use egui::{Color32, Rect, Stroke, Ui};
use glam::Vec3;

use super::camera::ArcBallCamera;
use super::mesh::{LineMeshData, MeshData};
use crate::state::settings::{AxisSettings, GridSettings};
use crate::state::AppState;

/// Paint the 3D viewport using egui's painter (wireframe rendering)
pub fn paint_viewport(
    ui: &Ui,
    rect: Rect,
    camera: &ArcBallCamera,
    state: &AppState,
    meshes: &HashMap<String, MeshData>,
    grid_y: f32,
    gizmo: Option<&LineMeshData>,
) {
    let painter = ui.painter_at(rect);

    let [r, g, b] = state.settings.viewport.background_color;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(r, g, b));

    if state.settings.grid.visible {
        draw_grid(&painter, rect, camera, &state.settings.grid, grid_y);
    }
    if state.settings.axes.visible {
        draw_axes(&painter, rect, camera, &state.settings.axes);
    }

    let eye = camera.eye_position();
    for (id, mesh) in meshes {
        let highlighted = state
            .controller
            .scene
            .get_node(id)
            .is_some_and(|n| n.material.is_some());
        draw_mesh_wireframe(&painter, rect, camera, eye, mesh, highlighted);
    }

    if let Some(lines) = gizmo {
        draw_line_mesh(&painter, rect, camera, lines, 2.5);
    }
}

fn draw_grid(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    settings: &GridSettings,
    y: f32,
) {
    let alpha = (settings.opacity * 255.0) as u8;
    let stroke = Stroke::new(0.5, Color32::from_rgba_unmultiplied(110, 110, 120, alpha));

    let range = settings.range;
    let step = settings.size;
    let extent = range as f32 * step;

    for i in -range..=range {
        let f = i as f32 * step;
        draw_line_3d(painter, rect, camera, Vec3::new(f, y, -extent), Vec3::new(f, y, extent), stroke);
        draw_line_3d(painter, rect, camera, Vec3::new(-extent, y, f), Vec3::new(extent, y, f), stroke);
    }
}

fn draw_axes(painter: &egui::Painter, rect: Rect, camera: &ArcBallCamera, settings: &AxisSettings) {
    let axes = [
        (Vec3::X, "X", Color32::from_rgb(220, 50, 50)),
        (Vec3::Y, "Y", Color32::from_rgb(50, 200, 50)),
        (Vec3::Z, "Z", Color32::from_rgb(50, 100, 220)),
    ];
    for (dir, label, color) in axes {
        let tip = dir * settings.length;
        draw_line_3d(painter, rect, camera, Vec3::ZERO, tip, Stroke::new(2.0, color));
        if settings.show_labels {
            if let Some(p) = camera.project(tip, rect) {
                painter.text(p, egui::Align2::LEFT_BOTTOM, label, egui::FontId::monospace(10.0), color);
            }
        }
    }
}

/// Triangle edges of front-facing triangles, tinted by vertex color
fn draw_mesh_wireframe(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    eye: Vec3,
    mesh: &MeshData,
    highlighted: bool,
) {
    let width = if highlighted { 1.2 } else { 0.7 };

    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.position(i as usize));
        let normal = (b - a).cross(c - a);
        if normal.dot(eye - a) <= 0.0 {
            continue;
        }
        let base = tri[0] as usize * 9 + 6;
        let color = Color32::from_rgb(
            (mesh.vertices[base] * 255.0) as u8,
            (mesh.vertices[base + 1] * 255.0) as u8,
            (mesh.vertices[base + 2] * 255.0) as u8,
        );
        let stroke = Stroke::new(width, color);
        draw_line_3d(painter, rect, camera, a, b, stroke);
        draw_line_3d(painter, rect, camera, b, c, stroke);
        draw_line_3d(painter, rect, camera, c, a, stroke);
    }
}

fn draw_line_mesh(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    lines: &LineMeshData,
    width: f32,
) {
    for seg in lines.vertices.chunks_exact(14) {
        let a = Vec3::new(seg[0], seg[1], seg[2]);
        let b = Vec3::new(seg[7], seg[8], seg[9]);
        let color = Color32::from_rgba_unmultiplied(
            (seg[3] * 255.0) as u8,
            (seg[4] * 255.0) as u8,
            (seg[5] * 255.0) as u8,
            (seg[6] * 255.0) as u8,
        );
        draw_line_3d(painter, rect, camera, a, b, Stroke::new(width, color));
    }
}

fn draw_line_3d(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    a: Vec3,
    b: Vec3,
    stroke: Stroke,
) {
    if let (Some(pa), Some(pb)) = (camera.project(a, rect), camera.project(b, rect)) {
        painter.line_segment([pa, pb], stroke);
    }
}
