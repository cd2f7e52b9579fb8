//! Viewport overlay drawing (axis labels, camera info, gizmo hint)

use egui::Painter;
use glam::Vec3;

use crate::i18n::t;
use crate::state::AppState;

use super::camera::ArcBallCamera;

/// Draw axis labels at the axis tips
pub fn draw_axis_labels(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, length: f32) {
    let labels = [
        (Vec3::X, "X", egui::Color32::from_rgb(220, 70, 70)),
        (Vec3::Y, "Y", egui::Color32::from_rgb(70, 200, 70)),
        (Vec3::Z, "Z", egui::Color32::from_rgb(70, 110, 220)),
    ];

    for (dir, label, color) in labels {
        if let Some(screen) = camera.project(dir * (length + 0.1), rect) {
            if rect.contains(screen) {
                painter.text(
                    screen,
                    egui::Align2::LEFT_BOTTOM,
                    label,
                    egui::FontId::monospace(12.0),
                    color,
                );
            }
        }
    }
}

/// Camera eye position in the bottom-left corner
pub fn draw_camera_info(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera) {
    let eye = camera.eye_position();
    painter.text(
        rect.left_bottom() + egui::vec2(8.0, -8.0),
        egui::Align2::LEFT_BOTTOM,
        format!("{} ({:.1}, {:.1}, {:.1})", t("vp.camera"), eye.x, eye.y, eye.z),
        egui::FontId::monospace(11.0),
        egui::Color32::from_gray(150),
    );
}

/// Mesh name next to the gizmo, and a hint when nothing is picked
pub fn draw_gizmo_label(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, state: &AppState) {
    let controller = &state.controller;
    let Some(id) = controller.gizmo_mesh() else {
        painter.text(
            rect.center_top() + egui::vec2(0.0, 10.0),
            egui::Align2::CENTER_TOP,
            t("vp.click_hint"),
            egui::FontId::proportional(13.0),
            egui::Color32::from_gray(170),
        );
        return;
    };

    let Some(center) = controller.gizmo_center() else {
        return;
    };
    if let Some(p) = camera.project(center, rect) {
        let name = controller
            .scene
            .get_node(id)
            .map(|n| n.name.as_str())
            .unwrap_or(id);
        painter.text(
            p + egui::vec2(10.0, 10.0),
            egui::Align2::LEFT_TOP,
            name,
            egui::FontId::proportional(12.0),
            egui::Color32::from_rgb(200, 255, 200),
        );
    }
}
