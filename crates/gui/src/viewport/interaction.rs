//! Pointer handling shared by the GUI viewport and the headless harness.
//!
//! A primary-button press either grabs a gizmo handle or picks a mesh;
//! subsequent motion is turned into gizmo deltas for the controller.

use glam::Vec3;
use shared::{GizmoKind, ObjectId};

use super::camera::ArcBallCamera;
use super::gizmo::{self, GizmoAxis};
use crate::state::controller::{GizmoDelta, SceneController};

/// What a primary-button press did
#[derive(Debug, Clone, PartialEq)]
pub enum PressOutcome {
    /// Grabbed a gizmo handle; motion now drags it
    Handle(GizmoAxis),
    /// Picked a mesh
    Picked(ObjectId),
    /// Nothing under the pointer
    Miss,
}

/// Gizmo grab state between press and release
#[derive(Debug, Default)]
pub struct PointerTool {
    last_pos: Option<egui::Pos2>,
    hovered: Option<GizmoAxis>,
    /// Unsnapped ring angle swept since the press
    swept: f32,
    /// Rotation already handed to the controller during this drag
    applied: f32,
}

/// World-space arm length giving the gizmo a constant on-screen size
pub fn gizmo_world_size(
    camera: &ArcBallCamera,
    center: Vec3,
    rect: egui::Rect,
    size_px: f32,
) -> f32 {
    camera.world_size_at(center, size_px, rect)
}

impl PointerTool {
    pub fn is_dragging(&self) -> bool {
        self.last_pos.is_some()
    }

    /// Handle under the pointer when idle, or the grabbed one while dragging
    pub fn active_axis(&self, controller: &SceneController) -> Option<GizmoAxis> {
        controller.drag().map(|d| d.axis).or(self.hovered)
    }

    /// Update hover highlight for the pointer at `pos`
    pub fn hover(
        &mut self,
        controller: &SceneController,
        camera: &ArcBallCamera,
        rect: egui::Rect,
        pos: Option<egui::Pos2>,
        size_px: f32,
    ) {
        if self.is_dragging() {
            return;
        }
        self.hovered = pos.and_then(|p| Self::handle_at(controller, camera, rect, p, size_px));
    }

    fn handle_at(
        controller: &SceneController,
        camera: &ArcBallCamera,
        rect: egui::Rect,
        pos: egui::Pos2,
        size_px: f32,
    ) -> Option<GizmoAxis> {
        let kind = controller.gizmo()?.kind;
        let center = controller.gizmo_center()?;
        let size = gizmo_world_size(camera, center, rect, size_px);
        gizmo::hit_test(kind, &camera.screen_ray(pos, rect), center, size)
    }

    /// Primary-button press at `pos`. Gizmo handles take priority over meshes.
    pub fn press(
        &mut self,
        controller: &mut SceneController,
        camera: &ArcBallCamera,
        rect: egui::Rect,
        pos: egui::Pos2,
        size_px: f32,
    ) -> PressOutcome {
        if let Some(axis) = Self::handle_at(controller, camera, rect, pos, size_px) {
            if controller.begin_gizmo_drag(axis) {
                self.last_pos = Some(pos);
                self.hovered = None;
                self.swept = 0.0;
                self.applied = 0.0;
                return PressOutcome::Handle(axis);
            }
        }

        let ray = camera.screen_ray(pos, rect);
        match controller.pick_ray(&ray) {
            Some(id) => PressOutcome::Picked(id),
            None => PressOutcome::Miss,
        }
    }

    /// Pointer moved to `pos` while pressed. `snap` rounds rotation steps.
    pub fn drag_to(
        &mut self,
        controller: &mut SceneController,
        camera: &ArcBallCamera,
        rect: egui::Rect,
        pos: egui::Pos2,
        size_px: f32,
        snap: impl Fn(f32) -> f32,
    ) {
        let Some(prev) = self.last_pos else {
            return;
        };
        let (Some(drag), Some(g), Some(center)) = (
            controller.drag(),
            controller.gizmo(),
            controller.gizmo_center(),
        ) else {
            return;
        };
        let axis = drag.axis;
        let screen_delta = pos - prev;

        let delta = match g.kind {
            GizmoKind::Position => GizmoDelta::Translate(gizmo::translate_delta(
                camera,
                center,
                axis,
                screen_delta,
                rect,
            )),
            GizmoKind::Scale => {
                let size = gizmo_world_size(camera, center, rect, size_px);
                GizmoDelta::Scale(gizmo::scale_factor(camera, center, axis, screen_delta, rect, size))
            }
            GizmoKind::Rotation => {
                self.swept += gizmo::rotation_angle(camera, center, axis, prev, pos, rect);
                self.last_pos = Some(pos);
                // Snap the total sweep so per-frame rounding never accumulates
                let step = snap(self.swept) - self.applied;
                if step == 0.0 {
                    return;
                }
                self.applied += step;
                GizmoDelta::Rotate(step)
            }
        };

        controller.drag_gizmo(delta);
        self.last_pos = Some(pos);
    }

    pub fn release(&mut self, controller: &mut SceneController) {
        self.last_pos = None;
        self.swept = 0.0;
        self.applied = 0.0;
        controller.end_gizmo_drag();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{GROUND_ID, SPHERE_ID};

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_press_on_sphere_picks_it() {
        let mut c = SceneController::new();
        let cam = ArcBallCamera::default();
        let pos = cam.project(Vec3::new(0.0, 1.0, 0.0), rect()).unwrap();
        let mut tool = PointerTool::default();
        assert_eq!(
            tool.press(&mut c, &cam, rect(), pos, 90.0),
            PressOutcome::Picked(SPHERE_ID.to_string())
        );
        assert!(!tool.is_dragging());
    }

    #[test]
    fn test_press_below_sphere_picks_ground() {
        let mut c = SceneController::new();
        let cam = ArcBallCamera::default();
        let pos = cam.project(Vec3::new(2.0, 0.5, 2.0), rect()).unwrap();
        let mut tool = PointerTool::default();
        assert_eq!(
            tool.press(&mut c, &cam, rect(), pos, 90.0),
            PressOutcome::Picked(GROUND_ID.to_string())
        );
    }

    #[test]
    fn test_press_on_sky_misses() {
        let mut c = SceneController::new();
        let cam = ArcBallCamera::default();
        let mut tool = PointerTool::default();
        let outcome = tool.press(&mut c, &cam, rect(), egui::pos2(400.0, 5.0), 90.0);
        assert_eq!(outcome, PressOutcome::Miss);
    }

    #[test]
    fn test_drag_position_handle_moves_sphere() {
        let mut c = SceneController::new();
        c.set_mode("position").unwrap();
        c.pick(SPHERE_ID);
        let cam = ArcBallCamera::default();
        let mut tool = PointerTool::default();

        let center = Vec3::new(0.0, 1.0, 0.0);
        let size = gizmo_world_size(&cam, center, rect(), 90.0);
        // Grab the Y arm two thirds of the way up
        let grab = cam.project(center + Vec3::Y * size * 0.66, rect()).unwrap();
        assert_eq!(
            tool.press(&mut c, &cam, rect(), grab, 90.0),
            PressOutcome::Handle(GizmoAxis::Y)
        );

        tool.drag_to(&mut c, &cam, rect(), grab - egui::vec2(0.0, 40.0), 90.0, |a| a);
        tool.release(&mut c);

        let p = c.scene.get_node(SPHERE_ID).unwrap().transform.position;
        assert!(p[1] > 1.0);
        assert!(p[0].abs() < 1e-6 && p[2].abs() < 1e-6);
        assert!(c.drag().is_none());
    }

    #[test]
    fn test_snapped_ring_drag_tracks_total_sweep() {
        let mut c = SceneController::new();
        c.set_mode("rotation").unwrap();
        c.pick(SPHERE_ID);
        let cam = ArcBallCamera::default();
        let mut tool = PointerTool::default();

        let center = Vec3::new(0.0, 1.0, 0.0);
        let size = gizmo_world_size(&cam, center, rect(), 90.0);
        let on_ring = |theta: f32| {
            cam.project(center + Vec3::new(theta.cos(), 0.0, theta.sin()) * size, rect())
                .unwrap()
        };

        // Near half of the Y ring, so no other ring is in front of it
        let grab = on_ring(-1.3);
        assert_eq!(
            tool.press(&mut c, &cam, rect(), grab, 90.0),
            PressOutcome::Handle(GizmoAxis::Y)
        );

        let step = 1f32.to_radians();
        let snap = |a: f32| (a / step).round() * step;
        for i in 1..=60 {
            let pos = on_ring(-1.3 + 0.5 * i as f32 / 60.0);
            tool.drag_to(&mut c, &cam, rect(), pos, 90.0, snap);
        }
        tool.release(&mut c);
        let last = on_ring(-0.8);

        let total = gizmo::rotation_angle(&cam, center, GizmoAxis::Y, grab, last, rect());
        let pivot = c.scene.get_node(crate::state::PIVOT_ID).unwrap();
        let applied = pivot.transform.rotation[1] as f32;
        assert!(total.abs() > 10.0 * step);
        assert!(
            (applied.abs() - snap(total).abs()).abs() < 1e-4,
            "applied {applied}, snapped sweep {}",
            snap(total)
        );
    }
}
