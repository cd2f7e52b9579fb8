//! Headless test harness for driving the scene controller programmatically.
//!
//! Pointer input goes through the same `PointerTool` the GUI viewport uses,
//! against a fixed 800x600 virtual viewport and the scene's initial camera.

use glam::Vec3;
use shared::SceneDescription;

use crate::state::controller::SceneController;
use crate::viewport::camera::ArcBallCamera;
use crate::viewport::interaction::{PointerTool, PressOutcome};
use crate::viewport::mesh::MeshData;

/// Gizmo on-screen size used by the harness
pub const HARNESS_GIZMO_PX: f32 = 90.0;

/// Headless test harness: controller plus a virtual camera and viewport
pub struct TestHarness {
    pub controller: SceneController,
    pub camera: ArcBallCamera,
    pub rect: egui::Rect,
    pointer: PointerTool,
}

impl TestHarness {
    /// Harness over the default ground + sphere scene
    pub fn new() -> Self {
        Self {
            controller: SceneController::new(),
            camera: ArcBallCamera::default(),
            rect: egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0)),
            pointer: PointerTool::default(),
        }
    }

    // ── Scene ─────────────────────────────────────────────────

    /// Load a scene (replaces current, camera follows the scene)
    pub fn load_scene(&mut self, scene: SceneDescription) {
        self.camera = ArcBallCamera::from_description(&scene.camera);
        self.pointer = PointerTool::default();
        self.controller.set_scene(scene);
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let scene: SceneDescription =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_scene(scene);
        Ok(())
    }

    /// Export the current scene as JSON (rotation pivot baked)
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(&self.controller.scene_for_export()).unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.controller.scene.scene.nodes.len()
    }

    pub fn position_of(&self, id: &str) -> Option<[f64; 3]> {
        self.controller.scene.get_node(id).map(|n| n.transform.position)
    }

    pub fn mesh_of(&mut self, id: &str) -> Option<MeshData> {
        self.controller.mesh_cache().meshes().get(id).cloned()
    }

    // ── Controller shortcuts ──────────────────────────────────

    pub fn set_mode(&mut self, mode: &str) -> Result<(), String> {
        self.controller.set_mode(mode).map_err(|e| e.to_string())
    }

    pub fn pick(&mut self, id: &str) -> bool {
        self.controller.pick(id)
    }

    pub fn clear_selection(&mut self) {
        self.controller.clear_selection();
    }

    pub fn undo(&mut self) -> bool {
        self.controller.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.controller.redo()
    }

    // ── Pointer input ─────────────────────────────────────────

    /// Screen position of a world point in the virtual viewport
    pub fn screen_of(&self, point: Vec3) -> Option<egui::Pos2> {
        self.camera.project(point, self.rect)
    }

    /// Click (press + release) at a screen position
    pub fn click_at(&mut self, pos: egui::Pos2) -> PressOutcome {
        let outcome =
            self.pointer
                .press(&mut self.controller, &self.camera, self.rect, pos, HARNESS_GIZMO_PX);
        self.pointer.release(&mut self.controller);
        outcome
    }

    /// Press at `from`, move in `steps` increments to `to`, release
    pub fn drag(&mut self, from: egui::Pos2, to: egui::Pos2, steps: usize) -> PressOutcome {
        let outcome =
            self.pointer
                .press(&mut self.controller, &self.camera, self.rect, from, HARNESS_GIZMO_PX);
        let steps = steps.max(1);
        for i in 1..=steps {
            let pos = from + (to - from) * (i as f32 / steps as f32);
            self.pointer.drag_to(
                &mut self.controller,
                &self.camera,
                self.rect,
                pos,
                HARNESS_GIZMO_PX,
                |a| a,
            );
        }
        self.pointer.release(&mut self.controller);
        outcome
    }

    /// Screen position of a point along a gizmo handle, `t` in arm lengths
    pub fn handle_point(&self, axis: Vec3, t: f32) -> Option<egui::Pos2> {
        let center = self.controller.gizmo_center()?;
        let size = crate::viewport::interaction::gizmo_world_size(
            &self.camera,
            center,
            self.rect,
            HARNESS_GIZMO_PX,
        );
        self.screen_of(center + axis * size * t)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{InteractionMode, GROUND_ID, SPHERE_ID};

    #[test]
    fn test_new_harness_has_default_scene() {
        let h = TestHarness::new();
        assert_eq!(h.node_count(), 2);
        assert_eq!(h.controller.mode(), InteractionMode::Action);
    }

    #[test]
    fn test_click_sphere_then_ground() {
        let mut h = TestHarness::new();
        let sphere = h.screen_of(Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(h.click_at(sphere), PressOutcome::Picked(SPHERE_ID.to_string()));
        let ground = h.screen_of(Vec3::new(-3.0, 0.5, 1.0)).unwrap();
        assert_eq!(h.click_at(ground), PressOutcome::Picked(GROUND_ID.to_string()));
        assert_eq!(h.controller.highlighted(), vec![GROUND_ID]);
    }

    #[test]
    fn test_load_export_json() {
        let mut h = TestHarness::new();
        h.set_mode("position").unwrap();
        h.pick(SPHERE_ID);
        let json = h.export_scene_json();

        let mut h2 = TestHarness::new();
        h2.load_scene_json(&json).unwrap();
        assert_eq!(h2.node_count(), 2);
        assert!(h2.controller.gizmo_mesh().is_none());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut h = TestHarness::new();
        assert!(h.load_scene_json("{").is_err());
        assert_eq!(h.node_count(), 2);
    }

    #[test]
    fn test_mesh_of_reflects_highlight() {
        let mut h = TestHarness::new();
        h.pick(SPHERE_ID);
        let mesh = h.mesh_of(SPHERE_ID).unwrap();
        // Color lives in floats 6..9 of each vertex
        assert_eq!(&mesh.vertices[6..9], &[0.0, 1.0, 0.0]);
    }
}
