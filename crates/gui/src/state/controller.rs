//! Scene controller: which gizmo is attached, to which mesh, in which mode.
//!
//! At most one gizmo exists and it edits at most one node. Every mode switch
//! tears the previous gizmo down and creates a fresh one for the new mode.
//!
//! The rotation gizmo never edits the mesh directly. It edits a transient
//! pivot node placed at the mesh's world position, with the mesh parented
//! underneath, so rotation always happens about world axes through the mesh
//! origin regardless of the mesh's own scale. Detaching bakes the pivot into
//! the mesh transform and removes the pivot.

use std::path::Path;

use glam::Vec3;
use shared::{
    GizmoKind, InteractionMode, Material, ObjectId, ParseModeError, SceneDescription, Transform,
};

use crate::build::MeshCache;
use crate::helpers::{local_in_parent, transform_to_mat4, world_matrix, world_position};
use crate::state::scene::SceneState;
use crate::viewport::gizmo::{Gizmo, GizmoAxis, GizmoDrag};
use crate::viewport::picking::{pick_nearest_mesh, Ray};

/// Id of the transient node the rotation gizmo edits
pub const PIVOT_ID: &str = "gizmo_pivot";

/// Incremental change produced by dragging a gizmo handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoDelta {
    /// World-space translation
    Translate(Vec3),
    /// Per-axis multiplicative scale
    Scale(Vec3),
    /// Angle in radians about the dragged axis
    Rotate(f32),
}

pub struct SceneController {
    pub scene: SceneState,
    mode: InteractionMode,
    gizmo: Option<Gizmo>,
    /// Last picked mesh; kept while in action mode so the gizmo can come back
    gizmo_mesh: Option<ObjectId>,
    drag: Option<GizmoDrag>,
    generation: u64,
    cache: MeshCache,
}

impl Default for SceneController {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneController {
    /// Controller over the default ground + sphere scene, in action mode
    pub fn new() -> Self {
        Self::with_scene(SceneDescription::default_scene())
    }

    pub fn with_scene(scene: SceneDescription) -> Self {
        let mut controller = Self {
            scene: SceneState::new(scene),
            mode: InteractionMode::Action,
            gizmo: None,
            gizmo_mesh: None,
            drag: None,
            generation: 0,
            cache: MeshCache::new(),
        };
        controller.resync();
        controller
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn gizmo(&self) -> Option<&Gizmo> {
        self.gizmo.as_ref()
    }

    /// Mesh the gizmo belongs to (the last picked mesh)
    pub fn gizmo_mesh(&self) -> Option<&str> {
        self.gizmo_mesh.as_deref()
    }

    pub fn drag(&self) -> Option<&GizmoDrag> {
        self.drag.as_ref()
    }

    /// Meshes currently carrying a material
    pub fn highlighted(&self) -> Vec<&str> {
        self.scene
            .scene
            .meshes()
            .filter(|n| n.material.is_some())
            .map(|n| n.id.as_str())
            .collect()
    }

    /// World position of the node the gizmo edits, if attached
    pub fn gizmo_center(&self) -> Option<Vec3> {
        let attached = self.gizmo.as_ref()?.attached.as_deref()?;
        Some(world_position(&self.scene.scene, attached))
    }

    /// Up-to-date world-space meshes for rendering and picking
    pub fn mesh_cache(&mut self) -> &MeshCache {
        self.cache.ensure(&self.scene.scene, self.scene.version());
        &self.cache
    }

    /// Scene with the rotation pivot baked away, for saving
    pub fn scene_for_export(&self) -> SceneDescription {
        let mut baked = SceneState::new(self.scene.scene.clone());
        baked.remove_node(PIVOT_ID);
        baked.scene
    }

    /// Write the exported scene as JSON
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        SceneState::new(self.scene_for_export()).save_to(path)?;
        tracing::info!("Saved scene to {}", path.display());
        Ok(())
    }

    pub fn autosave(&self) {
        SceneState::new(self.scene_for_export()).autosave();
    }

    // ── Mode switching ────────────────────────────────────────

    /// Switch interaction mode by name (`action`, `position`, `scale`, `rotation`)
    pub fn set_mode(&mut self, mode: &str) -> Result<(), ParseModeError> {
        match mode.parse::<InteractionMode>() {
            Ok(mode) => {
                self.apply_mode(mode);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("{e}");
                Err(e)
            }
        }
    }

    pub fn apply_mode(&mut self, mode: InteractionMode) {
        self.end_gizmo_drag();
        self.teardown_gizmo();
        self.mode = mode;

        if let Some(kind) = mode.gizmo_kind() {
            self.gizmo = Some(self.create_gizmo(kind));
            if let Some(mesh) = self.gizmo_mesh.clone() {
                self.attach(&mesh);
            }
        }

        tracing::info!(
            "Mode -> {mode} (gizmo on {})",
            self.gizmo_mesh.as_deref().unwrap_or("nothing")
        );
    }

    // ── Picking ───────────────────────────────────────────────

    /// Pointer-down on a mesh: highlight it and move the gizmo onto it.
    /// Returns false if `id` is not a pickable mesh.
    pub fn pick(&mut self, id: &str) -> bool {
        let pickable = self
            .scene
            .get_node(id)
            .is_some_and(|n| n.is_mesh() && n.pickable);
        if !pickable {
            tracing::warn!("Ignoring pick of '{id}': not a pickable mesh");
            return false;
        }

        self.end_gizmo_drag();
        self.scene.set_material(id, Some(Material::highlight()));
        self.scene.clear_materials_except(Some(id));
        self.gizmo_mesh = Some(id.to_string());

        match self.mode.gizmo_kind() {
            None => self.teardown_gizmo(),
            Some(kind) => {
                if self.gizmo.as_ref().is_none_or(|g| g.kind != kind) {
                    self.teardown_gizmo();
                    self.gizmo = Some(self.create_gizmo(kind));
                }
                self.attach(id);
            }
        }

        tracing::info!("Picked '{id}' in {} mode", self.mode);
        true
    }

    /// Pick the nearest pickable mesh under a world-space ray.
    /// A miss leaves the selection untouched.
    pub fn pick_ray(&mut self, ray: &Ray) -> Option<ObjectId> {
        self.cache.ensure(&self.scene.scene, self.scene.version());
        let scene = &self.scene.scene;
        let candidates = self
            .cache
            .meshes()
            .iter()
            .filter(|(id, _)| scene.node(id).is_some_and(|n| n.pickable));

        let (id, _) = pick_nearest_mesh(ray, candidates, self.cache.aabbs())?;
        self.pick(&id).then_some(id)
    }

    /// Drop highlight and gizmo attachment, forgetting the picked mesh
    pub fn clear_selection(&mut self) {
        self.end_gizmo_drag();
        self.release_pivot();
        if let Some(gizmo) = self.gizmo.as_mut() {
            gizmo.attached = None;
        }
        self.scene.clear_materials_except(None);
        self.gizmo_mesh = None;
    }

    // ── Gizmo drag ────────────────────────────────────────────

    /// Start dragging a handle of the attached gizmo (records one undo step)
    pub fn begin_gizmo_drag(&mut self, axis: GizmoAxis) -> bool {
        let Some(node_id) = self.gizmo.as_ref().and_then(|g| g.attached.clone()) else {
            return false;
        };
        self.scene.begin_drag();
        tracing::debug!("Begin {axis:?} drag on '{node_id}'");
        self.drag = Some(GizmoDrag { axis, node_id });
        true
    }

    /// Apply an incremental drag change; ignored if it does not match the gizmo kind
    pub fn drag_gizmo(&mut self, delta: GizmoDelta) {
        let (Some(drag), Some(gizmo)) = (self.drag.as_ref(), self.gizmo.as_ref()) else {
            return;
        };
        let id = drag.node_id.clone();
        let axis = drag.axis;

        match (gizmo.kind, delta) {
            (GizmoKind::Position, GizmoDelta::Translate(v)) => {
                self.scene.apply_translate_delta(&id, v);
            }
            (GizmoKind::Scale, GizmoDelta::Scale(f)) => {
                self.scene.apply_scale_factor(&id, f);
            }
            (GizmoKind::Rotation, GizmoDelta::Rotate(angle)) => {
                if axis != GizmoAxis::Uniform {
                    self.scene.apply_rotation_delta(&id, axis.direction(), angle);
                }
            }
            (kind, delta) => {
                tracing::debug!("Ignoring {delta:?} for {kind:?} gizmo");
            }
        }
    }

    pub fn end_gizmo_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            tracing::debug!("End {:?} drag on '{}'", drag.axis, drag.node_id);
        }
    }

    /// Set a mesh's world transform from a direct edit (properties panel).
    ///
    /// `begin_edit` opens one undo step; pass it on the first frame of an
    /// edit only, so a scrubbed value does not flood the history. If the
    /// gizmo sits on this mesh it is re-attached, which rebuilds the
    /// rotation pivot at the mesh's new origin.
    pub fn set_mesh_world_transform(&mut self, id: &str, world: Transform, begin_edit: bool) -> bool {
        if self.scene.get_node(id).is_none_or(|n| !n.is_mesh()) {
            return false;
        }
        if begin_edit {
            self.scene.begin_drag();
        }

        let attached_here = self.gizmo_mesh.as_deref() == Some(id) && self.gizmo.is_some();
        if attached_here {
            self.release_pivot();
        }

        let scene = &self.scene.scene;
        let local = match scene.node(id).and_then(|n| n.parent.clone()) {
            Some(parent) => local_in_parent(transform_to_mat4(&world), world_matrix(scene, &parent)),
            None => world,
        };
        self.scene.replace_transform(id, local);

        if attached_here {
            self.attach(id);
        }
        true
    }

    // ── History / whole-scene changes ─────────────────────────

    pub fn undo(&mut self) -> bool {
        self.end_gizmo_drag();
        let undone = self.scene.undo();
        if undone {
            self.resync();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.end_gizmo_drag();
        let redone = self.scene.redo();
        if redone {
            self.resync();
        }
        redone
    }

    /// Replace the scene; selection is reset, the mode is kept
    pub fn set_scene(&mut self, scene: SceneDescription) {
        self.end_gizmo_drag();
        self.scene.set_scene(scene);
        self.gizmo_mesh = None;
        self.resync();
    }

    // ── Internals ─────────────────────────────────────────────

    fn create_gizmo(&mut self, kind: GizmoKind) -> Gizmo {
        self.generation += 1;
        Gizmo {
            kind,
            generation: self.generation,
            attached: None,
        }
    }

    fn teardown_gizmo(&mut self) {
        self.release_pivot();
        self.gizmo = None;
    }

    /// Attach the existing gizmo to a mesh (through the pivot for rotation)
    fn attach(&mut self, mesh_id: &str) {
        self.release_pivot();
        let Some(kind) = self.gizmo.as_ref().map(|g| g.kind) else {
            return;
        };

        let target = if kind == GizmoKind::Rotation {
            let origin = world_position(&self.scene.scene, mesh_id);
            self.scene.add_transform_node(PIVOT_ID, origin);
            self.scene.reparent(mesh_id, Some(PIVOT_ID));
            PIVOT_ID.to_string()
        } else {
            mesh_id.to_string()
        };

        if let Some(gizmo) = self.gizmo.as_mut() {
            gizmo.attached = Some(target);
        }
    }

    /// Bake and remove the rotation pivot, if any
    fn release_pivot(&mut self) {
        if self.scene.remove_node(PIVOT_ID) {
            tracing::debug!("Released rotation pivot");
        }
        if let Some(gizmo) = self.gizmo.as_mut() {
            if gizmo.attached.as_deref() == Some(PIVOT_ID) {
                gizmo.attached = None;
            }
        }
    }

    /// Bring controller state back in line with the scene after it was
    /// replaced wholesale (undo, redo, load).
    fn resync(&mut self) {
        self.scene.remove_node(PIVOT_ID);

        if self
            .gizmo_mesh
            .as_deref()
            .is_some_and(|id| self.scene.get_node(id).is_none_or(|n| !n.is_mesh()))
        {
            self.gizmo_mesh = None;
        }

        let mesh = self.gizmo_mesh.clone();
        self.scene.clear_materials_except(mesh.as_deref());
        if let Some(id) = &mesh {
            self.scene.set_material(id, Some(Material::highlight()));
        }

        match self.mode.gizmo_kind() {
            None => self.gizmo = None,
            Some(kind) => {
                if self.gizmo.as_ref().is_none_or(|g| g.kind != kind) {
                    self.gizmo = Some(self.create_gizmo(kind));
                }
                if let Some(gizmo) = self.gizmo.as_mut() {
                    gizmo.attached = None;
                }
                if let Some(id) = mesh {
                    self.attach(&id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{GROUND_ID, SPHERE_ID};

    #[test]
    fn test_new_starts_in_action_without_gizmo() {
        let c = SceneController::new();
        assert_eq!(c.mode(), InteractionMode::Action);
        assert!(c.gizmo().is_none());
        assert!(c.gizmo_mesh().is_none());
        assert!(c.highlighted().is_empty());
    }

    #[test]
    fn test_set_mode_rejects_unknown() {
        let mut c = SceneController::new();
        c.set_mode("position").unwrap();
        let before = c.gizmo().cloned();
        assert!(c.set_mode("teleport").is_err());
        assert_eq!(c.mode(), InteractionMode::Position);
        assert_eq!(c.gizmo().cloned(), before);
    }

    #[test]
    fn test_mode_switch_recreates_gizmo() {
        let mut c = SceneController::new();
        c.set_mode("position").unwrap();
        let g1 = c.gizmo().unwrap().generation;
        c.set_mode("scale").unwrap();
        let g2 = c.gizmo().unwrap();
        assert_eq!(g2.kind, GizmoKind::Scale);
        assert!(g2.generation > g1);
    }

    #[test]
    fn test_pick_in_action_highlights_without_gizmo() {
        let mut c = SceneController::new();
        assert!(c.pick(SPHERE_ID));
        assert_eq!(c.highlighted(), vec![SPHERE_ID]);
        assert!(c.gizmo().is_none());
        assert_eq!(c.gizmo_mesh(), Some(SPHERE_ID));
    }

    #[test]
    fn test_pick_moves_highlight() {
        let mut c = SceneController::new();
        c.pick(SPHERE_ID);
        c.pick(GROUND_ID);
        assert_eq!(c.highlighted(), vec![GROUND_ID]);
    }

    #[test]
    fn test_position_gizmo_follows_pick() {
        let mut c = SceneController::new();
        c.set_mode("position").unwrap();
        c.pick(SPHERE_ID);
        assert_eq!(c.gizmo().unwrap().attached.as_deref(), Some(SPHERE_ID));
        c.pick(GROUND_ID);
        assert_eq!(c.gizmo().unwrap().attached.as_deref(), Some(GROUND_ID));
    }

    #[test]
    fn test_action_detaches_and_mode_reattaches() {
        let mut c = SceneController::new();
        c.set_mode("position").unwrap();
        c.pick(SPHERE_ID);
        c.set_mode("action").unwrap();
        assert!(c.gizmo().is_none());
        assert_eq!(c.gizmo_mesh(), Some(SPHERE_ID));

        c.set_mode("scale").unwrap();
        assert_eq!(c.gizmo().unwrap().attached.as_deref(), Some(SPHERE_ID));
    }

    #[test]
    fn test_rotation_uses_pivot() {
        let mut c = SceneController::new();
        c.set_mode("rotation").unwrap();
        c.pick(SPHERE_ID);

        assert_eq!(c.gizmo().unwrap().attached.as_deref(), Some(PIVOT_ID));
        let sphere = c.scene.get_node(SPHERE_ID).unwrap();
        assert_eq!(sphere.parent.as_deref(), Some(PIVOT_ID));
        let center = c.gizmo_center().unwrap();
        assert!((center - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotation_baked_on_mode_switch() {
        let mut c = SceneController::new();
        c.set_mode("rotation").unwrap();
        c.pick(SPHERE_ID);
        assert!(c.begin_gizmo_drag(GizmoAxis::Y));
        c.drag_gizmo(GizmoDelta::Rotate(0.5));
        c.end_gizmo_drag();

        c.set_mode("position").unwrap();
        assert!(c.scene.get_node(PIVOT_ID).is_none());
        let sphere = c.scene.get_node(SPHERE_ID).unwrap();
        assert!(sphere.parent.is_none());
        assert!((sphere.transform.rotation[1] - 0.5).abs() < 1e-4);
        assert!((sphere.transform.position[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_drag_translate_moves_mesh() {
        let mut c = SceneController::new();
        c.set_mode("position").unwrap();
        c.pick(SPHERE_ID);
        assert!(c.begin_gizmo_drag(GizmoAxis::X));
        c.drag_gizmo(GizmoDelta::Translate(Vec3::new(1.5, 0.0, 0.0)));
        c.end_gizmo_drag();
        assert_eq!(c.scene.get_node(SPHERE_ID).unwrap().transform.position, [1.5, 1.0, 0.0]);
    }

    #[test]
    fn test_mismatched_delta_ignored() {
        let mut c = SceneController::new();
        c.set_mode("scale").unwrap();
        c.pick(SPHERE_ID);
        c.begin_gizmo_drag(GizmoAxis::X);
        c.drag_gizmo(GizmoDelta::Translate(Vec3::X));
        assert_eq!(c.scene.get_node(SPHERE_ID).unwrap().transform.position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_drag_without_attachment_refused() {
        let mut c = SceneController::new();
        c.set_mode("position").unwrap();
        assert!(!c.begin_gizmo_drag(GizmoAxis::X));
    }

    #[test]
    fn test_undo_with_pivot_restores_consistent_state() {
        let mut c = SceneController::new();
        c.set_mode("rotation").unwrap();
        c.pick(SPHERE_ID);
        c.begin_gizmo_drag(GizmoAxis::Y);
        c.drag_gizmo(GizmoDelta::Rotate(1.0));
        c.end_gizmo_drag();

        assert!(c.undo());
        // Exactly one pivot, freshly rebuilt, mesh back to identity rotation
        assert_eq!(c.scene.scene.nodes.iter().filter(|n| n.id == PIVOT_ID).count(), 1);
        assert_eq!(c.gizmo().unwrap().attached.as_deref(), Some(PIVOT_ID));
        let world = crate::helpers::world_transform(&c.scene.scene, SPHERE_ID);
        assert!(world.rotation.iter().all(|r| r.abs() < 1e-5));
    }

    #[test]
    fn test_clear_selection() {
        let mut c = SceneController::new();
        c.set_mode("rotation").unwrap();
        c.pick(GROUND_ID);
        c.clear_selection();
        assert!(c.highlighted().is_empty());
        assert!(c.gizmo_mesh().is_none());
        assert!(c.gizmo().unwrap().attached.is_none());
        assert!(c.scene.get_node(PIVOT_ID).is_none());
    }

    #[test]
    fn test_pick_non_mesh_refused() {
        let mut c = SceneController::new();
        assert!(!c.pick("missing"));
        c.set_mode("rotation").unwrap();
        c.pick(SPHERE_ID);
        assert!(!c.pick(PIVOT_ID));
        assert_eq!(c.gizmo_mesh(), Some(SPHERE_ID));
    }

    #[test]
    fn test_world_edit_moves_rotation_pivot() {
        let mut c = SceneController::new();
        c.set_mode("rotation").unwrap();
        c.pick(SPHERE_ID);

        let mut world = crate::helpers::world_transform(&c.scene.scene, SPHERE_ID);
        world.position = [3.0, 1.0, 0.0];
        assert!(c.set_mesh_world_transform(SPHERE_ID, world, true));

        let center = c.gizmo_center().unwrap();
        assert!((center - Vec3::new(3.0, 1.0, 0.0)).length() < 1e-5);
        assert_eq!(c.gizmo().unwrap().attached.as_deref(), Some(PIVOT_ID));

        // Rotating half a turn about Y must spin the mesh in place
        assert!(c.begin_gizmo_drag(GizmoAxis::Y));
        c.drag_gizmo(GizmoDelta::Rotate(std::f32::consts::PI));
        c.end_gizmo_drag();
        let origin = world_position(&c.scene.scene, SPHERE_ID);
        assert!((origin - Vec3::new(3.0, 1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_world_edit_is_one_undo_step() {
        let mut c = SceneController::new();
        c.set_mode("position").unwrap();
        c.pick(SPHERE_ID);

        for i in 1..=30 {
            let world = Transform::at([i as f64 * 0.1, 1.0, 0.0]);
            c.set_mesh_world_transform(SPHERE_ID, world, i == 1);
        }
        assert!((c.scene.get_node(SPHERE_ID).unwrap().transform.position[0] - 3.0).abs() < 1e-9);

        assert!(c.undo());
        assert_eq!(c.scene.get_node(SPHERE_ID).unwrap().transform.position, [0.0, 1.0, 0.0]);
        assert!(!c.scene.can_undo());
    }

    #[test]
    fn test_world_edit_rejects_non_mesh() {
        let mut c = SceneController::new();
        assert!(!c.set_mesh_world_transform("missing", Transform::new(), true));
        assert!(!c.scene.can_undo());
    }

    #[test]
    fn test_export_has_no_pivot() {
        let mut c = SceneController::new();
        c.set_mode("rotation").unwrap();
        c.pick(SPHERE_ID);
        let exported = c.scene_for_export();
        assert!(exported.node(PIVOT_ID).is_none());
        assert!(exported.node(SPHERE_ID).unwrap().parent.is_none());
    }
}
