//! Transform/drag operations

use glam::{Quat, Vec3};
use shared::Transform;

use super::SceneState;
use crate::helpers::{rotation_quat, set_rotation_quat, world_matrix};

impl SceneState {
    /// Save undo state once at the beginning of a drag operation
    pub fn begin_drag(&mut self) {
        self.save_undo();
        self.version += 1;
    }

    /// Move a node by a world-space delta
    pub fn apply_translate_delta(&mut self, id: &str, delta: Vec3) {
        let local = self.world_to_parent_vector(id, delta);
        if let Some(node) = self.get_node_mut(id) {
            let t = &mut node.transform;
            t.position[0] += local.x as f64;
            t.position[1] += local.y as f64;
            t.position[2] += local.z as f64;
            self.version += 1;
        }
    }

    /// Multiply a node's local scale per axis
    pub fn apply_scale_factor(&mut self, id: &str, factor: Vec3) {
        if let Some(node) = self.get_node_mut(id) {
            let t = &mut node.transform;
            t.scale[0] *= factor.x as f64;
            t.scale[1] *= factor.y as f64;
            t.scale[2] *= factor.z as f64;
            self.version += 1;
        }
    }

    /// Rotate a node about a world-space axis through its own origin
    pub fn apply_rotation_delta(&mut self, id: &str, axis: Vec3, angle: f32) {
        let local_axis = self.world_to_parent_vector(id, axis).normalize_or_zero();
        if local_axis == Vec3::ZERO {
            return;
        }
        if let Some(node) = self.get_node_mut(id) {
            let q = Quat::from_axis_angle(local_axis, angle) * rotation_quat(&node.transform);
            set_rotation_quat(&mut node.transform, q);
            self.version += 1;
        }
    }

    /// Replace a node's local transform. Like the drag deltas this does not
    /// touch history; callers open the undo step with `begin_drag`.
    pub fn replace_transform(&mut self, id: &str, transform: Transform) -> bool {
        let Some(node) = self.get_node_mut(id) else {
            return false;
        };
        if node.transform == transform {
            return false;
        }
        node.transform = transform;
        self.version += 1;
        true
    }

    /// Convert a world-space direction into the node's parent space
    fn world_to_parent_vector(&self, id: &str, v: Vec3) -> Vec3 {
        match self.get_node(id).and_then(|n| n.parent.as_deref()) {
            Some(parent) => world_matrix(&self.scene, parent)
                .inverse()
                .transform_vector3(v),
            None => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SceneNode;

    #[test]
    fn test_translate_top_level() {
        let mut s = SceneState::default();
        let v = s.version();
        s.apply_translate_delta("sphere", Vec3::new(0.5, 0.0, -1.0));
        let p = s.get_node("sphere").unwrap().transform.position;
        assert_eq!(p, [0.5, 1.0, -1.0]);
        assert!(s.version() > v);
    }

    #[test]
    fn test_translate_child_uses_parent_space() {
        let mut s = SceneState::default();
        let mut pivot = SceneNode::transform_node("pivot", Transform::new());
        pivot.transform.scale = [2.0, 2.0, 2.0];
        s.scene.nodes.push(pivot);
        s.get_node_mut("sphere").unwrap().parent = Some("pivot".to_string());

        s.apply_translate_delta("sphere", Vec3::new(2.0, 0.0, 0.0));
        let p = s.get_node("sphere").unwrap().transform.position;
        assert!((p[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_factor_multiplies() {
        let mut s = SceneState::default();
        s.apply_scale_factor("ground", Vec3::new(2.0, 1.0, 0.5));
        assert_eq!(s.get_node("ground").unwrap().transform.scale, [2.0, 1.0, 0.5]);
    }

    #[test]
    fn test_rotation_about_y() {
        let mut s = SceneState::default();
        s.apply_rotation_delta("sphere", Vec3::Y, std::f32::consts::FRAC_PI_2);
        let r = s.get_node("sphere").unwrap().transform.rotation;
        assert!((r[1] - std::f64::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_replace_transform_skips_history() {
        let mut s = SceneState::default();
        let v = s.version();
        let same = s.get_node("sphere").unwrap().transform.clone();
        assert!(!s.replace_transform("sphere", same));
        assert_eq!(s.version(), v);

        assert!(s.replace_transform("sphere", Transform::at([1.0, 1.0, 1.0])));
        assert!(s.version() > v);
        assert!(!s.can_undo());
        assert!(!s.replace_transform("missing", Transform::new()));
    }

    #[test]
    fn test_unknown_node_ignored() {
        let mut s = SceneState::default();
        let v = s.version();
        s.apply_translate_delta("missing", Vec3::X);
        s.apply_scale_factor("missing", Vec3::ONE);
        assert_eq!(s.version(), v);
    }
}
