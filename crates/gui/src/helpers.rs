//! Transform math shared by the scene state, mesh building and the controller.
//!
//! `shared::Transform` stores f64 components and Euler XYZ rotation; the
//! renderer and picking work in glam f32 matrices.

use glam::{EulerRot, Mat4, Quat, Vec3};
use shared::{SceneDescription, Transform};

/// Upper bound on parent chain length; a longer chain means a cycle
const MAX_DEPTH: usize = 32;

pub fn to_vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

pub fn from_vec3(v: Vec3) -> [f64; 3] {
    [v.x as f64, v.y as f64, v.z as f64]
}

pub fn rotation_quat(t: &Transform) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        t.rotation[0] as f32,
        t.rotation[1] as f32,
        t.rotation[2] as f32,
    )
}

pub fn set_rotation_quat(t: &mut Transform, q: Quat) {
    let (x, y, z) = q.normalize().to_euler(EulerRot::XYZ);
    t.rotation = [x as f64, y as f64, z as f64];
}

/// Local matrix: translation * rotation * scale
pub fn transform_to_mat4(t: &Transform) -> Mat4 {
    Mat4::from_scale_rotation_translation(to_vec3(t.scale), rotation_quat(t), to_vec3(t.position))
}

/// Decompose a matrix back into a transform.
/// Shear introduced by rotating a non-uniformly scaled parent is dropped.
pub fn mat4_to_transform(m: Mat4) -> Transform {
    let (scale, rotation, translation) = m.to_scale_rotation_translation();
    let mut t = Transform {
        position: from_vec3(translation),
        rotation: [0.0; 3],
        scale: from_vec3(scale),
    };
    set_rotation_quat(&mut t, rotation);
    t
}

/// World matrix of a node, composing its parent chain root first.
/// Unknown ids yield identity.
pub fn world_matrix(scene: &SceneDescription, id: &str) -> Mat4 {
    let mut matrix = Mat4::IDENTITY;
    let mut current = scene.node(id);
    let mut depth = 0;

    while let Some(node) = current {
        matrix = transform_to_mat4(&node.transform) * matrix;
        depth += 1;
        if depth >= MAX_DEPTH {
            tracing::warn!("Parent chain of '{id}' exceeds {MAX_DEPTH} levels, truncating");
            break;
        }
        current = node.parent.as_deref().and_then(|p| scene.node(p));
    }

    matrix
}

pub fn world_transform(scene: &SceneDescription, id: &str) -> Transform {
    mat4_to_transform(world_matrix(scene, id))
}

pub fn world_position(scene: &SceneDescription, id: &str) -> Vec3 {
    world_matrix(scene, id).w_axis.truncate()
}

/// Express a world-space matrix relative to a parent's world matrix.
pub fn local_in_parent(world: Mat4, parent_world: Mat4) -> Transform {
    mat4_to_transform(parent_world.inverse() * world)
}
