//! Factory functions for scene test data.
//!
//! Used by unit and integration tests and by scripted harness sessions.

use shared::*;

/// The stock ground + sphere scene.
pub fn default_scene() -> SceneDescription {
    SceneDescription::default_scene()
}

/// Default scene with the sphere moved and non-uniformly scaled.
pub fn scene_with_stretched_sphere(position: [f64; 3], scale: [f64; 3]) -> SceneDescription {
    let mut scene = default_scene();
    if let Some(sphere) = scene.node_mut(SPHERE_ID) {
        sphere.transform.position = position;
        sphere.transform.scale = scale;
    }
    scene
}

/// Box mesh node at a position.
pub fn box_node(id: &str, w: f64, h: f64, d: f64, pos: [f64; 3]) -> SceneNode {
    SceneNode::mesh(
        id,
        MeshKind::Box {
            width: w,
            height: h,
            depth: d,
        },
        Transform::at(pos),
    )
}

/// Default scene plus extra nodes.
pub fn scene_with(extra: Vec<SceneNode>) -> SceneDescription {
    let mut scene = default_scene();
    scene.nodes.extend(extra);
    scene
}

/// Scene JSON text for load tests.
pub fn scene_json(scene: &SceneDescription) -> String {
    serde_json::to_string_pretty(scene).unwrap_or_default()
}
