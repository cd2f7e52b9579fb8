//! World-space mesh building from the scene graph.

mod cache;
mod primitives;

pub use cache::MeshCache;
pub use primitives::create_primitive;

use std::collections::HashMap;

use shared::SceneDescription;

use crate::helpers::world_matrix;
use crate::viewport::mesh::MeshData;

/// Build one world-space, material-colored mesh per mesh node
pub fn build_scene_meshes(scene: &SceneDescription) -> HashMap<String, MeshData> {
    let mut meshes = HashMap::new();

    for node in scene.meshes() {
        let Some(kind) = &node.kind else { continue };
        let mut data = create_primitive(kind, node.diffuse());
        data.transform(&world_matrix(scene, &node.id));
        meshes.insert(node.id.clone(), data);
    }

    meshes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::picking::Aabb;
    use shared::{Material, SceneNode, Transform, DEFAULT_DIFFUSE};

    #[test]
    fn test_default_scene_builds_two_meshes() {
        let meshes = build_scene_meshes(&SceneDescription::default_scene());
        assert_eq!(meshes.len(), 2);
        assert!(meshes.contains_key("ground"));
        assert!(meshes.contains_key("sphere"));
    }

    #[test]
    fn test_sphere_placed_in_world() {
        let meshes = build_scene_meshes(&SceneDescription::default_scene());
        let aabb = Aabb::from_mesh(&meshes["sphere"]);
        assert!((aabb.center().y - 1.0).abs() < 1e-4);
        assert!((aabb.size().x - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_material_colors_mesh() {
        let mut scene = SceneDescription::default_scene();
        scene.node_mut("sphere").unwrap().material = Some(Material::highlight());
        let meshes = build_scene_meshes(&scene);
        assert_eq!(&meshes["sphere"].vertices[6..9], &[0.0, 1.0, 0.0]);
        assert_eq!(&meshes["ground"].vertices[6..9], &DEFAULT_DIFFUSE);
    }

    #[test]
    fn test_transform_nodes_produce_no_mesh() {
        let mut scene = SceneDescription::default_scene();
        scene.nodes.push(SceneNode::transform_node("pivot", Transform::new()));
        assert_eq!(build_scene_meshes(&scene).len(), 2);
    }
}
