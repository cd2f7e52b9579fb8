//! Scene graph edits: materials, parenting, transient nodes.
//!
//! None of these record undo history; they back selection feedback and the
//! rotation pivot rather than user edits.

use glam::Vec3;
use shared::{Material, SceneNode, Transform};

use super::SceneState;
use crate::helpers::{from_vec3, local_in_parent, mat4_to_transform, world_matrix};

impl SceneState {
    /// Set or clear the material of a node. Returns false for unknown ids.
    pub fn set_material(&mut self, id: &str, material: Option<Material>) -> bool {
        let Some(node) = self.get_node_mut(id) else {
            return false;
        };
        if node.material != material {
            node.material = material;
            self.version += 1;
        }
        true
    }

    /// Clear the material of every mesh except `keep`
    pub fn clear_materials_except(&mut self, keep: Option<&str>) {
        let mut changed = false;
        for node in self.scene.nodes.iter_mut().filter(|n| n.is_mesh()) {
            if Some(node.id.as_str()) != keep && node.material.is_some() {
                node.material = None;
                changed = true;
            }
        }
        if changed {
            self.version += 1;
        }
    }

    /// Add an empty transform node at a world position
    pub fn add_transform_node(&mut self, id: &str, position: Vec3) {
        self.remove_node(id);
        self.scene
            .nodes
            .push(SceneNode::transform_node(id, Transform::at(from_vec3(position))));
        self.version += 1;
    }

    /// Remove a node; its children are re-rooted keeping their world transform
    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.get_node(id).is_none() {
            return false;
        }
        let children: Vec<String> = self.scene.children_of(id).map(|n| n.id.clone()).collect();
        for child in &children {
            self.reparent(child, None);
        }
        self.scene.nodes.retain(|n| n.id != id);
        self.version += 1;
        true
    }

    /// Change a node's parent while keeping its world transform
    pub fn reparent(&mut self, id: &str, parent: Option<&str>) -> bool {
        if self.get_node(id).is_none() {
            return false;
        }
        if let Some(p) = parent {
            if p == id || self.get_node(p).is_none() || self.is_ancestor(id, p) {
                tracing::warn!("Refusing to parent '{id}' under '{p}'");
                return false;
            }
        }

        let world = world_matrix(&self.scene, id);
        let local = match parent {
            Some(p) => local_in_parent(world, world_matrix(&self.scene, p)),
            None => mat4_to_transform(world),
        };

        if let Some(node) = self.get_node_mut(id) {
            node.parent = parent.map(str::to_string);
            node.transform = local;
        }
        self.version += 1;
        true
    }

    /// Whether `ancestor` appears in the parent chain of `id`
    fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        let mut current = self.get_node(id).and_then(|n| n.parent.clone());
        let mut guard = 0;
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            guard += 1;
            if guard > self.scene.nodes.len() {
                return true;
            }
            current = self.get_node(&p).and_then(|n| n.parent.clone());
        }
        false
    }
}
