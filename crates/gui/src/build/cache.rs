//! Mesh cache management

use std::collections::HashMap;

use shared::SceneDescription;

use super::build_scene_meshes;
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Aabb;

/// Cached world-space meshes, rebuilt when the scene version changes
pub struct MeshCache {
    meshes: HashMap<String, MeshData>,
    aabbs: HashMap<String, Aabb>,
    version: u64,
    rebuild_count: u64,
}

impl Default for MeshCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshCache {
    pub fn new() -> Self {
        Self {
            meshes: HashMap::new(),
            aabbs: HashMap::new(),
            version: u64::MAX, // force first rebuild
            rebuild_count: 0,
        }
    }

    pub fn is_valid(&self, scene_version: u64) -> bool {
        self.version == scene_version
    }

    /// Rebuild if the scene changed since the last build
    pub fn ensure(&mut self, scene: &SceneDescription, scene_version: u64) {
        if !self.is_valid(scene_version) {
            self.rebuild(scene, scene_version);
        }
    }

    pub fn rebuild(&mut self, scene: &SceneDescription, scene_version: u64) {
        self.meshes = build_scene_meshes(scene);
        self.aabbs = self
            .meshes
            .iter()
            .map(|(id, mesh)| (id.clone(), Aabb::from_mesh(mesh)))
            .collect();
        self.version = scene_version;
        self.rebuild_count += 1;
        tracing::debug!("Rebuilt {} meshes (scene v{scene_version})", self.meshes.len());
    }

    pub fn meshes(&self) -> &HashMap<String, MeshData> {
        &self.meshes
    }

    pub fn meshes_clone(&self) -> HashMap<String, MeshData> {
        self.meshes.clone()
    }

    pub fn aabbs(&self) -> &HashMap<String, Aabb> {
        &self.aabbs
    }

    /// Number of rebuilds so far; the GL renderer uses it to skip re-uploads
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_rebuilds_only_on_version_change() {
        let scene = SceneDescription::default_scene();
        let mut cache = MeshCache::new();
        cache.ensure(&scene, 1);
        cache.ensure(&scene, 1);
        assert_eq!(cache.rebuild_count(), 1);
        assert_eq!(cache.aabbs().len(), 2);

        cache.ensure(&scene, 2);
        assert_eq!(cache.rebuild_count(), 2);
    }
}
