//! Scene state management
//!
//! Holds the scene graph with undo/redo history and a version counter used
//! to invalidate mesh caches.

mod history;
mod node_ops;
mod persistence;
mod transform_ops;

use shared::{SceneDescription, SceneNode};

const MAX_UNDO: usize = 100;

/// Scene graph with undo/redo history
pub struct SceneState {
    /// Current scene
    pub scene: SceneDescription,
    /// Undo stack - previous states
    pub(crate) undo_stack: Vec<SceneDescription>,
    /// Redo stack - undone states
    pub(crate) redo_stack: Vec<SceneDescription>,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(SceneDescription::default_scene())
    }
}

impl SceneState {
    pub fn new(scene: SceneDescription) -> Self {
        Self {
            scene,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            version: 0,
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get_node(&self, id: &str) -> Option<&SceneNode> {
        self.scene.node(id)
    }

    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut SceneNode> {
        self.scene.node_mut(id)
    }

    /// Replace the whole scene, dropping history
    pub fn set_scene(&mut self, scene: SceneDescription) {
        self.scene = scene;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.version += 1;
    }

    /// Save current state to undo stack
    pub(crate) fn save_undo(&mut self) {
        self.undo_stack.push(self.scene.clone());
        if self.undo_stack.len() > MAX_UNDO {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }
}
