//! Autosave and scene file load/save

use std::path::{Path, PathBuf};

use shared::SceneDescription;

use super::SceneState;

impl SceneState {
    /// Get autosave file path
    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "gizmo-scene", "gizmo-scene")
            .map(|dirs| dirs.data_dir().join("autosave.json"))
    }

    /// Save scene to autosave file
    pub fn autosave(&self) {
        if let Some(path) = Self::autosave_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::debug!("Autosave skipped: {e}");
            }
        }
    }

    /// Load scene from autosave file
    pub fn load_autosave() -> Option<SceneDescription> {
        let path = Self::autosave_path()?;
        Self::load_from(&path).ok()
    }

    /// Write the scene as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.scene)
            .map_err(|e| format!("Failed to serialize scene: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }

    /// Read a scene JSON file
    pub fn load_from(path: &Path) -> Result<SceneDescription, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&json).map_err(|e| format!("Invalid scene JSON in {}: {e}", path.display()))
    }
}
