//! Application settings

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Ru => "Русский",
            Language::En => "English",
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::Ru, Language::En]
    }
}

/// Grid display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Grid cell size in world units
    pub size: f32,
    /// Number of grid lines in each direction from origin
    pub range: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            size: 1.0,
            range: 10,
            opacity: 0.4,
        }
    }
}

/// Axis display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisSettings {
    pub visible: bool,
    pub length: f32,
    /// Show axis labels (X, Y, Z)
    pub show_labels: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            visible: true,
            length: 1.5,
            show_labels: true,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Color of meshes without a material, RGB 0..1
    pub mesh_color: [f32; 3],
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [51, 51, 77],
            mesh_color: shared::DEFAULT_DIFFUSE,
        }
    }
}

/// Gizmo display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GizmoSettings {
    /// On-screen gizmo size in pixels
    pub size_px: f32,
    /// Rotation step snapping in degrees (0 = off)
    pub rotation_snap_deg: f32,
}

impl Default for GizmoSettings {
    fn default() -> Self {
        Self {
            size_px: 90.0,
            rotation_snap_deg: 0.0,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    #[serde(default)]
    pub language: Language,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Language::default(),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    pub grid: GridSettings,
    pub axes: AxisSettings,
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub gizmo: GizmoSettings,
    pub ui: UiSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "gizmo-scene", "gizmo-scene") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring {}: {e}", config_path.display()),
                }
            }
        }
        Self::default()
    }

    /// Save settings to the platform config dir; failures are logged
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "gizmo-scene", "gizmo-scene") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Err(e) = self.save_to(&config_path) {
                tracing::warn!("{e}");
            }
        }
    }

    /// Write settings as JSON, creating the parent directory
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Cannot create {}: {e}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to save {}: {e}", path.display()))
    }

    /// Snap a rotation angle (radians) to the configured step
    pub fn snap_rotation(&self, angle: f32) -> f32 {
        let step = self.gizmo.rotation_snap_deg.to_radians();
        if step <= 0.0 {
            angle
        } else {
            (angle / step).round() * step
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_use_defaults() {
        let json = r#"{
            "grid": {"visible": false, "size": 2.0, "range": 3, "opacity": 1.0},
            "axes": {"visible": true, "length": 1.0, "show_labels": false},
            "viewport": {"background_color": [0, 0, 0], "mesh_color": [1.0, 1.0, 1.0]},
            "ui": {"font_size": 16.0}
        }"#;
        let s: AppSettings = serde_json::from_str(json).unwrap();
        assert!(!s.grid.visible);
        assert_eq!(s.ui.language, Language::Ru);
        assert_eq!(s.gizmo.size_px, 90.0);
    }

    #[test]
    fn test_save_to_reports_failure() {
        let dir = std::env::temp_dir().join(format!("gizmo-scene-settings-{}", std::process::id()));
        let path = dir.join("settings.json");
        let settings = AppSettings::default();
        settings.save_to(&path).unwrap();
        assert!(path.exists());

        // A regular file cannot act as a directory
        let err = settings.save_to(&path.join("nested.json")).unwrap_err();
        assert!(err.contains("Cannot create"), "{err}");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_snap_rotation() {
        let mut s = AppSettings::default();
        assert_eq!(s.snap_rotation(0.3), 0.3);
        s.gizmo.rotation_snap_deg = 15.0;
        let snapped = s.snap_rotation(20f32.to_radians());
        assert!((snapped - 15f32.to_radians()).abs() < 1e-6);
    }
}
