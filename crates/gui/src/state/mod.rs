pub mod controller;
pub mod scene;
pub mod settings;

pub use controller::{GizmoDelta, SceneController, PIVOT_ID};
pub use scene::SceneState;
pub use settings::{AppSettings, Language};

/// Panel visibility flags
pub struct PanelVisibility {
    pub toolbar: bool,
    pub properties: bool,
    pub status_bar: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            toolbar: true,
            properties: true,
            status_bar: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub controller: SceneController,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
    /// Last file-dialog or IO error, shown in the status bar
    pub last_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(AppSettings::load())
    }
}

impl AppState {
    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            controller: SceneController::new(),
            panels: PanelVisibility::default(),
            settings,
            show_settings_window: false,
            last_error: None,
        }
    }
}
