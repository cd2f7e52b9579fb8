mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::build`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use gizmo_scene_lib::build;
pub use gizmo_scene_lib::helpers;
pub use gizmo_scene_lib::state;

use app::EditorApp;
use shared::{InteractionMode, SceneDescription};

/// Command-line options
#[derive(Debug, Default)]
pub struct LaunchOptions {
    pub scene: Option<SceneDescription>,
    pub mode: Option<InteractionMode>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gizmo_scene=info,gizmo_scene_lib=info".into()),
        )
        .init();

    let options = parse_args(std::env::args().skip(1));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Gizmo Scene")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "gizmo-scene",
        native_options,
        Box::new(move |cc| Ok(Box::new(EditorApp::new(cc, options)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

/// Parse `--scene <path>` and `--mode <mode>`; bad values are logged and skipped
fn parse_args(args: impl Iterator<Item = String>) -> LaunchOptions {
    let args: Vec<String> = args.collect();
    let mut options = LaunchOptions::default();
    let mut i = 0;
    while i < args.len() {
        match (args[i].as_str(), args.get(i + 1)) {
            ("--scene", Some(path)) => {
                match gizmo_scene_lib::state::SceneState::load_from(std::path::Path::new(path)) {
                    Ok(scene) => {
                        tracing::info!("Loaded scene from {path} ({} nodes)", scene.nodes.len());
                        options.scene = Some(scene);
                    }
                    Err(e) => tracing::error!("{e}"),
                }
                i += 2;
            }
            ("--mode", Some(mode)) => {
                match mode.parse::<InteractionMode>() {
                    Ok(m) => options.mode = Some(m),
                    Err(e) => tracing::error!("{e}"),
                }
                i += 2;
            }
            (other, _) => {
                tracing::warn!("Ignoring argument '{other}'");
                i += 1;
            }
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_mode() {
        let o = parse_args(args(&["--mode", "scale"]));
        assert_eq!(o.mode, Some(InteractionMode::Scale));
        assert!(o.scene.is_none());
    }

    #[test]
    fn test_parse_bad_mode_and_missing_scene() {
        let o = parse_args(args(&["--mode", "zoom", "--scene", "/nonexistent/scene.json"]));
        assert!(o.mode.is_none());
        assert!(o.scene.is_none());
    }

    #[test]
    fn test_parse_ignores_unknown() {
        let o = parse_args(args(&["--verbose", "--mode", "rotation"]));
        assert_eq!(o.mode, Some(InteractionMode::Rotation));
    }
}
