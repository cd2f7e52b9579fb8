// Library crate: exposes testable modules for integration tests and the agent interface.
// GUI-specific modules (app, ui, GL rendering) remain in the binary crate.

pub mod build;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod helpers;
pub mod state;

/// Viewport types that do not need a GL context (camera, picking, gizmo math).
/// The renderer and egui panel stay in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod gizmo;
    pub mod interaction;
    pub mod mesh;
    pub mod picking;
}
