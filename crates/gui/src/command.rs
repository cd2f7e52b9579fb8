//! JSON command protocol for headless automation.

use serde::{Deserialize, Serialize};

use crate::harness::TestHarness;
use crate::viewport::interaction::PressOutcome;

/// A command an agent or script can execute against the harness.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Switch interaction mode (`action`, `position`, `scale`, `rotation`)
    SetMode { mode: String },
    /// Pick a mesh by id, as if clicked
    Pick { id: String },
    /// Click at viewport pixel coordinates
    PickAt { x: f32, y: f32 },
    /// Drop highlight and gizmo attachment
    ClearSelection,
    /// Press at `from`, move to `to`, release (pixel coordinates)
    Drag {
        from: [f32; 2],
        to: [f32; 2],
        #[serde(default = "default_steps")]
        steps: usize,
    },
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    /// Inspect mode, gizmo and nodes.
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
}

fn default_steps() -> usize {
    8
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn outcome_json(outcome: &PressOutcome) -> serde_json::Value {
    match outcome {
        PressOutcome::Handle(axis) => serde_json::json!({ "handle": format!("{axis:?}") }),
        PressOutcome::Picked(id) => serde_json::json!({ "picked": id }),
        PressOutcome::Miss => serde_json::json!({ "picked": null }),
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::SetMode { mode } => match harness.set_mode(&mode) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({ "mode": mode })),
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::Pick { id } => {
            if harness.pick(&id) {
                CommandResponse::ok_with_data(serde_json::json!({ "picked": id }))
            } else {
                CommandResponse::err(format!("'{id}' is not a pickable mesh"))
            }
        }

        AgentCommand::PickAt { x, y } => {
            let outcome = harness.click_at(egui::pos2(x, y));
            CommandResponse::ok_with_data(outcome_json(&outcome))
        }

        AgentCommand::ClearSelection => {
            harness.clear_selection();
            CommandResponse::ok()
        }

        AgentCommand::Drag { from, to, steps } => {
            let outcome = harness.drag(
                egui::pos2(from[0], from[1]),
                egui::pos2(to[0], to[1]),
                steps,
            );
            CommandResponse::ok_with_data(outcome_json(&outcome))
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Inspect => {
            let c = &harness.controller;
            let nodes: Vec<serde_json::Value> = c
                .scene
                .scene
                .nodes
                .iter()
                .map(|node| {
                    serde_json::json!({
                        "id": node.id,
                        "name": node.name,
                        "kind": node.kind.as_ref().map(|k| k.label()),
                        "parent": node.parent,
                        "position": node.transform.position,
                        "rotation": node.transform.rotation,
                        "scale": node.transform.scale,
                        "material": node.material.as_ref().map(|m| m.name.clone()),
                    })
                })
                .collect();
            let gizmo = c.gizmo().map(|g| {
                serde_json::json!({
                    "kind": format!("{:?}", g.kind),
                    "generation": g.generation,
                    "attached": g.attached,
                })
            });
            CommandResponse::ok_with_data(serde_json::json!({
                "mode": c.mode().as_str(),
                "gizmo": gizmo,
                "gizmo_mesh": c.gizmo_mesh(),
                "highlighted": c.highlighted(),
                "node_count": nodes.len(),
                "nodes": nodes,
            }))
        }

        AgentCommand::ExportScene => {
            let json = harness.export_scene_json();
            CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_undo() {
        let json = r#"{"command": "undo"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::Undo));
    }

    #[test]
    fn test_command_serde_set_mode() {
        let json = r#"{"command": "set_mode", "mode": "rotation"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::SetMode { mode } => assert_eq!(mode, "rotation"),
            _ => panic!("Expected SetMode"),
        }
    }

    #[test]
    fn test_command_serde_drag_default_steps() {
        let json = r#"{"command": "drag", "from": [1.0, 2.0], "to": [3.0, 4.0]}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::Drag { steps, .. } => assert_eq!(steps, 8),
            _ => panic!("Expected Drag"),
        }
    }

    #[test]
    fn test_execute_set_mode_invalid() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "set_mode", "mode": "fly"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("fly"));
    }

    #[test]
    fn test_execute_pick_and_inspect() {
        let mut h = TestHarness::new();
        execute_json(&mut h, r#"{"command": "set_mode", "mode": "position"}"#).unwrap();
        let resp = execute_json(&mut h, r#"{"command": "pick", "id": "sphere"}"#).unwrap();
        assert!(resp.success);

        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["mode"], "position");
        assert_eq!(data["gizmo"]["attached"], "sphere");
        assert_eq!(data["highlighted"][0], "sphere");
        assert_eq!(data["node_count"], 2);
    }

    #[test]
    fn test_execute_pick_unknown() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "pick", "id": "nope"}"#).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_export_scene() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "export_scene"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        let scene_json = data["scene_json"].as_str().unwrap();
        assert!(scene_json.contains("nodes"));
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        let result = execute_json(&mut h, "not valid json");
        assert!(result.is_err());
    }

    #[test]
    fn test_execute_batch() {
        let mut h = TestHarness::new();
        let resps = execute_json_batch(
            &mut h,
            r#"[{"command": "set_mode", "mode": "scale"}, {"command": "clear_selection"}, {"command": "undo"}]"#,
        )
        .unwrap();
        assert_eq!(resps.len(), 3);
        assert!(resps.iter().all(|r| r.success));
    }
}
