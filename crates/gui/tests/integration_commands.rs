//! Integration tests for the AgentCommand JSON protocol.
//!
//! JSON string -> parse -> execute against the harness -> response.

use glam::Vec3;
use gizmo_scene_lib::command::{execute_json, execute_json_batch};
use gizmo_scene_lib::harness::TestHarness;

#[test]
fn test_command_pick_at_sphere() {
    let mut h = TestHarness::new();
    let p = h.screen_of(Vec3::new(0.0, 1.0, 0.0)).unwrap();

    let json = format!(r#"{{"command": "pick_at", "x": {}, "y": {}}}"#, p.x, p.y);
    let resp = execute_json(&mut h, &json).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["picked"], "sphere");
}

#[test]
fn test_command_pick_at_sky_is_miss() {
    let mut h = TestHarness::new();
    let resp = execute_json(&mut h, r#"{"command": "pick_at", "x": 400.0, "y": 2.0}"#).unwrap();
    assert!(resp.success);
    assert!(resp.data.unwrap()["picked"].is_null());
}

#[test]
fn test_command_mode_generations_increase() {
    let mut h = TestHarness::new();
    let mut last = 0;
    for mode in ["position", "scale", "rotation", "position"] {
        let json = format!(r#"{{"command": "set_mode", "mode": "{mode}"}}"#);
        assert!(execute_json(&mut h, &json).unwrap().success);

        let data = execute_json(&mut h, r#"{"command": "inspect"}"#)
            .unwrap()
            .data
            .unwrap();
        let generation = data["gizmo"]["generation"].as_u64().unwrap();
        assert!(generation > last);
        last = generation;
    }
}

#[test]
fn test_command_drag_then_undo() {
    let mut h = TestHarness::new();
    execute_json(&mut h, r#"{"command": "set_mode", "mode": "position"}"#).unwrap();
    execute_json(&mut h, r#"{"command": "pick", "id": "sphere"}"#).unwrap();

    let from = h.handle_point(Vec3::Y, 0.66).unwrap();
    let json = format!(
        r#"{{"command": "drag", "from": [{}, {}], "to": [{}, {}]}}"#,
        from.x,
        from.y,
        from.x,
        from.y - 40.0
    );
    let resp = execute_json(&mut h, &json).unwrap();
    assert_eq!(resp.data.unwrap()["handle"], "Y");
    assert!(h.position_of("sphere").unwrap()[1] > 1.0);

    let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["undone"], true);
    assert_eq!(h.position_of("sphere").unwrap(), [0.0, 1.0, 0.0]);
}

#[test]
fn test_command_export_bakes_pivot() {
    let mut h = TestHarness::new();
    let resps = execute_json_batch(
        &mut h,
        r#"[
            {"command": "set_mode", "mode": "rotation"},
            {"command": "pick", "id": "sphere"},
            {"command": "export_scene"}
        ]"#,
    )
    .unwrap();
    assert!(resps.iter().all(|r| r.success));

    let data = resps[2].data.as_ref().unwrap();
    let json = data["scene_json"].as_str().unwrap();
    assert!(!json.contains("gizmo_pivot"));

    // Live scene still carries the pivot
    let data = execute_json(&mut h, r#"{"command": "inspect"}"#)
        .unwrap()
        .data
        .unwrap();
    assert_eq!(data["node_count"], 3);
    assert_eq!(data["gizmo"]["attached"], "gizmo_pivot");
}

#[test]
fn test_command_clear_selection() {
    let mut h = TestHarness::new();
    execute_json_batch(
        &mut h,
        r#"[{"command": "pick", "id": "ground"}, {"command": "clear_selection"}]"#,
    )
    .unwrap();
    let data = execute_json(&mut h, r#"{"command": "inspect"}"#)
        .unwrap()
        .data
        .unwrap();
    assert!(data["highlighted"].as_array().unwrap().is_empty());
    assert!(data["gizmo_mesh"].is_null());
}

#[test]
fn test_command_batch_invalid() {
    let mut h = TestHarness::new();
    assert!(execute_json_batch(&mut h, r#"{"command": "undo"}"#).is_err());
}
