//! Properties panel: transform of the picked mesh and scene lighting

use egui::Ui;
use shared::{SceneNode, Transform};

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("prop.title"));
    ui.separator();

    let Some(id) = state.controller.gizmo_mesh().map(str::to_owned) else {
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("prop.pick_mesh"));
        });
        show_light(ui, state);
        return;
    };

    // The rotation gizmo may have the mesh under a pivot; show world values
    let world = crate::helpers::world_transform(&state.controller.scene.scene, &id);
    let Some(node) = state.controller.scene.get_node(&id).cloned() else {
        ui.weak(t("prop.not_found"));
        return;
    };

    show_node_info(ui, &node);

    ui.add_space(8.0);
    let mut edited = world.clone();
    let edit = egui::CollapsingHeader::new(t("prop.transform"))
        .id_salt("transform")
        .default_open(true)
        .show(ui, |ui| transform_grid(ui, &mut edited))
        .body_returned
        .unwrap_or_default();

    if edit.changed {
        state
            .controller
            .set_mesh_world_transform(&id, edited, edit.started);
    }

    show_light(ui, state);
}

fn show_node_info(ui: &mut Ui, node: &SceneNode) {
    egui::Grid::new("node_info")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("ID:");
            ui.monospace(&node.id);
            ui.end_row();

            ui.label(format!("{}:", t("prop.kind")));
            ui.label(node.kind.as_ref().map(|k| k.label()).unwrap_or("-"));
            ui.end_row();

            ui.label(format!("{}:", t("prop.material")));
            ui.label(node.material.as_ref().map(|m| m.name.as_str()).unwrap_or("-"));
            ui.end_row();
        });
}

/// Outcome of one frame of the transform grid
#[derive(Default)]
struct TransformEdit {
    changed: bool,
    /// First change of a drag, or a one-shot edit (typed value, click)
    started: bool,
}

impl TransformEdit {
    fn track(&mut self, ui: &Ui, response: &egui::Response, changed: bool) {
        // Remembers that the current drag already opened its undo step
        let open_key = response.id.with("edit_open");
        if response.dragged() {
            if changed && !ui.data(|d| d.get_temp::<bool>(open_key).unwrap_or(false)) {
                ui.data_mut(|d| d.insert_temp(open_key, true));
                self.started = true;
            }
        } else {
            ui.data_mut(|d| d.remove::<bool>(open_key));
            self.started |= changed;
        }
        self.changed |= changed;
    }
}

/// Editable position / rotation (degrees) / scale rows
fn transform_grid(ui: &mut Ui, tr: &mut Transform) -> TransformEdit {
    let mut edit = TransformEdit::default();
    egui::Grid::new("transform_grid")
        .num_columns(4)
        .spacing([6.0, 4.0])
        .show(ui, |ui| {
            ui.label(t("prop.position"));
            for v in &mut tr.position {
                let r = ui.add(egui::DragValue::new(v).speed(0.05).max_decimals(3));
                edit.track(ui, &r, r.changed());
            }
            ui.end_row();

            ui.label(t("prop.rotation"));
            for v in &mut tr.rotation {
                let mut deg = v.to_degrees();
                let r = ui.add(egui::DragValue::new(&mut deg).speed(1.0).max_decimals(1).suffix("°"));
                if r.changed() {
                    *v = deg.to_radians();
                }
                edit.track(ui, &r, r.changed());
            }
            ui.end_row();

            ui.label(t("prop.scale"));
            for v in &mut tr.scale {
                let r = ui.add(egui::DragValue::new(v).speed(0.02).range(0.01..=100.0).max_decimals(3));
                edit.track(ui, &r, r.changed());
            }
            ui.end_row();
        });
    edit
}

fn show_light(ui: &mut Ui, state: &AppState) {
    ui.add_space(8.0);
    egui::CollapsingHeader::new(t("prop.light"))
        .id_salt("light")
        .default_open(false)
        .show(ui, |ui| {
            let light = &state.controller.scene.scene.light;
            ui.label(format!(
                "{}: ({:.1}, {:.1}, {:.1})",
                t("prop.light_dir"),
                light.direction[0],
                light.direction[1],
                light.direction[2]
            ));
            ui.label(format!("{}: {:.2}", t("prop.light_intensity"), light.intensity));
        });
}
