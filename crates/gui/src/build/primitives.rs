//! Primitive mesh creation

use shared::MeshKind;

use crate::viewport::mesh::{self, MeshData};

pub const SPHERE_RINGS: u32 = 24;
pub const SPHERE_SECTORS: u32 = 32;

/// Local-space mesh for a node geometry
pub fn create_primitive(kind: &MeshKind, color: [f32; 3]) -> MeshData {
    match kind {
        MeshKind::Box {
            width,
            height,
            depth,
        } => mesh::cuboid(*width as f32, *height as f32, *depth as f32, color),
        MeshKind::Sphere { diameter } => {
            mesh::sphere(*diameter as f32 * 0.5, SPHERE_RINGS, SPHERE_SECTORS, color)
        }
    }
}
