//! Transform gizmos: move, scale and rotate handles.
//!
//! Everything here is pure math on rays and screen positions so it can be
//! driven from the viewport as well as from headless tests.

use glam::Vec3;
use shared::{GizmoKind, ObjectId};

use super::camera::ArcBallCamera;
use super::mesh::LineMeshData;
use super::picking::Ray;

/// Which handle of a gizmo is being hovered or dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
    /// Center handle of the scale gizmo (scales all axes)
    Uniform,
}

impl GizmoAxis {
    /// Unit direction of the axis; `Uniform` maps to the diagonal
    pub fn direction(&self) -> Vec3 {
        match self {
            GizmoAxis::X => Vec3::X,
            GizmoAxis::Y => Vec3::Y,
            GizmoAxis::Z => Vec3::Z,
            GizmoAxis::Uniform => Vec3::ONE.normalize(),
        }
    }

    fn color(&self) -> [f32; 4] {
        match self {
            GizmoAxis::X => [0.9, 0.2, 0.2, 1.0],
            GizmoAxis::Y => [0.2, 0.8, 0.2, 1.0],
            GizmoAxis::Z => [0.2, 0.3, 0.9, 1.0],
            GizmoAxis::Uniform => [0.85, 0.85, 0.85, 1.0],
        }
    }
}

const AXES: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];
const ACTIVE_COLOR: [f32; 4] = [1.0, 0.85, 0.1, 1.0];

/// A gizmo instance attached to at most one scene node
#[derive(Debug, Clone, PartialEq)]
pub struct Gizmo {
    pub kind: GizmoKind,
    /// Increases every time a gizmo is created
    pub generation: u64,
    /// Node the gizmo edits (a mesh, or the rotation pivot)
    pub attached: Option<ObjectId>,
}

/// In-progress drag of a gizmo handle
#[derive(Debug, Clone, PartialEq)]
pub struct GizmoDrag {
    pub axis: GizmoAxis,
    pub node_id: ObjectId,
}

// ── Hit testing ──────────────────────────────────────────────

/// Test which handle of a gizmo of `kind` drawn at `center` with arm length
/// `size` the ray hits.
pub fn hit_test(kind: GizmoKind, ray: &Ray, center: Vec3, size: f32) -> Option<GizmoAxis> {
    match kind {
        GizmoKind::Position => axis_hit_test(ray, center, size),
        GizmoKind::Scale => {
            if ray_point_distance(ray, center) < size * 0.12 {
                Some(GizmoAxis::Uniform)
            } else {
                axis_hit_test(ray, center, size)
            }
        }
        GizmoKind::Rotation => ring_hit_test(ray, center, size),
    }
}

/// Returns the axis if the ray passes near one of the axis lines.
fn axis_hit_test(ray: &Ray, center: Vec3, axis_length: f32) -> Option<GizmoAxis> {
    let threshold = axis_length * 0.08;
    let mut best: Option<(GizmoAxis, f32)> = None;

    for axis in AXES {
        let dist = ray_segment_distance(ray, center, center + axis.direction() * axis_length);
        if dist < threshold && best.as_ref().is_none_or(|(_, d)| dist < *d) {
            best = Some((axis, dist));
        }
    }

    best.map(|(axis, _)| axis)
}

/// Returns the axis whose rotation ring the ray crosses, nearest to the eye.
fn ring_hit_test(ray: &Ray, center: Vec3, radius: f32) -> Option<GizmoAxis> {
    let threshold = radius * 0.1;
    let mut best: Option<(GizmoAxis, f32)> = None;

    for axis in AXES {
        let normal = axis.direction();
        let denom = ray.direction.dot(normal);
        if denom.abs() < 1e-4 {
            continue;
        }
        let t = (center - ray.origin).dot(normal) / denom;
        if t < 0.0 {
            continue;
        }
        let radial = (ray.at(t) - center).length();
        if (radial - radius).abs() < threshold && best.as_ref().is_none_or(|(_, bt)| t < *bt) {
            best = Some((axis, t));
        }
    }

    best.map(|(axis, _)| axis)
}

// ── Drag math ────────────────────────────────────────────────

/// Screen-space direction and pixel length of one world unit along `axis`
fn screen_axis(
    camera: &ArcBallCamera,
    center: Vec3,
    axis: GizmoAxis,
    rect: egui::Rect,
) -> Option<(egui::Vec2, f32)> {
    let p0 = camera.project(center, rect)?;
    let p1 = camera.project(center + axis.direction(), rect)?;
    let screen_axis = p1 - p0;
    let len = screen_axis.length();
    if len < 1.0 {
        return None;
    }
    Some((screen_axis / len, len))
}

/// World-space translation for a screen drag along a position gizmo axis.
/// The screen delta is projected onto the axis as it appears on screen.
pub fn translate_delta(
    camera: &ArcBallCamera,
    center: Vec3,
    axis: GizmoAxis,
    screen_delta: egui::Vec2,
    rect: egui::Rect,
) -> Vec3 {
    if axis == GizmoAxis::Uniform {
        return Vec3::ZERO;
    }
    let Some((dir, pixels_per_unit)) = screen_axis(camera, center, axis, rect) else {
        return Vec3::ZERO;
    };
    let world_delta = screen_delta.dot(dir) / pixels_per_unit;
    axis.direction() * world_delta
}

/// Per-axis multiplicative scale factor for a screen drag on a scale handle.
/// Axes not affected by the handle get a factor of 1.
pub fn scale_factor(
    camera: &ArcBallCamera,
    center: Vec3,
    axis: GizmoAxis,
    screen_delta: egui::Vec2,
    rect: egui::Rect,
    size: f32,
) -> Vec3 {
    match axis {
        GizmoAxis::Uniform => {
            // Right/up grows, left/down shrinks
            let amount = (screen_delta.x - screen_delta.y) * 0.01;
            Vec3::splat((1.0 + amount).max(0.01))
        }
        _ => {
            let Some((dir, pixels_per_unit)) = screen_axis(camera, center, axis, rect) else {
                return Vec3::ONE;
            };
            let world_delta = screen_delta.dot(dir) / pixels_per_unit;
            let factor = (1.0 + world_delta / size.max(1e-3)).max(0.01);
            Vec3::ONE + axis.direction() * (factor - 1.0)
        }
    }
}

/// Signed rotation angle (radians, right-handed about `axis`) for a pointer
/// moving from `prev` to `current` around the gizmo center on screen.
pub fn rotation_angle(
    camera: &ArcBallCamera,
    center: Vec3,
    axis: GizmoAxis,
    prev: egui::Pos2,
    current: egui::Pos2,
    rect: egui::Rect,
) -> f32 {
    if axis == GizmoAxis::Uniform {
        return 0.0;
    }
    let Some(c) = camera.project(center, rect) else {
        return 0.0;
    };
    let a = prev - c;
    let b = current - c;
    if a.length() < 1.0 || b.length() < 1.0 {
        return 0.0;
    }

    // Screen y grows downward, so flip to get a counter-clockwise angle
    let screen_ccw = -(a.x * b.y - a.y * b.x).atan2(a.dot(b));

    let toward_viewer = axis.direction().dot(camera.eye_position() - center) >= 0.0;
    if toward_viewer {
        screen_ccw
    } else {
        -screen_ccw
    }
}

// ── Line meshes ──────────────────────────────────────────────

/// Build the line mesh for a gizmo of `kind` centered at `center`.
pub fn build_gizmo_lines(
    kind: GizmoKind,
    center: Vec3,
    size: f32,
    active: Option<GizmoAxis>,
) -> LineMeshData {
    let mut lines = LineMeshData::default();
    let color_of = |axis: GizmoAxis| {
        if active == Some(axis) {
            ACTIVE_COLOR
        } else {
            axis.color()
        }
    };

    match kind {
        GizmoKind::Position => {
            for axis in AXES {
                let dir = axis.direction();
                let tip = center + dir * size;
                lines.push_line(center, tip, color_of(axis));
                push_arrowhead(&mut lines, tip, dir, size * 0.15, color_of(axis));
            }
        }
        GizmoKind::Scale => {
            for axis in AXES {
                let tip = center + axis.direction() * size;
                lines.push_line(center, tip, color_of(axis));
                push_wire_cube(&mut lines, tip, size * 0.06, color_of(axis));
            }
            push_wire_cube(&mut lines, center, size * 0.1, color_of(GizmoAxis::Uniform));
        }
        GizmoKind::Rotation => {
            for axis in AXES {
                push_ring(&mut lines, center, axis.direction(), size, 48, color_of(axis));
            }
        }
    }

    lines
}

// ── Helpers ──────────────────────────────────────────────────

/// Two unit vectors spanning the plane perpendicular to `n`
fn plane_basis(n: Vec3) -> (Vec3, Vec3) {
    let helper = if n.dot(Vec3::Y).abs() > 0.9 { Vec3::X } else { Vec3::Y };
    let u = n.cross(helper).normalize();
    let v = n.cross(u);
    (u, v)
}

fn push_arrowhead(lines: &mut LineMeshData, tip: Vec3, dir: Vec3, len: f32, color: [f32; 4]) {
    let (u, v) = plane_basis(dir);
    let back = tip - dir * len;
    for side in [u, -u, v, -v] {
        lines.push_line(tip, back + side * len * 0.5, color);
    }
}

fn push_wire_cube(lines: &mut LineMeshData, center: Vec3, half: f32, color: [f32; 4]) {
    let corner = |i: u32| {
        center
            + Vec3::new(
                if i & 1 == 0 { -half } else { half },
                if i & 2 == 0 { -half } else { half },
                if i & 4 == 0 { -half } else { half },
            )
    };
    for i in 0..8u32 {
        for bit in [1u32, 2, 4] {
            if i & bit == 0 {
                lines.push_line(corner(i), corner(i | bit), color);
            }
        }
    }
}

fn push_ring(
    lines: &mut LineMeshData,
    center: Vec3,
    normal: Vec3,
    radius: f32,
    segments: u32,
    color: [f32; 4],
) {
    let (u, v) = plane_basis(normal);
    let point = |i: u32| {
        let a = std::f32::consts::TAU * i as f32 / segments as f32;
        center + (u * a.cos() + v * a.sin()) * radius
    };
    for i in 0..segments {
        lines.push_line(point(i), point(i + 1), color);
    }
}

/// Distance from a point to the ray (only the forward half)
fn ray_point_distance(ray: &Ray, point: Vec3) -> f32 {
    let t = (point - ray.origin).dot(ray.direction).max(0.0);
    (ray.at(t) - point).length()
}

/// Minimum distance between a ray and a line segment.
fn ray_segment_distance(ray: &Ray, line_start: Vec3, line_end: Vec3) -> f32 {
    let u = ray.direction;
    let v = line_end - line_start;
    let w = ray.origin - line_start;

    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);

    let denom = a * c - b * b;

    let (sc, tc) = if denom < 1e-7 {
        // Nearly parallel
        (0.0, if b > c { d / b } else { e / c })
    } else {
        ((b * e - c * d) / denom, (a * e - b * d) / denom)
    };

    let tc = tc.clamp(0.0, 1.0);
    let sc = sc.max(0.0);

    let closest_ray = ray.origin + u * sc;
    let closest_line = line_start + v * tc;

    (closest_ray - closest_line).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CameraDescription;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    fn front_camera() -> ArcBallCamera {
        ArcBallCamera::from_description(&CameraDescription {
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
        })
    }

    #[test]
    fn test_position_hit_x_axis() {
        let ray = Ray::new(Vec3::new(0.8, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(hit_test(GizmoKind::Position, &ray, Vec3::ZERO, 1.0), Some(GizmoAxis::X));
    }

    #[test]
    fn test_position_miss() {
        let ray = Ray::new(Vec3::new(0.6, 0.6, 5.0), Vec3::NEG_Z);
        assert_eq!(hit_test(GizmoKind::Position, &ray, Vec3::ZERO, 1.0), None);
    }

    #[test]
    fn test_scale_center_is_uniform() {
        let ray = Ray::new(Vec3::new(0.01, 0.01, 5.0), Vec3::NEG_Z);
        assert_eq!(hit_test(GizmoKind::Scale, &ray, Vec3::ZERO, 1.0), Some(GizmoAxis::Uniform));

        let ray = Ray::new(Vec3::new(0.0, 0.7, 5.0), Vec3::NEG_Z);
        assert_eq!(hit_test(GizmoKind::Scale, &ray, Vec3::ZERO, 1.0), Some(GizmoAxis::Y));
    }

    #[test]
    fn test_rotation_ring_hit_facing_camera() {
        // Looking down -Z, the Z ring is a full circle on screen
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z);
        assert_eq!(hit_test(GizmoKind::Rotation, &ray, Vec3::ZERO, 1.0), Some(GizmoAxis::Z));

        let ray = Ray::new(Vec3::new(0.0, 0.5, 5.0), Vec3::NEG_Z);
        assert_eq!(hit_test(GizmoKind::Rotation, &ray, Vec3::ZERO, 1.0), None);
    }

    #[test]
    fn test_translate_delta_follows_screen_axis() {
        let cam = front_camera();
        // Screen right is world +X for this camera
        let d = translate_delta(&cam, Vec3::ZERO, GizmoAxis::X, egui::vec2(50.0, 0.0), rect());
        assert!(d.x > 0.0);
        assert_eq!(d.y, 0.0);
        assert_eq!(d.z, 0.0);

        // Perpendicular drag does not move along X
        let d = translate_delta(&cam, Vec3::ZERO, GizmoAxis::X, egui::vec2(0.0, 50.0), rect());
        assert!(d.length() < 1e-5);
    }

    #[test]
    fn test_translate_delta_default_camera_mirrors_x() {
        // Default camera looks toward +Z, so screen right is world -X
        let cam = ArcBallCamera::default();
        let d = translate_delta(&cam, Vec3::ZERO, GizmoAxis::X, egui::vec2(50.0, 0.0), rect());
        assert!(d.x < 0.0);
    }

    #[test]
    fn test_scale_factor_axis_only() {
        let cam = front_camera();
        let f = scale_factor(&cam, Vec3::ZERO, GizmoAxis::Y, egui::vec2(0.0, -40.0), rect(), 1.0);
        assert!(f.y > 1.0);
        assert_eq!(f.x, 1.0);
        assert_eq!(f.z, 1.0);
    }

    #[test]
    fn test_scale_factor_uniform_never_negative() {
        let cam = front_camera();
        let f = scale_factor(&cam, Vec3::ZERO, GizmoAxis::Uniform, egui::vec2(-1000.0, 0.0), rect(), 1.0);
        assert!(f.x > 0.0);
        assert_eq!(f.x, f.y);
        assert_eq!(f.y, f.z);
    }

    #[test]
    fn test_rotation_angle_quarter_turn() {
        let cam = front_camera();
        let c = egui::pos2(400.0, 300.0);
        let right = c + egui::vec2(100.0, 0.0);
        let up = c + egui::vec2(0.0, -100.0);

        let angle = rotation_angle(&cam, Vec3::ZERO, GizmoAxis::Z, right, up, rect());
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-3);

        let back = rotation_angle(&cam, Vec3::ZERO, GizmoAxis::Z, up, right, rect());
        assert!((back + std::f32::consts::FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn test_build_lines_highlights_active_axis() {
        let lines = build_gizmo_lines(GizmoKind::Position, Vec3::ZERO, 1.0, Some(GizmoAxis::X));
        // First segment is the X shaft
        assert_eq!(&lines.vertices[3..7], &ACTIVE_COLOR);
        assert!(lines.segment_count() > 3);
    }

    #[test]
    fn test_build_lines_rotation_rings() {
        let lines = build_gizmo_lines(GizmoKind::Rotation, Vec3::ZERO, 2.0, None);
        assert_eq!(lines.segment_count(), 3 * 48);
    }
}
