use std::collections::HashMap;

use glam::Vec3;

use super::mesh::MeshData;

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color)
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for i in 0..data.vertex_count() {
            let p = data.position(i);
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Result of picking a triangle in a mesh
#[derive(Clone, Debug)]
pub struct TriangleHit {
    /// Index of the triangle (into mesh.indices / 3)
    pub triangle_index: usize,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

/// Find the nearest triangle in a mesh intersected by the ray.
pub fn pick_triangle(ray: &Ray, mesh: &MeshData) -> Option<TriangleHit> {
    let mut best: Option<TriangleHit> = None;

    for (tri_idx, tri) in mesh.indices.chunks_exact(3).enumerate() {
        let v0 = mesh.position(tri[0] as usize);
        let v1 = mesh.position(tri[1] as usize);
        let v2 = mesh.position(tri[2] as usize);

        if let Some(dist) = ray_triangle_intersect(ray, v0, v1, v2) {
            if best.as_ref().is_none_or(|b| dist < b.distance) {
                best = Some(TriangleHit {
                    triangle_index: tri_idx,
                    distance: dist,
                });
            }
        }
    }

    best
}

/// Pick the nearest world-space mesh hit by the ray.
///
/// The AABB test rejects meshes cheaply before the per-triangle test.
/// Returns the mesh id and hit distance.
pub fn pick_nearest_mesh<'a>(
    ray: &Ray,
    meshes: impl IntoIterator<Item = (&'a String, &'a MeshData)>,
    aabbs: &HashMap<String, Aabb>,
) -> Option<(String, f32)> {
    let mut best: Option<(String, f32)> = None;

    for (id, mesh) in meshes {
        if let Some(aabb) = aabbs.get(id) {
            if ray_aabb(ray, aabb).is_none() {
                continue;
            }
        }
        if let Some(hit) = pick_triangle(ray, mesh) {
            if best.as_ref().is_none_or(|(_, d)| hit.distance < *d) {
                best = Some((id.clone(), hit.distance));
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh::{cuboid, sphere};
    use glam::Mat4;

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let aabb = Aabb { min: Vec3::splat(-1.0), max: Vec3::splat(1.0) };
        let hit = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!((ray_aabb(&hit, &aabb).unwrap() - 4.0).abs() < 1e-5);

        let miss = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ray_aabb(&miss, &aabb).is_none());
    }

    #[test]
    fn test_ray_triangle_behind_origin() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::NEG_Z);
        let hit = ray_triangle_intersect(
            &ray,
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_pick_nearest_prefers_closer_mesh() {
        let mut near = sphere(0.5, 12, 16, [1.0; 3]);
        near.transform(&Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)));
        let far = cuboid(10.0, 1.0, 10.0, [1.0; 3]);

        let mut meshes = HashMap::new();
        meshes.insert("near".to_string(), near);
        meshes.insert("far".to_string(), far);
        let aabbs: HashMap<String, Aabb> = meshes
            .iter()
            .map(|(k, m)| (k.clone(), Aabb::from_mesh(m)))
            .collect();

        // Looking straight down through the sphere onto the slab
        let ray = Ray::new(Vec3::new(0.01, 5.0, 0.013), Vec3::NEG_Y);
        let (id, dist) = pick_nearest_mesh(&ray, &meshes, &aabbs).unwrap();
        assert_eq!(id, "near");
        assert!((dist - 3.5).abs() < 0.05);

        // Off to the side only the slab is hit
        let ray = Ray::new(Vec3::new(3.0, 5.0, 0.2), Vec3::NEG_Y);
        let (id, _) = pick_nearest_mesh(&ray, &meshes, &aabbs).unwrap();
        assert_eq!(id, "far");
    }

    #[test]
    fn test_pick_nearest_miss() {
        let mut meshes = HashMap::new();
        meshes.insert("box".to_string(), cuboid(1.0, 1.0, 1.0, [1.0; 3]));
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(pick_nearest_mesh(&ray, &meshes, &HashMap::new()).is_none());
    }
}
