//! CPU-side mesh generation: UV spheres for bodies, flat annuli for rings,
//! and the inward-facing skybox box.

use glam::Vec3;

use crate::buffer::{BufferAllocator, MeshBuffer, VertexPositionNormalUv};

/// Generated mesh data awaiting GPU upload.
pub struct MeshData {
    pub vertices: Vec<VertexPositionNormalUv>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Upload this mesh to GPU buffers.
    pub fn upload(&self, allocator: &BufferAllocator, label: &str) -> MeshBuffer {
        allocator.create_mesh(label, &self.vertices, &self.indices)
    }
}

/// Generate a latitude-longitude sphere with equirectangular UVs.
///
/// `segments` is the longitudinal resolution, `rings` the latitudinal one.
/// Vertices along the seam are duplicated so UVs stay continuous.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let theta = v * std::f32::consts::PI;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let phi = u * std::f32::consts::TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            vertices.push(VertexPositionNormalUv {
                position: (normal * radius).into(),
                normal: normal.into(),
                uv: [u, v],
            });
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }

    MeshData { vertices, indices }
}

/// Generate a flat annulus in the x-z plane centered on the origin,
/// normals facing +Y. Drawn double-sided by the ring pipeline.
pub fn annulus(inner_radius: f32, outer_radius: f32, segments: u32) -> MeshData {
    let mut vertices = Vec::with_capacity((2 * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((segments * 6) as usize);

    for seg in 0..=segments {
        let u = seg as f32 / segments as f32;
        let angle = u * std::f32::consts::TAU;
        let (sin_a, cos_a) = angle.sin_cos();

        for (radius, v) in [(inner_radius, 0.0), (outer_radius, 1.0)] {
            vertices.push(VertexPositionNormalUv {
                position: [radius * cos_a, 0.0, radius * sin_a],
                normal: [0.0, 1.0, 0.0],
                uv: [u, v],
            });
        }
    }

    for seg in 0..segments {
        let a = seg * 2;
        indices.extend_from_slice(&[a, a + 1, a + 2, a + 1, a + 3, a + 2]);
    }

    MeshData { vertices, indices }
}

/// Generate the six inward-facing faces of a skybox cube with edge length
/// `2 * half`, in front/back/up/down/right/left order matching the asset
/// face list: +x, -x, +y, -y, +z, -z.
pub fn skybox_faces(half: f32) -> [MeshData; 6] {
    // (face center direction, texture right, texture up) per face, chosen
    // so each texture reads upright from inside the box.
    let faces = [
        (Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::X, Vec3::Y),
    ];

    faces.map(|(dir, right, up)| {
        let center = dir * half;
        let normal = -dir;
        let corner = |r: f32, u: f32| VertexPositionNormalUv {
            position: (center + right * half * r + up * half * u).into(),
            normal: normal.into(),
            uv: [(r + 1.0) / 2.0, (1.0 - u) / 2.0],
        };
        MeshData {
            vertices: vec![
                corner(-1.0, 1.0),
                corner(1.0, 1.0),
                corner(1.0, -1.0),
                corner(-1.0, -1.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_on_sphere() {
        let mesh = uv_sphere(4.0, 48, 32);
        for v in &mesh.vertices {
            let len = Vec3::from(v.position).length();
            assert!((len - 4.0).abs() < 1e-4, "vertex off sphere: length = {len}");
        }
    }

    #[test]
    fn test_sphere_normals_are_unit_radial() {
        let mesh = uv_sphere(2.0, 16, 12);
        for v in &mesh.vertices {
            let n = Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
            let radial = Vec3::from(v.position) / 2.0;
            assert!((n - radial).length() < 1e-4, "normal not radial");
        }
    }

    #[test]
    fn test_sphere_counts() {
        let (segments, rings) = (24u32, 16u32);
        let mesh = uv_sphere(1.0, segments, rings);
        assert_eq!(mesh.vertices.len() as u32, (rings + 1) * (segments + 1));
        assert_eq!(mesh.indices.len() as u32, rings * segments * 6);
    }

    #[test]
    fn test_sphere_indices_in_bounds() {
        let mesh = uv_sphere(1.0, 10, 8);
        let n = mesh.vertices.len() as u32;
        for &i in &mesh.indices {
            assert!(i < n, "index {i} out of bounds ({n} vertices)");
        }
    }

    #[test]
    fn test_sphere_uvs_in_range() {
        let mesh = uv_sphere(1.0, 12, 9);
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]), "u out of range: {}", v.uv[0]);
            assert!((0.0..=1.0).contains(&v.uv[1]), "v out of range: {}", v.uv[1]);
        }
    }

    #[test]
    fn test_annulus_stays_in_plane_and_band() {
        let mesh = annulus(9.0, 12.0, 64);
        for v in &mesh.vertices {
            assert_eq!(v.position[1], 0.0, "annulus left the x-z plane");
            let r = (v.position[0].powi(2) + v.position[2].powi(2)).sqrt();
            assert!(
                (8.999..=12.001).contains(&r),
                "annulus radius {r} outside band"
            );
        }
    }

    #[test]
    fn test_annulus_counts() {
        let segments = 100u32;
        let mesh = annulus(49.9, 50.0, segments);
        assert_eq!(mesh.vertices.len() as u32, 2 * (segments + 1));
        assert_eq!(mesh.indices.len() as u32, segments * 6);
    }

    #[test]
    fn test_skybox_has_six_quads() {
        let faces = skybox_faces(500.0);
        assert_eq!(faces.len(), 6);
        for face in &faces {
            assert_eq!(face.vertices.len(), 4);
            assert_eq!(face.indices.len(), 6);
        }
    }

    #[test]
    fn test_skybox_normals_point_inward() {
        for face in &skybox_faces(500.0) {
            for v in &face.vertices {
                let pos = Vec3::from(v.position);
                let n = Vec3::from(v.normal);
                assert!(
                    pos.dot(n) < 0.0,
                    "skybox normal points outward at {pos:?}"
                );
            }
        }
    }

    #[test]
    fn test_skybox_corners_on_cube() {
        for face in &skybox_faces(500.0) {
            for v in &face.vertices {
                let pos = Vec3::from(v.position);
                assert_eq!(pos.abs().max_element(), 500.0);
            }
        }
    }
}
