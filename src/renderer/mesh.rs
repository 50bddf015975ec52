//! Mesh primitives (box, sphere, plane, cylinder) and shading

use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::sim::{Geometry, Material};

/// A mesh vertex with position and outward normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl MeshVertex {
    fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self {
            position: Vec3::from(position),
            normal: Vec3::from(normal),
        }
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Build the mesh for a geometry description
    pub fn from_geometry(geometry: &Geometry) -> Self {
        match *geometry {
            Geometry::Box {
                width,
                height,
                depth,
            } => create_box_mesh(width, height, depth),
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => create_sphere_mesh(radius, width_segments, height_segments),
            Geometry::Plane { width, height } => create_plane_mesh(width, height),
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => create_cylinder_mesh(radius_top, radius_bottom, height, radial_segments),
        }
    }
}

/// Box centered on the origin, one quad per face
pub fn create_box_mesh(width: f32, height: f32, depth: f32) -> Mesh {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let hd = depth / 2.0;

    // 8 corners
    let p = [
        [-hw, -hh, -hd], // 0: back-bottom-left
        [hw, -hh, -hd],  // 1: back-bottom-right
        [hw, hh, -hd],   // 2: back-top-right
        [-hw, hh, -hd],  // 3: back-top-left
        [-hw, -hh, hd],  // 4: front-bottom-left
        [hw, -hh, hd],   // 5: front-bottom-right
        [hw, hh, hd],    // 6: front-top-right
        [-hw, hh, hd],   // 7: front-top-left
    ];

    // CCW when viewed from outside
    let faces: [([usize; 4], [f32; 3]); 6] = [
        ([0, 3, 2, 1], [0.0, 0.0, -1.0]),
        ([4, 5, 6, 7], [0.0, 0.0, 1.0]),
        ([0, 4, 7, 3], [-1.0, 0.0, 0.0]),
        ([5, 1, 2, 6], [1.0, 0.0, 0.0]),
        ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
        ([3, 7, 6, 2], [0.0, 1.0, 0.0]),
    ];

    let mut mesh = Mesh::default();
    for (corners, normal) in faces {
        let base = mesh.vertices.len() as u32;
        for c in corners {
            mesh.vertices.push(MeshVertex::new(p[c], normal));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// UV sphere centered on the origin
pub fn create_sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let mut mesh = Mesh::default();
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let phi = v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let theta = u * TAU;
            let normal = Vec3::new(
                -theta.cos() * phi.sin(),
                phi.cos(),
                theta.sin() * phi.sin(),
            );
            mesh.vertices.push(MeshVertex {
                position: normal * radius,
                normal,
            });
        }
    }

    let row = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // Skip degenerate triangles at the poles
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Plane in the XY plane facing +Z
pub fn create_plane_mesh(width: f32, height: f32) -> Mesh {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let n = [0.0, 0.0, 1.0];

    Mesh {
        vertices: vec![
            MeshVertex::new([-hw, -hh, 0.0], n),
            MeshVertex::new([hw, -hh, 0.0], n),
            MeshVertex::new([hw, hh, 0.0], n),
            MeshVertex::new([-hw, hh, 0.0], n),
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Capped cylinder (or cone frustum) along the Y axis, centered on the origin
pub fn create_cylinder_mesh(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> Mesh {
    let segments = radial_segments.max(3);
    let hh = height / 2.0;
    // Side normals tilt when the radii differ
    let slope = (radius_bottom - radius_top) / height;

    let mut mesh = Mesh::default();

    // Side: two rings of vertices
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        let normal = Vec3::new(sin, slope, cos).normalize();
        mesh.vertices.push(MeshVertex {
            position: Vec3::new(radius_top * sin, hh, radius_top * cos),
            normal,
        });
        mesh.vertices.push(MeshVertex {
            position: Vec3::new(radius_bottom * sin, -hh, radius_bottom * cos),
            normal,
        });
    }
    for i in 0..segments {
        let top = i * 2;
        let bottom = top + 1;
        let next_top = top + 2;
        let next_bottom = top + 3;
        mesh.indices
            .extend_from_slice(&[top, bottom, next_bottom, top, next_bottom, next_top]);
    }

    // Caps: fan around a center vertex
    for (y, radius, normal_y) in [(hh, radius_top, 1.0), (-hh, radius_bottom, -1.0)] {
        if radius <= 0.0 {
            continue;
        }
        let normal = Vec3::new(0.0, normal_y, 0.0);
        let center = mesh.vertices.len() as u32;
        mesh.vertices.push(MeshVertex {
            position: Vec3::new(0.0, y, 0.0),
            normal,
        });
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.vertices.push(MeshVertex {
                position: Vec3::new(radius * sin, y, radius * cos),
                normal,
            });
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = a + 1;
            if normal_y > 0.0 {
                mesh.indices.extend_from_slice(&[center, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    mesh
}

/// Scene lights (colors already multiplied by intensity, linear space)
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub ambient: Vec3,
    pub directional: Vec3,
    /// Unit vector pointing toward the light
    pub direction: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: rgb_linear(0x404040) * 0.6,
            directional: rgb_linear(0xffffff) * 0.8,
            direction: Vec3::new(5.0, 5.0, 5.0).normalize(),
        }
    }
}

/// 0xRRGGBB to a linear-space color
pub fn rgb_linear(rgb: u32) -> Vec3 {
    let [r, g, b, _] = super::vertex::colors::hex(rgb, 1.0);
    Vec3::new(r, g, b).map(super::vertex::colors::srgb_to_linear)
}

/// Light one surface point. All vectors are unit length and in world space;
/// `to_eye` points from the surface toward the camera. Returns linear color.
pub fn shade(
    material: Material,
    base: Vec3,
    normal: Vec3,
    to_eye: Vec3,
    lighting: &Lighting,
) -> Vec3 {
    let n_dot_l = normal.dot(lighting.direction).max(0.0);
    match material {
        Material::Basic => base,
        Material::Phong => {
            let reflected = (2.0 * n_dot_l * normal - lighting.direction).normalize_or_zero();
            let specular = if n_dot_l > 0.0 {
                reflected.dot(to_eye).max(0.0).powf(30.0)
            } else {
                0.0
            };
            base * (lighting.ambient + lighting.directional * n_dot_l)
                + lighting.directional * specular * 0.07
        }
        Material::Standard => {
            // Rough dielectric: Lambert diffuse plus a dim, broad highlight
            let half = (lighting.direction + to_eye).normalize_or_zero();
            let sheen = normal.dot(half).max(0.0).powf(8.0) * 0.04;
            base * (lighting.ambient + lighting.directional * n_dot_l)
                + lighting.directional * sheen * n_dot_l
        }
    }
}
