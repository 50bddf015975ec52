//! Frame composition
//!
//! One frame is a flat triangle list: the 3D background (projected on the
//! CPU and painter-sorted) followed by the 2D gameplay layer on top.

use glam::{EulerRot, Quat, Vec2};

use super::camera::Camera;
use super::mesh::{Lighting, Mesh, rgb_linear, shade};
use super::shapes;
use super::vertex::{Vertex, colors};
use crate::assets::SpriteImage;
use crate::consts::*;
use crate::sim::{DecorShape, GameState, Geometry};

/// Ground strip below the ground line (pixels)
pub const GROUND_THICKNESS: f32 = 80.0;
pub const GROUND_LINE_WIDTH: f32 = 4.0;

/// Meshes for the decoration pool, built once per distinct geometry
pub struct BackgroundLayer {
    meshes: Vec<(Geometry, Mesh)>,
    pub lighting: Lighting,
}

struct Triangle {
    depth: f32,
    vertices: [Vertex; 3],
}

impl BackgroundLayer {
    pub fn new(shapes: &[DecorShape]) -> Self {
        let mut meshes: Vec<(Geometry, Mesh)> = Vec::new();
        for shape in shapes {
            if !meshes.iter().any(|(g, _)| *g == shape.geometry) {
                meshes.push((shape.geometry, Mesh::from_geometry(&shape.geometry)));
            }
        }
        log::debug!("Background layer built {} meshes", meshes.len());
        Self {
            meshes,
            lighting: Lighting::default(),
        }
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    fn mesh_for(&mut self, geometry: Geometry) -> &Mesh {
        let index = match self.meshes.iter().position(|(g, _)| *g == geometry) {
            Some(index) => index,
            None => {
                self.meshes.push((geometry, Mesh::from_geometry(&geometry)));
                self.meshes.len() - 1
            }
        };
        &self.meshes[index].1
    }

    /// Project, cull, shade and depth-sort every shape, appending back to front
    pub fn build(&mut self, shapes: &[DecorShape], camera: &Camera, out: &mut Vec<Vertex>) {
        let view_proj = camera.view_proj();
        let lighting = self.lighting;
        let mut triangles = Vec::new();

        for shape in shapes {
            let rotation = Quat::from_euler(
                EulerRot::XYZ,
                shape.rotation.x,
                shape.rotation.y,
                shape.rotation.z,
            );
            let base = rgb_linear(shape.color);
            let mesh = self.mesh_for(shape.geometry);

            for tri in mesh.indices.chunks_exact(3) {
                let corners = [tri[0], tri[1], tri[2]].map(|i| {
                    let v = mesh.vertices[i as usize];
                    (rotation * v.position + shape.position, rotation * v.normal)
                });

                // Cull faces pointing away from the camera
                let centroid = (corners[0].0 + corners[1].0 + corners[2].0) / 3.0;
                let facing = corners[0].1 + corners[1].1 + corners[2].1;
                let to_eye = camera.position - centroid;
                if facing.dot(to_eye) <= 0.0 {
                    continue;
                }

                let clip = corners.map(|(p, _)| camera.project(&view_proj, p));
                if clip.iter().any(|c| c.w < camera.near) {
                    continue;
                }

                let vertices = [0, 1, 2].map(|k| {
                    let (position, normal) = corners[k];
                    let eye = (camera.position - position).normalize_or_zero();
                    let lit = shade(shape.material, base, normal, eye, &lighting);
                    Vertex::new(
                        clip[k].x / clip[k].w,
                        clip[k].y / clip[k].w,
                        [
                            colors::linear_to_srgb(lit.x),
                            colors::linear_to_srgb(lit.y),
                            colors::linear_to_srgb(lit.z),
                            1.0,
                        ],
                    )
                });

                triangles.push(Triangle {
                    depth: to_eye.length_squared(),
                    vertices,
                });
            }
        }

        // Painter's algorithm: farthest first
        triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        out.extend(triangles.iter().flat_map(|t| t.vertices));
    }
}

/// Ground, obstacles and the player sprite in screen space
pub fn gameplay_layer(state: &GameState, sprite: &SpriteImage, out: &mut Vec<Vertex>) {
    let viewport = state.viewport;
    let ground_top = state.ground_y + OBSTACLE_GROUND_OFFSET;

    shapes::rect(
        out,
        viewport,
        Vec2::new(0.0, ground_top),
        Vec2::new(viewport.width, GROUND_THICKNESS),
        colors::GROUND,
    );
    shapes::line(
        out,
        viewport,
        Vec2::new(0.0, ground_top),
        Vec2::new(viewport.width, ground_top),
        GROUND_LINE_WIDTH,
        colors::GROUND_LINE,
    );

    for obstacle in &state.obstacles {
        let bounds = obstacle.bounds();
        shapes::rect(
            out,
            viewport,
            Vec2::new(bounds.x, bounds.y),
            Vec2::new(bounds.width, bounds.height),
            colors::OBSTACLE,
        );
    }

    shapes::sprite(
        out,
        viewport,
        sprite,
        state.player.pos,
        state.player.scale,
        state.player.rotation,
    );
}

/// Full draw list for one frame
pub fn build_frame(
    state: &GameState,
    camera: &Camera,
    background: &mut BackgroundLayer,
    sprite: &SpriteImage,
) -> Vec<Vertex> {
    let mut out = Vec::new();
    background.build(&state.background_shapes, camera, &mut out);
    gameplay_layer(state, sprite, &mut out);
    out
}
