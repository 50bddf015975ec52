//! Background decoration pool
//!
//! A fixed set of 3D shapes that spin, bob and drift toward the camera.
//! Shapes are never destroyed: once one drifts past the camera it is moved
//! back to the far plane at a new random spot.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::GameState;
use crate::consts::*;

/// Mesh shape and its construction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
}

impl Geometry {
    pub const UNIT_BOX: Geometry = Geometry::Box {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    };
    pub const BALL: Geometry = Geometry::Sphere {
        radius: 0.5,
        width_segments: 16,
        height_segments: 16,
    };
    pub const DRUM: Geometry = Geometry::Cylinder {
        radius_top: 0.5,
        radius_bottom: 0.5,
        height: 1.0,
        radial_segments: 8,
    };
}

/// Shading model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Material {
    /// Unlit flat color
    Basic,
    /// Diffuse + specular highlight
    #[default]
    Phong,
    /// Diffuse with a softer, rougher response
    Standard,
}

/// Decoration colors (0xRRGGBB)
pub const PALETTE: [u32; 6] = [0xff6b6b, 0x4ecdc4, 0x45b7d1, 0x96ceb4, 0xfeca57, 0xff9ff3];

const POOL_GEOMETRIES: [Geometry; 3] = [Geometry::UNIT_BOX, Geometry::BALL, Geometry::DRUM];

/// One pooled background shape
#[derive(Debug, Clone)]
pub struct DecorShape {
    pub geometry: Geometry,
    pub material: Material,
    pub color: u32,
    pub position: Vec3,
    /// Euler angles (radians)
    pub rotation: Vec3,
    /// Added to `rotation` every frame
    pub rotation_speed: Vec3,
    pub float_speed: f32,
    pub float_offset: f32,
}

impl DecorShape {
    /// Random shape somewhere behind the play area
    pub fn random(rng: &mut Pcg32) -> Self {
        let geometry = POOL_GEOMETRIES[rng.random_range(0..POOL_GEOMETRIES.len())];
        let color = PALETTE[rng.random_range(0..PALETTE.len())];

        let x = spread(rng, DECOR_SPREAD_X);
        let y = spread(rng, DECOR_SPREAD_Y);
        let z = -10.0 - rng.random::<f32>() * 10.0;

        Self {
            geometry,
            material: Material::Standard,
            color,
            position: Vec3::new(x, y, z),
            rotation: Vec3::ZERO,
            rotation_speed: Vec3::new(
                (rng.random::<f32>() - 0.5) * 0.02,
                (rng.random::<f32>() - 0.5) * 0.02,
                (rng.random::<f32>() - 0.5) * 0.02,
            ),
            float_speed: rng.random::<f32>() * 0.005 + 0.002,
            float_offset: rng.random::<f32>() * std::f32::consts::TAU,
        }
    }

    /// Advance one frame at animation time `time`. Returns true if the shape wrapped.
    pub fn update(&mut self, time: f32, rng: &mut Pcg32) -> bool {
        self.rotation += self.rotation_speed;
        self.position.y +=
            (time * self.float_speed + self.float_offset).sin() * DECOR_FLOAT_AMPLITUDE;

        self.position.z += DECOR_DRIFT_Z;
        if self.position.z > DECOR_WRAP_Z {
            self.position.z = DECOR_RESET_Z;
            self.position.x = spread(rng, DECOR_SPREAD_X);
            self.position.y = spread(rng, DECOR_SPREAD_Y);
            return true;
        }
        false
    }
}

/// Uniform value in [-half, half)
fn spread(rng: &mut Pcg32, half: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * half
}

/// Build the decoration pool
pub fn spawn_pool(rng: &mut Pcg32, count: usize) -> Vec<DecorShape> {
    (0..count).map(|_| DecorShape::random(rng)).collect()
}

/// Advance animation time and every pooled shape. Runs in every phase.
pub fn decor_step(state: &mut GameState) {
    state.time += state.config.frame_dt;
    let time = state.time;

    let mut wrapped = 0;
    for shape in &mut state.background_shapes {
        if shape.update(time, &mut state.rng) {
            wrapped += 1;
        }
    }
    if wrapped > 0 {
        log::trace!("{} background shapes wrapped", wrapped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_pool_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let pool = spawn_pool(&mut rng, 200);
        assert_eq!(pool.len(), 200);
        for shape in &pool {
            assert!((-10.0..=10.0).contains(&shape.position.x));
            assert!((-5.0..=5.0).contains(&shape.position.y));
            assert!((-20.0..=-10.0).contains(&shape.position.z));
            assert!(shape.rotation_speed.abs().max_element() <= 0.01);
            assert!((0.002..=0.007).contains(&shape.float_speed));
            assert!(PALETTE.contains(&shape.color));
            assert!(POOL_GEOMETRIES.contains(&shape.geometry));
            assert_eq!(shape.material, Material::Standard);
        }
    }

    #[test]
    fn test_wraparound() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut shape = DecorShape::random(&mut rng);
        shape.position = Vec3::new(9.0, 4.0, DECOR_WRAP_Z - 0.001);

        assert!(shape.update(1.0, &mut rng));
        assert_eq!(shape.position.z, DECOR_RESET_Z);
        assert!((-10.0..=10.0).contains(&shape.position.x));
        assert!((-5.0..=5.0).contains(&shape.position.y));
    }

    #[test]
    fn test_drift_and_spin() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut shape = DecorShape::random(&mut rng);
        let before = shape.clone();

        assert!(!shape.update(0.5, &mut rng));
        assert!((shape.position.z - (before.position.z + DECOR_DRIFT_Z)).abs() < 1e-6);
        assert_eq!(shape.position.x, before.position.x);
        assert!((shape.rotation - before.rotation_speed).abs().max_element() < 1e-7);
        let bob = (0.5 * before.float_speed + before.float_offset).sin() * DECOR_FLOAT_AMPLITUDE;
        assert!((shape.position.y - (before.position.y + bob)).abs() < 1e-6);
    }

    #[test]
    fn test_decor_step_runs_when_game_over() {
        let mut state = crate::sim::test_state(1);
        state.game_over();
        let z0 = state.background_shapes[0].position.z;

        decor_step(&mut state);
        decor_step(&mut state);

        assert!((state.time - 0.032).abs() < 1e-6);
        assert!(state.background_shapes[0].position.z > z0);
        assert_eq!(state.background_shapes.len(), DECOR_POOL_SIZE);
    }
}
