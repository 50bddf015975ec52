//! WebGPU rendering module
//!
//! The 3D background is projected and shaded on the CPU, the 2D gameplay
//! layer is drawn over it, and the combined triangle list goes through a
//! single pass-through pipeline.

pub mod camera;
pub mod mesh;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use camera::Camera;
pub use pipeline::RenderState;
pub use scene::{BackgroundLayer, build_frame};
pub use vertex::Vertex;
