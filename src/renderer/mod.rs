//! wgpu rendering module
//!
//! A single textured quad, moved and tinted through one uniform buffer.

pub mod pipeline;
pub mod texture;
pub mod vertex;

pub use pipeline::QuadRenderState;
pub use texture::{LogoImage, LogoTexture};
pub use vertex::{QUAD_INDICES, QuadUniform, Vertex, quad_vertices};
