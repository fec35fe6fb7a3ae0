//! # Field Renderer
//!
//! Immediate-mode canvas seam, scene drawing for a particle field and the
//! wgpu backend that turns recorded shapes into instanced SDF quads.

pub mod canvas;
pub mod gpu;
pub mod renderer;
pub mod scene;

pub use canvas::*;
pub use gpu::*;
pub use renderer::*;
pub use scene::*;
