//! This module contains the thin layer over the GPU API the demo is written against,
//! including the GPU call surface, shader management, mesh handling and drawing surfaces.

#[cfg(not(target_arch = "wasm32"))]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod gpu;
pub mod mesh;
pub mod shader;
pub mod surface;

#[cfg(not(target_arch = "wasm32"))]
pub use app::*;
#[cfg(target_arch = "wasm32")]
pub use canvas::*;
pub use gpu::*;
pub use mesh::*;
pub use shader::*;
pub use surface::*;
