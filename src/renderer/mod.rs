//! Rendering
//!
//! Canvas widgets are drawn as SDF primitives evaluated in the fragment
//! shader. Button overlays (matrix, rain, vortex) use Canvas 2D.

#[cfg(target_arch = "wasm32")]
pub mod overlay;
pub mod palette;
pub mod primitive;
pub mod scene;
pub mod sdf_pipeline;

pub use primitive::Primitive;
pub use scene::{Scene, build_scene};
pub use sdf_pipeline::SdfRenderState;
