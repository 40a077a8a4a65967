//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record into a
//! [`RenderTarget`] handed out by the frame context.
//!
//! Convention:
//! - world space is right-handed, +Y up
//! - projection maps depth to wgpu's `0..1` range

mod ctx;
pub mod mesh;
pub mod scene;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{MeshRenderer, ShadingModel};
pub use scene::{Camera, Light, Material, SceneUniforms};
