//! phongcube engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the demo binary: window
//! loop, wgpu device/surface, frame timing, and the lit mesh renderer.

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
