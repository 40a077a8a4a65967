//! Time subsystem.
//!
//! Frame timing utilities that do not depend on the runtime:
//! - one `FrameClock` per window; call `tick()` once per presented frame
//! - `FrameStats` turns frame timestamps into a periodic FPS figure

mod frame_clock;
mod stats;

pub use frame_clock::{FrameClock, FrameTime};
pub use stats::FrameStats;
