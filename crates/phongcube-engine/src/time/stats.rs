use std::time::{Duration, Instant};

/// Frames-per-second sampler.
///
/// Counts frames and yields an average rate once per reporting interval.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    window_start: Option<Instant>,
    frames: u32,
    last_fps: Option<f32>,
}

impl FrameStats {
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());
        Self {
            interval,
            window_start: None,
            frames: 0,
            last_fps: None,
        }
    }

    /// Records one frame presented at `now`.
    ///
    /// Returns the average FPS over the interval that just closed, if any.
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            self.frames = 0;
            return None;
        };

        self.frames += 1;

        let span = now.saturating_duration_since(start);
        if span < self.interval {
            return None;
        }

        let fps = self.frames as f32 / span.as_secs_f32();
        self.window_start = Some(now);
        self.frames = 0;
        self.last_fps = Some(fps);
        Some(fps)
    }

    /// Most recently reported FPS.
    pub fn last_fps(&self) -> Option<f32> {
        self.last_fps
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
