//=========================================================================
// Frame Time
//=========================================================================
//
// Per-frame timing snapshot handed to every screen hook.
//
// The host loop measures wall-clock time between frames and produces one
// FrameTime per frame. Screens only ever read it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== FrameTime ===========================================================

/// Timing information for a single frame.
///
/// `elapsed` is the time since the previous frame (already clamped by the
/// host), `total` is the accumulated time since the loop started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    elapsed: Duration,
    total: Duration,
}

impl FrameTime {
    /// Creates a frame snapshot from explicit values.
    pub fn new(elapsed: Duration, total: Duration) -> Self {
        Self { elapsed, total }
    }

    /// Convenience constructor for a frame that advanced by `elapsed`
    /// from the start of time.
    pub fn from_elapsed(elapsed: Duration) -> Self {
        Self::new(elapsed, elapsed)
    }

    /// Returns the snapshot for the next frame after `elapsed` more time.
    pub fn advance(self, elapsed: Duration) -> Self {
        Self {
            elapsed,
            total: self.total + elapsed,
        }
    }

    /// Time since the previous frame.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time since the loop started.
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Elapsed time in seconds, as used by fades and animations.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Total time in seconds.
    pub fn total_secs(&self) -> f64 {
        self.total.as_secs_f64()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
