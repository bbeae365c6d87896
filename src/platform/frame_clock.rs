//=========================================================================
// Frame Clock
//=========================================================================
//
// Measures wall-clock time between redraws and turns it into FrameTime.
//
// Elapsed time is clamped to `max_frame_time` so a stall (window drag,
// debugger pause) never becomes one giant step. `reset()` restarts the
// measurement after a deliberate long frame (synchronous loading).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::time::FrameTime;

//=== FrameClock ==========================================================

pub(crate) struct FrameClock {
    last: Option<Instant>,
    total: Duration,
    max_frame_time: Duration,
}

impl FrameClock {
    pub(crate) fn new(max_frame_time: Duration) -> Self {
        Self {
            last: None,
            total: Duration::ZERO,
            max_frame_time,
        }
    }

    /// Starts a new frame now.
    pub(crate) fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Starts a new frame at `now`. The first frame has zero elapsed time.
    pub(crate) fn tick_at(&mut self, now: Instant) -> FrameTime {
        let elapsed = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };

        let clamped = elapsed.min(self.max_frame_time);
        if clamped < elapsed {
            trace!("Frame time clamped from {:?} to {:?}", elapsed, clamped);
        }

        self.last = Some(now);
        self.total += clamped;
        FrameTime::new(clamped, self.total)
    }

    /// Discards the time since the last tick.
    pub(crate) fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub(crate) fn reset_at(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
