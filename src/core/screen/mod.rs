//=========================================================================
// Screen System
//=========================================================================
//
// Stack of layered screens (menus, popups, loading, gameplay views) with
// timed transitions, single-screen focus and covering.
//
// Architecture:
//   ScreenStack
//     ├─ entries: Vec<ScreenEntry>   (bottom → top, draw order)
//     │     └─ Box<dyn Screen> + Transition + ScreenSettings
//     └─ working: Vec<ScreenId>      (this pass's update queue, top first)
//
// Flow:
//   update() → refresh input → snapshot ids → pop top-first
//            → Transition::advance → Screen::update → Screen::handle_input
//   draw()   → bottom-to-top, skipping Hidden
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::error::ScreenError;
use crate::core::input::InputState;
use crate::core::time::FrameTime;

//=== Module Declarations =================================================

mod context;
mod loading;
mod stack;
mod transition;

//=== Public API ==========================================================

pub use context::{fade_back_buffer_to_black, DrawContext, HostSignal, ScreenContext, StackControl};
pub use loading::{LoadOptions, LoadingScreen};
pub use stack::{ScreenInfo, ScreenStack};
pub use transition::{Transition, TransitionState, TransitionStep};

//=== ScreenId ============================================================

/// Stable handle to a screen registered in a [`ScreenStack`].
///
/// Ids are never reused within a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub(crate) u64);

impl ScreenId {
    /// Raw id value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

//=== ScreenSettings ======================================================

/// Per-screen configuration captured when the screen is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenSettings {
    /// Time to transition on. Zero snaps to `Active` on the first update.
    pub transition_on: Duration,

    /// Time to transition off. Zero makes `exit_screen` remove at once.
    pub transition_off: Duration,

    /// Popups never cover the screens beneath them.
    pub is_popup: bool,

    /// Advance the transition as if never covered (backgrounds, gameplay
    /// views that stay visible under menus).
    pub ignore_covering: bool,
}

impl ScreenSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transition_on(mut self, duration: Duration) -> Self {
        self.transition_on = duration;
        self
    }

    pub fn with_transition_off(mut self, duration: Duration) -> Self {
        self.transition_off = duration;
        self
    }

    /// Same duration for both directions.
    pub fn with_transitions(self, duration: Duration) -> Self {
        self.with_transition_on(duration).with_transition_off(duration)
    }

    pub fn popup(mut self) -> Self {
        self.is_popup = true;
        self
    }

    pub fn ignoring_covering(mut self) -> Self {
        self.ignore_covering = true;
        self
    }
}

//=== Screen Trait ========================================================

/// One stack-managed UI layer.
///
/// Only `draw()` is required. Every other hook has an empty default.
///
/// # Hook order per frame
///
/// 1. `update()` every frame the screen is registered (even when hidden)
/// 2. `handle_input()` only on the frame the screen holds focus
/// 3. `draw()` every frame the screen is registered and not hidden
///
/// ```rust
/// # use aetheric_screens::prelude::*;
/// struct Splash;
///
/// impl Screen for Splash {
///     fn draw(&mut self, _frame: &FrameTime, ctx: &mut DrawContext<'_>) {
///         let alpha = ctx.alpha();
///         ctx.fade_back_buffer_to_black(alpha);
///     }
/// }
/// ```
pub trait Screen {
    /// Transition timing and layering flags. Read once, when added.
    fn settings(&self) -> ScreenSettings {
        ScreenSettings::default()
    }

    /// Name used in traces and snapshots.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called once when the screen joins an initialized stack (or when the
    /// stack initializes with the screen already in it).
    fn load_content(&mut self) -> Result<(), ScreenError> {
        Ok(())
    }

    /// Called once when the screen leaves an initialized stack.
    fn unload_content(&mut self) {}

    /// Called at most once per frame, only while the screen holds focus.
    fn handle_input(&mut self, _input: &InputState, _ctx: &mut ScreenContext<'_>) {}

    /// Called every frame after the transition has advanced.
    fn update(&mut self, _frame: &FrameTime, _ctx: &mut ScreenContext<'_>) {}

    /// Paints the screen. The stack is read-only here.
    fn draw(&mut self, frame: &FrameTime, ctx: &mut DrawContext<'_>);
}

//=========================================================================
// Unit Tests
//=========================================================================
