//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_screens::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Errors and timing
pub use crate::core::error::ScreenError;
pub use crate::core::time::FrameTime;

// Input
pub use crate::core::input::{ActorId, Control, InputEvent, InputState, KeyCode, PadButton};

// Drawing
pub use crate::core::render::{Canvas, Color, CommandBuffer, DrawCommand, Rect, TextStyle};

// Screen system
pub use crate::core::screen::{
    DrawContext, HostSignal, LoadOptions, LoadingScreen, Screen, ScreenContext, ScreenId, ScreenInfo,
    ScreenSettings, ScreenStack, StackControl, TransitionState,
};

// Base screens
pub use crate::core::ui::{
    BackgroundScreen, MenuController, MenuEntry, MenuEvent, MenuEventKind, MenuLayout, MenuScreen,
    MessageBoxEvent, MessageBoxScreen,
};
