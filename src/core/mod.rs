//=========================================================================
// Core Systems
//
// Everything that runs inside a frame, independent of the window system.
//
// Responsibilities:
// - Screen stack: transitions, focus, covering, load coordination
// - Input snapshot fed by the platform through a crossbeam channel
// - Drawing surface contract lent to screens during Draw
// - Reusable base screens (menus, message box, background)
//
// Notes:
// Nothing here touches Winit. The platform layer owns the window and
// calls `ScreenStack::update`/`draw` once per redraw; tests drive the
// same API directly with synthetic frame times and input events.
//
//=========================================================================

//=== Public Modules ======================================================

pub mod error;
pub mod input;
pub mod render;
pub mod screen;
pub mod time;
pub mod ui;

//=== Re-exports ==========================================================

pub use error::ScreenError;
pub use input::InputState;
pub use screen::{Screen, ScreenId, ScreenStack};
pub use time::FrameTime;
