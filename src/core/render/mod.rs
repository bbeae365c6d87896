//=========================================================================
// Render Surface
//=========================================================================
//
// The narrow drawing contract between screens and whatever renders them.
//
// Architecture:
//   Host ──&mut dyn Canvas──► ScreenStack::draw ──► DrawContext ──► Screen::draw
//
//=========================================================================

//=== Module Declarations =================================================

mod canvas;
mod command_buffer;

//=== Public API ==========================================================

pub use canvas::{Canvas, Color, Rect, TextStyle};
pub use command_buffer::{CommandBuffer, DrawCommand};
