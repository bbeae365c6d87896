//=========================================================================
// Input
//
// Portable input events and the per-frame snapshot routed to the focused
// screen.
//
// Responsibilities:
// - Define actor-attributed key/pad events (`event`)
// - Maintain current/previous held-control sets (`input_state`)
// - Answer menu-navigation queries for base screens
//
// Notes:
// Device-to-action remapping is the application's concern. The queries
// here cover the navigation vocabulary the bundled screens need.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod input_state;

//=== Public API ==========================================================

pub use event::{ActorId, Control, InputEvent, KeyCode, PadButton};
pub use input_state::{InputState, MAX_EVENTS_PER_FRAME};
