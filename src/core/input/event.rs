//=========================================================================
// Input Event Types
//
// Defines the portable representation of low-level input events.
//
// This module abstracts away platform-specific input (e.g. Winit, gamepad
// libraries) into a unified, engine-friendly format consumed by the
// screen stack's input snapshot.
//
// Responsibilities:
// - Represent keyboard keys and pad buttons in a stable, portable way
// - Attribute every event to the acting party (`ActorId`)
// - Provide equality and hashing semantics for set-based state tracking
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)  ── crossbeam channel ──┐
//                                                     ↓
//                                          InputState::refresh()
//                                                     ↓
//                                      focused Screen::handle_input()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== ActorId =============================================================

/// Identifies the party that produced an input (a player, a pad slot).
///
/// Screens may be restricted to a single controlling actor; when they are
/// not, any actor can drive them and queries report which one did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u8);

impl ActorId {
    /// The actor that owns the keyboard.
    pub const PRIMARY: Self = Self(0);

    /// Creates an actor id from a slot index.
    #[inline]
    pub const fn new(slot: u8) -> Self {
        Self(slot)
    }

    /// Returns the slot index.
    #[inline]
    pub const fn slot(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
///
/// Platform mapping:
/// - Winit: Uses `winit::keyboard::KeyCode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== PadButton ===========================================================

/// Digital pad button identifier.
///
/// Pad backends report buttons per actor; the layout follows the common
/// face/shoulder naming rather than any vendor's glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    /// Bottom face button (confirm).
    South,
    /// Right face button (back).
    East,
    Start,
    Back,
}

//=== Control =============================================================

/// Any digital control a query can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Key(KeyCode),
    Pad(PadButton),
}

impl From<KeyCode> for Control {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<PadButton> for Control {
    fn from(button: PadButton) -> Self {
        Self::Pad(button)
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// Every event is attributed to an actor so that screens restricted to a
/// controlling actor can ignore everybody else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown { actor: ActorId, key: KeyCode },

    /// Key released.
    KeyUp { actor: ActorId, key: KeyCode },

    /// Pad button pressed.
    PadDown { actor: ActorId, button: PadButton },

    /// Pad button released.
    PadUp { actor: ActorId, button: PadButton },

    /// Unrecognized or unsupported event.
    ///
    /// Silently ignored by the input snapshot.
    Unidentified,
}

impl InputEvent {
    /// Returns the actor, control and pressed flag carried by the event.
    ///
    /// `None` for `Unidentified`.
    pub fn decompose(&self) -> Option<(ActorId, Control, bool)> {
        match *self {
            Self::KeyDown { actor, key } => Some((actor, Control::Key(key), true)),
            Self::KeyUp { actor, key } => Some((actor, Control::Key(key), false)),
            Self::PadDown { actor, button } => Some((actor, Control::Pad(button), true)),
            Self::PadUp { actor, button } => Some((actor, Control::Pad(button), false)),
            Self::Unidentified => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
