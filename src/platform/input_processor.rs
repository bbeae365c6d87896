//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit keyboard events into screen-stack InputEvents.
//
// Architecture:
//   Winit KeyEvent → InputProcessor → InputEvent (actor-tagged) → channel
//
// The keyboard always belongs to `ActorId::PRIMARY`. Unmapped keys
// (F13-F24, media keys, exotic layouts) are filtered (returns None), and
// OS key-repeat presses are dropped so a held key is one press.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{ActorId, InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Maps Winit key events to engine input events for one actor.
pub(crate) struct InputProcessor {
    actor: ActorId,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            actor: ActorId::PRIMARY,
        }
    }

    pub(crate) fn actor(&self) -> ActorId {
        self.actor
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a Winit KeyEvent (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        match key_event.physical_key {
            PhysicalKey::Code(code) => self.process_key(code, key_event.state),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    /// Converts a physical key transition.
    pub(crate) fn process_key(&self, code: WinitKeyCode, state: ElementState) -> Option<InputEvent> {
        let key = KeyCode::from(code);
        if matches!(key, KeyCode::Unidentified) {
            return None;
        }

        let actor = self.actor;
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { actor, key },
            ElementState::Released => InputEvent::KeyUp { actor, key },
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, arrows, and common special keys. Unmapped keys (F13-F24,
/// numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_belongs_to_primary_actor() {
        let processor = InputProcessor::new();
        assert_eq!(processor.actor(), ActorId::PRIMARY);
    }

    #[test]
    fn press_and_release_map_to_down_and_up() {
        let processor = InputProcessor::new();

        assert_eq!(
            processor.process_key(WinitKeyCode::Enter, ElementState::Pressed),
            Some(InputEvent::KeyDown {
                actor: ActorId::PRIMARY,
                key: KeyCode::Enter
            })
        );
        assert_eq!(
            processor.process_key(WinitKeyCode::Escape, ElementState::Released),
            Some(InputEvent::KeyUp {
                actor: ActorId::PRIMARY,
                key: KeyCode::Escape
            })
        );
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let processor = InputProcessor::new();
        assert_eq!(processor.process_key(WinitKeyCode::F13, ElementState::Pressed), None);
        assert_eq!(processor.process_key(WinitKeyCode::MediaPlayPause, ElementState::Pressed), None);
    }

    #[test]
    fn winit_key_conversion() {
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowUp), KeyCode::ArrowUp);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyQ), KeyCode::KeyQ);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit7), KeyCode::Digit7);
        assert_eq!(KeyCode::from(WinitKeyCode::F1), KeyCode::Unidentified);
    }
}
