//=========================================================================
// Input State
//=========================================================================
//
// Per-frame input snapshot shared by all screens.
//
// Architecture:
//   Sender<InputEvent> ──► Receiver ──► refresh() ──► current/previous
//                                                        ↓
//                                             is_new_press() / menu queries
//
// Frame lifecycle: refresh() once at the start of each stack Update,
// then read-only queries from the focused screen's handle_input().
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, HashSet};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::event::{ActorId, Control, InputEvent, KeyCode, PadButton};

//=== Constants ===========================================================

/// Upper bound on events drained per refresh (prevents starvation).
pub const MAX_EVENTS_PER_FRAME: usize = 256;

//--- Menu bindings -------------------------------------------------------

const MENU_UP: [Control; 2] = [Control::Key(KeyCode::ArrowUp), Control::Pad(PadButton::DPadUp)];
const MENU_DOWN: [Control; 2] = [Control::Key(KeyCode::ArrowDown), Control::Pad(PadButton::DPadDown)];
const MENU_LEFT: [Control; 2] = [Control::Key(KeyCode::ArrowLeft), Control::Pad(PadButton::DPadLeft)];
const MENU_RIGHT: [Control; 2] = [Control::Key(KeyCode::ArrowRight), Control::Pad(PadButton::DPadRight)];
const MENU_SELECT: [Control; 4] = [
    Control::Key(KeyCode::Enter),
    Control::Key(KeyCode::Space),
    Control::Pad(PadButton::South),
    Control::Pad(PadButton::Start),
];
const MENU_CANCEL: [Control; 3] = [
    Control::Key(KeyCode::Escape),
    Control::Pad(PadButton::East),
    Control::Pad(PadButton::Back),
];
const PAUSE: [Control; 2] = [Control::Key(KeyCode::Escape), Control::Pad(PadButton::Start)];

//=== InputState ==========================================================

/// Snapshot of held controls per actor, for this frame and the previous.
///
/// Events are fed through a crossbeam channel; [`InputState::sender`]
/// hands out producer handles to the platform layer (or to tests).
pub struct InputState {
    receiver: Receiver<InputEvent>,
    sender: Sender<InputEvent>,

    //--- Persistent State (survives frame boundary) ----------------------
    current: BTreeMap<ActorId, HashSet<Control>>,

    //--- Previous Frame ---------------------------------------------------
    previous: BTreeMap<ActorId, HashSet<Control>>,
}

impl InputState {
    //--- Construction -----------------------------------------------------

    /// Creates an input snapshot fed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self::from_channel(sender, receiver)
    }

    /// Creates an input snapshot fed by a bounded channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "Input channel capacity must be positive");
        let (sender, receiver) = bounded(capacity);
        Self::from_channel(sender, receiver)
    }

    fn from_channel(sender: Sender<InputEvent>, receiver: Receiver<InputEvent>) -> Self {
        Self {
            receiver,
            sender,
            current: BTreeMap::new(),
            previous: BTreeMap::new(),
        }
    }

    /// Returns a producer handle for this snapshot's event channel.
    pub fn sender(&self) -> Sender<InputEvent> {
        self.sender.clone()
    }

    //--- Frame Processing -------------------------------------------------

    /// Rolls the current state into `previous` and applies pending events.
    ///
    /// At most [`MAX_EVENTS_PER_FRAME`] events are consumed per call; any
    /// backlog is left for the next frame.
    pub fn refresh(&mut self) {
        self.previous.clone_from(&self.current);

        let mut drained = 0;
        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.apply(&event);
                    drained += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Input backlog: drained {} events this frame", drained);
        } else if drained > 0 {
            trace!("Input refreshed with {} events", drained);
        }
    }

    fn apply(&mut self, event: &InputEvent) {
        let Some((actor, control, pressed)) = event.decompose() else {
            return;
        };

        let held = self.current.entry(actor).or_default();
        if pressed {
            held.insert(control);
        } else {
            held.remove(&control);
        }
    }

    //=====================================================================
    // Query API - Raw Controls
    //=====================================================================

    /// Returns `true` while `control` is held by `actor`.
    pub fn is_down(&self, control: impl Into<Control>, actor: ActorId) -> bool {
        let control = control.into();
        self.current
            .get(&actor)
            .is_some_and(|held| held.contains(&control))
    }

    /// Checks whether `control` went from up to down this frame.
    ///
    /// With `controlling = Some(actor)` only that actor is considered.
    /// With `None` every actor is checked in slot order and the first one
    /// that pressed it is returned.
    pub fn is_new_press(
        &self,
        control: impl Into<Control>,
        controlling: Option<ActorId>,
    ) -> Option<ActorId> {
        let control = control.into();
        match controlling {
            Some(actor) => self.pressed_by(control, actor).then_some(actor),
            None => self
                .current
                .keys()
                .copied()
                .find(|&actor| self.pressed_by(control, actor)),
        }
    }

    fn pressed_by(&self, control: Control, actor: ActorId) -> bool {
        let now = self
            .current
            .get(&actor)
            .is_some_and(|held| held.contains(&control));
        let before = self
            .previous
            .get(&actor)
            .is_some_and(|held| held.contains(&control));
        now && !before
    }

    fn any_new_press(&self, controls: &[Control], controlling: Option<ActorId>) -> Option<ActorId> {
        controls
            .iter()
            .find_map(|&control| self.is_new_press(control, controlling))
    }

    //=====================================================================
    // Query API - Menu Navigation
    //=====================================================================

    /// Menu cursor moved up.
    pub fn is_menu_up(&self, controlling: Option<ActorId>) -> bool {
        self.any_new_press(&MENU_UP, controlling).is_some()
    }

    /// Menu cursor moved down.
    pub fn is_menu_down(&self, controlling: Option<ActorId>) -> bool {
        self.any_new_press(&MENU_DOWN, controlling).is_some()
    }

    /// Reverse-select on the current entry.
    pub fn is_menu_left(&self, controlling: Option<ActorId>) -> Option<ActorId> {
        self.any_new_press(&MENU_LEFT, controlling)
    }

    /// Forward-select on the current entry.
    pub fn is_menu_right(&self, controlling: Option<ActorId>) -> Option<ActorId> {
        self.any_new_press(&MENU_RIGHT, controlling)
    }

    /// Confirm; returns the actor that confirmed.
    pub fn is_menu_select(&self, controlling: Option<ActorId>) -> Option<ActorId> {
        self.any_new_press(&MENU_SELECT, controlling)
    }

    /// Back out; returns the actor that cancelled.
    pub fn is_menu_cancel(&self, controlling: Option<ActorId>) -> Option<ActorId> {
        self.any_new_press(&MENU_CANCEL, controlling)
    }

    /// Pause request; returns the actor that asked.
    pub fn is_pause(&self, controlling: Option<ActorId>) -> Option<ActorId> {
        self.any_new_press(&PAUSE, controlling)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
