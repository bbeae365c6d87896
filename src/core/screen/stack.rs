//=========================================================================
// Screen Stack
//=========================================================================
//
// Owns the ordered screen collection and runs the per-frame passes.
//
// Screens are kept bottom → top in insertion order. Update walks a
// snapshot of ids top → bottom, assigning focus and covering; Draw walks
// the live list bottom → top. Hooks mutate the stack through queued
// commands that are applied as soon as the hook returns.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::context::{fade_back_buffer_to_black, DrawContext, HostSignal, ScreenContext, StackCommand, StackControl};
use super::transition::{Transition, TransitionState, TransitionStep};
use super::{Screen, ScreenId, ScreenSettings};
use crate::core::error::ScreenError;
use crate::core::input::{ActorId, InputEvent, InputState};
use crate::core::render::Canvas;
use crate::core::time::FrameTime;

//=== ScreenInfo ==========================================================

/// Read-only snapshot of one registered screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenInfo {
    pub id: ScreenId,
    pub name: &'static str,
    pub state: TransitionState,
    pub transition_position: f32,
    pub is_popup: bool,
    pub is_exiting: bool,
    pub controlling_actor: Option<ActorId>,
}

//=== ScreenEntry =========================================================

struct ScreenEntry {
    id: ScreenId,
    screen: Box<dyn Screen>,
    settings: ScreenSettings,
    transition: Transition,
    controlling_actor: Option<ActorId>,
}

impl ScreenEntry {
    fn info(&self) -> ScreenInfo {
        ScreenInfo {
            id: self.id,
            name: self.screen.name(),
            state: self.transition.state(),
            transition_position: self.transition.position(),
            is_popup: self.settings.is_popup,
            is_exiting: self.transition.is_exiting(),
            controlling_actor: self.controlling_actor,
        }
    }
}

//=== ScreenStack =========================================================

/// Screen-stack coordinator.
///
/// # Frame protocol
///
/// The host calls [`update`](Self::update) then [`draw`](Self::draw) once
/// per frame, then drains [`take_signals`](Self::take_signals).
///
/// ```rust
/// # use aetheric_screens::prelude::*;
/// # use std::time::Duration;
/// # struct Title;
/// # impl Screen for Title {
/// #     fn draw(&mut self, _frame: &FrameTime, _ctx: &mut DrawContext<'_>) {}
/// # }
/// let mut stack = ScreenStack::new();
/// stack.initialize()?;
/// stack.add_screen(Box::new(Title), None)?;
///
/// let frame = FrameTime::from_elapsed(Duration::from_millis(16));
/// let mut canvas = CommandBuffer::new(800.0, 600.0);
/// stack.update(&frame, true)?;
/// stack.draw(&frame, &mut canvas);
/// # Ok::<(), ScreenError>(())
/// ```
pub struct ScreenStack {
    entries: Vec<ScreenEntry>,
    /// Ids of `entries`, same order. Lent to hooks without reallocating.
    live: Vec<ScreenId>,
    working: Vec<ScreenId>,
    input: InputState,
    signals: Vec<HostSignal>,
    next_id: u64,
    initialized: bool,
    trace_enabled: bool,
}

impl ScreenStack {
    //--- Construction -----------------------------------------------------

    /// Creates an empty, uninitialized stack with an unbounded input channel.
    pub fn new() -> Self {
        Self::with_input(InputState::new())
    }

    /// Creates an empty stack reading from the given input snapshot.
    pub fn with_input(input: InputState) -> Self {
        Self {
            entries: Vec::new(),
            live: Vec::new(),
            working: Vec::new(),
            input,
            signals: Vec::new(),
            next_id: 1,
            initialized: false,
            trace_enabled: false,
        }
    }

    /// Producer handle for feeding input events into the stack.
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.input.sender()
    }

    /// Input snapshot of the last Update.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Logs the screen list once per Update when enabled.
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace_enabled = enabled;
    }

    //--- Initialization ---------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Marks the stack ready and loads content of screens already added.
    ///
    /// Calling it again while initialized does nothing.
    pub fn initialize(&mut self) -> Result<(), ScreenError> {
        if self.initialized {
            debug!("Screen stack already initialized");
            return Ok(());
        }

        self.initialized = true;
        for entry in &mut self.entries {
            entry.screen.load_content()?;
        }

        info!("Screen stack initialized with {} screens", self.entries.len());
        Ok(())
    }

    /// Unloads every screen's content and returns to the uninitialized
    /// state. Screens stay registered.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        for entry in &mut self.entries {
            entry.screen.unload_content();
        }
        self.initialized = false;

        info!("Screen stack shut down");
    }

    //--- Update Pass ------------------------------------------------------

    /// Runs one update pass.
    ///
    /// `app_active` is `false` when the host window lacks OS focus; no
    /// screen receives input on such frames.
    ///
    /// # Errors
    ///
    /// Propagates content-load failures of screens added during the pass.
    pub fn update(&mut self, frame: &FrameTime, app_active: bool) -> Result<(), ScreenError> {
        //--- Step 1: Refresh input ----------------------------------------
        self.input.refresh();

        //--- Step 2: Snapshot the live list -------------------------------
        self.working.clear();
        self.working.extend_from_slice(&self.live);

        //--- Step 3: Seed the scan flags ----------------------------------
        let mut other_screen_has_focus = !app_active;
        let mut covered_by_other_screen = false;

        //--- Step 4: Walk top → bottom ------------------------------------
        while let Some(id) = self.working.pop() {
            let Some(index) = self.position(id) else {
                continue;
            };

            let entry = &mut self.entries[index];
            let covered = covered_by_other_screen && !entry.settings.ignore_covering;
            let step = entry
                .transition
                .advance(frame.elapsed(), other_screen_has_focus, covered);

            if step == TransitionStep::ExitComplete {
                debug!("{} finished exiting", id);
                self.remove_screen(id);
                continue;
            }

            self.dispatch(id, covered, |screen, ctx, _| screen.update(frame, ctx))?;

            // The screen may have removed itself from its own update.
            let Some(index) = self.position(id) else {
                continue;
            };

            let entry = &self.entries[index];
            if !entry.transition.state().is_visible() {
                continue;
            }
            let is_popup = entry.settings.is_popup;

            if !other_screen_has_focus {
                other_screen_has_focus = true;
                self.dispatch(id, covered, |screen, ctx, input| screen.handle_input(input, ctx))?;
            }

            if !is_popup {
                covered_by_other_screen = true;
            }
        }

        if self.trace_enabled {
            self.trace_screens();
        }

        Ok(())
    }

    /// Runs one hook on screen `id` and applies whatever it queued.
    fn dispatch<F>(&mut self, id: ScreenId, covered: bool, hook: F) -> Result<(), ScreenError>
    where
        F: FnOnce(&mut dyn Screen, &mut ScreenContext<'_>, &InputState),
    {
        let mut commands = Vec::new();

        {
            let Self {
                entries,
                live,
                input,
                next_id,
                ..
            } = self;

            let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
                return Ok(());
            };

            let mut ctx = ScreenContext::new(
                id,
                entry.controlling_actor,
                entry.transition,
                covered,
                live.as_slice(),
                &mut commands,
                next_id,
            );
            hook(entry.screen.as_mut(), &mut ctx, input);
        }

        self.apply(commands)
    }

    /// Applies queued commands in the order they were issued.
    fn apply(&mut self, commands: Vec<StackCommand>) -> Result<(), ScreenError> {
        for command in commands {
            match command {
                StackCommand::Add { id, screen, actor } => self.insert(id, screen, actor)?,
                StackCommand::Remove(id) => {
                    self.remove_screen(id);
                }
                StackCommand::Exit(id) => self.exit_screen(id),
                StackCommand::Signal(signal) => {
                    debug!("Host signal queued: {:?}", signal);
                    self.signals.push(signal);
                }
            }
        }
        Ok(())
    }

    //--- Draw Pass --------------------------------------------------------

    /// Draws every non-hidden screen, bottom to top.
    pub fn draw(&mut self, frame: &FrameTime, canvas: &mut dyn Canvas) {
        let Self { entries, live, .. } = self;

        for entry in entries.iter_mut() {
            if entry.transition.state() == TransitionState::Hidden {
                continue;
            }

            let mut ctx = DrawContext::new(
                &mut *canvas,
                entry.id,
                entry.transition,
                entry.controlling_actor,
                live.as_slice(),
            );
            entry.screen.draw(frame, &mut ctx);
        }
    }

    /// Shared translucent-overlay helper (see [`DrawContext::fade_back_buffer_to_black`]).
    pub fn fade_back_buffer_to_black(canvas: &mut dyn Canvas, alpha: f32) {
        fade_back_buffer_to_black(canvas, alpha);
    }

    //--- Mutation API -----------------------------------------------------

    /// Adds a screen on top.
    ///
    /// Loads its content first when the stack is initialized; on failure
    /// the screen is dropped and the error returned. A screen added while a
    /// pass is running is first updated on the next pass.
    pub fn add_screen(
        &mut self,
        screen: Box<dyn Screen>,
        actor: Option<ActorId>,
    ) -> Result<ScreenId, ScreenError> {
        let id = ScreenId(self.next_id);
        self.next_id += 1;
        self.insert(id, screen, actor)?;
        Ok(id)
    }

    /// Generic convenience over [`add_screen`](Self::add_screen).
    pub fn push<S>(&mut self, screen: S, actor: Option<ActorId>) -> Result<ScreenId, ScreenError>
    where
        S: Screen + 'static,
    {
        self.add_screen(Box::new(screen), actor)
    }

    fn insert(
        &mut self,
        id: ScreenId,
        mut screen: Box<dyn Screen>,
        actor: Option<ActorId>,
    ) -> Result<(), ScreenError> {
        let settings = screen.settings();

        if self.initialized {
            screen.load_content()?;
        }

        debug!(
            "Adding {} ({}) for {:?} at depth {}",
            id,
            screen.name(),
            actor,
            self.entries.len()
        );

        self.entries.push(ScreenEntry {
            id,
            screen,
            settings,
            transition: Transition::new(settings.transition_on, settings.transition_off),
            controlling_actor: actor,
        });
        self.live.push(id);

        Ok(())
    }

    /// Removes a screen immediately, from both the live list and the
    /// running pass. Returns `false` if it was not registered.
    pub fn remove_screen(&mut self, id: ScreenId) -> bool {
        let Some(index) = self.position(id) else {
            debug!("{} not in stack, skipping removal", id);
            return false;
        };

        let mut entry = self.entries.remove(index);
        self.live.remove(index);
        self.working.retain(|&pending| pending != id);

        if self.initialized {
            entry.screen.unload_content();
        }

        debug!("Removed {} ({}) from depth {}", id, entry.screen.name(), index);
        true
    }

    /// Starts a screen's exit transition; removes it at once when its
    /// exit duration is zero. Safe to call repeatedly.
    pub fn exit_screen(&mut self, id: ScreenId) {
        let Some(index) = self.position(id) else {
            debug!("{} not in stack, skipping exit", id);
            return;
        };

        if self.entries[index].settings.transition_off.is_zero() {
            self.remove_screen(id);
        } else {
            self.entries[index].transition.begin_exit();
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Snapshot of the live list, bottom to top.
    pub fn screens(&self) -> Vec<ScreenInfo> {
        self.entries.iter().map(ScreenEntry::info).collect()
    }

    /// Snapshot of one screen.
    pub fn screen(&self, id: ScreenId) -> Option<ScreenInfo> {
        self.position(id).map(|index| self.entries[index].info())
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drains the host signals queued by screens since the last call.
    pub fn take_signals(&mut self) -> Vec<HostSignal> {
        std::mem::take(&mut self.signals)
    }

    //--- Internal Helpers -------------------------------------------------

    fn position(&self, id: ScreenId) -> Option<usize> {
        self.live.iter().position(|&live| live == id)
    }

    fn trace_screens(&self) {
        if self.entries.is_empty() {
            warn!("Screen stack is empty");
            return;
        }

        let names: Vec<&str> = self.entries.iter().map(|entry| entry.screen.name()).collect();
        debug!("Screens: {}", names.join(", "));
    }
}

impl Default for ScreenStack {
    fn default() -> Self {
        Self::new()
    }
}

impl StackControl for ScreenStack {
    fn add_screen(
        &mut self,
        screen: Box<dyn Screen>,
        actor: Option<ActorId>,
    ) -> Result<ScreenId, ScreenError> {
        ScreenStack::add_screen(self, screen, actor)
    }

    fn remove_screen(&mut self, id: ScreenId) {
        ScreenStack::remove_screen(self, id);
    }

    fn exit_screen(&mut self, id: ScreenId) {
        ScreenStack::exit_screen(self, id);
    }

    fn screen_ids(&self) -> Vec<ScreenId> {
        self.live.clone()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
