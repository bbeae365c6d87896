//=========================================================================
// Screen Contexts
//=========================================================================
//
// What a screen may touch while one of its hooks runs.
//
// Architecture:
//   update()/handle_input() ──► ScreenContext ──► Vec<StackCommand>
//                                                      ↓
//                         ScreenStack applies them as soon as the hook returns
//
//   draw() ──► DrawContext ──► &mut dyn Canvas (plus a read-only id list)
//
// Commands are applied before the next screen in the pass is visited, so
// a removal is visible to the rest of the pass while an addition only
// joins the next pass.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::transition::{Transition, TransitionState};
use super::{Screen, ScreenId};
use crate::core::error::ScreenError;
use crate::core::input::ActorId;
use crate::core::render::{Canvas, Color, Rect};

//=== HostSignal ==========================================================

/// Requests from screens to the host loop, drained after each Update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// A long artificial gap just happened (synchronous load); the next
    /// frame must not treat it as elapsed time.
    ResetElapsedTime,

    /// The application should shut down.
    Exit,
}

//=== StackCommand ========================================================

/// Stack mutation queued by a screen hook.
pub(crate) enum StackCommand {
    Add {
        id: ScreenId,
        screen: Box<dyn Screen>,
        actor: Option<ActorId>,
    },
    Remove(ScreenId),
    Exit(ScreenId),
    Signal(HostSignal),
}

//=== StackControl ========================================================

/// The sanctioned stack mutation API.
///
/// Implemented by [`super::ScreenStack`] (host side, applied immediately)
/// and by [`ScreenContext`] (inside hooks, applied when the hook returns).
/// Helpers such as the load coordinator are written against this trait so
/// they work from either side.
pub trait StackControl {
    /// Adds a screen on top of the stack.
    fn add_screen(
        &mut self,
        screen: Box<dyn Screen>,
        actor: Option<ActorId>,
    ) -> Result<ScreenId, ScreenError>;

    /// Removes a screen immediately. No-op for unknown ids.
    fn remove_screen(&mut self, id: ScreenId);

    /// Starts a screen's exit transition (or removes it when its exit
    /// duration is zero). Idempotent.
    fn exit_screen(&mut self, id: ScreenId);

    /// Live screen ids, bottom to top.
    fn screen_ids(&self) -> Vec<ScreenId>;
}

//=== ScreenContext =======================================================

/// Handle passed to `Screen::update` and `Screen::handle_input`.
pub struct ScreenContext<'a> {
    id: ScreenId,
    controlling_actor: Option<ActorId>,
    transition: Transition,
    covered_by_other_screen: bool,
    screens: &'a [ScreenId],
    commands: &'a mut Vec<StackCommand>,
    next_id: &'a mut u64,
}

impl<'a> ScreenContext<'a> {
    pub(crate) fn new(
        id: ScreenId,
        controlling_actor: Option<ActorId>,
        transition: Transition,
        covered_by_other_screen: bool,
        screens: &'a [ScreenId],
        commands: &'a mut Vec<StackCommand>,
        next_id: &'a mut u64,
    ) -> Self {
        Self {
            id,
            controlling_actor,
            transition,
            covered_by_other_screen,
            screens,
            commands,
            next_id,
        }
    }

    //--- Self Queries -----------------------------------------------------

    /// Id of the screen whose hook is running.
    pub fn id(&self) -> ScreenId {
        self.id
    }

    /// Actor this screen accepts input from (`None` = anyone).
    pub fn controlling_actor(&self) -> Option<ActorId> {
        self.controlling_actor
    }

    /// Transition snapshot after this frame's advance.
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn state(&self) -> TransitionState {
        self.transition.state()
    }

    /// Whether a visible non-popup screen sits above this one this pass.
    pub fn covered_by_other_screen(&self) -> bool {
        self.covered_by_other_screen
    }

    /// Live screen ids (bottom to top) as committed before this hook ran.
    pub fn screens(&self) -> &[ScreenId] {
        self.screens
    }

    //--- Stack Mutation ---------------------------------------------------

    /// Queues a screen; it joins the stack when this hook returns and is
    /// first updated on the next pass.
    ///
    /// Never fails here: content-load errors surface from
    /// `ScreenStack::update`.
    pub fn add_screen(&mut self, screen: Box<dyn Screen>, actor: Option<ActorId>) -> ScreenId {
        let id = ScreenId(*self.next_id);
        *self.next_id += 1;
        self.commands.push(StackCommand::Add { id, screen, actor });
        id
    }

    /// Starts this screen's own exit transition.
    pub fn exit(&mut self) {
        self.commands.push(StackCommand::Exit(self.id));
    }

    /// Asks the host to discard the time spent in this frame.
    pub fn reset_elapsed_time(&mut self) {
        self.commands.push(StackCommand::Signal(HostSignal::ResetElapsedTime));
    }

    /// Asks the host to shut down.
    pub fn request_exit(&mut self) {
        self.commands.push(StackCommand::Signal(HostSignal::Exit));
    }
}

impl StackControl for ScreenContext<'_> {
    fn add_screen(
        &mut self,
        screen: Box<dyn Screen>,
        actor: Option<ActorId>,
    ) -> Result<ScreenId, ScreenError> {
        Ok(ScreenContext::add_screen(self, screen, actor))
    }

    fn remove_screen(&mut self, id: ScreenId) {
        self.commands.push(StackCommand::Remove(id));
    }

    fn exit_screen(&mut self, id: ScreenId) {
        self.commands.push(StackCommand::Exit(id));
    }

    fn screen_ids(&self) -> Vec<ScreenId> {
        self.screens.to_vec()
    }
}

//=== DrawContext =========================================================

/// Handle passed to `Screen::draw`. Lends the canvas for this call only.
pub struct DrawContext<'a> {
    canvas: &'a mut dyn Canvas,
    id: ScreenId,
    transition: Transition,
    controlling_actor: Option<ActorId>,
    screens: &'a [ScreenId],
}

impl<'a> DrawContext<'a> {
    pub(crate) fn new(
        canvas: &'a mut dyn Canvas,
        id: ScreenId,
        transition: Transition,
        controlling_actor: Option<ActorId>,
        screens: &'a [ScreenId],
    ) -> Self {
        Self {
            canvas,
            id,
            transition,
            controlling_actor,
            screens,
        }
    }

    /// Id of the screen being drawn.
    pub fn id(&self) -> ScreenId {
        self.id
    }

    /// Live screen ids (bottom to top) after this frame's Update.
    pub fn screens(&self) -> &[ScreenId] {
        self.screens
    }

    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    pub fn viewport(&self) -> Rect {
        self.canvas.viewport()
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Shorthand for `transition().alpha()`.
    pub fn alpha(&self) -> f32 {
        self.transition.alpha()
    }

    pub fn controlling_actor(&self) -> Option<ActorId> {
        self.controlling_actor
    }

    /// Darkens everything drawn so far with a full-viewport black overlay.
    pub fn fade_back_buffer_to_black(&mut self, alpha: f32) {
        fade_back_buffer_to_black(&mut *self.canvas, alpha);
    }
}

/// Fills the whole viewport with black scaled by `alpha`.
pub fn fade_back_buffer_to_black(canvas: &mut dyn Canvas, alpha: f32) {
    let viewport = canvas.viewport();
    canvas.fill_rect(viewport, Color::BLACK.scaled(alpha));
}

//=========================================================================
// Unit Tests
//=========================================================================
