//=========================================================================
// Message Box Screen
//=========================================================================
//
// Popup asking a yes/no question over whatever is beneath it.
//
// Select accepts, cancel backs out; either way the box publishes a
// `MessageBoxEvent`, runs the matching handler and exits.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::input::{ActorId, InputState};
use crate::core::render::{Color, Rect, TextStyle};
use crate::core::screen::{DrawContext, Screen, ScreenContext, ScreenSettings};
use crate::core::time::FrameTime;

//=== Constants ===========================================================

const TRANSITION_TIME: Duration = Duration::from_millis(200);
const USAGE_TEXT: &str = "\nEnter = yes\nEsc = cancel";
const DEFAULT_GRADIENT: &str = "gradient";

const HORIZONTAL_PADDING: f32 = 32.0;
const VERTICAL_PADDING: f32 = 16.0;

/// Overlay darkness relative to the transition alpha.
const OVERLAY_STRENGTH: f32 = 2.0 / 3.0;

//=== MessageBoxEvent =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBoxEvent {
    Accepted(ActorId),
    Cancelled(ActorId),
}

type Handler = Box<dyn FnMut(ActorId, &mut ScreenContext<'_>)>;

//=== MessageBoxScreen ====================================================

pub struct MessageBoxScreen {
    message: String,
    gradient: String,
    subscribers: Vec<Sender<MessageBoxEvent>>,
    on_accept: Option<Handler>,
    on_cancel: Option<Handler>,
}

impl MessageBoxScreen {
    /// Message followed by the standard "Enter = yes / Esc = cancel" hint.
    pub fn new(message: impl Into<String>) -> Self {
        let mut message = message.into();
        message.push_str(USAGE_TEXT);
        Self::without_usage_text(message)
    }

    pub fn without_usage_text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            gradient: DEFAULT_GRADIENT.to_owned(),
            subscribers: Vec::new(),
            on_accept: None,
            on_cancel: None,
        }
    }

    /// Image stretched behind the text.
    pub fn with_gradient(mut self, image: impl Into<String>) -> Self {
        self.gradient = image.into();
        self
    }

    /// Runs inside the box's input hook, before it exits.
    pub fn on_accept(mut self, handler: impl FnMut(ActorId, &mut ScreenContext<'_>) + 'static) -> Self {
        self.on_accept = Some(Box::new(handler));
        self
    }

    pub fn on_cancel(mut self, handler: impl FnMut(ActorId, &mut ScreenContext<'_>) + 'static) -> Self {
        self.on_cancel = Some(Box::new(handler));
        self
    }

    pub fn subscribe(&mut self) -> Receiver<MessageBoxEvent> {
        let (sender, receiver) = unbounded();
        self.subscribers.push(sender);
        receiver
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn resolve(&mut self, event: MessageBoxEvent, ctx: &mut ScreenContext<'_>) {
        debug!("Message box resolved: {:?}", event);
        self.subscribers.retain(|sender| sender.send(event).is_ok());

        let (handler, actor) = match event {
            MessageBoxEvent::Accepted(actor) => (self.on_accept.as_mut(), actor),
            MessageBoxEvent::Cancelled(actor) => (self.on_cancel.as_mut(), actor),
        };
        if let Some(handler) = handler {
            handler(actor, ctx);
        }

        ctx.exit();
    }
}

impl Screen for MessageBoxScreen {
    fn settings(&self) -> ScreenSettings {
        ScreenSettings::new().with_transitions(TRANSITION_TIME).popup()
    }

    fn name(&self) -> &'static str {
        "MessageBoxScreen"
    }

    fn handle_input(&mut self, input: &InputState, ctx: &mut ScreenContext<'_>) {
        let controlling = ctx.controlling_actor();

        if let Some(actor) = input.is_menu_select(controlling) {
            self.resolve(MessageBoxEvent::Accepted(actor), ctx);
        } else if let Some(actor) = input.is_menu_cancel(controlling) {
            self.resolve(MessageBoxEvent::Cancelled(actor), ctx);
        }
    }

    fn draw(&mut self, _frame: &FrameTime, ctx: &mut DrawContext<'_>) {
        let alpha = ctx.alpha();
        ctx.fade_back_buffer_to_black(alpha * OVERLAY_STRENGTH);

        let viewport = ctx.viewport();
        let canvas = ctx.canvas();
        let text: Rect = viewport.centered(canvas.measure_text(&self.message));
        let backdrop = text.padded(HORIZONTAL_PADDING, VERTICAL_PADDING);

        let color = Color::WHITE.scaled(alpha);
        canvas.draw_image(&self.gradient, backdrop, color);
        canvas.draw_text(&self.message, (text.x, text.y), TextStyle::new(color));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
