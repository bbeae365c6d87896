//=========================================================================
// Menu Screen
//=========================================================================
//
// Vertical list of text entries with a title, keyboard/pad navigation and
// typed selection events.
//
// Architecture:
//   InputState ──► MenuScreen::handle_input ──► MenuEvent
//                                                  ├─► C: MenuController (owned)
//                                                  └─► Sender<MenuEvent>  (subscribers)
//
// Entry layout follows the screen transition: entries slide in from the
// left while entering and out to the right while exiting, the title rises
// out of view, and everything fades with the transition alpha.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::input::{ActorId, InputState};
use crate::core::render::{Canvas, Color, TextStyle};
use crate::core::screen::{DrawContext, Screen, ScreenContext, ScreenSettings, TransitionState};
use crate::core::time::FrameTime;

//=== Constants ===========================================================

const TRANSITION_TIME: Duration = Duration::from_millis(500);

/// Selection highlight change per second.
const SELECTION_FADE_RATE: f32 = 4.0;

const PULSE_FREQUENCY: f64 = 6.0;
const PULSE_AMPLITUDE: f32 = 0.05;

const ENTER_SLIDE: f32 = 256.0;
const EXIT_SLIDE: f32 = 512.0;
const TITLE_RISE: f32 = 100.0;

//=== MenuLayout ==========================================================

/// Vertical placement of a menu, in pixels from the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuLayout {
    pub title_y: f32,
    pub entries_y: f32,
    /// Extra gap added after each entry's line height.
    pub entry_spacing: f32,
    pub title_scale: f32,
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self {
            title_y: 80.0,
            entries_y: 175.0,
            entry_spacing: 0.0,
            title_scale: 1.25,
        }
    }
}

//=== MenuEntry ===========================================================

/// One selectable line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    text: String,
    selection_fade: f32,
}

impl MenuEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection_fade: 0.0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Highlight amount in `[0, 1]`.
    pub fn selection_fade(&self) -> f32 {
        self.selection_fade
    }

    fn update(&mut self, is_selected: bool, elapsed_secs: f32) {
        let step = elapsed_secs * SELECTION_FADE_RATE;
        self.selection_fade = if is_selected {
            (self.selection_fade + step).min(1.0)
        } else {
            (self.selection_fade - step).max(0.0)
        };
    }

    fn draw(&self, canvas: &mut dyn Canvas, position: (f32, f32), is_selected: bool, total_secs: f64, alpha: f32) {
        let color = if is_selected { Color::YELLOW } else { Color::WHITE };

        let pulsate = ((total_secs * PULSE_FREQUENCY).sin() + 1.0) as f32;
        let scale = 1.0 + pulsate * PULSE_AMPLITUDE * self.selection_fade;

        let style = TextStyle::new(color.scaled(alpha))
            .with_scale(scale)
            .with_origin((0.0, canvas.line_height() / 2.0));
        canvas.draw_text(&self.text, position, style);
    }
}

//=== MenuEvent ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEventKind {
    /// Confirm on the selected entry.
    Selected,
    /// Right on the selected entry (next value of an option).
    ForwardSelected,
    /// Left on the selected entry (previous value of an option).
    ReverseSelected,
    /// Back out of the menu.
    Cancelled,
}

/// What happened in a menu, and who did it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEvent {
    pub kind: MenuEventKind,
    /// Selected entry index; `None` for `Cancelled`.
    pub entry: Option<usize>,
    pub actor: ActorId,
}

//=== MenuController ======================================================

/// Per-menu behaviour plugged into a [`MenuScreen`].
pub trait MenuController {
    /// Select, forward-select or reverse-select on `event.entry`.
    ///
    /// `entries` may be edited (option menus rewrite their labels).
    fn on_entry(&mut self, _event: MenuEvent, _entries: &mut [MenuEntry], _ctx: &mut ScreenContext<'_>) {}

    /// Cancel pressed. Exits the menu unless overridden.
    fn on_cancel(&mut self, _actor: ActorId, ctx: &mut ScreenContext<'_>) {
        ctx.exit();
    }
}

/// Menu driven only through [`MenuScreen::subscribe`].
impl MenuController for () {}

//=== MenuScreen ==========================================================

/// Title plus entries, navigated with up/down and confirmed with select.
///
/// ```rust
/// # use aetheric_screens::prelude::*;
/// let mut menu = MenuScreen::new("Main Menu")
///     .entry("Play")
///     .entry("Exit");
/// let events = menu.subscribe();
/// # drop(events);
/// ```
pub struct MenuScreen<C: MenuController = ()> {
    name: &'static str,
    title: String,
    entries: Vec<MenuEntry>,
    selected: usize,
    layout: MenuLayout,
    controller: C,
    subscribers: Vec<Sender<MenuEvent>>,
}

impl MenuScreen<()> {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_controller(title, ())
    }
}

impl<C: MenuController> MenuScreen<C> {
    //--- Construction -----------------------------------------------------

    pub fn with_controller(title: impl Into<String>, controller: C) -> Self {
        Self {
            name: "MenuScreen",
            title: title.into(),
            entries: Vec::new(),
            selected: 0,
            layout: MenuLayout::default(),
            controller,
            subscribers: Vec::new(),
        }
    }

    /// Appends an entry (builder form).
    pub fn entry(mut self, text: impl Into<String>) -> Self {
        self.entries.push(MenuEntry::new(text));
        self
    }

    pub fn with_layout(mut self, layout: MenuLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Name reported in traces and stack snapshots.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn add_entry(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    /// Returns a receiver that gets every event this menu produces.
    ///
    /// The receiver disconnects once the menu is dropped.
    pub fn subscribe(&mut self) -> Receiver<MenuEvent> {
        let (sender, receiver) = unbounded();
        self.subscribers.push(sender);
        receiver
    }

    //--- Accessors --------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [MenuEntry] {
        &mut self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    //--- Navigation -------------------------------------------------------

    fn select_previous(&mut self) {
        let count = self.entries.len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    fn select_next(&mut self) {
        let count = self.entries.len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    fn entry_event(&mut self, kind: MenuEventKind, actor: ActorId, ctx: &mut ScreenContext<'_>) {
        if self.entries.is_empty() {
            return;
        }

        let event = MenuEvent {
            kind,
            entry: Some(self.selected),
            actor,
        };
        self.publish(event);
        self.controller.on_entry(event, &mut self.entries, ctx);
    }

    fn cancel(&mut self, actor: ActorId, ctx: &mut ScreenContext<'_>) {
        self.publish(MenuEvent {
            kind: MenuEventKind::Cancelled,
            entry: None,
            actor,
        });
        self.controller.on_cancel(actor, ctx);
    }

    fn publish(&mut self, event: MenuEvent) {
        trace!("{} event: {:?}", self.name, event);
        self.subscribers.retain(|sender| sender.send(event).is_ok());
    }
}

impl<C: MenuController> Screen for MenuScreen<C> {
    fn settings(&self) -> ScreenSettings {
        ScreenSettings::new().with_transitions(TRANSITION_TIME)
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn handle_input(&mut self, input: &InputState, ctx: &mut ScreenContext<'_>) {
        let controlling = ctx.controlling_actor();

        if input.is_menu_up(controlling) {
            self.select_previous();
        }
        if input.is_menu_down(controlling) {
            self.select_next();
        }

        if let Some(actor) = input.is_menu_select(controlling) {
            self.entry_event(MenuEventKind::Selected, actor, ctx);
        } else if let Some(actor) = input.is_menu_cancel(controlling) {
            self.cancel(actor, ctx);
        } else if let Some(actor) = input.is_menu_left(controlling) {
            self.entry_event(MenuEventKind::ReverseSelected, actor, ctx);
        } else if let Some(actor) = input.is_menu_right(controlling) {
            self.entry_event(MenuEventKind::ForwardSelected, actor, ctx);
        }
    }

    fn update(&mut self, frame: &FrameTime, ctx: &mut ScreenContext<'_>) {
        let is_active = ctx.transition().is_active();
        let elapsed = frame.elapsed_secs();

        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.update(is_active && index == self.selected, elapsed);
        }
    }

    fn draw(&mut self, frame: &FrameTime, ctx: &mut DrawContext<'_>) {
        let transition = *ctx.transition();
        let alpha = transition.alpha();
        let offset = transition.position().powi(2);
        let is_active = transition.is_active();
        let viewport = ctx.viewport();
        let canvas = ctx.canvas();

        //--- Entries ------------------------------------------------------
        let line_height = canvas.line_height();
        let mut y = viewport.y + self.layout.entries_y;

        for (index, entry) in self.entries.iter().enumerate() {
            let (width, _) = canvas.measure_text(entry.text());
            let mut x = viewport.x + viewport.width / 2.0 - width / 2.0;
            if transition.state() == TransitionState::Entering {
                x -= offset * ENTER_SLIDE;
            } else {
                x += offset * EXIT_SLIDE;
            }

            let is_selected = is_active && index == self.selected;
            entry.draw(canvas, (x, y), is_selected, frame.total_secs(), alpha);

            y += line_height + self.layout.entry_spacing;
        }

        //--- Title --------------------------------------------------------
        if self.title.is_empty() {
            return;
        }

        let (width, height) = canvas.measure_text(&self.title);
        let position = (
            viewport.x + viewport.width / 2.0,
            viewport.y + self.layout.title_y - offset * TITLE_RISE,
        );
        let style = TextStyle::new(Color::SILVER.scaled(alpha))
            .with_scale(self.layout.title_scale)
            .with_origin((width / 2.0, height / 2.0));
        canvas.draw_text(&self.title, position, style);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::render::{CommandBuffer, DrawCommand};
    use crate::core::screen::{ScreenId, ScreenStack, TransitionState};
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Helpers ----------------------------------------------------------

    fn frame() -> FrameTime {
        FrameTime::from_elapsed(Duration::from_millis(100))
    }

    fn press(stack: &mut ScreenStack, key: KeyCode) {
        let sender = stack.input_sender();
        sender
            .send(InputEvent::KeyDown { actor: ActorId::PRIMARY, key })
            .unwrap();
        stack.update(&frame(), true).unwrap();
        sender
            .send(InputEvent::KeyUp { actor: ActorId::PRIMARY, key })
            .unwrap();
        stack.update(&frame(), true).unwrap();
    }

    fn settle(stack: &mut ScreenStack) {
        for _ in 0..6 {
            stack.update(&frame(), true).unwrap();
        }
    }

    fn texts(buffer: &CommandBuffer) -> Vec<(String, (f32, f32), TextStyle)> {
        buffer
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, position, style } => Some((text.clone(), *position, *style)),
                _ => None,
            })
            .collect()
    }

    #[derive(Default)]
    struct Recorder {
        seen: Rc<RefCell<Vec<MenuEvent>>>,
        keep_open: bool,
    }

    impl MenuController for Recorder {
        fn on_entry(&mut self, event: MenuEvent, entries: &mut [MenuEntry], _ctx: &mut ScreenContext<'_>) {
            self.seen.borrow_mut().push(event);
            if let Some(index) = event.entry {
                entries[index].set_text("picked");
            }
        }

        fn on_cancel(&mut self, actor: ActorId, ctx: &mut ScreenContext<'_>) {
            self.seen.borrow_mut().push(MenuEvent {
                kind: MenuEventKind::Cancelled,
                entry: None,
                actor,
            });
            if !self.keep_open {
                ctx.exit();
            }
        }
    }

    //--- Entries ----------------------------------------------------------

    #[test]
    fn selection_fade_is_clamped() {
        let mut entry = MenuEntry::new("Play");
        entry.update(true, 0.1);
        assert!((entry.selection_fade() - 0.4).abs() < 1e-6);

        entry.update(true, 1.0);
        assert_eq!(entry.selection_fade(), 1.0);

        entry.update(false, 10.0);
        assert_eq!(entry.selection_fade(), 0.0);
    }

    #[test]
    fn default_layout() {
        let layout = MenuLayout::default();
        assert_eq!(layout.title_y, 80.0);
        assert_eq!(layout.entries_y, 175.0);
        assert_eq!(layout.entry_spacing, 0.0);
        assert_eq!(layout.title_scale, 1.25);
    }

    //--- Navigation -------------------------------------------------------

    #[test]
    fn navigation_wraps_both_ways() {
        let mut menu = MenuScreen::new("Menu").entry("a").entry("b").entry("c");

        menu.select_previous();
        assert_eq!(menu.selected(), 2);
        menu.select_next();
        assert_eq!(menu.selected(), 0);
        menu.select_next();
        assert_eq!(menu.selected(), 1);
    }

    #[test]
    fn empty_menu_navigation_is_noop() {
        let mut menu = MenuScreen::new("Empty");
        menu.select_previous();
        menu.select_next();
        assert_eq!(menu.selected(), 0);
    }

    #[test]
    fn select_reaches_controller_and_subscribers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut menu = MenuScreen::with_controller(
            "Menu",
            Recorder {
                seen: Rc::clone(&seen),
                keep_open: false,
            },
        )
        .entry("first")
        .entry("second");
        let events = menu.subscribe();

        let mut stack = ScreenStack::new();
        stack.push(menu, None).unwrap();
        settle(&mut stack);

        press(&mut stack, KeyCode::ArrowDown);
        press(&mut stack, KeyCode::Enter);

        let expected = MenuEvent {
            kind: MenuEventKind::Selected,
            entry: Some(1),
            actor: ActorId::PRIMARY,
        };
        assert_eq!(*seen.borrow(), vec![expected]);
        assert_eq!(events.try_recv().unwrap(), expected);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn left_and_right_report_reverse_and_forward() {
        let mut menu = MenuScreen::new("Options").entry("Volume");
        let events = menu.subscribe();

        let mut stack = ScreenStack::new();
        stack.push(menu, None).unwrap();
        settle(&mut stack);

        press(&mut stack, KeyCode::ArrowLeft);
        press(&mut stack, KeyCode::ArrowRight);

        let kinds: Vec<_> = events.try_iter().map(|event| event.kind).collect();
        assert_eq!(kinds, vec![MenuEventKind::ReverseSelected, MenuEventKind::ForwardSelected]);
    }

    #[test]
    fn default_cancel_exits_menu() {
        let mut menu = MenuScreen::new("Menu").entry("a");
        let events = menu.subscribe();

        let mut stack = ScreenStack::new();
        let id = stack.push(menu, None).unwrap();
        settle(&mut stack);

        press(&mut stack, KeyCode::Escape);
        assert!(stack.screen(id).unwrap().is_exiting);
        assert_eq!(events.try_recv().unwrap().kind, MenuEventKind::Cancelled);

        settle(&mut stack);
        assert!(!stack.contains(id));
        assert!(events.recv().is_err(), "receiver disconnects when the menu is dropped");
    }

    #[test]
    fn overridden_cancel_keeps_menu_open() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let menu = MenuScreen::with_controller(
            "Menu",
            Recorder {
                seen: Rc::clone(&seen),
                keep_open: true,
            },
        );

        let mut stack = ScreenStack::new();
        let id: ScreenId = stack.push(menu, None).unwrap();
        settle(&mut stack);

        press(&mut stack, KeyCode::Escape);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(stack.screen(id).unwrap().state, TransitionState::Active);
    }

    #[test]
    fn controlling_actor_filters_other_actors() {
        let mut menu = MenuScreen::new("Menu").entry("a");
        let events = menu.subscribe();

        let mut stack = ScreenStack::new();
        stack.push(menu, Some(ActorId::new(1))).unwrap();
        settle(&mut stack);

        press(&mut stack, KeyCode::Enter);
        assert!(events.try_recv().is_err());
    }

    //--- Draw -------------------------------------------------------------

    #[test]
    fn active_menu_draws_centered_entries_and_title() {
        let mut stack = ScreenStack::new();
        stack
            .push(MenuScreen::new("Title").entry("Play").entry("Quit"), None)
            .unwrap();
        settle(&mut stack);

        let mut buffer = CommandBuffer::new(800.0, 600.0);
        stack.draw(&frame(), &mut buffer);
        let drawn = texts(&buffer);

        assert_eq!(drawn.len(), 3);
        assert_eq!(drawn[0].0, "Play");
        assert_eq!(drawn[0].1, (400.0 - 24.0, 175.0));
        assert_eq!(drawn[0].2.color, Color::YELLOW);
        assert_eq!(drawn[1].0, "Quit");
        assert_eq!(drawn[1].1, (400.0 - 24.0, 199.0));
        assert_eq!(drawn[1].2.color, Color::WHITE);
        assert_eq!(drawn[1].2.scale, 1.0);

        assert_eq!(drawn[2].0, "Title");
        assert_eq!(drawn[2].1, (400.0, 80.0));
        assert_eq!(drawn[2].2.color, Color::SILVER);
        assert_eq!(drawn[2].2.scale, 1.25);
        assert_eq!(drawn[2].2.origin, (30.0, 12.0));
    }

    #[test]
    fn entering_menu_slides_in_from_the_left() {
        let mut stack = ScreenStack::new();
        stack.push(MenuScreen::new("").entry("Go"), None).unwrap();

        // Half-way: position 0.5 → offset 0.25.
        stack
            .update(&FrameTime::from_elapsed(Duration::from_millis(250)), true)
            .unwrap();

        let mut buffer = CommandBuffer::new(800.0, 600.0);
        stack.draw(&frame(), &mut buffer);
        let drawn = texts(&buffer);

        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].1 .0, 400.0 - 12.0 - 0.25 * ENTER_SLIDE);
        assert_eq!(drawn[0].2.color, Color::YELLOW.scaled(0.5));
    }
}
