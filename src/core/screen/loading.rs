//=========================================================================
// Loading Screen
//=========================================================================
//
// Replaces the whole screen set without tearing down screens that are
// still mid-transition.
//
// Sequence:
//   load()        → exit every current screen → add LoadingScreen on top
//   update() #k   → the last previous screen finishes exiting and leaves
//   draw()   #k   → LoadingScreen is Active and alone → mark ready
//   update() #k+1 → remove self → add pending screens → ResetElapsedTime
//
// Readiness is decided in draw, after the whole update pass, so the
// loading frame is shown once and the swap follows on the next update.
//
// If an old screen never finishes exiting the loading screen waits
// forever; nothing here times out.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::context::{DrawContext, ScreenContext, StackControl};
use super::transition::TransitionState;
use super::{Screen, ScreenId, ScreenSettings};
use crate::core::error::ScreenError;
use crate::core::input::ActorId;
use crate::core::render::{Color, TextStyle};
use crate::core::time::FrameTime;

//=== Constants ===========================================================

const LOADING_MESSAGE: &str = "Loading...";

//=== LoadOptions =========================================================

/// How the loading screen presents itself while it waits.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Shows a centered "Loading..." message. Leave off for fast loads so
    /// nothing flickers.
    pub loading_is_slow: bool,

    /// Image drawn full-viewport behind the message. An empty name draws
    /// nothing.
    pub background: Option<String>,

    /// Fade-in time of the loading screen.
    pub transition_on: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            loading_is_slow: false,
            background: None,
            transition_on: Duration::from_millis(500),
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slow(mut self) -> Self {
        self.loading_is_slow = true;
        self
    }

    /// Sets the backdrop image; an empty name clears it.
    pub fn with_background(mut self, image: impl Into<String>) -> Self {
        let image = image.into();
        self.background = (!image.is_empty()).then_some(image);
        self
    }

    pub fn with_transition_on(mut self, duration: Duration) -> Self {
        self.transition_on = duration;
        self
    }
}

//=== LoadingScreen =======================================================

/// Coordinator screen that swaps in a new batch of screens once every old
/// one is gone.
///
/// Only reachable through [`LoadingScreen::load`] and
/// [`LoadingScreen::queue`].
pub struct LoadingScreen {
    options: LoadOptions,
    pending: Vec<Box<dyn Screen>>,
    others_gone: bool,
}

impl LoadingScreen {
    /// Exits every screen currently in `control`, then pushes a loading
    /// screen that will add `screens` (bottom to top) for `actor` once the
    /// stack has drained.
    ///
    /// Works from the host (`ScreenStack`) and from inside a screen hook
    /// (`ScreenContext`). From the host, an initialized stack loads the
    /// loading screen's content at once and may fail.
    pub fn load<C>(
        control: &mut C,
        options: LoadOptions,
        actor: Option<ActorId>,
        screens: Vec<Box<dyn Screen>>,
    ) -> Result<ScreenId, ScreenError>
    where
        C: StackControl + ?Sized,
    {
        let loading = Self::exit_all(control, options, screens);
        control.add_screen(Box::new(loading), actor)
    }

    /// [`load`](Self::load) from inside a screen hook.
    ///
    /// Everything is queued on the context, so nothing can fail here;
    /// content errors surface from `ScreenStack::update`.
    pub fn queue(
        ctx: &mut ScreenContext<'_>,
        options: LoadOptions,
        actor: Option<ActorId>,
        screens: Vec<Box<dyn Screen>>,
    ) -> ScreenId {
        let loading = Self::exit_all(ctx, options, screens);
        ctx.add_screen(Box::new(loading), actor)
    }

    fn exit_all<C>(control: &mut C, options: LoadOptions, screens: Vec<Box<dyn Screen>>) -> Self
    where
        C: StackControl + ?Sized,
    {
        let previous = control.screen_ids();
        for &id in &previous {
            control.exit_screen(id);
        }

        info!(
            "Loading {} screens after {} exit",
            screens.len(),
            previous.len()
        );

        Self {
            options,
            pending: screens,
            others_gone: false,
        }
    }

    fn swap_in(&mut self, ctx: &mut ScreenContext<'_>) {
        let me = ctx.id();
        ctx.remove_screen(me);

        let actor = ctx.controlling_actor();
        let count = self.pending.len();
        for screen in std::mem::take(&mut self.pending) {
            ctx.add_screen(screen, actor);
        }

        ctx.reset_elapsed_time();
        info!("Loading finished, {} screens added", count);
    }
}

impl Screen for LoadingScreen {
    fn settings(&self) -> ScreenSettings {
        ScreenSettings::new().with_transition_on(self.options.transition_on)
    }

    fn name(&self) -> &'static str {
        "LoadingScreen"
    }

    fn update(&mut self, _frame: &FrameTime, ctx: &mut ScreenContext<'_>) {
        if self.others_gone {
            self.swap_in(ctx);
        }
    }

    fn draw(&mut self, _frame: &FrameTime, ctx: &mut DrawContext<'_>) {
        if !self.others_gone
            && ctx.transition().state() == TransitionState::Active
            && ctx.screens() == [ctx.id()]
        {
            debug!("Previous screens gone, loading on next update");
            self.others_gone = true;
        }

        let alpha = ctx.alpha();
        let viewport = ctx.viewport();

        if let Some(background) = self.options.background.as_deref().filter(|name| !name.is_empty()) {
            ctx.canvas().draw_image(background, viewport, Color::gray(alpha));
        }

        if self.options.loading_is_slow {
            let canvas = ctx.canvas();
            let (width, height) = canvas.measure_text(LOADING_MESSAGE);
            let position = (
                viewport.x + (viewport.width - width) / 2.0,
                viewport.y + (viewport.height - height) / 2.0,
            );
            canvas.draw_text(LOADING_MESSAGE, position, TextStyle::new(Color::WHITE.scaled(alpha)));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{CommandBuffer, DrawCommand, Rect};
    use crate::core::screen::{HostSignal, ScreenStack};

    struct Plain(&'static str);

    impl Screen for Plain {
        fn name(&self) -> &'static str {
            self.0
        }

        fn draw(&mut self, _frame: &FrameTime, _ctx: &mut DrawContext<'_>) {}
    }

    /// Leaves over 200 ms.
    struct Lingering;

    impl Screen for Lingering {
        fn settings(&self) -> ScreenSettings {
            ScreenSettings::new().with_transition_off(Duration::from_millis(200))
        }

        fn name(&self) -> &'static str {
            "lingering"
        }

        fn draw(&mut self, _frame: &FrameTime, _ctx: &mut DrawContext<'_>) {}
    }

    fn frame() -> FrameTime {
        FrameTime::from_elapsed(Duration::from_millis(100))
    }

    fn names(stack: &ScreenStack) -> Vec<&'static str> {
        stack.screens().iter().map(|info| info.name).collect()
    }

    /// One host frame: update, then draw.
    fn run_frame(stack: &mut ScreenStack, frame: &FrameTime) {
        stack.update(frame, true).unwrap();
        stack.draw(frame, &mut CommandBuffer::new(800.0, 600.0));
    }

    #[test]
    fn default_options() {
        let options = LoadOptions::default();
        assert!(!options.loading_is_slow);
        assert_eq!(options.background, None);
        assert_eq!(options.transition_on, Duration::from_millis(500));
    }

    #[test]
    fn load_exits_everything_and_pushes_itself() {
        let mut stack = ScreenStack::new();
        let old = stack
            .add_screen(Box::new(Plain("old")), None)
            .unwrap();

        let loading = LoadingScreen::load(
            &mut stack,
            LoadOptions::new(),
            Some(ActorId::PRIMARY),
            vec![Box::new(Plain("next"))],
        )
        .unwrap();

        // Zero exit time: the old screen is gone at once.
        assert!(!stack.contains(old));
        let info = stack.screen(loading).unwrap();
        assert_eq!(info.name, "LoadingScreen");
        assert!(!info.is_popup);
        assert_eq!(info.controlling_actor, Some(ActorId::PRIMARY));
    }

    #[test]
    fn swaps_one_update_after_becoming_sole_and_active() {
        let mut stack = ScreenStack::new();
        LoadingScreen::load(
            &mut stack,
            LoadOptions::new().with_transition_on(Duration::ZERO),
            None,
            vec![Box::new(Plain("first")), Box::new(Plain("second"))],
        )
        .unwrap();

        run_frame(&mut stack, &frame());
        assert_eq!(names(&stack), vec!["LoadingScreen"]);
        assert!(stack.take_signals().is_empty());

        run_frame(&mut stack, &frame());
        assert_eq!(names(&stack), vec!["first", "second"]);
        assert_eq!(stack.take_signals(), vec![HostSignal::ResetElapsedTime]);
    }

    #[test]
    fn swaps_on_the_update_after_the_last_screen_leaves() {
        let mut stack = ScreenStack::new();
        stack.push(Lingering, None).unwrap();
        LoadingScreen::load(
            &mut stack,
            LoadOptions::new().with_transition_on(Duration::ZERO),
            None,
            vec![Box::new(Plain("next"))],
        )
        .unwrap();

        run_frame(&mut stack, &frame());
        assert_eq!(names(&stack), vec!["lingering", "LoadingScreen"]);

        // The old screen finishes its 200 ms exit and leaves.
        run_frame(&mut stack, &frame());
        assert_eq!(names(&stack), vec!["LoadingScreen"]);
        assert!(stack.take_signals().is_empty());

        run_frame(&mut stack, &frame());
        assert_eq!(names(&stack), vec!["next"]);
        assert_eq!(stack.take_signals(), vec![HostSignal::ResetElapsedTime]);
    }

    #[test]
    fn waits_for_a_draw_before_swapping() {
        let mut stack = ScreenStack::new();
        LoadingScreen::load(
            &mut stack,
            LoadOptions::new().with_transition_on(Duration::ZERO),
            None,
            vec![Box::new(Plain("next"))],
        )
        .unwrap();

        for _ in 0..3 {
            stack.update(&frame(), true).unwrap();
        }
        assert_eq!(names(&stack), vec!["LoadingScreen"]);

        run_frame(&mut stack, &frame());
        run_frame(&mut stack, &frame());
        assert_eq!(names(&stack), vec!["next"]);
    }

    #[test]
    fn waits_while_entering() {
        let mut stack = ScreenStack::new();
        LoadingScreen::load(&mut stack, LoadOptions::new(), None, vec![Box::new(Plain("next"))]).unwrap();
        let step = FrameTime::from_elapsed(Duration::from_millis(250));

        // Half-way in, then fully in and alone.
        for _ in 0..2 {
            run_frame(&mut stack, &step);
            assert_eq!(names(&stack), vec!["LoadingScreen"]);
        }
        run_frame(&mut stack, &step);
        assert_eq!(names(&stack), vec!["next"]);
    }

    #[test]
    fn empty_background_name_means_no_background() {
        assert_eq!(LoadOptions::new().with_background("").background, None);

        let mut stack = ScreenStack::new();
        stack.initialize().unwrap();
        let options = LoadOptions {
            background: Some(String::new()),
            transition_on: Duration::ZERO,
            ..LoadOptions::default()
        };
        LoadingScreen::load(&mut stack, options, None, Vec::new()).unwrap();
        stack.update(&frame(), true).unwrap();

        let mut buffer = CommandBuffer::new(800.0, 600.0);
        stack.draw(&frame(), &mut buffer);
        assert!(buffer.commands().is_empty());
    }

    #[test]
    fn queue_from_a_hook_swaps_with_the_hook_owner_actor() {
        struct Trigger {
            fired: bool,
        }

        impl Screen for Trigger {
            fn update(&mut self, _frame: &FrameTime, ctx: &mut ScreenContext<'_>) {
                if !self.fired {
                    self.fired = true;
                    let actor = ctx.controlling_actor();
                    LoadingScreen::queue(
                        ctx,
                        LoadOptions::new().with_transition_on(Duration::ZERO),
                        actor,
                        vec![Box::new(Plain("next"))],
                    );
                }
            }

            fn draw(&mut self, _frame: &FrameTime, _ctx: &mut DrawContext<'_>) {}
        }

        let mut stack = ScreenStack::new();
        stack.push(Trigger { fired: false }, Some(ActorId::PRIMARY)).unwrap();

        // Zero exit time: the trigger leaves as soon as its hook returns.
        run_frame(&mut stack, &frame());
        assert_eq!(names(&stack), vec!["LoadingScreen"]);

        run_frame(&mut stack, &frame());
        run_frame(&mut stack, &frame());
        let screens = stack.screens();
        assert_eq!(screens.len(), 1);
        assert_eq!(screens[0].name, "next");
        assert_eq!(screens[0].controlling_actor, Some(ActorId::PRIMARY));
    }

    #[test]
    fn slow_load_draws_background_and_centered_message() {
        let mut stack = ScreenStack::new();
        LoadingScreen::load(
            &mut stack,
            LoadOptions::new()
                .slow()
                .with_background("backgrounds/loading")
                .with_transition_on(Duration::ZERO),
            None,
            Vec::new(),
        )
        .unwrap();
        stack.update(&frame(), true).unwrap();

        let mut buffer = CommandBuffer::new(800.0, 600.0);
        stack.draw(&frame(), &mut buffer);

        let commands = buffer.commands();
        assert_eq!(
            commands[0],
            DrawCommand::Image {
                image: "backgrounds/loading".into(),
                rect: Rect::new(0.0, 0.0, 800.0, 600.0),
                color: Color::gray(1.0),
            }
        );
        match &commands[1] {
            DrawCommand::Text { text, position, .. } => {
                assert_eq!(text, LOADING_MESSAGE);
                // 10 glyphs * 12 px wide, one 24 px line.
                assert_eq!(*position, ((800.0 - 120.0) / 2.0, (600.0 - 24.0) / 2.0));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn fast_load_without_background_draws_nothing() {
        let mut stack = ScreenStack::new();
        LoadingScreen::load(&mut stack, LoadOptions::new(), None, Vec::new()).unwrap();
        stack.update(&frame(), true).unwrap();

        let mut buffer = CommandBuffer::new(800.0, 600.0);
        stack.draw(&frame(), &mut buffer);
        assert!(buffer.commands().is_empty());
    }
}
