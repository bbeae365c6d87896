//=========================================================================
// Screen Flow Integration Tests
//=========================================================================
//
// Multi-frame scenarios driven through the public API only: a host loop
// stand-in feeds frame times and input, then inspects the stack.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use aetheric_screens::prelude::*;

//=== Harness =============================================================

/// Minimal host: fixed 100 ms frames, always focused, records signals.
struct Host {
    stack: ScreenStack,
    frame: FrameTime,
    signals: Vec<HostSignal>,
    canvas: CommandBuffer,
}

impl Host {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut stack = ScreenStack::new();
        stack.set_trace(true);
        stack.initialize().unwrap();

        Self {
            stack,
            frame: FrameTime::default(),
            signals: Vec::new(),
            canvas: CommandBuffer::new(800.0, 600.0),
        }
    }

    fn tick(&mut self) {
        self.frame = self.frame.advance(Duration::from_millis(100));
        self.stack.update(&self.frame, true).unwrap();
        self.signals.extend(self.stack.take_signals());

        self.canvas.clear();
        self.stack.draw(&self.frame, &mut self.canvas);
    }

    fn ticks(&mut self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }

    fn tap(&mut self, key: KeyCode) {
        let sender = self.stack.input_sender();
        sender.send(InputEvent::KeyDown { actor: ActorId::PRIMARY, key }).unwrap();
        self.tick();
        sender.send(InputEvent::KeyUp { actor: ActorId::PRIMARY, key }).unwrap();
        self.tick();
    }

    fn names(&self) -> Vec<&'static str> {
        self.stack.screens().iter().map(|info| info.name).collect()
    }
}

//=== Recording Screen ====================================================

type Journal = Rc<RefCell<Vec<String>>>;

struct Recorder {
    label: &'static str,
    journal: Journal,
}

impl Recorder {
    fn boxed(label: &'static str, journal: &Journal) -> Box<dyn Screen> {
        Box::new(Self {
            label,
            journal: Rc::clone(journal),
        })
    }
}

impl Screen for Recorder {
    fn name(&self) -> &'static str {
        self.label
    }

    fn load_content(&mut self) -> Result<(), ScreenError> {
        self.journal.borrow_mut().push(format!("load {}", self.label));
        Ok(())
    }

    fn unload_content(&mut self) {
        self.journal.borrow_mut().push(format!("unload {}", self.label));
    }

    fn draw(&mut self, _frame: &FrameTime, _ctx: &mut DrawContext<'_>) {}
}

//=== Load Coordination ===================================================

#[test]
fn load_replaces_menu_after_it_finishes_exiting() {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut host = Host::new();
    let menu = host.stack.push(MenuScreen::new("Main").entry("Play"), None).unwrap();
    host.ticks(6);

    LoadingScreen::load(
        &mut host.stack,
        LoadOptions::new().with_transition_on(Duration::ZERO),
        None,
        vec![Recorder::boxed("new", &journal)],
    )
    .unwrap();

    // The menu transitions off over 0.5 s while the loader waits on top.
    host.tick();
    assert_eq!(host.stack.screen(menu).unwrap().state, TransitionState::Exiting);
    assert_eq!(host.names(), vec!["MenuScreen", "LoadingScreen"]);

    let mut frames = 1;
    while host.stack.contains(menu) {
        host.tick();
        frames += 1;
        assert!(frames < 20, "menu never finished exiting");
    }
    assert!(host.signals.is_empty());

    // Drawn alone once; the very next update swaps in the new screen.
    assert_eq!(host.names(), vec!["LoadingScreen"]);
    assert!(journal.borrow().is_empty());

    host.tick();
    assert_eq!(host.names(), vec!["new"]);
    assert_eq!(host.signals, vec![HostSignal::ResetElapsedTime]);
    assert_eq!(*journal.borrow(), vec!["load new".to_owned()]);

    host.ticks(5);
    assert_eq!(host.signals.len(), 1, "exactly one reset signal");
}

#[test]
fn load_from_inside_a_menu_controller() {
    struct Launch {
        journal: Journal,
    }

    impl MenuController for Launch {
        fn on_entry(&mut self, event: MenuEvent, _entries: &mut [MenuEntry], ctx: &mut ScreenContext<'_>) {
            LoadingScreen::queue(
                ctx,
                LoadOptions::new().slow(),
                Some(event.actor),
                vec![
                    Recorder::boxed("level", &self.journal),
                    Recorder::boxed("hud", &self.journal),
                ],
            );
        }
    }

    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut host = Host::new();
    host.stack.push(BackgroundScreen::new("backgrounds/title"), None).unwrap();
    host.stack
        .push(
            MenuScreen::with_controller(
                "Scenarios",
                Launch {
                    journal: Rc::clone(&journal),
                },
            )
            .entry("Level 1"),
            None,
        )
        .unwrap();
    host.ticks(6);

    host.tap(KeyCode::Enter);
    host.ticks(15);

    assert_eq!(host.names(), vec!["level", "hud"]);
    assert_eq!(host.signals, vec![HostSignal::ResetElapsedTime]);
    assert!(host
        .stack
        .screens()
        .iter()
        .all(|info| info.controlling_actor == Some(ActorId::PRIMARY)));
}

//=== Menus & Popups ======================================================

#[test]
fn popup_over_menu_keeps_menu_drawn_but_takes_input() {
    let mut host = Host::new();
    let mut menu = MenuScreen::new("Main").entry("Quit");
    let menu_events = menu.subscribe();
    host.stack.push(menu, None).unwrap();
    host.ticks(6);

    let mut popup = MessageBoxScreen::new("Really quit?").on_accept(|_, ctx| ctx.request_exit());
    let popup_events = popup.subscribe();
    host.stack.push(popup, None).unwrap();
    host.ticks(3);

    // Menu text and popup text are both drawn, menu first.
    let texts: Vec<String> = host
        .canvas
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(texts.first().map(String::as_str), Some("Quit"));
    assert_eq!(texts.last().map(String::as_str), Some("Really quit?\nEnter = yes\nEsc = cancel"));

    host.tap(KeyCode::Enter);

    assert!(menu_events.try_recv().is_err(), "menu must not see input under a popup");
    assert_eq!(popup_events.try_recv().unwrap(), MessageBoxEvent::Accepted(ActorId::PRIMARY));
    assert_eq!(host.signals, vec![HostSignal::Exit]);
}

#[test]
fn nested_menus_unwind_with_cancel() {
    struct Opener;

    impl MenuController for Opener {
        fn on_entry(&mut self, event: MenuEvent, _entries: &mut [MenuEntry], ctx: &mut ScreenContext<'_>) {
            let submenu = MenuScreen::new("Options").with_name("Submenu").entry("Back");
            ctx.add_screen(Box::new(submenu), Some(event.actor));
        }
    }

    let mut host = Host::new();
    let root = host
        .stack
        .push(MenuScreen::with_controller("Main", Opener).with_name("Root").entry("Options"), None)
        .unwrap();
    host.ticks(6);

    host.tap(KeyCode::Enter);
    host.ticks(10);
    assert_eq!(host.names(), vec!["Root", "Submenu"]);
    assert_eq!(host.stack.screen(root).unwrap().state, TransitionState::Hidden);

    host.tap(KeyCode::Escape);
    host.ticks(15);
    assert_eq!(host.names(), vec!["Root"]);
    assert_eq!(host.stack.screen(root).unwrap().state, TransitionState::Active);
}

//=== Lifecycle ===========================================================

#[test]
fn shutdown_unloads_everything_once() {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut host = Host::new();
    host.stack.add_screen(Recorder::boxed("a", &journal), None).unwrap();
    host.stack.add_screen(Recorder::boxed("b", &journal), None).unwrap();
    host.ticks(2);

    host.stack.shutdown();
    host.stack.shutdown();

    assert_eq!(
        *journal.borrow(),
        vec!["load a", "load b", "unload a", "unload b"]
    );
    assert_eq!(host.stack.len(), 2);
}
