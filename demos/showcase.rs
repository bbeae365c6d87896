//=========================================================================
// Showcase
//=========================================================================
//
// Walks through every bundled screen:
//
//   Background + Main Menu
//     ├─ Scenarios → Scenario 1 ──(LoadingScreen)──► Gameplay
//     │                                                 └─ Esc → Pause Menu
//     │                                                           └─ Quit → confirm → back to menu
//     ├─ Options (edits GameOptions in place)
//     └─ Exit → confirm → HostSignal::Exit
//
// There is no renderer here: the presenter logs each frame's draw
// command count at trace level. Run with `RUST_LOG=debug` to follow the
// stack.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use aetheric_screens::prelude::*;
use log::trace;

//=== Game Options ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveFormat {
    Text,
    Binary,
    Compressed,
}

impl SaveFormat {
    fn next(self) -> Self {
        match self {
            Self::Text => Self::Binary,
            Self::Binary => Self::Compressed,
            Self::Compressed => Self::Text,
        }
    }

    fn previous(self) -> Self {
        self.next().next()
    }
}

const LANGUAGES: [&str; 3] = ["Rust", "Zig", "C++"];

#[derive(Debug)]
struct GameOptions {
    format: SaveFormat,
    language: usize,
    hard_mode: bool,
    lives: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            format: SaveFormat::Text,
            language: 0,
            hard_mode: false,
            lives: 23,
        }
    }
}

type SharedOptions = Rc<RefCell<GameOptions>>;

//=== Main Menu ===========================================================

struct MainMenu {
    options: SharedOptions,
}

impl MenuController for MainMenu {
    fn on_entry(&mut self, event: MenuEvent, _entries: &mut [MenuEntry], ctx: &mut ScreenContext<'_>) {
        if event.kind != MenuEventKind::Selected {
            return;
        }

        let screen: Box<dyn Screen> = match event.entry {
            Some(0) => Box::new(scenario_menu(&self.options)),
            Some(1) => Box::new(options_menu(&self.options)),
            Some(2) => Box::new(confirm_exit()),
            _ => return,
        };
        ctx.add_screen(screen, Some(event.actor));
    }

    fn on_cancel(&mut self, actor: ActorId, ctx: &mut ScreenContext<'_>) {
        ctx.add_screen(Box::new(confirm_exit()), Some(actor));
    }
}

fn main_menu(options: &SharedOptions) -> MenuScreen<MainMenu> {
    MenuScreen::with_controller(
        "Main Menu",
        MainMenu {
            options: Rc::clone(options),
        },
    )
    .with_name("MainMenu")
    .entry("Scenarios")
    .entry("Options")
    .entry("Exit")
}

fn title_screens(options: &SharedOptions) -> Vec<Box<dyn Screen>> {
    vec![
        Box::new(BackgroundScreen::new("backgrounds/title")),
        Box::new(main_menu(options)),
    ]
}

fn confirm_exit() -> MessageBoxScreen {
    MessageBoxScreen::new("Leave the showcase?").on_accept(|_, ctx| ctx.request_exit())
}

//=== Options Menu ========================================================

struct OptionsMenu {
    options: SharedOptions,
}

impl OptionsMenu {
    fn labels(options: &GameOptions) -> [String; 4] {
        [
            format!("Save format: {:?}", options.format),
            format!("Language: {}", LANGUAGES[options.language]),
            format!("Hard mode: {}", if options.hard_mode { "on" } else { "off" }),
            format!("Lives: {}", options.lives),
        ]
    }
}

impl MenuController for OptionsMenu {
    fn on_entry(&mut self, event: MenuEvent, entries: &mut [MenuEntry], _ctx: &mut ScreenContext<'_>) {
        let backwards = event.kind == MenuEventKind::ReverseSelected;
        let mut options = self.options.borrow_mut();

        match event.entry {
            Some(0) if backwards => options.format = options.format.previous(),
            Some(0) => options.format = options.format.next(),
            Some(1) if backwards => {
                options.language = (options.language + LANGUAGES.len() - 1) % LANGUAGES.len()
            }
            Some(1) => options.language = (options.language + 1) % LANGUAGES.len(),
            Some(2) => options.hard_mode = !options.hard_mode,
            Some(3) if backwards => options.lives = options.lives.saturating_sub(1).max(1),
            Some(3) => options.lives += 1,
            _ => return,
        }

        for (entry, label) in entries.iter_mut().zip(Self::labels(&options)) {
            entry.set_text(label);
        }
    }
}

fn options_menu(options: &SharedOptions) -> MenuScreen<OptionsMenu> {
    let labels = OptionsMenu::labels(&options.borrow());
    let mut menu = MenuScreen::with_controller(
        "Options",
        OptionsMenu {
            options: Rc::clone(options),
        },
    )
    .with_name("OptionsMenu");

    for label in labels {
        menu.add_entry(MenuEntry::new(label));
    }
    menu
}

//=== Scenario Menu =======================================================

struct ScenarioMenu {
    options: SharedOptions,
}

impl MenuController for ScenarioMenu {
    fn on_entry(&mut self, event: MenuEvent, _entries: &mut [MenuEntry], ctx: &mut ScreenContext<'_>) {
        if event.kind != MenuEventKind::Selected || event.entry != Some(0) {
            return;
        }

        let gameplay: Vec<Box<dyn Screen>> = vec![Box::new(Gameplay::new(&self.options))];
        LoadingScreen::queue(ctx, LoadOptions::new().slow(), Some(event.actor), gameplay);
    }
}

fn scenario_menu(options: &SharedOptions) -> MenuScreen<ScenarioMenu> {
    MenuScreen::with_controller(
        "Pick a Scenario",
        ScenarioMenu {
            options: Rc::clone(options),
        },
    )
    .with_name("ScenarioMenu")
    .entry("Scenario 1")
}

//=== Gameplay ============================================================

const GAMEPLAY_MESSAGE: &str = "Your gameplay goes here.";

struct Gameplay {
    options: SharedOptions,
    position: (f32, f32),
}

impl Gameplay {
    fn new(options: &SharedOptions) -> Self {
        Self {
            options: Rc::clone(options),
            position: (100.0, 100.0),
        }
    }
}

impl Screen for Gameplay {
    fn settings(&self) -> ScreenSettings {
        ScreenSettings::new()
            .with_transition_on(Duration::from_millis(1500))
            .with_transition_off(Duration::from_millis(500))
            .ignoring_covering()
    }

    fn name(&self) -> &'static str {
        "Gameplay"
    }

    fn handle_input(&mut self, input: &InputState, ctx: &mut ScreenContext<'_>) {
        if let Some(actor) = input.is_pause(ctx.controlling_actor()) {
            ctx.add_screen(Box::new(pause_menu(&self.options)), Some(actor));
        }
    }

    fn update(&mut self, frame: &FrameTime, ctx: &mut ScreenContext<'_>) {
        if !ctx.transition().is_active() {
            return;
        }

        let t = frame.total_secs();
        self.position.0 += 5.0 * (t * 7.3).sin() as f32;
        self.position.1 += 5.0 * (t * 5.1).cos() as f32;

        // Pull back toward the centre so the text never drifts away.
        self.position.0 += (300.0 - self.position.0) * 0.05;
        self.position.1 += (200.0 - self.position.1) * 0.05;
    }

    fn draw(&mut self, _frame: &FrameTime, ctx: &mut DrawContext<'_>) {
        let alpha = ctx.alpha();
        let lives = self.options.borrow().lives;
        let canvas = ctx.canvas();

        canvas.draw_text(GAMEPLAY_MESSAGE, self.position, TextStyle::new(Color::WHITE.scaled(alpha)));
        canvas.draw_text(&format!("Lives: {lives}"), (16.0, 16.0), TextStyle::new(Color::YELLOW.scaled(alpha)));
    }
}

//=== Pause Menu ==========================================================

struct PauseMenu {
    options: SharedOptions,
}

impl MenuController for PauseMenu {
    fn on_entry(&mut self, event: MenuEvent, _entries: &mut [MenuEntry], ctx: &mut ScreenContext<'_>) {
        if event.kind != MenuEventKind::Selected {
            return;
        }

        match event.entry {
            Some(0) => ctx.exit(),
            Some(1) => {
                let options = Rc::clone(&self.options);
                let confirm = MessageBoxScreen::new("Quit to the main menu?").on_accept(move |_, ctx| {
                    LoadingScreen::queue(ctx, LoadOptions::new(), None, title_screens(&options));
                });
                let actor = ctx.controlling_actor();
                ctx.add_screen(Box::new(confirm), actor);
            }
            _ => {}
        }
    }
}

fn pause_menu(options: &SharedOptions) -> MenuScreen<PauseMenu> {
    MenuScreen::with_controller(
        "Paused",
        PauseMenu {
            options: Rc::clone(options),
        },
    )
    .with_name("PauseMenu")
    .entry("Resume")
    .entry("Quit")
}

//=== Entry Point =========================================================

fn main() -> Result<(), EngineError> {
    env_logger::init();

    let options: SharedOptions = Rc::new(RefCell::new(GameOptions::default()));

    EngineBuilder::new()
        .with_title("Screen Stack Showcase")
        .with_trace(true)
        .build()
        .with_presenter(|commands| trace!("Presenting {} draw commands", commands.len()))
        .init(|stack| {
            for screen in title_screens(&options) {
                stack.add_screen(screen, None)?;
            }
            Ok(())
        })?
        .run()?;

    log::info!("Final options: {:?}", options.borrow());
    Ok(())
}
