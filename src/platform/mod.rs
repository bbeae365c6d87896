//=========================================================================
// Platform Subsystem
//
// Hosts the screen stack inside a Winit event loop.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────────────┐
//  │  Winit Event Loop                            │
//  │   ├─ KeyboardInput → InputProcessor ─┐       │
//  │   │                                  ↓       │
//  │   │               crossbeam Sender<InputEvent>
//  │   ├─ Focused(bool) → app_active       │      │
//  │   └─ RedrawRequested (frame boundary) ↓      │
//  │        FrameClock::tick                      │
//  │        ScreenStack::update (drains input)    │
//  │        take_signals → reset clock / exit     │
//  │        ScreenStack::draw → CommandBuffer     │
//  │        Presenter(&[DrawCommand])             │
//  └──────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: one update and one draw per
//   redraw, input queued between redraws is seen by that update
// - **First error wins**: a screen error stops the loop and is returned
//   from `Engine::run`
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod frame_clock;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
use crate::core::render::CommandBuffer;
use crate::core::screen::{HostSignal, ScreenStack};
use crate::core::time::FrameTime;
use crate::core::ScreenError;
use crate::engine::{EngineError, Presenter};
use frame_clock::FrameClock;
use input_processor::InputProcessor;

//=== PlatformConfig ======================================================

/// Window and pacing settings handed down from the engine builder.
#[derive(Debug, Clone)]
pub(crate) struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub max_frame_time: std::time::Duration,
}

//=== FrameOutcome ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameOutcome {
    Continue,
    Exit,
}

//=== Platform ============================================================

/// Window owner and frame driver for the screen stack.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config, stack, presenter)`
/// 2. **Execution**: `platform.run()` - blocks in the event loop
/// 3. **Startup**: `resumed()` creates the window and initializes the stack
/// 4. **Shutdown**: close, `HostSignal::Exit` or an error → `exiting()`
///    unloads every screen
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    config: PlatformConfig,

    stack: ScreenStack,
    canvas: CommandBuffer,
    clock: FrameClock,
    presenter: Option<Presenter>,

    /// Producer side of the stack's input channel.
    input_sender: Sender<InputEvent>,
    input_processor: InputProcessor,

    /// Window has OS focus.
    app_active: bool,

    /// First failure raised by the stack; returned from `run()`.
    error: Option<EngineError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(config: PlatformConfig, stack: ScreenStack, presenter: Option<Presenter>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            canvas: CommandBuffer::new(config.width as f32, config.height as f32),
            clock: FrameClock::new(config.max_frame_time),
            config,
            input_sender: stack.input_sender(),
            stack,
            presenter,
            input_processor: InputProcessor::new(),
            app_active: true,
            error: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or a screen asks to exit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the event loop cannot start, the window
    /// cannot be created, or a screen fails to load its content.
    pub fn run(mut self) -> Result<(), EngineError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(EngineError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(EngineError::EventLoopExecution)?;

        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Frame ------------------------------------------------------------

    /// One update + draw + present cycle.
    fn step(&mut self, frame: FrameTime) -> Result<FrameOutcome, ScreenError> {
        self.stack.update(&frame, self.app_active)?;

        let mut outcome = FrameOutcome::Continue;
        for signal in self.stack.take_signals() {
            match signal {
                HostSignal::ResetElapsedTime => {
                    debug!(target: "platform", "Elapsed time reset requested");
                    self.clock.reset();
                }
                HostSignal::Exit => {
                    info!(target: "platform", "Exit requested by a screen");
                    outcome = FrameOutcome::Exit;
                }
            }
        }

        self.canvas.clear();
        self.stack.draw(&frame, &mut self.canvas);

        if let Some(presenter) = self.presenter.as_mut() {
            presenter(self.canvas.commands());
        }

        Ok(outcome)
    }

    /// Queues a translated input event for the next update.
    fn forward_input(&mut self, event: InputEvent) {
        match self.input_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(target: "platform::input", "Input channel full, dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform::input", "Input channel disconnected");
            }
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        error!(target: "platform", "{}", err);
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window and initializes the stack on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.canvas.set_viewport(size.width as f32, size.height as f32);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                self.fail(event_loop, EngineError::WindowCreation(e));
                return;
            }
        }

        if let Err(e) = self.stack.initialize() {
            self.fail(event_loop, e.into());
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Focused(focused) => {
                debug!(target: "platform", "Window focus: {}", focused);
                self.app_active = *focused;
            }

            WindowEvent::Resized(size) => {
                self.canvas.set_viewport(size.width as f32, size.height as f32);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.forward_input(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::RedrawRequested => {
                let frame = self.clock.tick();
                match self.step(frame) {
                    Ok(FrameOutcome::Continue) => {}
                    Ok(FrameOutcome::Exit) => event_loop.exit(),
                    Err(e) => {
                        self.fail(event_loop, e.into());
                        return;
                    }
                }

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!(target: "platform", "Event loop exiting, unloading screens");
        self.stack.shutdown();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
