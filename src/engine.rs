//=========================================================================
// Aetheric Screens Engine
//
// Main entry point: builds a window, seeds the screen stack and drives it.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Event Loop]
//         │                          │
//         ├─ with_title()            ├─ init(|stack| ...)
//         ├─ with_window_size()      ├─ with_presenter(|commands| ...)
//         ├─ with_channel_capacity() └─ blocks until exit
//         ├─ with_max_frame_time()
//         └─ with_trace()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::info;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputState;
use crate::core::render::DrawCommand;
use crate::core::screen::ScreenStack;
use crate::core::ScreenError;
use crate::platform::{Platform, PlatformConfig};

//=== Presenter ===========================================================

/// Consumer of each frame's recorded draw commands (the actual renderer).
pub type Presenter = Box<dyn FnMut(&[DrawCommand])>;

//=== EngineError =========================================================

/// Failures that stop [`Engine::run`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    /// A screen failed while the loop was running.
    #[error(transparent)]
    Screen(#[from] ScreenError),
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Title**: "Aetheric Screens"
/// - **Window size**: 800x600
/// - **Channel capacity**: 128 input events
/// - **Max frame time**: 250 ms
/// - **Trace**: off
///
/// # Examples
///
/// ```no_run
/// use aetheric_screens::prelude::*;
///
/// EngineBuilder::new()
///     .with_title("Showcase")
///     .with_channel_capacity(256)
///     .build()
///     .init(|stack| {
///         stack.push(BackgroundScreen::new("backgrounds/title"), None)?;
///         stack.push(MenuScreen::new("Main Menu").entry("Play"), None)?;
///         Ok(())
///     })?
///     .run()?;
/// # Ok::<(), EngineError>(())
/// ```
pub struct EngineBuilder {
    title: String,
    width: u32,
    height: u32,
    channel_capacity: usize,
    max_frame_time: Duration,
    trace: bool,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Aetheric Screens".to_owned(),
            width: 800,
            height: 600,
            channel_capacity: 128,
            max_frame_time: Duration::from_millis(250),
            trace: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial logical window size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the input channel capacity (platform → screen stack).
    ///
    /// Events beyond capacity between two frames are dropped with a
    /// warning.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Caps the elapsed time reported for a single frame.
    ///
    /// Default: 250 ms
    ///
    /// # Panics
    ///
    /// Panics if `max_frame_time` is zero.
    pub fn with_max_frame_time(mut self, max_frame_time: Duration) -> Self {
        assert!(!max_frame_time.is_zero(), "Max frame time must be positive");
        self.max_frame_time = max_frame_time;
        self
    }

    /// Logs the screen list every update.
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Builds the engine with an empty, uninitialized screen stack.
    pub fn build(self) -> Engine {
        info!(
            "Building engine ({}x{}, channel: {}, max frame: {:?})",
            self.width, self.height, self.channel_capacity, self.max_frame_time
        );

        let mut stack = ScreenStack::with_input(InputState::with_capacity(self.channel_capacity));
        stack.set_trace(self.trace);

        Engine {
            stack,
            presenter: None,
            config: PlatformConfig {
                title: self.title,
                width: self.width,
                height: self.height,
                max_frame_time: self.max_frame_time,
            },
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Aetheric Screens runtime.
///
/// Owns the screen stack until [`Engine::run`] hands it to the platform.
pub struct Engine {
    stack: ScreenStack,
    presenter: Option<Presenter>,
    config: PlatformConfig,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Seeds the stack before the loop starts.
    ///
    /// Screens added here load their content when the window is created.
    pub fn init<F>(mut self, init_fn: F) -> Result<Self, EngineError>
    where
        F: FnOnce(&mut ScreenStack) -> Result<(), ScreenError>,
    {
        info!("Initializing screen stack");
        init_fn(&mut self.stack)?;
        info!("Screen stack seeded with {} screens", self.stack.len());
        Ok(self)
    }

    /// Installs the consumer of each frame's draw commands.
    pub fn with_presenter<F>(mut self, presenter: F) -> Self
    where
        F: FnMut(&[DrawCommand]) + 'static,
    {
        self.presenter = Some(Box::new(presenter));
        self
    }

    pub fn stack(&self) -> &ScreenStack {
        &self.stack
    }

    //--- Execution --------------------------------------------------------

    /// Starts the event loop and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the window and initializes the stack (loads content)
    /// 2. Runs one update + draw per redraw
    /// 3. On close or `HostSignal::Exit`: unloads every screen and returns
    ///
    /// # Errors
    ///
    /// Returns the first event-loop, window or screen error.
    pub fn run(self) -> Result<(), EngineError> {
        info!("Starting engine runtime ({})", self.config.title);

        let platform = Platform::new(self.config, self.stack, self.presenter);
        let result = platform.run();

        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
