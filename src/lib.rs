//=========================================================================
// Aetheric Screens: Library Root
//
// Screen-stack coordinator for frame-stepped interactive applications:
// menus, popups, loading transitions and gameplay views layered on one
// window.
//
// Responsibilities:
// - Expose the screen stack and the `Screen` trait (`core`)
// - Provide the Winit-hosted runtime (`Engine`, `EngineBuilder`)
// - Keep the platform glue (window, event loop) private
//
// Typical usage:
// ```no_run
// use aetheric_screens::prelude::*;
//
// fn main() -> Result<(), EngineError> {
//     EngineBuilder::new()
//         .build()
//         .init(|stack| {
//             stack.push(MenuScreen::new("Main Menu").entry("Exit"), None)?;
//             Ok(())
//         })?
//         .run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the screen stack, input snapshot, drawing contract and base
// screens. It can be driven without a window (tests, custom hosts).
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration (window, event loop, frame
// clock) and is not part of the public API surface.
//
// `engine` defines the builder and runtime entry point.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError, Presenter};
