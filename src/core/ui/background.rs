//=========================================================================
// Background Screen
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::error::ScreenError;
use crate::core::render::Color;
use crate::core::screen::{DrawContext, Screen, ScreenSettings};
use crate::core::time::FrameTime;

//=== BackgroundScreen ====================================================

/// Full-viewport image that stays visible beneath every menu.
///
/// Its transition ignores covering, so it only fades out when exited.
pub struct BackgroundScreen {
    image: String,
}

impl BackgroundScreen {
    pub fn new(image: impl Into<String>) -> Self {
        Self { image: image.into() }
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

impl Screen for BackgroundScreen {
    fn settings(&self) -> ScreenSettings {
        ScreenSettings::new()
            .with_transitions(Duration::from_millis(500))
            .ignoring_covering()
    }

    fn name(&self) -> &'static str {
        "BackgroundScreen"
    }

    fn load_content(&mut self) -> Result<(), ScreenError> {
        if self.image.is_empty() {
            return Err(ScreenError::content(self.name(), "background image name is empty"));
        }
        Ok(())
    }

    fn draw(&mut self, _frame: &FrameTime, ctx: &mut DrawContext<'_>) {
        let alpha = ctx.alpha();
        let viewport = ctx.viewport();
        ctx.canvas().draw_image(&self.image, viewport, Color::gray(alpha));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{CommandBuffer, DrawCommand, Rect};
    use crate::core::screen::{ScreenStack, TransitionState};
    use crate::core::ui::MenuScreen;

    #[test]
    fn stays_visible_under_an_opaque_menu() {
        let mut stack = ScreenStack::new();
        let background = stack.push(BackgroundScreen::new("backgrounds/title"), None).unwrap();
        stack.push(MenuScreen::new("Main"), None).unwrap();

        let frame = FrameTime::from_elapsed(Duration::from_millis(250));
        for _ in 0..3 {
            stack.update(&frame, true).unwrap();
        }
        assert_eq!(stack.screen(background).unwrap().state, TransitionState::Active);

        let mut buffer = CommandBuffer::new(640.0, 480.0);
        stack.draw(&frame, &mut buffer);
        assert_eq!(
            buffer.commands()[0],
            DrawCommand::Image {
                image: "backgrounds/title".into(),
                rect: Rect::new(0.0, 0.0, 640.0, 480.0),
                color: Color::gray(1.0),
            }
        );
    }

    #[test]
    fn empty_image_name_fails_to_load() {
        let mut stack = ScreenStack::new();
        stack.initialize().unwrap();
        assert!(stack.push(BackgroundScreen::new(""), None).is_err());
    }
}
