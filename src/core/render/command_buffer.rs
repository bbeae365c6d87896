//=========================================================================
// Command Buffer
//=========================================================================
//
// Canvas implementation that records draw calls for later presentation.
//
// The engine draws each frame into a CommandBuffer and hands the recorded
// commands to the application's presenter. Text metrics are fixed-width
// approximations; renderers with real fonts implement `Canvas` directly.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::canvas::{Canvas, Color, Rect, TextStyle};

//=== DrawCommand =========================================================

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    Image { image: String, rect: Rect, color: Color },
    Text { text: String, position: (f32, f32), style: TextStyle },
}

//=== CommandBuffer =======================================================

/// Recording canvas with fixed glyph metrics.
#[derive(Debug, Clone)]
pub struct CommandBuffer {
    viewport: Rect,
    glyph_width: f32,
    line_height: f32,
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    /// Default advance per character, in pixels.
    pub const DEFAULT_GLYPH_WIDTH: f32 = 12.0;

    /// Default line height, in pixels.
    pub const DEFAULT_LINE_HEIGHT: f32 = 24.0;

    /// Creates an empty buffer covering a `width` x `height` viewport.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, width, height),
            glyph_width: Self::DEFAULT_GLYPH_WIDTH,
            line_height: Self::DEFAULT_LINE_HEIGHT,
            commands: Vec::with_capacity(64),
        }
    }

    /// Overrides the fixed text metrics.
    pub fn with_metrics(mut self, glyph_width: f32, line_height: f32) -> Self {
        self.glyph_width = glyph_width;
        self.line_height = line_height;
        self
    }

    /// Updates the viewport (window resize).
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Rect::new(0.0, 0.0, width, height);
    }

    /// Recorded commands in submission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Clears recorded commands, preserving capacity.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Takes recorded commands, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for CommandBuffer {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_image(&mut self, image: &str, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Image {
            image: image.to_owned(),
            rect,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: (f32, f32), style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            style,
        });
    }

    fn measure_text(&self, text: &str) -> (f32, f32) {
        let lines = text.split('\n');
        let (mut widest, mut count) = (0usize, 0usize);
        for line in lines {
            widest = widest.max(line.chars().count());
            count += 1;
        }
        (widest as f32 * self.glyph_width, count as f32 * self.line_height)
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
