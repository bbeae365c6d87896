//=========================================================================
// Canvas
//=========================================================================
//
// Drawing surface lent to screens for the duration of a Draw call.
//
// The screen system never owns a renderer: the host passes a `&mut dyn
// Canvas` into `ScreenStack::draw`, which forwards it to each visible
// screen bottom-to-top. Screens must not keep it past the call.
//
//=========================================================================

//=== Color ===============================================================

/// Premultiplied RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const SILVER: Self = Self::rgb(192.0 / 255.0, 192.0 / 255.0, 192.0 / 255.0);

    /// Opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Gray level used to tint images by a transition alpha.
    pub const fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }

    /// Scales every channel (alpha included) by `factor`.
    ///
    /// With premultiplied colors this is a fade: `Color::WHITE.scaled(0.5)`
    /// is half-transparent white.
    pub fn scaled(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a * factor,
        }
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle in pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of `size` centered inside `self`.
    pub fn centered(&self, size: (f32, f32)) -> Self {
        Self::new(
            self.x + (self.width - size.0) / 2.0,
            self.y + (self.height - size.1) / 2.0,
            size.0,
            size.1,
        )
    }

    /// Grows the rectangle by `horizontal`/`vertical` on every side.
    pub fn padded(&self, horizontal: f32, vertical: f32) -> Self {
        Self::new(
            self.x - horizontal,
            self.y - vertical,
            self.width + horizontal * 2.0,
            self.height + vertical * 2.0,
        )
    }
}

//=== TextStyle ===========================================================

/// How a string is placed and tinted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub scale: f32,
    /// Offset subtracted from the position before scaling (pivot point).
    pub origin: (f32, f32),
}

impl TextStyle {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            scale: 1.0,
            origin: (0.0, 0.0),
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_origin(mut self, origin: (f32, f32)) -> Self {
        self.origin = origin;
        self
    }
}

//=== Canvas Trait ========================================================

/// Minimal 2D drawing surface.
///
/// Renderers implement this over their sprite batch / font / blank
/// texture; [`super::CommandBuffer`] records calls for deferred
/// presentation and tests.
pub trait Canvas {
    /// Full drawable area.
    fn viewport(&self) -> Rect;

    /// Fills `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws a named image stretched over `rect`, tinted by `color`.
    fn draw_image(&mut self, image: &str, rect: Rect, color: Color);

    /// Draws `text` at `position`.
    fn draw_text(&mut self, text: &str, position: (f32, f32), style: TextStyle);

    /// Size of `text` at scale 1.
    fn measure_text(&self, text: &str) -> (f32, f32);

    /// Vertical advance of one line of text at scale 1.
    fn line_height(&self) -> f32;
}

//=========================================================================
// Unit Tests
//=========================================================================
