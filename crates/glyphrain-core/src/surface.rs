//! Drawing surface abstraction.

/// A colour with straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    /// Create a colour with an explicit alpha.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same colour with a different alpha, clamped to `[0, 1]`.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// A surface the rain animation paints onto, measured in virtual pixels.
pub trait Surface {
    /// Surface width.
    fn width(&self) -> f32;
    /// Surface height.
    fn height(&self) -> f32;
    /// Composite a translucent overlay across the whole surface.
    fn fade(&mut self, overlay: Rgba);
    /// Draw a glyph with its top-left corner at `(x, y)`.
    fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgba);
}
