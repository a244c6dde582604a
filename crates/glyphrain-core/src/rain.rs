//! Tunable settings for the rain animation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Symbols the rain picks glyphs from by default.
pub const DEFAULT_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789$#@%&*";

/// Rain animation settings. Distances are in virtual pixels, speeds in
/// pixels per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Width and height of one glyph cell.
    pub cell_size: f32,
    /// Symbols glyphs are drawn from.
    pub symbols: String,
    /// Lower bound of a column's fall speed.
    pub min_speed: f32,
    /// Upper bound (exclusive) of a column's fall speed.
    pub max_speed: f32,
    /// Shortest trail, in glyphs.
    pub min_length: usize,
    /// Longest trail (inclusive), in glyphs.
    pub max_length: usize,
    /// Chance per frame that a visible glyph re-picks its symbol.
    pub flicker_chance: f32,
    /// Alpha of the black overlay painted every frame.
    pub fade_alpha: f32,
    /// Opacity of the head glyph.
    pub head_opacity: f32,
    /// Damping applied to the linear trail decay.
    pub trail_damping: f32,
    /// Distance past the bottom edge before a column is recycled. Recycled
    /// columns restart within this distance above the top edge.
    pub reset_margin: f32,
    /// Glyphs further above the top edge than this are not drawn.
    pub draw_margin_top: f32,
    /// Glyphs further below the bottom edge than this are not drawn.
    pub draw_margin_bottom: f32,
    /// Rebuild the column layout when the surface is resized.
    pub recompute_columns_on_resize: bool,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            cell_size: 14.0,
            symbols: DEFAULT_SYMBOLS.to_string(),
            min_speed: 2.0,
            max_speed: 8.0,
            min_length: 5,
            max_length: 24,
            flicker_chance: 0.03,
            fade_alpha: 0.03,
            head_opacity: 0.8,
            trail_damping: 0.5,
            reset_margin: 200.0,
            draw_margin_top: 200.0,
            draw_margin_bottom: 100.0,
            recompute_columns_on_resize: false,
        }
    }
}

impl RainConfig {
    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("cell_size", self.cell_size),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("flicker_chance", self.flicker_chance),
            ("fade_alpha", self.fade_alpha),
            ("head_opacity", self.head_opacity),
            ("trail_damping", self.trail_damping),
            ("reset_margin", self.reset_margin),
            ("draw_margin_top", self.draw_margin_top),
            ("draw_margin_bottom", self.draw_margin_bottom),
        ] {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be a finite number, got {value}")));
            }
        }
        if self.cell_size <= 0.0 {
            return Err(invalid(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.symbols.is_empty() {
            return Err(invalid("symbols must not be empty".to_string()));
        }
        if self.min_speed < 0.0 || self.min_speed > self.max_speed {
            return Err(invalid(format!(
                "speed range {}..{} is not valid",
                self.min_speed, self.max_speed
            )));
        }
        if self.min_length == 0 || self.min_length > self.max_length {
            return Err(invalid(format!(
                "trail length range {}..={} is not valid",
                self.min_length, self.max_length
            )));
        }
        for (name, value) in [
            ("flicker_chance", self.flicker_chance),
            ("fade_alpha", self.fade_alpha),
            ("head_opacity", self.head_opacity),
            ("trail_damping", self.trail_damping),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} must be within 0..=1, got {value}")));
            }
        }
        // Trail glyphs peak just below `trail_damping`, so the head stays brightest.
        if self.trail_damping > self.head_opacity {
            return Err(invalid(format!(
                "trail_damping {} must not exceed head_opacity {}",
                self.trail_damping, self.head_opacity
            )));
        }
        if self.reset_margin < 0.0 || self.draw_margin_top < 0.0 || self.draw_margin_bottom < 0.0 {
            return Err(invalid("margins must not be negative".to_string()));
        }
        Ok(())
    }

    /// Symbols as a list of chars.
    pub fn symbol_chars(&self) -> Vec<char> {
        self.symbols.chars().collect()
    }
}

fn invalid(reason: String) -> Error {
    Error::InvalidConfig(reason)
}
