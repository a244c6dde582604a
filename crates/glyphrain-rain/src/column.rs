//! Rain column state.

use glyphrain_core::RainConfig;
use rand::Rng;

/// A displayed character and its opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Displayed character.
    pub ch: char,
    /// Opacity derived from the glyph's place in the trail.
    pub opacity: f32,
}

/// State for a single rain column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Left edge of the column, fixed for its lifetime.
    pub x: f32,
    /// Vertical position of the head glyph.
    pub y: f32,
    /// Pixels advanced per frame.
    pub speed: f32,
    /// Trail glyphs, head first. The trail length is `glyphs.len()`.
    pub glyphs: Vec<Glyph>,
}

impl Column {
    /// Spawn a column at `(x, y)` with random speed, length and glyphs.
    pub(crate) fn spawn<R: Rng>(
        x: f32,
        y: f32,
        config: &RainConfig,
        symbols: &[char],
        rng: &mut R,
    ) -> Self {
        let mut column = Self {
            x,
            y,
            speed: 0.0,
            glyphs: Vec::new(),
        };
        column.reseed(y, config, symbols, rng);
        column
    }

    /// Restart the column at `y` with fresh speed, length and glyphs.
    /// The horizontal position is kept.
    pub(crate) fn reseed<R: Rng>(
        &mut self,
        y: f32,
        config: &RainConfig,
        symbols: &[char],
        rng: &mut R,
    ) {
        let length = rng.random_range(config.min_length..=config.max_length);
        self.y = y;
        self.speed = random_speed(config, rng);
        self.glyphs.clear();
        self.glyphs.extend((0..length).map(|_| Glyph {
            ch: pick_symbol(symbols, rng),
            opacity: rng.random(),
        }));
    }

    /// Trail length in glyphs.
    pub fn length(&self) -> usize {
        self.glyphs.len()
    }

    /// Vertical position of the glyph at `index`.
    pub fn glyph_y(&self, index: usize, cell_size: f32) -> f32 {
        self.y - index as f32 * cell_size
    }

    /// Vertical position of the last glyph in the trail.
    pub fn tail_y(&self, cell_size: f32) -> f32 {
        self.y - self.length() as f32 * cell_size
    }
}

/// Opacity of the glyph at `index` in a trail of `length` glyphs.
///
/// The head is always `head_opacity`; the rest decay linearly with distance
/// from the head, damped by `trail_damping`.
pub fn trail_opacity(index: usize, length: usize, config: &RainConfig) -> f32 {
    if index == 0 {
        return config.head_opacity;
    }
    let decay = (1.0 - index as f32 / length as f32).max(0.0);
    decay * config.trail_damping
}

pub(crate) fn pick_symbol<R: Rng>(symbols: &[char], rng: &mut R) -> char {
    symbols[rng.random_range(0..symbols.len())]
}

fn random_speed<R: Rng>(config: &RainConfig, rng: &mut R) -> f32 {
    if config.max_speed > config.min_speed {
        rng.random_range(config.min_speed..config.max_speed)
    } else {
        config.min_speed
    }
}
