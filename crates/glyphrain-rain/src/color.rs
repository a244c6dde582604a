//! Colour tiers for rain glyphs.

use glyphrain_core::Rgba;

/// Brightness tier of a glyph, chosen by distance from the column head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// The head glyph.
    Head,
    /// The two glyphs right behind the head.
    Near,
    /// Everything further back.
    Trail,
}

impl Tier {
    /// Tier of the glyph at `index` in the trail (0 is the head).
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => Tier::Head,
            1 | 2 => Tier::Near,
            _ => Tier::Trail,
        }
    }

    /// Base colour of the tier.
    pub fn base(self) -> Rgba {
        match self {
            Tier::Head => Rgba::rgb(0, 255, 0),
            Tier::Near => Rgba::rgb(0, 200, 0),
            Tier::Trail => Rgba::rgb(0, 150, 0),
        }
    }

    /// Scale applied to the glyph opacity when drawing.
    pub fn alpha_scale(self) -> f32 {
        match self {
            Tier::Head => 0.7,
            Tier::Near => 0.5,
            Tier::Trail => 0.3,
        }
    }
}

/// Draw colour for the glyph at `index` with the given opacity.
pub fn tier_color(index: usize, opacity: f32) -> Rgba {
    let tier = Tier::for_index(index);
    tier.base().with_alpha(opacity * tier.alpha_scale())
}
