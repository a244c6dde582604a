//! Falling glyph rain for glyphrain.
//!
//! [`RainAnimator`] owns the column set and advances it one frame at a time
//! onto any [`glyphrain_core::Surface`]. [`TerminalSurface`] is the surface
//! used by the terminal app: it keeps a persistent cell buffer so the
//! translucent overlay painted each frame leaves fading trails behind.

mod animator;
mod color;
mod column;
mod terminal;

pub use animator::RainAnimator;
pub use color::{Tier, tier_color};
pub use column::{Column, Glyph, trail_opacity};
pub use terminal::TerminalSurface;
