//! Core types shared across the glyphrain crates.
//!
//! Holds the theme state machine, the injected collaborator traits (drawing
//! surface and preference store) and the rain animation settings, so the
//! animation and theme logic can run headlessly against fakes.

mod attribute;
mod controller;
mod error;
mod rain;
mod store;
mod surface;
mod theme;

pub use attribute::ThemeAttribute;
pub use controller::ThemeController;
pub use error::{Error, Result};
pub use rain::{DEFAULT_SYMBOLS, RainConfig};
pub use store::{MemoryStore, PreferenceStore};
pub use surface::{Rgba, Surface};
pub use theme::{Icon, Theme};
