//! Persistence of the explicit theme preference.

use crate::{Result, Theme};

/// Key-value persistence for the user's explicit theme choice.
pub trait PreferenceStore {
    /// Read the stored preference, `None` when the user never chose one.
    fn load(&self) -> Result<Option<Theme>>;
    /// Record an explicit preference.
    fn save(&mut self, theme: Theme) -> Result<()>;
    /// Remove the stored preference.
    fn clear(&mut self) -> Result<()>;
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    theme: Option<Theme>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds a preference.
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme: Some(theme) }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<Theme>> {
        Ok(self.theme)
    }

    fn save(&mut self, theme: Theme) -> Result<()> {
        self.theme = Some(theme);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.theme = None;
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn load(&self) -> Result<Option<Theme>> {
        (**self).load()
    }

    fn save(&mut self, theme: Theme) -> Result<()> {
        (**self).save(theme)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}
