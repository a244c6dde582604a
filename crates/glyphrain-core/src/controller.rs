//! Light/dark theme controller.
//!
//! The controller owns the active [`ThemeAttribute`] and the
//! [`PreferenceStore`]. Two transitions exist: an explicit toggle, which is
//! persisted, and an OS colour-scheme signal, which is only honoured while
//! the user has no stored preference and is never persisted.

use std::sync::mpsc::Receiver;

use tracing::{debug, info};

use crate::{Icon, PreferenceStore, Result, Theme, ThemeAttribute};

/// Maintains the active theme, its indicator and the stored preference.
#[derive(Debug)]
pub struct ThemeController<S> {
    /// Backing store for the explicit preference.
    store: S,
    /// Active theme attribute observed by other components.
    attribute: ThemeAttribute,
    /// Indicator icon matching the active theme.
    icon: Icon,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Read the stored preference (dark when absent) and apply it.
    pub fn initialize(store: S) -> Result<Self> {
        let saved = store.load()?;
        let theme = saved.unwrap_or_default();
        let mut controller = Self {
            store,
            attribute: ThemeAttribute::new(),
            icon: theme.icon(),
        };
        controller.apply(theme);
        info!(%theme, persisted = saved.is_some(), "theme initialized");
        Ok(controller)
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        self.attribute.get().unwrap_or_default()
    }

    /// Icon currently shown on the toggle.
    pub fn icon(&self) -> Icon {
        self.icon
    }

    /// Flip the active theme and persist the choice.
    ///
    /// The new theme is applied before saving, so a store failure leaves the
    /// display switched but unpersisted.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.theme().toggle();
        self.apply(next);
        self.store.save(next)?;
        info!(theme = %next, "theme toggled");
        Ok(next)
    }

    /// Adopt the OS colour scheme unless the user chose a theme explicitly.
    ///
    /// Returns whether the signal was applied.
    pub fn os_scheme_changed(&mut self, theme: Theme) -> Result<bool> {
        if let Some(saved) = self.store.load()? {
            debug!(os = %theme, %saved, "ignoring OS scheme, explicit preference stored");
            return Ok(false);
        }
        self.apply(theme);
        info!(%theme, "applied OS colour scheme");
        Ok(true)
    }

    /// Drop the stored preference. The active theme is left as is.
    pub fn forget(&mut self) -> Result<()> {
        self.store.clear()?;
        info!("stored theme preference cleared");
        Ok(())
    }

    /// Register an observer of the active theme.
    pub fn subscribe(&mut self) -> Receiver<Theme> {
        let rx = self.attribute.subscribe();
        debug!(subscribers = self.attribute.subscriber_count(), "theme observer registered");
        rx
    }

    /// Backing preference store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn apply(&mut self, theme: Theme) {
        self.attribute.set(theme);
        self.icon = theme.icon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, MemoryStore};

    /// Store whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStore;

    impl PreferenceStore for ReadOnlyStore {
        fn load(&self) -> Result<Option<Theme>> {
            Ok(None)
        }

        fn save(&mut self, _theme: Theme) -> Result<()> {
            Err(Error::Store("read-only".to_string()))
        }

        fn clear(&mut self) -> Result<()> {
            Err(Error::Store("read-only".to_string()))
        }
    }

    #[test]
    fn test_fresh_session_defaults_to_dark() {
        let controller = ThemeController::initialize(MemoryStore::new()).unwrap();
        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(controller.icon(), Icon::Moon);
        assert_eq!(controller.icon().name(), "moon");
        assert_eq!(controller.store().load().unwrap(), None);
    }

    #[test]
    fn test_initialize_uses_stored_preference() {
        let controller =
            ThemeController::initialize(MemoryStore::with_theme(Theme::Light)).unwrap();
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(controller.icon(), Icon::Sun);
    }

    #[test]
    fn test_toggle_persists() {
        let mut controller = ThemeController::initialize(MemoryStore::new()).unwrap();
        assert_eq!(controller.toggle().unwrap(), Theme::Light);
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(controller.icon(), Icon::Sun);
        assert_eq!(controller.store().load().unwrap(), Some(Theme::Light));
    }

    #[test]
    fn test_double_toggle_round_trip() {
        let mut controller = ThemeController::initialize(MemoryStore::new()).unwrap();
        controller.toggle().unwrap();
        controller.toggle().unwrap();
        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(controller.icon(), Icon::Moon);
        assert_eq!(controller.store().load().unwrap(), Some(Theme::Dark));
    }

    #[test]
    fn test_os_signal_ignored_with_explicit_preference() {
        let mut controller =
            ThemeController::initialize(MemoryStore::with_theme(Theme::Dark)).unwrap();
        assert!(!controller.os_scheme_changed(Theme::Light).unwrap());
        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(controller.icon(), Icon::Moon);
    }

    #[test]
    fn test_os_signal_applied_without_persisting() {
        let mut controller = ThemeController::initialize(MemoryStore::new()).unwrap();
        assert!(controller.os_scheme_changed(Theme::Light).unwrap());
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(controller.icon(), Icon::Sun);
        assert_eq!(controller.store().load().unwrap(), None);
    }

    #[test]
    fn test_os_signal_ignored_after_toggle() {
        let mut controller = ThemeController::initialize(MemoryStore::new()).unwrap();
        controller.toggle().unwrap();
        assert!(!controller.os_scheme_changed(Theme::Dark).unwrap());
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn test_forget_reenables_os_signal() {
        let mut controller =
            ThemeController::initialize(MemoryStore::with_theme(Theme::Light)).unwrap();
        controller.forget().unwrap();
        assert_eq!(controller.theme(), Theme::Light);
        assert!(controller.os_scheme_changed(Theme::Dark).unwrap());
        assert_eq!(controller.theme(), Theme::Dark);
    }

    #[test]
    fn test_subscribers_observe_changes() {
        let mut controller = ThemeController::initialize(MemoryStore::new()).unwrap();
        let rx = controller.subscribe();
        assert_eq!(rx.try_recv(), Ok(Theme::Dark));
        controller.toggle().unwrap();
        assert_eq!(rx.try_recv(), Ok(Theme::Light));
    }

    #[test]
    fn test_toggle_applies_even_when_save_fails() {
        let mut controller = ThemeController::initialize(ReadOnlyStore).unwrap();
        assert!(matches!(controller.toggle(), Err(Error::Store(_))));
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(controller.icon(), Icon::Sun);
    }
}
