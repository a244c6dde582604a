//! The active theme attribute and its subscribers.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::Theme;

/// Active theme marker that other components observe.
///
/// Every [`ThemeAttribute::set`] is pushed to all live subscribers, even when
/// the value is unchanged. Subscribers whose receiver was dropped are pruned
/// on the next notification.
#[derive(Debug, Default)]
pub struct ThemeAttribute {
    /// Current value, `None` until first set.
    value: Option<Theme>,
    /// Channels of registered observers.
    subscribers: Vec<Sender<Theme>>,
}

impl ThemeAttribute {
    /// Create an unset attribute with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the attribute.
    pub fn get(&self) -> Option<Theme> {
        self.value
    }

    /// Set the attribute and notify subscribers.
    pub fn set(&mut self, theme: Theme) {
        self.value = Some(theme);
        self.subscribers.retain(|tx| tx.send(theme).is_ok());
    }

    /// Register an observer. The current value, if any, is delivered right away.
    pub fn subscribe(&mut self) -> Receiver<Theme> {
        let (tx, rx) = mpsc::channel();
        if let Some(theme) = self.value {
            // Receiver is alive in this scope, send cannot fail.
            let _ = tx.send(theme);
        }
        self.subscribers.push(tx);
        rx
    }

    /// Number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
