//! Terminal colour-scheme detection.

use std::env;
use std::time::{Duration, Instant};

use glyphrain_core::Theme;

/// Source of the host's preferred colour scheme.
pub trait SchemeProbe {
    /// Current scheme, `None` when it cannot be determined.
    fn probe(&self) -> Option<Theme>;
}

/// Reads the `COLORFGBG` variable set by many terminal emulators.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProbe;

impl SchemeProbe for EnvProbe {
    fn probe(&self) -> Option<Theme> {
        env::var("COLORFGBG").ok().and_then(|v| parse_colorfgbg(&v))
    }
}

/// Parse a `COLORFGBG` value (`fg;bg` or `fg;default;bg`) into a theme.
///
/// The background is the last field; standard palette indices 0-6 and 8
/// are dark, 7 and 9-15 are light.
pub fn parse_colorfgbg(value: &str) -> Option<Theme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(Theme::Dark),
        7 | 9..=15 => Some(Theme::Light),
        _ => None,
    }
}

/// Polls a [`SchemeProbe`] and reports changes.
#[derive(Debug)]
pub struct SchemeWatcher<P> {
    probe: P,
    /// Minimum time between probes.
    interval: Duration,
    /// When the probe last ran.
    last_poll: Option<Instant>,
    /// Last scheme the probe reported.
    last_seen: Option<Theme>,
}

impl<P: SchemeProbe> SchemeWatcher<P> {
    /// Watch `probe`, checking at most once per `interval`.
    pub fn new(probe: P, interval: Duration) -> Self {
        Self {
            probe,
            interval,
            last_poll: None,
            last_seen: None,
        }
    }

    /// Probe if the interval elapsed; returns the scheme when it changed.
    ///
    /// The first successful probe only records a baseline. Failed probes
    /// keep the last known scheme.
    pub fn poll(&mut self, now: Instant) -> Option<Theme> {
        if let Some(last) = self.last_poll
            && now.duration_since(last) < self.interval
        {
            return None;
        }
        self.last_poll = Some(now);

        let scheme = self.probe.probe()?;
        let previous = self.last_seen.replace(scheme)?;
        (previous != scheme).then_some(scheme)
    }
}
