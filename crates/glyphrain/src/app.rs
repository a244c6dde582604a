//! The terminal application: event loop, key handling and rendering.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphrain_core::{Error, PreferenceStore, RainConfig, Surface, Theme, ThemeController};
use glyphrain_rain::{RainAnimator, TerminalSurface};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Block,
};
use tracing::{info, warn};

use crate::scheme::{SchemeProbe, SchemeWatcher};

/// How often the terminal colour scheme is re-probed.
const SCHEME_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Colours used for the foreground text of each theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Color,
    accent: Color,
    muted: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Black,
                accent: Color::Rgb(0, 255, 0),
                muted: Color::DarkGray,
            },
            Theme::Light => Self {
                background: Color::Rgb(245, 245, 240),
                accent: Color::Rgb(20, 90, 40),
                muted: Color::Rgb(120, 120, 120),
            },
        }
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App<S, P> {
    /// Is the application running?
    running: bool,
    /// Light/dark theme state.
    controller: ThemeController<S>,
    /// Rain animation.
    animator: RainAnimator,
    /// Cell buffer the rain paints onto.
    surface: TerminalSurface,
    /// Terminal colour-scheme watcher.
    watcher: SchemeWatcher<P>,
    /// Time between rain frames.
    frame_interval: Duration,
    /// When the last rain frame was produced.
    last_frame: Option<Instant>,
}

/// Builder for [`App`]. The preference store, scheme probe and terminal size
/// have to be supplied.
#[derive(Debug)]
pub struct AppBuilder<S, P> {
    store: Option<S>,
    probe: Option<P>,
    size: Option<(u16, u16)>,
    rain: RainConfig,
    fps: u32,
    seed: Option<u64>,
    forget_theme: bool,
}

impl<S, P> Default for AppBuilder<S, P> {
    fn default() -> Self {
        Self {
            store: None,
            probe: None,
            size: None,
            rain: RainConfig::default(),
            fps: glyphrain_config::DEFAULT_FPS,
            seed: None,
            forget_theme: false,
        }
    }
}

impl<S: PreferenceStore, P: SchemeProbe> AppBuilder<S, P> {
    /// Preference store backing the theme toggle.
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    /// Source of the terminal's colour scheme.
    pub fn probe(mut self, probe: P) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Terminal size in cells.
    pub fn terminal_size(mut self, cols: u16, rows: u16) -> Self {
        self.size = Some((cols, rows));
        self
    }

    /// Rain animation settings.
    pub fn rain(mut self, rain: RainConfig) -> Self {
        self.rain = rain;
        self
    }

    /// Frame rate of the rain.
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Fixed seed for the rain's random source.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clear the stored theme preference on startup.
    pub fn forget_theme(mut self, forget: bool) -> Self {
        self.forget_theme = forget;
        self
    }

    /// Assemble the app, failing on the first missing collaborator.
    pub fn build(self) -> Result<App<S, P>, Error> {
        let store = self.store.ok_or(Error::MissingElement("preference store"))?;
        let probe = self.probe.ok_or(Error::MissingElement("colour scheme probe"))?;
        let (cols, rows) = self.size.ok_or(Error::MissingElement("terminal size"))?;
        if !(1..=glyphrain_config::MAX_FPS).contains(&self.fps) {
            return Err(Error::InvalidConfig(format!(
                "fps must be within 1..={}, got {}",
                glyphrain_config::MAX_FPS,
                self.fps
            )));
        }

        let surface = TerminalSurface::new(cols, rows, self.rain.cell_size);
        let (width, height) = (surface.width(), surface.height());
        let mut animator = match self.seed {
            Some(seed) => RainAnimator::seeded(self.rain, width, height, seed)?,
            None => RainAnimator::new(self.rain, width, height)?,
        };

        let mut controller = ThemeController::initialize(store)?;
        if self.forget_theme {
            controller.forget()?;
        }
        animator.attach_theme(controller.subscribe());
        animator.start();

        Ok(App {
            running: false,
            controller,
            animator,
            surface,
            watcher: SchemeWatcher::new(probe, SCHEME_POLL_INTERVAL),
            frame_interval: Duration::from_secs(1) / self.fps,
            last_frame: None,
        })
    }
}

impl<S: PreferenceStore, P: SchemeProbe> App<S, P> {
    /// Start building an app.
    pub fn builder() -> AppBuilder<S, P> {
        AppBuilder::default()
    }

    /// Start with the rain stopped.
    pub fn paused(mut self) -> Self {
        self.animator.stop();
        self
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.tick(Instant::now());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        info!(frames = self.animator.frame_count(), "glyphrain exiting");
        Ok(())
    }

    /// Advance the rain if a frame is due and pick up colour-scheme changes.
    fn tick(&mut self, now: Instant) {
        let due = self
            .last_frame
            .is_none_or(|last| now.duration_since(last) >= self.frame_interval);
        if due {
            self.animator.frame(&mut self.surface);
            self.last_frame = Some(now);
        }

        if let Some(scheme) = self.watcher.poll(now) {
            if let Err(err) = self.controller.os_scheme_changed(scheme) {
                warn!(%err, "failed to read stored theme preference");
            }
            self.animator.sync_visibility();
        }
    }

    /// Time left until the next rain frame is due.
    fn until_next_frame(&self) -> Duration {
        match self.last_frame {
            Some(last) => self.frame_interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let theme = self.controller.theme();
        let palette = Palette::for_theme(theme);

        frame.render_widget(Block::new().style(Style::new().bg(palette.background)), area);
        if self.animator.is_visible() {
            self.surface.render(frame, area);
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Theme status
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let icon = self.controller.icon();
        let mut status = vec![
            format!(" {} ", icon.symbol()).bold().fg(palette.accent),
            format!("{theme} ").fg(palette.accent),
        ];
        if !self.animator.is_running() {
            status.push("(paused) ".fg(palette.muted));
        }
        frame.render_widget(Line::from(status).centered(), chunks[1]);

        let help = Line::from(vec![
            "q".bold().fg(palette.accent),
            " quit  ".fg(palette.muted),
            "t".bold().fg(palette.accent),
            " toggle theme  ".fg(palette.muted),
            "space".bold().fg(palette.accent),
            " pause  ".fg(palette.muted),
            "r".bold().fg(palette.accent),
            " reset".fg(palette.muted),
        ])
        .centered();
        frame.render_widget(help, chunks[3]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls only until the next rain frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.until_next_frame())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char(' ')) => self.toggle_paused(),
            (_, KeyCode::Char('r')) => self.animator.reinitialize(),
            _ => {}
        }
    }

    /// Match the surface and rain to a new terminal size.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.surface.resize(cols, rows);
        self.animator.resize(self.surface.width(), self.surface.height());
    }

    /// Flip the theme. A failed save is logged; the new theme still applies.
    fn toggle_theme(&mut self) {
        if let Err(err) = self.controller.toggle() {
            warn!(%err, "failed to persist theme preference");
        }
        self.animator.sync_visibility();
    }

    /// Pause or resume the rain.
    fn toggle_paused(&mut self) {
        if self.animator.is_running() {
            self.animator.stop();
        } else {
            self.animator.start();
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
