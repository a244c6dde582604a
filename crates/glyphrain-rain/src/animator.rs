//! Rain animation state and per-frame update.

use std::sync::mpsc::Receiver;

use glyphrain_core::{RainConfig, Result, Rgba, Surface, Theme};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::color::tier_color;
use crate::column::{Column, pick_symbol, trail_opacity};

/// Falling glyph rain.
///
/// Built stopped; call [`RainAnimator::start`] before driving it with
/// [`RainAnimator::frame`] once per display refresh.
#[derive(Debug)]
pub struct RainAnimator<R = StdRng> {
    /// Animation settings.
    config: RainConfig,
    /// Symbol set, split into chars once.
    symbols: Vec<char>,
    /// Column states, left to right.
    columns: Vec<Column>,
    /// Last known surface width.
    width: f32,
    /// Last known surface height.
    height: f32,
    /// Random source for spawns and flicker.
    rng: R,
    /// Whether frames are being produced.
    running: bool,
    /// Whether the rain should be shown.
    visible: bool,
    /// Subscription to the active theme.
    theme_rx: Option<Receiver<Theme>>,
    /// Frames drawn since construction.
    frames: u64,
}

impl RainAnimator<StdRng> {
    /// Create an animator seeded from the operating system.
    pub fn new(config: RainConfig, width: f32, height: f32) -> Result<Self> {
        Self::with_rng(config, width, height, StdRng::from_os_rng())
    }

    /// Create an animator with a fixed seed.
    pub fn seeded(config: RainConfig, width: f32, height: f32, seed: u64) -> Result<Self> {
        Self::with_rng(config, width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RainAnimator<R> {
    /// Create an animator drawing its randomness from `rng`.
    pub fn with_rng(config: RainConfig, width: f32, height: f32, rng: R) -> Result<Self> {
        config.validate()?;
        let symbols = config.symbol_chars();
        let mut animator = Self {
            config,
            symbols,
            columns: Vec::new(),
            width,
            height,
            rng,
            running: false,
            visible: true,
            theme_rx: None,
            frames: 0,
        };
        animator.init_columns();
        Ok(animator)
    }

    /// Lay out one column per glyph cell across the width, each starting
    /// somewhere above the visible area.
    fn init_columns(&mut self) {
        let cell = self.config.cell_size;
        let count = column_count(self.width, cell);
        let height = self.height.max(0.0);
        let mut columns = Vec::with_capacity(count);
        for i in 0..count {
            let y = self.rng.random::<f32>() * -height;
            columns.push(Column::spawn(
                i as f32 * cell,
                y,
                &self.config,
                &self.symbols,
                &mut self.rng,
            ));
        }
        self.columns = columns;
        debug!(
            columns = count,
            width = self.width,
            height = self.height,
            "rain columns initialized"
        );
    }

    /// Begin producing frames.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            debug!("rain started");
        }
    }

    /// Stop producing frames. State is kept, so a later start resumes.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            debug!(frames = self.frames, "rain stopped");
        }
    }

    /// Whether frames are being produced.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Subscribe to the active theme. The rain is visible only while the
    /// theme is dark.
    pub fn attach_theme(&mut self, rx: Receiver<Theme>) {
        self.theme_rx = Some(rx);
        self.sync_visibility();
    }

    /// Apply any pending theme notifications.
    pub fn sync_visibility(&mut self) {
        let Some(rx) = &self.theme_rx else {
            return;
        };
        if let Some(theme) = rx.try_iter().last() {
            let visible = theme == Theme::Dark;
            if visible != self.visible {
                debug!(%theme, visible, "rain visibility changed");
            }
            self.visible = visible;
        }
    }

    /// Whether the rain should be shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Record new surface dimensions.
    ///
    /// The column layout is kept unless `recompute_columns_on_resize` is set.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width == self.width && height == self.height {
            return;
        }
        info!(width, height, "rain surface resized");
        self.width = width;
        self.height = height;
        if self.config.recompute_columns_on_resize {
            self.init_columns();
        }
    }

    /// Rebuild every column for the current dimensions.
    pub fn reinitialize(&mut self) {
        self.init_columns();
    }

    /// Advance the animation by one frame and paint it onto `surface`.
    ///
    /// Returns `false` without touching the surface when stopped.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        self.sync_visibility();
        if !self.running {
            return false;
        }
        self.resize(surface.width(), surface.height());

        surface.fade(Rgba::BLACK.with_alpha(self.config.fade_alpha));

        let cell = self.config.cell_size;
        let recycle_at = self.height + self.config.reset_margin;
        let draw_top = -self.config.draw_margin_top;
        let draw_bottom = self.height + self.config.draw_margin_bottom;

        for column in &mut self.columns {
            column.y += column.speed;

            if column.tail_y(cell) > recycle_at {
                let y = self.rng.random::<f32>() * -self.config.reset_margin;
                column.reseed(y, &self.config, &self.symbols, &mut self.rng);
                trace!(x = column.x, length = column.length(), "column recycled");
            }

            let length = column.length();
            for i in 0..length {
                column.glyphs[i].opacity = trail_opacity(i, length, &self.config);

                let y = column.glyph_y(i, cell);
                if y <= draw_top || y >= draw_bottom {
                    continue;
                }
                let glyph = &mut column.glyphs[i];
                if self.rng.random_bool(f64::from(self.config.flicker_chance)) {
                    glyph.ch = pick_symbol(&self.symbols, &mut self.rng);
                }
                surface.draw_glyph(glyph.ch, column.x, y, tier_color(i, glyph.opacity));
            }
        }

        self.frames += 1;
        true
    }

    /// Column states, left to right.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Frames drawn so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

/// Columns that fit in `width` with the given cell size.
fn column_count(width: f32, cell: f32) -> usize {
    if width <= 0.0 {
        return 0;
    }
    (width / cell).floor() as usize
}

#[cfg(test)]
mod tests {
    use glyphrain_core::{Error, MemoryStore, ThemeController};

    use super::*;

    /// Surface that records every call.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        width: f32,
        height: f32,
        fades: Vec<Rgba>,
        draws: Vec<(char, f32, f32, Rgba)>,
    }

    impl RecordingSurface {
        fn new(width: f32, height: f32) -> Self {
            Self {
                width,
                height,
                ..Default::default()
            }
        }
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> f32 {
            self.width
        }

        fn height(&self) -> f32 {
            self.height
        }

        fn fade(&mut self, overlay: Rgba) {
            self.fades.push(overlay);
        }

        fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgba) {
            self.draws.push((ch, x, y, color));
        }
    }

    fn running(width: f32, height: f32, seed: u64) -> RainAnimator {
        let mut animator = RainAnimator::seeded(RainConfig::default(), width, height, seed).unwrap();
        animator.start();
        animator
    }

    #[test]
    fn test_column_layout_for_1400_by_800() {
        let animator = running(1400.0, 800.0, 1);
        assert_eq!(animator.column_count(), 100);
        for (i, column) in animator.columns().iter().enumerate() {
            assert_eq!(column.x, i as f32 * 14.0);
        }
    }

    #[test]
    fn test_column_count_floors() {
        for (width, expected) in [(0.0, 0), (13.0, 0), (14.0, 1), (27.9, 1), (1399.0, 99)] {
            let animator = running(width, 800.0, 1);
            assert_eq!(animator.column_count(), expected, "width {width}");
            for column in animator.columns() {
                assert_eq!(column.x % 14.0, 0.0);
            }
        }
    }

    #[test]
    fn test_initial_columns_start_above_view() {
        let animator = running(700.0, 400.0, 9);
        for column in animator.columns() {
            assert!(column.y <= 0.0 && column.y > -400.0, "y = {}", column.y);
            assert!((2.0..8.0).contains(&column.speed));
            assert!((5..=24).contains(&column.length()));
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RainConfig {
            cell_size: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            RainAnimator::seeded(config, 100.0, 100.0, 0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_stopped_animator_does_nothing() {
        let mut animator = RainAnimator::seeded(RainConfig::default(), 280.0, 280.0, 4).unwrap();
        let before = animator.columns().to_vec();
        let mut surface = RecordingSurface::new(280.0, 280.0);

        assert!(!animator.is_running());
        assert!(!animator.frame(&mut surface));
        assert!(surface.fades.is_empty());
        assert!(surface.draws.is_empty());
        assert_eq!(animator.columns(), before.as_slice());
        assert_eq!(animator.frame_count(), 0);
    }

    #[test]
    fn test_stop_and_resume() {
        let mut animator = running(280.0, 280.0, 4);
        let mut surface = RecordingSurface::new(280.0, 280.0);
        assert!(animator.frame(&mut surface));
        animator.stop();
        assert!(!animator.frame(&mut surface));
        animator.start();
        assert!(animator.frame(&mut surface));
        assert_eq!(animator.frame_count(), 2);
        assert_eq!(surface.fades.len(), 2);
    }

    #[test]
    fn test_each_frame_fades_once() {
        let mut animator = running(280.0, 280.0, 2);
        let mut surface = RecordingSurface::new(280.0, 280.0);
        for _ in 0..5 {
            animator.frame(&mut surface);
        }
        assert_eq!(surface.fades.len(), 5);
        for overlay in &surface.fades {
            assert_eq!((overlay.r, overlay.g, overlay.b), (0, 0, 0));
            assert!((overlay.a - 0.03).abs() < 1e-6);
        }
    }

    #[test]
    fn test_frame_advances_by_speed() {
        let mut animator = running(280.0, 2000.0, 5);
        let before = animator.columns().to_vec();
        let mut surface = RecordingSurface::new(280.0, 2000.0);
        animator.frame(&mut surface);
        for (old, new) in before.iter().zip(animator.columns()) {
            assert_eq!(new.y, old.y + old.speed);
            assert_eq!(new.x, old.x);
        }
    }

    #[test]
    fn test_offsets_increase_until_recycled() {
        let mut animator = running(280.0, 100.0, 11);
        let mut surface = RecordingSurface::new(280.0, 100.0);
        let mut previous: Vec<f32> = animator.columns().iter().map(|c| c.y).collect();
        let mut recycled = 0;

        for _ in 0..2000 {
            animator.frame(&mut surface);
            for (column, prev) in animator.columns().iter().zip(previous.iter_mut()) {
                if column.y > *prev {
                    *prev = column.y;
                    continue;
                }
                recycled += 1;
                assert!(column.y <= 0.0, "recycled to {}", column.y);
                assert!(column.y >= -200.0, "recycled to {}", column.y);
                *prev = column.y;
            }
        }
        assert!(recycled > 0);
    }

    #[test]
    fn test_recycle_reseeds_in_place() {
        let mut animator = running(280.0, 300.0, 21);
        animator.columns[3].y = 10_000.0;
        let x = animator.columns[3].x;
        let mut surface = RecordingSurface::new(280.0, 300.0);
        animator.frame(&mut surface);

        let column = &animator.columns()[3];
        assert_eq!(column.x, x);
        assert!(column.y <= 0.0 && column.y >= -200.0);
        assert!((5..=24).contains(&column.length()));
        assert_eq!(animator.column_count(), 20);
    }

    #[test]
    fn test_head_opacity_and_decay() {
        let mut animator = running(700.0, 300.0, 13);
        let mut surface = RecordingSurface::new(700.0, 300.0);
        for _ in 0..300 {
            animator.frame(&mut surface);
            for column in animator.columns() {
                assert_eq!(column.glyphs[0].opacity, 0.8);
                let opacities: Vec<f32> = column.glyphs.iter().map(|g| g.opacity).collect();
                assert!(opacities.windows(2).all(|w| w[0] >= w[1]), "{opacities:?}");
            }
        }
    }

    #[test]
    fn test_draws_stay_within_margins() {
        let mut animator = running(420.0, 200.0, 17);
        let mut surface = RecordingSurface::new(420.0, 200.0);
        for _ in 0..400 {
            animator.frame(&mut surface);
        }
        assert!(!surface.draws.is_empty());
        for &(_, x, y, color) in &surface.draws {
            assert!(y > -200.0 && y < 300.0, "y = {y}");
            assert_eq!(x % 14.0, 0.0);
            assert!(color.a <= 0.8 * 0.7 + 1e-6);
        }
    }

    #[test]
    fn test_head_drawn_brightest() {
        let mut animator = running(140.0, 2000.0, 8);
        animator.columns[0].y = 500.0;
        let mut surface = RecordingSurface::new(140.0, 2000.0);
        animator.frame(&mut surface);

        let head_y = animator.columns()[0].y;
        let head = surface
            .draws
            .iter()
            .find(|&&(_, x, y, _)| x == 0.0 && y == head_y)
            .unwrap();
        assert_eq!(head.3.g, 255);
        assert!((head.3.a - 0.56).abs() < 1e-6);
    }

    #[test]
    fn test_no_flicker_keeps_symbols() {
        let config = RainConfig {
            flicker_chance: 0.0,
            ..Default::default()
        };
        let mut animator = RainAnimator::seeded(config, 280.0, 5000.0, 3).unwrap();
        animator.start();
        let before: Vec<Vec<char>> = animator
            .columns()
            .iter()
            .map(|c| c.glyphs.iter().map(|g| g.ch).collect())
            .collect();
        let mut surface = RecordingSurface::new(280.0, 5000.0);
        for _ in 0..20 {
            animator.frame(&mut surface);
        }
        let after: Vec<Vec<char>> = animator
            .columns()
            .iter()
            .map(|c| c.glyphs.iter().map(|g| g.ch).collect())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = running(560.0, 300.0, 42);
        let mut b = running(560.0, 300.0, 42);
        let mut surface_a = RecordingSurface::new(560.0, 300.0);
        let mut surface_b = RecordingSurface::new(560.0, 300.0);
        for _ in 0..100 {
            a.frame(&mut surface_a);
            b.frame(&mut surface_b);
        }
        assert_eq!(a.columns(), b.columns());
        assert_eq!(surface_a.draws, surface_b.draws);
    }

    #[test]
    fn test_resize_keeps_layout_by_default() {
        let mut animator = running(1400.0, 800.0, 6);
        animator.resize(700.0, 400.0);
        assert_eq!(animator.column_count(), 100);

        let mut surface = RecordingSurface::new(350.0, 400.0);
        animator.frame(&mut surface);
        assert_eq!(animator.column_count(), 100);
    }

    #[test]
    fn test_resize_recomputes_when_enabled() {
        let config = RainConfig {
            recompute_columns_on_resize: true,
            ..Default::default()
        };
        let mut animator = RainAnimator::seeded(config, 1400.0, 800.0, 6).unwrap();
        animator.start();
        animator.resize(700.0, 400.0);
        assert_eq!(animator.column_count(), 50);

        let mut surface = RecordingSurface::new(280.0, 400.0);
        animator.frame(&mut surface);
        assert_eq!(animator.column_count(), 20);
    }

    #[test]
    fn test_reinitialize_uses_current_size() {
        let mut animator = running(1400.0, 800.0, 6);
        animator.resize(140.0, 800.0);
        animator.reinitialize();
        assert_eq!(animator.column_count(), 10);
    }

    #[test]
    fn test_visibility_follows_theme() {
        let mut controller = ThemeController::initialize(MemoryStore::new()).unwrap();
        let mut animator = running(280.0, 280.0, 1);
        animator.attach_theme(controller.subscribe());
        assert!(animator.is_visible());

        controller.toggle().unwrap();
        let mut surface = RecordingSurface::new(280.0, 280.0);
        animator.frame(&mut surface);
        assert!(!animator.is_visible());
        // Hidden rain keeps animating.
        assert_eq!(animator.frame_count(), 1);

        controller.toggle().unwrap();
        animator.sync_visibility();
        assert!(animator.is_visible());
    }

    #[test]
    fn test_attach_to_light_theme_hides_immediately() {
        let mut controller =
            ThemeController::initialize(MemoryStore::with_theme(Theme::Light)).unwrap();
        let mut animator = running(280.0, 280.0, 1);
        animator.attach_theme(controller.subscribe());
        assert!(!animator.is_visible());
    }
}
