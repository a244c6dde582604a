//! Terminal surface that rasterises the rain onto character cells.

use glyphrain_core::{Rgba, Surface};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Cells whose brightest channel is below this render blank.
const MIN_VISIBLE: f32 = 10.0;

/// A single character cell and its accumulated colour.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    r: f32,
    g: f32,
    b: f32,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Alpha-composite `color` over the cell.
    fn composite(&mut self, color: Rgba) {
        let a = color.a;
        self.r = self.r * (1.0 - a) + f32::from(color.r) * a;
        self.g = self.g * (1.0 - a) + f32::from(color.g) * a;
        self.b = self.b * (1.0 - a) + f32::from(color.b) * a;
    }

    fn brightness(&self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    fn color(&self) -> Color {
        Color::Rgb(self.r as u8, self.g as u8, self.b as u8)
    }
}

/// Persistent cell buffer measured in virtual pixels of `cell_size` per cell.
///
/// Nothing is cleared between frames: the overlay passed to
/// [`Surface::fade`] darkens what is already there, which is what leaves
/// trails behind the falling heads.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    cell_size: f32,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    /// Create a blank surface of `cols` x `rows` terminal cells.
    pub fn new(cols: u16, rows: u16, cell_size: f32) -> Self {
        Self {
            cols,
            rows,
            cell_size,
            cells: vec![Cell::BLANK; usize::from(cols) * usize::from(rows)],
        }
    }

    /// Match a new terminal size. The buffer is cleared.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::BLANK; usize::from(cols) * usize::from(rows)];
    }

    /// Width in terminal cells.
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Height in terminal cells.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Visible glyph and colour at a terminal cell, if any.
    pub fn glyph_at(&self, col: u16, row: u16) -> Option<(char, Color)> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let cell = &self.cells[self.index(col, row)];
        (cell.brightness() >= MIN_VISIBLE && cell.ch != ' ').then(|| (cell.ch, cell.color()))
    }

    /// Build one line per terminal row.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|row| {
                let spans: Vec<Span> = (0..self.cols)
                    .map(|col| match self.glyph_at(col, row) {
                        Some((ch, color)) => Span::styled(ch.to_string(), Style::new().fg(color)),
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    /// Render the surface into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.to_lines()), area);
    }

    fn index(&self, col: u16, row: u16) -> usize {
        usize::from(row) * usize::from(self.cols) + usize::from(col)
    }
}

impl Surface for TerminalSurface {
    fn width(&self) -> f32 {
        f32::from(self.cols) * self.cell_size
    }

    fn height(&self) -> f32 {
        f32::from(self.rows) * self.cell_size
    }

    fn fade(&mut self, overlay: Rgba) {
        for cell in &mut self.cells {
            cell.composite(overlay);
        }
    }

    fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgba) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let col = (x / self.cell_size).floor();
        let row = (y / self.cell_size).floor();
        if col >= f32::from(self.cols) || row >= f32::from(self.rows) {
            return;
        }
        let index = self.index(col as u16, row as u16);
        let cell = &mut self.cells[index];
        cell.composite(color);
        cell.ch = ch;
    }
}
