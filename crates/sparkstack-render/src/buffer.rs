#![forbid(unsafe_code)]

//! Off-screen frame the widgets draw into.
//!
//! A [`Buffer`] owns `width * height` cells laid out row after row. Its size
//! is fixed at construction. Out-of-range writes are ignored rather than
//! reported, so widgets can draw without bounds checks of their own.

use crate::cell::Cell;
use sparkstack_core::geometry::Rect;

/// Fixed-size grid of [`Cell`]s.
///
/// ```
/// use sparkstack_render::buffer::Buffer;
/// use sparkstack_render::cell::Cell;
///
/// let mut frame = Buffer::new(6, 2);
/// for (x, c) in "▁▄█".chars().enumerate() {
///     frame.set(x as u16, 1, Cell::from_char(c));
/// }
/// assert_eq!(frame.to_text(), "      \n▁▄█   ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// A blank frame. Either dimension may be zero.
    pub fn new(width: u16, height: u16) -> Self {
        let count = usize::from(width) * usize::from(height);
        Buffer {
            width,
            height,
            cells: vec![Cell::default(); count],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The whole frame as a rect at the origin.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        let inside = x < self.width && y < self.height;
        inside.then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    fn row(&self, y: u16) -> &[Cell] {
        let stride = usize::from(self.width);
        let start = usize::from(y) * stride;
        self.cells.get(start..start + stride).unwrap_or(&[])
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.offset(x, y).and_then(|at| self.cells.get(at))
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.offset(x, y).and_then(|at| self.cells.get_mut(at))
    }

    /// Write `cell` at (x, y).
    ///
    /// The cell's background is layered over the one already there, so a
    /// clear background keeps earlier fills. A glyph two columns wide also
    /// claims the next column with a continuation marker and is dropped
    /// entirely if that column is off the right edge. Any wide glyph that
    /// the write cuts in half is blanked.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(at) = self.offset(x, y) else {
            return;
        };
        let span = cell.content.width().max(1);
        let end = usize::from(x) + span;
        if span > 1 && end > usize::from(self.width) {
            return;
        }

        self.blank_head_of(at, x);

        let bg = cell.bg.over(self.cells[at].bg);
        self.cells[at] = Cell { bg, ..cell };
        for tail in &mut self.cells[at + 1..at + span] {
            *tail = Cell { bg, ..Cell::CONTINUATION };
        }

        // Leftover continuations after the span belonged to a glyph we replaced.
        let row_end = at - usize::from(x) + usize::from(self.width);
        self.cells[at + span..row_end]
            .iter_mut()
            .take_while(|c| c.is_continuation())
            .for_each(|c| *c = Cell::default());
    }

    /// When `at` (column `x`) is a continuation, blank the wide glyph that
    /// owns it.
    fn blank_head_of(&mut self, at: usize, x: u16) {
        if !self.cells[at].is_continuation() {
            return;
        }
        let row_start = at - usize::from(x);
        if let Some(head) = self.cells[row_start..at]
            .iter_mut()
            .rev()
            .find(|c| !c.is_continuation())
        {
            *head = Cell::default();
        }
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// All cells, top row first.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row `y` as plain text, one char per display column.
    ///
    /// Blanks print as spaces and continuation markers are skipped. Rows
    /// past the bottom give an empty string.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.content.as_char().unwrap_or(' '))
            .collect()
    }

    /// Every row's text joined with `\n`.
    pub fn to_text(&self) -> String {
        let rows: Vec<String> = (0..self.height).map(|y| self.row_text(y)).collect();
        rows.join("\n")
    }
}
