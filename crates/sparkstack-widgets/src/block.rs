#![forbid(unsafe_code)]

use crate::Widget;
use crate::borders::{BorderType, Borders};
use crate::{apply_style, draw_text_span, set_style_area};
use sparkstack_core::geometry::{Rect, Sides};
use sparkstack_render::buffer::Buffer;
use sparkstack_render::cell::Cell;
use sparkstack_style::Style;
use sparkstack_text::display_width;

/// A frame around some content: any subset of the four edges plus a title
/// set into the top edge.
///
/// Widgets that own a `Block` render it first and then draw into
/// [`Block::inner`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    borders: Borders,
    border_style: Style,
    border_type: BorderType,
    title: Option<String>,
    title_alignment: Alignment,
    style: Style,
}

/// Where the title sits along the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Block {
    /// No edges, no title.
    pub fn new() -> Self {
        Block::default()
    }

    /// All four edges.
    pub fn bordered() -> Self {
        Block::new().borders(Borders::ALL)
    }

    #[must_use]
    pub fn borders(self, borders: Borders) -> Self {
        Block { borders, ..self }
    }

    /// Style for edge glyphs and the title.
    #[must_use]
    pub fn border_style(self, border_style: Style) -> Self {
        Block {
            border_style,
            ..self
        }
    }

    #[must_use]
    pub fn border_type(self, border_type: BorderType) -> Self {
        Block {
            border_type,
            ..self
        }
    }

    /// Shown only when the top edge is drawn.
    #[must_use]
    pub fn title(self, title: impl Into<String>) -> Self {
        Block {
            title: Some(title.into()),
            ..self
        }
    }

    #[must_use]
    pub fn title_alignment(self, title_alignment: Alignment) -> Self {
        Block {
            title_alignment,
            ..self
        }
    }

    /// Style laid over the whole area before the edges are drawn.
    #[must_use]
    pub fn style(self, style: Style) -> Self {
        Block { style, ..self }
    }

    /// `area` minus one row or column per drawn edge.
    pub fn inner(&self, area: Rect) -> Rect {
        let edge = |side: Borders| u16::from(self.borders.contains(side));
        let margin = Sides::new(
            edge(Borders::TOP),
            edge(Borders::RIGHT),
            edge(Borders::BOTTOM),
            edge(Borders::LEFT),
        );
        area.inner(margin)
    }

    fn put(&self, buf: &mut Buffer, x: u16, y: u16, glyph: char) {
        let mut cell = Cell::from_char(glyph);
        apply_style(&mut cell, self.border_style);
        buf.set(x, y, cell);
    }

    fn draw_edges(&self, area: Rect, buf: &mut Buffer) {
        let glyphs = self.border_type.to_border_set();
        let (left, top) = (area.x, area.y);
        let (right, bottom) = (area.right() - 1, area.bottom() - 1);

        for (side, col) in [(Borders::LEFT, left), (Borders::RIGHT, right)] {
            if self.borders.contains(side) {
                (top..=bottom).for_each(|y| self.put(buf, col, y, glyphs.vertical));
            }
        }
        for (side, row) in [(Borders::TOP, top), (Borders::BOTTOM, bottom)] {
            if self.borders.contains(side) {
                (left..=right).for_each(|x| self.put(buf, x, row, glyphs.horizontal));
            }
        }

        // A corner needs both of its edges and replaces whatever they drew there.
        let corners = [
            (Borders::TOP | Borders::LEFT, left, top, glyphs.top_left),
            (Borders::TOP | Borders::RIGHT, right, top, glyphs.top_right),
            (Borders::BOTTOM | Borders::LEFT, left, bottom, glyphs.bottom_left),
            (Borders::BOTTOM | Borders::RIGHT, right, bottom, glyphs.bottom_right),
        ];
        for (needs, x, y, glyph) in corners {
            if self.borders.contains(needs) {
                self.put(buf, x, y, glyph);
            }
        }
    }

    fn draw_title(&self, area: Rect, buf: &mut Buffer) {
        let Some(title) = self.title.as_deref() else {
            return;
        };
        if area.width < 3 || !self.borders.contains(Borders::TOP) {
            return;
        }

        // The title lives between the two top corners. Near u16::MAX the
        // slot can be empty, in which case nothing is drawn.
        let slot_start = area.x.saturating_add(1);
        let slot_end = area.right().saturating_sub(1);
        let slot = slot_end.saturating_sub(slot_start);
        let used = display_width(title).min(usize::from(slot)) as u16;
        let start = match self.title_alignment {
            Alignment::Left => slot_start,
            Alignment::Center => slot_start.saturating_add((slot - used) / 2),
            Alignment::Right => slot_end.saturating_sub(used),
        };
        draw_text_span(buf, start, area.y, title, self.border_style, slot_end);
    }
}

impl Widget for Block {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Block",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        set_style_area(buf, area, self.style);
        self.draw_edges(area, buf);
        self.draw_title(area, buf);
    }
}
