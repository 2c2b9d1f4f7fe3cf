#![forbid(unsafe_code)]

//! Widgets for sparkstack: a bordered [`Block`](block::Block) frame and the
//! grouped sparkline renderer built on it.

pub mod block;
pub mod borders;
pub mod diagnostics;
pub mod ramp;
pub mod sparkline;

pub use block::Block;
pub use diagnostics::{CollectingSink, DiagnosticSink, QuantizeAnomaly, TracingSink};
pub use ramp::{GlyphRamp, RampError};
pub use sparkline::{Sparkline, SparklineGroup};

use sparkstack_core::geometry::Rect;
use sparkstack_render::buffer::Buffer;
use sparkstack_render::cell::Cell;
use sparkstack_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Something that can paint itself into part of a [`Buffer`].
pub trait Widget {
    /// Cells outside `area` must be left alone.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// Layer the set fields of `style` onto `cell`. Attributes accumulate.
pub(crate) fn apply_style(cell: &mut Cell, style: Style) {
    cell.fg = style.fg.unwrap_or(cell.fg);
    cell.bg = style.bg.unwrap_or(cell.bg);
    cell.attrs |= style.attrs.unwrap_or_default();
}

/// Restyle every cell in `area` that exists in `buf`, keeping its glyph.
pub(crate) fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    if style.is_empty() {
        return;
    }
    let area = area.intersection(&buf.bounds());
    for row in area.y..area.bottom() {
        for col in area.x..area.right() {
            if let Some(cell) = buf.get_mut(col, row) {
                apply_style(cell, style);
            }
        }
    }
}

/// Write `text` on row `y` starting at column `x`, never past column `limit`.
///
/// Zero-width clusters are dropped and a cluster that would cross `limit` ends
/// the span. Returns the first column after the written text.
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
    limit: u16,
) -> u16 {
    let mut col = usize::from(x);
    let limit = usize::from(limit);
    for cluster in text.graphemes(true) {
        let span = cluster.width();
        if span == 0 {
            continue;
        }
        if col + span > limit {
            break;
        }
        let Some(first) = cluster.chars().next() else {
            continue;
        };
        let mut cell = Cell::from_char(first);
        apply_style(&mut cell, style);
        // col < limit <= u16::MAX here.
        buf.set(col as u16, y, cell);
        col += span;
    }
    u16::try_from(col).unwrap_or(u16::MAX)
}
