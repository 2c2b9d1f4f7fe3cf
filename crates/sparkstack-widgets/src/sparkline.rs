#![forbid(unsafe_code)]

//! Grouped sparkline strip charts.
//!
//! A [`SparklineGroup`] stacks several [`Sparkline`]s inside one bordered
//! [`Block`], splitting the inner height evenly. Each line draws its most
//! recent values right-aligned, one glyph per column, scaled against the
//! largest value currently visible:
//!
//! ```text
//! ┌──────────────┐
//! │CPU           │
//! │              │
//! │▁▂▂▃▅▇█▆▄▃▂▂▃▅│
//! └──────────────┘
//! ```
//!
//! History grows without bound between frames; `draw` trims it once it is
//! far longer than the widest area it could ever fill.

use std::fmt;
use std::sync::Arc;

use crate::block::Block;
use crate::diagnostics::{DiagnosticSink, QuantizeAnomaly, TracingSink};
use crate::ramp::GlyphRamp;
use crate::{Widget, apply_style, draw_text_span};
use sparkstack_core::geometry::Rect;
use sparkstack_render::buffer::Buffer;
use sparkstack_render::cell::Cell;
use sparkstack_style::{Color, Style};
use sparkstack_text::{ELLIPSIS, truncate_with_ellipsis};

/// History is trimmed once it exceeds this many times the inner width.
const TRIM_FACTOR: usize = 4;

/// Partitions taller than this get a top title row.
const TITLE1_MIN_HEIGHT: usize = 5;

/// Partitions taller than this also get a bottom title row.
const TITLE2_MIN_HEIGHT: usize = 6;

/// One series: history plus two title rows.
///
/// A plain data holder; the owning [`SparklineGroup`] does all the work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sparkline {
    /// Data points, oldest first.
    pub data: Vec<u64>,
    pub title1: String,
    pub title2: String,
    pub title_color: Color,
    pub line_color: Color,
}

impl Sparkline {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn data(mut self, data: impl Into<Vec<u64>>) -> Self {
        self.data = data.into();
        self
    }

    #[must_use]
    pub fn title1(mut self, title: impl Into<String>) -> Self {
        self.title1 = title.into();
        self
    }

    #[must_use]
    pub fn title2(mut self, title: impl Into<String>) -> Self {
        self.title2 = title.into();
        self
    }

    #[must_use]
    pub fn title_color(mut self, color: Color) -> Self {
        self.title_color = color;
        self
    }

    #[must_use]
    pub fn line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    /// Append the newest data point.
    pub fn push(&mut self, value: u64) {
        self.data.push(value);
    }
}

impl Extend<u64> for Sparkline {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

/// Several sparklines sharing one bordered frame.
#[derive(Clone)]
pub struct SparklineGroup {
    block: Block,
    lines: Vec<Sparkline>,
    ramp: GlyphRamp,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for SparklineGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparklineGroup")
            .field("block", &self.block)
            .field("lines", &self.lines)
            .field("ramp", &self.ramp)
            .finish_non_exhaustive()
    }
}

impl Default for SparklineGroup {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SparklineGroup {
    /// Create a group with a bordered frame and the given lines, top to bottom.
    pub fn new(lines: Vec<Sparkline>) -> Self {
        Self {
            block: Block::bordered(),
            lines,
            ramp: GlyphRamp::default(),
            diagnostics: Arc::new(TracingSink),
        }
    }

    /// Replace the frame.
    #[must_use]
    pub fn block(mut self, block: Block) -> Self {
        self.block = block;
        self
    }

    #[must_use]
    pub fn with_ramp(mut self, ramp: GlyphRamp) -> Self {
        self.ramp = ramp;
        self
    }

    /// Send quantization anomalies somewhere other than `tracing`.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Append a copy of `line`. Later changes to the caller's value do not
    /// reach the group.
    pub fn add(&mut self, line: &Sparkline) {
        self.lines.push(line.clone());
    }

    pub fn lines(&self) -> &[Sparkline] {
        &self.lines
    }

    /// Mutable access for feeding new data between frames.
    pub fn lines_mut(&mut self) -> &mut [Sparkline] {
        &mut self.lines
    }

    pub fn ramp(&self) -> &GlyphRamp {
        &self.ramp
    }

    /// Draw the frame and every line into `buf`, then trim long histories.
    ///
    /// Title rows are gated per partition: `title1` needs a partition taller
    /// than 5 rows and `title2` one taller than 6, whatever the inner height.
    ///
    /// Takes `&mut self` because trimming rewrites each line's data.
    pub fn draw(&mut self, area: Rect, buf: &mut Buffer) {
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "SparklineGroup",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height,
            lines = self.lines.len()
        )
        .entered();

        let inner = self.block.inner(area);
        self.block.render(area, buf);

        let Self {
            lines,
            ramp,
            diagnostics,
            ..
        } = self;
        let count = lines.len();
        if count == 0 {
            return;
        }
        let partition_height = inner.height as usize / count;

        for (i, line) in lines.iter_mut().enumerate() {
            if partition_height > 0 {
                draw_titles(line, inner, partition_height * i, partition_height, buf);
                let row = partition_height * (i + 1) - 1;
                draw_bars(line, inner, row as u16, ramp, diagnostics.as_ref(), buf);
            }
            trim_history(line, i, inner.width as usize);
        }
    }
}

fn draw_titles(
    line: &Sparkline,
    inner: Rect,
    top: usize,
    partition_height: usize,
    buf: &mut Buffer,
) {
    let style = Style::new().fg(line.title_color).bg(Color::Clear).bold();
    let width = inner.width as usize;
    let rows = [
        (&line.title1, 1, TITLE1_MIN_HEIGHT),
        (&line.title2, 2, TITLE2_MIN_HEIGHT),
    ];
    for (title, offset, min_height) in rows {
        if partition_height <= min_height || title.is_empty() {
            continue;
        }
        let text = truncate_with_ellipsis(title, width, ELLIPSIS);
        let y = inner.y.saturating_add((top + offset) as u16);
        draw_text_span(buf, inner.x, y, &text, style, inner.right());
    }
}

/// Fill one row right to left, newest value in the rightmost column.
fn draw_bars(
    line: &Sparkline,
    inner: Rect,
    row: u16,
    ramp: &GlyphRamp,
    sink: &dyn DiagnosticSink,
    buf: &mut Buffer,
) {
    let width = inner.width as usize;
    let len = line.data.len();
    let local_max = visible_max(&line.data, width);
    let style = Style::new().fg(line.line_color);
    let y = inner.y.saturating_add(row);

    for x in (1..=width).rev() {
        let offset = width - x;
        let glyph = match len.checked_sub(offset + 1) {
            Some(idx) => bar_glyph(ramp, sink, len, offset, line.data[idx], local_max),
            None => ramp.min_bar(),
        };
        let mut cell = Cell::from_char(glyph);
        apply_style(&mut cell, style);
        buf.set(inner.x.saturating_add((x - 1) as u16), y, cell);
    }
}

/// Largest of the last `width` values, never below 1.
pub(crate) fn visible_max(data: &[u64], width: usize) -> u64 {
    data.iter().rev().take(width).copied().max().unwrap_or(0).max(1)
}

/// Quantize one value. An index outside the ramp's bar range is reported
/// and drawn as the shortest bar.
pub(crate) fn bar_glyph(
    ramp: &GlyphRamp,
    sink: &dyn DiagnosticSink,
    len: usize,
    offset: usize,
    value: u64,
    local_max: u64,
) -> char {
    let fraction = value as f64 / local_max as f64;
    let index = ramp.level(fraction);
    match ramp.bar(index) {
        Some(glyph) => glyph,
        None => {
            sink.report(&QuantizeAnomaly {
                len,
                offset,
                value,
                fraction,
                index,
            });
            ramp.min_bar()
        }
    }
}

/// Drop old history once it exceeds `TRIM_FACTOR * width`, keeping the
/// suffix from `width - 1`.
fn trim_history(line: &mut Sparkline, index: usize, width: usize) {
    if width == 0 {
        return;
    }
    let before = line.data.len();
    if before > TRIM_FACTOR.saturating_mul(width) {
        line.data.drain(..width - 1);
        tracing::debug!(
            line = index,
            before,
            after = line.data.len(),
            "trimmed sparkline history"
        );
    }
}
