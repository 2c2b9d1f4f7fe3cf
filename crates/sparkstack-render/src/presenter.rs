#![forbid(unsafe_code)]

//! Full-frame ANSI presenter.
//!
//! Writes an entire [`Buffer`] to a terminal writer each frame. Style state
//! is tracked across cells so SGR sequences are emitted only when a cell's
//! style differs from the previous one.

use std::io::{self, BufWriter, Write};

use crate::ansi;
use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};

const BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            attrs: cell.attrs,
        }
    }
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    /// Current style state (None = unknown/reset).
    current_style: Option<CellStyle>,
    /// Wrap each frame in DEC synchronized output.
    sync_output: bool,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            current_style: None,
            sync_output: false,
        }
    }

    /// Enable or disable synchronized output (`CSI ? 2026`).
    #[must_use]
    pub fn with_sync_output(mut self, enabled: bool) -> Self {
        self.sync_output = enabled;
        self
    }

    /// Present a frame.
    ///
    /// Rows are written with one cursor move each; the style is reset at the
    /// end so the terminal is left clean between frames.
    pub fn present(&mut self, buffer: &Buffer) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "present",
            width = buffer.width(),
            height = buffer.height()
        )
        .entered();

        if self.sync_output {
            ansi::sync_begin(&mut self.writer)?;
        }

        for y in 0..buffer.height() {
            ansi::cup(&mut self.writer, y, 0)?;
            for x in 0..buffer.width() {
                if let Some(cell) = buffer.get(x, y) {
                    self.emit_cell(cell)?;
                }
            }
        }

        ansi::sgr_reset(&mut self.writer)?;
        self.current_style = None;

        if self.sync_output {
            ansi::sync_end(&mut self.writer)?;
        }
        self.writer.flush()
    }

    fn emit_cell(&mut self, cell: &Cell) -> io::Result<()> {
        if cell.is_continuation() {
            return Ok(());
        }

        let style = CellStyle::from_cell(cell);
        if self.current_style != Some(style) {
            // Reset + apply is simpler than incremental attribute updates.
            ansi::sgr_reset(&mut self.writer)?;
            if style.fg.a() > 0 {
                ansi::sgr_fg_packed(&mut self.writer, style.fg)?;
            }
            if style.bg.a() > 0 {
                ansi::sgr_bg_packed(&mut self.writer, style.bg)?;
            }
            ansi::sgr_flags(&mut self.writer, style.attrs)?;
            self.current_style = Some(style);
        }

        match cell.content.as_char() {
            Some(ch) => {
                let mut buf = [0u8; 4];
                self.writer.write_all(ch.encode_utf8(&mut buf).as_bytes())
            }
            None => self.writer.write_all(b" "),
        }
    }

    /// Clear the entire screen and home the cursor.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        ansi::erase_display(&mut self.writer)?;
        ansi::cup(&mut self.writer, 0, 0)?;
        self.writer.flush()
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}
