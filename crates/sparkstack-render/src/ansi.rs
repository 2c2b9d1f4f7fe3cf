#![forbid(unsafe_code)]

//! ANSI escape sequence generation helpers.
//!
//! Pure byte-generation functions; the [`Presenter`](crate::presenter::Presenter)
//! owns all state tracking.
//!
//! | Sequence | Description |
//! |----------|-------------|
//! | `ESC [ n m` | SGR (Select Graphic Rendition) |
//! | `ESC [ row ; col H` | CUP (Cursor Position, 1-indexed) |
//! | `ESC [ 2 J` | ED (Erase Display) |
//! | `ESC [ ? 2026 h/l` | Synchronized Output (DEC) |

use std::io::{self, Write};

use crate::cell::{PackedRgba, StyleFlags};

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

/// SGR "on" code for each style flag, in emission order.
pub const FLAG_TABLE: [(StyleFlags, u8); 8] = [
    (StyleFlags::BOLD, 1),
    (StyleFlags::DIM, 2),
    (StyleFlags::ITALIC, 3),
    (StyleFlags::UNDERLINE, 4),
    (StyleFlags::BLINK, 5),
    (StyleFlags::REVERSE, 7),
    (StyleFlags::HIDDEN, 8),
    (StyleFlags::STRIKETHROUGH, 9),
];

/// Write SGR sequence for all set style flags: `CSI n ; n ; ... m`.
///
/// Does not emit a reset first.
pub fn sgr_flags<W: Write>(w: &mut W, flags: StyleFlags) -> io::Result<()> {
    if flags.is_empty() {
        return Ok(());
    }
    let codes: Vec<String> = FLAG_TABLE
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, code)| code.to_string())
        .collect();
    write!(w, "\x1b[{}m", codes.join(";"))
}

/// True color foreground, or the terminal default when transparent.
pub fn sgr_fg_packed<W: Write>(w: &mut W, color: PackedRgba) -> io::Result<()> {
    if color.a() == 0 {
        return w.write_all(b"\x1b[39m");
    }
    write!(w, "\x1b[38;2;{};{};{}m", color.r(), color.g(), color.b())
}

/// True color background, or the terminal default when transparent.
pub fn sgr_bg_packed<W: Write>(w: &mut W, color: PackedRgba) -> io::Result<()> {
    if color.a() == 0 {
        return w.write_all(b"\x1b[49m");
    }
    write!(w, "\x1b[48;2;{};{};{}m", color.r(), color.g(), color.b())
}

/// CUP (Cursor Position). Takes 0-indexed input.
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(
        w,
        "\x1b[{};{}H",
        row.saturating_add(1),
        col.saturating_add(1)
    )
}

/// Erase the whole display: `CSI 2 J`
pub fn erase_display<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Begin synchronized output: `CSI ? 2026 h`
pub fn sync_begin<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?2026h")
}

/// End synchronized output: `CSI ? 2026 l`
pub fn sync_end<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?2026l")
}
