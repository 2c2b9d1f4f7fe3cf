#![forbid(unsafe_code)]

//! The per-position record stored in a [`Buffer`](crate::buffer::Buffer).
//!
//! Everything here is `Copy` and fits in a few machine words.

use std::fmt;

use unicode_width::UnicodeWidthChar;

/// RGBA packed as `0xRRGGBBAA`, straight alpha.
///
/// Alpha 0 is treated as "no color": compositing it onto anything leaves the
/// destination unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    pub const TRANSPARENT: Self = PackedRgba(0);
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const RED: Self = Self::rgb(0xff, 0x00, 0x00);
    pub const GREEN: Self = Self::rgb(0x00, 0xff, 0x00);
    pub const BLUE: Self = Self::rgb(0x00, 0x00, 0xff);
    pub const YELLOW: Self = Self::rgb(0xff, 0xff, 0x00);
    pub const MAGENTA: Self = Self::rgb(0xff, 0x00, 0xff);
    pub const CYAN: Self = Self::rgb(0x00, 0xff, 0xff);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, u8::MAX)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        PackedRgba(u32::from_be_bytes([r, g, b, a]))
    }

    #[inline]
    const fn channels(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.channels()[0]
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.channels()[1]
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.channels()[2]
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.channels()[3]
    }

    /// Paint `self` on top of `below` (source-over).
    pub fn over(self, below: Self) -> Self {
        match self.a() {
            u8::MAX => return self,
            0 => return below,
            _ => {}
        }

        let top_a = u32::from(self.a());
        // Weight left for the lower layer, already scaled by its own alpha.
        let below_w = u32::from(below.a()) * (255 - top_a) / 255;
        let out_a = top_a + below_w;
        let blend = |top: u8, bottom: u8| {
            let sum = u32::from(top) * top_a + u32::from(bottom) * below_w;
            u8::try_from((sum + out_a / 2) / out_a).unwrap_or(u8::MAX)
        };

        let [tr, tg, tb, _] = self.channels();
        let [br, bg, bb, _] = below.channels();
        Self::rgba(
            blend(tr, br),
            blend(tg, bg),
            blend(tb, bb),
            u8::try_from(out_a).unwrap_or(u8::MAX),
        )
    }
}

bitflags::bitflags! {
    /// SGR text attributes carried by a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        /// Swap foreground and background.
        const REVERSE       = 1 << 5;
        const STRIKETHROUGH = 1 << 6;
        const HIDDEN        = 1 << 7;
    }
}

/// What is drawn in a cell: a code point or one of two markers.
///
/// [`EMPTY`](Self::EMPTY) means nothing was drawn. [`CONTINUATION`](Self::CONTINUATION)
/// marks a column covered by the wide glyph to its left.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct CellContent(u32);

impl CellContent {
    pub const EMPTY: Self = CellContent(0);

    // Above char::MAX, so no real glyph maps here.
    pub const CONTINUATION: Self = CellContent(u32::MAX >> 1);

    #[inline]
    pub const fn from_char(c: char) -> Self {
        CellContent(c as u32)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }

    #[inline]
    pub const fn is_continuation(self) -> bool {
        self.0 == Self::CONTINUATION.0
    }

    /// `None` for both markers.
    #[inline]
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::EMPTY | Self::CONTINUATION => None,
            CellContent(raw) => char::from_u32(raw),
        }
    }

    /// Columns this content spans.
    ///
    /// A blank still fills its own column; a continuation adds nothing.
    #[inline]
    pub fn width(self) -> usize {
        match self {
            Self::EMPTY => 1,
            other => other.as_char().and_then(|c| c.width()).unwrap_or(0),
        }
    }
}

impl fmt::Debug for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EMPTY => f.write_str("Empty"),
            Self::CONTINUATION => f.write_str("Continuation"),
            CellContent(raw) => match char::from_u32(raw) {
                Some(c) => write!(f, "{c:?}"),
                None => write!(f, "Invalid({raw:#x})"),
            },
        }
    }
}

/// One grid position: content plus colors and attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub content: CellContent,
    pub fg: PackedRgba,
    /// Composited onto what is already there when written to a buffer.
    pub bg: PackedRgba,
    pub attrs: StyleFlags,
}

impl Cell {
    /// Filler written after a wide glyph's head.
    pub const CONTINUATION: Self = Cell {
        content: CellContent::CONTINUATION,
        fg: PackedRgba::TRANSPARENT,
        bg: PackedRgba::TRANSPARENT,
        attrs: StyleFlags::empty(),
    };

    /// White on transparent, no attributes.
    #[inline]
    pub const fn new(content: CellContent) -> Self {
        Cell {
            content,
            fg: PackedRgba::WHITE,
            bg: PackedRgba::TRANSPARENT,
            attrs: StyleFlags::empty(),
        }
    }

    #[inline]
    pub const fn from_char(c: char) -> Self {
        Cell::new(CellContent::from_char(c))
    }

    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.content.is_continuation()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[inline]
    pub const fn with_fg(self, fg: PackedRgba) -> Self {
        Cell { fg, ..self }
    }

    #[inline]
    pub const fn with_bg(self, bg: PackedRgba) -> Self {
        Cell { bg, ..self }
    }

    #[inline]
    pub const fn with_attrs(self, attrs: StyleFlags) -> Self {
        Cell { attrs, ..self }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::new(CellContent::EMPTY)
    }
}
