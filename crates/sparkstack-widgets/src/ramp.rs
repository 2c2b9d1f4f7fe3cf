#![forbid(unsafe_code)]

//! Glyph ramps: ordered bar glyphs from empty to full.

use std::borrow::Cow;
use std::fmt;

/// Eighth-block bars, the usual sparkline look.
const BARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Fallback for terminals or fonts without block elements.
const ASCII_BARS: [char; 9] = [' ', '.', ':', '-', '=', '+', '*', '#', '@'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampError {
    /// A ramp needs an empty glyph plus at least one bar glyph.
    TooShort { len: usize },
}

impl fmt::Display for RampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len } => {
                write!(f, "glyph ramp needs at least 2 glyphs, got {len}")
            }
        }
    }
}

impl std::error::Error for RampError {}

/// An ordered set of glyphs of increasing fill level.
///
/// Index 0 is the visually empty glyph; sparklines only ever draw indices
/// `1..len()`, so a column with no data or the smallest value still shows a
/// sliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Cow<'static, [char]>,
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self {
            glyphs: Cow::Borrowed(&BARS),
        }
    }
}

impl GlyphRamp {
    /// Build a ramp from glyphs ordered shortest to tallest.
    ///
    /// # Errors
    ///
    /// Returns [`RampError::TooShort`] when fewer than two glyphs are given.
    pub fn new(glyphs: impl Into<Cow<'static, [char]>>) -> Result<Self, RampError> {
        let glyphs = glyphs.into();
        if glyphs.len() < 2 {
            return Err(RampError::TooShort { len: glyphs.len() });
        }
        Ok(Self { glyphs })
    }

    /// The ASCII-only ramp.
    pub fn ascii() -> Self {
        Self {
            glyphs: Cow::Borrowed(&ASCII_BARS),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false: construction rejects short ramps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// The glyph at `index`, if it is a drawable bar (`1..len()`).
    pub fn bar(&self, index: i64) -> Option<char> {
        let index = usize::try_from(index).ok()?;
        if index == 0 {
            return None;
        }
        self.glyphs.get(index).copied()
    }

    /// The shortest drawable bar, used for missing data and fallbacks.
    #[inline]
    pub fn min_bar(&self) -> char {
        self.glyphs[1]
    }

    /// Map a normalized value to a ramp index: `floor(fraction * (N-2)) + 1`.
    ///
    /// The result is not range-checked; fractions outside `[0, 1]` produce
    /// indices that [`GlyphRamp::bar`] rejects.
    pub fn level(&self, fraction: f64) -> i64 {
        let steps = (self.glyphs.len() - 2) as f64;
        (fraction * steps).floor() as i64 + 1
    }
}
