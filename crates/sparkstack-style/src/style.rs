#![forbid(unsafe_code)]

//! Style: optional foreground, background, and attribute flags.
//!
//! Unset fields leave the target cell's existing value alone when the style
//! is applied, so styles can be layered.

use sparkstack_render::cell::{PackedRgba, StyleFlags};

/// A style token combining foreground, background, and modifiers.
///
/// # Example
/// ```
/// use sparkstack_style::{Color, Style};
///
/// let title = Style::new().fg(Color::Cyan).bold();
/// assert!(title.is_bold());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<PackedRgba>,
    /// Background color.
    pub bg: Option<PackedRgba>,
    /// Attribute flags.
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// An empty style (changes nothing when applied).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    #[must_use]
    pub fn fg(mut self, color: impl Into<PackedRgba>) -> Self {
        self.fg = Some(color.into());
        self
    }

    #[must_use]
    pub fn bg(mut self, color: impl Into<PackedRgba>) -> Self {
        self.bg = Some(color.into());
        self
    }

    /// Add attribute flags to the style.
    #[must_use]
    pub fn add_modifier(mut self, flags: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_default() | flags);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.add_modifier(StyleFlags::BOLD)
    }

    pub fn is_bold(&self) -> bool {
        self.attrs.is_some_and(|a| a.contains(StyleFlags::BOLD))
    }

    /// True when no field is set.
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn new_is_empty() {
        assert!(Style::new().is_empty());
        assert_eq!(Style::new(), Style::default());
    }

    #[test]
    fn builders_set_fields() {
        let s = Style::new().fg(Color::Red).bg(PackedRgba::BLUE).bold();
        assert_eq!(s.fg, Some(Color::Red.to_packed()));
        assert_eq!(s.bg, Some(PackedRgba::BLUE));
        assert!(s.is_bold());
        assert!(!s.is_empty());
    }

    #[test]
    fn add_modifier_accumulates() {
        let s = Style::new()
            .add_modifier(StyleFlags::UNDERLINE)
            .add_modifier(StyleFlags::BOLD);
        assert_eq!(s.attrs, Some(StyleFlags::UNDERLINE | StyleFlags::BOLD));
    }
}
