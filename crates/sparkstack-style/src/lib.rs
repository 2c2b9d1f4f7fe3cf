#![forbid(unsafe_code)]

//! Style types: colors plus attribute flags.

pub mod color;
pub mod style;

pub use color::Color;
pub use sparkstack_render::cell::StyleFlags;
pub use style::Style;
