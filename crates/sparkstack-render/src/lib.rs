#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, and ANSI presentation.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod presenter;
