#![forbid(unsafe_code)]

//! Live terminal demo of sparkline groups.

pub mod app;
pub mod cli;
pub mod feed;
pub mod logging;
pub mod session;
