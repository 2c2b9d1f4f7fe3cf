#![forbid(unsafe_code)]

//! Core: geometry primitives shared by the render and widget crates.

pub mod geometry;
