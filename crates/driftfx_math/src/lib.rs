//! Math primitives for driftfx
//!
//! Canvas-space 2D vectors and RGBA colors shared by the simulation and
//! render crates. The coordinate convention follows raster surfaces:
//! x grows right, y grows down, origin at the top-left corner.

mod color;
mod vec2;

pub use color::Rgba;
pub use vec2::Vec2;
