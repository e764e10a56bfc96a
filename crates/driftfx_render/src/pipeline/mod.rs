//! GPU presentation pipeline
//!
//! All drawing happens on the CPU into a [`crate::framebuffer::PixelCanvas`];
//! the only GPU work is blitting that framebuffer onto the window surface.

mod blit;

pub use blit::BlitPipeline;
