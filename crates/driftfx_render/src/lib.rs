//! Rendering for driftfx
//!
//! The render half of the effect loop, split in two layers:
//!
//! - [`canvas::Canvas`] - the immediate-mode drawing surface the render
//!   pass targets (clear, fade, filled circle with optional glow, line),
//!   with a CPU framebuffer backend ([`framebuffer::PixelCanvas`]) and a
//!   recording backend ([`canvas::TraceCanvas`]) for tests.
//! - [`pass`] - the per-frame draw sequence: trail fade or clear,
//!   optional connection lines, then depth-sorted particles.
//!
//! Presentation to an actual window goes through
//! [`context::RenderContext`] and [`pipeline::BlitPipeline`], which upload
//! the CPU framebuffer to a wgpu surface each frame.

pub mod canvas;
pub mod context;
pub mod framebuffer;
pub mod pass;
pub mod pipeline;

pub use canvas::{Canvas, DrawCall, TraceCanvas};
pub use framebuffer::PixelCanvas;
pub use pass::{connection_pairs, depth_order, draw_frame, ConnectionStyle, RenderOptions};
