//! Immediate-mode drawing surface

use driftfx_math::{Rgba, Vec2};

/// A 2D raster surface the render pass draws to
///
/// Implementations composite with source-over blending. The pass issues
/// explicit draw commands every frame; there is no retained scene graph
/// and no diffing between frames.
pub trait Canvas {
    /// Surface width in pixels
    fn width(&self) -> u32;

    /// Surface height in pixels
    fn height(&self) -> u32;

    /// Overwrite every pixel with `color`
    fn clear(&mut self, color: Rgba);

    /// Blend `color` over every pixel at the given alpha
    ///
    /// A low alpha leaves ghosts of previous frames behind, which is how
    /// trailing effects fade instead of clearing.
    fn fade(&mut self, color: Rgba, alpha: f32);

    /// Draw a filled circle
    ///
    /// `alpha` multiplies the color's own alpha. A `glow` above zero adds a
    /// soft halo around the circle, scaled by the glow amount.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32, glow: f32);

    /// Draw a line segment of the given width
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba, alpha: f32, width: f32);
}

/// One recorded draw command
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Rgba),
    Fade { color: Rgba, alpha: f32 },
    Circle { center: Vec2, radius: f32, color: Rgba, alpha: f32, glow: f32 },
    Line { from: Vec2, to: Vec2, color: Rgba, alpha: f32, width: f32 },
}

/// A canvas that records draw calls instead of rasterizing
///
/// Used by tests to assert on what a frame drew (ordering, counts,
/// opacities) without a real surface.
#[derive(Clone, Debug, Default)]
pub struct TraceCanvas {
    width: u32,
    height: u32,
    /// Every call issued since construction or the last [`Self::reset`]
    pub calls: Vec<DrawCall>,
}

impl TraceCanvas {
    /// Create a trace canvas of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// Forget all recorded calls
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    /// Circles recorded, in draw order
    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
    }

    /// Lines recorded, in draw order
    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
    }
}

impl Canvas for TraceCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgba) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn fade(&mut self, color: Rgba, alpha: f32) {
        self.calls.push(DrawCall::Fade { color, alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32, glow: f32) {
        self.calls.push(DrawCall::Circle { center, radius, color, alpha, glow });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba, alpha: f32, width: f32) {
        self.calls.push(DrawCall::Line { from, to, color, alpha, width });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_records_in_order() {
        let mut canvas = TraceCanvas::new(100, 100);
        canvas.clear(Rgba::BLACK);
        canvas.fill_circle(Vec2::new(1.0, 2.0), 3.0, Rgba::WHITE, 0.5, 0.0);
        canvas.draw_line(Vec2::ZERO, Vec2::X, Rgba::WHITE, 1.0, 1.0);

        assert_eq!(canvas.calls.len(), 3);
        assert_eq!(canvas.calls[0], DrawCall::Clear(Rgba::BLACK));
        assert_eq!(canvas.circles().count(), 1);
        assert_eq!(canvas.lines().count(), 1);
    }

    #[test]
    fn test_trace_reset() {
        let mut canvas = TraceCanvas::new(100, 100);
        canvas.clear(Rgba::BLACK);
        canvas.reset();
        assert!(canvas.calls.is_empty());
    }
}
