//! CPU framebuffer canvas

use driftfx_math::{Rgba, Vec2};

use crate::canvas::Canvas;

/// An RGBA8 framebuffer implementing [`Canvas`] on the CPU
///
/// Circles are rasterized with a one-pixel feathered edge; glow is a
/// second, larger stamp with a quadratic falloff. The pixel data is laid
/// out row-major RGBA, ready for [`crate::pipeline::BlitPipeline::upload`].
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelCanvas {
    /// Create a framebuffer filled with opaque black
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: Vec::new(),
        };
        canvas.resize(width, height);
        canvas
    }

    /// Reallocate for a new surface size, clearing to opaque black
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width as usize) * (height as usize) * 4];
        self.clear(Rgba::BLACK);
    }

    /// Raw RGBA bytes, row-major
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Read back one pixel (testing / debugging)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Source-over blend of `color` at `alpha` into pixel (x, y)
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let a = color.scale_alpha(alpha).a;
        if a <= 0.0 {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        let blend = |dst: u8, src: f32| -> u8 {
            let d = dst as f32 / 255.0;
            ((src * a + d * (1.0 - a)) * 255.0).round() as u8
        };
        self.pixels[i] = blend(self.pixels[i], color.r);
        self.pixels[i + 1] = blend(self.pixels[i + 1], color.g);
        self.pixels[i + 2] = blend(self.pixels[i + 2], color.b);
        self.pixels[i + 3] = 255;
    }

    /// Stamp a disc; `soft` uses a quadratic falloff for glow halos
    fn stamp(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32, soft: bool) {
        if radius <= 0.0 {
            return;
        }
        let min_x = (center.x - radius).floor() as i32;
        let max_x = (center.x + radius).ceil() as i32;
        let min_y = (center.y - radius).floor() as i32;
        let max_y = (center.y + radius).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = if soft {
                    let t = (1.0 - d / radius).max(0.0);
                    t * t
                } else {
                    // 1px feathered edge
                    (radius - d + 0.5).clamp(0.0, 1.0)
                };
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, alpha * coverage);
                }
            }
        }
    }
}

impl Canvas for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgba) {
        let [r, g, b, _] = color.to_rgba8();
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = 255;
        }
    }

    fn fade(&mut self, color: Rgba, alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        for px in self.pixels.chunks_exact_mut(4) {
            let current = Rgba::rgb(
                px[0] as f32 / 255.0,
                px[1] as f32 / 255.0,
                px[2] as f32 / 255.0,
            );
            let [r, g, b, _] = current.lerp(color, a).to_rgba8();
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = 255;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32, glow: f32) {
        if glow > 0.0 {
            self.stamp(center, radius * (1.5 + glow), color, alpha * 0.35, true);
        }
        self.stamp(center, radius, color, alpha, false);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba, alpha: f32, width: f32) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as i32;
        let half_width = (width * 0.5).max(0.5);

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let p = from.lerp(to, t);
            if half_width <= 0.5 {
                self.blend_pixel(p.x.floor() as i32, p.y.floor() as i32, color, alpha);
            } else {
                self.stamp(p, half_width, color, alpha, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_fills_all_pixels() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.clear(Rgba::WHITE);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(canvas.pixel(x, y).unwrap(), [255, 255, 255, 255]);
            }
        }
    }

    #[test]
    fn test_circle_paints_center() {
        let mut canvas = PixelCanvas::new(32, 32);
        canvas.fill_circle(Vec2::new(16.0, 16.0), 4.0, Rgba::WHITE, 1.0, 0.0);

        let center = canvas.pixel(16, 16).unwrap();
        assert_eq!(center, [255, 255, 255, 255]);
        // Far corner untouched
        assert_eq!(canvas.pixel(0, 0).unwrap(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_circle_translucent_blends() {
        let mut canvas = PixelCanvas::new(32, 32);
        canvas.fill_circle(Vec2::new(16.0, 16.0), 4.0, Rgba::WHITE, 0.5, 0.0);

        let center = canvas.pixel(16, 16).unwrap();
        assert!(center[0] > 100 && center[0] < 160, "got {}", center[0]);
    }

    #[test]
    fn test_color_alpha_multiplies_draw_alpha() {
        let mut canvas = PixelCanvas::new(16, 16);
        canvas.fill_circle(Vec2::new(8.0, 8.0), 3.0, Rgba::WHITE.with_alpha(0.5), 0.5, 0.0);
        // Effective alpha is 0.25
        let px = canvas.pixel(8, 8).unwrap();
        assert!(px[0] > 50 && px[0] < 80, "got {}", px[0]);
    }

    #[test]
    fn test_out_of_bounds_draw_is_clipped() {
        let mut canvas = PixelCanvas::new(16, 16);
        // Must not panic
        canvas.fill_circle(Vec2::new(-10.0, -10.0), 5.0, Rgba::WHITE, 1.0, 0.0);
        canvas.fill_circle(Vec2::new(100.0, 100.0), 5.0, Rgba::WHITE, 1.0, 0.5);
        canvas.draw_line(
            Vec2::new(-50.0, 8.0),
            Vec2::new(50.0, 8.0),
            Rgba::WHITE,
            1.0,
            1.0,
        );
        assert!(canvas.pixel(8, 8).unwrap()[0] > 0);
    }

    #[test]
    fn test_fade_moves_pixels_toward_color() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.clear(Rgba::WHITE);
        canvas.fade(Rgba::BLACK, 0.25);
        let px = canvas.pixel(0, 0).unwrap();
        assert!(px[0] < 255 && px[0] > 150);
        // Exactly a quarter of the way to black
        assert_eq!(px[0], 191);

        // Repeated fades keep darkening
        for _ in 0..50 {
            canvas.fade(Rgba::BLACK, 0.25);
        }
        assert!(canvas.pixel(0, 0).unwrap()[0] < 10);
    }

    #[test]
    fn test_line_paints_along_segment() {
        let mut canvas = PixelCanvas::new(32, 32);
        canvas.draw_line(
            Vec2::new(4.0, 16.0),
            Vec2::new(28.0, 16.0),
            Rgba::WHITE,
            1.0,
            1.0,
        );
        for x in 5..27 {
            assert!(canvas.pixel(x, 16).unwrap()[0] > 0, "gap at x={}", x);
        }
    }

    #[test]
    fn test_glow_extends_beyond_radius() {
        let mut canvas = PixelCanvas::new(64, 64);
        canvas.fill_circle(Vec2::new(32.0, 32.0), 4.0, Rgba::WHITE, 1.0, 1.0);
        // A pixel outside the hard radius but inside the halo got some light
        let halo = canvas.pixel(32, 38).unwrap();
        assert!(halo[0] > 0);
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.clear(Rgba::WHITE);
        canvas.resize(16, 16);
        assert_eq!(canvas.width(), 16);
        assert_eq!(canvas.pixel(0, 0).unwrap(), [0, 0, 0, 255]);
        assert_eq!(canvas.data().len(), 16 * 16 * 4);
    }
}
