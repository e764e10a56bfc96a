//! Per-frame draw sequence

use driftfx_math::Rgba;
use driftfx_sim::Particle;

use crate::canvas::Canvas;

/// Styling for the inter-particle connection lines
#[derive(Clone, Debug)]
pub struct ConnectionStyle {
    /// Pairs closer than this many pixels get a line
    pub max_distance: f32,
    /// Line width in pixels
    pub width: f32,
    /// Line color; the pair's distance controls the alpha
    pub color: Rgba,
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        Self {
            max_distance: 110.0,
            width: 1.0,
            color: Rgba::WHITE,
        }
    }
}

/// Options controlling one frame's draw sequence
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Background color used by clear and fade
    pub background: Rgba,
    /// `Some(alpha)` fades the previous frame instead of clearing,
    /// leaving motion trails
    pub trail_fade: Option<f32>,
    /// Draw connection lines between nearby particles
    pub connections: Option<ConnectionStyle>,
    /// Glow amount passed to every circle; zero disables
    pub glow: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Rgba::BLACK,
            trail_fade: None,
            connections: None,
            glow: 0.0,
        }
    }
}

/// Particle indices in back-to-front depth order
///
/// Ascending `z`: farther particles paint first so nearer ones composite
/// on top. The sort is stable, so equal depths keep array order.
pub fn depth_order(particles: &[Particle]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..particles.len()).collect();
    order.sort_by(|&a, &b| {
        particles[a]
            .depth
            .partial_cmp(&particles[b].depth)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Unordered pairs within `max_distance`, with their line alpha
///
/// Alpha is `1 - distance / max_distance`, clamped to `[0, 1]`. Each pair
/// appears exactly once (i < j). This is an O(n²) scan; fine at the tens
/// to ~150 particles these effects run, and a spatial index is not worth
/// its bookkeeping below that.
pub fn connection_pairs(particles: &[Particle], max_distance: f32) -> Vec<(usize, usize, f32)> {
    let mut pairs = Vec::new();
    if max_distance <= 0.0 {
        return pairs;
    }
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let distance = particles[i].position.distance(particles[j].position);
            if distance < max_distance {
                let alpha = (1.0 - distance / max_distance).clamp(0.0, 1.0);
                pairs.push((i, j, alpha));
            }
        }
    }
    pairs
}

/// Draw one frame of the effect
///
/// Sequence: trail fade or clear, connection lines, then particles sorted
/// ascending by depth with depth-scaled size and opacity. Mutates the
/// canvas only.
pub fn draw_frame(canvas: &mut dyn Canvas, particles: &[Particle], options: &RenderOptions) {
    match options.trail_fade {
        Some(alpha) => canvas.fade(options.background, alpha),
        None => canvas.clear(options.background),
    }

    if let Some(style) = &options.connections {
        for (i, j, alpha) in connection_pairs(particles, style.max_distance) {
            canvas.draw_line(
                particles[i].position,
                particles[j].position,
                style.color,
                alpha,
                style.width,
            );
        }
    }

    for index in depth_order(particles) {
        let p = &particles[index];
        let scale = 0.5 + 0.5 * p.depth;
        let alpha = p.opacity * (0.35 + 0.65 * p.depth);
        canvas.fill_circle(p.position, p.size * scale, p.color, alpha, options.glow);
    }
}
