//! Particle state and spawn profiles

use driftfx_math::{Rgba, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single simulated point advanced once per frame
///
/// Visual attributes (size, color, base opacity, depth) are assigned at
/// spawn and never change afterwards; `opacity` starts at the base value
/// and is only decayed by the fade-out policy of burst effects.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// Position in canvas pixels
    pub position: Vec2,
    /// Velocity in pixels per second
    pub velocity: Vec2,
    /// Synthetic depth in `[0, 1]`; render ordering and scale only,
    /// no effect on motion
    pub depth: f32,
    /// Radius in pixels at depth 1.0
    pub size: f32,
    /// Color assigned at spawn
    pub color: Rgba,
    /// Opacity assigned at spawn
    pub base_opacity: f32,
    /// Current opacity; equals `base_opacity` until fade-out decays it
    pub opacity: f32,
    /// Relative mass scaling gravity; lighter particles catch more wind
    pub mass: f32,
    /// Per-particle phase offset into the wind field, so particles sway
    /// out of step with each other
    pub sway_phase: f32,
}

impl Particle {
    /// Create a particle at rest with neutral attributes
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            depth: 1.0,
            size: 2.0,
            color: Rgba::WHITE,
            base_opacity: 1.0,
            opacity: 1.0,
            mass: 1.0,
            sway_phase: 0.0,
        }
    }

    /// Set the velocity of this particle
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the depth, clamped to `[0, 1]`
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth.clamp(0.0, 1.0);
        self
    }

    /// Set the size in pixels
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the color
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set base and current opacity together
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.base_opacity = opacity;
        self.opacity = opacity;
        self
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the wind phase offset
    pub fn with_sway_phase(mut self, phase: f32) -> Self {
        self.sway_phase = phase;
        self
    }
}

/// Ranges the world samples when spawning or respawning particles
///
/// One profile is shared by initial population, bottom-edge respawn, and
/// burst emission, so every particle of an effect draws from the same look.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpawnProfile {
    /// Colors picked uniformly at spawn
    pub palette: Vec<Rgba>,
    /// Particle radius range in pixels
    pub size_range: (f32, f32),
    /// Initial speed range in pixels per second (ambient drift)
    pub speed_range: (f32, f32),
    /// Mass range; keep around 1.0
    pub mass_range: (f32, f32),
    /// Base opacity range
    pub opacity_range: (f32, f32),
}

impl Default for SpawnProfile {
    fn default() -> Self {
        Self {
            palette: vec![Rgba::WHITE],
            size_range: (1.5, 4.0),
            speed_range: (5.0, 30.0),
            mass_range: (0.6, 1.4),
            opacity_range: (0.4, 1.0),
        }
    }
}

impl SpawnProfile {
    /// Pick a color from the palette
    pub fn sample_color<R: Rng>(&self, rng: &mut R) -> Rgba {
        if self.palette.is_empty() {
            return Rgba::WHITE;
        }
        self.palette[rng.gen_range(0..self.palette.len())]
    }

    /// Spawn a particle somewhere inside `bounds` with a random drift velocity
    pub fn spawn_ambient<R: Rng>(&self, rng: &mut R, bounds: Vec2) -> Particle {
        let position = Vec2::new(
            rng.gen_range(0.0..bounds.x),
            rng.gen_range(0.0..bounds.y),
        );
        let speed = rng.gen_range(self.speed_range.0..=self.speed_range.1);
        let direction = Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU));
        self.finish(rng, position, direction * speed)
    }

    /// Spawn a particle just above the top edge, drifting downward
    ///
    /// Used by the respawn-at-top edge policy: the particle re-enters the
    /// canvas on subsequent steps instead of popping into view.
    pub fn spawn_above_top<R: Rng>(&self, rng: &mut R, bounds: Vec2) -> Particle {
        let position = Vec2::new(
            rng.gen_range(0.0..bounds.x),
            -rng.gen_range(0.0..=(bounds.y * 0.05).max(1.0)),
        );
        let speed = rng.gen_range(self.speed_range.0..=self.speed_range.1);
        // Downward cone, slight sideways drift
        let velocity = Vec2::new(
            rng.gen_range(-0.4..=0.4) * speed,
            speed,
        );
        self.finish(rng, position, velocity)
    }

    /// Spawn a burst spark at `origin` with the given velocity
    pub fn spawn_spark<R: Rng>(&self, rng: &mut R, origin: Vec2, velocity: Vec2) -> Particle {
        self.finish(rng, origin, velocity)
    }

    fn finish<R: Rng>(&self, rng: &mut R, position: Vec2, velocity: Vec2) -> Particle {
        Particle::new(position)
            .with_velocity(velocity)
            .with_depth(rng.gen_range(0.0..=1.0))
            .with_size(rng.gen_range(self.size_range.0..=self.size_range.1))
            .with_color(self.sample_color(rng))
            .with_opacity(rng.gen_range(self.opacity_range.0..=self.opacity_range.1))
            .with_mass(rng.gen_range(self.mass_range.0..=self.mass_range.1))
            .with_sway_phase(rng.gen_range(0.0..std::f32::consts::TAU))
    }
}
