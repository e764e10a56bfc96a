//! Force terms applied by the update step
//!
//! Each force is a pure function returning an acceleration in pixels per
//! second squared. The world applies them in a fixed order: gravity, wind,
//! pointer attraction, jitter, then drag (drag is multiplicative and lives
//! in the world step itself).

use driftfx_math::Vec2;
use rand::Rng;

/// Time-varying sinusoidal wind field
///
/// `phase` is the particle's own offset so neighbors do not sway in
/// lockstep. The horizontal component dominates; a small out-of-phase
/// vertical component keeps the motion from looking like pure side-to-side
/// oscillation. Magnitude is bounded by roughly `1.06 * strength`.
pub fn wind(time: f32, phase: f32, strength: f32, frequency: f32) -> Vec2 {
    Vec2::new(
        (time * frequency + phase).sin() * strength,
        (time * frequency * 0.7 + phase * 1.3).cos() * strength * 0.35,
    )
}

/// Pointer attraction with inverse-linear falloff
///
/// Full `strength` at the pointer, linearly falling to zero at `radius`.
/// Outside the radius (or degenerate zero distance) the force is zero.
pub fn pointer_attraction(position: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    let delta = pointer - position;
    let distance = delta.length();
    if distance >= radius || distance < 1e-3 {
        return Vec2::ZERO;
    }
    delta * (1.0 / distance) * strength * (1.0 - distance / radius)
}

/// Small random perturbation for organic motion
pub fn jitter<R: Rng>(rng: &mut R, amount: f32) -> Vec2 {
    if amount <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        rng.gen_range(-1.0..=1.0) * amount,
        rng.gen_range(-1.0..=1.0) * amount,
    )
}
