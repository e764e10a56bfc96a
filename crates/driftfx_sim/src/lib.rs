//! Particle simulation for driftfx
//!
//! This crate owns the update half of the effect loop: particle state,
//! the per-frame force/integration step, edge policies, and the burst
//! emitter used by firework-style effects. Rendering lives in
//! `driftfx_render`; this crate never touches a surface.

pub mod forces;

mod emitter;
mod particle;
mod world;

pub use emitter::BurstEmitter;
pub use particle::{Particle, SpawnProfile};
pub use world::{EdgePolicy, ParticleWorld, SimConfig};
