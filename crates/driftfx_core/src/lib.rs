//! Core types for the driftfx effect engine
//!
//! This crate ties the simulation and render halves into runnable effects:
//!
//! - [`EffectConfig`] - a complete description of one effect (kind,
//!   intensity, behavior flags)
//! - [`EffectDriver`] - owns one effect's lifecycle and frame loop
//! - [`EffectStage`] - container for several mounted effects
//! - [`EffectKey`] - generational key to an effect on the stage
//! - [`EffectTemplate`] / [`StageScene`] - serializable scene files

mod driver;
mod effect;
mod scene;
mod stage;

pub use driver::{DriverState, EffectDriver};
pub use effect::{EffectConfig, EffectFlags, EffectKind, Intensity};
pub use scene::{EffectTemplate, SceneLoadError, SceneSaveError, StageScene};
pub use stage::{EffectKey, EffectStage};

// Re-export commonly used types from the lower crates for convenience
pub use driftfx_math::{Rgba, Vec2};
pub use driftfx_render::{Canvas, RenderOptions, TraceCanvas};
pub use driftfx_sim::{EdgePolicy, ParticleWorld, SimConfig};
