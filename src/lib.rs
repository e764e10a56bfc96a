//! driftfx - decorative particle effects for event pages
//!
//! A small engine that runs ambient particle effects (drifting dust,
//! falling petals, firework bursts) over a window surface. The workspace
//! splits into layers:
//!
//! - `driftfx_math` - vectors and colors
//! - `driftfx_sim` - particle state and the force/integration step
//! - `driftfx_render` - the canvas abstraction, CPU rasterizer, and the
//!   wgpu blit that presents it
//! - `driftfx_core` - effect configs, drivers, the stage, and scene files
//! - `driftfx_input` - pointer tracking for interactive effects
//!
//! This crate adds the application shell: configuration loading and the
//! window/present systems used by the `driftfx` binary.

pub mod config;
pub mod systems;

pub use config::AppConfig;
pub use driftfx_core::{
    DriverState, EffectConfig, EffectDriver, EffectKey, EffectKind, EffectStage, EffectTemplate,
    Intensity, StageScene,
};
