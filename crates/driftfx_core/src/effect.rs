//! Effect descriptions
//!
//! An [`EffectConfig`] fully describes one decorative effect: what kind it
//! is, how dense it runs, and which optional behaviors are switched on.
//! The config maps itself onto the simulation and render layers through
//! [`EffectConfig::sim_config`], [`EffectConfig::render_options`], and
//! friends; the driver never hardcodes per-kind numbers.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use driftfx_math::Rgba;
use driftfx_render::{ConnectionStyle, RenderOptions};
use driftfx_sim::{BurstEmitter, EdgePolicy, SimConfig, SpawnProfile};

bitflags! {
    /// Optional behaviors an effect can switch on
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct EffectFlags: u8 {
        /// No optional behavior
        const NONE = 0;
        /// Particles drift toward the pointer
        const INTERACTIVE = 1 << 0;
        /// Draw lines between nearby particles
        const CONNECTIONS = 1 << 1;
        /// Fade the previous frame instead of clearing (motion trails)
        const TRAILS = 1 << 2;
        /// Soft halo around each particle
        const GLOW = 1 << 3;
    }
}

/// The built-in effect kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Slow golden motes that hang in the air
    Dust,
    /// Petals tumbling down from above
    Petals,
    /// Periodic bursts of fading sparks
    Fireworks,
}

/// How dense an effect runs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Particle budget for ambient effects at this intensity
    pub fn particle_budget(self) -> usize {
        match self {
            Intensity::Low => 30,
            Intensity::Medium => 80,
            Intensity::High => 150,
        }
    }

    /// Spark count per firework burst at this intensity
    pub fn burst_size(self) -> usize {
        match self {
            Intensity::Low => 20,
            Intensity::Medium => 40,
            Intensity::High => 70,
        }
    }
}

/// A complete description of one effect
#[derive(Clone, Debug)]
pub struct EffectConfig {
    pub kind: EffectKind,
    pub intensity: Intensity,
    pub flags: EffectFlags,
    /// Stop automatically after this many seconds
    pub duration: Option<f32>,
    /// Seed for the effect's random stream
    pub seed: u64,
}

impl EffectConfig {
    /// Golden dust motes: interactive, connected, glowing
    pub fn dust() -> Self {
        Self {
            kind: EffectKind::Dust,
            intensity: Intensity::Medium,
            flags: EffectFlags::INTERACTIVE | EffectFlags::CONNECTIONS | EffectFlags::GLOW,
            duration: None,
            seed: 0x5eed_d057,
        }
    }

    /// Falling rose petals
    pub fn petals() -> Self {
        Self {
            kind: EffectKind::Petals,
            intensity: Intensity::Medium,
            flags: EffectFlags::NONE,
            duration: None,
            seed: 0x5eed_0e7a,
        }
    }

    /// Firework bursts with spark trails
    pub fn fireworks() -> Self {
        Self {
            kind: EffectKind::Fireworks,
            intensity: Intensity::Medium,
            flags: EffectFlags::TRAILS | EffectFlags::GLOW,
            duration: None,
            seed: 0x5eed_f14e,
        }
    }

    /// Default config for a kind
    pub fn for_kind(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Dust => Self::dust(),
            EffectKind::Petals => Self::petals(),
            EffectKind::Fireworks => Self::fireworks(),
        }
    }

    pub fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Particles to spawn up front
    ///
    /// Fireworks start empty; the emitter fills them in.
    pub fn initial_count(&self) -> usize {
        match self.kind {
            EffectKind::Dust | EffectKind::Petals => self.intensity.particle_budget(),
            EffectKind::Fireworks => 0,
        }
    }

    /// Simulation parameters for this effect
    pub fn sim_config(&self) -> SimConfig {
        let interactive = self.flags.contains(EffectFlags::INTERACTIVE);
        match self.kind {
            EffectKind::Dust => SimConfig {
                gravity: 3.0,
                wind_strength: 9.0,
                wind_frequency: 0.6,
                drag: 0.985,
                max_speed: 55.0,
                jitter: 6.0,
                attract_radius: if interactive { 140.0 } else { 0.0 },
                attract_strength: if interactive { 90.0 } else { 0.0 },
                fade_rate: 0.0,
                edge: EdgePolicy::Wrap,
            },
            EffectKind::Petals => SimConfig {
                gravity: 22.0,
                wind_strength: 16.0,
                wind_frequency: 0.9,
                drag: 0.99,
                max_speed: 120.0,
                jitter: 3.0,
                attract_radius: if interactive { 120.0 } else { 0.0 },
                attract_strength: if interactive { 60.0 } else { 0.0 },
                fade_rate: 0.0,
                edge: EdgePolicy::RespawnTop,
            },
            EffectKind::Fireworks => SimConfig {
                gravity: 55.0,
                wind_strength: 0.0,
                wind_frequency: 0.0,
                drag: 0.96,
                max_speed: 420.0,
                jitter: 0.0,
                attract_radius: 0.0,
                attract_strength: 0.0,
                fade_rate: 0.55,
                edge: EdgePolicy::Despawn,
            },
        }
    }

    /// Spawn attributes (palette, sizes, speeds) for this effect
    pub fn spawn_profile(&self) -> SpawnProfile {
        match self.kind {
            EffectKind::Dust => SpawnProfile {
                palette: vec![
                    Rgba::from_hex(0xF5D76E),
                    Rgba::from_hex(0xE8C872),
                    Rgba::from_hex(0xFFF2CC),
                ],
                size_range: (1.0, 3.0),
                speed_range: (4.0, 18.0),
                mass_range: (0.6, 1.4),
                opacity_range: (0.35, 0.9),
            },
            EffectKind::Petals => SpawnProfile {
                palette: vec![
                    Rgba::from_hex(0xF7CAD0),
                    Rgba::from_hex(0xF9BEC7),
                    Rgba::from_hex(0xFBE0E0),
                ],
                size_range: (2.5, 5.5),
                speed_range: (10.0, 40.0),
                mass_range: (0.7, 1.3),
                opacity_range: (0.6, 1.0),
            },
            EffectKind::Fireworks => SpawnProfile {
                palette: vec![
                    Rgba::from_hex(0xFF5E5B),
                    Rgba::from_hex(0xFFD166),
                    Rgba::from_hex(0x70C1B3),
                    Rgba::from_hex(0x9B5DE5),
                    Rgba::from_hex(0x00BBF9),
                ],
                size_range: (1.0, 2.5),
                speed_range: (0.0, 0.0),
                mass_range: (0.8, 1.2),
                opacity_range: (0.9, 1.0),
            },
        }
    }

    /// Render options for this effect
    pub fn render_options(&self) -> RenderOptions {
        let glow = if self.flags.contains(EffectFlags::GLOW) {
            match self.kind {
                EffectKind::Fireworks => 1.0,
                _ => 0.6,
            }
        } else {
            0.0
        };
        let connections = self.flags.contains(EffectFlags::CONNECTIONS).then(|| {
            ConnectionStyle {
                max_distance: 110.0,
                width: 1.0,
                color: Rgba::from_hex(0xF5D76E).with_alpha(0.5),
            }
        });
        let trail_fade = self.flags.contains(EffectFlags::TRAILS).then_some(0.14);

        RenderOptions {
            background: Rgba::from_hex(0x14101C),
            trail_fade,
            connections,
            glow,
        }
    }

    /// Burst emitter, for kinds that spawn in pulses
    pub fn emitter(&self) -> Option<BurstEmitter> {
        match self.kind {
            EffectKind::Fireworks => Some(
                BurstEmitter::new(1.3, self.intensity.burst_size()).with_speed_range(80.0, 260.0),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_budgets_increase() {
        assert!(Intensity::Low.particle_budget() < Intensity::Medium.particle_budget());
        assert!(Intensity::Medium.particle_budget() < Intensity::High.particle_budget());
    }

    #[test]
    fn test_dust_is_interactive() {
        let config = EffectConfig::dust();
        assert!(config.flags.contains(EffectFlags::INTERACTIVE));
        assert!(config.sim_config().attract_radius > 0.0);
    }

    #[test]
    fn test_non_interactive_kind_has_no_attraction() {
        let config = EffectConfig::petals();
        assert_eq!(config.sim_config().attract_radius, 0.0);
        assert_eq!(config.sim_config().attract_strength, 0.0);
    }

    #[test]
    fn test_fireworks_fade_and_despawn() {
        let config = EffectConfig::fireworks();
        let sim = config.sim_config();
        assert_eq!(sim.edge, EdgePolicy::Despawn);
        assert!(sim.fade_rate > 0.0);
        // Sparks come from the emitter, not the initial fill
        assert_eq!(config.initial_count(), 0);
        assert!(config.emitter().is_some());
    }

    #[test]
    fn test_trails_map_to_fade() {
        let with_trails = EffectConfig::fireworks().render_options();
        assert!(with_trails.trail_fade.is_some());

        let without = EffectConfig::petals().render_options();
        assert!(without.trail_fade.is_none());
    }

    #[test]
    fn test_connections_only_when_flagged() {
        assert!(EffectConfig::dust().render_options().connections.is_some());
        assert!(EffectConfig::petals().render_options().connections.is_none());
    }
}
