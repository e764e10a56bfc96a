//! Effect lifecycle and frame loop
//!
//! An [`EffectDriver`] owns one effect from mount to teardown. It sits
//! between the host's frame callbacks and the simulation: the host feeds
//! in elapsed time and a canvas, the driver steps the world and draws.

use driftfx_math::Vec2;
use driftfx_render::{draw_frame, Canvas, RenderOptions};
use driftfx_sim::ParticleWorld;

use crate::effect::{EffectConfig, EffectFlags};

/// Where an effect is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Mounted but not started
    Idle,
    /// Simulating and drawing every tick
    Running,
    /// Torn down; holds no particles and draws nothing
    Stopped,
}

/// Drives one effect's simulate-and-draw loop
///
/// The driver never schedules its own frames. The host calls
/// [`Self::tick`] with the elapsed time, which makes the loop equally at
/// home behind a real frame clock or a virtual one in tests.
pub struct EffectDriver {
    config: EffectConfig,
    options: RenderOptions,
    state: DriverState,
    world: Option<ParticleWorld>,
    elapsed: f32,
}

impl EffectDriver {
    /// Mount an effect; it stays idle until started
    pub fn new(config: EffectConfig) -> Self {
        let options = config.render_options();
        Self {
            config,
            options,
            state: DriverState::Idle,
            world: None,
            elapsed: 0.0,
        }
    }

    /// Start the effect over a surface of the given size
    ///
    /// Refuses when the user prefers reduced motion or the surface has no
    /// area; the driver then stays out of the running state and later
    /// ticks do nothing. Starting an already running or stopped effect
    /// rebuilds it from scratch.
    pub fn start(&mut self, width: u32, height: u32, reduced_motion: bool) {
        if reduced_motion {
            log::info!("reduced motion requested, {:?} effect stays idle", self.config.kind);
            return;
        }
        if width == 0 || height == 0 {
            return;
        }

        let bounds = Vec2::new(width as f32, height as f32);
        let mut world = ParticleWorld::new(
            self.config.sim_config(),
            self.config.spawn_profile(),
            bounds,
            self.config.seed,
        )
        .with_particles(self.config.initial_count());
        if let Some(emitter) = self.config.emitter() {
            world = world.with_emitter(emitter);
        }

        log::debug!(
            "starting {:?} effect at {}x{} with {} particles",
            self.config.kind,
            width,
            height,
            world.count()
        );

        self.world = Some(world);
        self.elapsed = 0.0;
        self.state = DriverState::Running;
    }

    /// Advance by `dt` seconds and draw one frame
    ///
    /// Does nothing unless running: an idle or stopped driver issues no
    /// draw calls at all. When a configured duration elapses the driver
    /// stops itself, clearing the canvas on the way out.
    pub fn tick(&mut self, dt: f32, canvas: &mut dyn Canvas, pointer: Option<Vec2>) {
        if self.state != DriverState::Running {
            return;
        }

        self.elapsed += dt;
        if let Some(duration) = self.config.duration {
            if self.elapsed >= duration {
                self.stop(canvas);
                return;
            }
        }

        let pointer = if self.config.flags.contains(EffectFlags::INTERACTIVE) {
            pointer
        } else {
            None
        };

        if let Some(world) = &mut self.world {
            world.step(dt, pointer);
            draw_frame(canvas, world.particles(), &self.options);
        }
    }

    /// Tear the effect down synchronously
    ///
    /// Clears the canvas to the background, drops every particle, and
    /// leaves the driver stopped. After this returns, nothing of the
    /// effect remains; no further draw calls can happen without a restart.
    pub fn stop(&mut self, canvas: &mut dyn Canvas) {
        if self.state == DriverState::Running {
            canvas.clear(self.options.background);
        }
        self.world = None;
        self.state = DriverState::Stopped;
    }

    /// Follow a surface resize; no-op unless running
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(world) = &mut self.world {
            world.resize(Vec2::new(width as f32, height as f32));
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Live particle count; zero unless running
    pub fn particle_count(&self) -> usize {
        self.world.as_ref().map_or(0, |w| w.count())
    }
}
