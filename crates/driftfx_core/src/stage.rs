//! Stage holding mounted effects

use slotmap::{new_key_type, SlotMap};

use driftfx_math::Vec2;
use driftfx_render::Canvas;

use crate::driver::EffectDriver;

new_key_type! {
    /// Generational key to an effect mounted on the stage
    pub struct EffectKey;
}

/// Container for several effects running over one surface
///
/// Keys stay valid across unmounts of other effects; a key whose effect
/// was unmounted simply stops resolving.
pub struct EffectStage {
    effects: SlotMap<EffectKey, EffectDriver>,
}

impl Default for EffectStage {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectStage {
    /// Create an empty stage
    pub fn new() -> Self {
        Self {
            effects: SlotMap::with_key(),
        }
    }

    /// Mount an effect, returning its key
    pub fn mount(&mut self, driver: EffectDriver) -> EffectKey {
        self.effects.insert(driver)
    }

    /// Unmount an effect and return it
    ///
    /// The caller is responsible for stopping it first if it was running;
    /// dropping a running driver frees its particles either way.
    pub fn unmount(&mut self, key: EffectKey) -> Option<EffectDriver> {
        self.effects.remove(key)
    }

    pub fn get(&self, key: EffectKey) -> Option<&EffectDriver> {
        self.effects.get(key)
    }

    pub fn get_mut(&mut self, key: EffectKey) -> Option<&mut EffectDriver> {
        self.effects.get_mut(key)
    }

    /// Number of mounted effects
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Iterate over all effect keys
    pub fn keys(&self) -> impl Iterator<Item = EffectKey> + '_ {
        self.effects.keys()
    }

    /// Start every mounted effect
    pub fn start_all(&mut self, width: u32, height: u32, reduced_motion: bool) {
        for driver in self.effects.values_mut() {
            driver.start(width, height, reduced_motion);
        }
    }

    /// Tick every mounted effect over the shared canvas
    pub fn tick_all(&mut self, dt: f32, canvas: &mut dyn Canvas, pointer: Option<Vec2>) {
        for driver in self.effects.values_mut() {
            driver.tick(dt, canvas, pointer);
        }
    }

    /// Stop every mounted effect
    pub fn stop_all(&mut self, canvas: &mut dyn Canvas) {
        for driver in self.effects.values_mut() {
            driver.stop(canvas);
        }
    }

    /// Propagate a surface resize to every effect
    pub fn resize_all(&mut self, width: u32, height: u32) {
        for driver in self.effects.values_mut() {
            driver.resize(width, height);
        }
    }

    /// Total live particles across all effects
    pub fn total_particles(&self) -> usize {
        self.effects.values().map(|d| d.particle_count()).sum()
    }
}
