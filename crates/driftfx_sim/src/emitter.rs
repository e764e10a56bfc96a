//! Scheduled burst emission for firework-style effects

use driftfx_math::Vec2;
use rand::Rng;

use crate::particle::{Particle, SpawnProfile};

/// Emits radial bursts of particles on a fixed interval
///
/// The emitter owns only its schedule; spawned particles go into the
/// world's active set and fade out under the despawn edge policy. Dropping
/// the emitter (driver stop) cancels all pending bursts.
#[derive(Clone, Debug)]
pub struct BurstEmitter {
    /// Seconds between bursts
    pub interval: f32,
    /// Particles per burst
    pub burst_size: usize,
    /// Spark speed range in pixels per second
    pub speed_range: (f32, f32),
    /// Time until the next burst; starts at zero so the first burst fires
    /// on the first tick
    countdown: f32,
}

impl BurstEmitter {
    /// Create an emitter firing `burst_size` sparks every `interval` seconds
    pub fn new(interval: f32, burst_size: usize) -> Self {
        Self {
            interval: interval.max(0.05),
            burst_size,
            speed_range: (60.0, 220.0),
            countdown: 0.0,
        }
    }

    /// Set the spark speed range
    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.speed_range = (min, max);
        self
    }

    /// Advance the schedule by `dt`, appending any due bursts to `out`
    ///
    /// Burst centers land in the upper-middle region of the canvas where
    /// fireworks read best; sparks leave radially with uniform angles.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        rng: &mut R,
        bounds: Vec2,
        profile: &SpawnProfile,
        out: &mut Vec<Particle>,
    ) {
        self.countdown -= dt;
        while self.countdown <= 0.0 {
            self.countdown += self.interval;
            let center = Vec2::new(
                rng.gen_range(bounds.x * 0.2..=bounds.x * 0.8),
                rng.gen_range(bounds.y * 0.15..=bounds.y * 0.5),
            );
            for _ in 0..self.burst_size {
                let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                let speed = rng.gen_range(self.speed_range.0..=self.speed_range.1);
                out.push(profile.spawn_spark(rng, center, Vec2::from_angle(angle) * speed));
            }
        }
    }

    /// Reset the schedule so the next tick fires immediately
    pub fn reset(&mut self) {
        self.countdown = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn bounds() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    #[test]
    fn test_first_burst_fires_immediately() {
        let mut emitter = BurstEmitter::new(1.0, 30);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut out = Vec::new();

        emitter.tick(0.016, &mut rng, bounds(), &SpawnProfile::default(), &mut out);
        assert_eq!(out.len(), 30);
    }

    #[test]
    fn test_no_burst_before_interval() {
        let mut emitter = BurstEmitter::new(1.0, 30);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut out = Vec::new();

        emitter.tick(0.016, &mut rng, bounds(), &SpawnProfile::default(), &mut out);
        out.clear();

        // Half the interval passes without a new burst
        for _ in 0..30 {
            emitter.tick(0.016, &mut rng, bounds(), &SpawnProfile::default(), &mut out);
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_burst_every_interval() {
        let mut emitter = BurstEmitter::new(0.5, 10);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut out = Vec::new();

        // Just over 2 seconds of ticks: 1 immediate burst + 4 scheduled
        for _ in 0..130 {
            emitter.tick(0.016, &mut rng, bounds(), &SpawnProfile::default(), &mut out);
        }
        assert_eq!(out.len(), 50);
    }

    #[test]
    fn test_sparks_leave_radially() {
        let mut emitter = BurstEmitter::new(1.0, 100);
        let mut rng = SmallRng::seed_from_u64(9);
        let mut out = Vec::new();

        emitter.tick(0.016, &mut rng, bounds(), &SpawnProfile::default(), &mut out);

        let mut left = 0;
        let mut right = 0;
        for p in &out {
            assert!(p.velocity.length() >= emitter.speed_range.0 * 0.99);
            assert!(p.velocity.length() <= emitter.speed_range.1 * 1.01);
            if p.velocity.x < 0.0 {
                left += 1;
            } else {
                right += 1;
            }
        }
        // Uniform angles spread sparks both ways
        assert!(left > 20 && right > 20);
    }

    #[test]
    fn test_reset_rearms_immediate_burst() {
        let mut emitter = BurstEmitter::new(10.0, 5);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut out = Vec::new();

        emitter.tick(0.016, &mut rng, bounds(), &SpawnProfile::default(), &mut out);
        out.clear();
        emitter.reset();
        emitter.tick(0.016, &mut rng, bounds(), &SpawnProfile::default(), &mut out);
        assert_eq!(out.len(), 5);
    }
}
