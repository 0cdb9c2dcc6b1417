//! Timed collectible spawning for the star catcher
//!
//! Exactly one star is alive at a time. Each star has a fixed lifetime;
//! letting it run out ends the run.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A star waiting to be caught
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    /// Elapsed share of the lifetime, 0 at spawn and 1 at expiry
    pub lifetime_ratio: f32,
}

impl Collectible {
    /// Display opacity: fully opaque at spawn, transparent at expiry
    pub fn opacity(&self) -> u8 {
        (255.0 - self.lifetime_ratio.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime_ratio >= 1.0
    }
}

/// Placement and lifetime parameters, copied from settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub duration: f32,
    pub ground_y: f32,
    pub jump_height: f32,
    pub clearance: f32,
}

/// Owns the live star and its lifetime timer
#[derive(Debug, Clone)]
pub struct Spawner {
    params: SpawnParams,
    timer: f32,
    current: Option<Collectible>,
}

impl Spawner {
    pub fn new(params: SpawnParams) -> Self {
        Self {
            params,
            timer: 0.0,
            current: None,
        }
    }

    /// Place a new star within [-bounds, bounds] and restart its lifetime.
    /// Any previous star is replaced.
    pub fn spawn_next<R: Rng + ?Sized>(&mut self, id: u32, bounds: f32, rng: &mut R) -> Collectible {
        let x = (rng.random::<f32>() - 0.5) * 2.0 * bounds;
        let y = self.params.ground_y
            + rng.random::<f32>() * self.params.jump_height
            + self.params.clearance;

        let star = Collectible {
            id,
            pos: Vec2::new(x, y),
            lifetime_ratio: 0.0,
        };
        self.timer = 0.0;
        self.current = Some(star.clone());
        star
    }

    /// Advance the lifetime timer and return the clamped ratio
    pub fn tick(&mut self, elapsed: f32) -> f32 {
        self.timer += elapsed;
        let ratio = self.lifetime_ratio();
        if let Some(star) = self.current.as_mut() {
            star.lifetime_ratio = ratio;
        }
        ratio
    }

    pub fn lifetime_ratio(&self) -> f32 {
        (self.timer / self.params.duration).min(1.0)
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn current(&self) -> Option<&Collectible> {
        self.current.as_ref()
    }

    /// Remove the live star (pickup or phase change), returning it
    pub fn take(&mut self) -> Option<Collectible> {
        self.current.take()
    }

    /// Discard the live star and zero the timer
    pub fn reset(&mut self) -> Option<Collectible> {
        self.timer = 0.0;
        self.current.take()
    }

    #[cfg(test)]
    pub(crate) fn current_mut(&mut self) -> Option<&mut Collectible> {
        self.current.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params() -> SpawnParams {
        SpawnParams {
            duration: 8.0,
            ground_y: -100.0,
            jump_height: 120.0,
            clearance: 33.0,
        }
    }

    #[test]
    fn test_spawn_within_bounds() {
        let mut spawner = Spawner::new(params());
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..500 {
            let star = spawner.spawn_next(id, 480.0, &mut rng);
            assert!(star.pos.x >= -480.0 && star.pos.x <= 480.0);
            assert!(star.pos.y >= -100.0 + 33.0);
            assert!(star.pos.y <= -100.0 + 120.0 + 33.0);
            assert_eq!(star.lifetime_ratio, 0.0);
        }
    }

    #[test]
    fn test_lifetime_ratio_clamps() {
        let mut spawner = Spawner::new(params());
        let mut rng = Pcg32::seed_from_u64(1);
        spawner.spawn_next(1, 100.0, &mut rng);

        assert!((spawner.tick(2.0) - 0.25).abs() < 1e-6);
        assert!((spawner.tick(2.0) - 0.5).abs() < 1e-6);
        assert_eq!(spawner.tick(10.0), 1.0);
        assert!(spawner.current().is_some_and(Collectible::is_expired));
    }

    #[test]
    fn test_spawn_resets_timer() {
        let mut spawner = Spawner::new(params());
        let mut rng = Pcg32::seed_from_u64(1);
        spawner.spawn_next(1, 100.0, &mut rng);
        spawner.tick(5.0);
        let star = spawner.spawn_next(2, 100.0, &mut rng);
        assert_eq!(star.id, 2);
        assert_eq!(spawner.timer(), 0.0);
        assert_eq!(spawner.current().map(|s| s.id), Some(2));
    }

    #[test]
    fn test_opacity_fades() {
        let mut star = Collectible {
            id: 1,
            pos: Vec2::ZERO,
            lifetime_ratio: 0.0,
        };
        assert_eq!(star.opacity(), 255);
        star.lifetime_ratio = 0.5;
        assert_eq!(star.opacity(), 128);
        star.lifetime_ratio = 1.0;
        assert_eq!(star.opacity(), 0);
    }

    #[test]
    fn test_reset_discards_star() {
        let mut spawner = Spawner::new(params());
        let mut rng = Pcg32::seed_from_u64(9);
        spawner.spawn_next(4, 100.0, &mut rng);
        spawner.tick(3.0);
        assert_eq!(spawner.reset().map(|s| s.id), Some(4));
        assert!(spawner.current().is_none());
        assert_eq!(spawner.timer(), 0.0);
    }
}
