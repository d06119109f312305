use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ScalarField;
use crate::config::validate_range;
use crate::error::{ContourError, Result};

/// Squared distances are floored here so a corner sitting exactly on a centre
/// stays finite.
const MIN_DISTANCE_SQUARED: f32 = 1e-6;

/// A moving circle contributing `radius^2 / distance^2` to the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metaball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Metaball {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    #[inline]
    pub fn contribution(&self, point: Vec2) -> f32 {
        let distance_squared = point.distance_squared(self.position).max(MIN_DISTANCE_SQUARED);
        (self.radius * self.radius) / distance_squared
    }
}

/// Spawn parameters for a random metaball field.
#[derive(Clone, Debug, PartialEq)]
pub struct MetaballSettings {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Per-axis speed range; each axis also gets a random direction.
    pub min_speed: f32,
    pub max_speed: f32,
    pub seed: u64,
}

impl Default for MetaballSettings {
    fn default() -> Self {
        Self {
            count: 5,
            min_radius: 0.7,
            max_radius: 1.5,
            min_speed: 0.2,
            max_speed: 2.0,
            seed: 0,
        }
    }
}

impl MetaballSettings {
    pub fn validate(&self) -> Result<()> {
        validate_range("radius", self.min_radius, self.max_radius)?;
        validate_range("speed", self.min_speed, self.max_speed)?;
        if self.min_radius <= 0.0 {
            return Err(ContourError::InvalidParameter {
                name: "min_radius",
                value: self.min_radius,
            });
        }
        Ok(())
    }
}

/// Sum of every metaball's contribution, bouncing inside `bounds`.
#[derive(Clone, Debug, PartialEq)]
pub struct MetaballField {
    balls: Vec<Metaball>,
    bounds: Vec2,
}

impl MetaballField {
    pub fn from_balls(balls: Vec<Metaball>, bounds: Vec2) -> Self {
        Self { balls, bounds }
    }

    /// Scatter `settings.count` balls over `[0, bounds]` with a seeded RNG.
    pub fn random(settings: &MetaballSettings, bounds: Vec2) -> Result<Self> {
        settings.validate()?;
        if !(bounds.is_finite() && bounds.x > 0.0 && bounds.y > 0.0) {
            return Err(ContourError::InvalidExtents {
                width: bounds.x,
                height: bounds.y,
            });
        }

        let mut rng = StdRng::seed_from_u64(settings.seed);
        let random_speed = |rng: &mut StdRng| {
            let speed = rng.gen_range(settings.min_speed..=settings.max_speed);
            if rng.gen_bool(0.5) {
                -speed
            } else {
                speed
            }
        };

        let balls = (0..settings.count)
            .map(|_| {
                let radius = rng.gen_range(settings.min_radius..=settings.max_radius);
                let position = Vec2::new(rng.gen_range(0.0..=bounds.x), rng.gen_range(0.0..=bounds.y));
                let velocity = Vec2::new(random_speed(&mut rng), random_speed(&mut rng));
                Metaball::new(position, velocity, radius)
            })
            .collect();

        Ok(Self { balls, bounds })
    }

    /// Advance every ball by `dt`, reflecting velocity when a ball leaves the
    /// bounds while still moving outward.
    pub fn step(&mut self, dt: f32) {
        let bounds = self.bounds;
        for ball in &mut self.balls {
            ball.position += ball.velocity * dt;

            if (ball.position.x > bounds.x && ball.velocity.x > 0.0)
                || (ball.position.x < 0.0 && ball.velocity.x < 0.0)
            {
                ball.velocity.x = -ball.velocity.x;
            }
            if (ball.position.y > bounds.y && ball.velocity.y > 0.0)
                || (ball.position.y < 0.0 && ball.velocity.y < 0.0)
            {
                ball.velocity.y = -ball.velocity.y;
            }
        }
    }

    pub fn balls(&self) -> &[Metaball] {
        &self.balls
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }
}

impl ScalarField for MetaballField {
    #[inline]
    fn sample(&self, x: f32, y: f32) -> f32 {
        let point = Vec2::new(x, y);
        self.balls.iter().map(|ball| ball.contribution(point)).sum()
    }
}
