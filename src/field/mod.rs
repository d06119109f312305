//! Scalar fields sampled by the grid.
//!
//! The kernel never defines a field of its own; anything implementing
//! [`ScalarField`] can be contoured, including plain closures.

use glam::Vec2;

mod metaballs;
mod radial;

pub use crate::noise_field::{NoiseField, NoiseSettings};
pub use metaballs::*;
pub use radial::*;

/// A scalar value for every world point.
pub trait ScalarField {
    fn sample(&self, x: f32, y: f32) -> f32;

    #[inline]
    fn sample_at(&self, point: Vec2) -> f32 {
        self.sample(point.x, point.y)
    }
}

// Closure implements ScalarField automatically
impl<F> ScalarField for F
where
    F: Fn(f32, f32) -> f32,
{
    #[inline]
    fn sample(&self, x: f32, y: f32) -> f32 {
        self(x, y)
    }
}

/// Time-varying field `(x, y, time)` frozen at its current time.
pub struct AnimatedField<F> {
    field: F,
    time: f32,
}

impl<F> AnimatedField<F>
where
    F: Fn(f32, f32, f32) -> f32,
{
    pub fn new(field: F) -> Self {
        Self { field, time: 0.0 }
    }

    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

impl<F> ScalarField for AnimatedField<F>
where
    F: Fn(f32, f32, f32) -> f32,
{
    #[inline]
    fn sample(&self, x: f32, y: f32) -> f32 {
        (self.field)(x, y, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_field() {
        let f = |x: f32, y: f32| x - y;
        assert_eq!(f.sample(3.0, 1.0), 2.0);
        assert_eq!(f.sample_at(Vec2::new(1.0, 3.0)), -2.0);
    }

    #[test]
    fn test_animated_field_tracks_time() {
        let mut field = AnimatedField::new(|x: f32, _y: f32, t: f32| x + t);
        assert_eq!(field.sample(1.0, 0.0), 1.0);
        field.advance(0.5);
        field.advance(0.25);
        assert_eq!(field.time(), 0.75);
        assert_eq!(field.sample(1.0, 0.0), 1.75);
        field.set_time(0.0);
        assert_eq!(field.sample(1.0, 0.0), 1.0);
    }
}
