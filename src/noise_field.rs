use glam::Vec2;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::error::{ContourError, Result};
use crate::field::ScalarField;

/// Parameters for the tile-map noise field.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseSettings {
    pub seed: u32,
    pub octaves: usize,
    /// World units per noise period; larger values give broader features.
    pub scale: f32,
    /// Output is remapped to `[0, 1]` and then multiplied by this.
    pub amplitude: f32,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 1,
            scale: 8.0,
            amplitude: 3.0,
        }
    }
}

/// Perlin fBm field in `[0, amplitude]`.
///
/// The sampling window can be shifted with [`NoiseField::set_offset`], which
/// is how the tile map scrolls across an unbounded landscape while its grid
/// stays fixed.
pub struct NoiseField {
    fbm: Fbm<Perlin>,
    amplitude: f32,
    offset: Vec2,
}

impl NoiseField {
    pub fn new(settings: NoiseSettings) -> Result<Self> {
        if !settings.scale.is_finite() || settings.scale <= 0.0 {
            return Err(ContourError::InvalidParameter {
                name: "noise scale",
                value: settings.scale,
            });
        }
        if !settings.amplitude.is_finite() {
            return Err(ContourError::InvalidParameter {
                name: "noise amplitude",
                value: settings.amplitude,
            });
        }
        if settings.octaves == 0 {
            return Err(ContourError::InvalidParameter {
                name: "noise octaves",
                value: 0.0,
            });
        }

        let fbm = Fbm::<Perlin>::new(settings.seed)
            .set_octaves(settings.octaves)
            .set_frequency(1.0 / settings.scale as f64)
            .set_lacunarity(2.0)
            .set_persistence(0.5);

        Ok(Self {
            fbm,
            amplitude: settings.amplitude,
            offset: Vec2::ZERO,
        })
    }

    /// Shift the sampling window; samples at `p` read the noise at `p + offset`.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }
}

impl ScalarField for NoiseField {
    fn sample(&self, x: f32, y: f32) -> f32 {
        let p = Vec2::new(x, y) + self.offset;
        let raw = self.fbm.get([p.x as f64, p.y as f64]) as f32;
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0) * self.amplitude
    }
}
