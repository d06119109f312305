use glam::Vec2;

use super::ScalarField;

/// Cone-shaped field: `peak` at the centre, falling linearly with distance.
///
/// The reference contour scene centres it on the view with `peak` set to half
/// the view height, so nested thresholds produce concentric rings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialField {
    pub centre: Vec2,
    pub peak: f32,
    pub slope: f32,
}

impl RadialField {
    pub fn new(centre: Vec2, peak: f32) -> Self {
        Self {
            centre,
            peak,
            slope: 1.0,
        }
    }

    /// Centred on a `width` x `height` view, peaking at half the height.
    pub fn centred_on(width: f32, height: f32) -> Self {
        Self::new(Vec2::new(width / 2.0, height / 2.0), height / 2.0)
    }

    pub fn with_slope(mut self, slope: f32) -> Self {
        self.slope = slope;
        self
    }
}

impl ScalarField for RadialField {
    #[inline]
    fn sample(&self, x: f32, y: f32) -> f32 {
        let distance = Vec2::new(x, y).distance(self.centre);
        self.peak - distance * self.slope
    }
}
