use glam::Vec2;

use super::types::CaseIndex;

/// One cell of the sampling lattice.
///
/// Position and size are fixed at construction; the four corner values are
/// rewritten on every refresh. Corner points are stored; inside a grid a point
/// shared with a neighbour is the same `Vec2` in both cells. Neighbour links are indices into the owning
/// grid's cell array and only ever point left or down.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridSquare {
    // Identity
    row: usize,
    column: usize,
    /// bl, br, tr, tl
    corners: [Vec2; 4],
    size: f32,

    // Corner field values
    pub bottom_left_value: f32,
    pub bottom_right_value: f32,
    pub top_left_value: f32,
    pub top_right_value: f32,

    // Neighbours (same grid)
    pub(crate) left_neighbour: Option<usize>,
    pub(crate) bottom_neighbour: Option<usize>,
}

impl GridSquare {
    pub fn new(row: usize, column: usize, bottom_left_corner: Vec2, size: f32) -> Self {
        let corners = [
            bottom_left_corner,
            bottom_left_corner + Vec2::new(size, 0.0),
            bottom_left_corner + Vec2::splat(size),
            bottom_left_corner + Vec2::new(0.0, size),
        ];
        Self::with_corners(row, column, corners, size)
    }

    /// Square with precomputed corner points, in bl, br, tr, tl order.
    pub(crate) fn with_corners(row: usize, column: usize, corners: [Vec2; 4], size: f32) -> Self {
        Self {
            row,
            column,
            corners,
            size,
            ..Default::default()
        }
    }

    /// Free-standing square with explicit corner values, outside any grid.
    pub fn with_values(
        bottom_left_corner: Vec2,
        size: f32,
        bottom_left: f32,
        bottom_right: f32,
        top_left: f32,
        top_right: f32,
    ) -> Self {
        let mut square = Self::new(0, 0, bottom_left_corner, size);
        square.set_values(bottom_left, bottom_right, top_left, top_right);
        square
    }

    pub fn set_values(&mut self, bottom_left: f32, bottom_right: f32, top_left: f32, top_right: f32) {
        self.bottom_left_value = bottom_left;
        self.bottom_right_value = bottom_right;
        self.top_left_value = top_left;
        self.top_right_value = top_right;
    }

    pub fn row(&self) -> usize {
        self.row
    }
    pub fn column(&self) -> usize {
        self.column
    }
    pub fn size(&self) -> f32 {
        self.size
    }
    pub fn left_neighbour(&self) -> Option<usize> {
        self.left_neighbour
    }
    pub fn bottom_neighbour(&self) -> Option<usize> {
        self.bottom_neighbour
    }

    pub fn bottom_left_corner(&self) -> Vec2 {
        self.corners[0]
    }
    pub fn bottom_right_corner(&self) -> Vec2 {
        self.corners[1]
    }
    pub fn top_right_corner(&self) -> Vec2 {
        self.corners[2]
    }
    pub fn top_left_corner(&self) -> Vec2 {
        self.corners[3]
    }

    /// Corner values in classification bit order: bl, br, tr, tl.
    pub fn values(&self) -> [f32; 4] {
        [
            self.bottom_left_value,
            self.bottom_right_value,
            self.top_right_value,
            self.top_left_value,
        ]
    }
}

/// Configuration of `square` against `threshold`.
///
/// A corner exactly at the threshold counts as inside.
#[must_use]
#[inline]
pub fn classify(square: &GridSquare, threshold: f32) -> CaseIndex {
    CaseIndex::from_corners(
        square.bottom_left_value >= threshold,
        square.bottom_right_value >= threshold,
        square.top_right_value >= threshold,
        square.top_left_value >= threshold,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(bl: f32, br: f32, tl: f32, tr: f32) -> GridSquare {
        GridSquare::with_values(Vec2::ZERO, 1.0, bl, br, tl, tr)
    }

    #[test]
    fn test_corner_positions() {
        let s = GridSquare::new(2, 3, Vec2::new(3.0, 2.0), 0.5);
        assert_eq!(s.bottom_right_corner(), Vec2::new(3.5, 2.0));
        assert_eq!(s.top_left_corner(), Vec2::new(3.0, 2.5));
        assert_eq!(s.top_right_corner(), Vec2::new(3.5, 2.5));
        assert_eq!((s.row(), s.column()), (2, 3));
        assert!(s.left_neighbour().is_none() && s.bottom_neighbour().is_none());
    }

    #[test]
    fn test_classify_bit_order() {
        assert_eq!(classify(&square(1.0, 0.0, 0.0, 0.0), 0.5).value(), 1);
        assert_eq!(classify(&square(0.0, 1.0, 0.0, 0.0), 0.5).value(), 2);
        assert_eq!(classify(&square(0.0, 0.0, 0.0, 1.0), 0.5).value(), 4);
        assert_eq!(classify(&square(0.0, 0.0, 1.0, 0.0), 0.5).value(), 8);
        assert_eq!(classify(&square(1.0, 0.0, 0.0, 1.0), 0.5).value(), 5);
        assert_eq!(classify(&square(0.0, 1.0, 1.0, 0.0), 0.5).value(), 10);
    }

    #[test]
    fn test_classify_threshold_inclusive() {
        assert_eq!(classify(&square(0.5, 0.5, 0.5, 0.5), 0.5), CaseIndex::FULL);
        assert_eq!(
            classify(&square(0.49, 0.49, 0.49, 0.49), 0.5),
            CaseIndex::EMPTY
        );
    }

    #[test]
    fn test_classify_is_pure() {
        let s = square(0.2, 1.7, -3.0, 0.9);
        let first = classify(&s, 0.8);
        let second = classify(&s, 0.8);
        assert_eq!(first, second);
        assert_eq!(first.value(), 0b0110);
    }
}
