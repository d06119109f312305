//! Sampling lattice shared by every contour consumer.
//!
//! Cells are stored row-major in one contiguous allocation, bottom row first.
//! Neighbour links are plain indices (`index - 1`, `index - width`), so corner
//! sharing never chases heap pointers.

use glam::Vec2;

use crate::config::GridLayout;
use crate::error::Result;
use crate::field::ScalarField;
use crate::marching_squares::GridSquare;

/// Row-major grid of squares with left/bottom neighbour wiring.
#[derive(Clone, Debug)]
pub struct Grid {
    layout: GridLayout,
    squares: Vec<GridSquare>,
}

impl Grid {
    /// Build a `width` x `height` grid of `cell_size` squares starting at the origin.
    pub fn build(width: usize, height: usize, cell_size: f32) -> Result<Self> {
        Self::from_layout(GridLayout {
            origin: Vec2::ZERO,
            cell_size,
            width,
            height,
        })
    }

    pub fn from_layout(layout: GridLayout) -> Result<Self> {
        layout.validate()?;

        let mut squares = Vec::with_capacity(layout.cell_count());
        for y in 0..layout.height {
            for x in 0..layout.width {
                let index = y * layout.width + x;
                let corners = [
                    layout.lattice_point(x, y),
                    layout.lattice_point(x + 1, y),
                    layout.lattice_point(x + 1, y + 1),
                    layout.lattice_point(x, y + 1),
                ];
                let mut square = GridSquare::with_corners(y, x, corners, layout.cell_size);
                square.left_neighbour = (x > 0).then(|| index - 1);
                square.bottom_neighbour = (y > 0).then(|| index - layout.width);
                squares.push(square);
            }
        }

        log::debug!(
            "[grid] built {}x{} cells of {:.3} at ({:.2}, {:.2})",
            layout.width,
            layout.height,
            layout.cell_size,
            layout.origin.x,
            layout.origin.y
        );

        Ok(Self { layout, squares })
    }

    /// Re-evaluate every corner from `field`, reusing corners already computed
    /// by the left or bottom neighbour.
    ///
    /// Cells are visited row by row from the bottom, left to right, so both
    /// neighbours are always fresh when a cell reads them. The field is sampled
    /// exactly `(width + 1) * (height + 1)` times.
    pub fn refresh_corners<F: ScalarField + ?Sized>(&mut self, field: &F) {
        for index in 0..self.squares.len() {
            let (left, bottom) = {
                let square = &self.squares[index];
                (square.left_neighbour, square.bottom_neighbour)
            };
            let left_values = left.map(|i| {
                let n = &self.squares[i];
                (n.bottom_right_value, n.top_right_value)
            });
            let bottom_values = bottom.map(|i| {
                let n = &self.squares[i];
                (n.top_left_value, n.top_right_value)
            });

            let square = &mut self.squares[index];

            square.bottom_left_value = match (bottom_values, left_values) {
                (Some((top_left, _)), _) => top_left,
                (None, Some((bottom_right, _))) => bottom_right,
                (None, None) => field.sample_at(square.bottom_left_corner()),
            };
            square.bottom_right_value = match bottom_values {
                Some((_, top_right)) => top_right,
                None => field.sample_at(square.bottom_right_corner()),
            };
            square.top_left_value = match left_values {
                Some((_, top_right)) => top_right,
                None => field.sample_at(square.top_left_corner()),
            };
            square.top_right_value = field.sample_at(square.top_right_corner());
        }
    }

    /// Evaluate all four corners of every cell independently.
    ///
    /// Reference path for checking [`Grid::refresh_corners`]; four samples per cell.
    pub fn refresh_corners_unshared<F: ScalarField + ?Sized>(&mut self, field: &F) {
        for square in &mut self.squares {
            square.bottom_left_value = field.sample_at(square.bottom_left_corner());
            square.bottom_right_value = field.sample_at(square.bottom_right_corner());
            square.top_left_value = field.sample_at(square.top_left_corner());
            square.top_right_value = field.sample_at(square.top_right_corner());
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }
    pub fn width(&self) -> usize {
        self.layout.width
    }
    pub fn height(&self) -> usize {
        self.layout.height
    }
    pub fn cell_size(&self) -> f32 {
        self.layout.cell_size
    }
    pub fn len(&self) -> usize {
        self.squares.len()
    }
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn index_of(&self, column: usize, row: usize) -> usize {
        row * self.layout.width + column
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&GridSquare> {
        if column < self.layout.width && row < self.layout.height {
            self.squares.get(self.index_of(column, row))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut GridSquare> {
        if column < self.layout.width && row < self.layout.height {
            let index = self.index_of(column, row);
            self.squares.get_mut(index)
        } else {
            None
        }
    }

    /// Squares in sweep order (bottom row first, left to right).
    pub fn squares(&self) -> &[GridSquare] {
        &self.squares
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridSquare> {
        self.squares.iter()
    }
}
