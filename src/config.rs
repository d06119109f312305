//! Contour scene configuration.
//!
//! Everything here is validated before a grid is built, so the per-frame path
//! never has to deal with bad input.

use glam::Vec2;

use crate::error::{ContourError, Result};
use crate::marching_squares::{AmbiguousResolution, EdgeMode};

/// Upper bound on cells in one grid; larger layouts are rejected as configuration errors.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Layout of a grid: cell size and cell counts per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub origin: Vec2,
    pub cell_size: f32,
    pub width: usize,
    pub height: usize,
}

impl GridLayout {
    /// Layout covering `world_width` x `world_height` with `resolution` cells
    /// along the shorter axis. One extra cell per axis keeps the far edges covered.
    pub fn covering(origin: Vec2, world_width: f32, world_height: f32, resolution: u32) -> Result<Self> {
        if resolution == 0 {
            return Err(ContourError::ZeroResolution);
        }
        if !(world_width.is_finite() && world_height.is_finite())
            || world_width <= 0.0
            || world_height <= 0.0
        {
            return Err(ContourError::InvalidExtents {
                width: world_width,
                height: world_height,
            });
        }

        let cell_size = world_width.min(world_height) / resolution as f32;
        Self::sized(origin, world_width, world_height, cell_size, 1)
    }

    /// Layout with fixed-size cells covering the given extents, padded by
    /// `padding` cells per axis.
    pub fn fixed_cells(
        origin: Vec2,
        world_width: f32,
        world_height: f32,
        cell_size: f32,
        padding: usize,
    ) -> Result<Self> {
        if !(world_width.is_finite() && world_height.is_finite())
            || world_width <= 0.0
            || world_height <= 0.0
        {
            return Err(ContourError::InvalidExtents {
                width: world_width,
                height: world_height,
            });
        }
        Self::sized(origin, world_width, world_height, cell_size, padding)
    }

    fn sized(
        origin: Vec2,
        world_width: f32,
        world_height: f32,
        cell_size: f32,
        padding: usize,
    ) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(ContourError::InvalidCellSize(cell_size));
        }

        let columns = (world_width / cell_size).ceil() as f64 + padding as f64;
        let rows = (world_height / cell_size).ceil() as f64 + padding as f64;
        let cells = columns * rows;
        if !cells.is_finite() || cells > MAX_GRID_CELLS as f64 {
            return Err(ContourError::GridTooLarge { cells });
        }

        let layout = Self {
            origin,
            cell_size,
            width: columns as usize,
            height: rows as usize,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check dimensions, cell size and total cell count.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ContourError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ContourError::InvalidCellSize(self.cell_size));
        }
        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(()),
            _ => Err(ContourError::GridTooLarge {
                cells: self.width as f64 * self.height as f64,
            }),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// World position of lattice point (`column`, `row`).
    ///
    /// Every corner of every cell comes from here, so a point shared by
    /// neighbouring cells is computed identically for each of them.
    #[inline]
    pub fn lattice_point(&self, column: usize, row: usize) -> Vec2 {
        self.origin + Vec2::new(column as f32, row as f32) * self.cell_size
    }
}

/// Configuration for contour extraction over one grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourConfig {
    /// Cells along the shorter world axis.
    pub resolution: u32,
    pub world_width: f32,
    pub world_height: f32,
    pub origin: Vec2,
    /// One surface is extracted per threshold.
    pub thresholds: Vec<f32>,
    pub ambiguous_resolution: AmbiguousResolution,
    pub edge_mode: EdgeMode,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            resolution: 32,
            world_width: 16.0,
            world_height: 9.0,
            origin: Vec2::ZERO,
            thresholds: vec![1.0],
            ambiguous_resolution: AmbiguousResolution::Separated,
            edge_mode: EdgeMode::Interpolated,
        }
    }
}

impl ContourConfig {
    pub fn with_thresholds(mut self, thresholds: impl Into<Vec<f32>>) -> Self {
        self.thresholds = thresholds.into();
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_extents(mut self, world_width: f32, world_height: f32) -> Self {
        self.world_width = world_width;
        self.world_height = world_height;
        self
    }

    pub fn with_alternate_ambiguous_cases(mut self, use_alternate: bool) -> Self {
        self.ambiguous_resolution = AmbiguousResolution::from_flag(use_alternate);
        self
    }

    pub fn with_smooth_edges(mut self, smooth_edges: bool) -> Self {
        self.edge_mode = EdgeMode::from_flag(smooth_edges);
        self
    }

    /// Check every field; the first problem found is returned.
    pub fn validate(&self) -> Result<()> {
        self.layout()?;
        validate_thresholds(&self.thresholds)
    }

    /// Grid layout derived from resolution and extents.
    pub fn layout(&self) -> Result<GridLayout> {
        GridLayout::covering(self.origin, self.world_width, self.world_height, self.resolution)
    }
}

pub(crate) fn validate_thresholds(thresholds: &[f32]) -> Result<()> {
    if thresholds.is_empty() {
        return Err(ContourError::NoSurfaces);
    }
    for (index, &value) in thresholds.iter().enumerate() {
        validate_threshold(index, value)?;
    }
    Ok(())
}

pub(crate) fn validate_threshold(index: usize, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ContourError::NonFiniteThreshold { index, value })
    }
}

/// Validate a `[min, max]` range used by scene settings.
pub(crate) fn validate_range(name: &'static str, min: f32, max: f32) -> Result<()> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ContourError::InvalidRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ContourConfig::default().validate().is_ok());
    }

    #[test]
    fn test_layout_uses_shorter_axis() {
        let layout = GridLayout::covering(Vec2::ZERO, 16.0, 8.0, 4).unwrap();
        assert_eq!(layout.cell_size, 2.0);
        assert_eq!(layout.width, 9);
        assert_eq!(layout.height, 5);
        assert_eq!(layout.cell_count(), 45);
    }

    #[test]
    fn test_fixed_cell_layout() {
        let layout = GridLayout::fixed_cells(Vec2::ZERO, 10.0, 7.0, 2.0, 2).unwrap();
        assert_eq!((layout.width, layout.height), (7, 6));
    }

    #[test]
    fn test_huge_extents_rejected() {
        assert!(matches!(
            GridLayout::covering(Vec2::ZERO, 1e30, 1e-30, 1),
            Err(ContourError::GridTooLarge { .. })
        ));
        assert!(matches!(
            GridLayout::fixed_cells(Vec2::ZERO, 1e6, 1e6, 0.01, 2),
            Err(ContourError::GridTooLarge { .. })
        ));
        assert!(matches!(
            ContourConfig::default().with_resolution(u32::MAX).validate(),
            Err(ContourError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_layout_validate_overflowing_dimensions() {
        let layout = GridLayout {
            origin: Vec2::ZERO,
            cell_size: 1.0,
            width: usize::MAX,
            height: 2,
        };
        assert!(matches!(
            layout.validate(),
            Err(ContourError::GridTooLarge { .. })
        ));
        assert_eq!(layout.cell_count(), usize::MAX);
    }

    #[test]
    fn test_lattice_point() {
        let layout = GridLayout::fixed_cells(Vec2::new(0.3, 0.7), 1.0, 1.0, 0.1, 0).unwrap();
        assert_eq!(
            layout.lattice_point(3, 4),
            Vec2::new(0.3, 0.7) + Vec2::new(3.0, 4.0) * 0.1
        );
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let config = ContourConfig::default().with_resolution(0);
        assert_eq!(config.validate(), Err(ContourError::ZeroResolution));
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        let config = ContourConfig::default().with_thresholds(vec![1.0, f32::INFINITY]);
        assert!(matches!(
            config.validate(),
            Err(ContourError::NonFiniteThreshold { index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_thresholds_rejected() {
        let config = ContourConfig::default().with_thresholds(Vec::new());
        assert_eq!(config.validate(), Err(ContourError::NoSurfaces));
    }

    #[test]
    fn test_bad_extents_rejected() {
        let config = ContourConfig::default().with_extents(-1.0, 4.0);
        assert!(matches!(
            config.validate(),
            Err(ContourError::InvalidExtents { .. })
        ));
        assert_eq!(
            GridLayout::fixed_cells(Vec2::ZERO, 4.0, 4.0, 0.0, 0),
            Err(ContourError::InvalidCellSize(0.0))
        );
    }

    #[test]
    fn test_builder_flags() {
        let config = ContourConfig::default()
            .with_alternate_ambiguous_cases(true)
            .with_smooth_edges(false);
        assert_eq!(config.ambiguous_resolution, AmbiguousResolution::Connected);
        assert_eq!(config.edge_mode, EdgeMode::Flat);
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("radius", 0.5, 1.5).is_ok());
        assert!(validate_range("radius", 1.5, 0.5).is_err());
        assert!(validate_range("speed", f32::NAN, 1.0).is_err());
    }
}
