//! Error types for contour configuration.
//!
//! Only configuration-time failures are represented here. Hot-path precondition
//! violations (buffer overflow, case index out of range) panic instead.

use thiserror::Error;

/// Errors raised while validating configuration or building a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContourError {
    /// Resolution must be at least one cell along the shorter axis.
    #[error("grid resolution must be greater than zero")]
    ZeroResolution,

    /// World extents must be finite and strictly positive.
    #[error("world extents must be finite and positive, got {width} x {height}")]
    InvalidExtents { width: f32, height: f32 },

    /// Cell size must be finite and strictly positive.
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f32),

    /// A grid needs at least one cell on each axis.
    #[error("grid dimensions must be non-zero, got {width} x {height}")]
    EmptyGrid { width: usize, height: usize },

    /// A surface threshold was NaN or infinite.
    #[error("threshold {index} is not finite: {value}")]
    NonFiniteThreshold { index: usize, value: f32 },

    /// The layout would need more cells than a grid may hold.
    #[error("grid of {cells} cells exceeds the limit of {} cells", crate::config::MAX_GRID_CELLS)]
    GridTooLarge { cells: f64 },

    /// A contour map needs at least one surface to extract.
    #[error("at least one threshold layer is required")]
    NoSurfaces,

    /// A `[min, max]` range was inverted or non-finite.
    #[error("invalid {name} range [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    /// A texture atlas cannot hold the 16 cases in a 4x4 layout.
    #[error("atlas {texture_width}x{texture_height} cannot hold 4x4 tiles of {tile_width}x{tile_height}")]
    AtlasTooSmall {
        texture_width: u32,
        texture_height: u32,
        tile_width: u32,
        tile_height: u32,
    },

    /// A scalar setting had a value outside its accepted domain.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

pub type Result<T> = std::result::Result<T, ContourError>;
