//! Marching-squares iso-contouring of 2D scalar fields.
//!
//! A [`Grid`] samples a [`ScalarField`] at its lattice points, every cell is
//! classified into one of 16 configurations, and a [`ContourMeshBuilder`]
//! turns the configurations into triangles in fixed, reusable buffers.
//! [`ContourMap`] layers several thresholds over one grid; [`TileMap`] renders
//! the same classification as atlas tiles instead.

pub mod config;
pub mod contour_map;
pub mod error;
pub mod field;
pub mod grid;
pub mod marching_squares;
pub mod mesh_builder;
pub mod noise_field;
pub mod tile_atlas;
pub mod tile_map;

pub use config::{ContourConfig, GridLayout};
pub use contour_map::{ContourLayer, ContourMap};
pub use error::{ContourError, Result};
pub use field::ScalarField;
pub use grid::Grid;
pub use marching_squares::{classify, AmbiguousResolution, CaseIndex, CaseTable, EdgeMode, GridSquare};
pub use mesh_builder::{ContourMesh, ContourMeshBuilder, MeshCapacity};
pub use tile_atlas::{TileAtlas, TileMeshBuilder};
pub use tile_map::{TileMap, TileMapSettings};
