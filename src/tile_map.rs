//! Scrolling tile map over an unbounded noise landscape.
//!
//! The grid never moves. Scrolling shifts the noise sampling window by whole
//! tiles and the leftover fraction is subtracted from every emitted quad, so the
//! map glides smoothly while the lattice stays aligned to tile boundaries.

use glam::Vec2;

use crate::config::{validate_threshold, GridLayout};
use crate::error::Result;
use crate::field::{NoiseField, NoiseSettings};
use crate::grid::Grid;
use crate::marching_squares::classify;
use crate::tile_atlas::{TileAtlas, TileMesh, TileMeshBuilder};

/// Extra tiles per axis beyond the view so scrolling never exposes an edge.
const VIEW_PADDING_TILES: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct TileMapSettings {
    pub view_width: f32,
    pub view_height: f32,
    pub tile_size: f32,
    pub threshold: f32,
    /// View position applied, and drawn once, when the map is created.
    pub start_position: Vec2,
    pub noise: NoiseSettings,
    pub atlas: TileAtlas,
}

impl Default for TileMapSettings {
    fn default() -> Self {
        Self {
            view_width: 16.0,
            view_height: 9.0,
            tile_size: 2.0,
            threshold: 1.0,
            start_position: Vec2::new(30.0, 35.0),
            noise: NoiseSettings::default(),
            atlas: TileAtlas::default(),
        }
    }
}

pub struct TileMap {
    grid: Grid,
    field: NoiseField,
    builder: TileMeshBuilder,
    threshold: f32,
    position: Vec2,
    sub_tile_offset: Vec2,
}

impl TileMap {
    pub fn new(settings: TileMapSettings) -> Result<Self> {
        validate_threshold(0, settings.threshold)?;
        let layout = GridLayout::fixed_cells(
            Vec2::ZERO,
            settings.view_width,
            settings.view_height,
            settings.tile_size,
            VIEW_PADDING_TILES,
        )?;
        let grid = Grid::from_layout(layout)?;
        let field = NoiseField::new(settings.noise)?;
        let builder = TileMeshBuilder::new(settings.atlas, grid.len());

        log::debug!(
            "[tile_map] {}x{} tiles of {:.2}",
            grid.width(),
            grid.height(),
            grid.cell_size()
        );

        let mut map = Self {
            grid,
            field,
            builder,
            threshold: settings.threshold,
            position: Vec2::ZERO,
            sub_tile_offset: Vec2::ZERO,
        };
        map.scroll_to(settings.start_position);
        map.rebuild();
        Ok(map)
    }

    /// Move the view to `position` and return the sub-tile offset.
    ///
    /// Negative coordinates clamp to zero. The noise window snaps to the tile
    /// containing the position; the remainder is the offset applied to quads.
    pub fn scroll_to(&mut self, position: Vec2) -> Vec2 {
        let tile_size = self.grid.cell_size();
        self.position = position.max(Vec2::ZERO);

        let window = (self.position / tile_size).floor() * tile_size;
        self.field.set_offset(window);
        self.sub_tile_offset = self.position - window;
        self.sub_tile_offset
    }

    /// Scroll relative to the current position.
    pub fn scroll_by(&mut self, delta: Vec2) -> Vec2 {
        self.scroll_to(self.position + delta)
    }

    /// Resample the noise under the current window and emit one tile per cell.
    pub fn rebuild(&mut self) -> TileMesh<'_> {
        self.builder.reset();
        self.grid.refresh_corners(&self.field);
        for square in self.grid.iter() {
            let case = classify(square, self.threshold);
            self.builder.draw_case_at(case, square, self.sub_tile_offset);
        }
        self.builder.finalize()
    }

    /// Mesh from the last rebuild.
    pub fn mesh(&self) -> TileMesh<'_> {
        self.builder.mesh()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn sub_tile_offset(&self) -> Vec2 {
        self.sub_tile_offset
    }

    /// World position of the bottom-left of the sampling window.
    pub fn window_origin(&self) -> Vec2 {
        self.field.offset()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}
