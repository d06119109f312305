//! Texture-atlas rendering of classified cells.
//!
//! Instead of interpolated polygons every cell becomes one textured quad whose
//! UVs pick the atlas tile for its configuration. The atlas is a 4x4 sheet:
//! case `c` lives at column `c % 4`, row `c / 4`.

use glam::{Vec2, Vec3};

use crate::error::{ContourError, Result};
use crate::marching_squares::{CaseIndex, GridSquare};

const ATLAS_COLUMNS: u32 = 4;
const ATLAS_ROWS: u32 = 4;

const VERTICES_PER_TILE: usize = 4;
const INDICES_PER_TILE: usize = 6;

/// Unit quad corners: bottom-left, bottom-right, top-left, top-right.
const TILE_CORNERS: [Vec2; VERTICES_PER_TILE] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
];

/// Two counter-clockwise triangles over [`TILE_CORNERS`].
const TILE_INDICES: [u32; INDICES_PER_TILE] = [0, 1, 2, 2, 1, 3];

/// UV rectangle of one atlas tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl UvRect {
    /// UVs in the same order as the quad corners.
    pub fn corners(&self) -> [Vec2; VERTICES_PER_TILE] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            self.max,
        ]
    }
}

/// Pixel layout of the 16-tile atlas texture.
#[derive(Clone, Debug, PartialEq)]
pub struct TileAtlas {
    texture_width: u32,
    texture_height: u32,
    tile_width: u32,
    tile_height: u32,
    /// Inward inset as a fraction of a tile, keeps sampling off the tile seams.
    inset: f32,
}

impl Default for TileAtlas {
    fn default() -> Self {
        Self {
            texture_width: 220,
            texture_height: 220,
            tile_width: 55,
            tile_height: 55,
            inset: 0.01,
        }
    }
}

impl TileAtlas {
    pub fn new(texture_width: u32, texture_height: u32, tile_width: u32, tile_height: u32) -> Result<Self> {
        let too_small = tile_width == 0
            || tile_height == 0
            || tile_width
                .checked_mul(ATLAS_COLUMNS)
                .map_or(true, |needed| texture_width < needed)
            || tile_height
                .checked_mul(ATLAS_ROWS)
                .map_or(true, |needed| texture_height < needed);
        if too_small {
            return Err(ContourError::AtlasTooSmall {
                texture_width,
                texture_height,
                tile_width,
                tile_height,
            });
        }

        Ok(Self {
            texture_width,
            texture_height,
            tile_width,
            tile_height,
            ..Default::default()
        })
    }

    /// Set the inset fraction; must lie in `[0, 0.5)`.
    pub fn with_inset(mut self, inset: f32) -> Result<Self> {
        if !(0.0..0.5).contains(&inset) {
            return Err(ContourError::InvalidParameter {
                name: "atlas inset",
                value: inset,
            });
        }
        self.inset = inset;
        Ok(self)
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn inset(&self) -> f32 {
        self.inset
    }

    /// UV rectangle of the tile drawn for `case`, shrunk by the inset.
    #[must_use]
    pub fn uv_rect(&self, case: CaseIndex) -> UvRect {
        let tile_u = self.tile_width as f32 / self.texture_width as f32;
        let tile_v = self.tile_height as f32 / self.texture_height as f32;
        let inset = Vec2::new(tile_u, tile_v) * self.inset;

        let min = Vec2::new(
            case.atlas_column() as f32 * tile_u,
            case.atlas_row() as f32 * tile_v,
        );
        let max = min + Vec2::new(tile_u, tile_v);

        UvRect {
            min: min + inset,
            max: max - inset,
        }
    }
}

/// Finalized tile mesh. Slices span the full capacity.
#[derive(Clone, Copy, Debug)]
pub struct TileMesh<'a> {
    pub vertices: &'a [Vec3],
    pub uvs: &'a [Vec2],
    pub indices: &'a [u32],
    pub vertex_count: usize,
    pub index_count: usize,
}

impl TileMesh<'_> {
    pub fn tile_count(&self) -> usize {
        self.vertex_count / VERTICES_PER_TILE
    }
}

/// One quad per cell into fixed, reusable buffers.
///
/// Indices never change after construction; only vertices and UVs are
/// rewritten each pass.
pub struct TileMeshBuilder {
    atlas: TileAtlas,
    vertices: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
    vertex_count: usize,
}

impl TileMeshBuilder {
    pub fn new(atlas: TileAtlas, tile_capacity: usize) -> Self {
        let indices = (0..tile_capacity)
            .flat_map(|tile| {
                let base = (tile * VERTICES_PER_TILE) as u32;
                TILE_INDICES.iter().map(move |i| i + base)
            })
            .collect();

        Self {
            atlas,
            vertices: vec![Vec3::ZERO; tile_capacity * VERTICES_PER_TILE],
            uvs: vec![Vec2::ZERO; tile_capacity * VERTICES_PER_TILE],
            indices,
            vertex_count: 0,
        }
    }

    pub fn reset(&mut self) {
        self.vertex_count = 0;
    }

    /// Emit the quad covering `square`, shifted by `-offset`, textured with the
    /// atlas tile for `case`.
    ///
    /// # Panics
    /// If every tile slot is already used.
    pub fn draw_case_at(&mut self, case: CaseIndex, square: &GridSquare, offset: Vec2) {
        let end = self.vertex_count + VERTICES_PER_TILE;
        assert!(
            end <= self.vertices.len(),
            "tile mesh capacity exceeded at cell ({}, {}): {} tiles",
            square.column(),
            square.row(),
            self.vertices.len() / VERTICES_PER_TILE
        );

        let origin = square.bottom_left_corner() - offset;
        for (slot, corner) in self.vertices[self.vertex_count..end].iter_mut().zip(TILE_CORNERS) {
            *slot = (origin + corner * square.size()).extend(0.0);
        }

        let uv = self.atlas.uv_rect(case).corners();
        self.uvs[self.vertex_count..end].copy_from_slice(&uv);

        self.vertex_count = end;
    }

    /// Zero vertex and UV slots past the live count and expose the buffers.
    pub fn finalize(&mut self) -> TileMesh<'_> {
        self.vertices[self.vertex_count..].fill(Vec3::ZERO);
        self.uvs[self.vertex_count..].fill(Vec2::ZERO);
        log::trace!("[tile_mesh] tiles={}", self.vertex_count / VERTICES_PER_TILE);
        self.mesh()
    }

    pub fn mesh(&self) -> TileMesh<'_> {
        TileMesh {
            vertices: &self.vertices,
            uvs: &self.uvs,
            indices: &self.indices,
            vertex_count: self.vertex_count,
            index_count: self.vertex_count / VERTICES_PER_TILE * INDICES_PER_TILE,
        }
    }

    pub fn atlas(&self) -> &TileAtlas {
        &self.atlas
    }

    pub fn tile_capacity(&self) -> usize {
        self.vertices.len() / VERTICES_PER_TILE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_uv_rect_layout() {
        let atlas = TileAtlas::default().with_inset(0.0).unwrap();
        let rect = atlas.uv_rect(CaseIndex::new(6));
        assert!(approx_eq(rect.min, Vec2::new(0.5, 0.25)));
        assert!(approx_eq(rect.max, Vec2::new(0.75, 0.5)));

        let last = atlas.uv_rect(CaseIndex::FULL);
        assert!(approx_eq(last.max, Vec2::ONE));
    }

    #[test]
    fn test_uv_inset_is_fraction_of_tile() {
        let atlas = TileAtlas::default();
        let rect = atlas.uv_rect(CaseIndex::EMPTY);
        // 1% of a quarter-texture tile.
        assert!(approx_eq(rect.min, Vec2::splat(0.0025)));
        assert!(approx_eq(rect.max, Vec2::splat(0.2475)));
    }

    #[test]
    fn test_atlas_validation() {
        assert!(matches!(
            TileAtlas::new(100, 220, 55, 55),
            Err(ContourError::AtlasTooSmall { texture_width: 100, .. })
        ));
        assert!(TileAtlas::new(220, 220, 0, 55).is_err());
        assert!(TileAtlas::new(256, 256, 64, 64).is_ok());
        assert!(TileAtlas::default().with_inset(0.5).is_err());
    }

    #[test]
    fn test_atlas_rejects_tiles_too_large_to_lay_out() {
        assert!(matches!(
            TileAtlas::new(u32::MAX, u32::MAX, 2_000_000_000, 2_000_000_000),
            Err(ContourError::AtlasTooSmall { .. })
        ));
        assert!(TileAtlas::new(u32::MAX, u32::MAX, 55, 2_000_000_000).is_err());
        assert!(TileAtlas::new(u32::MAX, u32::MAX, u32::MAX / 4, u32::MAX / 4).is_ok());
    }

    #[test]
    fn test_prebuilt_indices_ccw() {
        let builder = TileMeshBuilder::new(TileAtlas::default(), 2);
        let mesh = builder.mesh();
        assert_eq!(mesh.indices, &[0, 1, 2, 2, 1, 3, 4, 5, 6, 6, 5, 7]);

        for tri in TILE_INDICES.chunks(3) {
            let [a, b, c] = [
                TILE_CORNERS[tri[0] as usize],
                TILE_CORNERS[tri[1] as usize],
                TILE_CORNERS[tri[2] as usize],
            ];
            assert!((b - a).perp_dot(c - a) > 0.0);
        }
    }

    #[test]
    fn test_draw_case_positions_and_uvs() {
        let mut builder = TileMeshBuilder::new(TileAtlas::default(), 1);
        let square = GridSquare::new(1, 2, Vec2::new(4.0, 2.0), 2.0);
        builder.draw_case_at(CaseIndex::new(5), &square, Vec2::new(0.5, 0.25));
        let mesh = builder.finalize();

        assert_eq!(mesh.tile_count(), 1);
        assert_eq!(mesh.index_count, 6);
        assert_eq!(mesh.vertices[0], Vec3::new(3.5, 1.75, 0.0));
        assert_eq!(mesh.vertices[3], Vec3::new(5.5, 3.75, 0.0));

        let expected = TileAtlas::default().uv_rect(CaseIndex::new(5)).corners();
        assert_eq!(&mesh.uvs[..4], &expected);
    }

    #[test]
    fn test_reset_and_finalize_zero_tails() {
        let mut builder = TileMeshBuilder::new(TileAtlas::default(), 3);
        let square = GridSquare::new(0, 0, Vec2::ONE, 1.0);
        for _ in 0..3 {
            builder.draw_case_at(CaseIndex::FULL, &square, Vec2::ZERO);
        }
        builder.finalize();

        builder.reset();
        builder.draw_case_at(CaseIndex::FULL, &square, Vec2::ZERO);
        let mesh = builder.finalize();
        assert_eq!(mesh.vertex_count, 4);
        assert!(mesh.vertices[4..].iter().all(|v| *v == Vec3::ZERO));
        assert!(mesh.uvs[4..].iter().all(|uv| *uv == Vec2::ZERO));
        assert_eq!(mesh.indices.len(), 18);
    }

    #[test]
    #[should_panic(expected = "tile mesh capacity exceeded")]
    fn test_overflow_panics() {
        let mut builder = TileMeshBuilder::new(TileAtlas::default(), 1);
        let square = GridSquare::new(0, 0, Vec2::ZERO, 1.0);
        builder.draw_case_at(CaseIndex::EMPTY, &square, Vec2::ZERO);
        builder.draw_case_at(CaseIndex::EMPTY, &square, Vec2::ZERO);
    }
}
