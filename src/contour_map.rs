//! Nested iso-contours over one shared grid.
//!
//! The field is sampled once per refresh; every threshold then marches the
//! same corner values into its own reusable mesh buffer. Layers share nothing
//! mutable, so they can be extracted in parallel.

use glam::Vec2;
use rayon::prelude::*;

use crate::config::ContourConfig;
use crate::error::Result;
use crate::field::ScalarField;
use crate::grid::Grid;
use crate::mesh_builder::{ContourMesh, ContourMeshBuilder, MeshCapacity};

/// One extracted surface and the threshold that produced it.
pub struct ContourLayer {
    builder: ContourMeshBuilder,
}

impl ContourLayer {
    pub fn threshold(&self) -> f32 {
        self.builder.threshold()
    }

    /// Mesh from the last march.
    pub fn mesh(&self) -> ContourMesh<'_> {
        self.builder.mesh()
    }

    fn march(&mut self, grid: &Grid, world_offset: Vec2) {
        self.builder.extract(grid, world_offset);
    }
}

/// A grid plus one mesh layer per configured threshold.
pub struct ContourMap {
    config: ContourConfig,
    grid: Grid,
    layers: Vec<ContourLayer>,
    world_offset: Vec2,
}

impl ContourMap {
    pub fn new(config: ContourConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::from_layout(config.layout()?)?;
        let capacity = MeshCapacity::worst_case(grid.len());

        let layers = config
            .thresholds
            .iter()
            .map(|&threshold| {
                ContourMeshBuilder::new(
                    threshold,
                    capacity,
                    config.ambiguous_resolution,
                    config.edge_mode,
                )
                .map(|builder| ContourLayer { builder })
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "[contour_map] {} layers over {}x{} cells (cell size {:.3})",
            layers.len(),
            grid.width(),
            grid.height(),
            grid.cell_size()
        );

        Ok(Self {
            config,
            grid,
            layers,
            world_offset: Vec2::ZERO,
        })
    }

    /// Resample every corner from `field`.
    pub fn refresh<F: ScalarField + ?Sized>(&mut self, field: &F) {
        self.grid.refresh_corners(field);
    }

    /// Rebuild every layer from the current corner values.
    pub fn march(&mut self) {
        let (grid, offset) = (&self.grid, self.world_offset);
        for layer in &mut self.layers {
            layer.march(grid, offset);
        }
    }

    /// As [`ContourMap::march`], one rayon task per layer.
    pub fn march_parallel(&mut self) {
        let (grid, offset) = (&self.grid, self.world_offset);
        self.layers
            .par_iter_mut()
            .for_each(|layer| layer.march(grid, offset));
    }

    /// Refresh from `field` and march every layer.
    pub fn update<F: ScalarField + ?Sized>(&mut self, field: &F) {
        self.refresh(field);
        self.march();
    }

    /// Translation added to every emitted vertex.
    pub fn set_world_offset(&mut self, offset: Vec2) {
        self.world_offset = offset;
    }

    pub fn world_offset(&self) -> Vec2 {
        self.world_offset
    }

    pub fn config(&self) -> &ContourConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layers(&self) -> &[ContourLayer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&ContourLayer> {
        self.layers.get(index)
    }

    pub fn meshes(&self) -> impl Iterator<Item = ContourMesh<'_>> {
        self.layers.iter().map(ContourLayer::mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContourError;
    use crate::field::{MetaballField, MetaballSettings, RadialField};

    fn radial_config() -> ContourConfig {
        ContourConfig::default()
            .with_extents(16.0, 10.0)
            .with_resolution(20)
            .with_thresholds(vec![1.0, 2.5, 4.0])
    }

    #[test]
    fn test_one_layer_per_threshold() {
        let map = ContourMap::new(radial_config()).unwrap();
        let thresholds: Vec<f32> = map.layers().iter().map(|l| l.threshold()).collect();
        assert_eq!(thresholds, vec![1.0, 2.5, 4.0]);
        assert_eq!(map.grid().cell_size(), 0.5);
        assert!(map.meshes().all(|m| m.is_empty()));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = radial_config().with_thresholds(vec![f32::NAN]);
        assert!(matches!(
            ContourMap::new(config),
            Err(ContourError::NonFiniteThreshold { index: 0, .. })
        ));
    }

    #[test]
    fn test_nested_layers_shrink() {
        let mut map = ContourMap::new(radial_config()).unwrap();
        map.update(&RadialField::centred_on(16.0, 10.0));

        let counts: Vec<usize> = map.meshes().map(|m| m.triangle_count()).collect();
        assert!(counts.iter().all(|&c| c > 0), "{:?}", counts);
        assert!(counts[0] > counts[1] && counts[1] > counts[2], "{:?}", counts);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let field = RadialField::centred_on(16.0, 10.0);

        let mut sequential = ContourMap::new(radial_config()).unwrap();
        sequential.refresh(&field);
        sequential.march();

        let mut parallel = ContourMap::new(radial_config()).unwrap();
        parallel.refresh(&field);
        parallel.march_parallel();

        for (a, b) in sequential.meshes().zip(parallel.meshes()) {
            assert_eq!(a.vertex_count, b.vertex_count);
            assert_eq!(a.live_indices(), b.live_indices());
            assert_eq!(a.live_vertices(), b.live_vertices());
        }
    }

    #[test]
    fn test_world_offset_translates_vertices() {
        let field = RadialField::centred_on(16.0, 10.0);
        let mut map = ContourMap::new(radial_config()).unwrap();
        map.update(&field);
        let before: Vec<_> = map.layers()[0].mesh().live_vertices().to_vec();

        map.set_world_offset(Vec2::new(-8.0, -5.0));
        map.march();
        let after = map.layers()[0].mesh().live_vertices();

        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(after) {
            assert!((*a - glam::Vec3::new(8.0, 5.0, 0.0) - *b).length() < 1e-4);
        }
    }

    #[test]
    fn test_vertices_inside_their_cells() {
        let mut map = ContourMap::new(radial_config().with_thresholds(vec![2.0])).unwrap();
        map.update(&RadialField::centred_on(16.0, 10.0));
        let layout = *map.grid().layout();
        let max_x = layout.origin.x + layout.width as f32 * layout.cell_size;
        let max_y = layout.origin.y + layout.height as f32 * layout.cell_size;
        for v in map.layers()[0].mesh().live_vertices() {
            assert!(v.x >= layout.origin.x - 1e-4 && v.x <= max_x + 1e-4);
            assert!(v.y >= layout.origin.y - 1e-4 && v.y <= max_y + 1e-4);
            assert_eq!(v.z, 0.0);
        }
    }

    #[test]
    fn test_metaballs_over_several_ticks() {
        let bounds = Vec2::new(16.0, 9.0);
        let settings = MetaballSettings {
            seed: 7,
            ..Default::default()
        };
        let mut field = MetaballField::random(&settings, bounds).unwrap();
        let config = ContourConfig::default()
            .with_extents(bounds.x, bounds.y)
            .with_resolution(18)
            .with_thresholds(vec![1.0, 2.0]);
        let mut map = ContourMap::new(config).unwrap();

        map.update(&field);
        let first: Vec<_> = map.layers()[0].mesh().live_vertices().to_vec();
        assert!(!first.is_empty());

        for _ in 0..10 {
            field.step(1.0 / 30.0);
            map.update(&field);
            for mesh in map.meshes() {
                assert_eq!(mesh.index_count % 3, 0);
                assert!(mesh.live_vertices().iter().all(|v| v.is_finite()));
                assert!(mesh
                    .live_indices()
                    .iter()
                    .all(|&i| (i as usize) < mesh.vertex_count));
            }
        }

        let last = map.layers()[0].mesh().live_vertices();
        assert_ne!(first.as_slice(), last);
    }
}
