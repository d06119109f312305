//! Fixed-capacity contour mesh accumulator.
//!
//! Buffers are allocated once and reused every pass: `reset` rewinds the live
//! counts, `append_cell` writes in place, and `finalize` zeroes whatever the
//! previous pass left past the live counts before handing the arrays out.

use glam::{Vec2, Vec3};

use crate::config::validate_threshold;
use crate::error::Result;
use crate::grid::Grid;
use crate::marching_squares::{
    classify, local_to_world, resolve_vertex, AmbiguousResolution, CaseIndex, CaseTable, EdgeMode,
    GridSquare, MAX_INDICES_PER_CELL, MAX_VERTICES_PER_CELL,
};

/// Vertex and index slots reserved by a builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshCapacity {
    pub vertices: usize,
    pub indices: usize,
}

impl MeshCapacity {
    pub fn new(vertices: usize, indices: usize) -> Self {
        Self { vertices, indices }
    }

    /// Enough for any configuration in every cell.
    pub fn worst_case(cell_count: usize) -> Self {
        Self {
            vertices: cell_count * MAX_VERTICES_PER_CELL,
            indices: cell_count * MAX_INDICES_PER_CELL,
        }
    }

    /// Budget for one sparse surface such as metaballs: three vertices per cell,
    /// rounded up to a whole triangle, with twice that for indices.
    ///
    /// A dense field can exceed this; size with [`MeshCapacity::worst_case`]
    /// when coverage is unknown.
    pub fn single_surface(cell_count: usize) -> Self {
        let mut vertices = 3 * cell_count;
        vertices += 3 - (vertices % 3);
        Self {
            vertices,
            indices: vertices * 2,
        }
    }
}

/// Finalized mesh ready for upload.
///
/// The slices span the whole capacity; everything past the live counts is zero.
#[derive(Clone, Copy, Debug)]
pub struct ContourMesh<'a> {
    pub vertices: &'a [Vec3],
    pub indices: &'a [u32],
    pub vertex_count: usize,
    pub index_count: usize,
}

impl<'a> ContourMesh<'a> {
    pub fn live_vertices(&self) -> &'a [Vec3] {
        &self.vertices[..self.vertex_count]
    }

    pub fn live_indices(&self) -> &'a [u32] {
        &self.indices[..self.index_count]
    }

    pub fn triangle_count(&self) -> usize {
        self.index_count / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }
}

/// Accumulates one iso-surface over many cells into reusable buffers.
pub struct ContourMeshBuilder {
    table: &'static CaseTable,
    threshold: f32,
    edge_mode: EdgeMode,

    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    vertex_count: usize,
    index_count: usize,
}

impl ContourMeshBuilder {
    pub fn new(
        threshold: f32,
        capacity: MeshCapacity,
        resolution: AmbiguousResolution,
        edge_mode: EdgeMode,
    ) -> Result<Self> {
        validate_threshold(0, threshold)?;
        Ok(Self {
            table: CaseTable::shared(resolution),
            threshold,
            edge_mode,
            vertices: vec![Vec3::ZERO; capacity.vertices],
            indices: vec![0; capacity.indices],
            vertex_count: 0,
            index_count: 0,
        })
    }

    /// Rewind the live counts. The arrays keep their contents until overwritten
    /// or zeroed by [`ContourMeshBuilder::finalize`].
    pub fn reset(&mut self) {
        self.vertex_count = 0;
        self.index_count = 0;
    }

    /// Append the template for `case` positioned at `square`.
    ///
    /// # Panics
    /// If the builder's capacity cannot hold the template. Capacity is a sizing
    /// contract with the caller, not a runtime condition.
    pub fn append_cell(&mut self, case: CaseIndex, square: &GridSquare, world_offset: Vec2) {
        let table = self.table;
        let template = table.template(case);
        if template.is_empty() {
            return;
        }

        let vertex_end = self.vertex_count + template.vertices.len();
        let index_end = self.index_count + template.indices.len();
        assert!(
            vertex_end <= self.vertices.len() && index_end <= self.indices.len(),
            "contour mesh capacity exceeded at cell ({}, {}): need {} vertices / {} indices, have {} / {}",
            square.column(),
            square.row(),
            vertex_end,
            index_end,
            self.vertices.len(),
            self.indices.len()
        );

        let base = self.vertex_count as u32;
        for (slot, &index) in self.indices[self.index_count..index_end]
            .iter_mut()
            .zip(template.indices)
        {
            *slot = index + base;
        }

        for (slot, &vertex) in self.vertices[self.vertex_count..vertex_end]
            .iter_mut()
            .zip(template.vertices)
        {
            let local = resolve_vertex(vertex, square, self.threshold, self.edge_mode);
            *slot = local_to_world(local, square, world_offset).extend(0.0);
        }

        self.vertex_count = vertex_end;
        self.index_count = index_end;
    }

    /// Classify `square` against this builder's threshold and append it.
    #[inline]
    pub fn append_square(&mut self, square: &GridSquare, world_offset: Vec2) -> CaseIndex {
        let case = classify(square, self.threshold);
        self.append_cell(case, square, world_offset);
        case
    }

    /// Zero the unused tail and expose the buffers.
    pub fn finalize(&mut self) -> ContourMesh<'_> {
        self.vertices[self.vertex_count..].fill(Vec3::ZERO);
        self.indices[self.index_count..].fill(0);

        log::trace!(
            "[contour_mesh] threshold={} verts={} tris={}",
            self.threshold,
            self.vertex_count,
            self.index_count / 3
        );

        self.mesh()
    }

    /// Full pass over `grid`: reset, append every square, finalize.
    pub fn extract(&mut self, grid: &Grid, world_offset: Vec2) -> ContourMesh<'_> {
        self.reset();
        for square in grid.iter() {
            self.append_square(square, world_offset);
        }
        self.finalize()
    }

    /// Current buffers without zeroing; tails may hold stale data until finalized.
    pub fn mesh(&self) -> ContourMesh<'_> {
        ContourMesh {
            vertices: &self.vertices,
            indices: &self.indices,
            vertex_count: self.vertex_count,
            index_count: self.index_count,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn edge_mode(&self) -> EdgeMode {
        self.edge_mode
    }

    pub fn table(&self) -> &'static CaseTable {
        self.table
    }

    pub fn capacity(&self) -> MeshCapacity {
        MeshCapacity::new(self.vertices.len(), self.indices.len())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }
}
