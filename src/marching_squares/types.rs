// =====================
// ===== Constants =====
// =====================

/// Largest local coordinate a template vertex can use. Corners sit at 0 and 2,
/// edge midpoints at 1.
pub const MAX_VERTEX_VALUE: u8 = 2;

/// Local coordinate of an edge-midpoint placeholder.
pub const MIDPOINT: u8 = 1;

/// Number of marching squares configurations.
pub const CASE_COUNT: usize = 16;

/// Most vertices any template emits (ambiguous cases and the hexagon bridge).
pub const MAX_VERTICES_PER_CELL: usize = 6;

/// Most triangle indices any template emits (connected hexagon, 4 triangles).
pub const MAX_INDICES_PER_CELL: usize = 12;

pub(crate) const BOTTOM_LEFT_BIT: u8 = 0b0001;
pub(crate) const BOTTOM_RIGHT_BIT: u8 = 0b0010;
pub(crate) const TOP_RIGHT_BIT: u8 = 0b0100;
pub(crate) const TOP_LEFT_BIT: u8 = 0b1000;

// =====================
// ===== Types  ========
// =====================

/// How configurations 5 and 10 are triangulated. Applies to a whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum AmbiguousResolution {
    #[default]
    Separated, // two disjoint corner triangles
    Connected, // one hexagon bridging through the centre
}

impl AmbiguousResolution {
    pub fn from_flag(use_alternate: bool) -> Self {
        if use_alternate {
            AmbiguousResolution::Connected
        } else {
            AmbiguousResolution::Separated
        }
    }

    pub fn is_alternate(self) -> bool {
        self == AmbiguousResolution::Connected
    }
}

/// Whether edge-midpoint placeholders are moved to the interpolated crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMode {
    #[default]
    Interpolated, // linear crossing along each edge
    Flat, // placeholders stay at the midpoints
}

impl EdgeMode {
    pub fn from_flag(smooth_edges: bool) -> Self {
        if smooth_edges {
            EdgeMode::Interpolated
        } else {
            EdgeMode::Flat
        }
    }
}

/// 4-bit corner configuration of a cell (0-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub struct CaseIndex(u8);

impl CaseIndex {
    pub const EMPTY: CaseIndex = CaseIndex(0);
    pub const FULL: CaseIndex = CaseIndex(15);

    /// Panics if `value` is not a valid configuration.
    #[must_use]
    pub fn new(value: u8) -> Self {
        assert!(
            (value as usize) < CASE_COUNT,
            "case index {} outside 0..{}",
            value,
            CASE_COUNT
        );
        Self(value)
    }

    #[must_use]
    pub fn from_corners(bottom_left: bool, bottom_right: bool, top_right: bool, top_left: bool) -> Self {
        let mut bits = 0;
        if bottom_left {
            bits |= BOTTOM_LEFT_BIT;
        }
        if bottom_right {
            bits |= BOTTOM_RIGHT_BIT;
        }
        if top_right {
            bits |= TOP_RIGHT_BIT;
        }
        if top_left {
            bits |= TOP_LEFT_BIT;
        }
        Self(bits)
    }

    #[must_use]
    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Configurations 5 and 10: diagonal corners agree, adjacent corners differ.
    #[must_use]
    pub fn is_ambiguous(self) -> bool {
        self.0 == 5 || self.0 == 10
    }

    /// Atlas column in a 4-wide tile sheet.
    #[must_use]
    pub fn atlas_column(self) -> u32 {
        (self.0 % 4) as u32
    }

    /// Atlas row in a 4-wide tile sheet.
    #[must_use]
    pub fn atlas_row(self) -> u32 {
        (self.0 / 4) as u32
    }

    pub fn all() -> impl Iterator<Item = CaseIndex> {
        (0..CASE_COUNT as u8).map(CaseIndex)
    }
}

impl From<CaseIndex> for u8 {
    fn from(index: CaseIndex) -> u8 {
        index.0
    }
}

/// Template vertex in cell-local units, each axis one of {0, 1, 2}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalVertex {
    pub x: u8,
    pub y: u8,
}

impl LocalVertex {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Exactly one axis sits on a midpoint.
    #[must_use]
    pub fn is_edge_midpoint(self) -> bool {
        (self.x == MIDPOINT) != (self.y == MIDPOINT)
    }

    #[must_use]
    pub fn is_corner(self) -> bool {
        self.x != MIDPOINT && self.y != MIDPOINT
    }

    #[must_use]
    pub fn as_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Shorthand for the declarative case data.
pub(crate) const fn lv(x: u8, y: u8) -> LocalVertex {
    LocalVertex::new(x, y)
}

/// Template polygon for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseTemplate {
    pub vertices: &'static [LocalVertex],
    pub indices: &'static [u32],
}

impl CaseTemplate {
    pub const EMPTY: CaseTemplate = CaseTemplate {
        vertices: &[],
        indices: &[],
    };

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [LocalVertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_index_bits() {
        assert_eq!(CaseIndex::from_corners(true, false, false, false).value(), 1);
        assert_eq!(CaseIndex::from_corners(false, true, false, false).value(), 2);
        assert_eq!(CaseIndex::from_corners(false, false, true, false).value(), 4);
        assert_eq!(CaseIndex::from_corners(false, false, false, true).value(), 8);
        assert_eq!(CaseIndex::from_corners(true, true, true, true), CaseIndex::FULL);
    }

    #[test]
    #[should_panic(expected = "case index 16")]
    fn test_case_index_out_of_range_panics() {
        let _ = CaseIndex::new(16);
    }

    #[test]
    fn test_ambiguous_cases() {
        let ambiguous: Vec<u8> = CaseIndex::all()
            .filter(|c| c.is_ambiguous())
            .map(u8::from)
            .collect();
        assert_eq!(ambiguous, vec![5, 10]);
    }

    #[test]
    fn test_atlas_position() {
        let c = CaseIndex::new(13);
        assert_eq!(c.atlas_column(), 1);
        assert_eq!(c.atlas_row(), 3);
    }

    #[test]
    fn test_local_vertex_kinds() {
        assert!(lv(0, 1).is_edge_midpoint());
        assert!(lv(1, 2).is_edge_midpoint());
        assert!(lv(2, 2).is_corner());
        assert!(!lv(1, 1).is_edge_midpoint());
        assert!(!lv(1, 1).is_corner());
    }

    #[test]
    fn test_policy_flags() {
        assert_eq!(AmbiguousResolution::from_flag(true), AmbiguousResolution::Connected);
        assert_eq!(AmbiguousResolution::from_flag(false), AmbiguousResolution::Separated);
        assert_eq!(EdgeMode::from_flag(false), EdgeMode::Flat);
        assert_eq!(EdgeMode::default(), EdgeMode::Interpolated);
    }
}
