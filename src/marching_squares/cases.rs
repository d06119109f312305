use glam::{Vec2, Vec3};

use super::types::*;

// ================================
// ===== Case Data ================
// ================================
//
// Local coordinates run 0..2 on each axis; 1 marks an edge midpoint that the
// interpolator moves to the threshold crossing. Triangles are counter-clockwise.

const CASE_1: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 0), lv(0, 1), lv(1, 0)],
    indices: &[0, 2, 1],
};

const CASE_2: CaseTemplate = CaseTemplate {
    vertices: &[lv(1, 0), lv(2, 1), lv(2, 0)],
    indices: &[0, 2, 1],
};

const CASE_3: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 0), lv(0, 1), lv(2, 1), lv(2, 0)],
    indices: &[0, 2, 1, 0, 3, 2],
};

const CASE_4: CaseTemplate = CaseTemplate {
    vertices: &[lv(1, 2), lv(2, 2), lv(2, 1)],
    indices: &[0, 2, 1],
};

// Bottom-left and top-right active.
const CASE_5_SEPARATED: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 0), lv(0, 1), lv(1, 0), lv(1, 2), lv(2, 2), lv(2, 1)],
    indices: &[0, 2, 1, 3, 5, 4],
};

const CASE_5_CONNECTED: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 0), lv(0, 1), lv(1, 2), lv(2, 2), lv(2, 1), lv(1, 0)],
    indices: &[0, 2, 1, 0, 3, 2, 0, 4, 3, 0, 5, 4],
};

const CASE_6: CaseTemplate = CaseTemplate {
    vertices: &[lv(1, 2), lv(2, 2), lv(1, 0), lv(2, 0)],
    indices: &[0, 2, 1, 2, 3, 1],
};

const CASE_7: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 0), lv(0, 1), lv(1, 2), lv(2, 2), lv(2, 0)],
    indices: &[0, 2, 1, 2, 0, 3, 0, 4, 3],
};

const CASE_8: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 1), lv(0, 2), lv(1, 2)],
    indices: &[0, 2, 1],
};

const CASE_9: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 0), lv(0, 2), lv(1, 2), lv(1, 0)],
    indices: &[0, 2, 1, 0, 3, 2],
};

// Bottom-right and top-left active.
const CASE_10_SEPARATED: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 1), lv(0, 2), lv(1, 2), lv(1, 0), lv(2, 1), lv(2, 0)],
    indices: &[0, 2, 1, 3, 5, 4],
};

const CASE_10_CONNECTED: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 1), lv(0, 2), lv(1, 2), lv(2, 1), lv(2, 0), lv(1, 0)],
    indices: &[0, 5, 1, 1, 5, 4, 1, 4, 2, 2, 4, 3],
};

const CASE_11: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 0), lv(0, 2), lv(1, 2), lv(2, 1), lv(2, 0)],
    indices: &[0, 4, 1, 1, 4, 2, 2, 4, 3],
};

const CASE_12: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 1), lv(0, 2), lv(2, 2), lv(2, 1)],
    indices: &[0, 2, 1, 0, 3, 2],
};

const CASE_13: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 0), lv(0, 2), lv(2, 2), lv(2, 1), lv(1, 0)],
    indices: &[0, 2, 1, 0, 3, 2, 0, 4, 3],
};

const CASE_14: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 1), lv(0, 2), lv(2, 2), lv(2, 0), lv(1, 0)],
    indices: &[1, 3, 2, 0, 3, 1, 0, 4, 3],
};

const CASE_15: CaseTemplate = CaseTemplate {
    vertices: &[lv(0, 0), lv(0, 2), lv(2, 2), lv(2, 0)],
    indices: &[0, 2, 1, 0, 3, 2],
};

lazy_static::lazy_static! {
    static ref SEPARATED_TABLE: CaseTable = CaseTable::build(AmbiguousResolution::Separated);
    static ref CONNECTED_TABLE: CaseTable = CaseTable::build(AmbiguousResolution::Connected);
}

// ================================
// ===== Case Table ===============
// ================================

/// Immutable lookup from configuration to template polygon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTable {
    templates: [CaseTemplate; CASE_COUNT],
    resolution: AmbiguousResolution,
}

impl CaseTable {
    /// Build the 16 templates. The ambiguous policy covers both 5 and 10.
    #[must_use]
    pub fn build(resolution: AmbiguousResolution) -> Self {
        let (case_5, case_10) = match resolution {
            AmbiguousResolution::Separated => (CASE_5_SEPARATED, CASE_10_SEPARATED),
            AmbiguousResolution::Connected => (CASE_5_CONNECTED, CASE_10_CONNECTED),
        };

        Self {
            templates: [
                CaseTemplate::EMPTY,
                CASE_1,
                CASE_2,
                CASE_3,
                CASE_4,
                case_5,
                CASE_6,
                CASE_7,
                CASE_8,
                CASE_9,
                case_10,
                CASE_11,
                CASE_12,
                CASE_13,
                CASE_14,
                CASE_15,
            ],
            resolution,
        }
    }

    /// Process-wide cached table for `resolution`.
    #[must_use]
    pub fn shared(resolution: AmbiguousResolution) -> &'static CaseTable {
        match resolution {
            AmbiguousResolution::Separated => &*SEPARATED_TABLE,
            AmbiguousResolution::Connected => &*CONNECTED_TABLE,
        }
    }

    #[must_use]
    #[inline]
    pub fn template(&self, index: CaseIndex) -> &CaseTemplate {
        &self.templates[index.as_usize()]
    }

    #[must_use]
    pub fn resolution(&self) -> AmbiguousResolution {
        self.resolution
    }

    pub fn iter(&self) -> impl Iterator<Item = (CaseIndex, &CaseTemplate)> {
        CaseIndex::all().zip(self.templates.iter())
    }
}

/// Build a table from the boolean policy flag used by scene configuration.
#[must_use]
pub fn build_case_table(use_alternate_ambiguous_resolution: bool) -> CaseTable {
    CaseTable::build(AmbiguousResolution::from_flag(
        use_alternate_ambiguous_resolution,
    ))
}

// ================================
// ===== Case Preview =============
// ================================

const PREVIEW_COLUMNS: usize = 6;
const PREVIEW_ROWS: usize = 3;

/// All 16 templates laid out on one sheet.
#[derive(Clone, Debug, Default)]
pub struct PreviewMesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

/// Lay every template out in a 6-column sheet, first case at the top left.
/// Templates are drawn uninterpolated at `square_size`, separated by `padding`.
pub fn preview_mesh(table: &CaseTable, square_size: f32, padding: f32) -> PreviewMesh {
    let mut mesh = PreviewMesh::default();
    let half = square_size / 2.0;

    for (case, template) in table.iter() {
        let slot = case.as_usize();
        let column = slot % PREVIEW_COLUMNS;
        let row = PREVIEW_ROWS - 1 - slot / PREVIEW_COLUMNS;
        let origin = Vec2::new(
            column as f32 * (square_size + padding) + half,
            row as f32 * (square_size + padding) + half,
        );

        let base = mesh.vertices.len() as u32;
        for v in template.vertices {
            let p = origin + v.as_vec2() * half;
            mesh.vertices.push(p.extend(0.0));
        }
        mesh.indices.extend(template.indices.iter().map(|i| i + base));
    }

    mesh
}
