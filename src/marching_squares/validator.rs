use std::collections::HashMap;

use super::cases::CaseTable;
use super::types::*;

/// Result of validating a single case template.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Indices that point past the template's vertex list.
    pub bad_indices: Vec<u32>,
    /// Triangles (by position in the index list) with non-positive signed area.
    pub clockwise_triangles: Vec<usize>,
    /// Open edges inside the cell that do not join two edge midpoints.
    pub stray_edges: Vec<(LocalVertex, LocalVertex)>,
    pub is_valid: bool,
}

/// Canonical undirected edge key: (A,B) == (B,A).
#[derive(Hash, Eq, PartialEq, Clone, Copy)]
struct EdgeKey([u8; 4]);

fn make_edge_key(a: LocalVertex, b: LocalVertex) -> EdgeKey {
    let ka = [a.x, a.y];
    let kb = [b.x, b.y];
    if ka < kb {
        EdgeKey([ka[0], ka[1], kb[0], kb[1]])
    } else {
        EdgeKey([kb[0], kb[1], ka[0], ka[1]])
    }
}

/// Both endpoints on the same side of the cell square.
fn is_perimeter_edge(a: LocalVertex, b: LocalVertex) -> bool {
    (a.x == 0 && b.x == 0)
        || (a.x == MAX_VERTEX_VALUE && b.x == MAX_VERTEX_VALUE)
        || (a.y == 0 && b.y == 0)
        || (a.y == MAX_VERTEX_VALUE && b.y == MAX_VERTEX_VALUE)
}

fn signed_area_x2(tri: [LocalVertex; 3]) -> i32 {
    let [a, b, c] = tri.map(|v| (v.x as i32, v.y as i32));
    (b.0 - a.0) * (c.1 - a.1) - (c.0 - a.0) * (b.1 - a.1)
}

/// Count how many triangles use each undirected edge of a template.
fn edge_counts(template: &CaseTemplate) -> HashMap<EdgeKey, (LocalVertex, LocalVertex, usize)> {
    let mut counts = HashMap::new();
    for tri in template.triangles() {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            counts
                .entry(make_edge_key(a, b))
                .or_insert((a, b, 0))
                .2 += 1;
        }
    }
    counts
}

/// Iso-line segments of a template: edges used by one triangle that run
/// through the cell interior. Each joins two edge-midpoint placeholders.
pub fn contour_segments(template: &CaseTemplate) -> Vec<(LocalVertex, LocalVertex)> {
    let mut segments: Vec<_> = edge_counts(template)
        .into_values()
        .filter(|&(a, b, count)| count == 1 && !is_perimeter_edge(a, b))
        .map(|(a, b, _)| if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) })
        .collect();
    segments.sort_by_key(|&(a, b)| make_edge_key(a, b).0);
    segments
}

/// Validate index bounds, counter-clockwise winding and contour edges.
pub fn validate_template(template: &CaseTemplate) -> ValidationResult {
    let mut result = ValidationResult::default();

    result.bad_indices = template
        .indices
        .iter()
        .copied()
        .filter(|&i| i as usize >= template.vertices.len())
        .collect();
    if !result.bad_indices.is_empty() {
        return result;
    }

    for (i, tri) in template.triangles().enumerate() {
        if signed_area_x2(tri) <= 0 {
            result.clockwise_triangles.push(i);
        }
    }

    result.stray_edges = contour_segments(template)
        .into_iter()
        .filter(|&(a, b)| !(a.is_edge_midpoint() && b.is_edge_midpoint()))
        .collect();

    result.is_valid = result.clockwise_triangles.is_empty() && result.stray_edges.is_empty();
    result
}

/// Validate every template of `table`, returning the failing cases.
pub fn validate_table(table: &CaseTable) -> Vec<(CaseIndex, ValidationResult)> {
    table
        .iter()
        .map(|(case, template)| (case, validate_template(template)))
        .filter(|(_, result)| !result.is_valid)
        .collect()
}
