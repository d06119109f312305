use glam::Vec2;

use super::grid_square::GridSquare;
use super::types::*;

/// Denominators smaller than this are treated as a flat edge.
const MIN_EDGE_DELTA: f32 = 1e-6;

/// Local coordinate of an edge midpoint, used whenever a crossing cannot be solved.
const MIDPOINT_FALLBACK: f32 = MIDPOINT as f32;

// ================================
// ===== Interpolation Helpers ====
// ================================

#[inline]
fn sanitize_float(value: f32, fallback: f32, label: &str, square: &GridSquare) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!(
            "NaN/Inf {} at cell ({}, {}). Using {} fallback.",
            label,
            square.column(),
            square.row(),
            fallback
        );
        fallback
    }
}

/// Crossing of `threshold` between two corner values, scaled to local units 0..2.
#[must_use]
#[inline]
fn edge_crossing(threshold: f32, from: f32, to: f32, label: &str, square: &GridSquare) -> f32 {
    let delta = to - from;
    if delta.abs() < MIN_EDGE_DELTA {
        return MIDPOINT_FALLBACK;
    }
    let t = ((threshold - from) / delta) * MAX_VERTEX_VALUE as f32;
    sanitize_float(t, MIDPOINT_FALLBACK, label, square)
}

// ================================
// ===== Vertex Resolution ========
// ================================

/// Move an edge-midpoint placeholder to where the field crosses `threshold`.
///
/// Corners pass through unchanged, as does every vertex in [`EdgeMode::Flat`].
#[must_use]
pub fn resolve_vertex(
    vertex: LocalVertex,
    square: &GridSquare,
    threshold: f32,
    mode: EdgeMode,
) -> Vec2 {
    let mut point = vertex.as_vec2();
    if mode == EdgeMode::Flat {
        return point;
    }

    match (vertex.x, vertex.y) {
        (0, 1) => {
            point.y = edge_crossing(
                threshold,
                square.bottom_left_value,
                square.top_left_value,
                "left edge",
                square,
            );
        }
        (2, 1) => {
            point.y = edge_crossing(
                threshold,
                square.bottom_right_value,
                square.top_right_value,
                "right edge",
                square,
            );
        }
        (1, 0) => {
            point.x = edge_crossing(
                threshold,
                square.bottom_left_value,
                square.bottom_right_value,
                "bottom edge",
                square,
            );
        }
        (1, 2) => {
            point.x = edge_crossing(
                threshold,
                square.top_left_value,
                square.top_right_value,
                "top edge",
                square,
            );
        }
        _ => {}
    }
    point
}

/// Map a resolved local vertex into world space.
#[must_use]
#[inline]
pub fn local_to_world(local: Vec2, square: &GridSquare, world_offset: Vec2) -> Vec2 {
    world_offset + local * (square.size() / 2.0) + square.bottom_left_corner()
}
