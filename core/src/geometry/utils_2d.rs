//! 2D geometry utilities for the shape graph.
//!
//! Pure functions over `[f64; 2]` points in the drawing surface's pixel space.
//! Positions are kept as plain arrays in the store; nalgebra is used where
//! vector arithmetic reads better.

use super::{from_point, to_point, Vector2, EPSILON};

// =============================================================================
// Point Operations
// =============================================================================

/// Check if two 2D points are approximately equal within EPSILON.
#[inline]
pub fn points_equal(p1: [f64; 2], p2: [f64; 2]) -> bool {
    (p1[0] - p2[0]).abs() < EPSILON && (p1[1] - p2[1]).abs() < EPSILON
}

/// Compute squared distance between two 2D points.
#[inline]
pub fn distance_squared(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    let dx = p2[0] - p1[0];
    let dy = p2[1] - p1[1];
    dx * dx + dy * dy
}

/// Compute distance between two 2D points.
#[inline]
pub fn distance(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    distance_squared(p1, p2).sqrt()
}

/// Midpoint between two 2D points.
#[inline]
pub fn midpoint(p1: [f64; 2], p2: [f64; 2]) -> [f64; 2] {
    [(p1[0] + p2[0]) / 2.0, (p1[1] + p2[1]) / 2.0]
}

/// Translate a point by a delta.
#[inline]
pub fn offset(p: [f64; 2], delta: [f64; 2]) -> [f64; 2] {
    [p[0] + delta[0], p[1] + delta[1]]
}

// =============================================================================
// Grid Quantization
// =============================================================================

/// Round a scalar to the nearest multiple of `grid`.
///
/// A non-finite or non-positive grid leaves the value untouched.
#[inline]
pub fn round_to_grid(value: f64, grid: f64) -> f64 {
    if !grid.is_finite() || grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}

/// Round both coordinates of a point to the nearest grid intersection.
#[inline]
pub fn snap_to_grid(p: [f64; 2], grid: f64) -> [f64; 2] {
    [round_to_grid(p[0], grid), round_to_grid(p[1], grid)]
}

// =============================================================================
// Polar Operations
// =============================================================================

/// Direction from `from` to `to` in degrees, in the range (-180, 180].
pub fn angle_degrees(from: [f64; 2], to: [f64; 2]) -> f64 {
    let d = to_point(to) - to_point(from);
    let deg = d.y.atan2(d.x).to_degrees();
    // atan2 yields -180 for a negative-zero dy
    if deg <= -180.0 {
        deg + 360.0
    } else {
        deg
    }
}

/// Point at `length` from `anchor` along `angle_deg`.
///
/// Negative lengths reflect through the anchor; zero collapses onto it.
pub fn polar_offset(anchor: [f64; 2], length: f64, angle_deg: f64) -> [f64; 2] {
    let theta = angle_deg.to_radians();
    let dir = Vector2::new(theta.cos(), theta.sin());
    from_point(&(to_point(anchor) + dir * length))
}

// =============================================================================
// Polygon Operations
// =============================================================================

/// Compute signed area of a polygon (positive = CCW in a y-up frame).
pub fn polygon_signed_area(vertices: &[[f64; 2]]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i][0] * vertices[j][1];
        area -= vertices[j][0] * vertices[i][1];
    }
    area / 2.0
}

/// Compute centroid of a polygon.
///
/// Falls back to the vertex average for degenerate (zero-area) polygons.
pub fn polygon_centroid(vertices: &[[f64; 2]]) -> [f64; 2] {
    let n = vertices.len();
    if n == 0 {
        return [0.0, 0.0];
    }
    if n == 1 {
        return vertices[0];
    }
    if n == 2 {
        return midpoint(vertices[0], vertices[1]);
    }

    let mut signed_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for i in 0..n {
        let j = (i + 1) % n;
        let cross = vertices[i][0] * vertices[j][1] - vertices[j][0] * vertices[i][1];
        signed_area += cross;
        cx += (vertices[i][0] + vertices[j][0]) * cross;
        cy += (vertices[i][1] + vertices[j][1]) * cross;
    }

    signed_area /= 2.0;

    if signed_area.abs() < EPSILON {
        let sum = vertices
            .iter()
            .fold([0.0, 0.0], |acc, p| [acc[0] + p[0], acc[1] + p[1]]);
        return [sum[0] / n as f64, sum[1] / n as f64];
    }

    [cx / (6.0 * signed_area), cy / (6.0 * signed_area)]
}

// =============================================================================
// Tests
// =============================================================================
