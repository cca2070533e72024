//! Merge-candidate detection for dragged vertices.
//!
//! While a vertex is dragged, every other vertex within the snap distance is a
//! candidate; the nearest one becomes the snap target. Ties go to the vertex
//! created first.

use super::store::GraphStore;
use crate::error::ShapeResult;
use crate::geometry::utils_2d::distance;
use crate::topo::VertexId;
use serde::{Deserialize, Serialize};

/// A vertex the dragged vertex would merge into if dropped now.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapCandidate {
    pub vertex: VertexId,
    /// Where the dragged vertex is displayed while this candidate is active
    pub position: [f64; 2],
    /// Distance from the dragged vertex's stored position
    pub distance: f64,
}

/// Find every vertex strictly closer than `snap_distance` to `moving`,
/// in vertex creation order.
pub fn find_snap_candidates(
    store: &GraphStore,
    moving: VertexId,
    snap_distance: f64,
) -> ShapeResult<Vec<SnapCandidate>> {
    let origin = store.position(moving)?;

    Ok(store
        .vertices()
        .iter()
        .filter(|v| v.id != moving)
        .filter_map(|v| {
            let d = distance(origin, v.position);
            (d < snap_distance).then_some(SnapCandidate {
                vertex: v.id,
                position: v.position,
                distance: d,
            })
        })
        .collect())
}

/// Nearest candidate within range, or None.
pub fn resolve_snap_target(
    store: &GraphStore,
    moving: VertexId,
    snap_distance: f64,
) -> ShapeResult<Option<SnapCandidate>> {
    let candidates = find_snap_candidates(store, moving, snap_distance)?;
    // min_by keeps the first of equal elements, which is the earliest created
    Ok(candidates
        .into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance)))
}
