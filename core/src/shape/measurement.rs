//! Derived edge measurements and parametric edge edits.
//!
//! Length and angle are always recomputed from the two vertices' stored
//! positions; nothing is cached. Edits keep v1 fixed and move v2.

use super::store::GraphStore;
use super::types::EdgeParams;
use crate::error::{ShapeError, ShapeResult};
use crate::geometry::utils_2d::{angle_degrees, distance, polar_offset};
use crate::topo::{EdgeId, VertexId};

fn endpoints(store: &GraphStore, edge: EdgeId) -> ShapeResult<(VertexId, [f64; 2], VertexId, [f64; 2])> {
    let e = store.edge(edge).ok_or(ShapeError::InvalidEdgeReference(edge))?;
    Ok((e.v1, store.position(e.v1)?, e.v2, store.position(e.v2)?))
}

/// Distance from v1 to v2.
pub fn edge_length(store: &GraphStore, edge: EdgeId) -> ShapeResult<f64> {
    let (_, p1, _, p2) = endpoints(store, edge)?;
    Ok(distance(p1, p2))
}

/// Direction from v1 to v2 in degrees, range (-180, 180].
pub fn edge_angle(store: &GraphStore, edge: EdgeId) -> ShapeResult<f64> {
    let (_, p1, _, p2) = endpoints(store, edge)?;
    Ok(angle_degrees(p1, p2))
}

pub fn edge_params(store: &GraphStore, edge: EdgeId) -> ShapeResult<EdgeParams> {
    let (_, p1, _, p2) = endpoints(store, edge)?;
    Ok(EdgeParams {
        length: distance(p1, p2),
        angle: angle_degrees(p1, p2),
    })
}

impl GraphStore {
    /// Moves v2 so the edge has `length`, keeping its current direction.
    /// Zero or negative lengths are applied as-is. Returns the moved vertex.
    pub fn set_edge_length(&mut self, edge: EdgeId, length: f64) -> ShapeResult<VertexId> {
        let (_, p1, v2, p2) = endpoints(self, edge)?;
        let target = polar_offset(p1, length, angle_degrees(p1, p2));
        self.move_vertex(v2, target)?;
        Ok(v2)
    }

    /// Moves v2 so the edge points along `angle_deg`, keeping its current
    /// length. Returns the moved vertex.
    pub fn set_edge_angle(&mut self, edge: EdgeId, angle_deg: f64) -> ShapeResult<VertexId> {
        let (_, p1, v2, p2) = endpoints(self, edge)?;
        let target = polar_offset(p1, distance(p1, p2), angle_deg);
        self.move_vertex(v2, target)?;
        Ok(v2)
    }
}
