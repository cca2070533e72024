use crate::topo::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};

/// Default merge distance, in drawing-surface pixels.
pub const DEFAULT_SNAP_DISTANCE: f64 = 10.0;
/// Default drag quantization step, in drawing-surface pixels.
pub const DEFAULT_GRID_SIZE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    /// Stored position in the drawing surface's pixel space.
    pub position: [f64; 2],
}

/// An undirected connection between two vertices.
///
/// `start`/`end` are the rendered endpoint coordinates, kept in step with the
/// vertices by `GraphStore::sync_edges`. They are never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub v1: VertexId,
    pub v2: VertexId,
    pub start: [f64; 2],
    pub end: [f64; 2],
}

impl Edge {
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.v1 == vertex || self.v2 == vertex
    }

    pub fn is_self_loop(&self) -> bool {
        self.v1 == self.v2
    }

    /// The endpoint on the other side of `vertex`, if the edge touches it.
    pub fn opposite(&self, vertex: VertexId) -> Option<VertexId> {
        if self.v1 == vertex {
            Some(self.v2)
        } else if self.v2 == vertex {
            Some(self.v1)
        } else {
            None
        }
    }
}

/// Derived, read-only edge parameters exposed for numeric editing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeParams {
    /// Distance between v1 and v2, in pixels.
    pub length: f64,
    /// Direction from v1 to v2, in degrees, range (-180, 180].
    pub angle: f64,
}

/// While a dragged vertex is within merge distance of another vertex, it is
/// displayed at the target's position. The stored position is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapPreview {
    pub vertex: VertexId,
    pub target: VertexId,
}

/// How a vertex should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexState {
    Normal,
    /// Being dragged onto a snap target; a merge happens on drop.
    Snapping,
}

/// The shaded polygon derived from one detected loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillPolygon {
    /// Loop members in discovery order.
    pub cycle: Vec<VertexId>,
    /// Positions of `cycle`, same order.
    pub points: Vec<[f64; 2]>,
    /// Signed shoelace area of `points`.
    pub area: f64,
    pub centroid: [f64; 2],
}

/// Editor settings. Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// A dragged vertex closer than this (strictly) to another vertex snaps onto it.
    pub snap_distance: f64,
    /// Dragged positions are rounded to multiples of this.
    pub grid_size: f64,
    /// Detect and fill a loop after every change.
    pub auto_fill: bool,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            snap_distance: DEFAULT_SNAP_DISTANCE,
            grid_size: DEFAULT_GRID_SIZE,
            auto_fill: true,
        }
    }
}
