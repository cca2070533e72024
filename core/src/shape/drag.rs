//! Scoped state for one pointer drag.
//!
//! Anchor positions are captured when the drag starts and discarded when it
//! ends; nothing is stashed on the vertices themselves.

use super::merge::MergeOutcome;
use super::snap::SnapCandidate;
use crate::topo::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragSession {
    Vertex {
        vertex: VertexId,
        anchor: [f64; 2],
        /// Recomputed on every move event
        snap_target: Option<SnapCandidate>,
    },
    Edge {
        edge: EdgeId,
        v1: VertexId,
        v2: VertexId,
        anchors: [[f64; 2]; 2],
    },
}

impl DragSession {
    pub fn snap_target(&self) -> Option<&SnapCandidate> {
        match self {
            DragSession::Vertex { snap_target, .. } => snap_target.as_ref(),
            DragSession::Edge { .. } => None,
        }
    }

    pub fn involves_vertex(&self, id: VertexId) -> bool {
        match self {
            DragSession::Vertex { vertex, snap_target, .. } => {
                *vertex == id || snap_target.map(|t| t.vertex) == Some(id)
            }
            DragSession::Edge { v1, v2, .. } => *v1 == id || *v2 == id,
        }
    }

    pub fn involves_edge(&self, id: EdgeId) -> bool {
        matches!(self, DragSession::Edge { edge, .. } if *edge == id)
    }
}

/// Feedback for the drawing surface after a vertex move event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragFeedback {
    /// Stored, grid-rounded position
    pub position: [f64; 2],
    /// Where to draw the vertex (the snap target's position while snapping)
    pub displayed: [f64; 2],
    pub snap_target: Option<VertexId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragOutcome {
    Moved,
    Merged(MergeOutcome),
}
