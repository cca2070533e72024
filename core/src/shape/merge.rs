//! Collapsing one vertex into another.

use super::store::GraphStore;
use crate::error::{ShapeError, ShapeResult};
use crate::topo::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a merge did to the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeOutcome {
    pub removed_vertex: VertexId,
    pub kept_vertex: VertexId,
    /// Edge endpoints re-pointed from the removed vertex to the kept one
    pub rewired_endpoints: usize,
    /// Edges that collapsed into self-loops and were dropped
    pub removed_edges: Vec<EdgeId>,
}

impl GraphStore {
    /// Re-points every edge endpoint on `source` to `target`, removes `source`,
    /// drops the resulting self-loops and resyncs `target`'s edges.
    ///
    /// Both ids are validated before anything changes, so a failed call leaves
    /// the store untouched.
    pub fn merge_vertices(&mut self, source: VertexId, target: VertexId) -> ShapeResult<MergeOutcome> {
        if !self.contains_vertex(source) {
            return Err(ShapeError::InvalidVertexReference(source));
        }
        if !self.contains_vertex(target) {
            return Err(ShapeError::InvalidVertexReference(target));
        }
        if source == target {
            return Err(ShapeError::SelfMerge(source));
        }

        let mut rewired_endpoints = 0;
        for edge in self.edges.iter_mut() {
            if edge.v1 == source {
                edge.v1 = target;
                rewired_endpoints += 1;
            }
            if edge.v2 == source {
                edge.v2 = target;
                rewired_endpoints += 1;
            }
        }

        self.vertices.retain(|v| v.id != source);
        if let Some(preview) = self.preview {
            if preview.vertex == source || preview.target == source {
                self.preview = None;
            }
        }

        let mut removed_edges = Vec::new();
        self.edges.retain(|e| {
            if e.is_self_loop() {
                removed_edges.push(e.id);
                false
            } else {
                true
            }
        });

        self.sync_edges(target)?;
        self.topology_revision += 1;

        debug!(
            "Merged vertex {} into {}: {} endpoints rewired, {} self-loops dropped",
            source,
            target,
            rewired_endpoints,
            removed_edges.len()
        );

        Ok(MergeOutcome {
            removed_vertex: source,
            kept_vertex: target,
            rewired_endpoints,
            removed_edges,
        })
    }
}
