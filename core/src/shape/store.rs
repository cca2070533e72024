//! Vertex and edge storage for the shape graph.
//!
//! Vertices live in one owned collection in creation order; edges refer to
//! them by id only. Every mutation leaves the edge endpoints referencing
//! vertices that exist, with no self-loops.

use super::types::{Edge, SnapPreview, Vertex};
use crate::error::{ShapeError, ShapeResult};
use crate::geometry::utils_2d;
use crate::topo::{EdgeId, IdGenerator, VertexId};

#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    // Vec for ordered iteration stability; creation order drives snap
    // tie-breaks and cycle search order. Linear scans are fine at editor sizes.
    pub(super) vertices: Vec<Vertex>,
    pub(super) edges: Vec<Edge>,
    pub(super) ids: IdGenerator,
    pub(super) preview: Option<SnapPreview>,
    /// Bumped whenever the set of vertices or the edge wiring changes.
    pub(super) topology_revision: u64,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose ids are derived from `ids` (use a seeded generator for
    /// reproducible ids).
    pub fn with_generator(ids: IdGenerator) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge(id).is_some()
    }

    /// Stored position of a vertex.
    pub fn position(&self, id: VertexId) -> ShapeResult<[f64; 2]> {
        self.vertex(id)
            .map(|v| v.position)
            .ok_or(ShapeError::InvalidVertexReference(id))
    }

    /// Position a vertex is drawn at: the snap target's position while the
    /// vertex is previewing a merge, otherwise the stored position.
    pub fn displayed_position(&self, id: VertexId) -> ShapeResult<[f64; 2]> {
        let stored = self.position(id)?;
        match self.preview {
            Some(preview) if preview.vertex == id => {
                Ok(self.position(preview.target).unwrap_or(stored))
            }
            _ => Ok(stored),
        }
    }

    pub fn edges_touching(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.touches(vertex))
    }

    pub fn snap_preview(&self) -> Option<SnapPreview> {
        self.preview
    }

    pub fn topology_revision(&self) -> u64 {
        self.topology_revision
    }

    /// True when every edge references live vertices, none is a self-loop, and
    /// every rendered endpoint matches its vertex's displayed position.
    pub fn is_consistent(&self) -> bool {
        self.edges.iter().all(|e| {
            if e.is_self_loop() {
                return false;
            }
            match (self.displayed_position(e.v1), self.displayed_position(e.v2)) {
                (Ok(p1), Ok(p2)) => {
                    utils_2d::points_equal(e.start, p1) && utils_2d::points_equal(e.end, p2)
                }
                _ => false,
            }
        })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Allocates a vertex at `position`. Always succeeds.
    pub fn create_vertex(&mut self, position: [f64; 2]) -> VertexId {
        let id = self.ids.next_vertex_id();
        self.vertices.push(Vertex { id, position });
        self.topology_revision += 1;
        id
    }

    /// Appends an edge between two existing vertices. Parallel edges are kept;
    /// self-loops are rejected.
    pub fn create_edge(&mut self, v1: VertexId, v2: VertexId) -> ShapeResult<EdgeId> {
        let start = self.displayed_position(v1)?;
        let end = self.displayed_position(v2)?;
        if v1 == v2 {
            return Err(ShapeError::SelfLoop(v1));
        }
        let id = self.ids.next_edge_id();
        self.edges.push(Edge { id, v1, v2, start, end });
        self.topology_revision += 1;
        Ok(id)
    }

    /// Updates a vertex position and resyncs every edge that depends on it.
    pub fn move_vertex(&mut self, id: VertexId, position: [f64; 2]) -> ShapeResult<()> {
        let vertex = self
            .vertices
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(ShapeError::InvalidVertexReference(id))?;
        vertex.position = position;
        self.sync_edges(id)?;

        // A vertex previewing onto this one is drawn here too
        if let Some(preview) = self.preview {
            if preview.target == id {
                self.sync_edges(preview.vertex)?;
            }
        }
        Ok(())
    }

    /// Removes a vertex and every edge that references it.
    /// Returns the ids of the removed edges.
    pub fn remove_vertex(&mut self, id: VertexId) -> ShapeResult<Vec<EdgeId>> {
        let index = self
            .vertices
            .iter()
            .position(|v| v.id == id)
            .ok_or(ShapeError::InvalidVertexReference(id))?;
        self.vertices.remove(index);

        let mut removed = Vec::new();
        self.edges.retain(|e| {
            if e.touches(id) {
                removed.push(e.id);
                false
            } else {
                true
            }
        });

        if let Some(preview) = self.preview {
            if preview.vertex == id || preview.target == id {
                self.set_snap_preview(None)?;
            }
        }

        self.topology_revision += 1;
        Ok(removed)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> ShapeResult<()> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or(ShapeError::InvalidEdgeReference(id))?;
        self.edges.remove(index);
        self.topology_revision += 1;
        Ok(())
    }

    /// Recomputes the rendered endpoint of every edge touching `vertex` from
    /// the vertex's displayed position. Returns how many edges were touched.
    pub fn sync_edges(&mut self, vertex: VertexId) -> ShapeResult<usize> {
        let pos = self.displayed_position(vertex)?;
        let mut touched = 0;
        for edge in self.edges.iter_mut() {
            let mut hit = false;
            if edge.v1 == vertex {
                edge.start = pos;
                hit = true;
            }
            if edge.v2 == vertex {
                edge.end = pos;
                hit = true;
            }
            if hit {
                touched += 1;
            }
        }
        Ok(touched)
    }

    /// Sets or clears the snap preview, resyncing the edges of every vertex
    /// whose displayed position changes as a result.
    pub fn set_snap_preview(&mut self, preview: Option<SnapPreview>) -> ShapeResult<()> {
        if let Some(p) = preview {
            if !self.contains_vertex(p.vertex) {
                return Err(ShapeError::InvalidVertexReference(p.vertex));
            }
            if !self.contains_vertex(p.target) {
                return Err(ShapeError::InvalidVertexReference(p.target));
            }
        }

        let previous = std::mem::replace(&mut self.preview, preview);
        if let Some(old) = previous {
            if self.contains_vertex(old.vertex) {
                self.sync_edges(old.vertex)?;
            }
        }
        if let Some(new) = preview {
            self.sync_edges(new.vertex)?;
        }
        Ok(())
    }

    /// Drops every vertex and edge. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.preview = None;
        self.topology_revision += 1;
    }
}
