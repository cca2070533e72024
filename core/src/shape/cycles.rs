//! Loop detection and fill polygon construction.
//!
//! A depth-first search over the undirected vertex graph reports the first
//! elementary cycle it meets, in vertex creation order and edge insertion
//! order. Only that one loop is ever filled, even if the graph holds several.

use super::store::GraphStore;
use super::types::FillPolygon;
use crate::geometry::utils_2d::{polygon_centroid, polygon_signed_area};
use crate::topo::VertexId;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Minimum number of vertices for a loop to be filled.
pub const MIN_CYCLE_LEN: usize = 3;

/// Undirected adjacency, neighbors listed in edge insertion order.
/// Parallel edges yield repeated neighbors.
pub fn build_adjacency(store: &GraphStore) -> HashMap<VertexId, Vec<VertexId>> {
    let mut adj: HashMap<VertexId, Vec<VertexId>> = store
        .vertices()
        .iter()
        .map(|v| (v.id, Vec::new()))
        .collect();

    for edge in store.edges() {
        if !adj.contains_key(&edge.v1) || !adj.contains_key(&edge.v2) {
            continue;
        }
        adj.entry(edge.v1).or_default().push(edge.v2);
        adj.entry(edge.v2).or_default().push(edge.v1);
    }
    adj
}

struct Frame {
    vertex: VertexId,
    parent: Option<VertexId>,
    next: usize,
}

/// First cycle found by depth-first search, as the path slice from the
/// revisited vertex to the current one. None if the graph is a forest.
///
/// Iterative, but visits vertices in exactly the order of the recursive
/// formulation: each vertex walks its neighbors in order, skipping the vertex
/// it was reached from.
pub fn find_cycle(store: &GraphStore) -> Option<Vec<VertexId>> {
    let adjacency = build_adjacency(store);
    let mut visited: HashSet<VertexId> = HashSet::new();
    let mut path: Vec<VertexId> = Vec::new();

    for root in store.vertices() {
        if !visited.insert(root.id) {
            continue;
        }
        path.push(root.id);
        let mut stack = vec![Frame { vertex: root.id, parent: None, next: 0 }];

        while let Some(frame) = stack.last_mut() {
            let neighbors = adjacency.get(&frame.vertex).map(Vec::as_slice).unwrap_or(&[]);
            let Some(&neighbor) = neighbors.get(frame.next) else {
                // Exhausted: backtrack
                path.pop();
                stack.pop();
                continue;
            };
            frame.next += 1;

            if Some(neighbor) == frame.parent {
                continue;
            }
            let current = frame.vertex;

            if visited.insert(neighbor) {
                path.push(neighbor);
                stack.push(Frame { vertex: neighbor, parent: Some(current), next: 0 });
            } else if let Some(start) = path.iter().position(|v| *v == neighbor) {
                return Some(path[start..].to_vec());
            }
        }
    }
    None
}

impl FillPolygon {
    /// Builds a fill from a cycle, reading current displayed positions.
    /// None if the cycle is too short or names a vertex that no longer exists.
    pub fn from_cycle(store: &GraphStore, cycle: Vec<VertexId>) -> Option<Self> {
        if cycle.len() < MIN_CYCLE_LEN {
            return None;
        }
        let points = cycle
            .iter()
            .map(|id| store.displayed_position(*id).ok())
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            area: polygon_signed_area(&points),
            centroid: polygon_centroid(&points),
            cycle,
            points,
        })
    }

    /// Recomputes the points from the cycle members' current positions.
    /// Returns false if a member has disappeared.
    pub fn reposition(&mut self, store: &GraphStore) -> bool {
        for (point, id) in self.points.iter_mut().zip(&self.cycle) {
            match store.displayed_position(*id) {
                Ok(p) => *point = p,
                Err(_) => return false,
            }
        }
        self.area = polygon_signed_area(&self.points);
        self.centroid = polygon_centroid(&self.points);
        true
    }
}

/// Holds the single current fill and knows when it must be rebuilt.
///
/// The loop found depends only on topology, so while the store's topology
/// revision is unchanged the existing fill is just repositioned.
#[derive(Debug, Clone, Default)]
pub struct FillTracker {
    fill: Option<FillPolygon>,
    /// Topology revision the current result was computed at.
    revision: Option<u64>,
}

impl FillTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&self) -> Option<&FillPolygon> {
        self.fill.as_ref()
    }

    pub fn clear(&mut self) {
        self.fill = None;
        self.revision = None;
    }

    /// Re-evaluates the fill against the store.
    pub fn refresh(&mut self, store: &GraphStore, auto_fill: bool) -> Option<&FillPolygon> {
        if !auto_fill || store.vertex_count() < MIN_CYCLE_LEN {
            self.clear();
            return None;
        }

        let revision = store.topology_revision();
        if self.revision == Some(revision) {
            let still_valid = match self.fill.as_mut() {
                Some(fill) => fill.reposition(store),
                None => true,
            };
            if still_valid {
                trace!("Fill repositioned at topology revision {}", revision);
                return self.fill.as_ref();
            }
        }

        self.fill = find_cycle(store).and_then(|cycle| FillPolygon::from_cycle(store, cycle));
        self.revision = Some(revision);
        match &self.fill {
            Some(fill) => debug!("Loop detected with {} vertices (area {:.1})", fill.cycle.len(), fill.area),
            None => debug!("No loop in {} vertices / {} edges", store.vertex_count(), store.edge_count()),
        }
        self.fill.as_ref()
    }
}
