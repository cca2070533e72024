//! Read-only view of the editor for the drawing surface.

use super::editor::ShapeEditor;
use super::types::{EdgeParams, FillPolygon, ShapeConfig, VertexState};
use crate::topo::{EdgeId, Selection, VertexId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexView {
    pub id: VertexId,
    pub position: [f64; 2],
    pub displayed: [f64; 2],
    pub state: VertexState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub v1: VertexId,
    pub v2: VertexId,
    pub start: [f64; 2],
    pub end: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub vertices: Vec<VertexView>,
    pub edges: Vec<EdgeView>,
    pub fill: Option<FillPolygon>,
    pub selection: Selection,
    /// Derived parameters of the selected edge
    pub selected_edge: Option<EdgeParams>,
    pub snap_target: Option<VertexId>,
    pub config: ShapeConfig,
}

/// One thing to draw, in bottom-to-top order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawItem<'a> {
    Fill(&'a FillPolygon),
    Edge(&'a EdgeView),
    Vertex(&'a VertexView),
}

impl ShapeSnapshot {
    /// Fill first, then edges, then vertices on top.
    pub fn draw_order(&self) -> Vec<DrawItem<'_>> {
        self.fill
            .iter()
            .map(DrawItem::Fill)
            .chain(self.edges.iter().map(DrawItem::Edge))
            .chain(self.vertices.iter().map(DrawItem::Vertex))
            .collect()
    }

    /// A shape with no edges is not worth inserting into a layout.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl ShapeEditor {
    pub fn snapshot(&self) -> ShapeSnapshot {
        let store = self.store();
        let vertices = store
            .vertices()
            .iter()
            .map(|v| VertexView {
                id: v.id,
                position: v.position,
                displayed: store.displayed_position(v.id).unwrap_or(v.position),
                state: self.vertex_state(v.id),
            })
            .collect();
        let edges = store
            .edges()
            .iter()
            .map(|e| EdgeView {
                id: e.id,
                v1: e.v1,
                v2: e.v2,
                start: e.start,
                end: e.end,
            })
            .collect();

        ShapeSnapshot {
            vertices,
            edges,
            fill: self.fill().cloned(),
            selection: self.selection(),
            selected_edge: self.selected_edge_params(),
            snap_target: self.snap_target(),
            config: self.config().clone(),
        }
    }
}
