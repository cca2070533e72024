//! The mutation API the drawing surface drives.
//!
//! `ShapeEditor` owns the graph store, the current selection, the active drag
//! session and the fill. Every public mutation runs to completion, keeps the
//! store consistent and re-evaluates the fill before returning.

use super::cycles::FillTracker;
use super::drag::{DragFeedback, DragOutcome, DragSession};
use super::measurement::edge_params;
use super::merge::MergeOutcome;
use super::snap::resolve_snap_target;
use super::store::GraphStore;
use super::types::{EdgeParams, FillPolygon, ShapeConfig, SnapPreview, VertexState};
use crate::error::{ShapeError, ShapeResult};
use crate::geometry::utils_2d::{offset, snap_to_grid};
use crate::topo::{EdgeId, IdGenerator, Selection, VertexId};
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct ShapeEditor {
    store: GraphStore,
    config: ShapeConfig,
    selection: Selection,
    drag: Option<DragSession>,
    fill: FillTracker,
}

impl ShapeEditor {
    pub fn new(config: ShapeConfig) -> Self {
        Self::with_generator(config, IdGenerator::random())
    }

    pub fn with_generator(config: ShapeConfig, ids: IdGenerator) -> Self {
        Self {
            store: GraphStore::with_generator(ids),
            config,
            selection: Selection::None,
            drag: None,
            fill: FillTracker::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn fill(&self) -> Option<&FillPolygon> {
        self.fill.fill()
    }

    /// Vertex the current drag would merge into on drop.
    pub fn snap_target(&self) -> Option<VertexId> {
        self.drag.as_ref().and_then(|d| d.snap_target()).map(|t| t.vertex)
    }

    pub fn vertex_state(&self, id: VertexId) -> VertexState {
        match self.store.snap_preview() {
            Some(SnapPreview { vertex, .. }) if vertex == id => VertexState::Snapping,
            _ => VertexState::Normal,
        }
    }

    pub fn edge_params(&self, edge: EdgeId) -> ShapeResult<EdgeParams> {
        edge_params(&self.store, edge)
    }

    /// Length and angle of the selected edge, if an edge is selected.
    pub fn selected_edge_params(&self) -> Option<EdgeParams> {
        self.selection
            .edge()
            .and_then(|e| edge_params(&self.store, e).ok())
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn set_auto_fill(&mut self, enabled: bool) {
        self.config.auto_fill = enabled;
        self.refresh_fill();
    }

    /// Only affects positions set by later drags.
    pub fn set_grid_size(&mut self, grid_size: f64) -> ShapeResult<()> {
        if !grid_size.is_finite() || grid_size <= 0.0 {
            return Err(ShapeError::InvalidGridSize(grid_size));
        }
        self.config.grid_size = grid_size;
        Ok(())
    }

    /// Zero is accepted and disables snapping.
    pub fn set_snap_distance(&mut self, snap_distance: f64) -> ShapeResult<()> {
        if !snap_distance.is_finite() || snap_distance < 0.0 {
            return Err(ShapeError::InvalidSnapDistance(snap_distance));
        }
        self.config.snap_distance = snap_distance;
        Ok(())
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn create_vertex(&mut self, position: [f64; 2]) -> VertexId {
        let id = self.store.create_vertex(position);
        self.refresh_fill();
        id
    }

    pub fn create_edge(&mut self, v1: VertexId, v2: VertexId) -> ShapeResult<EdgeId> {
        let id = self.store.create_edge(v1, v2)?;
        self.refresh_fill();
        Ok(id)
    }

    /// Sets a vertex position exactly, without grid rounding.
    pub fn move_vertex(&mut self, id: VertexId, position: [f64; 2]) -> ShapeResult<()> {
        self.store.move_vertex(id, position)?;
        self.refresh_fill();
        Ok(())
    }

    /// Removes a vertex and its edges. Returns the removed edge ids.
    pub fn remove_vertex(&mut self, id: VertexId) -> ShapeResult<Vec<EdgeId>> {
        let removed = self.store.remove_vertex(id)?;
        if self.drag.as_ref().is_some_and(|d| d.involves_vertex(id)) {
            self.abandon_drag()?;
        }
        self.selection.forget_vertex(id);
        for edge in &removed {
            self.selection.forget_edge(*edge);
        }
        self.refresh_fill();
        Ok(removed)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> ShapeResult<()> {
        self.store.remove_edge(id)?;
        if self.drag.as_ref().is_some_and(|d| d.involves_edge(id)) {
            self.abandon_drag()?;
        }
        self.selection.forget_edge(id);
        self.refresh_fill();
        Ok(())
    }

    /// Collapses `source` into `target`. A selection on `source` follows it
    /// to `target`.
    pub fn merge_vertices(&mut self, source: VertexId, target: VertexId) -> ShapeResult<MergeOutcome> {
        let outcome = self.store.merge_vertices(source, target)?;
        if self.drag.as_ref().is_some_and(|d| d.involves_vertex(source)) {
            self.abandon_drag()?;
        }
        self.selection.transfer_vertex(source, target);
        for edge in &outcome.removed_edges {
            self.selection.forget_edge(*edge);
        }
        self.refresh_fill();
        Ok(outcome)
    }

    /// Drops all geometry, selection and drag state. Configuration is kept.
    pub fn reset(&mut self) {
        self.store.clear();
        self.selection.clear();
        self.drag = None;
        self.fill.clear();
    }

    // =========================================================================
    // Parametric edits
    // =========================================================================

    pub fn set_edge_length(&mut self, edge: EdgeId, length: f64) -> ShapeResult<()> {
        self.store.set_edge_length(edge, length)?;
        self.refresh_fill();
        Ok(())
    }

    pub fn set_edge_angle(&mut self, edge: EdgeId, angle_deg: f64) -> ShapeResult<()> {
        self.store.set_edge_angle(edge, angle_deg)?;
        self.refresh_fill();
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select(&mut self, selection: Selection) -> ShapeResult<()> {
        match selection {
            Selection::Vertex(id) if !self.store.contains_vertex(id) => {
                return Err(ShapeError::InvalidVertexReference(id));
            }
            Selection::Edge(id) if !self.store.contains_edge(id) => {
                return Err(ShapeError::InvalidEdgeReference(id));
            }
            _ => {}
        }
        self.selection = selection;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // =========================================================================
    // Dragging
    // =========================================================================

    pub fn begin_vertex_drag(&mut self, vertex: VertexId) -> ShapeResult<()> {
        if self.drag.is_some() {
            return Err(ShapeError::DragAlreadyActive);
        }
        let anchor = self.store.position(vertex)?;
        self.drag = Some(DragSession::Vertex { vertex, anchor, snap_target: None });
        debug!("Vertex drag started on {} at {:?}", vertex, anchor);
        Ok(())
    }

    pub fn begin_edge_drag(&mut self, edge: EdgeId) -> ShapeResult<()> {
        if self.drag.is_some() {
            return Err(ShapeError::DragAlreadyActive);
        }
        let e = self.store.edge(edge).ok_or(ShapeError::InvalidEdgeReference(edge))?;
        let (v1, v2) = (e.v1, e.v2);
        let anchors = [self.store.position(v1)?, self.store.position(v2)?];
        self.drag = Some(DragSession::Edge { edge, v1, v2, anchors });
        debug!("Edge drag started on {}", edge);
        Ok(())
    }

    /// Moves the dragged vertex to the grid point nearest `pointer` and
    /// re-resolves its snap target.
    pub fn drag_to(&mut self, pointer: [f64; 2]) -> ShapeResult<DragFeedback> {
        let vertex = match &self.drag {
            Some(DragSession::Vertex { vertex, .. }) => *vertex,
            Some(DragSession::Edge { .. }) => return Err(ShapeError::DragKindMismatch("vertex")),
            None => return Err(ShapeError::NoActiveDrag),
        };

        let position = snap_to_grid(pointer, self.config.grid_size);
        self.store.move_vertex(vertex, position)?;

        let target = resolve_snap_target(&self.store, vertex, self.config.snap_distance)?;
        self.store
            .set_snap_preview(target.map(|t| SnapPreview { vertex, target: t.vertex }))?;
        if let Some(DragSession::Vertex { snap_target, .. }) = self.drag.as_mut() {
            *snap_target = target;
        }

        self.refresh_fill();
        let displayed = self.store.displayed_position(vertex)?;
        trace!("Drag {} -> {:?} (displayed {:?})", vertex, position, displayed);

        Ok(DragFeedback {
            position,
            displayed,
            snap_target: target.map(|t| t.vertex),
        })
    }

    /// Moves the drag by `delta`, measured from where the drag started.
    /// Vertex drags snap as in `drag_to`; edge drags move both endpoints and
    /// never snap.
    pub fn drag_by(&mut self, delta: [f64; 2]) -> ShapeResult<()> {
        match self.drag.clone() {
            Some(DragSession::Vertex { anchor, .. }) => {
                self.drag_to(offset(anchor, delta))?;
            }
            Some(DragSession::Edge { v1, v2, anchors, .. }) => {
                let grid = self.config.grid_size;
                self.store.move_vertex(v1, snap_to_grid(offset(anchors[0], delta), grid))?;
                self.store.move_vertex(v2, snap_to_grid(offset(anchors[1], delta), grid))?;
                self.refresh_fill();
            }
            None => return Err(ShapeError::NoActiveDrag),
        }
        Ok(())
    }

    /// Finishes the drag, merging into the snap target if one is active.
    pub fn end_drag(&mut self) -> ShapeResult<DragOutcome> {
        let session = self.drag.take().ok_or(ShapeError::NoActiveDrag)?;
        self.store.set_snap_preview(None)?;

        match session {
            DragSession::Vertex { vertex, snap_target: Some(target), .. } => {
                let outcome = self.merge_vertices(vertex, target.vertex)?;
                Ok(DragOutcome::Merged(outcome))
            }
            _ => {
                debug!("Drag ended without merge");
                self.refresh_fill();
                Ok(DragOutcome::Moved)
            }
        }
    }

    /// Abandons the drag without merging. Positions keep their last values.
    pub fn cancel_drag(&mut self) -> ShapeResult<()> {
        if self.drag.is_none() {
            return Err(ShapeError::NoActiveDrag);
        }
        self.abandon_drag()?;
        self.refresh_fill();
        Ok(())
    }

    fn abandon_drag(&mut self) -> ShapeResult<()> {
        self.drag = None;
        self.store.set_snap_preview(None)
    }

    // =========================================================================
    // Fill
    // =========================================================================

    /// Re-runs loop detection. Calling it again without a mutation in between
    /// yields the same fill.
    pub fn refresh_fill(&mut self) -> Option<&FillPolygon> {
        self.fill.refresh(&self.store, self.config.auto_fill)
    }
}
