//! Error types for shape graph operations.
//!
//! Every failure here is a precondition violation by the caller, surfaced
//! synchronously. Degenerate geometry and "no loop found" are not errors.

use crate::topo::{EdgeId, VertexId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Invalid reference: vertex {0} does not exist")]
    InvalidVertexReference(VertexId),

    #[error("Invalid reference: edge {0} does not exist")]
    InvalidEdgeReference(EdgeId),

    #[error("Edge would connect vertex {0} to itself")]
    SelfLoop(VertexId),

    #[error("Cannot merge vertex {0} into itself")]
    SelfMerge(VertexId),

    #[error("No drag in progress")]
    NoActiveDrag,

    #[error("A drag is already in progress")]
    DragAlreadyActive,

    #[error("Drag in progress is not a {0} drag")]
    DragKindMismatch(&'static str),

    #[error("Invalid grid size: {0}")]
    InvalidGridSize(f64),

    #[error("Invalid snap distance: {0}")]
    InvalidSnapDistance(f64),

    #[error("Invalid polygon: {0} sides (need at least 3)")]
    InvalidPolygon(usize),
}

impl ShapeError {
    /// Stable machine-readable code, used by the server when reporting errors.
    pub fn code(&self) -> &'static str {
        match self {
            ShapeError::InvalidVertexReference(_) | ShapeError::InvalidEdgeReference(_) => {
                "INVALID_REFERENCE"
            }
            ShapeError::SelfLoop(_) => "SELF_LOOP",
            ShapeError::SelfMerge(_) => "SELF_MERGE",
            ShapeError::NoActiveDrag => "NO_ACTIVE_DRAG",
            ShapeError::DragKindMismatch(_) => "DRAG_KIND_MISMATCH",
            ShapeError::DragAlreadyActive => "DRAG_ALREADY_ACTIVE",
            ShapeError::InvalidGridSize(_) => "INVALID_GRID_SIZE",
            ShapeError::InvalidSnapDistance(_) => "INVALID_SNAP_DISTANCE",
            ShapeError::InvalidPolygon(_) => "INVALID_POLYGON",
        }
    }
}

/// Result type for shape operations.
pub type ShapeResult<T> = Result<T, ShapeError>;
