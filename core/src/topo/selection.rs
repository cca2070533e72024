use super::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};

/// What the user currently has selected in the shape editor.
///
/// Only one entity can be selected at a time; multi-selection requests are
/// discarded by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Vertex(VertexId),
    Edge(EdgeId),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn vertex(&self) -> Option<VertexId> {
        match self {
            Selection::Vertex(id) => Some(*id),
            _ => None,
        }
    }

    pub fn edge(&self) -> Option<EdgeId> {
        match self {
            Selection::Edge(id) => Some(*id),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }

    /// Re-points a vertex selection from `from` to `to`.
    /// Returns true if the selection moved.
    pub fn transfer_vertex(&mut self, from: VertexId, to: VertexId) -> bool {
        if self.vertex() == Some(from) {
            *self = Selection::Vertex(to);
            true
        } else {
            false
        }
    }

    /// Clears the selection if it names `id`.
    pub fn forget_vertex(&mut self, id: VertexId) -> bool {
        if self.vertex() == Some(id) {
            self.clear();
            true
        } else {
            false
        }
    }

    /// Clears the selection if it names `id`.
    pub fn forget_edge(&mut self, id: EdgeId) -> bool {
        if self.edge() == Some(id) {
            self.clear();
            true
        } else {
            false
        }
    }
}
