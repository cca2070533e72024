//! Starter shapes offered by the editor toolbar.

use super::editor::ShapeEditor;
use crate::error::{ShapeError, ShapeResult};
use crate::topo::{EdgeId, VertexId};
use std::f64::consts::PI;

/// Ids created by a preset, in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetIds {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
}

impl ShapeEditor {
    /// A single diagonal edge.
    pub fn add_line(&mut self) -> ShapeResult<PresetIds> {
        self.add_closed_or_open(&[[100.0, 100.0], [200.0, 200.0]], false)
    }

    /// A closed 200x150 rectangle.
    pub fn add_rectangle(&mut self) -> ShapeResult<PresetIds> {
        self.add_closed_or_open(
            &[[150.0, 150.0], [350.0, 150.0], [350.0, 300.0], [150.0, 300.0]],
            true,
        )
    }

    /// A closed regular polygon with its first vertex straight up from `center`.
    pub fn add_regular_polygon(&mut self, sides: usize, radius: f64, center: [f64; 2]) -> ShapeResult<PresetIds> {
        if sides < 3 {
            return Err(ShapeError::InvalidPolygon(sides));
        }
        let points: Vec<[f64; 2]> = (0..sides)
            .map(|i| {
                let angle = (i as f64 * 2.0 * PI / sides as f64) - PI / 2.0;
                [center[0] + radius * angle.cos(), center[1] + radius * angle.sin()]
            })
            .collect();
        self.add_closed_or_open(&points, true)
    }

    pub fn add_pentagon(&mut self) -> ShapeResult<PresetIds> {
        self.add_regular_polygon(5, 80.0, [300.0, 200.0])
    }

    fn add_closed_or_open(&mut self, points: &[[f64; 2]], closed: bool) -> ShapeResult<PresetIds> {
        let vertices: Vec<VertexId> = points.iter().map(|p| self.create_vertex(*p)).collect();

        let n = vertices.len();
        let segments = if closed { n } else { n.saturating_sub(1) };
        let mut edges = Vec::with_capacity(segments);
        for i in 0..segments {
            edges.push(self.create_edge(vertices[i], vertices[(i + 1) % n])?);
        }

        Ok(PresetIds { vertices, edges })
    }
}
