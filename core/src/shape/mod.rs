pub mod types;
pub mod store;
pub mod snap;
pub mod merge;
pub mod measurement;
pub mod cycles;
pub mod drag;
pub mod editor;
pub mod presets;
pub mod snapshot;

pub use editor::ShapeEditor;
pub use store::GraphStore;
pub use types::{Edge, EdgeParams, FillPolygon, ShapeConfig, Vertex, VertexState};



#[cfg(test)]
mod tests_cycles;


#[cfg(test)]
mod tests_editor;
