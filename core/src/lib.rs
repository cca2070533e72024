pub mod error;
pub mod geometry;
pub mod topo;
pub mod shape;

pub use error::{ShapeError, ShapeResult};
pub use shape::{ShapeConfig, ShapeEditor};

pub fn version() -> &'static str {
    "0.1.0"
}
