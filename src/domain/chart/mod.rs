//! Chart aggregate: projection of indicator series into plot series.

pub mod projector;
pub mod renderer;
pub mod value_objects;

pub use projector::*;
pub use renderer::*;
pub use value_objects::*;
