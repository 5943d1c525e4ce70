//! Prompt history aggregate: records, page state and the page-number window.

pub mod entities;
pub mod pagination;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use pagination::*;
pub use repositories::*;
pub use value_objects::*;
