//! Indicator aggregate: payload decoding, series extraction and signal rules.

pub mod extractor;
pub mod interpreter;
pub mod repositories;
pub mod value_objects;

pub use extractor::*;
pub use interpreter::*;
pub use repositories::*;
pub use value_objects::*;
