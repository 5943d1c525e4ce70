//! Display models and the JavaScript-facing API.

pub mod history_presenter;
pub mod indicator_presenter;
pub mod wasm_api;

pub use history_presenter::*;
pub use indicator_presenter::*;
