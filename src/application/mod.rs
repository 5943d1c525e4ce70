pub mod chart_slot;
pub mod use_cases;

pub use chart_slot::*;
pub use use_cases::*;
