pub mod browse_history;
pub mod load_indicator;

pub use browse_history::*;
pub use load_indicator::*;
