//! Pure dashboard model: indicator interpretation, chart projection and
//! history pagination. Nothing here touches the DOM or the network.

pub mod chart;
pub mod errors;
pub mod events;
pub mod history;
pub mod indicators;
pub mod logging;
