pub mod http;
pub mod rendering;
pub mod services;

pub use http::DashboardHttpClient;
pub use rendering::{CanvasChartHandle, CanvasSeriesRenderer};
pub use services::{BrowserTimeProvider, ConsoleLogger};
