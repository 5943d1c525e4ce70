use super::projector::ChartProjection;
use crate::domain::errors::RenderResult;

/// A drawn chart that must be released before another one takes its place
pub trait ChartHandle {
    fn destroy(self);
}

/// Charting capability: turns a projection into a visible plot
pub trait SeriesRenderer {
    type Handle: ChartHandle;

    fn render(&mut self, title: &str, projection: &ChartProjection) -> RenderResult<Self::Handle>;

    /// Wipe the surface without drawing (nothing loaded yet)
    fn clear(&mut self);
}
