use crate::domain::{
    chart::{ChartHandle, ChartProjection, SeriesRenderer},
    errors::RenderResult,
    logging::LogComponent,
};

/// Holds at most one live chart. The previous chart is destroyed before the
/// next one is drawn, so two charts never share the surface.
pub struct ChartSlot<S: SeriesRenderer> {
    renderer: S,
    active: Option<S::Handle>,
}

impl<S: SeriesRenderer> ChartSlot<S> {
    pub fn new(renderer: S) -> Self {
        Self { renderer, active: None }
    }

    pub fn has_chart(&self) -> bool {
        self.active.is_some()
    }

    pub fn show(&mut self, title: &str, projection: &ChartProjection) -> RenderResult<()> {
        self.release();
        let handle = self.renderer.render(title, projection)?;
        crate::log_debug!(
            LogComponent::Application("ChartSlot"),
            "rendered '{}' with {} series",
            title,
            projection.series.len()
        );
        self.active = Some(handle);
        Ok(())
    }

    /// Drop the current chart and blank the surface
    pub fn clear(&mut self) {
        self.release();
        self.renderer.clear();
    }

    fn release(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.destroy();
        }
    }
}
