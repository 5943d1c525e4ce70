use crate::domain::{
    chart::{ChartHandle, ChartProjection, ProjectedSeries, SeriesRenderer, SeriesShape},
    errors::{RenderError, RenderResult},
    logging::{LogComponent, get_logger},
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const PADDING: f64 = 40.0;
const AXIS_SPACE: f64 = 70.0;
const BACKGROUND: &str = "#ffffff";
const TEXT_COLOR: &str = "#444444";

/// Maps series indices and values into canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub struct PlotGeometry {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    min: f64,
    max: f64,
    count: usize,
}

impl PlotGeometry {
    pub fn new(canvas_width: u32, canvas_height: u32, count: usize, range: (f64, f64)) -> Self {
        let (mut min, mut max) = range;
        if (max - min).abs() < f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }
        Self {
            left: AXIS_SPACE,
            top: PADDING,
            width: (canvas_width as f64 - AXIS_SPACE - PADDING).max(1.0),
            height: (canvas_height as f64 - PADDING * 2.0).max(1.0),
            min,
            max,
            count: count.max(1),
        }
    }

    pub fn slot_width(&self) -> f64 {
        self.width / self.count as f64
    }

    /// Centre of the slot for `index`
    pub fn x(&self, index: usize) -> f64 {
        self.left + self.slot_width() * (index as f64 + 0.5)
    }

    pub fn y(&self, value: f64) -> f64 {
        self.top + (self.max - value) / (self.max - self.min) * self.height
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Contiguous finite stretches of a series; NaN ends a stretch
pub fn line_runs(points: &[f64]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, v) in points.iter().copied().enumerate() {
        if v.is_finite() {
            current.push((i, v));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// A chart drawn onto a canvas; destroying it blanks the canvas
pub struct CanvasChartHandle {
    context: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl ChartHandle for CanvasChartHandle {
    fn destroy(self) {
        self.context.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }
}

/// Canvas 2D implementation of the charting capability
pub struct CanvasSeriesRenderer {
    canvas_id: String,
    width: u32,
    height: u32,
}

impl CanvasSeriesRenderer {
    pub fn new(canvas_id: &str, width: u32, height: u32) -> Self {
        Self { canvas_id: canvas_id.to_string(), width, height }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    fn context(&self) -> RenderResult<CanvasRenderingContext2d> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&self.canvas_id))
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| RenderError::CanvasNotFound(self.canvas_id.clone()))?;

        canvas.set_width(self.width);
        canvas.set_height(self.height);

        canvas
            .get_context("2d")
            .map_err(|e| RenderError::Context(format!("{:?}", e)))?
            .ok_or_else(|| RenderError::Context("get_context returned null".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::Context("not a 2D context".to_string()))
    }

    fn draw_text(context: &CanvasRenderingContext2d, text: &str, x: f64, y: f64) -> RenderResult<()> {
        context
            .fill_text(text, x, y)
            .map_err(|e| RenderError::Context(format!("{:?}", e)))
    }

    fn draw_fill(
        context: &CanvasRenderingContext2d,
        geometry: &PlotGeometry,
        upper: &ProjectedSeries,
        lower: &ProjectedSeries,
    ) {
        let indices: Vec<usize> = (0..upper.points.len().min(lower.points.len()))
            .filter(|&i| upper.points[i].is_finite() && lower.points[i].is_finite())
            .collect();
        if indices.len() < 2 {
            return;
        }

        context.set_fill_style_str(&lower.style.color.with_alpha(0.1).to_css());
        context.begin_path();
        for (n, &i) in indices.iter().enumerate() {
            let (x, y) = (geometry.x(i), geometry.y(upper.points[i]));
            if n == 0 { context.move_to(x, y) } else { context.line_to(x, y) }
        }
        for &i in indices.iter().rev() {
            context.line_to(geometry.x(i), geometry.y(lower.points[i]));
        }
        context.close_path();
        context.fill();
    }

    fn draw_line(context: &CanvasRenderingContext2d, geometry: &PlotGeometry, series: &ProjectedSeries) {
        let dash = js_sys::Array::new();
        for d in &series.style.dash {
            dash.push(&JsValue::from(*d as f64));
        }
        Self::set_dash(context, &dash);
        context.set_stroke_style_str(&series.style.color.to_css());
        context.set_line_width(if series.style.is_dashed() { 1.0 } else { 2.0 });

        for run in line_runs(&series.points) {
            context.begin_path();
            for (n, (i, v)) in run.iter().enumerate() {
                let (x, y) = (geometry.x(*i), geometry.y(*v));
                if n == 0 { context.move_to(x, y) } else { context.line_to(x, y) }
            }
            context.stroke();
        }
        Self::set_dash(context, &js_sys::Array::new());
    }

    fn set_dash(context: &CanvasRenderingContext2d, pattern: &js_sys::Array) {
        if let Err(e) = context.set_line_dash(pattern) {
            get_logger().warn(
                LogComponent::Infrastructure("CanvasRenderer"),
                &format!("set_line_dash failed: {:?}", e),
            );
        }
    }

    fn draw_bars(context: &CanvasRenderingContext2d, geometry: &PlotGeometry, series: &ProjectedSeries) {
        let zero = geometry.y(0.0_f64.clamp(geometry.min, geometry.max));
        let bar_width = geometry.slot_width() * 0.6;
        context.set_fill_style_str(&series.style.color.to_css());

        for (i, v) in series.points.iter().copied().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let y = geometry.y(v);
            context.fill_rect(geometry.x(i) - bar_width / 2.0, y.min(zero), bar_width, (zero - y).abs());
        }
    }
}

impl SeriesRenderer for CanvasSeriesRenderer {
    type Handle = CanvasChartHandle;

    fn render(&mut self, title: &str, projection: &ChartProjection) -> RenderResult<CanvasChartHandle> {
        let context = self.context()?;
        let (w, h) = (self.width as f64, self.height as f64);

        context.clear_rect(0.0, 0.0, w, h);
        context.set_fill_style_str(BACKGROUND);
        context.fill_rect(0.0, 0.0, w, h);
        context.set_fill_style_str(TEXT_COLOR);
        context.set_font("14px sans-serif");
        Self::draw_text(&context, title, AXIS_SPACE, PADDING / 2.0 + 5.0)?;

        let handle = CanvasChartHandle { context: context.clone(), width: self.width, height: self.height };

        let Some(range) = projection.value_range() else {
            get_logger().warn(LogComponent::Infrastructure("CanvasRenderer"), "projection has no finite values");
            Self::draw_text(&context, "No data available", AXIS_SPACE, h / 2.0)?;
            return Ok(handle);
        };
        let geometry = PlotGeometry::new(self.width, self.height, projection.len(), range);

        if let Some((to, from)) = projection.fill_between() {
            if let (Some(upper), Some(lower)) = (projection.series.get(to), projection.series.get(from)) {
                Self::draw_fill(&context, &geometry, upper, lower);
            }
        }

        for series in &projection.series {
            match series.style.shape {
                SeriesShape::Line => Self::draw_line(&context, &geometry, series),
                SeriesShape::Bar => Self::draw_bars(&context, &geometry, series),
            }
        }

        context.set_fill_style_str(TEXT_COLOR);
        context.set_font("11px sans-serif");
        Self::draw_text(&context, &format!("{:.2}", geometry.max), 5.0, geometry.y(geometry.max) + 4.0)?;
        Self::draw_text(&context, &format!("{:.2}", geometry.min), 5.0, geometry.y(geometry.min) + 4.0)?;
        if let (Some(first), Some(last)) = (projection.labels.first(), projection.labels.last()) {
            Self::draw_text(&context, first, geometry.x(0), geometry.bottom() + 16.0)?;
            Self::draw_text(&context, last, geometry.right() - 70.0, geometry.bottom() + 16.0)?;
        }

        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("drew {} series over {} dates", projection.series.len(), projection.len()),
        );
        Ok(handle)
    }

    fn clear(&mut self) {
        match self.context() {
            Ok(context) => context.clear_rect(0.0, 0.0, self.width as f64, self.height as f64),
            Err(e) => get_logger().warn(LogComponent::Infrastructure("CanvasRenderer"), &e.to_string()),
        }
    }
}
