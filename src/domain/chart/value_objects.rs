use serde::Serialize;
use strum::AsRefStr;

/// Value Object - Color with alpha, serialized as a CSS `rgba()` string
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    /// Chart palette
    pub const TEAL: Color = Color::rgb(75, 192, 192);
    pub const BLUE: Color = Color::rgb(54, 162, 235);
    pub const ORANGE: Color = Color::rgb(255, 159, 64);
    pub const RED: Color = Color::rgb(255, 99, 132);
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesShape {
    #[strum(serialize = "line")]
    Line,
    #[strum(serialize = "bar")]
    Bar,
}

/// Shade the area between this series and the series at `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillHint {
    pub to_series: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    pub shape: SeriesShape,
    pub color: Color,
    /// Dash pattern in pixels, empty for a solid stroke
    pub dash: Vec<u8>,
    pub tension: f32,
    pub fill: Option<FillHint>,
}

impl SeriesStyle {
    pub fn line(color: Color) -> Self {
        Self { shape: SeriesShape::Line, color, dash: Vec::new(), tension: 0.1, fill: None }
    }

    pub fn dashed(color: Color) -> Self {
        Self { dash: vec![5, 5], tension: 0.0, ..Self::line(color) }
    }

    pub fn bars(color: Color) -> Self {
        Self { shape: SeriesShape::Bar, color, dash: Vec::new(), tension: 0.0, fill: None }
    }

    pub fn fill_to(mut self, index: usize) -> Self {
        self.fill = Some(FillHint { to_series: index });
        self
    }

    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}
