use serde::{Deserialize, Serialize};

use crate::core::{LineSegment, Point, Rect};
use crate::error::{ChartError, ChartResult};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels normalized to `0.0..=1.0`.
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.red) / 255.0,
            f64::from(self.green) / 255.0,
            f64::from(self.blue) / 255.0,
        )
    }
}

/// Fixed chart palette.
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(30, 30, 40);
    pub const GRID_LINE: Color = Color::rgb(45, 45, 50);
    pub const GRID_LABEL: Color = Color::rgb(100, 100, 100);
    pub const CANDLE_BULLISH: Color = Color::rgb(20, 200, 20);
    pub const CANDLE_BEARISH: Color = Color::rgb(200, 20, 20);
    pub const ORIGIN_MARKER: Color = Color::rgb(250, 0, 0);
}

fn ensure_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite")))
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub segment: LineSegment,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(segment: LineSegment, stroke_width: f64, color: Color) -> Self {
        Self {
            segment,
            stroke_width,
            color,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        let LineSegment { start, end } = self.segment;
        ensure_finite(&[start.x, start.y, end.x, end.y], "line coordinates")?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Draw command for one filled rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(rect: Rect, color: Color) -> Self {
        Self { rect, color }
    }

    pub fn validate(&self) -> ChartResult<()> {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        ensure_finite(&[x, y, width, height], "rect geometry")?;
        if width < 0.0 || height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect width/height must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Draw command for one filled circle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(center: Point, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_finite(&[self.center.x, self.center.y], "circle center")?;
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `TextPrimitive::position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub position: Point,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        position: Point,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            position,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        ensure_finite(&[self.position.x, self.position.y], "text coordinates")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}
