use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::axis::{Axis, AxisSpacing};
use crate::core::primitives::{decimals_for_step, format_price, time_after_minutes};
use crate::core::types::SurfaceSize;
use crate::core::viewport::Viewport;

const EDGE_EPSILON_PX: f64 = 1e-7;

/// One grid line in pixel space with its tick identity and label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub axis: Axis,
    /// x for vertical lines, y for horizontal lines.
    pub pixel_position: f64,
    /// Minutes since the reference time (vertical) or price (horizontal).
    pub data_value: f64,
    pub label: String,
    /// Signed tick count from the tick sitting at data value zero.
    pub tick_index: i64,
}

pub type GridLines = SmallVec<[GridLine; 16]>;

/// Grid lines for both axes of one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    pub vertical: GridLines,
    pub horizontal: GridLines,
}

impl Grid {
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridLine> {
        self.vertical.iter().chain(self.horizontal.iter())
    }
}

/// Produces tick-aligned grid lines for the visible part of the chart.
///
/// Ticks stay anchored to absolute multiples of the data step regardless of
/// the (continuous) pan position. The visible interval is closed on both
/// ends: a line exactly on `0` or on the far edge is emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGenerator {
    spacing: AxisSpacing,
    reference_time: NaiveTime,
    price_decimals: u32,
}

impl GridGenerator {
    #[must_use]
    pub fn new(spacing: AxisSpacing, reference_time: NaiveTime) -> Self {
        Self {
            spacing,
            reference_time,
            price_decimals: decimals_for_step(spacing.data_step().y),
        }
    }

    #[must_use]
    pub fn spacing(&self) -> AxisSpacing {
        self.spacing
    }

    #[must_use]
    pub fn generate(&self, viewport: &Viewport, size: SurfaceSize) -> Grid {
        Grid {
            vertical: self.axis_lines(Axis::Vertical, viewport, size.width),
            horizontal: self.axis_lines(Axis::Horizontal, viewport, size.height),
        }
    }

    /// Lines of one axis covering pixel range `[0, extent_px]`.
    #[must_use]
    pub fn axis_lines(&self, axis: Axis, viewport: &Viewport, extent_px: f64) -> GridLines {
        let mut lines = GridLines::new();
        if !extent_px.is_finite() || extent_px < 0.0 {
            return lines;
        }

        let (data_step, pixel_step) = self.spacing.steps(axis);
        let origin_chart = match axis {
            Axis::Vertical => viewport.origin().x,
            Axis::Horizontal => viewport.origin().y,
        };
        let origin = self.spacing.chart_to_axis_units(axis, origin_chart);

        // Phase of the origin inside its tick cell; the first candidate line
        // sits on the tick at or before the origin.
        let origin_tick = (origin / data_step).floor();
        let origin_remainder = origin - origin_tick * data_step;
        let relative_origin = origin - origin_remainder;
        let first_index = (relative_origin / data_step).round() as i64;

        let scale = viewport.scale();
        for step_index in 0_i64.. {
            let tick_index = first_index + step_index;
            let pixel_position = (tick_index as f64 * pixel_step - origin_chart) * scale;
            if pixel_position > extent_px + EDGE_EPSILON_PX {
                break;
            }
            if pixel_position < -EDGE_EPSILON_PX {
                continue;
            }
            lines.push(self.line_at(axis, tick_index, pixel_position));
        }
        lines
    }

    fn line_at(&self, axis: Axis, tick_index: i64, pixel_position: f64) -> GridLine {
        let data_step = self.spacing.data_step();
        let (data_value, label) = match axis {
            Axis::Vertical => {
                let minutes = tick_index as f64 * data_step.x;
                let time = time_after_minutes(self.reference_time, minutes);
                (minutes, time.format("%H:%M").to_string())
            }
            Axis::Horizontal => {
                let price = -(tick_index as f64) * data_step.y;
                (price, format_price(price, self.price_decimals))
            }
        };
        GridLine {
            axis,
            pixel_position,
            data_value,
            label,
            tick_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Point, Vector};
    use crate::core::viewport::ZoomBounds;

    fn generator() -> GridGenerator {
        let spacing =
            AxisSpacing::new(Vector::new(10.0, 0.1), Vector::new(100.0, 60.0)).expect("spacing");
        GridGenerator::new(spacing, NaiveTime::from_hms_opt(9, 30, 0).expect("time"))
    }

    #[test]
    fn extent_smaller_than_step_yields_at_most_one_line() {
        let mut viewport = Viewport::with_bounds(ZoomBounds::default());
        let lines = generator().axis_lines(Axis::Vertical, &viewport, 40.0);
        assert_eq!(lines.len(), 1);

        viewport.pan_by(Vector::new(25.0, 0.0));
        let lines = generator().axis_lines(Axis::Vertical, &viewport, 40.0);
        assert!(lines.is_empty());
    }

    #[test]
    fn negative_extent_produces_no_lines() {
        let viewport = Viewport::with_bounds(ZoomBounds::default());
        assert!(
            generator()
                .axis_lines(Axis::Horizontal, &viewport, -1.0)
                .is_empty()
        );
    }

    #[test]
    fn price_labels_use_step_precision() {
        let viewport =
            Viewport::new(Point::new(0.0, -120.0), 1.0, ZoomBounds::default(), true)
                .expect("viewport");
        let lines = generator().axis_lines(Axis::Horizontal, &viewport, 120.0);
        let labels: Vec<&str> = lines.iter().map(|line| line.label.as_str()).collect();
        assert_eq!(labels, vec!["0.2", "0.1", "0.0"]);
    }
}
