use serde::{Deserialize, Serialize};

use crate::core::primitives::MIN_PRICE_STEP;
use crate::core::types::{Point, Vector};
use crate::error::{ChartError, ChartResult};

/// Grid direction. `Vertical` lines are stacked along x (time ticks),
/// `Horizontal` lines along y (price ticks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Fixed tick interval per axis, in market units and in unzoomed chart units.
///
/// Market x is minutes since the session reference time, market y is price.
/// Chart y grows downward, so prices are negated on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpacing {
    data_step: Vector,
    pixel_step: Vector,
}

impl AxisSpacing {
    pub fn new(data_step: Vector, pixel_step: Vector) -> ChartResult<Self> {
        for (name, value) in [
            ("data step x", data_step.x),
            ("data step y", data_step.y),
            ("pixel step x", pixel_step.x),
            ("pixel step y", pixel_step.y),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "tick spacing `{name}` must be finite and > 0"
                )));
            }
        }
        if data_step.y < MIN_PRICE_STEP {
            return Err(ChartError::InvalidConfig(format!(
                "price tick step {} is below {MIN_PRICE_STEP}; labels would repeat",
                data_step.y
            )));
        }
        Ok(Self {
            data_step,
            pixel_step,
        })
    }

    #[must_use]
    pub fn data_step(&self) -> Vector {
        self.data_step
    }

    #[must_use]
    pub fn pixel_step(&self) -> Vector {
        self.pixel_step
    }

    /// Chart units per minute along x.
    #[must_use]
    pub fn pixels_per_minute(&self) -> f64 {
        self.pixel_step.x / self.data_step.x
    }

    /// Chart units per price unit along y.
    #[must_use]
    pub fn pixels_per_price_unit(&self) -> f64 {
        self.pixel_step.y / self.data_step.y
    }

    /// Maps `(minutes since reference, price)` into chart units.
    #[must_use]
    pub fn project(&self, minutes: f64, price: f64) -> Point {
        Point::new(
            minutes * self.pixels_per_minute(),
            -price * self.pixels_per_price_unit(),
        )
    }

    /// Inverse of [`AxisSpacing::project`]: returns `(minutes, price)`.
    #[must_use]
    pub fn unproject(&self, point: Point) -> (f64, f64) {
        (
            point.x / self.pixels_per_minute(),
            -point.y / self.pixels_per_price_unit(),
        )
    }

    /// Chart-unit coordinate expressed in tick-aligned axis units, keeping the
    /// chart orientation (y is negated price).
    pub(crate) fn chart_to_axis_units(&self, axis: Axis, value: f64) -> f64 {
        match axis {
            Axis::Vertical => value / self.pixel_step.x * self.data_step.x,
            Axis::Horizontal => value / self.pixel_step.y * self.data_step.y,
        }
    }

    pub(crate) fn steps(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Vertical => (self.data_step.x, self.pixel_step.x),
            Axis::Horizontal => (self.data_step.y, self.pixel_step.y),
        }
    }
}

impl Default for AxisSpacing {
    /// Ten-minute time ticks and 0.1 price ticks, 100 px apart horizontally
    /// and 60 px vertically before zoom.
    fn default() -> Self {
        Self {
            data_step: Vector::new(10.0, 0.1),
            pixel_step: Vector::new(100.0, 60.0),
        }
    }
}
