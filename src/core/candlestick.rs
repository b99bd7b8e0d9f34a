use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::axis::AxisSpacing;
use crate::core::primitives::{decimal_to_f64, minutes_since};
use crate::core::types::{LineSegment, Point, Rect};
use crate::core::viewport::Viewport;
use crate::error::{ChartError, ChartResult};

/// Canonical OHLC bar stamped with its wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub time: NaiveTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcBar {
    /// Builds a validated OHLC bar from raw floating values.
    ///
    /// Invariants:
    /// - all prices are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(time: NaiveTime, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        let bar = Self {
            time,
            open,
            high,
            low,
            close,
        };
        bar.validate()?;
        Ok(bar)
    }

    /// Converts decimal prices into a validated OHLC bar.
    pub fn from_decimal(
        time: NaiveTime,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            time,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    /// Re-checks invariants, used for bars that arrived through serde.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.open.is_finite()
            || !self.high.is_finite()
            || !self.low.is_finite()
            || !self.close.is_finite()
        {
            return Err(ChartError::InvalidData(format!(
                "ohlc values at {} must be finite",
                self.time
            )));
        }

        if self.low > self.high {
            return Err(ChartError::InvalidData(format!(
                "ohlc low must be <= high at {}",
                self.time
            )));
        }

        if self.open < self.low
            || self.open > self.high
            || self.close < self.low
            || self.close > self.high
        {
            return Err(ChartError::InvalidData(format!(
                "ohlc open/close must be within low/high range at {}",
                self.time
            )));
        }

        Ok(())
    }

    /// Returns `true` only when close is strictly above open; flat bars are bearish.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandleStyle {
    Bullish,
    Bearish,
}

/// Pixel-space geometry of one candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePrimitive {
    pub body: Rect,
    pub wick: LineSegment,
    pub style: CandleStyle,
}

/// Maps OHLC bars onto pixel-space bodies and wicks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGeometryBuilder {
    spacing: AxisSpacing,
    reference_time: NaiveTime,
    bar_interval_minutes: f64,
    gap_px: f64,
}

impl CandleGeometryBuilder {
    /// Horizontal pixels removed from every body so neighbours never touch.
    pub const DEFAULT_GAP_PX: f64 = 1.0;

    pub fn new(
        spacing: AxisSpacing,
        reference_time: NaiveTime,
        bar_interval_minutes: f64,
    ) -> ChartResult<Self> {
        if !bar_interval_minutes.is_finite() || bar_interval_minutes <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "bar interval must be finite and > 0 minutes".to_owned(),
            ));
        }
        Ok(Self {
            spacing,
            reference_time,
            bar_interval_minutes,
            gap_px: Self::DEFAULT_GAP_PX,
        })
    }

    #[must_use]
    pub fn reference_time(&self) -> NaiveTime {
        self.reference_time
    }

    #[must_use]
    pub fn bar_interval_minutes(&self) -> f64 {
        self.bar_interval_minutes
    }

    /// Chart-unit point of the bar's open price at its timestamp.
    #[must_use]
    pub fn anchor(&self, bar: &OhlcBar) -> Point {
        self.spacing
            .project(minutes_since(self.reference_time, bar.time), bar.open)
    }

    #[must_use]
    pub fn body_width_px(&self, viewport: &Viewport) -> f64 {
        let full = self.spacing.pixels_per_minute() * self.bar_interval_minutes * viewport.scale();
        (full - self.gap_px).max(0.0)
    }

    #[must_use]
    pub fn build(&self, bar: &OhlcBar, viewport: &Viewport) -> CandlePrimitive {
        let minutes = minutes_since(self.reference_time, bar.time);
        let anchor = viewport.to_pixel(self.spacing.project(minutes, bar.open));
        let scale = viewport.scale();

        let width = self.body_width_px(viewport);
        let height = self.spacing.pixels_per_price_unit() * (bar.open - bar.close).abs() * scale;
        let left = anchor.x - width / 2.0;

        let (body, style) = if bar.is_bullish() {
            // Bottom edge sits on the open price; the body grows upward to close.
            (
                Rect::new(left, anchor.y - height, width, height),
                CandleStyle::Bullish,
            )
        } else {
            (Rect::new(left, anchor.y, width, height), CandleStyle::Bearish)
        };

        let wick_top = viewport.to_pixel(self.spacing.project(minutes, bar.high));
        let wick_bottom = viewport.to_pixel(self.spacing.project(minutes, bar.low));

        CandlePrimitive {
            body,
            wick: LineSegment::new(
                Point::new(anchor.x, wick_top.y),
                Point::new(anchor.x, wick_bottom.y),
            ),
            style,
        }
    }

    /// Builds geometry for every bar, preserving input order.
    #[must_use]
    pub fn project_candles(&self, bars: &[OhlcBar], viewport: &Viewport) -> Vec<CandlePrimitive> {
        #[cfg(feature = "parallel-projection")]
        {
            bars.par_iter()
                .map(|bar| self.build(bar, viewport))
                .collect()
        }

        #[cfg(not(feature = "parallel-projection"))]
        {
            bars.iter().map(|bar| self.build(bar, viewport)).collect()
        }
    }
}
