use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AxisSpacing, Point, SurfaceSize, Vector, ZoomBounds};
use crate::error::{ChartError, ChartResult};
use crate::interaction::PanMode;

use super::SeriesRequest;

/// Public chart-session bootstrap configuration.
///
/// Serializable so hosts can keep chart setup in a JSON file. Only the tick
/// spacing and zoom bounds are required; everything else has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Tick interval in market units: minutes (x) and price (y).
    pub tick_spacing_data: Vector,
    /// Nominal pixels between ticks before zoom.
    pub tick_spacing_pixel: Vector,
    /// `[min, max]` zoom factor.
    pub zoom_bounds: [f64; 2],
    #[serde(default)]
    pub pan_mode: PanMode,
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: f64,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    #[serde(default = "default_zoomable")]
    pub zoomable: bool,
    /// Pixels scrolled per frame while an arrow key is held.
    #[serde(default = "default_key_pan_step_px")]
    pub key_pan_step_px: f64,
    #[serde(default = "default_bar_interval_minutes")]
    pub bar_interval_minutes: f64,
    /// Session start; time labels and candle x offsets are relative to it.
    #[serde(default = "default_reference_time")]
    pub reference_time: NaiveTime,
    #[serde(default)]
    pub initial_origin: Point,
    /// Recenters the viewport on the latest bar when the first series arrives.
    #[serde(default = "default_focus_on_load")]
    pub focus_on_load: bool,
    #[serde(default)]
    pub show_origin_marker: bool,
    #[serde(default = "default_surface_size")]
    pub surface_size: SurfaceSize,
    #[serde(default)]
    pub series: SeriesRequest,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let spacing = AxisSpacing::default();
        let bounds = ZoomBounds::default();
        Self {
            tick_spacing_data: spacing.data_step(),
            tick_spacing_pixel: spacing.pixel_step(),
            zoom_bounds: [bounds.min, bounds.max],
            pan_mode: PanMode::default(),
            initial_zoom: default_initial_zoom(),
            zoom_step: default_zoom_step(),
            zoomable: default_zoomable(),
            key_pan_step_px: default_key_pan_step_px(),
            bar_interval_minutes: default_bar_interval_minutes(),
            reference_time: default_reference_time(),
            initial_origin: Point::ZERO,
            focus_on_load: default_focus_on_load(),
            show_origin_marker: false,
            surface_size: default_surface_size(),
            series: SeriesRequest::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(raw: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        debug!(
            pan_mode = ?config.pan_mode,
            zoom_min = config.zoom_bounds[0],
            zoom_max = config.zoom_bounds[1],
            "chart config loaded"
        );
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> ChartResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    #[must_use]
    pub fn with_pan_mode(mut self, pan_mode: PanMode) -> Self {
        self.pan_mode = pan_mode;
        self
    }

    #[must_use]
    pub fn with_zoom_bounds(mut self, min: f64, max: f64) -> Self {
        self.zoom_bounds = [min, max];
        self
    }

    #[must_use]
    pub fn with_initial_origin(mut self, origin: Point) -> Self {
        self.initial_origin = origin;
        self
    }

    #[must_use]
    pub fn with_focus_on_load(mut self, focus_on_load: bool) -> Self {
        self.focus_on_load = focus_on_load;
        self
    }

    #[must_use]
    pub fn with_tick_spacing(mut self, data: Vector, pixel: Vector) -> Self {
        self.tick_spacing_data = data;
        self.tick_spacing_pixel = pixel;
        self
    }

    /// Rejects configurations that could fail later at frame time.
    pub fn validate(&self) -> ChartResult<()> {
        self.axis_spacing()?;
        let bounds = self.zoom_bounds()?;
        if !bounds.contains(self.initial_zoom) {
            return Err(ChartError::InvalidConfig(format!(
                "initial zoom {} is outside [{}, {}]",
                self.initial_zoom, bounds.min, bounds.max
            )));
        }
        for (name, value) in [
            ("zoom step", self.zoom_step),
            ("key pan step", self.key_pan_step_px),
            ("bar interval", self.bar_interval_minutes),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.initial_origin.is_finite() {
            return Err(ChartError::InvalidConfig(
                "initial origin must be finite".to_owned(),
            ));
        }
        self.surface_size
            .validate()
            .map_err(|_| ChartError::InvalidConfig("surface size must be finite and > 0".to_owned()))
    }

    pub fn axis_spacing(&self) -> ChartResult<AxisSpacing> {
        AxisSpacing::new(self.tick_spacing_data, self.tick_spacing_pixel)
    }

    pub fn zoom_bounds(&self) -> ChartResult<ZoomBounds> {
        ZoomBounds::new(self.zoom_bounds[0], self.zoom_bounds[1])
    }
}

fn default_initial_zoom() -> f64 {
    1.0
}

fn default_zoom_step() -> f64 {
    0.1
}

fn default_zoomable() -> bool {
    true
}

fn default_key_pan_step_px() -> f64 {
    5.0
}

fn default_bar_interval_minutes() -> f64 {
    1.0
}

fn default_reference_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).unwrap_or(NaiveTime::MIN)
}

fn default_focus_on_load() -> bool {
    true
}

fn default_surface_size() -> SurfaceSize {
    SurfaceSize::new(1228.8, 691.2)
}
