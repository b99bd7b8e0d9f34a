use std::sync::Arc;

use tracing::debug;

use crate::core::{PriceSeries, Viewport};
use crate::error::ChartResult;
use crate::interaction::InputState;

use super::{ChartConfig, ChartRenderer, ChartSession};

impl ChartSession {
    /// Creates a session, failing fast on invalid configuration.
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;

        let spacing = config.axis_spacing()?;
        let viewport = Viewport::new(
            config.initial_origin,
            config.initial_zoom,
            config.zoom_bounds()?,
            config.zoomable,
        )?;
        let renderer = ChartRenderer::new(
            spacing,
            config.reference_time,
            config.bar_interval_minutes,
        )?;

        debug!(
            symbol = %config.series.symbol,
            pan_mode = ?config.pan_mode,
            zoom = config.initial_zoom,
            "chart session created"
        );

        Ok(Self {
            input: InputState::with_debug_overlay(config.show_origin_marker),
            surface_size: config.surface_size,
            surface_known: false,
            focus_pending: false,
            config,
            viewport,
            renderer,
            series: Arc::new(PriceSeries::empty()),
            last_fetch_error: None,
            frames_rendered: 0,
        })
    }
}
