use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Point, SurfaceSize};
use crate::error::ChartResult;
use crate::interaction::{InteractionMode, PanMode};
use crate::render::FrameStats;

use super::ChartSession;

/// Serializable view of session state for debugging and headless checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub origin: Point,
    pub zoom: f64,
    pub pan_mode: PanMode,
    pub interaction_mode: InteractionMode,
    pub surface_size: SurfaceSize,
    pub debug_overlay: bool,
    pub frames_rendered: u64,
    pub frame: FrameStats,
    pub last_fetch_error: Option<String>,
    /// `IndexMap` keeps insertion order so snapshots diff cleanly.
    pub series_metadata: IndexMap<String, String>,
}

impl ChartSession {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            origin: self.viewport.origin(),
            zoom: self.viewport.zoom(),
            pan_mode: self.config.pan_mode,
            interaction_mode: self.interaction_mode(),
            surface_size: self.surface_size,
            debug_overlay: self.input.debug_overlay(),
            frames_rendered: self.frames_rendered,
            frame: self.build_frame().stats(),
            last_fetch_error: self.last_fetch_error.clone(),
            series_metadata: self.series_metadata(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
