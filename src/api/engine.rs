use std::sync::Arc;

use crate::core::{PriceSeries, SurfaceSize, Viewport};
use crate::error::ChartResult;
use crate::interaction::{EventOutcome, InputEvent, InputState, InteractionMode};
use crate::render::{DrawingSurface, RenderFrame};

use super::{ChartConfig, ChartRenderer, FrameOverlay};

/// Capability interface of a chart view driven by a host event loop.
///
/// Per frame the host drains input through `on_event`, then calls
/// `render_frame` once.
pub trait ChartView {
    fn on_event(&mut self, event: &InputEvent) -> EventOutcome;
    fn render_frame(&mut self, surface: &mut dyn DrawingSurface) -> ChartResult<()>;
}

/// One chart session: viewport, input state, latest series snapshot.
///
/// Single-threaded and frame-driven; nothing here blocks.
#[derive(Debug, Clone)]
pub struct ChartSession {
    pub(super) config: ChartConfig,
    pub(super) viewport: Viewport,
    pub(super) input: InputState,
    pub(super) renderer: ChartRenderer,
    pub(super) series: Arc<PriceSeries>,
    pub(super) surface_size: SurfaceSize,
    /// Set once a real surface size arrived via `Resize` or `render_frame`.
    pub(super) surface_known: bool,
    /// First-load focus computed against the configured size, to be redone
    /// once the real surface size is known.
    pub(super) focus_pending: bool,
    pub(super) last_fetch_error: Option<String>,
    pub(super) frames_rendered: u64,
}

impl ChartSession {
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Direct viewport access for hosts that drive pan/zoom themselves.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    #[must_use]
    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    #[must_use]
    pub fn surface_size(&self) -> SurfaceSize {
        self.surface_size
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        if self.viewport.is_panning() {
            InteractionMode::Panning
        } else {
            InteractionMode::Idle
        }
    }

    /// Builds the current frame without advancing any per-frame state.
    #[must_use]
    pub fn build_frame(&self) -> RenderFrame {
        self.renderer.build_frame(
            &self.viewport,
            &self.series,
            self.surface_size,
            FrameOverlay {
                origin_marker: self.input.debug_overlay(),
            },
        )
    }
}

impl ChartView for ChartSession {
    fn on_event(&mut self, event: &InputEvent) -> EventOutcome {
        self.handle_event(event)
    }

    fn render_frame(&mut self, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        let size = surface.size();
        size.validate()?;
        self.apply_surface_size(size);
        self.advance_held_keys();

        let frame = self.build_frame();
        frame.submit(surface)?;
        self.frames_rendered += 1;
        Ok(())
    }
}
