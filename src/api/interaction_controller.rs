use tracing::{debug, trace, warn};

use crate::core::primitives::minutes_since;
use crate::core::{Point, SurfaceSize, Vector, Viewport};
use crate::interaction::{EventOutcome, InputEvent, InputState, Key, PanMode};

use super::{ChartConfig, ChartSession};

impl ChartSession {
    /// Applies one input event synchronously.
    pub fn handle_event(&mut self, event: &InputEvent) -> EventOutcome {
        match *event {
            InputEvent::PointerDown { position } => {
                handle_pointer_down(&mut self.viewport, &mut self.input, &self.config, position);
            }
            InputEvent::PointerMove { position } => {
                handle_pointer_move(&mut self.viewport, &mut self.input, &self.config, position);
            }
            InputEvent::PointerUp { position } => {
                handle_pointer_up(&mut self.viewport, &mut self.input, &self.config, position);
            }
            InputEvent::KeyDown { key } => {
                handle_key_down(&mut self.viewport, &mut self.input, &self.config, key);
            }
            InputEvent::KeyUp { key } => self.input.release(key),
            InputEvent::Wheel { delta } => {
                if delta.is_finite() {
                    self.viewport.zoom_by(delta * self.config.zoom_step);
                }
            }
            InputEvent::Resize { size } => {
                if size.is_valid() {
                    trace!(width = size.width, height = size.height, "surface resized");
                    self.apply_surface_size(size);
                } else {
                    warn!(
                        width = size.width,
                        height = size.height,
                        "ignoring invalid resize"
                    );
                }
            }
            InputEvent::Close => self.input.request_exit(),
        }

        if self.input.exit_requested() {
            EventOutcome::Exit
        } else {
            EventOutcome::Continue
        }
    }

    /// Records the host surface size. A first-load focus made before any size
    /// was known is redone here against the real surface, overriding pans made
    /// in between.
    pub(super) fn apply_surface_size(&mut self, size: SurfaceSize) {
        self.surface_size = size;
        self.surface_known = true;
        if self.focus_pending {
            self.focus_pending = false;
            self.focus_latest_bar();
        }
    }

    /// Scrolls by the held arrow keys; called once per frame.
    pub fn advance_held_keys(&mut self) {
        if self.config.pan_mode != PanMode::Keys {
            return;
        }
        let direction = self.input.held_pan_direction();
        if direction == Vector::ZERO {
            return;
        }
        let step = self.config.key_pan_step_px / self.viewport.scale();
        self.viewport.pan_by(direction * step);
    }

    /// Moves the origin so the latest bar's close sits at the center of the
    /// current surface size. Does nothing while the series is empty.
    pub fn focus_latest_bar(&mut self) {
        let Some(bar) = self.series.bars().last().copied() else {
            return;
        };
        let spacing = self.renderer.grid_generator().spacing();
        let reference = self.renderer.candle_builder().reference_time();
        let target = spacing.project(minutes_since(reference, bar.time), bar.close);
        let half_extent =
            Vector::new(self.surface_size.width, self.surface_size.height) / (2.0 * self.viewport.scale());
        let origin = target - half_extent;
        self.viewport.pan_by(origin - self.viewport.origin());
        debug!(
            origin_x = origin.x,
            origin_y = origin.y,
            time = %bar.time,
            "viewport focused on latest bar"
        );
    }
}

fn handle_pointer_down(
    viewport: &mut Viewport,
    input: &mut InputState,
    config: &ChartConfig,
    position: Point,
) {
    input.set_pointer(position);
    if config.pan_mode == PanMode::PointerDrag {
        viewport.begin_pointer_pan(position);
    }
}

fn handle_pointer_move(
    viewport: &mut Viewport,
    input: &mut InputState,
    config: &ChartConfig,
    position: Point,
) {
    input.set_pointer(position);
    if config.pan_mode == PanMode::PointerDrag {
        viewport.update_pointer_pan(position);
    }
}

fn handle_pointer_up(
    viewport: &mut Viewport,
    input: &mut InputState,
    config: &ChartConfig,
    position: Point,
) {
    input.set_pointer(position);
    if config.pan_mode == PanMode::PointerDrag {
        viewport.update_pointer_pan(position);
        viewport.end_pointer_pan();
    }
}

fn handle_key_down(viewport: &mut Viewport, input: &mut InputState, config: &ChartConfig, key: Key) {
    let fresh_press = input.press(key);
    match key {
        Key::Minus => viewport.zoom_by(-config.zoom_step),
        Key::Equals => viewport.zoom_by(config.zoom_step),
        Key::F3 if fresh_press => {
            let enabled = input.toggle_debug_overlay();
            debug!(enabled, "debug overlay toggled");
        }
        Key::F12 => input.request_exit(),
        _ => {}
    }
}
