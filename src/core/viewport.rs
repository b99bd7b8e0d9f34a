use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::types::{Point, Rect, SurfaceSize, Vector};
use crate::error::{ChartError, ChartResult};

/// Inclusive zoom range enforced by [`Viewport::zoom_by`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl ZoomBounds {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "zoom bounds must be finite and > 0".to_owned(),
            ));
        }
        if min > max {
            return Err(ChartError::InvalidConfig(format!(
                "zoom min ({min}) must be <= zoom max ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn clamp(self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(self, zoom: f64) -> bool {
        (self.min..=self.max).contains(&zoom)
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: 0.5, max: 2.0 }
    }
}

/// Pan/zoom state mapping unzoomed chart units onto pixel space.
///
/// `origin` is the chart point drawn at pixel `(0, 0)`. Both axes share one
/// uniform scale:
///
/// ```text
/// pixel = (point - origin) * zoom     // zoomable
/// pixel =  point - origin             // fixed 1:1
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    origin: Point,
    zoom: f64,
    bounds: ZoomBounds,
    zoomable: bool,
    pan_active: bool,
    pan_anchor: Point,
}

impl Viewport {
    pub fn new(origin: Point, zoom: f64, bounds: ZoomBounds, zoomable: bool) -> ChartResult<Self> {
        if !origin.is_finite() {
            return Err(ChartError::InvalidConfig(
                "viewport origin must be finite".to_owned(),
            ));
        }
        if !bounds.contains(zoom) {
            return Err(ChartError::InvalidConfig(format!(
                "initial zoom {zoom} is outside [{}, {}]",
                bounds.min, bounds.max
            )));
        }

        Ok(Self {
            origin,
            zoom,
            bounds,
            zoomable,
            pan_active: false,
            pan_anchor: Point::ZERO,
        })
    }

    /// Zoomable viewport at origin `(0, 0)` and zoom 1.
    #[must_use]
    pub fn with_bounds(bounds: ZoomBounds) -> Self {
        Self {
            origin: Point::ZERO,
            zoom: bounds.clamp(1.0),
            bounds,
            zoomable: true,
            pan_active: false,
            pan_anchor: Point::ZERO,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    #[must_use]
    pub fn is_zoomable(&self) -> bool {
        self.zoomable
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan_active
    }

    /// Effective pixels per chart unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        if self.zoomable { self.zoom } else { 1.0 }
    }

    pub fn pan_by(&mut self, delta: Vector) {
        self.origin += delta;
        trace!(x = self.origin.x, y = self.origin.y, "viewport pan");
    }

    pub fn begin_pointer_pan(&mut self, pointer: Point) {
        self.pan_active = true;
        self.pan_anchor = self.to_data(pointer);
        debug!(
            anchor_x = self.pan_anchor.x,
            anchor_y = self.pan_anchor.y,
            "pointer pan started"
        );
    }

    /// Moves the origin so the chart point grabbed at pan start sits under
    /// `pointer` again. No-op while no pan gesture is active.
    pub fn update_pointer_pan(&mut self, pointer: Point) {
        if !self.pan_active {
            return;
        }
        let scale = self.scale();
        self.origin = Point::new(
            self.pan_anchor.x - pointer.x / scale,
            self.pan_anchor.y - pointer.y / scale,
        );
    }

    pub fn end_pointer_pan(&mut self) {
        if self.pan_active {
            debug!(x = self.origin.x, y = self.origin.y, "pointer pan ended");
        }
        self.pan_active = false;
    }

    /// Adds `delta` to the zoom factor, clamped to the configured bounds.
    ///
    /// Ignored when the viewport is fixed 1:1.
    pub fn zoom_by(&mut self, delta: f64) {
        if !self.zoomable || !delta.is_finite() {
            return;
        }
        let requested = self.zoom + delta;
        let clamped = self.bounds.clamp(requested);
        if clamped != requested {
            trace!(requested, clamped, "zoom clamped to bounds");
        }
        self.zoom = clamped;
    }

    #[must_use]
    pub fn to_pixel(&self, point: Point) -> Point {
        let scale = self.scale();
        Point::new(
            (point.x - self.origin.x) * scale,
            (point.y - self.origin.y) * scale,
        )
    }

    #[must_use]
    pub fn to_data(&self, pixel: Point) -> Point {
        let scale = self.scale();
        Point::new(
            pixel.x / scale + self.origin.x,
            pixel.y / scale + self.origin.y,
        )
    }

    /// Chart-unit rectangle currently covered by a surface of `size`.
    #[must_use]
    pub fn visible_data_rect(&self, size: SurfaceSize) -> Rect {
        let scale = self.scale();
        Rect::new(
            self.origin.x,
            self.origin.y,
            size.width / scale,
            size.height / scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zoomable_viewport_ignores_zoom_deltas() {
        let mut viewport =
            Viewport::new(Point::ZERO, 1.0, ZoomBounds::default(), false).expect("viewport");
        viewport.zoom_by(0.5);
        assert_eq!(viewport.zoom(), 1.0);
        assert_eq!(viewport.to_pixel(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
    }

    #[test]
    fn update_without_active_pan_leaves_origin() {
        let mut viewport = Viewport::with_bounds(ZoomBounds::default());
        viewport.update_pointer_pan(Point::new(40.0, 40.0));
        assert_eq!(viewport.origin(), Point::ZERO);
    }

    #[test]
    fn initial_zoom_must_lie_within_bounds() {
        let result = Viewport::new(Point::ZERO, 3.0, ZoomBounds::default(), true);
        assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
    }
}
