mod frame;
mod null_surface;
mod primitives;

pub use frame::{DrawCommand, FrameStats, RenderFrame};
pub use null_surface::{NullSurface, RecordingSurface};
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive, palette,
};

use crate::core::SurfaceSize;
use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// All coordinates are pixel space. The chart queries `size` once per frame
/// and then issues primitive calls in paint order.
pub trait DrawingSurface {
    fn size(&self) -> SurfaceSize;

    fn clear(&mut self, color: Color) -> ChartResult<()>;

    fn fill_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()>;

    fn draw_line(&mut self, line: &LinePrimitive) -> ChartResult<()>;

    fn fill_circle(&mut self, circle: &CirclePrimitive) -> ChartResult<()>;

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoSurface;
