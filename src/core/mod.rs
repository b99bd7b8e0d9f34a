pub mod axis;
pub mod candlestick;
pub mod grid;
pub mod primitives;
pub mod series;
pub mod types;
pub mod viewport;

pub use axis::{Axis, AxisSpacing};
pub use candlestick::{CandleGeometryBuilder, CandlePrimitive, CandleStyle, OhlcBar};
pub use grid::{Grid, GridGenerator, GridLine, GridLines};
pub use series::PriceSeries;
pub use types::{LineSegment, Point, Rect, SurfaceSize, Vector};
pub use viewport::{Viewport, ZoomBounds};
