//! candle-viewport: pan/zoom viewport and OHLC chart geometry engine.
//!
//! The crate turns a time × price data space into pixel-space drawing
//! primitives: phase-correct grid lines with labels and candlestick bodies
//! and wicks. Windowing, raw input capture, text rasterization and market
//! data retrieval stay with the host behind small traits.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartRenderer, ChartSession, ChartView};
pub use error::{ChartError, ChartResult};
