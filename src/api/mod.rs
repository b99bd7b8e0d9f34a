mod data_controller;
mod engine;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod interaction_controller;
mod render_frame_builder;

pub use data_controller::{
    JsonSeriesSource, PriceSeriesSource, SeriesFixture, SeriesRequest, StaticSeriesSource,
};
pub use engine::{ChartSession, ChartView};
pub use engine_config::ChartConfig;
pub use engine_snapshot::SessionSnapshot;
pub use render_frame_builder::{ChartRenderer, FrameOverlay, style_color};
