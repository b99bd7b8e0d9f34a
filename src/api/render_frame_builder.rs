use chrono::NaiveTime;
use tracing::trace;

use crate::core::{
    Axis, AxisSpacing, CandleGeometryBuilder, CandlePrimitive, CandleStyle, Grid, GridGenerator,
    LineSegment, OhlcBar, Point, PriceSeries, SurfaceSize, Viewport,
};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, DrawCommand, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive, palette,
};

const GRID_STROKE_PX: f64 = 1.0;
const WICK_STROKE_PX: f64 = 1.0;
const LABEL_FONT_PX: f64 = 15.0;
const LABEL_PADDING_PX: f64 = 4.0;
const ORIGIN_MARKER_RADIUS: f64 = 10.0;

/// Optional frame decorations controlled by session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOverlay {
    pub origin_marker: bool,
}

/// Per-frame orchestration: grid, labels, candles, overlay, in paint order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRenderer {
    grid: GridGenerator,
    candles: CandleGeometryBuilder,
}

impl ChartRenderer {
    pub fn new(
        spacing: AxisSpacing,
        reference_time: NaiveTime,
        bar_interval_minutes: f64,
    ) -> ChartResult<Self> {
        Ok(Self {
            grid: GridGenerator::new(spacing, reference_time),
            candles: CandleGeometryBuilder::new(spacing, reference_time, bar_interval_minutes)?,
        })
    }

    #[must_use]
    pub fn grid_generator(&self) -> &GridGenerator {
        &self.grid
    }

    #[must_use]
    pub fn candle_builder(&self) -> &CandleGeometryBuilder {
        &self.candles
    }

    /// Bars whose candle may intersect the visible surface, padded by one
    /// bar interval on each side so partially visible bodies are kept.
    #[must_use]
    pub fn visible_bars<'a>(
        &self,
        series: &'a PriceSeries,
        viewport: &Viewport,
        size: SurfaceSize,
    ) -> &'a [OhlcBar] {
        let visible = viewport.visible_data_rect(size);
        let spacing = self.grid.spacing();
        let (start_minutes, _) = spacing.unproject(Point::new(visible.left(), 0.0));
        let (end_minutes, _) = spacing.unproject(Point::new(visible.right(), 0.0));
        let pad = self.candles.bar_interval_minutes();
        series.bars_between(
            self.candles.reference_time(),
            start_minutes - pad,
            end_minutes + pad,
        )
    }

    #[must_use]
    pub fn build_grid(&self, viewport: &Viewport, size: SurfaceSize) -> Grid {
        self.grid.generate(viewport, size)
    }

    #[must_use]
    pub fn build_candles(
        &self,
        series: &PriceSeries,
        viewport: &Viewport,
        size: SurfaceSize,
    ) -> Vec<CandlePrimitive> {
        let bars = self.visible_bars(series, viewport, size);
        self.candles.project_candles(bars, viewport)
    }

    #[must_use]
    pub fn build_frame(
        &self,
        viewport: &Viewport,
        series: &PriceSeries,
        size: SurfaceSize,
        overlay: FrameOverlay,
    ) -> RenderFrame {
        let grid = self.build_grid(viewport, size);
        let candles = self.build_candles(series, viewport, size);
        let mut frame = RenderFrame::new(size, palette::BACKGROUND);

        for line in grid.iter() {
            let segment = match line.axis {
                Axis::Vertical => LineSegment::new(
                    Point::new(line.pixel_position, 0.0),
                    Point::new(line.pixel_position, size.height),
                ),
                Axis::Horizontal => LineSegment::new(
                    Point::new(0.0, line.pixel_position),
                    Point::new(size.width, line.pixel_position),
                ),
            };
            frame.push(DrawCommand::Line(LinePrimitive::new(
                segment,
                GRID_STROKE_PX,
                palette::GRID_LINE,
            )));
        }

        for line in grid.iter() {
            let (position, h_align) = match line.axis {
                Axis::Vertical => (
                    Point::new(
                        line.pixel_position,
                        size.height - LABEL_FONT_PX - LABEL_PADDING_PX,
                    ),
                    TextHAlign::Center,
                ),
                Axis::Horizontal => (
                    Point::new(LABEL_PADDING_PX, line.pixel_position + LABEL_PADDING_PX),
                    TextHAlign::Left,
                ),
            };
            frame.push(DrawCommand::Text(TextPrimitive::new(
                line.label.clone(),
                position,
                LABEL_FONT_PX,
                palette::GRID_LABEL,
                h_align,
            )));
        }

        for candle in &candles {
            let color = style_color(candle.style);
            frame.push(DrawCommand::Line(LinePrimitive::new(
                candle.wick,
                WICK_STROKE_PX,
                color,
            )));
            frame.push(DrawCommand::Rect(RectPrimitive::new(candle.body, color)));
        }

        if overlay.origin_marker {
            frame.push(DrawCommand::Circle(CirclePrimitive::new(
                viewport.to_pixel(Point::ZERO),
                ORIGIN_MARKER_RADIUS * viewport.scale(),
                palette::ORIGIN_MARKER,
            )));
        }

        trace!(
            grid_lines = grid.len(),
            candles = candles.len(),
            commands = frame.commands.len(),
            "frame built"
        );
        frame
    }
}

#[must_use]
pub fn style_color(style: CandleStyle) -> Color {
    match style {
        CandleStyle::Bullish => palette::CANDLE_BULLISH,
        CandleStyle::Bearish => palette::CANDLE_BEARISH,
    }
}
