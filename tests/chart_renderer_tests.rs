use candle_viewport::api::{ChartRenderer, FrameOverlay, JsonSeriesSource, style_color};
use candle_viewport::core::{
    AxisSpacing, CandleStyle, LineSegment, OhlcBar, Point, PriceSeries, Rect, SurfaceSize,
    Viewport, ZoomBounds,
};
use candle_viewport::render::{
    DrawCommand, LinePrimitive, RecordingSurface, RectPrimitive, RenderFrame, palette,
};
use chrono::NaiveTime;

const SURFACE: SurfaceSize = SurfaceSize::new(1228.8, 691.2);

fn reference() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).expect("valid time")
}

fn renderer() -> ChartRenderer {
    ChartRenderer::new(AxisSpacing::default(), reference(), 1.0).expect("renderer")
}

fn fixture_series() -> PriceSeries {
    let raw = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/aapl_session.json"
    ))
    .expect("fixture readable");
    let fixture = JsonSeriesSource::parse_fixture(&raw).expect("fixture parses");
    PriceSeries::new(fixture.bars).expect("fixture is a valid series")
}

// Top edge at price 188.0, ten minutes before the session start.
fn session_viewport() -> Viewport {
    Viewport::new(
        Point::new(-100.0, -112_800.0),
        1.0,
        ZoomBounds::default(),
        true,
    )
    .expect("viewport")
}

#[test]
fn frame_holds_grid_then_labels_then_candles() {
    let renderer = renderer();
    let series = fixture_series();
    let viewport = session_viewport();
    let grid = renderer.build_grid(&viewport, SURFACE);
    let candles = renderer.build_candles(&series, &viewport, SURFACE);
    let frame = renderer.build_frame(&viewport, &series, SURFACE, FrameOverlay::default());

    assert_eq!(candles.len(), series.len());
    assert_eq!(frame.commands.len(), 2 * grid.len() + 2 * candles.len());
    assert_eq!(frame.background, palette::BACKGROUND);
    frame.validate().expect("frame geometry is valid");

    let (grid_lines, rest) = frame.commands.split_at(grid.len());
    let (labels, candle_commands) = rest.split_at(grid.len());
    assert!(grid_lines.iter().all(|command| matches!(
        command,
        DrawCommand::Line(line) if line.color == palette::GRID_LINE
    )));
    assert!(labels.iter().all(|command| matches!(
        command,
        DrawCommand::Text(text) if text.color == palette::GRID_LABEL
    )));
    for pair in candle_commands.chunks(2) {
        assert!(matches!(pair[0], DrawCommand::Line(_)));
        assert!(matches!(pair[1], DrawCommand::Rect(_)));
    }
}

#[test]
fn grid_lines_span_the_whole_surface() {
    let renderer = renderer();
    let viewport = session_viewport();
    let frame = renderer.build_frame(
        &viewport,
        &PriceSeries::empty(),
        SURFACE,
        FrameOverlay::default(),
    );
    let grid = renderer.build_grid(&viewport, SURFACE);

    assert_eq!(grid.vertical.len(), 13);
    assert_eq!(grid.horizontal.len(), 12);
    assert_eq!(frame.commands.len(), 2 * grid.len());

    let lines: Vec<_> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line.segment),
            _ => None,
        })
        .collect();
    for (segment, grid_line) in lines.iter().zip(grid.vertical.iter()) {
        assert_eq!(segment.start, Point::new(grid_line.pixel_position, 0.0));
        assert_eq!(segment.end, Point::new(grid_line.pixel_position, SURFACE.height));
    }
    for (segment, grid_line) in lines[grid.vertical.len()..].iter().zip(grid.horizontal.iter()) {
        assert_eq!(segment.start, Point::new(0.0, grid_line.pixel_position));
        assert_eq!(segment.end, Point::new(SURFACE.width, grid_line.pixel_position));
    }
}

#[test]
fn labels_carry_session_times_and_prices() {
    let renderer = renderer();
    let viewport = session_viewport();
    let grid = renderer.build_grid(&viewport, SURFACE);

    assert_eq!(grid.vertical[0].label, "09:20");
    assert_eq!(grid.vertical[1].label, "09:30");
    assert_eq!(grid.horizontal[0].label, "188.0");
    assert_eq!(grid.horizontal[1].label, "187.9");
}

#[test]
fn bars_far_outside_the_viewport_are_culled() {
    let renderer = renderer();
    let mut bars = fixture_series().bars().to_vec();
    let late = NaiveTime::from_hms_opt(15, 0, 0).expect("valid time");
    bars.push(OhlcBar::new(late, 187.0, 187.5, 186.5, 187.2).expect("bar"));
    let series = PriceSeries::new(bars).expect("series");
    let viewport = session_viewport();

    let visible = renderer.visible_bars(&series, &viewport, SURFACE);
    assert_eq!(visible.len(), series.len() - 1);
    assert!(visible.iter().all(|bar| bar.time != late));
}

#[test]
fn partially_visible_edge_bar_is_kept() {
    let renderer = renderer();
    let bar = OhlcBar::new(reference(), 187.0, 187.5, 186.5, 187.2).expect("bar");
    let series = PriceSeries::new(vec![bar]).expect("series");
    // Left edge half a minute past the bar center.
    let viewport = Viewport::new(
        Point::new(5.0, -112_800.0),
        1.0,
        ZoomBounds::default(),
        true,
    )
    .expect("viewport");

    assert_eq!(renderer.visible_bars(&series, &viewport, SURFACE).len(), 1);
}

#[test]
fn origin_marker_is_painted_last_and_scales_with_zoom() {
    let renderer = renderer();
    let viewport =
        Viewport::new(Point::new(-50.0, -20.0), 1.5, ZoomBounds::default(), true).expect("viewport");
    let frame = renderer.build_frame(
        &viewport,
        &PriceSeries::empty(),
        SURFACE,
        FrameOverlay {
            origin_marker: true,
        },
    );

    match frame.commands.last() {
        Some(DrawCommand::Circle(circle)) => {
            assert_eq!(circle.center, Point::new(75.0, 30.0));
            assert_eq!(circle.radius, 15.0);
            assert_eq!(circle.color, palette::ORIGIN_MARKER);
        }
        other => panic!("expected origin marker, got {other:?}"),
    }
}

#[test]
fn candle_colors_follow_direction() {
    assert_eq!(style_color(CandleStyle::Bullish), palette::CANDLE_BULLISH);
    assert_eq!(style_color(CandleStyle::Bearish), palette::CANDLE_BEARISH);

    let renderer = renderer();
    let series = PriceSeries::new(vec![
        OhlcBar::new(reference(), 187.0, 187.6, 186.9, 187.5).expect("bar"),
        OhlcBar::new(
            NaiveTime::from_hms_opt(9, 31, 0).expect("valid time"),
            187.5,
            187.6,
            186.9,
            187.1,
        )
        .expect("bar"),
    ])
    .expect("series");
    let frame = renderer.build_frame(&session_viewport(), &series, SURFACE, FrameOverlay::default());
    let mut surface = RecordingSurface::new(SURFACE);
    frame.submit(&mut surface).expect("submit");

    let colors: Vec<_> = surface.rects().map(|rect| rect.color).collect();
    assert_eq!(colors, vec![palette::CANDLE_BULLISH, palette::CANDLE_BEARISH]);
    assert_eq!(surface.background, Some(palette::BACKGROUND));
}

#[test]
fn submitted_commands_keep_insertion_order() {
    let body = RectPrimitive::new(Rect::new(10.0, 20.0, 9.0, 30.0), palette::CANDLE_BULLISH);
    let wick = LinePrimitive::new(
        LineSegment::new(Point::new(14.5, 5.0), Point::new(14.5, 60.0)),
        1.0,
        palette::CANDLE_BULLISH,
    );
    let frame = RenderFrame::new(SURFACE, palette::BACKGROUND)
        .with_command(DrawCommand::Rect(body))
        .with_command(DrawCommand::Line(wick));

    let stats = frame.stats();
    assert_eq!((stats.rects, stats.lines), (1, 1));

    let mut surface = RecordingSurface::new(SURFACE);
    frame.submit(&mut surface).expect("submit");
    assert_eq!(
        surface.commands,
        vec![DrawCommand::Rect(body), DrawCommand::Line(wick)]
    );
    assert_eq!(wick.segment.length(), 55.0);
}
