use candle_viewport::core::{
    Axis, AxisSpacing, CandleGeometryBuilder, CandleStyle, GridGenerator, OhlcBar, Point, Vector,
    Viewport, ZoomBounds,
};
use chrono::NaiveTime;
use proptest::prelude::*;

const EPS: f64 = 1e-6;

fn reference() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).expect("valid time")
}

fn spacing() -> AxisSpacing {
    AxisSpacing::new(Vector::new(10.0, 0.1), Vector::new(100.0, 60.0)).expect("valid spacing")
}

fn viewport(origin: Point, zoom: f64) -> Viewport {
    Viewport::new(origin, zoom, ZoomBounds::default(), true).expect("valid viewport")
}

proptest! {
    #[test]
    fn grid_spacing_is_phase_invariant_property(
        origin_x in -100_000.0f64..100_000.0,
        zoom in 0.5f64..=2.0,
        extent in 1.0f64..3_000.0
    ) {
        let viewport = viewport(Point::new(origin_x, 0.0), zoom);
        let lines = GridGenerator::new(spacing(), reference())
            .axis_lines(Axis::Vertical, &viewport, extent);

        for line in &lines {
            prop_assert!(line.pixel_position >= -EPS);
            prop_assert!(line.pixel_position <= extent + EPS);
        }
        for pair in lines.windows(2) {
            prop_assert_eq!(pair[1].tick_index, pair[0].tick_index + 1);
            prop_assert!((pair[1].pixel_position - pair[0].pixel_position - 100.0 * zoom).abs() <= EPS);
        }
        let pitch = 100.0 * zoom;
        prop_assert!(lines.len() as f64 <= extent / pitch + 2.0);
        prop_assert!(lines.len() as f64 >= (extent / pitch).floor());
    }

    #[test]
    fn zero_tick_present_iff_origin_visible_property(
        origin_y in -5_000.0f64..5_000.0,
        zoom in 0.5f64..=2.0,
        extent in 1.0f64..2_000.0
    ) {
        let viewport = viewport(Point::new(0.0, origin_y), zoom);
        let lines = GridGenerator::new(spacing(), reference())
            .axis_lines(Axis::Horizontal, &viewport, extent);

        let zero_pixel = -origin_y * zoom;
        let zero_visible = zero_pixel >= -1e-7 && zero_pixel <= extent + 1e-7;
        let zero_count = lines.iter().filter(|line| line.tick_index == 0).count();
        prop_assert_eq!(zero_count, usize::from(zero_visible));
    }

    #[test]
    fn wick_spans_body_property(
        open in 1.0f64..1_000.0,
        close in 1.0f64..1_000.0,
        above in 0.0f64..50.0,
        below in 0.0f64..0.99,
        minute in 0u32..60,
        zoom in 0.5f64..=2.0
    ) {
        let high = open.max(close) + above;
        let low = open.min(close) * (1.0 - below);
        let time = NaiveTime::from_hms_opt(10, minute, 0).expect("valid time");
        let bar = OhlcBar::new(time, open, high, low, close).expect("valid bar");
        let builder = CandleGeometryBuilder::new(spacing(), reference(), 1.0).expect("builder");
        let candle = builder.build(&bar, &viewport(Point::new(0.0, -60_000.0), zoom));

        prop_assert!(candle.body.width >= 0.0);
        prop_assert!(candle.body.height >= 0.0);
        prop_assert!(candle.wick.start.y <= candle.body.top() + EPS);
        prop_assert!(candle.wick.end.y >= candle.body.bottom() - EPS);
        prop_assert!((candle.wick.start.x - candle.body.center_x()).abs() <= EPS);
        let expected = if close > open { CandleStyle::Bullish } else { CandleStyle::Bearish };
        prop_assert_eq!(candle.style, expected);
    }
}
