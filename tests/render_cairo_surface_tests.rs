#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use candle_viewport::ChartError;
use candle_viewport::api::{ChartConfig, ChartSession, ChartView, StaticSeriesSource};
use candle_viewport::core::{OhlcBar, SurfaceSize};
use candle_viewport::interaction::{InputEvent, Key};
use candle_viewport::render::{CairoSurface, DrawingSurface};
use chrono::NaiveTime;

fn session_with_bars() -> ChartSession {
    let bars = (0..5)
        .map(|minute| {
            let time = NaiveTime::from_hms_opt(9, 30 + minute, 0).expect("valid time");
            let open = 100.0 + f64::from(minute) * 0.1;
            OhlcBar::new(time, open, open + 0.3, open - 0.2, open + 0.15).expect("bar")
        })
        .collect();
    let source = StaticSeriesSource::new().with_series("AAPL", bars);
    let mut session = ChartSession::new(ChartConfig::default()).expect("session");
    session.refresh_series(&source).expect("series");
    session
}

#[test]
fn cairo_surface_rejects_invalid_size() {
    let err = CairoSurface::offscreen(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidSurface { .. }));
}

#[test]
fn cairo_surface_renders_session_frame() {
    let mut session = session_with_bars();
    session.on_event(&InputEvent::KeyDown { key: Key::F3 });
    let mut surface = CairoSurface::offscreen(900, 500).expect("surface");

    session.render_frame(&mut surface).expect("render");

    assert_eq!(surface.size(), SurfaceSize::new(900.0, 500.0));
    assert_eq!(surface.backend_name(), "cairo+pango+pangocairo");
    assert_eq!(session.frames_rendered(), 1);
}

#[test]
fn cairo_surface_can_draw_on_external_context() {
    let mut session = session_with_bars();
    let image = ImageSurface::create(Format::ARgb32, 600, 320).expect("image");
    let context = Context::new(&image).expect("context");
    let mut surface =
        CairoSurface::on_context(context, SurfaceSize::new(600.0, 320.0)).expect("surface");

    session.render_frame(&mut surface).expect("render");

    let path = std::env::temp_dir().join("candle_viewport_context_surface.png");
    assert!(matches!(
        surface.write_png(&path),
        Err(ChartError::Backend(_))
    ));
}

#[test]
fn offscreen_surface_writes_png() {
    let session = session_with_bars();
    let mut surface = CairoSurface::offscreen(640, 360).expect("surface");
    session.build_frame().submit(&mut surface).expect("submit");

    let path = std::env::temp_dir().join(format!(
        "candle_viewport_offscreen_{}.png",
        std::process::id()
    ));
    surface.write_png(&path).expect("png written");
    let bytes = std::fs::read(&path).expect("png readable");
    std::fs::remove_file(&path).expect("cleanup");

    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}
