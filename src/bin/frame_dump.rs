use std::path::PathBuf;

use candle_viewport::api::{ChartConfig, ChartSession, ChartView, JsonSeriesSource, SeriesRequest};
use candle_viewport::interaction::{InputEvent, Key};
use candle_viewport::render::NullSurface;

const DEFAULT_SERIES_PATH: &str = "tests/fixtures/aapl_session.json";

#[derive(Debug)]
struct CliArgs {
    config_path: Option<PathBuf>,
    series_path: PathBuf,
    png_path: Option<PathBuf>,
    overlay: bool,
}

fn main() {
    let _ = candle_viewport::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let source = JsonSeriesSource::new(&args.series_path);
    let mut config = match &args.config_path {
        Some(path) => ChartConfig::from_json_file(path)
            .map_err(|err| format!("failed to load config `{}`: {err}", path.display()))?,
        None => ChartConfig::default(),
    };
    if args.config_path.is_none() {
        let raw = std::fs::read_to_string(&args.series_path).map_err(|err| {
            format!(
                "failed to read series `{}`: {err}",
                args.series_path.display()
            )
        })?;
        let fixture = JsonSeriesSource::parse_fixture(&raw)
            .map_err(|err| format!("failed to parse series fixture: {err}"))?;
        config.series = SeriesRequest::new(
            fixture.symbol,
            fixture.period.unwrap_or_else(|| config.series.period.clone()),
            fixture.interval.unwrap_or_else(|| config.series.interval.clone()),
        );
    }

    let mut session =
        ChartSession::new(config).map_err(|err| format!("invalid chart config: {err}"))?;
    session
        .refresh_series(&source)
        .map_err(|err| format!("failed to load series: {err}"))?;
    if args.overlay {
        session.on_event(&InputEvent::KeyDown { key: Key::F3 });
        session.on_event(&InputEvent::KeyUp { key: Key::F3 });
    }

    let mut surface = NullSurface::new(session.surface_size());
    session
        .render_frame(&mut surface)
        .map_err(|err| format!("frame submission failed: {err}"))?;

    if let Some(path) = &args.png_path {
        write_png(&session, path)?;
    }

    let snapshot = session
        .snapshot_json_pretty()
        .map_err(|err| format!("failed to serialize snapshot: {err}"))?;
    println!("{snapshot}");
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn write_png(session: &ChartSession, path: &std::path::Path) -> Result<(), String> {
    use candle_viewport::render::CairoSurface;

    let size = session.surface_size();
    let mut surface = CairoSurface::offscreen(size.width.round() as i32, size.height.round() as i32)
        .map_err(|err| format!("failed to create cairo surface: {err}"))?;
    session
        .build_frame()
        .submit(&mut surface)
        .map_err(|err| format!("cairo rendering failed: {err}"))?;
    surface
        .write_png(path)
        .map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_session: &ChartSession, _path: &std::path::Path) -> Result<(), String> {
    Err("--png requires feature `cairo-backend`".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut config_path: Option<PathBuf> = None;
    let mut series_path = PathBuf::from(DEFAULT_SERIES_PATH);
    let mut png_path: Option<PathBuf> = None;
    let mut overlay = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--series" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --series".to_owned())?;
                series_path = PathBuf::from(value);
            }
            "--png" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --png".to_owned())?;
                png_path = Some(PathBuf::from(value));
            }
            "--overlay" => overlay = true,
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        config_path,
        series_path,
        png_path,
        overlay,
    })
}

fn usage_message() -> String {
    format!(
        "Usage: frame_dump [--config <path>] [--series <path>] [--png <path>] [--overlay]\n\
         \n\
         Loads a series fixture (default `{DEFAULT_SERIES_PATH}`), renders one\n\
         headless frame and prints the session snapshot as JSON."
    )
}
