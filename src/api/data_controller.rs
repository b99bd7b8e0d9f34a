use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{OhlcBar, PriceSeries};
use crate::error::{ChartError, ChartResult};

use super::ChartSession;

/// Which series to retrieve from a [`PriceSeriesSource`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub symbol: String,
    pub period: String,
    pub interval: String,
}

impl SeriesRequest {
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        period: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            period: period.into(),
            interval: interval.into(),
        }
    }
}

impl Default for SeriesRequest {
    fn default() -> Self {
        Self::new("AAPL", "1d", "1m")
    }
}

/// Market-data collaborator.
///
/// Failures are whole-series errors; a source never returns a partial series.
/// Retry and caching policy belong to the implementation.
pub trait PriceSeriesSource {
    fn fetch_series(&self, request: &SeriesRequest) -> ChartResult<Vec<OhlcBar>>;
}

/// In-memory source keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct StaticSeriesSource {
    series: IndexMap<String, Vec<OhlcBar>>,
}

impl StaticSeriesSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_series(mut self, symbol: impl Into<String>, bars: Vec<OhlcBar>) -> Self {
        self.series.insert(symbol.into(), bars);
        self
    }
}

impl PriceSeriesSource for StaticSeriesSource {
    fn fetch_series(&self, request: &SeriesRequest) -> ChartResult<Vec<OhlcBar>> {
        self.series.get(&request.symbol).cloned().ok_or_else(|| {
            ChartError::DataSource(format!("no series for symbol `{}`", request.symbol))
        })
    }
}

/// On-disk series fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesFixture {
    pub symbol: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
    pub bars: Vec<OhlcBar>,
}

/// Source reading a [`SeriesFixture`] JSON file on every fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSeriesSource {
    path: PathBuf,
}

impl JsonSeriesSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse_fixture(raw: &str) -> ChartResult<SeriesFixture> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl PriceSeriesSource for JsonSeriesSource {
    fn fetch_series(&self, request: &SeriesRequest) -> ChartResult<Vec<OhlcBar>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|err| {
            ChartError::DataSource(format!("failed to read `{}`: {err}", self.path.display()))
        })?;
        let fixture = Self::parse_fixture(&raw)?;
        if fixture.symbol != request.symbol {
            return Err(ChartError::DataSource(format!(
                "fixture `{}` holds `{}`, requested `{}`",
                self.path.display(),
                fixture.symbol,
                request.symbol
            )));
        }
        Ok(fixture.bars)
    }
}

impl ChartSession {
    /// Latest successfully ingested series.
    #[must_use]
    pub fn series(&self) -> Arc<PriceSeries> {
        Arc::clone(&self.series)
    }

    #[must_use]
    pub fn last_fetch_error(&self) -> Option<&str> {
        self.last_fetch_error.as_deref()
    }

    /// Validates `bars` and swaps them in as the current snapshot.
    ///
    /// Invalid input leaves the previous snapshot untouched.
    pub fn set_series(&mut self, bars: Vec<OhlcBar>) -> ChartResult<()> {
        let bar_count = bars.len();
        let series = PriceSeries::new(bars)?;
        let first_load = self.series.is_empty() && !series.is_empty();
        debug!(bars = bar_count, first_load, "series snapshot replaced");
        self.series = Arc::new(series);
        self.last_fetch_error = None;
        if first_load && self.config.focus_on_load {
            self.focus_latest_bar();
            self.focus_pending = !self.surface_known;
        }
        Ok(())
    }

    /// Applies the outcome of a fetch made elsewhere (for example on a worker).
    ///
    /// Errors are logged and returned; the previous snapshot keeps rendering.
    pub fn apply_fetch_result(&mut self, result: ChartResult<Vec<OhlcBar>>) -> ChartResult<()> {
        let outcome = result.and_then(|bars| self.set_series(bars));
        if let Err(err) = &outcome {
            warn!(
                error = %err,
                symbol = %self.config.series.symbol,
                kept_bars = self.series.len(),
                "series update failed, keeping previous snapshot"
            );
            self.last_fetch_error = Some(err.to_string());
        }
        outcome
    }

    /// Fetches the configured series from `source` and applies it.
    pub fn refresh_series(&mut self, source: &dyn PriceSeriesSource) -> ChartResult<()> {
        let result = source.fetch_series(&self.config.series);
        self.apply_fetch_result(result)
    }

    /// Series identification kept in insertion order for stable snapshots.
    #[must_use]
    pub fn series_metadata(&self) -> IndexMap<String, String> {
        let request = &self.config.series;
        let mut metadata = IndexMap::new();
        metadata.insert("symbol".to_owned(), request.symbol.clone());
        metadata.insert("period".to_owned(), request.period.clone());
        metadata.insert("interval".to_owned(), request.interval.clone());
        metadata.insert("bars".to_owned(), self.series.len().to_string());
        metadata
    }
}
