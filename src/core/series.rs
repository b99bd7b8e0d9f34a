use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::core::candlestick::OhlcBar;
use crate::core::primitives::minutes_since;
use crate::error::{ChartError, ChartResult};

/// Time-ordered, validated OHLC sequence.
///
/// Construction is the ingestion boundary: once a `PriceSeries` exists every
/// bar is finite, internally consistent and strictly later than its
/// predecessor.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceSeries {
    bars: Vec<OhlcBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<OhlcBar>) -> ChartResult<Self> {
        for bar in &bars {
            bar.validate()?;
        }
        if let Some(pair) = bars.windows(2).find(|pair| pair[1].time <= pair[0].time) {
            return Err(ChartError::InvalidData(format!(
                "bar timestamps must be strictly increasing: {} follows {}",
                pair[1].time, pair[0].time
            )));
        }
        Ok(Self { bars })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bars(&self) -> &[OhlcBar] {
        &self.bars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars whose time lies in `[start_minutes, end_minutes]` relative to
    /// `reference`.
    #[must_use]
    pub fn bars_between(
        &self,
        reference: NaiveTime,
        start_minutes: f64,
        end_minutes: f64,
    ) -> &[OhlcBar] {
        if start_minutes > end_minutes {
            return &[];
        }
        let start = self
            .bars
            .partition_point(|bar| minutes_since(reference, bar.time) < start_minutes);
        let end = self
            .bars
            .partition_point(|bar| minutes_since(reference, bar.time) <= end_minutes);
        &self.bars[start..end.max(start)]
    }

    /// `(min low, max high)` over the series, `None` when empty.
    #[must_use]
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.bars.iter().fold(None, |range, bar| match range {
            None => Some((bar.low, bar.high)),
            Some((low, high)) => Some((low.min(bar.low), high.max(bar.high))),
        })
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bars = Vec::<OhlcBar>::deserialize(deserializer)?;
        Self::new(bars).map_err(serde::de::Error::custom)
    }
}
