use chrono::{NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Signed minutes from `reference` to `time` within one trading day.
#[must_use]
pub fn minutes_since(reference: NaiveTime, time: NaiveTime) -> f64 {
    time.signed_duration_since(reference).num_seconds() as f64 / 60.0
}

/// Wall-clock time `minutes` after `reference`, wrapping around midnight.
#[must_use]
pub fn time_after_minutes(reference: NaiveTime, minutes: f64) -> NaiveTime {
    let seconds = (minutes * 60.0).round() as i64;
    let (time, _wrapped_days) =
        reference.overflowing_add_signed(TimeDelta::try_seconds(seconds).unwrap_or_default());
    time
}

/// Most fractional digits a price label is printed with.
pub const MAX_PRICE_DECIMALS: u32 = 8;

/// Smallest price tick whose neighbouring labels stay distinct at
/// [`MAX_PRICE_DECIMALS`].
pub const MIN_PRICE_STEP: f64 = 1e-8;

/// Number of fractional digits needed to print multiples of `step` exactly,
/// capped at [`MAX_PRICE_DECIMALS`].
#[must_use]
pub fn decimals_for_step(step: f64) -> u32 {
    Decimal::from_f64(step)
        .map(|value| value.normalize().scale())
        .unwrap_or(2)
        .min(MAX_PRICE_DECIMALS)
}

/// Formats a price label with a fixed number of decimals, never printing `-0`.
#[must_use]
pub fn format_price(value: f64, decimals: u32) -> String {
    let precision = decimals as usize;
    let formatted = format!("{value:.precision$}");
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        return formatted[1..].to_owned();
    }
    formatted
}
