use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts epoch milliseconds back into a UTC timestamp.
///
/// Fractional milliseconds are truncated toward zero, matching how calendar
/// dates carry integral milliseconds.
pub fn millis_to_datetime(millis: f64) -> ChartResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(ChartError::InvalidData(
            "time value must be finite".to_owned(),
        ));
    }
    DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64).ok_or_else(|| {
        ChartError::InvalidData(format!("time value {millis} is out of calendar range"))
    })
}
