use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::primitives::{datetime_to_millis, millis_to_datetime};
use crate::core::ticks::{DEFAULT_TICK_COUNT, nice_time_domain};
use crate::error::ChartResult;

/// Time axis scale over epoch milliseconds.
///
/// Mapping is linear in elapsed time; `nice` snaps both ends to the calendar
/// interval (UTC) that yields roughly ten ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start_ms: f64, end_ms: f64, range_start: f64, range_end: f64) -> ChartResult<Self> {
        Ok(Self {
            linear: LinearScale::new(start_ms, end_ms, range_start, range_end)?,
        })
    }

    pub fn from_datetimes(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_millis(start),
            datetime_to_millis(end),
            range_start,
            range_end,
        )
    }

    /// Domain as epoch milliseconds.
    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    pub fn domain_datetimes(self) -> ChartResult<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, end) = self.linear.domain();
        Ok((millis_to_datetime(start)?, millis_to_datetime(end)?))
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn nice(self) -> Self {
        let (start, end) = self.linear.domain();
        let (range_start, range_end) = self.linear.range();
        let (start, end) = nice_time_domain(start, end, DEFAULT_TICK_COUNT);
        match LinearScale::new(start, end, range_start, range_end) {
            Ok(linear) => Self { linear },
            Err(_) => self,
        }
    }

    pub fn millis_to_pixel(self, millis: f64) -> ChartResult<f64> {
        self.linear.domain_to_pixel(millis)
    }

    pub fn pixel_to_millis(self, pixel: f64) -> ChartResult<f64> {
        self.linear.pixel_to_domain(pixel)
    }

    pub fn time_to_pixel(self, time: DateTime<Utc>) -> ChartResult<f64> {
        self.millis_to_pixel(datetime_to_millis(time))
    }

    pub fn pixel_to_time(self, pixel: f64) -> ChartResult<DateTime<Utc>> {
        millis_to_datetime(self.pixel_to_millis(pixel)?)
    }
}

#[cfg(test)]
mod tests {
    use super::TimeScale;
    use chrono::{TimeZone, Utc};

    #[test]
    fn maps_midpoint_of_a_day() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("start");
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).single().expect("end");
        let scale = TimeScale::from_datetimes(start, end, 0.0, 240.0).expect("scale");

        let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().expect("noon");
        assert_eq!(scale.time_to_pixel(noon).expect("px"), 120.0);
        assert_eq!(scale.pixel_to_time(120.0).expect("time"), noon);
    }

    #[test]
    fn nice_extends_to_calendar_days() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).single().expect("start");
        let end = Utc.with_ymd_and_hms(2024, 1, 9, 19, 0, 0).single().expect("end");
        let scale = TimeScale::from_datetimes(start, end, 0.0, 100.0)
            .expect("scale")
            .nice();

        let (lo, hi) = scale.domain_datetimes().expect("datetimes");
        assert_eq!(lo, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("lo"));
        assert_eq!(hi, Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).single().expect("hi"));
    }
}
