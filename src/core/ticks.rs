//! Tick-increment math behind "nice" scale rounding.
//!
//! Linear domains snap to 1/2/5 × 10ⁿ increments. Time domains snap to the
//! calendar interval whose duration best matches `span / count`.

use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Default tick count targeted when rounding domains.
pub const DEFAULT_TICK_COUNT: usize = 10;

const NICE_MAX_ITERATIONS: usize = 10;

const MILLIS_PER_SECOND: f64 = 1_000.0;
const MILLIS_PER_MINUTE: f64 = MILLIS_PER_SECOND * 60.0;
const MILLIS_PER_HOUR: f64 = MILLIS_PER_MINUTE * 60.0;
const MILLIS_PER_DAY: f64 = MILLIS_PER_HOUR * 24.0;
const MILLIS_PER_WEEK: f64 = MILLIS_PER_DAY * 7.0;
const MILLIS_PER_MONTH: f64 = MILLIS_PER_DAY * 30.0;
const MILLIS_PER_YEAR: f64 = MILLIS_PER_DAY * 365.0;

/// Signed tick increment: positive values are the step itself, negative
/// values `-k` mean a step of `1 / k` (keeps sub-unit steps exact).
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Unsigned tick step between `start` and `stop` (sign follows direction).
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let magnitude = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -magnitude } else { magnitude }
}

/// Extends `(start, stop)` outward to multiples of the tick increment.
///
/// Iterates until the increment is stable; when it never stabilizes (or the
/// span is degenerate) the input domain is returned unchanged.
#[must_use]
pub fn nice_linear_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    if !lo.is_finite() || !hi.is_finite() || hi <= lo {
        return (start, stop);
    }
    let mut previous_step: Option<f64> = None;

    for _ in 0..NICE_MAX_ITERATIONS {
        let step = tick_increment(lo, hi, count);
        if previous_step == Some(step) {
            return if reverse { (hi, lo) } else { (lo, hi) };
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    (start, stop)
}

/// Calendar unit underlying a [`CalendarInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// A calendar unit repeated every `step` units, aligned to the unit's
/// parent field (seconds within the minute, days within the month, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInterval {
    pub unit: CalendarUnit,
    pub step: u32,
}

const TICK_INTERVALS: [(CalendarUnit, u32, f64); 18] = [
    (CalendarUnit::Second, 1, MILLIS_PER_SECOND),
    (CalendarUnit::Second, 5, 5.0 * MILLIS_PER_SECOND),
    (CalendarUnit::Second, 15, 15.0 * MILLIS_PER_SECOND),
    (CalendarUnit::Second, 30, 30.0 * MILLIS_PER_SECOND),
    (CalendarUnit::Minute, 1, MILLIS_PER_MINUTE),
    (CalendarUnit::Minute, 5, 5.0 * MILLIS_PER_MINUTE),
    (CalendarUnit::Minute, 15, 15.0 * MILLIS_PER_MINUTE),
    (CalendarUnit::Minute, 30, 30.0 * MILLIS_PER_MINUTE),
    (CalendarUnit::Hour, 1, MILLIS_PER_HOUR),
    (CalendarUnit::Hour, 3, 3.0 * MILLIS_PER_HOUR),
    (CalendarUnit::Hour, 6, 6.0 * MILLIS_PER_HOUR),
    (CalendarUnit::Hour, 12, 12.0 * MILLIS_PER_HOUR),
    (CalendarUnit::Day, 1, MILLIS_PER_DAY),
    (CalendarUnit::Day, 2, 2.0 * MILLIS_PER_DAY),
    (CalendarUnit::Week, 1, MILLIS_PER_WEEK),
    (CalendarUnit::Month, 1, MILLIS_PER_MONTH),
    (CalendarUnit::Month, 3, 3.0 * MILLIS_PER_MONTH),
    (CalendarUnit::Year, 1, MILLIS_PER_YEAR),
];

impl CalendarInterval {
    #[must_use]
    pub fn new(unit: CalendarUnit, step: u32) -> Self {
        Self {
            unit,
            step: step.max(1),
        }
    }

    /// Picks the interval producing roughly `count` ticks over the span.
    #[must_use]
    pub fn for_span(start_ms: f64, stop_ms: f64, count: usize) -> Self {
        let target = (stop_ms - start_ms).abs() / count as f64;
        let index = TICK_INTERVALS.partition_point(|(_, _, duration)| *duration <= target);

        if index == TICK_INTERVALS.len() {
            let step = tick_step(start_ms / MILLIS_PER_YEAR, stop_ms / MILLIS_PER_YEAR, count);
            return Self::new(CalendarUnit::Year, step.abs().floor() as u32);
        }
        if index == 0 {
            let step = tick_step(start_ms, stop_ms, count).abs().max(1.0);
            return Self::new(CalendarUnit::Millisecond, step.floor() as u32);
        }

        let (below_unit, below_step, below_duration) = TICK_INTERVALS[index - 1];
        let (above_unit, above_step, above_duration) = TICK_INTERVALS[index];
        if target / below_duration < above_duration / target {
            Self::new(below_unit, below_step)
        } else {
            Self::new(above_unit, above_step)
        }
    }

    /// Latest interval boundary at or before `time`.
    #[must_use]
    pub fn floor(self, time: DateTime<Utc>) -> DateTime<Utc> {
        match self.unit {
            CalendarUnit::Millisecond => {
                let step = i64::from(self.step);
                let millis = time.timestamp_millis().div_euclid(step) * step;
                Utc.timestamp_millis_opt(millis).single().unwrap_or(time)
            }
            CalendarUnit::Year => {
                let step = self.step as i32;
                let year = time.year().div_euclid(step) * step;
                start_of_year(year).unwrap_or(time)
            }
            _ => {
                let mut candidate = floor_unit(self.unit, time);
                while !self.is_aligned(candidate) {
                    let before = candidate - Duration::milliseconds(1);
                    candidate = floor_unit(self.unit, before);
                }
                candidate
            }
        }
    }

    /// Earliest interval boundary at or after `time`.
    #[must_use]
    pub fn ceil(self, time: DateTime<Utc>) -> DateTime<Utc> {
        let floored = self.floor(time);
        if floored == time {
            return time;
        }
        self.next_boundary(floored)
    }

    fn next_boundary(self, boundary: DateTime<Utc>) -> DateTime<Utc> {
        match self.unit {
            CalendarUnit::Millisecond => boundary + Duration::milliseconds(i64::from(self.step)),
            CalendarUnit::Year => {
                start_of_year(boundary.year() + self.step as i32).unwrap_or(boundary)
            }
            _ => {
                let mut candidate = advance_unit(self.unit, boundary);
                while !self.is_aligned(candidate) {
                    candidate = advance_unit(self.unit, candidate);
                }
                candidate
            }
        }
    }

    fn is_aligned(self, time: DateTime<Utc>) -> bool {
        let field = match self.unit {
            CalendarUnit::Second => time.second(),
            CalendarUnit::Minute => time.minute(),
            CalendarUnit::Hour => time.hour(),
            CalendarUnit::Day => time.day() - 1,
            CalendarUnit::Month => time.month0(),
            CalendarUnit::Week | CalendarUnit::Millisecond | CalendarUnit::Year => return true,
        };
        field % self.step == 0
    }
}

/// Extends a time domain (epoch milliseconds) to calendar-aligned bounds.
#[must_use]
pub fn nice_time_domain(start_ms: f64, stop_ms: f64, count: usize) -> (f64, f64) {
    let reverse = stop_ms < start_ms;
    let (lo, hi) = if reverse {
        (stop_ms, start_ms)
    } else {
        (start_ms, stop_ms)
    };
    let (Some(lo_time), Some(hi_time)) = (
        Utc.timestamp_millis_opt(lo.floor() as i64).single(),
        Utc.timestamp_millis_opt(hi.ceil() as i64).single(),
    ) else {
        return (start_ms, stop_ms);
    };

    let interval = CalendarInterval::for_span(lo, hi, count);
    let nice_lo = interval.floor(lo_time).timestamp_millis() as f64;
    let nice_hi = interval.ceil(hi_time).timestamp_millis() as f64;
    if reverse {
        (nice_hi, nice_lo)
    } else {
        (nice_lo, nice_hi)
    }
}

fn start_of_year(year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}

fn floor_unit(unit: CalendarUnit, time: DateTime<Utc>) -> DateTime<Utc> {
    let date = time.date_naive();
    let floored = match unit {
        CalendarUnit::Millisecond => return time,
        CalendarUnit::Second => date.and_hms_opt(time.hour(), time.minute(), time.second()),
        CalendarUnit::Minute => date.and_hms_opt(time.hour(), time.minute(), 0),
        CalendarUnit::Hour => date.and_hms_opt(time.hour(), 0, 0),
        CalendarUnit::Day => date.and_hms_opt(0, 0, 0),
        CalendarUnit::Week => {
            let back = i64::from(date.weekday().num_days_from_sunday());
            (date - Duration::days(back)).and_hms_opt(0, 0, 0)
        }
        CalendarUnit::Month => date.with_day(1).and_then(|first| first.and_hms_opt(0, 0, 0)),
        CalendarUnit::Year => date
            .with_day(1)
            .and_then(|first| first.with_month(1))
            .and_then(|first| first.and_hms_opt(0, 0, 0)),
    };
    floored.map_or(time, |naive| naive.and_utc())
}

fn advance_unit(unit: CalendarUnit, time: DateTime<Utc>) -> DateTime<Utc> {
    match unit {
        CalendarUnit::Millisecond => time + Duration::milliseconds(1),
        CalendarUnit::Second => time + Duration::seconds(1),
        CalendarUnit::Minute => time + Duration::minutes(1),
        CalendarUnit::Hour => time + Duration::hours(1),
        CalendarUnit::Day => time + Duration::days(1),
        CalendarUnit::Week => time + Duration::weeks(1),
        CalendarUnit::Month => time.checked_add_months(Months::new(1)).unwrap_or(time),
        CalendarUnit::Year => time.checked_add_months(Months::new(12)).unwrap_or(time),
    }
}
