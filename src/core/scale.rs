use serde::{Deserialize, Serialize};

use crate::core::ticks::{DEFAULT_TICK_COUNT, nice_linear_domain};
use crate::error::{ChartError, ChartResult};

/// Continuous numeric scale mapping `domain` onto a pixel `range`.
///
/// A collapsed domain (`start == end`) maps every value to the middle of the
/// range, so single-valued datasets still render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Rounds both domain ends outward to the default tick increment.
    #[must_use]
    pub fn nice(self) -> Self {
        self.nice_with_count(DEFAULT_TICK_COUNT)
    }

    #[must_use]
    pub fn nice_with_count(self, count: usize) -> Self {
        let (domain_start, domain_end) =
            nice_linear_domain(self.domain_start, self.domain_end, count);
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        let normalized = if range_span == 0.0 {
            0.5
        } else {
            (pixel - self.range_start) / range_span
        };
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}
