use serde::{Deserialize, Serialize};

use crate::core::domain::{ContinuousDomain, ContinuousKind, ScaleKind, XDomain};
use crate::core::{BandScale, LinearScale, TimeScale, XValue};
use crate::error::{ChartError, ChartResult};

/// How ordinal domains are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrdinalStyle {
    /// Evenly spaced points with `padding` step units at each end.
    Point { padding: f64 },
    /// Bars separated by roughly `bar_padding_px` pixels.
    Band { bar_padding_px: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XScaleOptions {
    pub ordinal: OrdinalStyle,
    pub nice_linear: bool,
    pub nice_time: bool,
}

/// X scale variant selected by the domain kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XScale {
    Point(BandScale),
    Band(BandScale),
    Linear(LinearScale),
    Time(TimeScale),
}

impl XScale {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Point(_) | Self::Band(_) => ScaleKind::Ordinal,
            Self::Linear(_) => ScaleKind::Linear,
            Self::Time(_) => ScaleKind::Time,
        }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Point(scale) | Self::Band(scale) => scale.range(),
            Self::Linear(scale) => scale.range(),
            Self::Time(scale) => scale.range(),
        }
    }

    /// Domain after any nice rounding.
    #[must_use]
    pub fn domain(&self) -> XDomain {
        match self {
            Self::Point(scale) | Self::Band(scale) => XDomain::Ordinal(scale.domain()),
            Self::Linear(scale) => {
                let (start, end) = scale.domain();
                XDomain::Continuous(ContinuousDomain::linear(start, end))
            }
            Self::Time(scale) => {
                let (start, end) = scale.domain();
                XDomain::Continuous(ContinuousDomain::time(start, end))
            }
        }
    }

    #[must_use]
    pub fn as_ordinal(&self) -> Option<&BandScale> {
        match self {
            Self::Point(scale) | Self::Band(scale) => Some(scale),
            _ => None,
        }
    }

    /// Pixel position of an X value; `None` when the value does not belong to
    /// this scale's kind or ordinal domain.
    #[must_use]
    pub fn position(&self, value: &XValue) -> Option<f64> {
        match (self, value) {
            (Self::Point(scale) | Self::Band(scale), _) => scale.position(value),
            (Self::Linear(scale), XValue::Number(number)) => scale.domain_to_pixel(*number).ok(),
            (Self::Time(scale), XValue::Time(time)) => scale.time_to_pixel(*time).ok(),
            (Self::Time(scale), XValue::Number(millis)) => scale.millis_to_pixel(*millis).ok(),
            _ => None,
        }
    }

    /// Pixel position of a raw continuous value (epoch ms for time).
    pub fn position_raw(&self, raw: f64) -> ChartResult<f64> {
        match self {
            Self::Linear(scale) => scale.domain_to_pixel(raw),
            Self::Time(scale) => scale.millis_to_pixel(raw),
            Self::Point(_) | Self::Band(_) => Err(ChartError::DomainMismatch(
                "ordinal scales have no continuous positions".to_owned(),
            )),
        }
    }

    /// Inverse mapping for continuous scales.
    pub fn invert(&self, pixel: f64) -> ChartResult<f64> {
        match self {
            Self::Linear(scale) => scale.pixel_to_domain(pixel),
            Self::Time(scale) => scale.pixel_to_millis(pixel),
            Self::Point(_) | Self::Band(_) => Err(ChartError::DomainMismatch(
                "ordinal scales are not invertible".to_owned(),
            )),
        }
    }
}

/// Inner padding that keeps roughly `bar_padding_px` between bars.
#[must_use]
pub fn bar_band_padding(category_count: usize, width: f64, bar_padding_px: f64) -> f64 {
    category_count as f64 / (width / bar_padding_px + 1.0)
}

/// Builds the X scale over `[0, width]`.
pub fn build_x_scale(domain: &XDomain, width: f64, options: XScaleOptions) -> ChartResult<XScale> {
    let range = (0.0, width);
    match domain {
        XDomain::Ordinal(values) => match options.ordinal {
            OrdinalStyle::Point { padding } => {
                Ok(XScale::Point(BandScale::point(values.iter().cloned(), range, padding)?))
            }
            OrdinalStyle::Band { bar_padding_px } => {
                let unique = BandScale::band(values.iter().cloned(), range, 0.0)?;
                let padding_inner = bar_band_padding(unique.len(), width, bar_padding_px);
                Ok(XScale::Band(BandScale::band(
                    unique.domain(),
                    range,
                    padding_inner,
                )?))
            }
        },
        XDomain::Continuous(continuous) => match continuous.kind {
            ContinuousKind::Linear => {
                let scale = LinearScale::new(continuous.start, continuous.end, 0.0, width)?;
                Ok(XScale::Linear(if options.nice_linear {
                    scale.nice()
                } else {
                    scale
                }))
            }
            ContinuousKind::Time => {
                let scale = TimeScale::new(continuous.start, continuous.end, 0.0, width)?;
                Ok(XScale::Time(if options.nice_time {
                    scale.nice()
                } else {
                    scale
                }))
            }
        },
    }
}

/// Builds the Y scale over `[height, 0]` (pixel Y grows downward).
pub fn build_y_scale(domain: (f64, f64), height: f64, nice: bool) -> ChartResult<LinearScale> {
    let scale = LinearScale::new(domain.0, domain.1, height, 0.0)?;
    Ok(if nice { scale.nice() } else { scale })
}
