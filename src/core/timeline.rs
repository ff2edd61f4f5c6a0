use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::domain::XDomain;
use crate::core::layout::{Margins, ViewDimensions};
use crate::core::x_scale::{XScale, XScaleOptions, build_x_scale, build_y_scale};
use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Size of the overview strip drawn under the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineOptions {
    #[serde(default = "default_timeline_height")]
    pub height: f64,
    #[serde(default = "default_timeline_padding")]
    pub padding: f64,
}

fn default_timeline_height() -> f64 {
    50.0
}

fn default_timeline_padding() -> f64 {
    10.0
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            height: default_timeline_height(),
            padding: default_timeline_padding(),
        }
    }
}

impl TimelineOptions {
    /// Plot height given up to the strip.
    #[must_use]
    pub fn reserved_height(self, margins: Margins) -> f64 {
        self.height + margins.bottom + self.padding
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ChartError::InvalidData(
                "timeline height must be finite and > 0".to_owned(),
            ));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ChartError::InvalidData(
                "timeline padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Scales of the overview strip, independent from any brush filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMirror {
    pub x_domain: XDomain,
    pub x_scale: XScale,
    pub y_scale: LinearScale,
    pub width: f64,
    pub height: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

/// Builds the overview scales over the full, unfiltered X domain.
///
/// `full_x_domain` must be computed from the whole dataset; the strip spans
/// the plot width and sits `margins.bottom` above the bottom edge.
pub fn mirror_timeline(
    full_x_domain: &XDomain,
    y_domain: (f64, f64),
    dims: ViewDimensions,
    margins: Margins,
    options: TimelineOptions,
    x_options: XScaleOptions,
    nice_y: bool,
) -> ChartResult<TimelineMirror> {
    options.validate()?;
    let x_scale = build_x_scale(full_x_domain, dims.width, x_options)?;
    let y_scale = build_y_scale(y_domain, options.height, nice_y)?;
    trace!(width = dims.width, height = options.height, "mirrored timeline scales");

    Ok(TimelineMirror {
        x_domain: full_x_domain.clone(),
        x_scale,
        y_scale,
        width: dims.width,
        height: options.height,
        x_offset: dims.x_offset,
        y_offset: -margins.bottom,
    })
}

#[cfg(test)]
mod tests {
    use super::{TimelineOptions, mirror_timeline};
    use crate::core::domain::{ContinuousDomain, XDomain};
    use crate::core::layout::{Margins, ViewDimensions};
    use crate::core::x_scale::{OrdinalStyle, XScaleOptions};

    #[test]
    fn default_strip_reserves_seventy_pixels() {
        let reserved = TimelineOptions::default().reserved_height(Margins::default());
        assert_eq!(reserved, 70.0);
    }

    #[test]
    fn mirror_uses_strip_height_and_plot_width() {
        let dims = ViewDimensions {
            width: 400.0,
            height: 200.0,
            x_offset: 60.0,
        };
        let mirror = mirror_timeline(
            &XDomain::Continuous(ContinuousDomain::linear(0.0, 100.0)),
            (0.0, 5.0),
            dims,
            Margins::default(),
            TimelineOptions::default(),
            XScaleOptions {
                ordinal: OrdinalStyle::Point { padding: 0.1 },
                nice_linear: false,
                nice_time: false,
            },
            false,
        )
        .expect("mirror");

        assert_eq!(mirror.x_scale.range(), (0.0, 400.0));
        assert_eq!(mirror.y_scale.range(), (50.0, 0.0));
        assert_eq!(mirror.x_offset, 60.0);
        assert_eq!(mirror.y_offset, -10.0);
    }

    #[test]
    fn non_positive_height_is_rejected() {
        let options = TimelineOptions {
            height: 0.0,
            padding: 10.0,
        };
        assert!(options.validate().is_err());
    }
}
