use crate::core::{Series, XValue};
use crate::error::{ChartError, ChartResult};

use super::ChartConfig;

pub(super) fn validate_chart_config(config: &ChartConfig) -> ChartResult<()> {
    if !config.viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }

    let margins = config.margins;
    for (name, value) in [
        ("top", margins.top),
        ("right", margins.right),
        ("bottom", margins.bottom),
        ("left", margins.left),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name} margin must be finite and >= 0"
            )));
        }
    }

    validate_axis_size(config.x_axis_height, "x-axis height")?;
    validate_axis_size(config.y_axis_width, "y-axis width")?;

    if !config.bar_padding.is_finite() || config.bar_padding <= 0.0 {
        return Err(ChartError::InvalidData(
            "bar padding must be finite and > 0".to_owned(),
        ));
    }
    if !config.point_padding.is_finite() || config.point_padding < 0.0 {
        return Err(ChartError::InvalidData(
            "point padding must be finite and >= 0".to_owned(),
        ));
    }
    config.timeline.validate()?;

    for bound in [&config.x_scale_min, &config.x_scale_max].into_iter().flatten() {
        if let XValue::Number(value) = bound {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "x scale bounds must be finite".to_owned(),
                ));
            }
        }
    }
    for bound in [config.y_scale_min, config.y_scale_max].into_iter().flatten() {
        if !bound.is_finite() {
            return Err(ChartError::InvalidData(
                "y scale bounds must be finite".to_owned(),
            ));
        }
    }

    if let Some(dims) = config.dims_override {
        if ![dims.width, dims.height, dims.x_offset]
            .iter()
            .all(|value| value.is_finite())
            || dims.width < 0.0
            || dims.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "dimension override must be finite with non-negative size".to_owned(),
            ));
        }
    }

    Ok(())
}

fn validate_axis_size(value: f64, name: &str) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

/// Rejects non-finite values before they reach the scales.
pub fn validate_result_set(results: &[Series]) -> ChartResult<()> {
    for series in results {
        for point in &series.series {
            if !point.value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has a non-finite value at `{}`",
                    series.name, point.name
                )));
            }
            if point.min.is_some_and(|min| !min.is_finite())
                || point.max.is_some_and(|max| !max.is_finite())
            {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has a non-finite range at `{}`",
                    series.name, point.name
                )));
            }
            if let XValue::Number(x) = point.name {
                if !x.is_finite() {
                    return Err(ChartError::InvalidData(format!(
                        "series `{}` has a non-finite x value",
                        series.name
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_result_set;
    use crate::api::{ChartConfig, ChartKind};
    use crate::core::{DataPoint, Series, Viewport};

    #[test]
    fn negative_bar_padding_is_rejected() {
        let config = ChartConfig::new(ChartKind::BarVertical, Viewport::new(10, 10))
            .with_bar_padding(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_values_are_rejected() {
        let results = vec![Series::new("s", vec![DataPoint::new("a", f64::NAN)])];
        assert!(validate_result_set(&results).is_err());
        let ranged = vec![Series::new(
            "s",
            vec![DataPoint::new(1.0, 1.0).with_range(f64::NEG_INFINITY, 2.0)],
        )];
        assert!(validate_result_set(&ranged).is_err());
    }
}
