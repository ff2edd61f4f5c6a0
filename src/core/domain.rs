//! X/Y domain resolution for bound result sets.
//!
//! The X scale kind is decided here once and carried by [`XDomain`] through
//! scale building, stacking, mirroring and brushing.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::{datetime_to_millis, millis_to_datetime};
use crate::core::{DataPoint, Series, XValue};
use crate::error::{ChartError, ChartResult};

/// Kind of X axis derived from the bound values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    Ordinal,
    Linear,
    Time,
}

/// Continuous flavors of [`ScaleKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContinuousKind {
    Linear,
    Time,
}

impl From<ContinuousKind> for ScaleKind {
    fn from(kind: ContinuousKind) -> Self {
        match kind {
            ContinuousKind::Linear => Self::Linear,
            ContinuousKind::Time => Self::Time,
        }
    }
}

/// `[start, end]` pair of a linear or time axis.
///
/// Time bounds are epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousDomain {
    pub kind: ContinuousKind,
    pub start: f64,
    pub end: f64,
}

impl ContinuousDomain {
    #[must_use]
    pub fn new(kind: ContinuousKind, start: f64, end: f64) -> Self {
        Self { kind, start, end }
    }

    #[must_use]
    pub fn linear(start: f64, end: f64) -> Self {
        Self::new(ContinuousKind::Linear, start, end)
    }

    #[must_use]
    pub fn time(start_ms: f64, end_ms: f64) -> Self {
        Self::new(ContinuousKind::Time, start_ms, end_ms)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn shifted(self, delta: f64) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
            ..self
        }
    }

    #[must_use]
    pub fn contains_domain(self, other: Self) -> bool {
        self.kind == other.kind && other.start >= self.start && other.end <= self.end
    }

    /// Bound value as an [`XValue`] of this domain's kind.
    pub fn value_at(self, raw: f64) -> ChartResult<XValue> {
        match self.kind {
            ContinuousKind::Linear => Ok(XValue::Number(raw)),
            ContinuousKind::Time => Ok(XValue::Time(millis_to_datetime(raw)?)),
        }
    }
}

/// Resolved X domain: ordered categories or a continuous `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XDomain {
    Ordinal(Vec<XValue>),
    Continuous(ContinuousDomain),
}

impl XDomain {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Ordinal(_) => ScaleKind::Ordinal,
            Self::Continuous(domain) => domain.kind.into(),
        }
    }

    #[must_use]
    pub fn as_continuous(&self) -> Option<ContinuousDomain> {
        match self {
            Self::Continuous(domain) => Some(*domain),
            Self::Ordinal(_) => None,
        }
    }

    #[must_use]
    pub fn as_ordinal(&self) -> Option<&[XValue]> {
        match self {
            Self::Ordinal(values) => Some(values),
            Self::Continuous(_) => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Ordinal(values) => values.is_empty(),
            Self::Continuous(_) => false,
        }
    }
}

/// Optional X bounds that replace computed continuous bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XScaleOverrides {
    #[serde(default)]
    pub min: Option<XValue>,
    #[serde(default)]
    pub max: Option<XValue>,
}

/// Optional Y bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct YScaleOverrides {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// Output of X domain resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XDomainResolution {
    pub kind: ScaleKind,
    /// Distinct X values: ascending for linear/time, insertion order for
    /// ordinal.
    pub x_set: Vec<XValue>,
    pub domain: XDomain,
}

/// Y domain of a line chart plus whether any point carried a range band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineYDomain {
    pub domain: (f64, f64),
    pub has_range: bool,
}

/// Decides the X scale kind: all numbers → linear, all timestamps → time,
/// anything else (including an empty set) → ordinal.
#[must_use]
pub fn resolve_scale_kind(values: &[XValue]) -> ScaleKind {
    if values.is_empty() {
        return ScaleKind::Ordinal;
    }
    if values.iter().all(|value| matches!(value, XValue::Number(_))) {
        return ScaleKind::Linear;
    }
    if values.iter().all(|value| matches!(value, XValue::Time(_))) {
        return ScaleKind::Time;
    }
    ScaleKind::Ordinal
}

/// Distinct X values across every series, in first-seen order.
#[must_use]
pub fn unique_x_values(results: &[Series]) -> Vec<XValue> {
    let values: IndexSet<XValue> = results
        .iter()
        .flat_map(|series| series.series.iter().map(|point| point.name.clone()))
        .collect();
    values.into_iter().collect()
}

/// Resolves kind, sorted value set and domain for the X axis.
///
/// Continuous overrides replace computed bounds unconditionally, even when
/// they exclude data.
pub fn resolve_x_domain(
    results: &[Series],
    overrides: &XScaleOverrides,
) -> ChartResult<XDomainResolution> {
    let values = unique_x_values(results);
    let kind = resolve_scale_kind(&values);

    let resolution = match kind {
        ScaleKind::Ordinal => XDomainResolution {
            kind,
            x_set: values.clone(),
            domain: XDomain::Ordinal(values),
        },
        ScaleKind::Linear | ScaleKind::Time => {
            let continuous_kind = if kind == ScaleKind::Linear {
                ContinuousKind::Linear
            } else {
                ContinuousKind::Time
            };
            let mut keyed = values
                .into_iter()
                .map(|value| Ok((continuous_value(&value, continuous_kind)?, value)))
                .collect::<ChartResult<Vec<_>>>()?;
            keyed.sort_by(|(lhs, _), (rhs, _)| lhs.total_cmp(rhs));

            let data_min = keyed.first().map_or(0.0, |(raw, _)| *raw);
            let data_max = keyed.last().map_or(0.0, |(raw, _)| *raw);
            let start = match &overrides.min {
                Some(value) => continuous_value(value, continuous_kind)?,
                None => data_min,
            };
            let end = match &overrides.max {
                Some(value) => continuous_value(value, continuous_kind)?,
                None => data_max,
            };

            XDomainResolution {
                kind,
                x_set: keyed.into_iter().map(|(_, value)| value).collect(),
                domain: XDomain::Continuous(ContinuousDomain::new(continuous_kind, start, end)),
            }
        }
    };

    trace!(
        kind = ?resolution.kind,
        x_set_len = resolution.x_set.len(),
        "resolved x domain"
    );
    Ok(resolution)
}

/// Numeric position of an X value on a continuous axis.
///
/// Numbers under a time axis are read as epoch milliseconds.
pub fn continuous_value(value: &XValue, kind: ContinuousKind) -> ChartResult<f64> {
    let raw = match (value, kind) {
        (XValue::Number(number), _) => *number,
        (XValue::Time(time), ContinuousKind::Time) => datetime_to_millis(*time),
        (XValue::Time(_), ContinuousKind::Linear) => {
            return Err(ChartError::DomainMismatch(
                "timestamp used on a linear axis".to_owned(),
            ));
        }
        (XValue::Category(name), _) => {
            return Err(ChartError::DomainMismatch(format!(
                "category `{name}` used on a continuous axis"
            )));
        }
    };
    if !raw.is_finite() {
        return Err(ChartError::InvalidData(
            "continuous x values must be finite".to_owned(),
        ));
    }
    Ok(raw)
}

/// Y domain of a stacked chart: bounds of the per-category sums.
///
/// The minimum is `min(0, sums...)` so baselines stay visible.
#[must_use]
pub fn stacked_y_domain(
    results: &[Series],
    x_set: &[XValue],
    overrides: YScaleOverrides,
) -> (f64, f64) {
    let sums: Vec<f64> = x_set
        .iter()
        .map(|category| {
            results
                .iter()
                .filter_map(|series| series.find(category))
                .map(|point| point.value)
                .sum()
        })
        .collect();

    let min = overrides
        .min
        .unwrap_or_else(|| sums.iter().copied().fold(0.0, f64::min));
    let max = overrides.max.unwrap_or_else(|| {
        sums.iter()
            .copied()
            .reduce(f64::max)
            .unwrap_or(0.0)
    });
    (min, max)
}

/// Y domain of a line chart, including `min`/`max` range bands.
///
/// Zero is part of the domain unless `auto_scale` is set.
#[must_use]
pub fn line_y_domain(
    results: &[Series],
    auto_scale: bool,
    overrides: YScaleOverrides,
) -> LineYDomain {
    let mut has_range = false;
    let mut values: Vec<f64> = Vec::new();
    for point in results.iter().flat_map(|series| series.series.iter()) {
        values.push(point.value);
        if let Some(min) = point.min {
            has_range = true;
            values.push(min);
        }
        if let Some(max) = point.max {
            has_range = true;
            values.push(max);
        }
    }
    if !auto_scale {
        values.push(0.0);
    }

    let data_min = values.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let data_max = values.iter().copied().reduce(f64::max).unwrap_or(0.0);
    LineYDomain {
        domain: (
            overrides.min.unwrap_or(data_min),
            overrides.max.unwrap_or(data_max),
        ),
        has_range,
    }
}

/// Y domain of a vertical bar chart.
///
/// Overrides and explicit axis ticks can only widen `[min(0, v..), max(0, v..)]`.
/// Tick lists containing non-finite values are ignored.
#[must_use]
pub fn bar_y_domain(
    points: &[DataPoint],
    overrides: YScaleOverrides,
    y_axis_ticks: Option<&[f64]>,
) -> (f64, f64) {
    let mut min = points.iter().map(|point| point.value).fold(0.0, f64::min);
    let mut max = points.iter().map(|point| point.value).fold(0.0, f64::max);
    if let Some(override_min) = overrides.min {
        min = min.min(override_min);
    }
    if let Some(override_max) = overrides.max {
        max = max.max(override_max);
    }

    if let Some(ticks) = y_axis_ticks.filter(|ticks| ticks.iter().all(|tick| tick.is_finite())) {
        min = ticks.iter().copied().fold(min, f64::min);
        max = ticks.iter().copied().fold(max, f64::max);
    }
    (min, max)
}

/// Ordered distinct category labels of a bar chart.
#[must_use]
pub fn bar_x_domain(points: &[DataPoint]) -> Vec<XValue> {
    let labels: IndexSet<XValue> = points
        .iter()
        .map(|point| XValue::Category(point.category_label()))
        .collect();
    labels.into_iter().collect()
}

/// Series names, used as the legend domain.
#[must_use]
pub fn series_domain(results: &[Series]) -> Vec<String> {
    results.iter().map(|series| series.name.clone()).collect()
}
