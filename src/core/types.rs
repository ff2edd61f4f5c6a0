use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_millis, decimal_to_f64};
use crate::error::ChartResult;

/// Outer size of the chart component in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Value carried on the X axis of a data point.
///
/// Equality and hashing compare the primitive value: numbers by their bit
/// pattern through `OrderedFloat` (so `NaN == NaN`), timestamps by epoch
/// milliseconds and categories by string content. Values of different
/// variants are never equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Time(DateTime<Utc>),
    Category(String),
}

impl XValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Category(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Display label used for ordinal bar domains.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Number(value) => format!("{value}"),
            Self::Time(value) => value.format("%Y-%m-%d").to_string(),
            Self::Category(value) => value.clone(),
        }
    }

    fn time_key(time: &DateTime<Utc>) -> i64 {
        time.timestamp_millis()
    }
}

impl PartialEq for XValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(lhs), Self::Number(rhs)) => OrderedFloat(*lhs) == OrderedFloat(*rhs),
            (Self::Time(lhs), Self::Time(rhs)) => Self::time_key(lhs) == Self::time_key(rhs),
            (Self::Category(lhs), Self::Category(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl Eq for XValue {}

impl Hash for XValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Number(value) => OrderedFloat(*value).hash(state),
            Self::Time(value) => Self::time_key(value).hash(state),
            Self::Category(value) => value.hash(state),
        }
    }
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Time(value) => write!(f, "{}", value.to_rfc3339()),
            Self::Category(value) => f.write_str(value),
        }
    }
}

impl From<f64> for XValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for XValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

impl From<&str> for XValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl From<String> for XValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

/// Single datum of a series: X position, Y value and optional range band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: XValue,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Overrides the generated category label used by bar charts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DataPoint {
    #[must_use]
    pub fn new(name: impl Into<XValue>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            min: None,
            max: None,
            label: None,
        }
    }

    pub fn from_decimal(name: impl Into<XValue>, value: Decimal) -> ChartResult<Self> {
        Ok(Self::new(name, decimal_to_f64(value, "value")?))
    }

    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Category label: explicit override first, then the formatted name.
    #[must_use]
    pub fn category_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.name.label())
    }

    /// Epoch milliseconds when the name is a timestamp.
    #[must_use]
    pub fn time_millis(&self) -> Option<f64> {
        self.name.as_time().map(datetime_to_millis)
    }
}

/// Named, ordered collection of data points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub series: Vec<DataPoint>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, series: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }

    /// First point whose X value equals `name`.
    #[must_use]
    pub fn find(&self, name: &XValue) -> Option<&DataPoint> {
        self.series.iter().find(|point| point.name == *name)
    }
}

/// Ordered sequence of series bound to a chart.
pub type ResultSet = Vec<Series>;
