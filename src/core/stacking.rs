use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Series, XValue};

/// Data point with its cumulative band inside a stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedPoint {
    pub name: XValue,
    pub value: f64,
    pub d0: f64,
    pub d1: f64,
    /// `true` when the point was filled in for a category the series lacked.
    pub synthesized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedSeries {
    pub name: String,
    pub points: Vec<StackedPoint>,
}

impl StackedSeries {
    #[must_use]
    pub fn find(&self, name: &XValue) -> Option<&StackedPoint> {
        self.points.iter().find(|point| point.name == *name)
    }
}

/// Stack layers derived from a result set; the input is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackedResultSet {
    pub series: Vec<StackedSeries>,
}

impl StackedResultSet {
    /// Highest `d1` across all layers.
    #[must_use]
    pub fn max_cumulative(&self) -> Option<f64> {
        self.series
            .iter()
            .flat_map(|series| series.points.iter().map(|point| point.d1))
            .reduce(f64::max)
    }
}

/// Stacks series per category of `x_set`, in series input order.
///
/// Present points receive `d0 = running total` and `d1 = d0 + value`. A series
/// lacking a category gets a synthesized zero point at the running total,
/// appended after its own points. Later duplicates of a category within one
/// series are dropped so every category appears exactly once per layer.
#[must_use]
pub fn stack_series(results: &[Series], x_set: &[XValue]) -> StackedResultSet {
    let mut stacked: Vec<StackedSeries> = results
        .iter()
        .map(|series| StackedSeries {
            name: series.name.clone(),
            points: Vec::with_capacity(series.series.len()),
        })
        .collect();
    let mut synthesized: Vec<Vec<StackedPoint>> = vec![Vec::new(); results.len()];
    let mut offsets: Vec<Vec<Option<(f64, f64)>>> = results
        .iter()
        .map(|series| vec![None; series.series.len()])
        .collect();

    for category in x_set {
        let mut running = 0.0;
        for (layer, series) in results.iter().enumerate() {
            match series
                .series
                .iter()
                .position(|point| point.name == *category)
            {
                Some(index) => {
                    let value = series.series[index].value;
                    offsets[layer][index] = Some((running, running + value));
                    running += value;
                }
                None => {
                    trace!(series = %series.name, category = %category, "synthesize stack point");
                    synthesized[layer].push(StackedPoint {
                        name: category.clone(),
                        value: 0.0,
                        d0: running,
                        d1: running,
                        synthesized: true,
                    });
                }
            }
        }
    }

    for (layer, series) in results.iter().enumerate() {
        for (index, point) in series.series.iter().enumerate() {
            match offsets[layer][index] {
                Some((d0, d1)) => stacked[layer].points.push(StackedPoint {
                    name: point.name.clone(),
                    value: point.value,
                    d0,
                    d1,
                    synthesized: false,
                }),
                None => debug!(
                    series = %series.name,
                    category = %point.name,
                    "dropping duplicate or unknown category from stack"
                ),
            }
        }
        stacked[layer]
            .points
            .append(&mut synthesized[layer]);
    }

    StackedResultSet { series: stacked }
}

#[cfg(test)]
mod tests {
    use super::stack_series;
    use crate::core::{DataPoint, Series, XValue};

    #[test]
    fn duplicate_categories_keep_first_occurrence() {
        let results = vec![Series::new(
            "a",
            vec![DataPoint::new("x", 1.0), DataPoint::new("x", 7.0)],
        )];
        let stacked = stack_series(&results, &[XValue::from("x")]);
        assert_eq!(stacked.series[0].points.len(), 1);
        assert_eq!(stacked.series[0].points[0].d1, 1.0);
    }

    #[test]
    fn input_is_not_mutated() {
        let results = vec![
            Series::new("a", vec![DataPoint::new("x", 1.0)]),
            Series::new("b", vec![]),
        ];
        let before = results.clone();
        let stacked = stack_series(&results, &[XValue::from("x")]);
        assert_eq!(results, before);
        assert!(stacked.series[1].points[0].synthesized);
    }
}
