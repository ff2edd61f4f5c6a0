use serde::{Deserialize, Serialize};

use crate::core::stacking::{StackedResultSet, StackedSeries};
use crate::core::x_scale::XScale;
use crate::core::{BandScale, DataPoint, LinearScale, Series, XValue};
use crate::error::ChartResult;

/// Vertex in plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One stacked area layer.
///
/// `line_points` traces the top of the layer (`d1`).
/// `fill_polygon` runs forward along `d1`, back along `d0` and repeats its
/// first vertex so consumers can draw it without implicit closure rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub series_name: String,
    pub line_points: Vec<Vertex>,
    pub fill_polygon: Vec<Vertex>,
}

/// Polyline of one line series plus its optional `min`/`max` band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub series_name: String,
    pub points: Vec<Vertex>,
    pub range_band: Option<Vec<Vertex>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub name: XValue,
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Geometry of whatever chart variant produced the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesGeometry {
    Areas(Vec<AreaGeometry>),
    Lines(Vec<LineGeometry>),
    Bars(Vec<BarRect>),
}

impl SeriesGeometry {
    /// Iterates every emitted vertex, bar corners included.
    pub fn vertices(&self) -> Box<dyn Iterator<Item = Vertex> + '_> {
        match self {
            Self::Areas(areas) => Box::new(areas.iter().flat_map(|area| {
                area.line_points
                    .iter()
                    .chain(area.fill_polygon.iter())
                    .copied()
            })),
            Self::Lines(lines) => Box::new(lines.iter().flat_map(|line| {
                line.points
                    .iter()
                    .chain(line.range_band.iter().flatten())
                    .copied()
            })),
            Self::Bars(bars) => Box::new(bars.iter().flat_map(|bar| {
                [
                    Vertex::new(bar.x, bar.y),
                    Vertex::new(bar.x + bar.width, bar.y + bar.height),
                ]
            })),
        }
    }
}

/// Projects stacked layers in `x_set` order.
///
/// Categories the X scale cannot place (outside a filtered ordinal domain)
/// are skipped.
pub fn project_stacked_areas(
    stacked: &StackedResultSet,
    x_set: &[XValue],
    x_scale: &XScale,
    y_scale: LinearScale,
) -> ChartResult<Vec<AreaGeometry>> {
    stacked
        .series
        .iter()
        .map(|series| project_area_layer(series, x_set, x_scale, y_scale))
        .collect()
}

fn project_area_layer(
    series: &StackedSeries,
    x_set: &[XValue],
    x_scale: &XScale,
    y_scale: LinearScale,
) -> ChartResult<AreaGeometry> {
    let mut upper = Vec::with_capacity(x_set.len());
    let mut lower = Vec::with_capacity(x_set.len());
    for category in x_set {
        let Some(point) = series.find(category) else {
            continue;
        };
        let Some(x) = x_scale.position(&point.name) else {
            continue;
        };
        upper.push(Vertex::new(x, y_scale.domain_to_pixel(point.d1)?));
        lower.push(Vertex::new(x, y_scale.domain_to_pixel(point.d0)?));
    }

    Ok(AreaGeometry {
        series_name: series.name.clone(),
        fill_polygon: closed_band(&upper, &lower),
        line_points: upper,
    })
}

/// Projects every line series, sorted by X pixel.
pub fn project_lines(
    results: &[Series],
    x_scale: &XScale,
    y_scale: LinearScale,
) -> ChartResult<Vec<LineGeometry>> {
    let mut lines = Vec::with_capacity(results.len());
    for series in results {
        let mut placed: Vec<(f64, &DataPoint)> = series
            .series
            .iter()
            .filter_map(|point| x_scale.position(&point.name).map(|x| (x, point)))
            .collect();
        placed.sort_by(|(lhs, _), (rhs, _)| lhs.total_cmp(rhs));

        let mut points = Vec::with_capacity(placed.len());
        let mut upper = Vec::new();
        let mut lower = Vec::new();
        let has_range = placed
            .iter()
            .any(|(_, point)| point.min.is_some() || point.max.is_some());
        for (x, point) in &placed {
            points.push(Vertex::new(*x, y_scale.domain_to_pixel(point.value)?));
            if has_range {
                let max = point.max.unwrap_or(point.value);
                let min = point.min.unwrap_or(point.value);
                upper.push(Vertex::new(*x, y_scale.domain_to_pixel(max)?));
                lower.push(Vertex::new(*x, y_scale.domain_to_pixel(min)?));
            }
        }

        lines.push(LineGeometry {
            series_name: series.name.clone(),
            points,
            range_band: has_range.then(|| closed_band(&upper, &lower)),
        });
    }
    Ok(lines)
}

/// Projects one bar per category of the active domain.
///
/// Each category takes the first point carrying its label. Bars grow from
/// the zero line, upward for positive values and downward otherwise.
pub fn project_vertical_bars(
    points: &[DataPoint],
    x_domain: &[XValue],
    x_scale: &BandScale,
    y_scale: LinearScale,
) -> ChartResult<Vec<BarRect>> {
    let zero_y = y_scale.domain_to_pixel(0.0)?;
    let width = x_scale.bandwidth();
    let mut bars = Vec::with_capacity(x_domain.len());
    for category in x_domain {
        let label = category.label();
        let Some(point) = points.iter().find(|point| point.category_label() == label) else {
            continue;
        };
        let Some(x) = x_scale.position(category) else {
            continue;
        };
        let value_y = y_scale.domain_to_pixel(point.value)?;
        bars.push(BarRect {
            name: point.name.clone(),
            label,
            value: point.value,
            x,
            y: if point.value < 0.0 { zero_y } else { value_y },
            width,
            height: (value_y - zero_y).abs(),
        });
    }
    Ok(bars)
}

fn closed_band(upper: &[Vertex], lower: &[Vertex]) -> Vec<Vertex> {
    let Some(first) = upper.first().copied() else {
        return Vec::new();
    };
    let mut polygon = Vec::with_capacity(upper.len() + lower.len() + 1);
    polygon.extend(upper.iter().copied());
    polygon.extend(lower.iter().rev().copied());
    polygon.push(first);
    polygon
}

#[cfg(test)]
mod tests {
    use super::{Vertex, project_lines, project_stacked_areas, project_vertical_bars};
    use crate::core::stacking::stack_series;
    use crate::core::x_scale::XScale;
    use crate::core::{BandScale, DataPoint, LinearScale, Series, XValue};

    fn assert_vertices(actual: &[Vertex], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (vertex, (x, y)) in actual.iter().zip(expected) {
            assert!((vertex.x - x).abs() <= 1e-9, "x {} != {x}", vertex.x);
            assert!((vertex.y - y).abs() <= 1e-9, "y {} != {y}", vertex.y);
        }
    }

    fn y_scale() -> LinearScale {
        LinearScale::new(0.0, 10.0, 100.0, 0.0).expect("y scale")
    }

    #[test]
    fn stacked_layer_polygon_walks_top_then_bottom() {
        let results = vec![
            Series::new("a", vec![DataPoint::new(0.0, 2.0), DataPoint::new(10.0, 4.0)]),
            Series::new("b", vec![DataPoint::new(0.0, 1.0), DataPoint::new(10.0, 1.0)]),
        ];
        let x_set = vec![XValue::Number(0.0), XValue::Number(10.0)];
        let stacked = stack_series(&results, &x_set);
        let x_scale = XScale::Linear(LinearScale::new(0.0, 10.0, 0.0, 200.0).expect("x"));

        let areas = project_stacked_areas(&stacked, &x_set, &x_scale, y_scale()).expect("areas");
        let top = &areas[1];
        assert_vertices(&top.line_points, &[(0.0, 70.0), (200.0, 50.0)]);
        assert_vertices(
            &top.fill_polygon,
            &[
                (0.0, 70.0),
                (200.0, 50.0),
                (200.0, 60.0),
                (0.0, 80.0),
                (0.0, 70.0),
            ],
        );
    }

    #[test]
    fn lines_are_sorted_and_carry_range_band() {
        let results = vec![Series::new(
            "l",
            vec![
                DataPoint::new(10.0, 5.0),
                DataPoint::new(0.0, 1.0).with_range(0.0, 2.0),
            ],
        )];
        let x_scale = XScale::Linear(LinearScale::new(0.0, 10.0, 0.0, 100.0).expect("x"));
        let lines = project_lines(&results, &x_scale, y_scale()).expect("lines");
        assert_vertices(&lines[0].points, &[(0.0, 90.0), (100.0, 50.0)]);
        let band = lines[0].range_band.as_ref().expect("band");
        assert_eq!(band.len(), 5);
    }

    #[test]
    fn negative_bars_hang_from_zero_line() {
        let y_scale = LinearScale::new(-10.0, 10.0, 100.0, 0.0).expect("y");
        let points = vec![DataPoint::new("up", 5.0), DataPoint::new("down", -5.0)];
        let domain = vec![XValue::from("up"), XValue::from("down")];
        let x_scale = BandScale::band(domain.clone(), (0.0, 200.0), 0.0).expect("x");

        let bars = project_vertical_bars(&points, &domain, &x_scale, y_scale).expect("bars");
        assert_eq!((bars[0].y, bars[0].height), (25.0, 25.0));
        assert_eq!((bars[1].y, bars[1].height), (50.0, 25.0));
        assert_eq!(bars[1].x, 100.0);
        assert_eq!(bars[1].width, 100.0);
    }

    #[test]
    fn bars_outside_filtered_domain_are_omitted() {
        let points = vec![DataPoint::new("a", 1.0), DataPoint::new("b", 2.0)];
        let filtered = vec![XValue::from("b")];
        let x_scale = BandScale::band(filtered.clone(), (0.0, 100.0), 0.0).expect("x");
        let bars = project_vertical_bars(&points, &filtered, &x_scale, y_scale()).expect("bars");
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].label, "b");
    }
}
