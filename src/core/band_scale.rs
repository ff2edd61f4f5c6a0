use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::XValue;
use crate::error::{ChartError, ChartResult};

const DEFAULT_ALIGN: f64 = 0.5;

/// Ordinal scale distributing discrete categories over a pixel range.
///
/// Bands reserve `bandwidth()` pixels per category separated by
/// `padding_inner * step()`. Point scales are bands with zero bandwidth
/// (`padding_inner == 1`) and `padding_outer` on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: IndexSet<XValue>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
    step: f64,
    offset: f64,
    point: bool,
}

impl BandScale {
    /// Creates a band scale; duplicate categories collapse to their first
    /// occurrence.
    pub fn band(
        domain: impl IntoIterator<Item = XValue>,
        range: (f64, f64),
        padding_inner: f64,
    ) -> ChartResult<Self> {
        Self::build(domain.into_iter().collect(), range, padding_inner, 0.0, false)
    }

    /// Creates a point scale with `padding` as outer padding in step units.
    pub fn point(
        domain: impl IntoIterator<Item = XValue>,
        range: (f64, f64),
        padding: f64,
    ) -> ChartResult<Self> {
        Self::build(domain.into_iter().collect(), range, 1.0, padding, true)
    }

    fn build(
        domain: IndexSet<XValue>,
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
        point: bool,
    ) -> ChartResult<Self> {
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "ordinal scale range must be finite".to_owned(),
            ));
        }
        if !padding_inner.is_finite() || padding_inner < 0.0 {
            return Err(ChartError::InvalidData(
                "ordinal inner padding must be finite and >= 0".to_owned(),
            ));
        }
        if !padding_outer.is_finite() || padding_outer < 0.0 {
            return Err(ChartError::InvalidData(
                "ordinal outer padding must be finite and >= 0".to_owned(),
            ));
        }

        let padding_inner = padding_inner.min(1.0);
        let count = domain.len() as f64;
        let (lo, hi) = if range_end < range_start {
            (range_end, range_start)
        } else {
            (range_start, range_end)
        };
        let step = (hi - lo) / (count - padding_inner + padding_outer * 2.0).max(1.0);
        let offset = lo + (hi - lo - step * (count - padding_inner)) * DEFAULT_ALIGN;

        Ok(Self {
            domain,
            range_start,
            range_end,
            padding_inner,
            padding_outer,
            step,
            offset,
            point,
        })
    }

    #[must_use]
    pub fn domain(&self) -> Vec<XValue> {
        self.domain.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn padding_inner(&self) -> f64 {
        self.padding_inner
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step * (1.0 - self.padding_inner)
    }

    #[must_use]
    pub fn index_of(&self, value: &XValue) -> Option<usize> {
        self.domain.get_index_of(value)
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<&XValue> {
        self.domain.get_index(index)
    }

    /// Start pixel of the band (or the point position) for `value`.
    #[must_use]
    pub fn position(&self, value: &XValue) -> Option<f64> {
        let index = self.index_of(value)?;
        let slot = if self.range_end < self.range_start {
            self.domain.len() - 1 - index
        } else {
            index
        };
        Some(self.offset + self.step * slot as f64)
    }

    #[must_use]
    pub fn is_point(&self) -> bool {
        self.point
    }

    /// Maps a pixel selection onto the inclusive range of category indices
    /// it covers.
    ///
    /// Bands use the step as the slot width:
    /// `start = floor((lo + padding) / step)`, `end = floor(hi / step)`.
    /// Points are selected when their position `offset + i * step` lies
    /// inside `[lo, hi]`.
    #[must_use]
    pub fn index_range_for_pixels(&self, start_px: f64, end_px: f64) -> Option<(usize, usize)> {
        if self.domain.is_empty() || !(self.step > 0.0) {
            return None;
        }
        let (lo, hi) = if end_px < start_px {
            (end_px, start_px)
        } else {
            (start_px, end_px)
        };

        let (first_slot, last_slot) = if self.point {
            (
                ((lo - self.offset) / self.step).ceil(),
                ((hi - self.offset) / self.step).floor(),
            )
        } else {
            let padding = self.step * self.padding_inner;
            (
                ((lo + padding) / self.step).floor(),
                (hi / self.step).floor(),
            )
        };
        if last_slot < 0.0 {
            return None;
        }
        let last = self.domain.len() - 1;
        let first_slot = first_slot.max(0.0) as usize;
        let last_slot = (last_slot as usize).min(last);
        if first_slot > last_slot {
            return None;
        }
        if self.range_end < self.range_start {
            Some((last - last_slot, last - first_slot))
        } else {
            Some((first_slot, last_slot))
        }
    }

    /// Categories covered by a pixel selection, in domain order.
    #[must_use]
    pub fn values_for_pixels(&self, start_px: f64, end_px: f64) -> Vec<XValue> {
        self.index_range_for_pixels(start_px, end_px)
            .map(|(start, end)| {
                (start..=end)
                    .filter_map(|index| self.value_at(index).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::BandScale;
    use crate::core::XValue;

    fn categories(names: &[&str]) -> Vec<XValue> {
        names.iter().map(|name| XValue::from(*name)).collect()
    }

    #[test]
    fn point_scale_applies_outer_padding() {
        let scale = BandScale::point(categories(&["a", "b", "c"]), (0.0, 440.0), 0.1)
            .expect("scale");
        // step = 440 / (2 + 0.2) = 200, offset = (440 - 400) / 2 = 20
        assert!((scale.step() - 200.0).abs() <= 1e-9);
        assert!((scale.position(&XValue::from("a")).expect("a") - 20.0).abs() <= 1e-9);
        assert!((scale.position(&XValue::from("c")).expect("c") - 420.0).abs() <= 1e-9);
        assert_eq!(scale.bandwidth(), 0.0);
    }

    #[test]
    fn single_point_sits_in_the_middle() {
        let scale = BandScale::point(categories(&["only"]), (0.0, 300.0), 0.1).expect("scale");
        assert_eq!(scale.position(&XValue::from("only")), Some(150.0));
    }

    #[test]
    fn band_scale_without_outer_padding_starts_at_zero() {
        let scale =
            BandScale::band(categories(&["a", "b", "c", "d"]), (0.0, 390.0), 0.1).expect("scale");
        // step = 390 / 3.9 = 100
        assert!((scale.step() - 100.0).abs() <= 1e-9);
        assert!((scale.bandwidth() - 90.0).abs() <= 1e-9);
        assert!(scale.position(&XValue::from("a")).expect("a").abs() <= 1e-9);
        assert!((scale.position(&XValue::from("d")).expect("d") - 300.0).abs() <= 1e-9);
    }

    #[test]
    fn duplicates_collapse() {
        let scale = BandScale::band(categories(&["a", "a", "b"]), (0.0, 100.0), 0.0)
            .expect("scale");
        assert_eq!(scale.len(), 2);
    }

    #[test]
    fn pixel_selection_maps_to_inclusive_indices() {
        let scale =
            BandScale::band(categories(&["a", "b", "c", "d"]), (0.0, 390.0), 0.1).expect("scale");
        assert_eq!(scale.index_range_for_pixels(95.0, 250.0), Some((1, 2)));
        assert_eq!(
            scale.values_for_pixels(0.0, 389.0),
            categories(&["a", "b", "c", "d"])
        );
        assert_eq!(scale.index_range_for_pixels(0.0, 2_000.0), Some((0, 3)));
    }

    #[test]
    fn point_selection_picks_positions_inside_the_pixels() {
        let scale = BandScale::point(categories(&["a", "b", "c"]), (0.0, 440.0), 0.1)
            .expect("scale");
        assert!(scale.is_point());
        assert_eq!(scale.index_range_for_pixels(0.0, 440.0), Some((0, 2)));
        // Only "a" sits at px 20.
        assert_eq!(scale.index_range_for_pixels(0.0, 100.0), Some((0, 0)));
        assert_eq!(scale.index_range_for_pixels(200.0, 230.0), Some((1, 1)));
        assert_eq!(scale.index_range_for_pixels(30.0, 200.0), None);
        assert_eq!(scale.index_range_for_pixels(-50.0, 10.0), None);
    }

    #[test]
    fn reversed_point_range_maps_back_to_domain_order() {
        let scale = BandScale::point(categories(&["a", "b", "c"]), (440.0, 0.0), 0.1)
            .expect("scale");
        // "c" is drawn at px 20.
        assert_eq!(scale.values_for_pixels(0.0, 100.0), categories(&["c"]));
        assert_eq!(scale.values_for_pixels(0.0, 300.0), categories(&["b", "c"]));
    }

    #[test]
    fn unknown_category_has_no_position() {
        let scale = BandScale::band(categories(&["a"]), (0.0, 10.0), 0.1).expect("scale");
        assert!(scale.position(&XValue::from("z")).is_none());
    }
}
