//! Brush selection and keyboard panning over the X domain.
//!
//! [`BrushController`] owns the only persistent piece of derived state, the
//! filtered X domain. Everything else is recomputed each update cycle and
//! handed in by the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::domain::{ContinuousDomain, ContinuousKind, ScaleKind, XDomain};
use crate::core::x_scale::XScale;
use crate::error::{ChartError, ChartResult};

/// Smallest accepted filter, as a fraction of the original span.
pub const MIN_FILTER_SPAN_RATIO: f64 = 0.01;
/// Keyboard pan step, as a fraction of the current span.
pub const KEYBOARD_PAN_RATIO: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushState {
    Idle,
    Dragging,
    Filtered,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanDirection {
    Left,
    Right,
}

/// Pixel area the brush reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushExtent {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrushController {
    state: BrushState,
    state_before_drag: BrushState,
    filtered: Option<XDomain>,
    extent: Option<BrushExtent>,
    brush_end: bool,
}

impl Default for BrushController {
    fn default() -> Self {
        Self {
            state: BrushState::Idle,
            state_before_drag: BrushState::Idle,
            filtered: None,
            extent: None,
            brush_end: true,
        }
    }
}

impl BrushController {
    #[must_use]
    pub fn state(&self) -> BrushState {
        self.state
    }

    #[must_use]
    pub fn filtered_domain(&self) -> Option<&XDomain> {
        self.filtered.as_ref()
    }

    #[must_use]
    pub fn extent(&self) -> Option<BrushExtent> {
        self.extent
    }

    #[must_use]
    pub fn has_region(&self) -> bool {
        self.extent.is_some()
    }

    /// `false` while a drag is in progress.
    #[must_use]
    pub fn brush_end(&self) -> bool {
        self.brush_end
    }

    /// Creates the interactive region; returns `false` when it already exists.
    pub fn create_region(&mut self, extent: BrushExtent) -> bool {
        if self.extent.is_some() {
            return false;
        }
        self.extent = Some(extent);
        debug!(width = extent.width, height = extent.height, "brush region created");
        true
    }

    /// Re-measures an existing region. No-op before creation.
    pub fn refresh_extent(&mut self, extent: BrushExtent) -> bool {
        match self.extent.as_mut() {
            Some(current) => {
                *current = extent;
                true
            }
            None => false,
        }
    }

    pub fn remove_region(&mut self) {
        self.extent = None;
    }

    /// Enters `Dragging`; returns `false` without an interactive region.
    pub fn on_drag_start(&mut self) -> bool {
        if !self.has_region() {
            return false;
        }
        if self.state != BrushState::Dragging {
            self.state_before_drag = self.state;
        }
        self.state = BrushState::Dragging;
        self.brush_end = false;
        true
    }

    /// Finishes a drag. `selection` is the domain covered by the brush, or
    /// `None` when the user released without selecting anything.
    ///
    /// Returns whether a new filter was committed.
    pub fn on_drag_end(
        &mut self,
        selection: Option<XDomain>,
        original: &XDomain,
    ) -> ChartResult<bool> {
        if !self.has_region() {
            return Ok(false);
        }
        self.brush_end = true;
        match selection {
            Some(candidate) if !candidate.is_empty() => self.commit_filter(candidate, original),
            _ => {
                self.restore_after_drag();
                Ok(false)
            }
        }
    }

    /// Applies a candidate filter coming from the brush or the overview.
    ///
    /// Continuous candidates are clamped into `original` and rejected when
    /// narrower than [`MIN_FILTER_SPAN_RATIO`] of it. Ordinal candidates keep
    /// only categories of `original` and must not end up empty. Rejections
    /// keep the prior filter.
    pub fn commit_filter(&mut self, candidate: XDomain, original: &XDomain) -> ChartResult<bool> {
        if candidate.kind() != original.kind() {
            self.restore_after_drag();
            return Err(ChartError::DomainMismatch(format!(
                "filter of kind {:?} does not match x axis kind {:?}",
                candidate.kind(),
                original.kind()
            )));
        }

        match fit_filter(&candidate, original) {
            Some(domain) => {
                debug!(kind = ?domain.kind(), "filter committed");
                self.filtered = Some(domain);
                self.state = BrushState::Filtered;
                Ok(true)
            }
            None => {
                self.restore_after_drag();
                Ok(false)
            }
        }
    }

    /// Overview click: drops the filter so the original domain shows again.
    pub fn reset(&mut self) -> bool {
        if !self.has_region() {
            return false;
        }
        self.filtered = None;
        self.state = BrushState::Reset;
        self.brush_end = true;
        debug!("filter reset to original domain");
        true
    }

    /// Shifts the displayed continuous domain one keyboard step.
    ///
    /// The step never crosses the original edge in the pan direction. A
    /// shifted domain becomes the filter. Returns the new domain, or `None`
    /// when nothing moved.
    pub fn pan(
        &mut self,
        direction: PanDirection,
        original: ContinuousDomain,
    ) -> Option<ContinuousDomain> {
        if !self.has_region() {
            return None;
        }
        let current = match &self.filtered {
            Some(XDomain::Continuous(current)) => *current,
            Some(XDomain::Ordinal(_)) => return None,
            None => original,
        };
        if current.kind != original.kind {
            return None;
        }

        let shift = keyboard_pan_shift(current, original, direction);
        if shift <= 0.0 {
            return None;
        }
        let shifted = match direction {
            PanDirection::Left => current.shifted(-shift),
            PanDirection::Right => current.shifted(shift),
        };
        self.filtered = Some(XDomain::Continuous(shifted));
        self.state = BrushState::Filtered;
        Some(shifted)
    }

    /// Drops a filter that no longer fits the bound data.
    pub fn clear_filter(&mut self) {
        if self.filtered.take().is_some() {
            warn!("discarding filter that no longer fits the current x axis");
            self.state = BrushState::Idle;
        }
    }

    /// Replaces the filter with its refit against rebound data.
    ///
    /// Without a filter this is a no-op; refitting never creates one.
    pub fn refit_filter(&mut self, fitted: XDomain) {
        if let Some(current) = self.filtered.as_mut() {
            debug!(kind = ?fitted.kind(), "filter refit to rebound data");
            *current = fitted;
        }
    }

    /// Domain to display: the filter when set, otherwise `original`.
    #[must_use]
    pub fn displayed_domain(&self, original: &XDomain) -> XDomain {
        self.filtered.clone().unwrap_or_else(|| original.clone())
    }

    fn restore_after_drag(&mut self) {
        if self.state == BrushState::Dragging {
            self.state = self.state_before_drag;
        }
    }
}

/// Maps a pixel selection through `x_scale`.
///
/// Continuous scales invert both edges. Band scales map onto the inclusive
/// range of categories with `start = floor((s0 + padding) / step)` and
/// `end = floor(s1 / step)`; point scales keep the categories whose point
/// lies inside the selection. Returns `None` for an empty selection.
pub fn selection_to_domain(
    x_scale: &XScale,
    selection: (f64, f64),
) -> ChartResult<Option<XDomain>> {
    let (s0, s1) = selection;
    if !s0.is_finite() || !s1.is_finite() {
        return Err(ChartError::InvalidData(
            "brush selection must be finite".to_owned(),
        ));
    }
    let domain = match x_scale {
        XScale::Point(scale) | XScale::Band(scale) => {
            let values = scale.values_for_pixels(s0, s1);
            if values.is_empty() {
                return Ok(None);
            }
            XDomain::Ordinal(values)
        }
        XScale::Linear(_) | XScale::Time(_) => {
            if s0 == s1 {
                return Ok(None);
            }
            let a = x_scale.invert(s0)?;
            let b = x_scale.invert(s1)?;
            let kind = match x_scale.kind() {
                ScaleKind::Time => ContinuousKind::Time,
                _ => ContinuousKind::Linear,
            };
            XDomain::Continuous(ContinuousDomain::new(kind, a.min(b), a.max(b)))
        }
    };
    Ok(Some(domain))
}

/// Keyboard step size: `min(span / 100, distance to the original edge)`.
///
/// The distance is clamped at zero so a domain already past the edge does
/// not jump backwards.
#[must_use]
pub fn keyboard_pan_shift(
    current: ContinuousDomain,
    original: ContinuousDomain,
    direction: PanDirection,
) -> f64 {
    let step = current.span() * KEYBOARD_PAN_RATIO;
    let distance = match direction {
        PanDirection::Left => current.start - original.start,
        PanDirection::Right => original.end - current.end,
    };
    step.min(distance.max(0.0))
}

/// Fits `candidate` into `original`.
///
/// Continuous candidates are clamped and must pass [`passes_span_guard`].
/// Ordinal candidates keep only known categories and must not end up
/// empty. Kind mismatches never fit.
#[must_use]
pub fn fit_filter(candidate: &XDomain, original: &XDomain) -> Option<XDomain> {
    match (candidate, original) {
        (XDomain::Continuous(candidate), XDomain::Continuous(original))
            if candidate.kind == original.kind =>
        {
            let clamped = clamp_into(*candidate, *original);
            if passes_span_guard(clamped, *original) {
                Some(XDomain::Continuous(clamped))
            } else {
                debug!(
                    span = clamped.span(),
                    original_span = original.span(),
                    "filter narrower than the minimum span"
                );
                None
            }
        }
        (XDomain::Ordinal(values), XDomain::Ordinal(known)) => {
            let kept: Vec<_> = values
                .iter()
                .filter(|value| known.contains(*value))
                .cloned()
                .collect();
            (!kept.is_empty()).then_some(XDomain::Ordinal(kept))
        }
        _ => None,
    }
}

#[must_use]
pub fn passes_span_guard(candidate: ContinuousDomain, original: ContinuousDomain) -> bool {
    candidate.span() >= original.span() * MIN_FILTER_SPAN_RATIO
}

fn clamp_into(candidate: ContinuousDomain, original: ContinuousDomain) -> ContinuousDomain {
    let (lo, hi) = if original.end < original.start {
        (original.end, original.start)
    } else {
        (original.start, original.end)
    };
    let start = candidate.start.min(candidate.end).clamp(lo, hi);
    let end = candidate.start.max(candidate.end).clamp(lo, hi);
    ContinuousDomain::new(candidate.kind, start, end)
}

#[cfg(test)]
mod tests {
    use super::{
        BrushController, BrushExtent, BrushState, PanDirection, fit_filter, keyboard_pan_shift,
        selection_to_domain,
    };
    use crate::core::domain::{ContinuousDomain, XDomain};
    use crate::core::x_scale::XScale;
    use crate::core::{BandScale, LinearScale, XValue};

    const EXTENT: BrushExtent = BrushExtent {
        width: 100.0,
        height: 50.0,
    };

    fn original() -> XDomain {
        XDomain::Continuous(ContinuousDomain::linear(0.0, 100.0))
    }

    fn controller() -> BrushController {
        let mut controller = BrushController::default();
        controller.create_region(EXTENT);
        controller
    }

    #[test]
    fn drag_without_region_is_ignored() {
        let mut controller = BrushController::default();
        assert!(!controller.on_drag_start());
        assert_eq!(controller.state(), BrushState::Idle);
    }

    #[test]
    fn drag_commits_filter() {
        let mut controller = controller();
        assert!(controller.on_drag_start());
        assert!(!controller.brush_end());
        let selection = XDomain::Continuous(ContinuousDomain::linear(20.0, 40.0));
        assert!(controller.on_drag_end(Some(selection.clone()), &original()).expect("drag end"));
        assert_eq!(controller.state(), BrushState::Filtered);
        assert_eq!(controller.filtered_domain(), Some(&selection));
    }

    #[test]
    fn too_narrow_selection_keeps_prior_filter() {
        let mut controller = controller();
        let first = XDomain::Continuous(ContinuousDomain::linear(20.0, 40.0));
        controller.commit_filter(first.clone(), &original()).expect("commit");

        controller.on_drag_start();
        let narrow = XDomain::Continuous(ContinuousDomain::linear(30.0, 30.5));
        assert!(!controller.on_drag_end(Some(narrow), &original()).expect("drag end"));
        assert_eq!(controller.state(), BrushState::Filtered);
        assert_eq!(controller.filtered_domain(), Some(&first));
    }

    #[test]
    fn empty_release_returns_to_previous_state() {
        let mut controller = controller();
        controller.on_drag_start();
        assert!(!controller.on_drag_end(None, &original()).expect("drag end"));
        assert_eq!(controller.state(), BrushState::Idle);
    }

    #[test]
    fn selections_are_clamped_into_original() {
        let mut controller = controller();
        let wide = XDomain::Continuous(ContinuousDomain::linear(-50.0, 60.0));
        controller.commit_filter(wide, &original()).expect("commit");
        assert_eq!(
            controller.filtered_domain(),
            Some(&XDomain::Continuous(ContinuousDomain::linear(0.0, 60.0)))
        );
    }

    #[test]
    fn reset_clears_filter() {
        let mut controller = controller();
        let filter = XDomain::Continuous(ContinuousDomain::linear(20.0, 40.0));
        controller.commit_filter(filter, &original()).expect("commit");
        assert!(controller.reset());
        assert_eq!(controller.state(), BrushState::Reset);
        assert_eq!(controller.displayed_domain(&original()), original());
    }

    #[test]
    fn keyboard_pan_moves_one_percent_left() {
        let mut controller = controller();
        controller
            .commit_filter(
                XDomain::Continuous(ContinuousDomain::linear(10.0, 20.0)),
                &original(),
            )
            .expect("commit");
        let shifted = controller
            .pan(PanDirection::Left, ContinuousDomain::linear(0.0, 100.0))
            .expect("shifted");
        assert!((shifted.start - 9.9).abs() <= 1e-9);
        assert!((shifted.end - 19.9).abs() <= 1e-9);
    }

    #[test]
    fn keyboard_pan_stops_at_original_edge() {
        let original = ContinuousDomain::linear(0.0, 100.0);
        let near_edge = ContinuousDomain::linear(0.05, 50.05);
        assert!((keyboard_pan_shift(near_edge, original, PanDirection::Left) - 0.05).abs() <= 1e-12);
        let beyond = ContinuousDomain::linear(-5.0, 45.0);
        assert_eq!(keyboard_pan_shift(beyond, original, PanDirection::Left), 0.0);

        let mut controller = controller();
        assert!(controller.pan(PanDirection::Left, original).is_none());
        assert_eq!(controller.state(), BrushState::Idle);
    }

    #[test]
    fn ordinal_selection_maps_inclusive_categories() {
        let categories: Vec<XValue> = ["a", "b", "c", "d"].into_iter().map(XValue::from).collect();
        let scale = XScale::Band(BandScale::band(categories, (0.0, 390.0), 0.1).expect("band"));
        let domain = selection_to_domain(&scale, (95.0, 250.0))
            .expect("selection")
            .expect("non-empty");
        assert_eq!(
            domain,
            XDomain::Ordinal(vec![XValue::from("b"), XValue::from("c")])
        );
    }

    #[test]
    fn point_selection_keeps_first_category() {
        let categories: Vec<XValue> = ["a", "b", "c"].into_iter().map(XValue::from).collect();
        let scale =
            XScale::Point(BandScale::point(categories.clone(), (0.0, 440.0), 0.1).expect("point"));
        assert_eq!(
            selection_to_domain(&scale, (0.0, 440.0)).expect("selection"),
            Some(XDomain::Ordinal(categories))
        );
        assert_eq!(
            selection_to_domain(&scale, (0.0, 100.0)).expect("selection"),
            Some(XDomain::Ordinal(vec![XValue::from("a")]))
        );
    }

    #[test]
    fn refit_shrinks_filter_to_narrower_original() {
        let narrower = XDomain::Continuous(ContinuousDomain::linear(0.0, 10.0));
        let stale = XDomain::Continuous(ContinuousDomain::linear(5.0, 40.0));
        assert_eq!(
            fit_filter(&stale, &narrower),
            Some(XDomain::Continuous(ContinuousDomain::linear(5.0, 10.0)))
        );
        let outside = XDomain::Continuous(ContinuousDomain::linear(20.0, 40.0));
        assert_eq!(fit_filter(&outside, &narrower), None);

        let mut controller = controller();
        assert!(controller.commit_filter(stale, &original()).expect("commit"));
        controller.refit_filter(XDomain::Continuous(ContinuousDomain::linear(5.0, 10.0)));
        assert_eq!(controller.state(), BrushState::Filtered);
        assert_eq!(
            controller.filtered_domain(),
            Some(&XDomain::Continuous(ContinuousDomain::linear(5.0, 10.0)))
        );
    }

    #[test]
    fn continuous_selection_inverts_pixels() {
        let scale = XScale::Linear(LinearScale::new(0.0, 100.0, 0.0, 500.0).expect("scale"));
        let domain = selection_to_domain(&scale, (250.0, 50.0))
            .expect("selection")
            .expect("non-empty");
        assert_eq!(
            domain,
            XDomain::Continuous(ContinuousDomain::linear(10.0, 50.0))
        );
    }
}
