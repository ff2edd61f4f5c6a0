use tracing::debug;

use crate::core::{SeriesGeometry, XDomain, XValue};
use crate::error::ChartResult;
use crate::interaction::brush::selection_to_domain;
use crate::interaction::{ActiveEntry, PanDirection};
use crate::render::Renderer;

use super::frame_builder::flatten_bar_points;
use super::{ChartEngine, ChartEvent, ChartKind, NavigationKey, PanningMode};

impl<R: Renderer> ChartEngine<R> {
    /// Brush drag started. Returns `false` when no brush region exists.
    pub fn brush_start(&mut self) -> bool {
        if !self.brush.on_drag_start() {
            return false;
        }
        self.hide_tooltip();
        true
    }

    /// Brush released over `selection` (pixel bounds inside the brush region)
    /// or with no selection at all.
    ///
    /// Returns whether a new filter was committed.
    pub fn brush_end(&mut self, selection: Option<(f64, f64)>) -> ChartResult<bool> {
        let Some(frame) = self.frame.as_ref() else {
            return Ok(false);
        };
        let x_scale = match (self.config.panning, frame.timeline.as_ref()) {
            (PanningMode::OnChart, _) => &frame.x_scale,
            (PanningMode::Timeline, Some(timeline)) => &timeline.mirror.x_scale,
            _ => return Ok(false),
        };
        let candidate = match selection {
            Some(pixels) => selection_to_domain(x_scale, pixels)?,
            None => None,
        };
        let original = frame.original_x_domain.clone();

        let committed = self.brush.on_drag_end(candidate, &original)?;
        if committed {
            self.after_filter_change()?;
        }
        Ok(committed)
    }

    /// Overview callback applying an already-resolved domain.
    pub fn apply_filter_domain(&mut self, domain: XDomain) -> ChartResult<bool> {
        let Some(original) = self.frame.as_ref().map(|frame| frame.original_x_domain.clone())
        else {
            return Ok(false);
        };
        let committed = self.brush.commit_filter(domain, &original)?;
        if committed {
            self.after_filter_change()?;
        }
        Ok(committed)
    }

    /// Click on the overview strip: restores the original domain.
    pub fn timeline_click(&mut self) -> ChartResult<bool> {
        let Some(original) = self.frame.as_ref().map(|frame| frame.original_x_domain.clone())
        else {
            return Ok(false);
        };
        if !self.brush.reset() {
            return Ok(false);
        }
        self.emit(ChartEvent::FilterChanged { domain: original });
        self.update()?;
        Ok(true)
    }

    /// Keyboard navigation; only arrow keys pan.
    ///
    /// Returns whether the displayed domain moved. Any arrow key re-runs the
    /// update cycle while panning is enabled.
    pub fn key_pan(&mut self, key: NavigationKey) -> ChartResult<bool> {
        let direction = match key {
            NavigationKey::ArrowLeft => PanDirection::Left,
            NavigationKey::ArrowRight => PanDirection::Right,
            NavigationKey::Other => return Ok(false),
        };
        if self.config.panning == PanningMode::None || !self.brush.has_region() {
            return Ok(false);
        }
        if self.config.kind != ChartKind::BarVertical {
            self.hide_tooltip();
            self.hide_circles();
        }

        let original = self
            .frame
            .as_ref()
            .and_then(|frame| frame.original_x_domain.as_continuous());
        let moved = original.and_then(|original| self.brush.pan(direction, original));
        if let Some(domain) = moved {
            debug!(start = domain.start, end = domain.end, ?direction, "keyboard pan");
            self.emit(ChartEvent::FilterChanged {
                domain: XDomain::Continuous(domain),
            });
        }
        self.update()?;
        Ok(moved.is_some())
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.interaction.on_pointer_move(x, y);
    }

    /// Pointer left the chart: hides the tooltip and, for area and line
    /// charts, clears the hovered vertical and every active entry.
    pub fn pointer_leave(&mut self) {
        self.hide_tooltip();
        self.interaction.on_pointer_leave();
        if self.config.kind != ChartKind::BarVertical {
            self.hide_circles();
        }
    }

    /// Tooltip area reported the X value under the pointer.
    pub fn hover_vertical(&mut self, value: XValue) {
        self.interaction.hover_vertical(value);
        self.deactivate_all();
    }

    pub fn activate(&mut self, entry: ActiveEntry) {
        let changes = self.active.activate(entry);
        self.emit_all(changes);
    }

    pub fn deactivate(&mut self, entry: ActiveEntry) {
        if let Some(change) = self.active.deactivate(entry) {
            self.emit(change.into());
        }
    }

    pub fn deactivate_all(&mut self) {
        let changes = self.active.deactivate_all();
        self.emit_all(changes);
    }

    /// Legend hover on a bar chart: activates the displayed bar with `label`.
    pub fn activate_from_legend(&mut self, label: &str) -> bool {
        let entry = self.frame.as_ref().and_then(|frame| match &frame.geometry {
            SeriesGeometry::Bars(bars) => bars
                .iter()
                .find(|bar| bar.label == label)
                .map(|bar| ActiveEntry::new(bar.name.clone(), bar.value)),
            SeriesGeometry::Areas(_) | SeriesGeometry::Lines(_) => None,
        });
        match entry {
            Some(entry) => {
                self.activate(entry);
                true
            }
            None => false,
        }
    }

    /// Legend leave on a bar chart: deactivates the bound point with `label`.
    pub fn deactivate_from_legend(&mut self, label: &str) -> bool {
        if self.config.kind != ChartKind::BarVertical {
            return false;
        }
        let entry = flatten_bar_points(&self.results)
            .iter()
            .find(|point| point.category_label() == label)
            .map(ActiveEntry::from_point);
        match entry {
            Some(entry) => {
                self.deactivate(entry);
                true
            }
            None => false,
        }
    }

    /// Click on a datum; `series` tags the event with the owning series.
    pub fn select(&mut self, mut entry: ActiveEntry, series: Option<&str>) {
        if let Some(series) = series {
            entry.series = Some(series.to_owned());
        }
        self.emit(ChartEvent::Select { entry });
    }

    fn hide_tooltip(&mut self) {
        self.interaction.hide_tooltip();
        self.emit(ChartEvent::TooltipHidden);
    }

    fn hide_circles(&mut self) {
        self.interaction.clear_hovered_vertical();
        self.deactivate_all();
    }

    fn after_filter_change(&mut self) -> ChartResult<()> {
        if let Some(domain) = self.brush.filtered_domain().cloned() {
            self.emit(ChartEvent::FilterChanged { domain });
        }
        self.update()
    }
}
