use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{ScaleKind, ViewDimensions, Viewport, XDomain, XValue};
use crate::interaction::{ActiveEntry, BrushState};
use crate::render::Renderer;

use super::{ChartEngine, ChartKind, PanningMode};

/// Serializable state snapshot used by regression tests and debugging
/// tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub kind: ChartKind,
    pub panning: PanningMode,
    pub viewport: Viewport,
    pub dims: Option<ViewDimensions>,
    pub scale_kind: Option<ScaleKind>,
    pub original_x_domain: Option<XDomain>,
    pub x_domain: Option<XDomain>,
    pub y_domain: Option<(f64, f64)>,
    pub brush_state: BrushState,
    pub filtered_domain: Option<XDomain>,
    pub active_entries: Vec<ActiveEntry>,
    pub hovered_vertical: Option<XValue>,
    pub tooltip_visible: bool,
    /// Point count per series, in binding order.
    pub series_points: IndexMap<String, usize>,
    pub update_count: u64,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let frame = self.frame.as_ref();
        ChartSnapshot {
            kind: self.config.kind,
            panning: self.config.panning,
            viewport: self.config.viewport,
            dims: frame.map(|frame| frame.dims),
            scale_kind: frame.map(|frame| frame.scale_kind),
            original_x_domain: frame.map(|frame| frame.original_x_domain.clone()),
            x_domain: frame.map(|frame| frame.x_domain.clone()),
            y_domain: frame.map(|frame| frame.y_domain),
            brush_state: self.brush.state(),
            filtered_domain: self.brush.filtered_domain().cloned(),
            active_entries: self.active.entries().to_vec(),
            hovered_vertical: self.interaction.hovered_vertical().cloned(),
            tooltip_visible: self.interaction.tooltip_visible(),
            series_points: self
                .results
                .iter()
                .map(|series| (series.name.clone(), series.series.len()))
                .collect(),
            update_count: self.update_count,
        }
    }
}
