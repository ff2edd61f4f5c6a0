pub mod active_entries;
pub mod brush;

use serde::{Deserialize, Serialize};

use crate::core::XValue;

pub use active_entries::{ActivationPolicy, ActiveEntries, ActiveEntry, EntryChange};
pub use brush::{BrushController, BrushExtent, BrushState, PanDirection};

/// Pointer-driven presentation state shared by all chart variants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    tooltip_visible: bool,
    hovered_vertical: Option<XValue>,
    cursor: Option<(f64, f64)>,
}

impl InteractionState {
    #[must_use]
    pub fn tooltip_visible(&self) -> bool {
        self.tooltip_visible
    }

    #[must_use]
    pub fn hovered_vertical(&self) -> Option<&XValue> {
        self.hovered_vertical.as_ref()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
        self.tooltip_visible = true;
    }

    /// Pointer left the chart: tooltip and vertical marker go away.
    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.tooltip_visible = false;
        self.hovered_vertical = None;
    }

    /// Returns whether the tooltip was visible before hiding it.
    pub fn hide_tooltip(&mut self) -> bool {
        std::mem::replace(&mut self.tooltip_visible, false)
    }

    pub fn hover_vertical(&mut self, value: XValue) {
        self.hovered_vertical = Some(value);
    }

    pub fn clear_hovered_vertical(&mut self) {
        self.hovered_vertical = None;
    }
}
