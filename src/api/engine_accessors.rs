use crate::core::{Series, XDomain};
use crate::interaction::{ActiveEntry, BrushExtent, BrushState, InteractionState};
use crate::render::{ChartFrame, Renderer};

use super::{ChartConfig, ChartEngine};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn results(&self) -> &[Series] {
        &self.results
    }

    /// Frame of the most recent update, if any.
    #[must_use]
    pub fn frame(&self) -> Option<&ChartFrame> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn brush_state(&self) -> BrushState {
        self.brush.state()
    }

    #[must_use]
    pub fn brush_extent(&self) -> Option<BrushExtent> {
        self.brush.extent()
    }

    #[must_use]
    pub fn filtered_domain(&self) -> Option<&XDomain> {
        self.brush.filtered_domain()
    }

    #[must_use]
    pub fn active_entries(&self) -> &[ActiveEntry] {
        self.active.entries()
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    #[must_use]
    pub fn pending_input_count(&self) -> usize {
        self.pending_inputs.len()
    }
}
