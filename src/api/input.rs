use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Viewport, XDomain, XValue};
use crate::error::ChartResult;
use crate::interaction::ActiveEntry;
use crate::render::Renderer;

use super::ChartEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationKey {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl NavigationKey {
    /// Maps a DOM-style key code (`"ArrowLeft"`, `"ArrowRight"`, ...).
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// Host input queued for in-order processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    BrushStart,
    BrushEnd { selection: Option<(f64, f64)> },
    TimelineClick,
    FilterDomain(XDomain),
    Key(NavigationKey),
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    HoverVertical(XValue),
    Activate(ActiveEntry),
    Deactivate(ActiveEntry),
    DeactivateAll,
    Select {
        entry: ActiveEntry,
        series: Option<String>,
    },
    Resize(Viewport),
    YAxisWidth(f64),
    XAxisHeight(f64),
    /// Re-measures the brush region once the first layout settled.
    RefreshBrushExtent,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn push_input(&mut self, input: InputEvent) {
        self.pending_inputs.push_back(input);
    }

    /// Drains the input queue in FIFO order, including inputs queued while
    /// processing. Stops at the first error; later inputs stay queued.
    pub fn process_pending_inputs(&mut self) -> ChartResult<usize> {
        let mut processed = 0;
        while let Some(input) = self.pending_inputs.pop_front() {
            trace!(?input, "processing input");
            self.dispatch_input(input)?;
            processed += 1;
        }
        Ok(processed)
    }

    fn dispatch_input(&mut self, input: InputEvent) -> ChartResult<()> {
        match input {
            InputEvent::BrushStart => {
                self.brush_start();
            }
            InputEvent::BrushEnd { selection } => {
                self.brush_end(selection)?;
            }
            InputEvent::TimelineClick => {
                self.timeline_click()?;
            }
            InputEvent::FilterDomain(domain) => {
                self.apply_filter_domain(domain)?;
            }
            InputEvent::Key(key) => {
                self.key_pan(key)?;
            }
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::HoverVertical(value) => self.hover_vertical(value),
            InputEvent::Activate(entry) => self.activate(entry),
            InputEvent::Deactivate(entry) => self.deactivate(entry),
            InputEvent::DeactivateAll => self.deactivate_all(),
            InputEvent::Select { entry, series } => self.select(entry, series.as_deref()),
            InputEvent::Resize(viewport) => self.resize(viewport)?,
            InputEvent::YAxisWidth(width) => self.set_y_axis_width(width)?,
            InputEvent::XAxisHeight(height) => self.set_x_axis_height(height)?,
            InputEvent::RefreshBrushExtent => {
                if let Some(extent) = self.frame.as_ref().and_then(|frame| frame.brush_extent) {
                    self.brush.refresh_extent(extent);
                }
            }
        }
        Ok(())
    }
}
