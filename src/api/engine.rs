use std::collections::VecDeque;

use tracing::debug;

use crate::core::{ResultSet, Viewport};
use crate::error::ChartResult;
use crate::interaction::{
    ActivationPolicy, ActiveEntries, BrushController, BrushExtent, InteractionState,
};
use crate::render::{ChartFrame, Renderer};

use super::frame_builder::resolve_chart_frame;
use super::{ChartConfig, ChartEvent, ChartKind, ChartListener, InputEvent, PanningMode};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns configuration, bound data, brush state, active entries
/// and listeners. Every mutation that affects the picture re-runs the update
/// cycle and hands the resolved frame to the renderer.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartConfig,
    pub(super) results: ResultSet,
    pub(super) brush: BrushController,
    pub(super) interaction: InteractionState,
    pub(super) active: ActiveEntries,
    pub(super) listeners: Vec<Box<dyn ChartListener>>,
    pub(super) pending_inputs: VecDeque<InputEvent>,
    pub(super) frame: Option<ChartFrame>,
    pub(super) update_count: u64,
}

fn active_entries_for(kind: ChartKind) -> ActiveEntries {
    match kind {
        ChartKind::AreaStacked => ActiveEntries::new(ActivationPolicy::Accumulate, false),
        ChartKind::BarVertical => ActiveEntries::new(ActivationPolicy::Accumulate, true),
        ChartKind::Line => ActiveEntries::new(ActivationPolicy::Exclusive, false),
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine without rendering; call [`Self::update`] or
    /// [`Self::set_results`] to draw the first frame.
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            active: active_entries_for(config.kind),
            config,
            results: ResultSet::new(),
            brush: BrushController::default(),
            interaction: InteractionState::default(),
            listeners: Vec::new(),
            pending_inputs: VecDeque::new(),
            frame: None,
            update_count: 0,
        })
    }

    /// Replaces the configuration and redraws.
    ///
    /// Changing the chart kind resets active entries.
    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        if config.kind != self.config.kind {
            self.active = active_entries_for(config.kind);
        }
        self.config = config;
        self.update()
    }

    /// Binds a new result set and redraws. The filter is refit into the new
    /// original domain and dropped when nothing of it fits.
    pub fn set_results(&mut self, results: ResultSet) -> ChartResult<()> {
        self.results = results;
        self.update()
    }

    /// Runs the update cycle and renders the resulting frame.
    pub fn update(&mut self) -> ChartResult<()> {
        let frame = resolve_chart_frame(&self.config, &self.results, self.brush.filtered_domain())?;
        let filter_unchanged = self
            .brush
            .filtered_domain()
            .map(|filter| *filter == frame.x_domain);
        match (filter_unchanged, frame.filter_applied) {
            (Some(_), false) => self.brush.clear_filter(),
            (Some(false), true) => self.brush.refit_filter(frame.x_domain.clone()),
            _ => {}
        }
        self.sync_brush_region(&frame);

        self.renderer.render(&frame)?;
        self.frame = Some(frame);
        self.update_count += 1;
        debug!(update_count = self.update_count, "chart updated");
        self.emit(ChartEvent::Redrawn {
            update_count: self.update_count,
        });
        Ok(())
    }

    fn sync_brush_region(&mut self, frame: &ChartFrame) {
        match (self.config.panning, frame.brush_extent) {
            (PanningMode::OnChart, Some(extent)) => {
                // The first region spans the whole component until the
                // deferred re-measure narrows it to the plot.
                let initial = BrushExtent {
                    width: f64::from(self.config.viewport.width),
                    height: f64::from(self.config.viewport.height),
                };
                if self.brush.create_region(initial) {
                    self.pending_inputs.push_back(InputEvent::RefreshBrushExtent);
                } else {
                    self.brush.refresh_extent(extent);
                }
            }
            (PanningMode::Timeline, Some(extent)) => {
                if !self.brush.create_region(extent) {
                    self.brush.refresh_extent(extent);
                }
            }
            _ => self.brush.remove_region(),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let mut config = self.config.clone();
        config.viewport = viewport;
        self.set_config(config)
    }

    /// Axis measurement callback: the Y axis reports its rendered width.
    pub fn set_y_axis_width(&mut self, width: f64) -> ChartResult<()> {
        let mut config = self.config.clone();
        config.y_axis_width = width;
        self.set_config(config)
    }

    /// Axis measurement callback: the X axis reports its rendered height.
    pub fn set_x_axis_height(&mut self, height: f64) -> ChartResult<()> {
        let mut config = self.config.clone();
        config.x_axis_height = height;
        self.set_config(config)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
