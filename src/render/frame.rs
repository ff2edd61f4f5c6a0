use serde::{Deserialize, Serialize};

use crate::api::{ChartKind, PanningMode};
use crate::core::{
    LinearScale, ScaleKind, SeriesGeometry, StackedResultSet, TimelineMirror, ViewDimensions,
    Viewport, XDomain, XScale, XValue,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::BrushExtent;

/// Overview strip scales plus the series drawn inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFrame {
    pub mirror: TimelineMirror,
    pub geometry: SeriesGeometry,
}

/// Everything one update cycle derived from config, data and filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub kind: ChartKind,
    pub panning: PanningMode,
    pub viewport: Viewport,
    pub dims: ViewDimensions,
    /// Plot origin inside the viewport: `(x_offset, margin_top)`.
    pub plot_offset: (f64, f64),
    pub scale_kind: ScaleKind,
    pub x_set: Vec<XValue>,
    pub original_x_domain: XDomain,
    pub x_domain: XDomain,
    /// `true` when `x_domain` is the brush filter rather than the original.
    pub filter_applied: bool,
    pub y_domain: (f64, f64),
    pub series_domain: Vec<String>,
    pub has_range: bool,
    pub x_scale: XScale,
    pub y_scale: LinearScale,
    pub stacked: Option<StackedResultSet>,
    pub geometry: SeriesGeometry,
    pub timeline: Option<TimelineFrame>,
    pub brush_extent: Option<BrushExtent>,
}

impl ChartFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if ![self.dims.width, self.dims.height, self.dims.x_offset]
            .iter()
            .all(|value| value.is_finite())
        {
            return Err(ChartError::InvalidData(
                "plot dimensions must be finite".to_owned(),
            ));
        }

        validate_geometry(&self.geometry)?;
        if let Some(timeline) = &self.timeline {
            validate_geometry(&timeline.geometry)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.geometry.vertices().count()
    }
}

fn validate_geometry(geometry: &SeriesGeometry) -> ChartResult<()> {
    if geometry
        .vertices()
        .any(|vertex| !vertex.x.is_finite() || !vertex.y.is_finite())
    {
        return Err(ChartError::InvalidData(
            "series geometry must be finite".to_owned(),
        ));
    }
    Ok(())
}
