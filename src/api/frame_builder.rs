//! Pure update cycle: config + data + filter in, resolved frame out.

use tracing::{debug, warn};

use crate::core::domain::{
    bar_x_domain, bar_y_domain, line_y_domain, resolve_x_domain, series_domain, stacked_y_domain,
};
use crate::core::geometry::{project_lines, project_stacked_areas, project_vertical_bars};
use crate::core::layout::compute_view_dimensions;
use crate::core::stacking::stack_series;
use crate::core::timeline::mirror_timeline;
use crate::core::x_scale::{build_x_scale, build_y_scale};
use crate::core::{
    DataPoint, LinearScale, OrdinalStyle, ScaleKind, Series, SeriesGeometry, ViewDimensions,
    XDomain, XScale, XScaleOptions, XValue,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::BrushExtent;
use crate::interaction::brush::fit_filter;
use crate::render::{ChartFrame, TimelineFrame};

use super::validation::validate_result_set;
use super::{ChartConfig, ChartKind, PanningMode};

/// Plot area after layout and the timeline reservation.
#[must_use]
pub fn resolve_view_dimensions(config: &ChartConfig) -> ViewDimensions {
    let dims = config
        .dims_override
        .unwrap_or_else(|| compute_view_dimensions(config.layout_input()));
    if config.panning == PanningMode::Timeline {
        dims.reserve_height(config.timeline.reserved_height(config.margins))
    } else {
        dims
    }
}

/// Runs one full update cycle without touching any engine state.
///
/// The filter is refit into the original domain first: continuous filters
/// are clamped and span-checked, ordinal filters lose unknown categories.
/// A filter that does not fit is ignored; the returned frame reports that
/// through `filter_applied`. `x_domain` is the displayed domain before any
/// rounding, the rounded bounds live on `x_scale`.
pub fn resolve_chart_frame(
    config: &ChartConfig,
    results: &[Series],
    filtered: Option<&XDomain>,
) -> ChartResult<ChartFrame> {
    config.validate()?;
    validate_result_set(results)?;

    let dims = resolve_view_dimensions(config);
    let frame = match config.kind {
        ChartKind::AreaStacked => resolve_area_frame(config, results, filtered, dims)?,
        ChartKind::Line => resolve_line_frame(config, results, filtered, dims)?,
        ChartKind::BarVertical => resolve_bar_frame(config, results, filtered, dims)?,
    };
    debug!(
        kind = ?frame.kind,
        scale_kind = ?frame.scale_kind,
        width = frame.dims.width,
        height = frame.dims.height,
        filter_applied = frame.filter_applied,
        "chart frame resolved"
    );
    Ok(frame)
}

struct DomainChoice {
    displayed: XDomain,
    filter_applied: bool,
}

fn choose_displayed_domain(original: &XDomain, filtered: Option<&XDomain>) -> DomainChoice {
    let fitted = filtered.and_then(|filter| {
        let fitted = fit_filter(filter, original);
        if fitted.is_none() {
            warn!(
                filter_kind = ?filter.kind(),
                axis_kind = ?original.kind(),
                "ignoring filter that does not fit the x axis"
            );
        }
        fitted
    });
    match fitted {
        Some(displayed) => DomainChoice {
            displayed,
            filter_applied: true,
        },
        None => DomainChoice {
            displayed: original.clone(),
            filter_applied: false,
        },
    }
}

fn brush_extent(config: &ChartConfig, dims: ViewDimensions) -> Option<BrushExtent> {
    match config.panning {
        PanningMode::None => None,
        PanningMode::OnChart => Some(BrushExtent {
            width: dims.width,
            height: dims.height,
        }),
        PanningMode::Timeline => Some(BrushExtent {
            width: dims.width,
            height: config.timeline.height,
        }),
    }
}

fn point_options(config: &ChartConfig, nice_time: bool) -> XScaleOptions {
    XScaleOptions {
        ordinal: OrdinalStyle::Point {
            padding: config.point_padding,
        },
        nice_linear: config.round_domains,
        nice_time: nice_time && config.round_domains,
    }
}

fn resolve_area_frame(
    config: &ChartConfig,
    results: &[Series],
    filtered: Option<&XDomain>,
    dims: ViewDimensions,
) -> ChartResult<ChartFrame> {
    let resolution = resolve_x_domain(results, &config.x_overrides())?;
    let choice = choose_displayed_domain(&resolution.domain, filtered);
    let y_domain = stacked_y_domain(results, &resolution.x_set, config.y_overrides());

    let x_options = point_options(config, true);
    let x_scale = build_x_scale(&choice.displayed, dims.width, x_options)?;
    let y_scale = build_y_scale(y_domain, dims.height, config.round_domains)?;

    let stacked = stack_series(results, &resolution.x_set);
    let geometry = SeriesGeometry::Areas(project_stacked_areas(
        &stacked,
        &resolution.x_set,
        &x_scale,
        y_scale,
    )?);

    let timeline = match config.panning {
        PanningMode::Timeline => {
            let mirror = mirror_timeline(
                &resolution.domain,
                y_domain,
                dims,
                config.margins,
                config.timeline,
                x_options,
                config.round_domains,
            )?;
            let geometry = SeriesGeometry::Areas(project_stacked_areas(
                &stacked,
                &resolution.x_set,
                &mirror.x_scale,
                mirror.y_scale,
            )?);
            Some(TimelineFrame { mirror, geometry })
        }
        PanningMode::None | PanningMode::OnChart => None,
    };

    Ok(ChartFrame {
        kind: config.kind,
        panning: config.panning,
        viewport: config.viewport,
        dims,
        plot_offset: (dims.x_offset, config.margins.top),
        scale_kind: resolution.kind,
        x_set: resolution.x_set,
        original_x_domain: resolution.domain,
        x_domain: choice.displayed,
        filter_applied: choice.filter_applied,
        y_domain,
        series_domain: series_domain(results),
        has_range: false,
        x_scale,
        y_scale,
        stacked: Some(stacked),
        geometry,
        timeline,
        brush_extent: brush_extent(config, dims),
    })
}

fn resolve_line_frame(
    config: &ChartConfig,
    results: &[Series],
    filtered: Option<&XDomain>,
    dims: ViewDimensions,
) -> ChartResult<ChartFrame> {
    let resolution = resolve_x_domain(results, &config.x_overrides())?;
    let choice = choose_displayed_domain(&resolution.domain, filtered);
    let line_domain = line_y_domain(results, config.auto_scale, config.y_overrides());

    // Line charts never round time axes.
    let x_options = point_options(config, false);
    let x_scale = build_x_scale(&choice.displayed, dims.width, x_options)?;
    let y_scale = build_y_scale(line_domain.domain, dims.height, config.round_domains)?;
    let geometry = SeriesGeometry::Lines(project_lines(results, &x_scale, y_scale)?);

    let timeline = match config.panning {
        PanningMode::Timeline => {
            let mirror = mirror_timeline(
                &resolution.domain,
                line_domain.domain,
                dims,
                config.margins,
                config.timeline,
                x_options,
                config.round_domains,
            )?;
            let geometry =
                SeriesGeometry::Lines(project_lines(results, &mirror.x_scale, mirror.y_scale)?);
            Some(TimelineFrame { mirror, geometry })
        }
        PanningMode::None | PanningMode::OnChart => None,
    };

    Ok(ChartFrame {
        kind: config.kind,
        panning: config.panning,
        viewport: config.viewport,
        dims,
        plot_offset: (dims.x_offset, config.margins.top),
        scale_kind: resolution.kind,
        x_set: resolution.x_set,
        original_x_domain: resolution.domain,
        x_domain: choice.displayed,
        filter_applied: choice.filter_applied,
        y_domain: line_domain.domain,
        series_domain: series_domain(results),
        has_range: line_domain.has_range,
        x_scale,
        y_scale,
        stacked: None,
        geometry,
        timeline,
        brush_extent: brush_extent(config, dims),
    })
}

/// Bar charts bind a flat list of points; every series contributes its
/// points in order.
#[must_use]
pub fn flatten_bar_points(results: &[Series]) -> Vec<DataPoint> {
    results
        .iter()
        .flat_map(|series| series.series.iter().cloned())
        .collect()
}

fn band_scale_for(config: &ChartConfig, domain: &XDomain, width: f64) -> ChartResult<XScale> {
    build_x_scale(
        domain,
        width,
        XScaleOptions {
            ordinal: OrdinalStyle::Band {
                bar_padding_px: config.bar_padding,
            },
            nice_linear: false,
            nice_time: false,
        },
    )
}

fn bar_geometry(
    points: &[DataPoint],
    x_scale: &XScale,
    y_scale: LinearScale,
) -> ChartResult<SeriesGeometry> {
    let band = x_scale.as_ordinal().ok_or_else(|| {
        ChartError::DomainMismatch("bar charts need an ordinal x scale".to_owned())
    })?;
    Ok(SeriesGeometry::Bars(project_vertical_bars(
        points,
        &band.domain(),
        band,
        y_scale,
    )?))
}

fn resolve_bar_frame(
    config: &ChartConfig,
    results: &[Series],
    filtered: Option<&XDomain>,
    dims: ViewDimensions,
) -> ChartResult<ChartFrame> {
    let points = flatten_bar_points(results);
    let labels: Vec<XValue> = bar_x_domain(&points);
    let original = XDomain::Ordinal(labels.clone());
    let choice = choose_displayed_domain(&original, filtered);
    let y_domain = bar_y_domain(
        &points,
        config.y_overrides(),
        config.y_axis_ticks.as_deref(),
    );

    let x_scale = band_scale_for(config, &choice.displayed, dims.width)?;
    let y_scale = build_y_scale(y_domain, dims.height, config.round_domains)?;
    let geometry = bar_geometry(&points, &x_scale, y_scale)?;

    let timeline = match config.panning {
        PanningMode::Timeline => {
            let mirror = mirror_timeline(
                &original,
                y_domain,
                dims,
                config.margins,
                config.timeline,
                XScaleOptions {
                    ordinal: OrdinalStyle::Band {
                        bar_padding_px: config.bar_padding,
                    },
                    nice_linear: false,
                    nice_time: false,
                },
                config.round_domains,
            )?;
            let geometry = bar_geometry(&points, &mirror.x_scale, mirror.y_scale)?;
            Some(TimelineFrame { mirror, geometry })
        }
        PanningMode::None | PanningMode::OnChart => None,
    };

    Ok(ChartFrame {
        kind: config.kind,
        panning: config.panning,
        viewport: config.viewport,
        dims,
        plot_offset: (dims.x_offset, config.margins.top),
        scale_kind: ScaleKind::Ordinal,
        x_set: labels,
        original_x_domain: original,
        x_domain: choice.displayed,
        filter_applied: choice.filter_applied,
        y_domain,
        series_domain: series_domain(results),
        has_range: false,
        x_scale,
        y_scale,
        stacked: None,
        geometry,
        timeline,
        brush_extent: brush_extent(config, dims),
    })
}
