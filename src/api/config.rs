use serde::{Deserialize, Serialize};

use crate::core::{
    LegendKind, LegendPosition, Margins, TimelineOptions, ViewDimensions, ViewLayoutInput,
    Viewport, XScaleOverrides, XValue, YScaleOverrides,
};
use crate::error::{ChartError, ChartResult};

use super::validation::validate_chart_config;

/// Chart variant driving domain, scale and geometry rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    AreaStacked,
    BarVertical,
    Line,
}

/// Where the brush lives, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PanningMode {
    #[default]
    None,
    /// Brush on an overview strip under the plot.
    Timeline,
    /// Brush directly over the plot area.
    OnChart,
}

/// Serializable chart setup.
///
/// Every field except `kind` and `viewport` has a default so partial JSON
/// documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub show_x_axis: bool,
    #[serde(default)]
    pub show_y_axis: bool,
    #[serde(default)]
    pub show_x_axis_label: bool,
    #[serde(default)]
    pub show_y_axis_label: bool,
    #[serde(default)]
    pub x_axis_height: f64,
    #[serde(default)]
    pub y_axis_width: f64,
    #[serde(default)]
    pub show_legend: bool,
    #[serde(default)]
    pub legend_kind: LegendKind,
    #[serde(default)]
    pub legend_position: LegendPosition,
    #[serde(default)]
    pub panning: PanningMode,
    #[serde(default)]
    pub round_domains: bool,
    #[serde(default)]
    pub x_scale_min: Option<XValue>,
    #[serde(default)]
    pub x_scale_max: Option<XValue>,
    #[serde(default)]
    pub y_scale_min: Option<f64>,
    #[serde(default)]
    pub y_scale_max: Option<f64>,
    /// Line charts only: drop the implicit zero from the Y domain.
    #[serde(default)]
    pub auto_scale: bool,
    /// Approximate gap between bars, in pixels.
    #[serde(default = "default_bar_padding")]
    pub bar_padding: f64,
    #[serde(default)]
    pub y_axis_ticks: Option<Vec<f64>>,
    #[serde(default)]
    pub timeline: TimelineOptions,
    /// Outer padding of ordinal point scales, in step units.
    #[serde(default = "default_point_padding")]
    pub point_padding: f64,
    /// Precomputed plot area replacing the built-in grid layout.
    #[serde(default)]
    pub dims_override: Option<ViewDimensions>,
}

fn default_bar_padding() -> f64 {
    8.0
}

fn default_point_padding() -> f64 {
    0.1
}

impl ChartConfig {
    #[must_use]
    pub fn new(kind: ChartKind, viewport: Viewport) -> Self {
        Self {
            kind,
            viewport,
            margins: Margins::default(),
            show_x_axis: false,
            show_y_axis: false,
            show_x_axis_label: false,
            show_y_axis_label: false,
            x_axis_height: 0.0,
            y_axis_width: 0.0,
            show_legend: false,
            legend_kind: LegendKind::default(),
            legend_position: LegendPosition::default(),
            panning: PanningMode::default(),
            round_domains: false,
            x_scale_min: None,
            x_scale_max: None,
            y_scale_min: None,
            y_scale_max: None,
            auto_scale: false,
            bar_padding: default_bar_padding(),
            y_axis_ticks: None,
            timeline: TimelineOptions::default(),
            point_padding: default_point_padding(),
            dims_override: None,
        }
    }

    #[must_use]
    pub fn with_panning(mut self, panning: PanningMode) -> Self {
        self.panning = panning;
        self
    }

    #[must_use]
    pub fn with_round_domains(mut self, round_domains: bool) -> Self {
        self.round_domains = round_domains;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, height: f64, show_label: bool) -> Self {
        self.show_x_axis = true;
        self.x_axis_height = height;
        self.show_x_axis_label = show_label;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, width: f64, show_label: bool) -> Self {
        self.show_y_axis = true;
        self.y_axis_width = width;
        self.show_y_axis_label = show_label;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, kind: LegendKind, position: LegendPosition) -> Self {
        self.show_legend = true;
        self.legend_kind = kind;
        self.legend_position = position;
        self
    }

    #[must_use]
    pub fn with_x_scale_bounds(mut self, min: Option<XValue>, max: Option<XValue>) -> Self {
        self.x_scale_min = min;
        self.x_scale_max = max;
        self
    }

    #[must_use]
    pub fn with_y_scale_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.y_scale_min = min;
        self.y_scale_max = max;
        self
    }

    #[must_use]
    pub fn with_auto_scale(mut self, auto_scale: bool) -> Self {
        self.auto_scale = auto_scale;
        self
    }

    #[must_use]
    pub fn with_bar_padding(mut self, bar_padding: f64) -> Self {
        self.bar_padding = bar_padding;
        self
    }

    #[must_use]
    pub fn with_y_axis_ticks(mut self, ticks: Vec<f64>) -> Self {
        self.y_axis_ticks = Some(ticks);
        self
    }

    #[must_use]
    pub fn with_timeline(mut self, timeline: TimelineOptions) -> Self {
        self.timeline = timeline;
        self
    }

    #[must_use]
    pub fn with_dims_override(mut self, dims: ViewDimensions) -> Self {
        self.dims_override = Some(dims);
        self
    }

    #[must_use]
    pub fn x_overrides(&self) -> XScaleOverrides {
        XScaleOverrides {
            min: self.x_scale_min.clone(),
            max: self.x_scale_max.clone(),
        }
    }

    #[must_use]
    pub fn y_overrides(&self) -> YScaleOverrides {
        YScaleOverrides {
            min: self.y_scale_min,
            max: self.y_scale_max,
        }
    }

    #[must_use]
    pub fn layout_input(&self) -> ViewLayoutInput {
        ViewLayoutInput {
            viewport: self.viewport,
            margins: self.margins,
            show_x_axis: self.show_x_axis,
            show_y_axis: self.show_y_axis,
            x_axis_height: self.x_axis_height,
            y_axis_width: self.y_axis_width,
            show_x_axis_label: self.show_x_axis_label,
            show_y_axis_label: self.show_y_axis_label,
            show_legend: self.show_legend,
            legend_kind: self.legend_kind,
            legend_position: self.legend_position,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_chart_config(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartConfig, ChartKind, PanningMode};

    #[test]
    fn minimal_json_fills_defaults() {
        let config = ChartConfig::from_json_str(
            r#"{ "kind": "barVertical", "viewport": { "width": 400, "height": 300 } }"#,
        )
        .expect("config");
        assert_eq!(config.kind, ChartKind::BarVertical);
        assert_eq!(config.panning, PanningMode::None);
        assert_eq!(config.bar_padding, 8.0);
        assert_eq!(config.timeline.height, 50.0);
        assert_eq!(config.timeline.padding, 10.0);
        assert_eq!(config.margins.right, 20.0);
    }

    #[test]
    fn panning_modes_use_camel_case() {
        let config = ChartConfig::from_json_str(
            r#"{ "kind": "line", "viewport": { "width": 1, "height": 1 }, "panning": "onChart" }"#,
        )
        .expect("config");
        assert_eq!(config.panning, PanningMode::OnChart);
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let result = ChartConfig::from_json_str(
            r#"{ "kind": "line", "viewport": { "width": 0, "height": 10 } }"#,
        );
        assert!(result.is_err());
    }
}
