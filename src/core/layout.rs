use serde::{Deserialize, Serialize};

use crate::core::Viewport;

const GRID_COLUMNS: f64 = 12.0;
const AXIS_GAP_PX: f64 = 5.0;
const AXIS_LABEL_PX: f64 = 25.0 + 5.0;
const Y_AXIS_OFFSET_GAP_PX: f64 = 10.0;

/// Outer margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 20.0,
            bottom: 10.0,
            left: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LegendPosition {
    #[default]
    Right,
    Below,
}

/// Legend flavor; ordinal legends take more horizontal room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LegendKind {
    #[default]
    Ordinal,
    Continuous,
}

/// Everything the drawable-area computation depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewLayoutInput {
    pub viewport: Viewport,
    pub margins: Margins,
    pub show_x_axis: bool,
    pub show_y_axis: bool,
    pub x_axis_height: f64,
    pub y_axis_width: f64,
    pub show_x_axis_label: bool,
    pub show_y_axis_label: bool,
    pub show_legend: bool,
    pub legend_kind: LegendKind,
    pub legend_position: LegendPosition,
}

/// Drawable plot area after margins, axes and legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewDimensions {
    pub width: f64,
    pub height: f64,
    pub x_offset: f64,
}

impl ViewDimensions {
    /// Removes `reserved` pixels from the bottom of the plot (clamped at 0).
    #[must_use]
    pub fn reserve_height(self, reserved: f64) -> Self {
        Self {
            height: (self.height - reserved).max(0.0),
            ..self
        }
    }
}

/// Computes the plot area on a 12-column grid.
///
/// A right-hand legend consumes two columns (ordinal) or one (continuous).
/// Axes reserve their measured size plus fixed gaps, and axis labels another
/// 30 pixels each. Results are floored and never negative.
#[must_use]
pub fn compute_view_dimensions(input: ViewLayoutInput) -> ViewDimensions {
    let margins = input.margins;
    let mut x_offset = margins.left;
    let mut height = f64::from(input.viewport.height) - margins.top - margins.bottom;

    let mut columns = GRID_COLUMNS;
    if input.show_legend && input.legend_position == LegendPosition::Right {
        columns -= match input.legend_kind {
            LegendKind::Ordinal => 2.0,
            LegendKind::Continuous => 1.0,
        };
    }
    let mut width = f64::from(input.viewport.width) * columns / GRID_COLUMNS;
    width -= margins.right + margins.left;

    if input.show_x_axis {
        height -= AXIS_GAP_PX + input.x_axis_height;
        if input.show_x_axis_label {
            height -= AXIS_LABEL_PX;
        }
    }

    if input.show_y_axis {
        width -= AXIS_GAP_PX + input.y_axis_width;
        x_offset += input.y_axis_width + Y_AXIS_OFFSET_GAP_PX;
        if input.show_y_axis_label {
            width -= AXIS_LABEL_PX;
            x_offset += AXIS_LABEL_PX;
        }
    }

    ViewDimensions {
        width: width.max(0.0).floor(),
        height: height.max(0.0).floor(),
        x_offset: x_offset.floor(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        LegendKind, LegendPosition, Margins, ViewLayoutInput, compute_view_dimensions,
    };
    use crate::core::Viewport;

    fn input(width: u32, height: u32) -> ViewLayoutInput {
        ViewLayoutInput {
            viewport: Viewport::new(width, height),
            margins: Margins::default(),
            show_x_axis: false,
            show_y_axis: false,
            x_axis_height: 0.0,
            y_axis_width: 0.0,
            show_x_axis_label: false,
            show_y_axis_label: false,
            show_legend: false,
            legend_kind: LegendKind::Ordinal,
            legend_position: LegendPosition::Right,
        }
    }

    #[test]
    fn bare_chart_only_subtracts_margins() {
        let dims = compute_view_dimensions(input(640, 400));
        assert_eq!(dims.width, 600.0);
        assert_eq!(dims.height, 380.0);
        assert_eq!(dims.x_offset, 20.0);
    }

    #[test]
    fn axes_labels_and_legend_reserve_space() {
        let mut layout = input(1200, 400);
        layout.show_legend = true;
        layout.show_x_axis = true;
        layout.x_axis_height = 20.0;
        layout.show_x_axis_label = true;
        layout.show_y_axis = true;
        layout.y_axis_width = 40.0;
        layout.show_y_axis_label = true;

        let dims = compute_view_dimensions(layout);
        // 1200 * 10 / 12 = 1000, - 40 margins, - 45 axis, - 30 label
        assert_eq!(dims.width, 885.0);
        // 400 - 20 margins - 25 axis - 30 label
        assert_eq!(dims.height, 325.0);
        // 20 + 40 + 10 + 30
        assert_eq!(dims.x_offset, 100.0);
    }

    #[test]
    fn tiny_viewports_clamp_to_zero() {
        let dims = compute_view_dimensions(input(10, 10));
        assert_eq!(dims.width, 0.0);
        assert_eq!(dims.height, 0.0);
    }
}
