mod frame;
mod null_renderer;

pub use frame::{ChartFrame, TimelineFrame};
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully resolved `ChartFrame` so drawing code stays
/// isolated from domain, scale and brush logic.
pub trait Renderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()>;
}
