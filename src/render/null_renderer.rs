use crate::error::ChartResult;
use crate::render::{ChartFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_vertex_count: usize,
    pub last_timeline_vertex_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_vertex_count = frame.vertex_count();
        self.last_timeline_vertex_count = frame
            .timeline
            .as_ref()
            .map_or(0, |timeline| timeline.geometry.vertices().count());
        Ok(())
    }
}
