//! chart-scales: headless domain, scale and brush core for charts.
//!
//! The crate resolves X/Y domains, builds linear, time, point and band
//! scales, stacks series, mirrors an overview timeline and drives brush and
//! keyboard panning for stacked-area, vertical-bar and line charts. Drawing
//! is left to a [`render::Renderer`] implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEngine, ChartEvent, ChartKind, ChartListener, PanningMode};
pub use error::{ChartError, ChartResult};
