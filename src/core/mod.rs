pub mod band_scale;
pub mod domain;
pub mod geometry;
pub mod layout;
pub mod primitives;
pub mod scale;
pub mod stacking;
pub mod ticks;
pub mod time_scale;
pub mod timeline;
pub mod types;
pub mod x_scale;

pub use band_scale::BandScale;
pub use domain::{
    ContinuousDomain, ContinuousKind, LineYDomain, ScaleKind, XDomain, XDomainResolution,
    XScaleOverrides, YScaleOverrides,
};
pub use geometry::{AreaGeometry, BarRect, LineGeometry, SeriesGeometry, Vertex};
pub use layout::{LegendKind, LegendPosition, Margins, ViewDimensions, ViewLayoutInput};
pub use scale::LinearScale;
pub use stacking::{StackedPoint, StackedResultSet, StackedSeries};
pub use time_scale::TimeScale;
pub use timeline::{TimelineMirror, TimelineOptions};
pub use types::{DataPoint, ResultSet, Series, Viewport, XValue};
pub use x_scale::{OrdinalStyle, XScale, XScaleOptions};
