mod config;
mod engine;
mod engine_accessors;
mod engine_snapshot;
mod events;
mod frame_builder;
mod input;
mod interaction_controller;
mod json_contract;
mod listener_registry;
mod validation;

pub use config::{ChartConfig, ChartKind, PanningMode};
pub use engine::ChartEngine;
pub use engine_snapshot::ChartSnapshot;
pub use events::{ChartEvent, ChartListener};
pub use frame_builder::{flatten_bar_points, resolve_chart_frame, resolve_view_dimensions};
pub use input::{InputEvent, NavigationKey};
pub use json_contract::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1};
pub use validation::validate_result_set;
