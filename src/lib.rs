//! chart-builder-rs: field-driven chart building and aggregation engine.
//!
//! Raw records are read through a registry of typed fields, grouped and
//! aggregated per zone assignment, and assembled into a renderer-ready
//! declarative chart spec.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{ChartBuilder, ChartBuilderConfig, ChartSpec};
pub use error::{ChartError, ChartResult};
