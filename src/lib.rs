//! nav-chart: headless historical NAV chart engine.
//!
//! The crate turns a date-ordered NAV series into pixel geometry, resolves
//! gesture positions to the nearest sample, and drives a throttled,
//! fade-animated selection tooltip. Rendering goes through a
//! backend-agnostic `RenderFrame`, so any vector toolkit can draw it.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{NavChart, NavChartConfig};
pub use error::{ChartError, ChartResult};
