mod chart_config;
mod chart_snapshot;
mod label_format;
mod nav_chart;
mod render_frame_builder;
mod validation;

pub use chart_config::{ChartStyle, NavChartConfig};
pub use chart_snapshot::ChartSnapshot;
pub use label_format::{format_date_label, format_value_label};
pub use nav_chart::{NavChart, SelectionListener};
pub use render_frame_builder::{FrameStyle, build_render_frame};
