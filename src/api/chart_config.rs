use serde::{Deserialize, Serialize};

use crate::core::{ChartType, CurveStyle, EdgeInsets, GeometryOptions, ViewportSpec};
use crate::error::ChartResult;
use crate::interaction::InteractionConfig;

use super::validation::validate_chart_config;

/// Visual tuning for grid, labels, markers and tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Number of intervals between horizontal grid lines; `0` disables the grid.
    #[serde(default = "default_grid_line_count")]
    pub grid_line_count: usize,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_area_fill_alpha")]
    pub area_fill_alpha: f64,
    #[serde(default = "default_shadow_fill_alpha")]
    pub shadow_fill_alpha: f64,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,
    #[serde(default = "default_value_precision")]
    pub value_precision: u32,
    #[serde(default)]
    pub value_prefix: String,
    /// `strftime` pattern for axis and tooltip dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    #[serde(default = "default_tooltip_background")]
    pub tooltip_background: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            grid_line_count: default_grid_line_count(),
            line_width: default_line_width(),
            area_fill_alpha: default_area_fill_alpha(),
            shadow_fill_alpha: default_shadow_fill_alpha(),
            label_font_size_px: default_label_font_size_px(),
            marker_size: default_marker_size(),
            value_precision: default_value_precision(),
            value_prefix: String::new(),
            date_format: default_date_format(),
            text_color: default_text_color(),
            grid_color: default_grid_color(),
            tooltip_background: default_tooltip_background(),
        }
    }
}

/// Public chart bootstrap configuration.
///
/// Mirrors the props a host screen passes to the chart component and is
/// serializable so hosts can keep chart setup next to their own settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavChartConfig {
    pub width: f64,
    #[serde(default = "default_chart_height")]
    pub chart_height: f64,
    #[serde(default = "default_padding")]
    pub padding: EdgeInsets,
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub curve_style: CurveStyle,
    /// Draws a faint fill under line charts.
    #[serde(default)]
    pub shadow: bool,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub style: ChartStyle,
}

impl NavChartConfig {
    /// Creates a config with default styling for the given surface size.
    #[must_use]
    pub fn new(width: f64, chart_height: f64) -> Self {
        Self {
            width,
            chart_height,
            padding: default_padding(),
            chart_type: ChartType::Line,
            curve_style: CurveStyle::Straight,
            shadow: false,
            primary_color: default_primary_color(),
            interaction: InteractionConfig::default(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    #[must_use]
    pub fn with_curve_style(mut self, curve_style: CurveStyle) -> Self {
        self.curve_style = curve_style;
        self
    }

    #[must_use]
    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    #[must_use]
    pub fn with_primary_color(mut self, primary_color: impl Into<String>) -> Self {
        self.primary_color = primary_color.into();
        self
    }

    #[must_use]
    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportSpec {
        ViewportSpec::new(self.width, self.chart_height).with_padding(self.padding)
    }

    #[must_use]
    pub fn geometry_options(&self) -> GeometryOptions {
        GeometryOptions::new(self.chart_type)
            .with_curve_style(self.curve_style)
            .with_shadow(self.shadow)
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_chart_config(self)
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_chart_height() -> f64 {
    220.0
}

fn default_padding() -> EdgeInsets {
    EdgeInsets::new(16.0, 24.0, 8.0, 56.0)
}

fn default_primary_color() -> String {
    "#1E88E5".to_owned()
}

fn default_grid_line_count() -> usize {
    4
}

fn default_line_width() -> f64 {
    2.0
}

fn default_area_fill_alpha() -> f64 {
    0.2
}

fn default_shadow_fill_alpha() -> f64 {
    0.08
}

fn default_label_font_size_px() -> f64 {
    10.0
}

fn default_marker_size() -> f64 {
    8.0
}

fn default_value_precision() -> u32 {
    2
}

fn default_date_format() -> String {
    "%d %b %Y".to_owned()
}

fn default_text_color() -> String {
    "#5F6368".to_owned()
}

fn default_grid_color() -> String {
    "#E0E0E0".to_owned()
}

fn default_tooltip_background() -> String {
    "#FFFFFF".to_owned()
}
