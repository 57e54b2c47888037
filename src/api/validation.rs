use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionConfig;
use crate::render::Color;

use super::label_format::format_date_label;
use super::{ChartStyle, NavChartConfig};

const MAX_VALUE_PRECISION: u32 = 10;

pub(super) fn validate_chart_config(config: &NavChartConfig) -> ChartResult<()> {
    validate_surface_size(config.width, config.chart_height)?;
    if !config.padding.is_valid() {
        return Err(ChartError::InvalidConfig(
            "padding must be finite and >= 0".to_owned(),
        ));
    }
    parse_color("primary_color", &config.primary_color)?;
    validate_interaction_config(config.interaction)?;
    validate_chart_style(&config.style)
}

pub(super) fn validate_surface_size(width: f64, height: f64) -> ChartResult<()> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(ChartError::InvalidViewport { width, height });
    }
    Ok(())
}

pub(super) fn validate_interaction_config(
    config: InteractionConfig,
) -> ChartResult<InteractionConfig> {
    if config.fade_out_ms > config.dismiss_delay_ms {
        return Err(ChartError::InvalidConfig(
            "interaction fade_out_ms must be <= dismiss_delay_ms".to_owned(),
        ));
    }
    Ok(config)
}

pub(super) fn validate_chart_style(style: &ChartStyle) -> ChartResult<()> {
    for (name, value) in [
        ("line_width", style.line_width),
        ("label_font_size_px", style.label_font_size_px),
        ("marker_size", style.marker_size),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "style {name} must be finite and > 0"
            )));
        }
    }
    for (name, value) in [
        ("area_fill_alpha", style.area_fill_alpha),
        ("shadow_fill_alpha", style.shadow_fill_alpha),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ChartError::InvalidConfig(format!(
                "style {name} must be finite and in [0, 1]"
            )));
        }
    }
    if style.value_precision > MAX_VALUE_PRECISION {
        return Err(ChartError::InvalidConfig(format!(
            "style value_precision must be <= {MAX_VALUE_PRECISION}"
        )));
    }
    validate_date_format(&style.date_format)?;
    parse_color("text_color", &style.text_color)?;
    parse_color("grid_color", &style.grid_color)?;
    parse_color("tooltip_background", &style.tooltip_background)?;
    Ok(())
}

pub(super) fn parse_color(name: &str, hex: &str) -> ChartResult<Color> {
    Color::from_hex(hex).map_err(|err| ChartError::InvalidConfig(format!("{name}: {err}")))
}

fn validate_date_format(pattern: &str) -> ChartResult<()> {
    if pattern.trim().is_empty() {
        return Err(ChartError::InvalidConfig(
            "style date_format must not be empty".to_owned(),
        ));
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidConfig(format!(
            "style date_format `{pattern}` is not a valid strftime pattern"
        )));
    }
    // Specifiers like `%H` or `%z` parse fine but fail on a date-only value.
    format_date_label(NaiveDate::default(), pattern)
        .map(|_| ())
        .map_err(|_| {
            ChartError::InvalidConfig(format!(
                "style date_format `{pattern}` needs time or timezone fields"
            ))
        })
}
