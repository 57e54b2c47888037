use crate::core::{ChartPoint, ChartType, Geometry, ViewportSpec, primitives::f64_to_decimal};
use crate::error::ChartResult;
use crate::interaction::SelectionState;
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, PathPrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::NavChartConfig;
use super::label_format::{estimate_label_width, format_date_label, format_value_label};
use super::validation::parse_color;

const EMPTY_PLACEHOLDER: &str = "No data";
const GUIDE_LINE_WIDTH: f64 = 1.0;
const GRID_LINE_WIDTH: f64 = 1.0;
const AXIS_LABEL_GAP_PX: f64 = 4.0;
const TOOLTIP_PADDING_PX: f64 = 6.0;
const TOOLTIP_OFFSET_PX: f64 = 10.0;
const TOOLTIP_CORNER_RADIUS_PX: f64 = 4.0;

/// Colors and sizes resolved once from `NavChartConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStyle {
    pub primary: Color,
    pub text: Color,
    pub grid: Color,
    pub tooltip_background: Color,
    pub line_width: f64,
    pub area_fill_alpha: f64,
    pub shadow_fill_alpha: f64,
    pub grid_line_count: usize,
    pub label_font_size_px: f64,
    pub marker_size: f64,
    pub value_precision: u32,
    pub value_prefix: String,
    pub date_format: String,
}

impl FrameStyle {
    pub fn from_config(config: &NavChartConfig) -> ChartResult<Self> {
        let style = &config.style;
        Ok(Self {
            primary: parse_color("primary_color", &config.primary_color)?,
            text: parse_color("text_color", &style.text_color)?,
            grid: parse_color("grid_color", &style.grid_color)?,
            tooltip_background: parse_color("tooltip_background", &style.tooltip_background)?,
            line_width: style.line_width,
            area_fill_alpha: style.area_fill_alpha,
            shadow_fill_alpha: style.shadow_fill_alpha,
            grid_line_count: style.grid_line_count,
            label_font_size_px: style.label_font_size_px,
            marker_size: style.marker_size,
            value_precision: style.value_precision,
            value_prefix: style.value_prefix.clone(),
            date_format: style.date_format.clone(),
        })
    }
}

/// Materializes grid, axes, series paths, selection marker and tooltip.
///
/// Without geometry the frame carries a single centered placeholder label.
pub fn build_render_frame(
    viewport: ViewportSpec,
    geometry: Option<&Geometry>,
    selection: SelectionState,
    style: &FrameStyle,
) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(viewport);
    let Some(geometry) = geometry else {
        frame.texts.push(TextPrimitive::new(
            EMPTY_PLACEHOLDER,
            viewport.width / 2.0,
            viewport.height / 2.0 - style.label_font_size_px / 2.0,
            style.label_font_size_px,
            style.text,
            TextHAlign::Center,
        ));
        return Ok(frame);
    };

    push_value_grid(&mut frame, geometry, style)?;
    push_date_labels(&mut frame, geometry, style)?;
    push_series_paths(&mut frame, geometry, style);

    let selected = selection
        .selected_index
        .and_then(|index| geometry.point(index));
    if let (Some(point), true) = (selected, selection.tooltip_visible) {
        push_selection_marker(&mut frame, geometry, point, style);
        if selection.tooltip_opacity > 0.0 {
            push_tooltip(&mut frame, point, selection.tooltip_opacity, style)?;
        }
    }

    Ok(frame)
}

fn push_value_grid(
    frame: &mut RenderFrame,
    geometry: &Geometry,
    style: &FrameStyle,
) -> ChartResult<()> {
    if style.grid_line_count == 0 {
        return Ok(());
    }
    let viewport = geometry.viewport();
    let top = viewport.padding.top;
    let plot_height = viewport.plot_height();
    let left = viewport.padding.left;
    let right = viewport.width - viewport.padding.right;
    let range = geometry.value_range();

    for step in 0..=style.grid_line_count {
        let y = top + plot_height * (step as f64 / style.grid_line_count as f64);
        frame.lines.push(
            LinePrimitive::new(left, y, right, y, GRID_LINE_WIDTH, style.grid)
                .with_stroke_style(LineStrokeStyle::Dashed),
        );

        // A constant series spans one unit below its value; NAV never goes negative.
        let raw = range.pixel_to_value(y, top, plot_height);
        let value = f64_to_decimal(if raw > 0.0 { raw } else { 0.0 }, "grid value")?;
        frame.texts.push(TextPrimitive::new(
            format_value_label(value, style.value_precision, &style.value_prefix),
            right + AXIS_LABEL_GAP_PX,
            y - style.label_font_size_px / 2.0,
            style.label_font_size_px,
            style.text,
            TextHAlign::Left,
        ));
    }
    Ok(())
}

fn push_date_labels(
    frame: &mut RenderFrame,
    geometry: &Geometry,
    style: &FrameStyle,
) -> ChartResult<()> {
    let label_y = geometry.baseline_y() + AXIS_LABEL_GAP_PX;
    let mut anchors = vec![(geometry.first(), TextHAlign::Left)];
    if geometry.len() > 2 {
        anchors.push((&geometry.points()[geometry.len() / 2], TextHAlign::Center));
    }
    if geometry.len() > 1 {
        anchors.push((geometry.last(), TextHAlign::Right));
    }

    for (point, h_align) in anchors {
        frame.texts.push(TextPrimitive::new(
            format_date_label(point.sample.date(), &style.date_format)?,
            point.x,
            label_y,
            style.label_font_size_px,
            style.text,
            h_align,
        ));
    }
    Ok(())
}

fn push_series_paths(frame: &mut RenderFrame, geometry: &Geometry, style: &FrameStyle) {
    if let Some(area) = geometry.area_path() {
        let alpha = match geometry.options().chart_type {
            ChartType::Area => style.area_fill_alpha,
            ChartType::Line => style.shadow_fill_alpha,
        };
        frame.paths.push(PathPrimitive::filled(
            area.clone(),
            style.primary.with_alpha_factor(alpha),
        ));
    }
    frame.paths.push(PathPrimitive::stroked(
        geometry.path().clone(),
        style.line_width,
        style.primary,
    ));
}

fn push_selection_marker(
    frame: &mut RenderFrame,
    geometry: &Geometry,
    point: &ChartPoint,
    style: &FrameStyle,
) {
    let viewport = geometry.viewport();
    frame.lines.push(
        LinePrimitive::new(
            point.x,
            viewport.padding.top,
            point.x,
            geometry.baseline_y(),
            GUIDE_LINE_WIDTH,
            style.text.with_alpha_factor(0.6),
        )
        .with_stroke_style(LineStrokeStyle::Dashed),
    );

    let half = style.marker_size / 2.0;
    frame.rects.push(
        RectPrimitive::new(
            point.x - half,
            point.y - half,
            style.marker_size,
            style.marker_size,
            style.primary,
        )
        .with_border(1.5, style.tooltip_background)
        .with_corner_radius(half),
    );
}

fn push_tooltip(
    frame: &mut RenderFrame,
    point: &ChartPoint,
    opacity: f64,
    style: &FrameStyle,
) -> ChartResult<()> {
    let viewport = frame.viewport;
    let font = style.label_font_size_px;
    let date_text = format_date_label(point.sample.date(), &style.date_format)?;
    let value_text = format_value_label(
        point.sample.value(),
        style.value_precision,
        &style.value_prefix,
    );

    let text_width = estimate_label_width(&date_text, font).max(estimate_label_width(&value_text, font));
    let width = (text_width + 2.0 * TOOLTIP_PADDING_PX).min(viewport.width);
    let height = (2.0 * font + 3.0 * TOOLTIP_PADDING_PX).min(viewport.height);

    let x = (point.x - width / 2.0).clamp(0.0, viewport.width - width);
    let above = point.y - TOOLTIP_OFFSET_PX - height;
    let y = if above >= 0.0 {
        above
    } else {
        point.y + TOOLTIP_OFFSET_PX
    }
    .clamp(0.0, viewport.height - height);

    frame.rects.push(
        RectPrimitive::new(
            x,
            y,
            width,
            height,
            style.tooltip_background.with_alpha_factor(opacity),
        )
        .with_border(1.0, style.grid.with_alpha_factor(opacity))
        .with_corner_radius(TOOLTIP_CORNER_RADIUS_PX),
    );

    let text_color = style.text.with_alpha_factor(opacity);
    let center_x = x + width / 2.0;
    frame.texts.push(TextPrimitive::new(
        date_text,
        center_x,
        y + TOOLTIP_PADDING_PX,
        font,
        text_color,
        TextHAlign::Center,
    ));
    frame.texts.push(TextPrimitive::new(
        value_text,
        center_x,
        y + 2.0 * TOOLTIP_PADDING_PX + font,
        font,
        style.primary.with_alpha_factor(opacity),
        TextHAlign::Center,
    ));
    Ok(())
}
