#![cfg(feature = "cairo-backend")]

use std::time::Duration;

use cairo::{Context, Format, ImageSurface};
use chrono::NaiveDate;
use nav_chart::core::{ChartType, CurveStyle, Series};
use nav_chart::interaction::GestureEvent;
use nav_chart::render::{CairoRenderer, Color};
use nav_chart::{ChartError, NavChart, NavChartConfig};
use rust_decimal::Decimal;

fn sample_series() -> Series {
    Series::from_pairs([
        (NaiveDate::from_ymd_opt(2024, 5, 2).expect("date"), Decimal::new(4512, 2)),
        (NaiveDate::from_ymd_opt(2024, 5, 3).expect("date"), Decimal::new(4580, 2)),
        (NaiveDate::from_ymd_opt(2024, 5, 6).expect("date"), Decimal::new(4533, 2)),
    ])
    .expect("series")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_area_chart() {
    let renderer = CairoRenderer::new(400, 220).expect("renderer");
    let config = NavChartConfig::new(400.0, 220.0)
        .with_chart_type(ChartType::Area)
        .with_curve_style(CurveStyle::QuadraticMidpoint);
    let mut chart = NavChart::new(renderer, config).expect("chart init");
    chart.set_data(sample_series());

    chart.render().expect("render");
    let stats = chart.into_renderer().last_stats();

    assert_eq!(stats.paths_drawn, 2);
    assert_eq!(stats.lines_drawn, 5);
    assert_eq!(stats.texts_drawn, 8);
    assert_eq!(stats.rects_drawn, 0);
}

#[test]
fn cairo_renderer_draws_tooltip_on_external_context() {
    let renderer = CairoRenderer::new(400, 220).expect("renderer");
    let mut chart = NavChart::new(renderer, NavChartConfig::new(400.0, 220.0)).expect("chart init");
    chart.set_data(sample_series());
    chart.handle_gesture(GestureEvent::began(200.0, 80.0, Duration::ZERO));
    chart.advance(Duration::from_millis(200));

    let surface = ImageSurface::create(Format::ARgb32, 400, 220).expect("surface");
    let context = Context::new(&surface).expect("context");
    chart
        .render_on_cairo_context(&context)
        .expect("render on context");

    let stats = chart.into_renderer().last_stats();
    assert_eq!(stats.rects_drawn, 2);
    assert_eq!(stats.lines_drawn, 6);
    assert_eq!(stats.texts_drawn, 10);
}

#[test]
fn cairo_renderer_rejects_invalid_clear_color() {
    let mut renderer = CairoRenderer::new(400, 220).expect("renderer");
    let err = renderer
        .set_clear_color(Color::rgba(1.5, 0.0, 0.0, 1.0))
        .expect_err("out-of-range channel must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(renderer.clear_color(), Color::rgb(1.0, 1.0, 1.0));

    renderer
        .set_clear_color(Color::rgba(0.1, 0.1, 0.1, 1.0))
        .expect("valid clear color");
    let mut chart = NavChart::new(renderer, NavChartConfig::new(400.0, 220.0)).expect("chart init");
    chart.set_data(sample_series());
    chart.render().expect("render with custom clear color");
}
