use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDate;
use nav_chart::core::{ChartType, CurveStyle, EdgeInsets, GeometryCacheStats, Series};
use nav_chart::interaction::{ControllerPhase, GestureEvent, InteractionConfig};
use nav_chart::render::NullRenderer;
use nav_chart::{ChartError, NavChart, NavChartConfig};
use rust_decimal::Decimal;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn nav_series(values: &[i64]) -> Series {
    Series::from_pairs(values.iter().enumerate().map(|(idx, &value)| {
        (
            NaiveDate::from_ymd_opt(2021, 1, 4).expect("date") + chrono::Days::new(idx as u64),
            Decimal::new(value, 2),
        )
    }))
    .expect("series")
}

/// Plot spans x = 10..=410, so five samples land 100px apart.
fn chart() -> NavChart<NullRenderer> {
    let config = NavChartConfig::new(420.0, 220.0).with_padding(EdgeInsets::uniform(10.0));
    NavChart::new(NullRenderer::default(), config).expect("chart init")
}

#[test]
fn listener_fires_once_per_new_selection() {
    let mut chart = chart();
    chart.set_data(nav_series(&[1000, 1012, 1008, 1030, 1025]));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    chart.set_selection_listener(move |sample: &nav_chart::core::Sample, index: usize| {
        sink.borrow_mut().push((index, sample.value()));
    });

    chart.handle_gesture(GestureEvent::began(12.0, 40.0, ms(0)));
    chart.handle_gesture(GestureEvent::changed(14.0, 40.0, ms(20)));
    chart.handle_gesture(GestureEvent::changed(305.0, 40.0, ms(40)));
    chart.handle_gesture(GestureEvent::changed(312.0, 40.0, ms(60)));
    chart.handle_gesture(GestureEvent::ended(312.0, 40.0, ms(80)));
    chart.advance(ms(1_000));

    assert_eq!(
        *seen.borrow(),
        vec![(0, Decimal::new(1000, 2)), (3, Decimal::new(1030, 2))]
    );
    assert_eq!(chart.selection().selected_index, None);
    assert_eq!(chart.interaction_phase(), ControllerPhase::Idle);
}

#[test]
fn gestures_on_empty_chart_are_ignored() {
    let mut chart = chart();
    let calls = Rc::new(RefCell::new(0_usize));
    let sink = Rc::clone(&calls);
    chart.set_selection_listener(move |_: &nav_chart::core::Sample, _: usize| {
        *sink.borrow_mut() += 1;
    });

    assert!(chart.handle_gesture(GestureEvent::began(50.0, 50.0, ms(0))).is_none());
    assert!(chart.nearest_at(50.0).is_none());
    assert_eq!(*calls.borrow(), 0);
    assert_eq!(chart.interaction_phase(), ControllerPhase::Idle);
}

#[test]
fn cleared_listener_is_not_called() {
    let mut chart = chart();
    chart.set_data(nav_series(&[100, 200]));
    let calls = Rc::new(RefCell::new(0_usize));
    let sink = Rc::clone(&calls);
    chart.set_selection_listener(move |_: &nav_chart::core::Sample, _: usize| {
        *sink.borrow_mut() += 1;
    });
    chart.clear_selection_listener();

    let change = chart.handle_gesture(GestureEvent::began(10.0, 50.0, ms(0)));
    assert_eq!(change.map(|change| change.index), Some(0));
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn geometry_is_memoized_until_inputs_change() {
    let mut chart = chart();
    chart.set_data(nav_series(&[100, 120, 90]));

    assert!(chart.geometry().is_some());
    assert!(chart.geometry().is_some());
    chart.render().expect("render");
    assert_eq!(
        chart.geometry_cache_stats(),
        GeometryCacheStats { hits: 2, misses: 1 }
    );

    chart.set_chart_type(ChartType::Area);
    assert!(chart.geometry().and_then(|geometry| geometry.area_path()).is_some());
    assert_eq!(chart.geometry_cache_stats().misses, 2);

    chart.set_width(300.0).expect("resize");
    assert_eq!(chart.geometry().map(|geometry| geometry.last().x), Some(290.0));
    assert_eq!(chart.geometry_cache_stats().misses, 3);

    let same_samples = Series::new(chart.series().samples().to_vec());
    chart.set_data(same_samples);
    chart.geometry();
    assert_eq!(chart.geometry_cache_stats().misses, 4);
}

#[test]
fn set_data_drops_active_selection() {
    let mut chart = chart();
    chart.set_data(nav_series(&[100, 120, 90]));
    chart.handle_gesture(GestureEvent::began(410.0, 50.0, ms(0)));
    assert_eq!(chart.selection().selected_index, Some(2));

    chart.set_data(nav_series(&[100]));
    assert_eq!(chart.selection().selected_index, None);
    assert_eq!(chart.interaction_phase(), ControllerPhase::Idle);
    assert!(chart.selected_point().is_none());
}

#[test]
fn selected_point_tracks_gesture() {
    let mut chart = chart();
    chart.set_data(nav_series(&[100, 120, 90, 95, 101]));
    chart.handle_gesture(GestureEvent::began(205.0, 50.0, ms(0)));

    let point = chart.selected_point().expect("selected point");
    assert_eq!(point.index, 2);
    assert_eq!(point.x, 210.0);
    assert_eq!(point.sample.value(), Decimal::new(90, 2));
}

#[test]
fn invalid_setters_keep_previous_state() {
    let mut chart = chart();

    assert!(matches!(
        chart.set_width(0.0),
        Err(ChartError::InvalidViewport { .. })
    ));
    assert!(matches!(
        chart.set_chart_height(f64::NAN),
        Err(ChartError::InvalidViewport { .. })
    ));
    assert!(matches!(
        chart.set_primary_color("blue"),
        Err(ChartError::InvalidConfig(_))
    ));
    let bad_timing = InteractionConfig {
        fade_out_ms: 900,
        ..InteractionConfig::default()
    };
    assert!(matches!(
        chart.set_interaction_config(bad_timing),
        Err(ChartError::InvalidConfig(_))
    ));

    assert_eq!(chart.config().width, 420.0);
    assert_eq!(chart.config().chart_height, 220.0);
    assert_eq!(chart.config().primary_color, "#1E88E5");
    assert_eq!(chart.config().interaction, InteractionConfig::default());

    chart.set_primary_color("#00897B").expect("valid color");
    assert_eq!(chart.config().primary_color, "#00897B");
}

#[test]
fn render_pushes_frame_to_renderer() {
    let mut chart = chart();
    chart.render().expect("empty render");
    assert_eq!(chart.renderer().last_text_count, 1);
    assert_eq!(chart.renderer().last_path_count, 0);

    chart.set_data(nav_series(&[100, 120, 90, 95, 101]));
    chart.render().expect("render");
    let renderer = chart.renderer();
    assert_eq!(renderer.frames_rendered, 2);
    assert_eq!(renderer.last_path_count, 1);
    assert_eq!(renderer.last_line_count, 5);
    assert_eq!(renderer.last_text_count, 5 + 3);
    assert_eq!(renderer.last_rect_count, 0);
}

#[test]
fn snapshot_reflects_chart_state() {
    let mut chart = chart();
    chart.set_curve_style(CurveStyle::QuadraticMidpoint);
    chart.set_shadow(true);
    chart.set_data(nav_series(&[100, 300, 200]));
    chart.set_metadata("scheme", "Balanced Advantage Fund");
    chart.set_metadata("plan", "direct");
    chart.handle_gesture(GestureEvent::began(210.0, 50.0, ms(0)));

    let snapshot = chart.snapshot();
    assert_eq!(snapshot.series_len, 3);
    assert_eq!(snapshot.points.len(), 3);
    assert_eq!(snapshot.selection.selected_index, Some(1));
    assert_eq!(snapshot.interaction_phase, ControllerPhase::Tracking);
    assert!(snapshot.options.shadow);
    assert!(snapshot.path.as_deref().is_some_and(|path| path.contains('Q')));
    assert!(snapshot.area_path.as_deref().is_some_and(|path| path.ends_with('Z')));
    assert_eq!(
        snapshot.metadata.keys().collect::<Vec<_>>(),
        vec!["scheme", "plan"]
    );

    let json = chart.snapshot_json_pretty().expect("snapshot json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["series_len"], 3);
    assert_eq!(value["options"]["curve_style"], "quadratic_midpoint");
    assert_eq!(value["metadata"]["plan"], "direct");
}

#[test]
fn into_renderer_returns_backend() {
    let mut chart = chart();
    chart.set_data(nav_series(&[100, 101]));
    chart.render().expect("render");
    let renderer = chart.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert!(renderer.last_frame.is_some());
}
