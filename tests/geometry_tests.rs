use chrono::NaiveDate;
use nav_chart::core::{
    ChartType, CurveStyle, EdgeInsets, Geometry, GeometryOptions, PathCommand, PathPoint, Sample,
    Series, ViewportSpec, build_geometry,
};
use rust_decimal::Decimal;

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, n).expect("valid date")
}

fn series(values: &[i64]) -> Series {
    Series::from_pairs(
        values
            .iter()
            .enumerate()
            .map(|(idx, &value)| (day(idx as u32 + 1), Decimal::from(value))),
    )
    .expect("series")
}

#[test]
fn empty_series_produces_no_geometry() {
    let viewport = ViewportSpec::new(300.0, 200.0).with_padding(EdgeInsets::uniform(10.0));
    let geometry = build_geometry(&Series::empty(), viewport, GeometryOptions::default());
    assert!(geometry.is_none());
}

#[test]
fn non_positive_plot_area_produces_no_geometry() {
    let data = series(&[10, 20]);

    let too_narrow = ViewportSpec::new(20.0, 200.0).with_padding(EdgeInsets::uniform(10.0));
    assert!(build_geometry(&data, too_narrow, GeometryOptions::default()).is_none());

    let too_short = ViewportSpec::new(300.0, 15.0).with_padding(EdgeInsets::new(10.0, 10.0, 0.0, 0.0));
    assert!(build_geometry(&data, too_short, GeometryOptions::default()).is_none());

    let invalid = ViewportSpec::new(f64::NAN, 200.0);
    assert!(build_geometry(&data, invalid, GeometryOptions::default()).is_none());
}

#[test]
fn single_sample_renders_at_top_left_of_plot() {
    let data = Series::from_pairs([(day(1), Decimal::from(100))]).expect("series");
    let viewport = ViewportSpec::new(300.0, 200.0).with_padding(EdgeInsets::uniform(10.0));

    let geometry =
        build_geometry(&data, viewport, GeometryOptions::default()).expect("geometry");
    assert_eq!(geometry.len(), 1);
    assert_eq!(geometry.first().x, 10.0);
    assert_eq!(geometry.first().y, 10.0);
    assert_eq!(geometry.value_range().span(), 1.0);
    assert_eq!(geometry.path().to_string(), "M10,10");
}

#[test]
fn two_sample_line_path_rises_with_value() {
    let data = series(&[10, 20]);
    let viewport = ViewportSpec::new(130.0, 200.0).with_padding(EdgeInsets::uniform(10.0));

    let geometry =
        build_geometry(&data, viewport, GeometryOptions::new(ChartType::Line)).expect("geometry");
    let points = geometry.points();
    assert_eq!(points[0].x, 10.0);
    assert_eq!(points[1].x, 120.0);
    assert!(points[0].y > points[1].y);
    assert_eq!(geometry.path().to_string(), "M10,190 L120,10");
    assert!(geometry.area_path().is_none());
}

#[test]
fn area_path_closes_down_to_baseline() {
    let data = series(&[1, 3, 2]);
    let viewport = ViewportSpec::new(220.0, 200.0).with_padding(EdgeInsets::new(20.0, 20.0, 10.0, 10.0));

    let geometry =
        build_geometry(&data, viewport, GeometryOptions::new(ChartType::Area)).expect("geometry");
    let area = geometry.area_path().expect("area path");
    assert_eq!(geometry.baseline_y(), 180.0);
    assert_eq!(
        area.to_string(),
        "M10,180 L110,20 L210,100 L210,180 L10,180 Z"
    );

    let tail = &area.commands()[area.len() - 3..];
    assert_eq!(tail[0], PathCommand::LineTo(PathPoint::new(210.0, 180.0)));
    assert_eq!(tail[1], PathCommand::LineTo(PathPoint::new(10.0, 180.0)));
    assert_eq!(tail[2], PathCommand::Close);
}

#[test]
fn shadow_builds_underlay_for_line_charts() {
    let data = series(&[1, 3, 2]);
    let viewport = ViewportSpec::new(220.0, 200.0).with_padding(EdgeInsets::new(20.0, 20.0, 10.0, 10.0));
    let options = GeometryOptions::new(ChartType::Line).with_shadow(true);

    let geometry = build_geometry(&data, viewport, options).expect("geometry");
    let shadow = geometry.area_path().expect("shadow path");
    assert!(shadow.is_closed());
    assert_eq!(geometry.path().to_string(), "M10,180 L110,20 L210,100");
}

#[test]
fn quadratic_midpoint_smoothing_ends_with_straight_segment() {
    let data = series(&[1, 3, 2]);
    let viewport = ViewportSpec::new(220.0, 200.0).with_padding(EdgeInsets::new(20.0, 20.0, 10.0, 10.0));
    let options = GeometryOptions::new(ChartType::Line).with_curve_style(CurveStyle::QuadraticMidpoint);

    let geometry = build_geometry(&data, viewport, options).expect("geometry");
    assert_eq!(
        geometry.path().to_string(),
        "M10,180 Q10,180 60,100 L210,100"
    );
}

#[test]
fn quadratic_smoothing_with_two_points_is_a_straight_line() {
    let data = series(&[10, 20]);
    let viewport = ViewportSpec::new(130.0, 200.0).with_padding(EdgeInsets::uniform(10.0));
    let options = GeometryOptions::default().with_curve_style(CurveStyle::QuadraticMidpoint);

    let geometry = build_geometry(&data, viewport, options).expect("geometry");
    assert_eq!(geometry.path().to_string(), "M10,190 L120,10");
}

#[test]
fn constant_series_renders_flat_at_top() {
    let data = series(&[50, 50, 50]);
    let viewport = ViewportSpec::new(220.0, 200.0).with_padding(EdgeInsets::uniform(10.0));

    let geometry =
        build_geometry(&data, viewport, GeometryOptions::default()).expect("geometry");
    assert!(geometry.points().iter().all(|point| point.y == 10.0));
}

#[test]
fn unordered_input_is_sorted_by_date() {
    let data = Series::new(vec![
        Sample::new(day(3), Decimal::from(30)).expect("sample"),
        Sample::new(day(1), Decimal::from(10)).expect("sample"),
        Sample::new(day(2), Decimal::from(20)).expect("sample"),
    ]);
    let viewport = ViewportSpec::new(220.0, 200.0).with_padding(EdgeInsets::uniform(10.0));

    let geometry =
        build_geometry(&data, viewport, GeometryOptions::default()).expect("geometry");
    let dates: Vec<NaiveDate> = geometry
        .points()
        .iter()
        .map(|point| point.sample.date())
        .collect();
    assert_eq!(dates, vec![day(1), day(2), day(3)]);

    let indexes: Vec<usize> = geometry.points().iter().map(|point| point.index).collect();
    assert_eq!(indexes, vec![0, 1, 2]);
}

#[test]
fn duplicate_dates_keep_input_order() {
    let data = Series::new(vec![
        Sample::new(day(2), Decimal::from(5)).expect("sample"),
        Sample::new(day(1), Decimal::from(7)).expect("sample"),
        Sample::new(day(2), Decimal::from(9)).expect("sample"),
    ]);
    let viewport = ViewportSpec::new(220.0, 200.0);

    let geometry =
        build_geometry(&data, viewport, GeometryOptions::default()).expect("geometry");
    let values: Vec<Decimal> = geometry
        .points()
        .iter()
        .map(|point| point.sample.value())
        .collect();
    assert_eq!(
        values,
        vec![Decimal::from(7), Decimal::from(5), Decimal::from(9)]
    );
}

#[test]
fn geometry_is_deterministic() {
    let data = series(&[12, 7, 31, 18, 25, 3]);
    let viewport = ViewportSpec::new(333.0, 177.0).with_padding(EdgeInsets::new(7.0, 13.0, 11.0, 3.0));
    let options = GeometryOptions::new(ChartType::Area).with_curve_style(CurveStyle::QuadraticMidpoint);

    let first = build_geometry(&data, viewport, options).expect("geometry");
    let second = build_geometry(&data, viewport, options).expect("geometry");
    for (a, b) in first.points().iter().zip(second.points()) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }
    assert_eq!(first, second);
}

#[test]
fn serialized_geometry_round_trips() {
    let data = series(&[1, 3, 2]);
    let viewport = ViewportSpec::new(220.0, 200.0).with_padding(EdgeInsets::uniform(10.0));
    let geometry =
        build_geometry(&data, viewport, GeometryOptions::new(ChartType::Area)).expect("geometry");

    let json = serde_json::to_string(&geometry).expect("serialize");
    let restored: Geometry = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, geometry);
    assert_eq!(restored.nearest(5.0).index, 0);
}

#[test]
fn deserializing_geometry_without_points_fails() {
    let data = series(&[10, 20]);
    let viewport = ViewportSpec::new(130.0, 200.0).with_padding(EdgeInsets::uniform(10.0));
    let geometry =
        build_geometry(&data, viewport, GeometryOptions::default()).expect("geometry");

    let mut value = serde_json::to_value(&geometry).expect("serialize");
    value["points"] = serde_json::json!([]);
    assert!(serde_json::from_value::<Geometry>(value).is_err());

    let mut reversed = serde_json::to_value(&geometry).expect("serialize");
    let points = reversed["points"].as_array_mut().expect("points array");
    points.reverse();
    assert!(serde_json::from_value::<Geometry>(reversed).is_err());
}
