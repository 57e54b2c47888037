use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::nearest::nearest_point;
use crate::core::path::{PathData, PathPoint};
use crate::core::scale::ValueRange;
use crate::core::types::{ChartType, CurveStyle, Sample, Series, ViewportSpec};
use crate::error::{ChartError, ChartResult};

/// One sample projected into pixel space.
///
/// `index` is the ordinal of the sample in the date-sorted series and matches
/// the point's position in `Geometry::points`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub sample: Sample,
    pub index: usize,
}

impl ChartPoint {
    #[must_use]
    pub fn position(&self) -> PathPoint {
        PathPoint::new(self.x, self.y)
    }
}

/// Inputs besides series and viewport that shape the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GeometryOptions {
    pub chart_type: ChartType,
    pub curve_style: CurveStyle,
    /// Builds the closed underlay path even for line charts.
    pub shadow: bool,
}

impl GeometryOptions {
    #[must_use]
    pub const fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            curve_style: CurveStyle::Straight,
            shadow: false,
        }
    }

    #[must_use]
    pub const fn with_curve_style(mut self, curve_style: CurveStyle) -> Self {
        self.curve_style = curve_style;
        self
    }

    #[must_use]
    pub const fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    #[must_use]
    pub fn wants_area_path(self) -> bool {
        self.chart_type == ChartType::Area || self.shadow
    }
}

/// Pixel-space artifacts derived from `(Series, ViewportSpec, GeometryOptions)`.
///
/// A `Geometry` always holds at least one point and its points are sorted by
/// non-decreasing `x`. Deserialization enforces the same invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeometryRecord")]
pub struct Geometry {
    points: Vec<ChartPoint>,
    path: PathData,
    area_path: Option<PathData>,
    value_range: ValueRange,
    viewport: ViewportSpec,
    options: GeometryOptions,
}

#[derive(Deserialize)]
struct GeometryRecord {
    points: Vec<ChartPoint>,
    path: PathData,
    area_path: Option<PathData>,
    value_range: ValueRange,
    viewport: ViewportSpec,
    options: GeometryOptions,
}

impl TryFrom<GeometryRecord> for Geometry {
    type Error = ChartError;

    fn try_from(record: GeometryRecord) -> ChartResult<Self> {
        if record.points.is_empty() {
            return Err(ChartError::InvalidData(
                "geometry must contain at least one point".to_owned(),
            ));
        }
        let unordered = record.points.iter().any(|point| !point.x.is_finite())
            || record.points.windows(2).any(|pair| pair[0].x > pair[1].x);
        if unordered {
            return Err(ChartError::InvalidData(
                "geometry points must have finite x sorted ascending".to_owned(),
            ));
        }
        Ok(Self {
            points: record.points,
            path: record.path,
            area_path: record.area_path,
            value_range: record.value_range,
            viewport: record.viewport,
            options: record.options,
        })
    }
}

impl Geometry {
    #[must_use]
    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    /// Line path connecting `points` in order.
    #[must_use]
    pub fn path(&self) -> &PathData {
        &self.path
    }

    /// Line path closed down to the baseline; present for area charts or
    /// when a shadow underlay was requested.
    #[must_use]
    pub fn area_path(&self) -> Option<&PathData> {
        self.area_path.as_ref()
    }

    #[must_use]
    pub fn value_range(&self) -> ValueRange {
        self.value_range
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportSpec {
        self.viewport
    }

    #[must_use]
    pub fn options(&self) -> GeometryOptions {
        self.options
    }

    #[must_use]
    pub fn baseline_y(&self) -> f64 {
        self.viewport.baseline_y()
    }

    #[must_use]
    pub fn first(&self) -> &ChartPoint {
        &self.points[0]
    }

    #[must_use]
    pub fn last(&self) -> &ChartPoint {
        &self.points[self.points.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn point(&self, index: usize) -> Option<&ChartPoint> {
        self.points.get(index)
    }

    /// Point whose `x` is closest to `pixel_x`, see [`nearest_point`].
    #[must_use]
    pub fn nearest(&self, pixel_x: f64) -> &ChartPoint {
        nearest_point(self, pixel_x)
    }
}

/// Projects a series into pixel space.
///
/// Returns `None` when there is nothing to draw: an empty series, an invalid
/// viewport, or paddings that leave no positive plotting rectangle. The
/// function is pure; identical inputs produce bit-identical output.
#[must_use]
pub fn build_geometry(
    series: &Series,
    viewport: ViewportSpec,
    options: GeometryOptions,
) -> Option<Geometry> {
    let samples = series.samples();
    if samples.is_empty() || !viewport.has_plot_area() {
        return None;
    }

    let ordered = sorted_by_date(samples);
    let value_range = ValueRange::from_values(ordered.iter().map(Sample::value_f64))?;

    let plot_width = viewport.plot_width();
    let plot_height = viewport.plot_height();
    let left = viewport.padding.left;
    let top = viewport.padding.top;
    let last_ordinal = ordered.len() - 1;

    let points: Vec<ChartPoint> = ordered
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let x = if last_ordinal == 0 {
                left
            } else {
                left + (index as f64 / last_ordinal as f64) * plot_width
            };
            let y = value_range.value_to_pixel(sample.value_f64(), top, plot_height);
            ChartPoint {
                x,
                y,
                sample: *sample,
                index,
            }
        })
        .collect();

    let path = line_path(&points, options.curve_style);
    let area_path = options
        .wants_area_path()
        .then(|| close_to_baseline(&path, &points, viewport.baseline_y()));

    trace!(
        series_id = series.id().get(),
        points = points.len(),
        chart_type = ?options.chart_type,
        "built chart geometry"
    );

    Some(Geometry {
        points,
        path,
        area_path,
        value_range,
        viewport,
        options,
    })
}

fn sorted_by_date(samples: &[Sample]) -> Vec<Sample> {
    let mut ordered = samples.to_vec();
    // `sort_by_key` is stable: equal dates keep their input order.
    ordered.sort_by_key(Sample::date);

    let duplicate_count = ordered
        .windows(2)
        .filter(|pair| pair[0].date() == pair[1].date())
        .count();
    if duplicate_count > 0 {
        warn!(duplicate_count, "series contains duplicate sample dates");
    }
    ordered
}

fn line_path(points: &[ChartPoint], curve_style: CurveStyle) -> PathData {
    let mut path = PathData::with_capacity(points.len() + 3);
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(first.position());

    match curve_style {
        CurveStyle::Straight => {
            for point in &points[1..] {
                path.line_to(point.position());
            }
        }
        CurveStyle::QuadraticMidpoint => {
            if points.len() < 2 {
                return path;
            }
            let last_pair = points.len() - 2;
            for (idx, pair) in points.windows(2).enumerate() {
                let current = pair[0].position();
                let next = pair[1].position();
                if idx == last_pair {
                    path.line_to(next);
                } else {
                    path.quad_to(current, current.midpoint(next));
                }
            }
        }
    }

    path
}

fn close_to_baseline(line: &PathData, points: &[ChartPoint], baseline_y: f64) -> PathData {
    let mut area = line.clone();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        area.line_to(PathPoint::new(last.x, baseline_y));
        area.line_to(PathPoint::new(first.x, baseline_y));
        area.close();
    }
    area
}
