use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// Space reserved around the plotting rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl EdgeInsets {
    #[must_use]
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    #[must_use]
    pub const fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.top, self.bottom, self.left, self.right]
            .into_iter()
            .all(|value| value.is_finite() && value >= 0.0)
    }
}

impl Default for EdgeInsets {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}

/// Host-supplied chart surface: outer size plus paddings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSpec {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub padding: EdgeInsets,
}

impl ViewportSpec {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding: EdgeInsets::uniform(0.0),
        }
    }

    #[must_use]
    pub const fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && self.padding.is_valid()
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.width - self.padding.left - self.padding.right
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        self.height - self.padding.top - self.padding.bottom
    }

    /// Y coordinate the area fill closes against.
    #[must_use]
    pub fn baseline_y(self) -> f64 {
        self.height - self.padding.bottom
    }

    /// Returns `true` when the plotting rectangle has positive extent.
    #[must_use]
    pub fn has_plot_area(self) -> bool {
        self.is_valid() && self.plot_width() > 0.0 && self.plot_height() > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Line,
    Area,
}

/// Segment style used when connecting consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurveStyle {
    #[default]
    Straight,
    /// Quadratic curves through the midpoint of each consecutive pair.
    QuadraticMidpoint,
}

/// One observed NAV value on a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SampleRecord")]
pub struct Sample {
    date: NaiveDate,
    value: Decimal,
    #[serde(skip)]
    value_f64: f64,
}

#[derive(Deserialize)]
struct SampleRecord {
    date: NaiveDate,
    value: Decimal,
}

impl TryFrom<SampleRecord> for Sample {
    type Error = ChartError;

    fn try_from(record: SampleRecord) -> ChartResult<Self> {
        Self::new(record.date, record.value)
    }
}

impl Sample {
    pub fn new(date: NaiveDate, value: Decimal) -> ChartResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ChartError::InvalidData(format!(
                "sample value on {date} must be >= 0"
            )));
        }
        let value_f64 = decimal_to_f64(value, "sample value")?;
        Ok(Self {
            date,
            value,
            value_f64,
        })
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Value projected into `f64` for pixel math.
    #[must_use]
    pub fn value_f64(&self) -> f64 {
        self.value_f64
    }
}

/// Process-unique identity of a `Series` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        static NEXT_SERIES_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_SERIES_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Immutable sample sequence for one chart instance.
///
/// Input order is preserved; ordering by date happens during geometry
/// building. Every constructed series gets a fresh `SeriesId`, so replacing
/// data always invalidates cached geometry even if the samples are equal.
#[derive(Debug, Clone)]
pub struct Series {
    id: SeriesId,
    samples: Arc<[Sample]>,
}

impl Series {
    #[must_use]
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            id: SeriesId::next(),
            samples: samples.into(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Builds a series from raw `(date, value)` pairs, validating every value.
    pub fn from_pairs<I>(pairs: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = (NaiveDate, Decimal)>,
    {
        let samples = pairs
            .into_iter()
            .map(|(date, value)| Sample::new(date, value))
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self::new(samples))
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for Series {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
    }

    #[test]
    fn sample_rejects_negative_values() {
        let err = Sample::new(date(1), Decimal::new(-1, 2)).expect_err("negative must fail");
        assert!(matches!(err, ChartError::InvalidData(_)));
        assert!(Sample::new(date(1), Decimal::ZERO).is_ok());
    }

    #[test]
    fn every_series_gets_a_fresh_identity() {
        let first = Series::from_pairs([(date(1), Decimal::ONE)]).expect("series");
        let second = Series::from_pairs([(date(1), Decimal::ONE)]).expect("series");
        assert_ne!(first.id(), second.id());
        assert_eq!(first.clone().id(), first.id());
    }

    #[test]
    fn viewport_reports_degenerate_plot_area() {
        let viewport = ViewportSpec::new(20.0, 200.0).with_padding(EdgeInsets::uniform(10.0));
        assert!(viewport.is_valid());
        assert!(!viewport.has_plot_area());
    }
}
