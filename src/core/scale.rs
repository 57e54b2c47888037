use serde::{Deserialize, Serialize};

/// Min/max of all values in a series.
///
/// A constant series reports a span of `1` so vertical projection never
/// divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Scans `values` once. Returns `None` for an empty iterator.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        });
        Some(Self { min, max })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 { 1.0 } else { span }
    }

    /// Maps `value` to a Y pixel: `max` lands on `top`, larger values plot higher.
    #[must_use]
    pub fn value_to_pixel(self, value: f64, top: f64, plot_height: f64) -> f64 {
        top + ((self.max - value) / self.span()) * plot_height
    }

    /// Inverse of `value_to_pixel`.
    #[must_use]
    pub fn pixel_to_value(self, pixel: f64, top: f64, plot_height: f64) -> f64 {
        self.max - ((pixel - top) / plot_height) * self.span()
    }
}
