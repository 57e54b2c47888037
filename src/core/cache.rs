use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::geometry::{Geometry, GeometryOptions, build_geometry};
use crate::core::types::{Series, SeriesId, ViewportSpec};

/// Runtime metrics exposed by the geometry cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeometryCacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GeometryCacheKey {
    series_id: SeriesId,
    width: OrderedFloat<f64>,
    height: OrderedFloat<f64>,
    top: OrderedFloat<f64>,
    bottom: OrderedFloat<f64>,
    left: OrderedFloat<f64>,
    right: OrderedFloat<f64>,
    options: GeometryOptions,
}

impl GeometryCacheKey {
    fn new(series: &Series, viewport: ViewportSpec, options: GeometryOptions) -> Self {
        Self {
            series_id: series.id(),
            width: OrderedFloat(viewport.width),
            height: OrderedFloat(viewport.height),
            top: OrderedFloat(viewport.padding.top),
            bottom: OrderedFloat(viewport.padding.bottom),
            left: OrderedFloat(viewport.padding.left),
            right: OrderedFloat(viewport.padding.right),
            options,
        }
    }
}

/// Single-entry memoization around [`build_geometry`].
///
/// Geometry is rebuilt only when the series identity, viewport or options
/// change. "No geometry" results are cached as well.
#[derive(Debug, Default)]
pub struct GeometryCache {
    entry: Option<(GeometryCacheKey, Option<Geometry>)>,
    hits: u64,
    misses: u64,
}

impl GeometryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &mut self,
        series: &Series,
        viewport: ViewportSpec,
        options: GeometryOptions,
    ) -> Option<&Geometry> {
        let key = GeometryCacheKey::new(series, viewport, options);
        let is_hit = matches!(&self.entry, Some((cached, _)) if *cached == key);
        if is_hit {
            self.hits = self.hits.saturating_add(1);
            trace!(series_id = series.id().get(), "geometry cache hit");
        } else {
            self.misses = self.misses.saturating_add(1);
            self.entry = Some((key, build_geometry(series, viewport, options)));
        }
        self.cached()
    }

    /// Geometry from the most recent build, without checking freshness.
    #[must_use]
    pub fn cached(&self) -> Option<&Geometry> {
        self.entry.as_ref().and_then(|(_, geometry)| geometry.as_ref())
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    #[must_use]
    pub fn stats(&self) -> GeometryCacheStats {
        GeometryCacheStats {
            hits: self.hits,
            misses: self.misses,
        }
    }
}
