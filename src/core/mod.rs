pub mod cache;
pub mod geometry;
pub mod nearest;
pub mod path;
pub mod primitives;
pub mod scale;
pub mod types;

pub use cache::{GeometryCache, GeometryCacheStats};
pub use geometry::{ChartPoint, Geometry, GeometryOptions, build_geometry};
pub use nearest::{nearest_in_sorted, nearest_point};
pub use path::{PathCommand, PathData, PathPoint};
pub use scale::ValueRange;
pub use types::{ChartType, CurveStyle, EdgeInsets, Sample, Series, SeriesId, ViewportSpec};
