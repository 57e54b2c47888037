use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{GeometryCacheStats, GeometryOptions, PathPoint, ValueRange, ViewportSpec};
use crate::interaction::{ControllerPhase, SelectionState};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: ViewportSpec,
    pub options: GeometryOptions,
    pub series_len: usize,
    pub value_range: Option<ValueRange>,
    /// Line path in SVG syntax.
    pub path: Option<String>,
    pub area_path: Option<String>,
    pub points: Vec<PathPoint>,
    pub selection: SelectionState,
    pub interaction_phase: ControllerPhase,
    pub geometry_cache: GeometryCacheStats,
    pub metadata: IndexMap<String, String>,
}
