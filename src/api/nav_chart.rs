use std::time::Duration;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::{
    ChartPoint, ChartType, CurveStyle, Geometry, GeometryCache, GeometryCacheStats, Sample,
    Series, ViewportSpec,
};
use crate::error::ChartResult;
use crate::interaction::{
    ControllerPhase, GestureEvent, InteractionConfig, InteractionController, SelectionChange,
    SelectionState,
};
#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::{FrameStyle, build_render_frame};
use super::validation::{parse_color, validate_interaction_config, validate_surface_size};
use super::{ChartSnapshot, NavChartConfig};

/// Host hook invoked whenever a gesture selects a different data point.
pub trait SelectionListener {
    fn on_data_point_select(&mut self, sample: &Sample, index: usize);
}

impl<F> SelectionListener for F
where
    F: FnMut(&Sample, usize),
{
    fn on_data_point_select(&mut self, sample: &Sample, index: usize) {
        self(sample, index);
    }
}

/// Historical NAV chart component.
///
/// `NavChart` owns the data series, the memoized geometry, the gesture
/// controller and the renderer. Hosts push data and gestures in and call
/// `render` whenever they want a fresh frame.
pub struct NavChart<R: Renderer> {
    renderer: R,
    config: NavChartConfig,
    style: FrameStyle,
    series: Series,
    cache: GeometryCache,
    controller: InteractionController,
    listener: Option<Box<dyn SelectionListener>>,
    metadata: IndexMap<String, String>,
}

impl<R: Renderer> NavChart<R> {
    pub fn new(renderer: R, config: NavChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let style = FrameStyle::from_config(&config)?;
        debug!(
            width = config.width,
            chart_height = config.chart_height,
            chart_type = ?config.chart_type,
            "nav chart created"
        );
        Ok(Self {
            renderer,
            controller: InteractionController::new(config.interaction),
            config,
            style,
            series: Series::empty(),
            cache: GeometryCache::new(),
            listener: None,
            metadata: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &NavChartConfig {
        &self.config
    }

    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportSpec {
        self.config.viewport()
    }

    /// Replaces the series. Any in-flight selection is dropped because its
    /// index refers to the previous data.
    pub fn set_data(&mut self, series: Series) {
        debug!(
            series_id = series.id().get(),
            samples = series.len(),
            "set chart data"
        );
        self.series = series;
        self.controller.reset();
    }

    pub fn set_width(&mut self, width: f64) -> ChartResult<()> {
        validate_surface_size(width, self.config.chart_height)?;
        self.config.width = width;
        Ok(())
    }

    pub fn set_chart_height(&mut self, chart_height: f64) -> ChartResult<()> {
        validate_surface_size(self.config.width, chart_height)?;
        self.config.chart_height = chart_height;
        Ok(())
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.config.chart_type = chart_type;
    }

    pub fn set_curve_style(&mut self, curve_style: CurveStyle) {
        self.config.curve_style = curve_style;
    }

    pub fn set_shadow(&mut self, shadow: bool) {
        self.config.shadow = shadow;
    }

    pub fn set_primary_color(&mut self, primary_color: &str) -> ChartResult<()> {
        self.style.primary = parse_color("primary_color", primary_color)?;
        self.config.primary_color = primary_color.to_owned();
        Ok(())
    }

    pub fn set_interaction_config(&mut self, config: InteractionConfig) -> ChartResult<()> {
        validate_interaction_config(config)?;
        self.config.interaction = config;
        self.controller.set_config(config);
        Ok(())
    }

    pub fn set_selection_listener(&mut self, listener: impl SelectionListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_selection_listener(&mut self) {
        self.listener = None;
    }

    /// Current geometry, rebuilt only when data, size or chart options changed.
    pub fn geometry(&mut self) -> Option<&Geometry> {
        let viewport = self.config.viewport();
        let options = self.config.geometry_options();
        self.cache.get_or_build(&self.series, viewport, options)
    }

    #[must_use]
    pub fn geometry_cache_stats(&self) -> GeometryCacheStats {
        self.cache.stats()
    }

    /// Point nearest to a horizontal pixel coordinate, if there is any data.
    pub fn nearest_at(&mut self, pixel_x: f64) -> Option<ChartPoint> {
        self.geometry().map(|geometry| *geometry.nearest(pixel_x))
    }

    /// Feeds one gesture event and notifies the listener on a new selection.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<SelectionChange> {
        let viewport = self.config.viewport();
        let options = self.config.geometry_options();
        let geometry = self.cache.get_or_build(&self.series, viewport, options);
        let change = self.controller.handle_gesture(event, geometry);
        notify_listener(&mut self.listener, change)
    }

    /// Advances throttle and tooltip timers to `now`.
    pub fn advance(&mut self, now: Duration) -> Option<SelectionChange> {
        let viewport = self.config.viewport();
        let options = self.config.geometry_options();
        let geometry = self.cache.get_or_build(&self.series, viewport, options);
        let change = self.controller.advance(now, geometry);
        notify_listener(&mut self.listener, change)
    }

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.controller.selection()
    }

    #[must_use]
    pub fn interaction_phase(&self) -> ControllerPhase {
        self.controller.phase()
    }

    pub fn selected_point(&mut self) -> Option<ChartPoint> {
        let index = self.controller.selection().selected_index?;
        self.geometry()
            .and_then(|geometry| geometry.point(index).copied())
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn metadata(&self) -> &IndexMap<String, String> {
        &self.metadata
    }

    /// Builds the frame for the current state without drawing it.
    pub fn render_frame(&mut self) -> ChartResult<RenderFrame> {
        let viewport = self.config.viewport();
        let options = self.config.geometry_options();
        let selection = self.controller.selection();
        let geometry = self.cache.get_or_build(&self.series, viewport, options);
        build_render_frame(viewport, geometry, selection, &self.style)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.render_frame()?;
        self.renderer.render(&frame)
    }

    /// Draws the current frame into a host-owned Cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    pub fn snapshot(&mut self) -> ChartSnapshot {
        let viewport = self.config.viewport();
        let options = self.config.geometry_options();
        let geometry = self.cache.get_or_build(&self.series, viewport, options);
        let value_range = geometry.map(Geometry::value_range);
        let path = geometry.map(|geometry| geometry.path().to_string());
        let area_path = geometry
            .and_then(Geometry::area_path)
            .map(ToString::to_string);
        let points = geometry
            .map(|geometry| geometry.points().iter().map(ChartPoint::position).collect())
            .unwrap_or_default();

        ChartSnapshot {
            viewport,
            options,
            series_len: self.series.len(),
            value_range,
            path,
            area_path,
            points,
            selection: self.controller.selection(),
            interaction_phase: self.controller.phase(),
            geometry_cache: self.cache.stats(),
            metadata: self.metadata.clone(),
        }
    }

    pub fn snapshot_json_pretty(&mut self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

fn notify_listener(
    listener: &mut Option<Box<dyn SelectionListener>>,
    change: Option<SelectionChange>,
) -> Option<SelectionChange> {
    if let (Some(listener), Some(change)) = (listener.as_mut(), change.as_ref()) {
        listener.on_data_point_select(&change.sample, change.index);
    }
    change
}
