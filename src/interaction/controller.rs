use std::time::Duration;

use tracing::{debug, trace};

use crate::core::{ChartPoint, Geometry};

use super::{
    ControllerPhase, GestureEvent, GesturePhase, InteractionConfig, OpacityTransition,
    SelectionChange, SelectionState, TimerSlot,
};

/// Turns a gesture stream into discrete selection updates and tooltip
/// fades.
///
/// The controller is single-threaded and clock-free: every gesture carries a
/// timestamp and `advance` moves time forward, so hosts can drive it from any
/// event loop and tests can replay exact timelines. The only deferred work is
/// the dismissal timer, which a new `Began` always cancels.
#[derive(Debug)]
pub struct InteractionController {
    config: InteractionConfig,
    phase: ControllerPhase,
    selection: SelectionState,
    fade: Option<OpacityTransition>,
    dismiss_timer: TimerSlot,
    last_applied_at: Option<Duration>,
    pending_x: Option<f64>,
    now: Duration,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl InteractionController {
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            phase: ControllerPhase::Idle,
            selection: SelectionState::default(),
            fade: None,
            dismiss_timer: TimerSlot::default(),
            last_applied_at: None,
            pending_x: None,
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn config(&self) -> InteractionConfig {
        self.config
    }

    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Returns `true` while a dismissal is scheduled but has not started fading.
    #[must_use]
    pub fn has_pending_dismissal(&self) -> bool {
        self.dismiss_timer.pending().is_some()
    }

    /// Feeds one gesture event.
    ///
    /// Returns a change only when the selected index moved to a different
    /// point. Without geometry there is nothing to select and the event is
    /// ignored.
    pub fn handle_gesture(
        &mut self,
        event: GestureEvent,
        geometry: Option<&Geometry>,
    ) -> Option<SelectionChange> {
        let Some(geometry) = geometry else {
            trace!(phase = ?event.phase, "gesture ignored without geometry");
            return None;
        };
        self.now = self.now.max(event.at);

        match event.phase {
            GesturePhase::Began => self.on_began(event, geometry),
            GesturePhase::Changed => self.on_changed(event, geometry),
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed => {
                self.on_released(event);
                None
            }
        }
    }

    /// Moves the controller clock to `now`.
    ///
    /// Applies a throttled position once its frame window has elapsed, fires
    /// the dismissal timer, and steps tooltip opacity. Clearing the
    /// selection happens here when the fade-out completes.
    pub fn advance(&mut self, now: Duration, geometry: Option<&Geometry>) -> Option<SelectionChange> {
        self.now = self.now.max(now);
        let now = self.now;

        let mut change = None;
        if self.phase == ControllerPhase::Tracking && self.throttle_window_elapsed(now) {
            if let (Some(x), Some(geometry)) = (self.pending_x.take(), geometry) {
                self.last_applied_at = Some(now);
                change = self.select(geometry.nearest(x));
            }
        }

        if let Some(handle) = self.dismiss_timer.fire_due(now) {
            let started_at = handle.due_at();
            let from = self.opacity_at(started_at);
            debug!(?started_at, "tooltip fade-out started");
            self.fade = Some(OpacityTransition::new(
                from,
                0.0,
                started_at,
                self.config.fade_out(),
            ));
        }

        self.step_fade(now);
        change
    }

    /// Drops selection, timers and fades, e.g. after the data changed.
    pub fn reset(&mut self) {
        self.dismiss_timer.cancel();
        self.phase = ControllerPhase::Idle;
        self.selection = SelectionState::default();
        self.fade = None;
        self.last_applied_at = None;
        self.pending_x = None;
    }

    fn on_began(&mut self, event: GestureEvent, geometry: &Geometry) -> Option<SelectionChange> {
        if self.dismiss_timer.cancel() {
            debug!("pending tooltip dismissal cancelled by new gesture");
        }
        let from = self.opacity_at(event.at);
        self.fade = Some(OpacityTransition::new(
            from,
            1.0,
            event.at,
            self.config.fade_in(),
        ));
        self.phase = ControllerPhase::Tracking;
        self.last_applied_at = Some(event.at);
        self.pending_x = None;
        self.selection.tooltip_visible = true;

        let change = self.select(geometry.nearest(event.x));
        self.step_fade(event.at);
        change
    }

    fn on_changed(&mut self, event: GestureEvent, geometry: &Geometry) -> Option<SelectionChange> {
        if self.phase != ControllerPhase::Tracking {
            trace!(phase = ?self.phase, "changed event outside an active gesture");
            return None;
        }
        if !self.throttle_window_elapsed(event.at) {
            trace!(x = event.x, "gesture update throttled");
            self.pending_x = Some(event.x);
            return None;
        }

        self.last_applied_at = Some(event.at);
        self.pending_x = None;
        let change = self.select(geometry.nearest(event.x));
        self.step_fade(event.at);
        change
    }

    fn on_released(&mut self, event: GestureEvent) {
        if self.phase != ControllerPhase::Tracking {
            trace!(phase = ?event.phase, "release outside an active gesture");
            return;
        }
        self.phase = ControllerPhase::Releasing;
        self.pending_x = None;
        let handle = self.dismiss_timer.schedule(event.at + self.config.hold());
        debug!(
            phase = ?event.phase,
            due_at = ?handle.due_at(),
            "tooltip dismissal scheduled"
        );
    }

    fn select(&mut self, point: &ChartPoint) -> Option<SelectionChange> {
        if self.selection.selected_index == Some(point.index) {
            return None;
        }
        self.selection.selected_index = Some(point.index);
        Some(SelectionChange {
            index: point.index,
            sample: point.sample,
        })
    }

    fn throttle_window_elapsed(&self, at: Duration) -> bool {
        self.last_applied_at
            .is_none_or(|last| at.saturating_sub(last) >= self.config.frame_budget())
    }

    fn opacity_at(&self, at: Duration) -> f64 {
        self.fade
            .map_or(self.selection.tooltip_opacity, |fade| fade.value_at(at))
    }

    fn step_fade(&mut self, now: Duration) {
        let Some(fade) = self.fade else {
            return;
        };
        self.selection.tooltip_opacity = fade.value_at(now);
        if !fade.is_finished_at(now) {
            return;
        }
        self.fade = None;
        if fade.target() == 0.0 && self.phase == ControllerPhase::Releasing {
            debug!("tooltip dismissed");
            self.phase = ControllerPhase::Idle;
            self.selection = SelectionState::default();
            self.last_applied_at = None;
        }
    }
}
