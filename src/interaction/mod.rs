mod controller;
mod timer;
mod transition;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Sample;

pub use controller::InteractionController;
pub use timer::{TimerHandle, TimerSlot};
pub use transition::OpacityTransition;

/// Phase reported by the host's pointer/drag recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

/// One gesture sample in chart-local pixels.
///
/// `at` is a monotonic timestamp supplied by the host event loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub x: f64,
    pub y: f64,
    pub at: Duration,
}

impl GestureEvent {
    #[must_use]
    pub const fn new(phase: GesturePhase, x: f64, y: f64, at: Duration) -> Self {
        Self { phase, x, y, at }
    }

    #[must_use]
    pub const fn began(x: f64, y: f64, at: Duration) -> Self {
        Self::new(GesturePhase::Began, x, y, at)
    }

    #[must_use]
    pub const fn changed(x: f64, y: f64, at: Duration) -> Self {
        Self::new(GesturePhase::Changed, x, y, at)
    }

    #[must_use]
    pub const fn ended(x: f64, y: f64, at: Duration) -> Self {
        Self::new(GesturePhase::Ended, x, y, at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerPhase {
    Idle,
    /// A gesture is in progress.
    Tracking,
    /// Gesture released; tooltip held and then faded out.
    Releasing,
}

/// Selection and tooltip state exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_index: Option<usize>,
    pub tooltip_visible: bool,
    /// Current tooltip opacity in `[0, 1]`.
    pub tooltip_opacity: f64,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_index: None,
            tooltip_visible: false,
            tooltip_opacity: 0.0,
        }
    }
}

/// Emitted whenever the selected index changes to a new point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionChange {
    pub index: usize,
    pub sample: Sample,
}

/// Timing for throttling and tooltip animation, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Minimum spacing between applied `Changed` updates.
    #[serde(default = "default_frame_budget_ms")]
    pub frame_budget_ms: u64,
    #[serde(default = "default_fade_in_ms")]
    pub fade_in_ms: u64,
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,
    /// Time from release until the selection is cleared; the fade-out
    /// occupies the tail of this window.
    #[serde(default = "default_dismiss_delay_ms")]
    pub dismiss_delay_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            frame_budget_ms: default_frame_budget_ms(),
            fade_in_ms: default_fade_in_ms(),
            fade_out_ms: default_fade_out_ms(),
            dismiss_delay_ms: default_dismiss_delay_ms(),
        }
    }
}

impl InteractionConfig {
    #[must_use]
    pub fn frame_budget(self) -> Duration {
        Duration::from_millis(self.frame_budget_ms)
    }

    #[must_use]
    pub fn fade_in(self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    #[must_use]
    pub fn fade_out(self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    #[must_use]
    pub fn dismiss_delay(self) -> Duration {
        Duration::from_millis(self.dismiss_delay_ms)
    }

    /// Delay between release and the start of the fade-out.
    #[must_use]
    pub fn hold(self) -> Duration {
        self.dismiss_delay().saturating_sub(self.fade_out())
    }
}

fn default_frame_budget_ms() -> u64 {
    16
}

fn default_fade_in_ms() -> u64 {
    100
}

fn default_fade_out_ms() -> u64 {
    100
}

fn default_dismiss_delay_ms() -> u64 {
    600
}
