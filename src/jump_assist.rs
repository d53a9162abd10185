//! Coyote-time and jump-buffer bookkeeping.
//!
//! Both timers count remaining milliseconds and saturate at zero. They are
//! refreshed once per tick before the integrator decides whether a jump
//! press is honoured.

use crate::constants::MS_PER_SECOND;
use crate::{InputIntent, MovementConfig};

/// Per-body grace timers for jumping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpAssist {
    /// Remaining milliseconds during which a jump is still allowed after
    /// leaving the ground.
    pub coyote_timer_ms: f32,
    /// Remaining milliseconds during which a pending press is honoured on
    /// landing.
    pub jump_buffer_ms: f32,
}

impl JumpAssist {
    /// Refreshes both timers at the start of a tick.
    ///
    /// `was_grounded` is the grounded state before this tick's resolution.
    pub fn update(
        &mut self,
        was_grounded: bool,
        intent: &InputIntent,
        config: &MovementConfig,
        dt_seconds: f32,
    ) {
        let elapsed_ms = dt_seconds * MS_PER_SECOND;
        self.coyote_timer_ms = if was_grounded {
            config.coyote_time_ms
        } else {
            saturating_decrement(self.coyote_timer_ms, elapsed_ms)
        };
        self.jump_buffer_ms = if intent.jump_just_pressed {
            config.jump_buffer_ms
        } else {
            saturating_decrement(self.jump_buffer_ms, elapsed_ms)
        };
    }

    /// Whether a jump may start now.
    #[must_use]
    pub fn can_jump(&self, grounded: bool) -> bool {
        grounded || self.coyote_timer_ms > 0.0
    }

    /// Whether a press is still waiting to be honoured.
    #[must_use]
    pub fn has_buffered_jump(&self) -> bool {
        self.jump_buffer_ms > 0.0
    }

    /// Clears both timers after a jump so it cannot fire twice.
    pub fn consume(&mut self) {
        self.coyote_timer_ms = 0.0;
        self.jump_buffer_ms = 0.0;
    }
}

fn saturating_decrement(timer: f32, elapsed_ms: f32) -> f32 {
    (timer - elapsed_ms).max(0.0)
}
