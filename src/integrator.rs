//! Velocity integration from input intent and elapsed time.
//!
//! Integration never moves a body; it only proposes the velocity the
//! collision resolver will then apply per axis.

use glam::Vec2;

use crate::{InputIntent, KinematicBody, MovementConfig};

/// Result of integrating one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integration {
    /// Proposed velocity for this tick.
    pub velocity: Vec2,
    /// A jump impulse replaced the vertical velocity.
    pub jumped: bool,
}

/// Moves `current` towards `target` by at most `max_step`, landing exactly
/// on `target` instead of overshooting it.
///
/// # Examples
/// ```
/// use tilehop::approach;
/// assert_eq!(approach(10.0, 0.0, 4.0), 6.0);
/// assert_eq!(approach(3.0, 0.0, 4.0), 0.0);
/// assert_eq!(approach(-3.0, 5.0, 2.0), -1.0);
/// ```
#[must_use]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let step = max_step.max(0.0);
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

/// Clamps a vertical velocity to the configured terminal fall speed.
///
/// Upward velocities are left unbounded.
#[must_use]
pub fn clamp_fall_speed(vy: f32, max_fall_speed: f32) -> f32 {
    vy.min(max_fall_speed)
}

/// Proposes the next velocity for `body`.
///
/// Horizontal velocity accelerates towards the intent's heading at
/// `acceleration` or decays to rest at `friction`. Gravity is applied and
/// clamped before a jump press is considered, so a jump replaces the vertical
/// velocity outright on its trigger tick. Releasing jump while ascending then
/// scales the ascent by `jump_cut_multiplier`.
///
/// The body's [`JumpAssist`](crate::JumpAssist) timers must already have been
/// refreshed for this tick.
#[must_use]
pub fn integrate(
    body: &KinematicBody,
    intent: &InputIntent,
    config: &MovementConfig,
    dt_seconds: f32,
) -> Integration {
    let target = intent.heading().sign() * config.move_speed;
    // Friction only decays towards rest; reversing direction uses acceleration.
    let rate = if target == 0.0 {
        config.friction
    } else {
        config.acceleration
    };
    let vx = approach(body.velocity.x, target, rate * dt_seconds);

    let mut vy = clamp_fall_speed(
        body.velocity.y + config.gravity * dt_seconds,
        config.max_fall_speed,
    );

    let jumped = intent.jump_just_pressed && body.assist.can_jump(body.grounded);
    if jumped {
        vy = config.jump_velocity;
    }
    if intent.jump_just_released && vy < 0.0 {
        vy *= config.jump_cut_multiplier;
    }

    Integration {
        velocity: Vec2::new(vx, vy),
        jumped,
    }
}
