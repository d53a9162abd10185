//! Default movement tunables and collision constants shared across systems.
//!
//! These values seed [`MovementConfig::default`](crate::MovementConfig) and
//! document the units each tunable is expressed in. World units are pixels of
//! the authored tile grid; `+y` points down the screen.

/// Horizontal run speed in world units per second.
pub const MOVE_SPEED: f32 = 160.0;
/// Horizontal acceleration towards the run speed, in units/s².
pub const ACCELERATION: f32 = 1200.0;
/// Horizontal deceleration towards rest when no direction is held, in units/s².
pub const FRICTION: f32 = 1600.0;
/// Downward gravitational acceleration, in units/s².
pub const GRAVITY: f32 = 1200.0;
/// Vertical velocity applied by a jump. Negative because `+y` is down.
pub const JUMP_VELOCITY: f32 = -400.0;
/// Terminal downward velocity, in units/s.
pub const MAX_FALL_SPEED: f32 = 600.0;
/// Grace window after leaving the ground during which a jump is honoured.
pub const COYOTE_TIME_MS: f32 = 100.0;
/// Window during which an early jump press is remembered until landing.
pub const JUMP_BUFFER_MS: f32 = 100.0;
/// Factor applied to an ascending vertical velocity when jump is released.
pub const JUMP_CUT_MULTIPLIER: f32 = 0.5;
/// Inset of the leading-edge sample points from the hitbox corners.
pub const EDGE_INSET: f32 = 2.0;
/// Default edge length of a square tile.
pub const TILE_SIZE: f32 = 16.0;
/// Longest sweep, in tiles, a single axis resolution walks.
///
/// Displacements beyond this are truncated so extreme velocities cost a
/// bounded amount of work.
pub const MAX_SWEEP_CELLS: i32 = 64;
/// Largest overlap with a solid tile tolerated after resolution.
pub const OVERLAP_EPSILON: f32 = 1e-3;
/// Milliseconds per second, for converting frame deltas into timer units.
pub const MS_PER_SECOND: f32 = 1000.0;
