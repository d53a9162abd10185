//! Per-tick orchestration of integration, collision and jump assistance.
//!
//! [`tick`] is the single per-entity per-frame entry point. The sequence is
//! fixed: refresh jump timers, integrate velocity, resolve X, resolve Y, then
//! reconcile a buffered jump on landing. Resolving X before Y keeps diagonal
//! motion out of corners and leaves the vertical pass authoritative for the
//! grounded flag.
//!
//! A buffered jump that fires on landing only sets the jump velocity; the
//! body leaves the ground during the next tick's resolution.

use glam::Vec2;
use log::{debug, log_enabled, warn, Level};

use crate::body::{Axis, KinematicBody};
use crate::collision::CollisionResolver;
use crate::constants::OVERLAP_EPSILON;
use crate::integrator::integrate;
use crate::tiles::TileQuery;
use crate::{InputIntent, MovementConfig};

/// What happened during one tick, for hosts driving animation or audio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A jump press was honoured by the integrator this tick.
    pub jumped: bool,
    /// A buffered press fired on landing this tick.
    pub buffered_jump: bool,
    /// The body went from airborne to grounded this tick.
    pub landed: bool,
    /// Horizontal motion was stopped by a tile.
    pub hit_wall: bool,
    /// Upward motion was stopped by a tile.
    pub hit_ceiling: bool,
}

/// Advances `body` by `dt_seconds`.
///
/// A zero, negative or non-finite `dt_seconds` leaves every field of the body
/// untouched and returns an empty report.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use tilehop::{tick, InputIntent, KinematicBody, MovementConfig, TileGrid};
///
/// let grid = TileGrid::from_ascii(&["..", "..", "##"], 16.0).unwrap();
/// let mut body = KinematicBody::new(Vec2::new(0.0, 18.0), Vec2::new(12.0, 14.0));
/// let config = MovementConfig::default();
/// for _ in 0..10 {
///     tick(&mut body, &InputIntent::IDLE, &grid, &config, 1.0 / 60.0);
/// }
/// assert!(body.grounded);
/// assert_eq!(body.position.y, 18.0);
/// ```
pub fn tick<T: TileQuery + ?Sized>(
    body: &mut KinematicBody,
    intent: &InputIntent,
    tiles: &T,
    config: &MovementConfig,
    dt_seconds: f32,
) -> TickReport {
    let mut report = TickReport::default();
    if !dt_seconds.is_finite() || dt_seconds <= 0.0 {
        return report;
    }
    if log_enabled!(Level::Warn) && body.is_embedded(tiles) {
        warn!(
            "body at ({}, {}) starts the tick embedded in solid tiles",
            body.position.x, body.position.y
        );
    }

    let was_grounded = body.grounded;
    body.assist.update(was_grounded, intent, config, dt_seconds);

    let integration = integrate(body, intent, config, dt_seconds);
    body.velocity = integration.velocity;
    if integration.jumped {
        body.grounded = false;
        body.assist.consume();
        report.jumped = true;
        debug!("jump from ({}, {})", body.position.x, body.position.y);
    }

    let resolver =
        CollisionResolver::new(tiles, config.edge_inset).with_drop_through(intent.down_held);

    let x = resolver.resolve_axis(body, Axis::X, body.velocity.x * dt_seconds);
    body.position.x = x.position;
    body.velocity.x = x.velocity;
    report.hit_wall = x.collided;

    let dy = body.velocity.y * dt_seconds;
    let y = resolver.resolve_axis(body, Axis::Y, dy);
    body.position.y = y.position;
    body.velocity.y = y.velocity;
    body.grounded = y.grounded;
    report.hit_ceiling = y.collided && dy < 0.0;
    report.landed = !was_grounded && body.grounded;
    if report.landed {
        reconcile_buffered_jump(body, config, &mut report);
    }

    report
}

/// Fires a pending buffered jump for a body that landed this tick.
///
/// Sets the jump velocity, clears `grounded` and consumes both timers; the
/// body leaves the ground on its next tick. Does nothing when no press is
/// buffered. Hosts that land bodies outside [`tick`], such as on carriers,
/// call this after settling them.
pub fn reconcile_buffered_jump(
    body: &mut KinematicBody,
    config: &MovementConfig,
    report: &mut TickReport,
) {
    if !body.assist.has_buffered_jump() {
        return;
    }
    body.velocity.y = config.jump_velocity;
    body.grounded = false;
    body.assist.consume();
    report.buffered_jump = true;
    debug!("buffered jump on landing at ({}, {})", body.position.x, body.position.y);
}

/// Moves a passenger by its carrier's displacement for this tick.
///
/// The shift goes through the resolver, X then Y, so a carried body stops at
/// walls instead of being pushed into them. The passenger's own velocity and
/// grounded flag are preserved; its regular [`tick`] runs afterwards.
pub fn carry<T: TileQuery + ?Sized>(
    body: &mut KinematicBody,
    tiles: &T,
    config: &MovementConfig,
    delta: Vec2,
) {
    let resolver = CollisionResolver::new(tiles, config.edge_inset);
    body.position.x = resolver.resolve_axis(body, Axis::X, delta.x).position;
    body.position.y = resolver.resolve_axis(body, Axis::Y, delta.y).position;
}

/// Lands `body` on top of `carrier` if its bottom edge crossed the carrier's
/// top face this tick.
///
/// `previous_bottom` is the passenger's bottom edge before its tick. Returns
/// `true` when the body was settled; the body is then grounded with no
/// vertical velocity.
pub fn settle_on_carrier(
    body: &mut KinematicBody,
    carrier: &KinematicBody,
    previous_bottom: f32,
) -> bool {
    let top = carrier.position.y;
    let bottom = body.max().y;
    let overlaps_horizontally =
        body.position.x < carrier.max().x && body.max().x > carrier.position.x;
    if !overlaps_horizontally || body.velocity.y < 0.0 {
        return false;
    }
    if previous_bottom > top + OVERLAP_EPSILON || bottom < top {
        return false;
    }
    body.position.y = top - body.size.y;
    body.velocity.y = 0.0;
    body.grounded = true;
    true
}
