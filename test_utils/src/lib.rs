//! Fixtures shared by the integration tests.
//!
//! Grids are built from ASCII rows (`#` solid, `-` one-way) with 16-unit
//! tiles, and bodies default to the 12x14 player hitbox.

use bevy::prelude::App;
use glam::Vec2;
use tilehop::{
    tick, InputIntent, KinematicBody, MovementConfig, TickReport, TileGrid, TileQuery, TILE_SIZE,
};

/// Player hitbox used throughout the tests.
pub const PLAYER_SIZE: Vec2 = Vec2::new(12.0, 14.0);

/// One frame at 60 Hz.
pub const DT_60HZ: f32 = 1.0 / 60.0;

/// Builds a grid from ASCII rows with the default tile size.
///
/// # Panics
/// Panics if the rows are ragged or empty.
///
/// # Examples
/// ```
/// use test_utils::grid_from_rows;
/// let grid = grid_from_rows(&["..", "##"]);
/// assert_eq!(grid.width(), 2);
/// ```
#[must_use]
pub fn grid_from_rows(rows: &[&str]) -> TileGrid {
    TileGrid::from_ascii(rows, TILE_SIZE)
        .unwrap_or_else(|error| panic!("invalid test grid: {error}"))
}

/// A closed room: solid border, `inner_width` by `inner_height` open cells.
#[must_use]
pub fn box_room(inner_width: usize, inner_height: usize) -> TileGrid {
    let wall = "#".repeat(inner_width + 2);
    let inner = format!("#{}#", ".".repeat(inner_width));
    let mut rows = Vec::with_capacity(inner_height + 2);
    rows.push(wall.clone());
    rows.extend(std::iter::repeat(inner).take(inner_height));
    rows.push(wall);
    TileGrid::from_ascii(&rows, TILE_SIZE)
        .unwrap_or_else(|error| panic!("invalid box room: {error}"))
}

/// A player-sized airborne body at `(x, y)`.
#[must_use]
pub fn body_at(x: f32, y: f32) -> KinematicBody {
    KinematicBody::new(Vec2::new(x, y), PLAYER_SIZE)
}

/// A grounded player-sized body whose bottom edge rests at `floor_y`.
#[must_use]
pub fn standing_on(x: f32, floor_y: f32) -> KinematicBody {
    KinematicBody {
        grounded: true,
        ..body_at(x, floor_y - PLAYER_SIZE.y)
    }
}

/// Intent for the frame a jump is pressed.
#[must_use]
pub const fn jump_press() -> InputIntent {
    InputIntent {
        jump_held: true,
        jump_just_pressed: true,
        ..InputIntent::IDLE
    }
}

/// Intent with jump held after the press frame.
#[must_use]
pub const fn jump_hold() -> InputIntent {
    InputIntent {
        jump_held: true,
        ..InputIntent::IDLE
    }
}

/// Intent for the frame jump is released.
#[must_use]
pub const fn jump_release() -> InputIntent {
    InputIntent {
        jump_just_released: true,
        ..InputIntent::IDLE
    }
}

/// Intent holding right only.
#[must_use]
pub const fn hold_right() -> InputIntent {
    InputIntent {
        move_right: true,
        ..InputIntent::IDLE
    }
}

/// Intent holding left only.
#[must_use]
pub const fn hold_left() -> InputIntent {
    InputIntent {
        move_left: true,
        ..InputIntent::IDLE
    }
}

/// Ticks `body` `count` times with the same intent and returns the reports.
pub fn run_ticks<T: TileQuery + ?Sized>(
    body: &mut KinematicBody,
    intent: &InputIntent,
    tiles: &T,
    config: &MovementConfig,
    dt: f32,
    count: usize,
) -> Vec<TickReport> {
    (0..count)
        .map(|_| tick(body, intent, tiles, config, dt))
        .collect()
}

/// Runs `count` frames of a Bevy app.
pub fn update_times(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}
