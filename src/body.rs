//! Kinematic state of a single moving entity.

use bevy::prelude::Component;
use glam::Vec2;

use crate::constants::OVERLAP_EPSILON;
use crate::jump_assist::JumpAssist;
use crate::numeric::{cell_to_world, floor_to_i32};
use crate::tiles::TileQuery;

/// World axis selector for per-axis resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal; positive is right.
    X,
    /// Vertical; positive is down.
    Y,
}

impl Axis {
    /// Component of `vector` along this axis.
    #[must_use]
    pub const fn of(self, vector: Vec2) -> f32 {
        match self {
            Self::X => vector.x,
            Self::Y => vector.y,
        }
    }

    /// Component of `vector` along the other axis.
    #[must_use]
    pub const fn perpendicular(self, vector: Vec2) -> f32 {
        match self {
            Self::X => vector.y,
            Self::Y => vector.x,
        }
    }

    /// Writes `value` into this axis of `vector`.
    pub fn set(self, vector: &mut Vec2, value: f32) {
        match self {
            Self::X => vector.x = value,
            Self::Y => vector.y = value,
        }
    }

    /// Builds a world position from an along-axis and a perpendicular coordinate.
    #[must_use]
    pub const fn point(self, along: f32, across: f32) -> Vec2 {
        match self {
            Self::X => Vec2::new(along, across),
            Self::Y => Vec2::new(across, along),
        }
    }
}

/// Authored spawn data handed over by the level collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPoint {
    /// Object name in the level.
    pub name: String,
    /// Top-left of the hitbox.
    pub position: Vec2,
    /// Hitbox extent.
    pub size: Vec2,
    /// Optional type tag, for example `"player"` or `"platform"`.
    pub kind: Option<String>,
}

impl SpawnPoint {
    /// Creates an untagged spawn point.
    pub fn new(name: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        Self {
            name: name.into(),
            position,
            size,
            kind: None,
        }
    }

    /// Tags the spawn point with an object type.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// Axis-aligned hitbox with its motion state.
///
/// `position` is the top-left corner. After every resolved tick the hitbox
/// does not overlap a solid tile by more than
/// [`OVERLAP_EPSILON`](crate::constants::OVERLAP_EPSILON).
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicBody {
    /// Top-left corner in world units.
    pub position: Vec2,
    /// Hitbox width and height.
    pub size: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Whether the body rests on a solid tile this tick.
    pub grounded: bool,
    /// Coyote and jump-buffer timers.
    pub assist: JumpAssist,
}

impl KinematicBody {
    /// Creates a body at rest with the given hitbox.
    #[must_use]
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            ..Self::default()
        }
    }

    /// Creates a body from level spawn data.
    #[must_use]
    pub fn spawn(point: &SpawnPoint) -> Self {
        log::debug!(
            "spawning body `{}` at ({}, {})",
            point.name,
            point.position.x,
            point.position.y
        );
        Self::new(point.position, point.size)
    }

    /// Discards all motion state and recreates the body at `point`.
    pub fn respawn_at(&mut self, point: &SpawnPoint) {
        *self = Self::spawn(point);
    }

    /// Bottom-right corner of the hitbox.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    /// Centre of the hitbox.
    #[must_use]
    pub fn centre(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Deepest overlap between the hitbox and any solid tile, in world units.
    ///
    /// Returns `0.0` when the body is clear. Cost grows with the number of
    /// cells the hitbox covers, so this is meant for diagnostics and tests
    /// rather than per-tick use.
    #[must_use]
    pub fn solid_overlap<T: TileQuery + ?Sized>(&self, tiles: &T) -> f32 {
        let tile_size = tiles.tile_size();
        let min = self.position;
        let max = self.max();
        let first = (floor_to_i32(min.x / tile_size), floor_to_i32(min.y / tile_size));
        let last = (floor_to_i32(max.x / tile_size), floor_to_i32(max.y / tile_size));
        let mut deepest: f32 = 0.0;
        for row in first.1..=last.1 {
            for column in first.0..=last.0 {
                let low = Vec2::new(cell_to_world(column, tile_size), cell_to_world(row, tile_size));
                let centre = low + Vec2::splat(tile_size * 0.5);
                if !tiles.is_solid(centre.x, centre.y) {
                    continue;
                }
                let high = low + Vec2::splat(tile_size);
                let overlap = max.min(high) - min.max(low);
                if overlap.x > 0.0 && overlap.y > 0.0 {
                    deepest = deepest.max(overlap.x.min(overlap.y));
                }
            }
        }
        deepest
    }

    /// Whether the hitbox overlaps a solid tile beyond the tolerated epsilon.
    #[must_use]
    pub fn is_embedded<T: TileQuery + ?Sized>(&self, tiles: &T) -> bool {
        self.solid_overlap(tiles) > OVERLAP_EPSILON
    }
}
