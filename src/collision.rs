//! Per-axis collision resolution against the tile map.
//!
//! Each call moves the hitbox along one axis. The leading edge (the edge
//! facing the direction of travel) sweeps every grid cell between its old
//! and new position; three points on that edge are sampled in each cell and
//! the first blocking cell stops the body flush against its boundary. The
//! sweep never revisits a cell, so an embedded start state costs one snap,
//! not an iterative push-out.
//!
//! Sample points are inset from the hitbox corners so a body sliding along a
//! wall does not catch on the wall's tiles when moving vertically. The cost
//! of the inset is that a tile corner may clip the hitbox by up to the inset
//! distance. Three samples fully cover edges up to two tiles long.

use log::trace;

use crate::body::{Axis, KinematicBody};
use crate::constants::{MAX_SWEEP_CELLS, OVERLAP_EPSILON};
use crate::numeric::{ceil_to_i32, cell_to_world, floor_to_i32};
use crate::tiles::TileQuery;

/// Result of resolving one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisOutcome {
    /// New position along the resolved axis.
    pub position: f32,
    /// New velocity along the resolved axis.
    pub velocity: f32,
    /// Grounded flag after resolution.
    pub grounded: bool,
    /// The leading edge hit a blocking tile.
    pub collided: bool,
}

/// Resolves displacements of a body against a [`TileQuery`].
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver<'a, T: TileQuery + ?Sized> {
    tiles: &'a T,
    edge_inset: f32,
    drop_through: bool,
}

impl<'a, T: TileQuery + ?Sized> CollisionResolver<'a, T> {
    /// Creates a resolver sampling edges `edge_inset` units in from each corner.
    pub const fn new(tiles: &'a T, edge_inset: f32) -> Self {
        Self {
            tiles,
            edge_inset,
            drop_through: false,
        }
    }

    /// When set, one-way platforms let the body fall through.
    #[must_use]
    pub fn with_drop_through(mut self, drop_through: bool) -> Self {
        self.drop_through = drop_through;
        self
    }

    /// Applies `displacement` along `axis` and clamps it at the first blocking
    /// tile.
    ///
    /// Zero or non-finite displacements return the body's current state
    /// without querying the map. On the Y axis a downward hit grounds the
    /// body, an upward hit leaves the grounded flag alone and free motion
    /// clears it. The X axis never changes the grounded flag.
    #[must_use]
    pub fn resolve_axis(&self, body: &KinematicBody, axis: Axis, displacement: f32) -> AxisOutcome {
        let start = axis.of(body.position);
        let velocity = axis.of(body.velocity);
        if displacement == 0.0 || !displacement.is_finite() {
            return AxisOutcome {
                position: start,
                velocity,
                grounded: body.grounded,
                collided: false,
            };
        }

        let tile_size = self.tiles.tile_size();
        let extent = axis.of(body.size);
        let displacement = bounded(displacement, tile_size);
        let forward = displacement > 0.0;
        let old_edge = if forward { start + extent } else { start };
        let first = edge_cell(old_edge, forward, tile_size);
        let last = edge_cell(old_edge + displacement, forward, tile_size);
        let samples = self.samples(body, axis);
        let blocks = |cell: &i32| self.blocks(axis, *cell, forward, old_edge, &samples, tile_size);

        let hit = if forward {
            (first..=last).find(blocks)
        } else {
            (last..=first).rev().find(blocks)
        };

        match hit {
            Some(cell) => {
                let position = if forward {
                    cell_to_world(cell, tile_size) - extent
                } else {
                    cell_to_world(cell + 1, tile_size)
                };
                trace!("{axis:?} hit at cell {cell}, snapped {start} -> {position}");
                AxisOutcome {
                    position,
                    velocity: 0.0,
                    grounded: if axis == Axis::Y && forward {
                        true
                    } else {
                        body.grounded
                    },
                    collided: true,
                }
            }
            None => AxisOutcome {
                position: start + displacement,
                velocity,
                grounded: axis == Axis::X && body.grounded,
                collided: false,
            },
        }
    }

    /// Near-start, midpoint and near-end of the leading edge, perpendicular
    /// to `axis`.
    fn samples(&self, body: &KinematicBody, axis: Axis) -> [f32; 3] {
        let origin = axis.perpendicular(body.position);
        let length = axis.perpendicular(body.size);
        let inset = self.edge_inset.clamp(0.0, length * 0.5);
        [origin + inset, origin + length * 0.5, origin + length - inset]
    }

    fn blocks(
        &self,
        axis: Axis,
        cell: i32,
        forward: bool,
        old_edge: f32,
        samples: &[f32; 3],
        tile_size: f32,
    ) -> bool {
        let low = cell_to_world(cell, tile_size);
        let along = low + tile_size * 0.5;
        // A one-way top only catches an edge that started on or above it.
        let lands_on_one_way =
            axis == Axis::Y && forward && !self.drop_through && low >= old_edge - OVERLAP_EPSILON;
        samples.iter().any(|&across| {
            let point = axis.point(along, across);
            self.tiles.is_solid(point.x, point.y)
                || (lands_on_one_way && self.tiles.is_one_way(point.x, point.y))
        })
    }
}

/// Truncates a displacement to the longest sweep a single call walks.
fn bounded(displacement: f32, tile_size: f32) -> f32 {
    let limit = cell_to_world(MAX_SWEEP_CELLS, tile_size);
    if displacement.abs() > limit {
        trace!("displacement {displacement} truncated to {MAX_SWEEP_CELLS} tiles");
    }
    displacement.clamp(-limit, limit)
}

/// Grid cell occupied by a leading edge at `edge`.
///
/// An edge lying exactly on a grid line belongs to the cell ahead of it, so a
/// body flush against a wall reports that wall as its current cell.
fn edge_cell(edge: f32, forward: bool, tile_size: f32) -> i32 {
    let scaled = edge / tile_size;
    if forward {
        floor_to_i32(scaled)
    } else {
        ceil_to_i32(scaled).saturating_sub(1)
    }
}
