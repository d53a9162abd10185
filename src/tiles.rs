//! Read-only tile map boundary consumed by the collision resolver.
//!
//! The core never owns level data. Whatever loads the level implements
//! [`TileQuery`] for its collision layer; [`TileGrid`] is a dense in-memory
//! adapter for tile-index layers and the ASCII fixtures used in tests.

use bevy::prelude::Resource;
use thiserror::Error;

use crate::numeric::{floor_to_i32, usize_to_i32};

/// Answers whether the tile covering a world position blocks movement.
///
/// Implementations must be pure for the duration of a tick: the resolver
/// may query the same point several times and expects the same answer.
#[cfg_attr(test, mockall::automock)]
pub trait TileQuery {
    /// Edge length of one square grid cell in world units.
    fn tile_size(&self) -> f32;

    /// Returns `true` when the cell containing `(x, y)` is solid.
    fn is_solid(&self, x: f32, y: f32) -> bool;

    /// Returns `true` when the cell containing `(x, y)` is a one-way platform.
    ///
    /// One-way cells only block bodies landing on them from above.
    fn is_one_way(&self, _x: f32, _y: f32) -> bool {
        false
    }
}

/// Collision behaviour of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    /// Passable.
    #[default]
    Empty,
    /// Blocks movement from every direction.
    Solid,
    /// Blocks only downward movement onto its top face.
    OneWay,
}

/// What a [`TileGrid`] reports for positions outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfBounds {
    /// Treat the outside as open space; bodies fall into the void.
    #[default]
    Empty,
    /// Treat the outside as a wall enclosing the level.
    Solid,
}

/// Errors raised while building a [`TileGrid`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileGridError {
    /// The cell count does not match `width * height`.
    #[error("expected {expected} cells for the grid, got {actual}")]
    DimensionMismatch {
        /// `width * height`.
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },
    /// An ASCII row differs in length from the first row.
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
    /// The tile size was not a positive finite number.
    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
}

/// Dense row-major grid of [`Tile`] cells anchored at the world origin.
///
/// # Examples
/// ```
/// use tilehop::{TileGrid, TileQuery};
/// let grid = TileGrid::from_ascii(&["..", "##"], 16.0).unwrap();
/// assert!(!grid.is_solid(8.0, 8.0));
/// assert!(grid.is_solid(20.0, 20.0));
/// ```
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_size: f32,
    cells: Vec<Tile>,
    out_of_bounds: OutOfBounds,
}

impl TileGrid {
    /// Builds a grid from row-major cells.
    ///
    /// # Errors
    /// Returns [`TileGridError::DimensionMismatch`] when `cells` does not hold
    /// `width * height` entries and [`TileGridError::InvalidTileSize`] for a
    /// non-positive or non-finite `tile_size`.
    pub fn new(
        width: usize,
        height: usize,
        tile_size: f32,
        cells: Vec<Tile>,
    ) -> Result<Self, TileGridError> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(TileGridError::InvalidTileSize(tile_size));
        }
        let expected = width.saturating_mul(height);
        if cells.len() != expected {
            return Err(TileGridError::DimensionMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tile_size,
            cells,
            out_of_bounds: OutOfBounds::default(),
        })
    }

    /// Builds a grid from ASCII rows: `#` is solid, `-` is one-way and any
    /// other character is empty.
    ///
    /// # Errors
    /// Returns [`TileGridError::RaggedRow`] when rows differ in width, plus the
    /// errors of [`Self::new`].
    pub fn from_ascii<S: AsRef<str>>(rows: &[S], tile_size: f32) -> Result<Self, TileGridError> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut cells = Vec::with_capacity(width.saturating_mul(rows.len()));
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let actual = row.chars().count();
            if actual != width {
                return Err(TileGridError::RaggedRow {
                    row: index,
                    expected: width,
                    actual,
                });
            }
            cells.extend(row.chars().map(|glyph| match glyph {
                '#' => Tile::Solid,
                '-' => Tile::OneWay,
                _ => Tile::Empty,
            }));
        }
        Self::new(width, rows.len(), tile_size, cells)
    }

    /// Builds a grid from a tile-index layer, marking cells solid where
    /// `is_solid_index` holds. Index `0` conventionally means "no tile" and is
    /// passed to the predicate like any other.
    ///
    /// # Errors
    /// Returns the errors of [`Self::new`].
    pub fn from_layer<F>(
        width: usize,
        height: usize,
        tile_size: f32,
        indices: &[u32],
        is_solid_index: F,
    ) -> Result<Self, TileGridError>
    where
        F: Fn(u32) -> bool,
    {
        let cells = indices
            .iter()
            .map(|&index| {
                if is_solid_index(index) {
                    Tile::Solid
                } else {
                    Tile::Empty
                }
            })
            .collect();
        Self::new(width, height, tile_size, cells)
    }

    /// Sets the policy used for positions outside the grid.
    #[must_use]
    pub fn with_out_of_bounds(mut self, policy: OutOfBounds) -> Self {
        self.out_of_bounds = policy;
        self
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at grid coordinates, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, column: i32, row: i32) -> Option<Tile> {
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + column).copied()
    }

    /// Overwrites the cell at grid coordinates. Returns `false` when the
    /// coordinates fall outside the grid.
    pub fn set_cell(&mut self, column: i32, row: i32, tile: Tile) -> bool {
        let (Ok(column), Ok(row)) = (usize::try_from(column), usize::try_from(row)) else {
            return false;
        };
        if column >= self.width || row >= self.height {
            return false;
        }
        match self.cells.get_mut(row * self.width + column) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    /// Returns the tile covering a world position, honouring the
    /// out-of-bounds policy.
    #[must_use]
    pub fn tile_at(&self, x: f32, y: f32) -> Tile {
        let column = floor_to_i32(x / self.tile_size);
        let row = floor_to_i32(y / self.tile_size);
        self.cell(column, row)
            .unwrap_or(match self.out_of_bounds {
                OutOfBounds::Empty => Tile::Empty,
                OutOfBounds::Solid => Tile::Solid,
            })
    }

    /// Iterates the grid coordinates of every solid cell in row-major order.
    pub fn solid_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == Tile::Solid)
            .map(move |(index, _)| (usize_to_i32(index % width), usize_to_i32(index / width)))
    }
}

impl TileQuery for TileGrid {
    fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn is_solid(&self, x: f32, y: f32) -> bool {
        self.tile_at(x, y) == Tile::Solid
    }

    fn is_one_way(&self, x: f32, y: f32) -> bool {
        self.tile_at(x, y) == Tile::OneWay
    }
}

impl<T: TileQuery + ?Sized> TileQuery for &T {
    fn tile_size(&self) -> f32 {
        (**self).tile_size()
    }

    fn is_solid(&self, x: f32, y: f32) -> bool {
        (**self).is_solid(x, y)
    }

    fn is_one_way(&self, x: f32, y: f32) -> bool {
        (**self).is_one_way(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_grid() -> TileGrid {
        TileGrid::from_ascii(&["...", ".-.", "###"], 16.0).expect("valid grid")
    }

    #[rstest]
    #[case::empty(8.0, 8.0, Tile::Empty)]
    #[case::one_way(20.0, 20.0, Tile::OneWay)]
    #[case::solid(40.0, 40.0, Tile::Solid)]
    #[case::boundary_belongs_to_next_cell(16.0, 32.0, Tile::Solid)]
    #[case::left_of_grid(-1.0, 40.0, Tile::Empty)]
    #[case::below_grid(8.0, 48.0, Tile::Empty)]
    fn tiles_resolve_from_world_positions(#[case] x: f32, #[case] y: f32, #[case] expected: Tile) {
        assert_eq!(sample_grid().tile_at(x, y), expected);
    }

    #[test]
    fn solid_boundary_policy_walls_in_the_level() {
        let grid = sample_grid().with_out_of_bounds(OutOfBounds::Solid);
        assert!(grid.is_solid(-0.5, 8.0));
        assert!(grid.is_solid(8.0, 1000.0));
        assert!(!grid.is_solid(8.0, 8.0));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = TileGrid::from_ascii(&["..", "..."], 16.0).expect_err("ragged");
        assert_eq!(
            err,
            TileGridError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 3
            }
        );
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-16.0)]
    #[case::nan(f32::NAN)]
    fn tile_size_must_be_positive(#[case] tile_size: f32) {
        assert!(matches!(
            TileGrid::new(1, 1, tile_size, vec![Tile::Empty]),
            Err(TileGridError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn layer_indices_map_through_the_predicate() {
        let grid = TileGrid::from_layer(2, 1, 8.0, &[0, 7], |index| index != 0).expect("layer");
        assert!(!grid.is_solid(4.0, 4.0));
        assert!(grid.is_solid(12.0, 4.0));
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        assert_eq!(
            TileGrid::new(2, 2, 16.0, vec![Tile::Empty]),
            Err(TileGridError::DimensionMismatch {
                expected: 4,
                actual: 1
            })
        );
    }

    #[test]
    fn set_cell_edits_in_bounds_only() {
        let mut grid = sample_grid();
        assert!(grid.set_cell(0, 0, Tile::Solid));
        assert!(grid.is_solid(1.0, 1.0));
        assert!(!grid.set_cell(3, 0, Tile::Solid));
        assert!(!grid.set_cell(-1, 0, Tile::Solid));
    }

    #[test]
    fn solid_cells_lists_the_floor() {
        let cells: Vec<_> = sample_grid().solid_cells().collect();
        assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2)]);
    }
}
