//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between floating-point world
//! coordinates and integer tile indices.

/// Floor an `f32` and clamp it into the `i32` domain.
///
/// Non-finite inputs map to `0`; callers are expected to reject them before
/// they reach tile lookups.
///
/// # Examples
/// ```
/// use tilehop::numeric::floor_to_i32;
/// assert_eq!(floor_to_i32(-0.5), -1);
/// assert_eq!(floor_to_i32(31.9), 31);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn floor_to_i32(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    // i32 bounds are not exactly representable in f32; clamp in f64.
    let clamped = f64::from(value.floor()).clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

/// Ceiling of an `f32`, clamped into the `i32` domain.
///
/// # Examples
/// ```
/// use tilehop::numeric::ceil_to_i32;
/// assert_eq!(ceil_to_i32(16.0), 16);
/// assert_eq!(ceil_to_i32(16.1), 17);
/// ```
#[must_use]
pub fn ceil_to_i32(value: f32) -> i32 {
    floor_to_i32(value.ceil())
}

/// Convert a tile index back into the world coordinate of its low edge.
#[expect(
    clippy::cast_precision_loss,
    reason = "Tile indices stay far below 2^24 in practical maps."
)]
#[must_use]
pub fn cell_to_world(cell: i32, tile_size: f32) -> f32 {
    cell as f32 * tile_size
}

/// Convert a grid dimension into a signed tile index, saturating at `i32::MAX`.
#[must_use]
pub fn usize_to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::positive(3.7, 3)]
    #[case::negative(-3.2, -4)]
    #[case::exact(48.0, 48)]
    #[case::nan(f32::NAN, 0)]
    #[case::huge(1e20, i32::MAX)]
    #[case::tiny(-1e20, i32::MIN)]
    fn floors_into_i32(#[case] value: f32, #[case] expected: i32) {
        assert_eq!(floor_to_i32(value), expected);
    }

    #[test]
    fn cell_round_trips_through_world() {
        assert_eq!(floor_to_i32(cell_to_world(3, 16.0) / 16.0), 3);
    }
}
