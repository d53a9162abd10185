//! Per-tick input intents.
//!
//! The input layer above the core decides which keys or buttons map to which
//! intent; the core only sees the booleans below. [`HeldInput`] and
//! [`InputIntent::from_held`] derive the edge-triggered fields for hosts that
//! only track held state.

use bevy::prelude::Component;

/// Snapshot of the movement-relevant input for a single tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    /// Move-left is held.
    pub move_left: bool,
    /// Move-right is held.
    pub move_right: bool,
    /// Jump is held.
    pub jump_held: bool,
    /// Jump went from released to held this tick.
    pub jump_just_pressed: bool,
    /// Jump went from held to released this tick.
    pub jump_just_released: bool,
    /// Down is held; drops through one-way platforms.
    pub down_held: bool,
}

/// Horizontal direction requested by an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Towards `-x`.
    Left,
    /// Towards `+x`.
    Right,
    /// No direction, or both directions at once.
    Neutral,
}

impl Heading {
    /// Sign of the heading along the x axis.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
            Self::Neutral => 0.0,
        }
    }
}

impl InputIntent {
    /// The intent with nothing held or pressed.
    pub const IDLE: Self = Self {
        move_left: false,
        move_right: false,
        jump_held: false,
        jump_just_pressed: false,
        jump_just_released: false,
        down_held: false,
    };

    /// Resolves the horizontal heading.
    ///
    /// Holding both directions cancels out to [`Heading::Neutral`].
    #[must_use]
    pub const fn heading(&self) -> Heading {
        match (self.move_left, self.move_right) {
            (true, false) => Heading::Left,
            (false, true) => Heading::Right,
            _ => Heading::Neutral,
        }
    }

    /// Derives a full intent from this tick's held state and whether jump was
    /// held on the previous tick.
    ///
    /// # Examples
    /// ```
    /// use tilehop::{HeldInput, InputIntent};
    /// let held = HeldInput { jump: true, ..HeldInput::default() };
    /// let intent = InputIntent::from_held(false, held);
    /// assert!(intent.jump_just_pressed);
    /// assert!(!InputIntent::from_held(true, held).jump_just_pressed);
    /// ```
    #[must_use]
    pub const fn from_held(previous_jump_held: bool, held: HeldInput) -> Self {
        Self {
            move_left: held.left,
            move_right: held.right,
            jump_held: held.jump,
            jump_just_pressed: held.jump && !previous_jump_held,
            jump_just_released: !held.jump && previous_jump_held,
            down_held: held.down,
        }
    }
}

/// Level-triggered input written by the host each frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldInput {
    /// Left is held.
    pub left: bool,
    /// Right is held.
    pub right: bool,
    /// Jump is held.
    pub jump: bool,
    /// Down is held.
    pub down: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::neither(false, false, Heading::Neutral)]
    #[case::left(true, false, Heading::Left)]
    #[case::right(false, true, Heading::Right)]
    #[case::both_cancel(true, true, Heading::Neutral)]
    fn heading_from_directions(
        #[case] move_left: bool,
        #[case] move_right: bool,
        #[case] expected: Heading,
    ) {
        let intent = InputIntent {
            move_left,
            move_right,
            ..InputIntent::IDLE
        };
        assert_eq!(intent.heading(), expected);
    }

    #[rstest]
    #[case::press(false, true, true, false)]
    #[case::hold(true, true, false, false)]
    #[case::release(true, false, false, true)]
    #[case::idle(false, false, false, false)]
    fn jump_edges_follow_held_state(
        #[case] previous: bool,
        #[case] now: bool,
        #[case] pressed: bool,
        #[case] released: bool,
    ) {
        let held = HeldInput {
            jump: now,
            ..HeldInput::default()
        };
        let intent = InputIntent::from_held(previous, held);
        assert_eq!(intent.jump_just_pressed, pressed);
        assert_eq!(intent.jump_just_released, released);
        assert_eq!(intent.jump_held, now);
    }
}
