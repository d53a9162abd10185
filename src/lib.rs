//! Deterministic kinematic movement and tile collision for 2D platformers.
//!
//! The core is a set of pure functions over plain data: a [`KinematicBody`]
//! is advanced one frame at a time by [`tick`] against any [`TileQuery`],
//! driven by an [`InputIntent`] and tuned by a [`MovementConfig`]. Coordinates
//! are y-down screen space in world units; timers are milliseconds and frame
//! deltas are seconds.
//!
//! [`KinematicsPlugin`] hosts the same core inside a Bevy schedule.
pub mod body;
pub mod collision;
pub mod config;
pub mod constants;
pub mod controller;
pub mod integrator;
pub mod intent;
pub mod jump_assist;
pub mod logging;
pub mod numeric;
pub mod plugin;
pub mod schedule;
pub mod tiles;
pub use constants::*;

// Re-export commonly used items
pub use body::{Axis, KinematicBody, SpawnPoint};
pub use collision::{AxisOutcome, CollisionResolver};
pub use config::{ConfigError, MovementConfig};
pub use controller::{carry, reconcile_buffered_jump, settle_on_carrier, tick, TickReport};
pub use integrator::{approach, clamp_fall_speed, integrate, Integration};
pub use intent::{Heading, HeldInput, InputIntent};
pub use jump_assist::JumpAssist;
pub use logging::init as init_logging;
pub use plugin::{KinematicsPlugin, PlatformMotion, RidingOn, TickOutcome};
pub use schedule::resolution_order;
pub use tiles::{OutOfBounds, Tile, TileGrid, TileGridError, TileQuery};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use tilehop::prelude::*;
    //! ```

    pub use crate::tick;
    pub use crate::InputIntent;
    pub use crate::KinematicBody;
    pub use crate::KinematicsPlugin;
    pub use crate::MovementConfig;
    pub use crate::TileGrid;
    pub use crate::TileQuery;
}
