//! Movement configuration and its loading layer.
//!
//! [`MovementConfig`] is an immutable value: the controller only ever borrows
//! it, so every tick is reproducible from the same inputs. Loading from TOML
//! replaces whole fields; any field missing from the document keeps its
//! default. Loaded values are validated here; the core never checks them.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::Resource;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    ACCELERATION, COYOTE_TIME_MS, EDGE_INSET, FRICTION, GRAVITY, JUMP_BUFFER_MS,
    JUMP_CUT_MULTIPLIER, JUMP_VELOCITY, MAX_FALL_SPEED, MOVE_SPEED,
};

/// Tunable constants consumed by every movement tick.
///
/// # Examples
/// ```
/// use tilehop::MovementConfig;
/// let config = MovementConfig::from_toml_str("gravity = 900.0").unwrap();
/// assert_eq!(config.gravity, 900.0);
/// assert_eq!(config.max_fall_speed, MovementConfig::default().max_fall_speed);
/// ```
#[derive(Resource, Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovementConfig {
    /// Target horizontal speed while a direction is held (units/s).
    pub move_speed: f32,
    /// Rate at which horizontal velocity approaches the target (units/s²).
    pub acceleration: f32,
    /// Rate at which horizontal velocity decays to rest (units/s²).
    pub friction: f32,
    /// Downward acceleration (units/s²).
    pub gravity: f32,
    /// Vertical velocity set by a jump; negative is up (units/s).
    pub jump_velocity: f32,
    /// Upper bound on downward velocity (units/s).
    pub max_fall_speed: f32,
    /// Coyote grace window (ms).
    pub coyote_time_ms: f32,
    /// Jump buffer window (ms).
    pub jump_buffer_ms: f32,
    /// Factor applied to an ascending velocity when jump is released early.
    pub jump_cut_multiplier: f32,
    /// Inset of collision sample points from hitbox corners (units).
    pub edge_inset: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            acceleration: ACCELERATION,
            friction: FRICTION,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            max_fall_speed: MAX_FALL_SPEED,
            coyote_time_ms: COYOTE_TIME_MS,
            jump_buffer_ms: JUMP_BUFFER_MS,
            jump_cut_multiplier: JUMP_CUT_MULTIPLIER,
            edge_inset: EDGE_INSET,
        }
    }
}

/// Errors raised while loading or validating a [`MovementConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read movement config {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The document was not valid TOML or named an unknown field.
    #[error("failed to parse movement config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field held a value the controller cannot work with.
    #[error("invalid movement config field `{field}`: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl MovementConfig {
    /// Parses a TOML document, keeping defaults for missing fields.
    ///
    /// The result is validated before it is returned.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] when a value fails [`Self::validate`].
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the TOML file at `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// errors of [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&document)?;
        log::debug!("loaded movement config from {}", path.display());
        Ok(config)
    }

    /// Checks every field against the domain the controller assumes.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("move_speed", self.move_speed),
            ("acceleration", self.acceleration),
            ("friction", self.friction),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("max_fall_speed", self.max_fall_speed),
            ("coyote_time_ms", self.coyote_time_ms),
            ("jump_buffer_ms", self.jump_buffer_ms),
            ("jump_cut_multiplier", self.jump_cut_multiplier),
            ("edge_inset", self.edge_inset),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        let non_negative = [
            ("move_speed", self.move_speed),
            ("acceleration", self.acceleration),
            ("friction", self.friction),
            ("gravity", self.gravity),
            ("coyote_time_ms", self.coyote_time_ms),
            ("jump_buffer_ms", self.jump_buffer_ms),
            ("edge_inset", self.edge_inset),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }
        if self.jump_velocity >= 0.0 {
            return Err(invalid("jump_velocity", "must be negative (upwards)"));
        }
        if self.max_fall_speed <= 0.0 {
            return Err(invalid("max_fall_speed", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.jump_cut_multiplier) {
            return Err(invalid("jump_cut_multiplier", "must lie within [0, 1]"));
        }
        Ok(())
    }
}

const fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid() {
        assert!(MovementConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = MovementConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, MovementConfig::default());
    }

    #[test]
    fn fields_replace_defaults_individually() {
        let config = MovementConfig::from_toml_str("move_speed = 90.0\ncoyote_time_ms = 0.0")
            .expect("config parses");
        assert_eq!(config.move_speed, 90.0);
        assert_eq!(config.coyote_time_ms, 0.0);
        assert_eq!(config.gravity, GRAVITY);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = MovementConfig::from_toml_str("moon_gravity = 1.0").expect_err("unknown key");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[rstest]
    #[case::negative_fall("max_fall_speed = -1.0", "max_fall_speed")]
    #[case::zero_fall("max_fall_speed = 0.0", "max_fall_speed")]
    #[case::upward_gravity("gravity = -10.0", "gravity")]
    #[case::downward_jump("jump_velocity = 50.0", "jump_velocity")]
    #[case::cut_above_one("jump_cut_multiplier = 1.5", "jump_cut_multiplier")]
    #[case::negative_buffer("jump_buffer_ms = -5.0", "jump_buffer_ms")]
    #[case::infinite_speed("move_speed = inf", "move_speed")]
    fn invalid_values_name_the_field(#[case] document: &str, #[case] expected: &str) {
        match MovementConfig::from_toml_str(document) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid `{expected}`, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = MovementConfig::load("does/not/exist.toml").expect_err("missing file");
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
