//! Bevy plugin hosting the movement core in an ECS schedule.
//!
//! The plugin only moves data between the ECS world and the core: it derives
//! edge-triggered intents from held input, ticks every [`KinematicBody`] in
//! carrier-first order and mirrors positions into `Transform`. All movement
//! rules live in [`crate::controller`]; nothing here infers physics state of
//! its own.

use bevy::prelude::*;
use bevy_transform::components::Transform;
use glam::Vec2;
use hashbrown::HashMap;
use log::debug;

use crate::controller::{carry, reconcile_buffered_jump, settle_on_carrier, tick, TickReport};
use crate::schedule::resolution_order;
use crate::{HeldInput, InputIntent, KinematicBody, MovementConfig, TileGrid};

/// Scripted motion for a moving platform.
///
/// Platforms follow their velocity without gravity, input or tile collision;
/// whatever scripts their path updates the velocity.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlatformMotion {
    /// Velocity in world units per second.
    pub velocity: Vec2,
}

/// Marks a body as a passenger of the carrier entity.
///
/// The host sets and clears this relation; the plugin only honours it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RidingOn(pub Entity);

/// Report from the most recent tick of a body.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome(pub TickReport);

type BodyRow<'w> = (
    Entity,
    &'w mut KinematicBody,
    Option<&'w InputIntent>,
    Option<&'w RidingOn>,
    Option<&'w PlatformMotion>,
    Option<&'w mut TickOutcome>,
);

/// Derives this frame's [`InputIntent`] from [`HeldInput`].
///
/// The previous frame's `jump_held` is read from the intent before it is
/// overwritten, so no extra state is needed for edge detection.
pub fn derive_intents_system(mut query: Query<(&HeldInput, &mut InputIntent)>) {
    for (held, mut intent) in &mut query {
        *intent = InputIntent::from_held(intent.jump_held, *held);
    }
}

/// Advances every body by the frame delta, carriers before passengers.
///
/// Bodies are visited in entity order within each dependency level so the
/// result does not depend on archetype iteration order.
pub fn tick_bodies_system(
    time: Res<Time>,
    config: Res<MovementConfig>,
    tiles: Res<TileGrid>,
    mut bodies: Query<BodyRow<'_>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    let mut rows: Vec<(Entity, Option<Entity>)> = bodies
        .iter()
        .map(|(entity, _, _, riding, _, _)| (entity, riding.map(|riding| riding.0)))
        .collect();
    rows.sort_by_key(|(entity, _)| *entity);
    let index: HashMap<Entity, usize> = rows
        .iter()
        .enumerate()
        .map(|(position, (entity, _))| (*entity, position))
        .collect();
    let carriers: Vec<Option<usize>> = rows
        .iter()
        .map(|(_, carrier)| carrier.and_then(|carrier| index.get(&carrier).copied()))
        .collect();

    // Displacement and final state of every body resolved so far this tick.
    let mut resolved: HashMap<Entity, (Vec2, KinematicBody)> = HashMap::with_capacity(rows.len());
    for position in resolution_order(&carriers) {
        let Some(&(entity, carrier)) = rows.get(position) else {
            continue;
        };
        let carrier_state = carrier.and_then(|carrier| resolved.get(&carrier).copied());
        let Ok((_, mut body, intent, _, platform, outcome)) = bodies.get_mut(entity) else {
            continue;
        };
        let start = body.position;

        if let Some((delta, _)) = carrier_state {
            carry(&mut body, &*tiles, &config, delta);
        }

        if let Some(platform) = platform {
            body.velocity = platform.velocity;
            body.position += platform.velocity * dt;
        } else {
            let previous_bottom = body.max().y;
            let intent = intent.copied().unwrap_or_default();
            let was_grounded = body.grounded;
            let mut report = tick(&mut body, &intent, &*tiles, &config, dt);
            if let Some((_, carrier_body)) = carrier_state {
                if settle_on_carrier(&mut body, &carrier_body, previous_bottom) && !was_grounded {
                    report.landed = true;
                    reconcile_buffered_jump(&mut body, &config, &mut report);
                }
            }
            if report.landed {
                debug!("{entity:?} landed at ({}, {})", body.position.x, body.position.y);
            }
            if let Some(mut outcome) = outcome {
                outcome.0 = report;
            }
        }

        resolved.insert(entity, (body.position - start, *body));
    }
}

/// Mirrors each body's hitbox centre into its `Transform`.
///
/// The core uses a y-down screen space; Bevy's world is y-up, so `y` is
/// negated. `z` is left to the host.
pub fn sync_transforms_system(
    mut query: Query<(&KinematicBody, &mut Transform), Changed<KinematicBody>>,
) {
    for (body, mut transform) in &mut query {
        let centre = body.centre();
        transform.translation.x = centre.x;
        transform.translation.y = -centre.y;
    }
}

/// Bevy plugin installing the movement systems.
///
/// Systems only run once a [`TileGrid`] resource is present. An existing
/// [`MovementConfig`] resource is kept; otherwise the plugin's configuration
/// is inserted.
#[derive(Debug, Default, Clone, Copy)]
pub struct KinematicsPlugin {
    config: MovementConfig,
}

impl KinematicsPlugin {
    /// Creates the plugin with an explicit configuration.
    #[must_use]
    pub const fn with_config(config: MovementConfig) -> Self {
        Self { config }
    }
}

impl Plugin for KinematicsPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<MovementConfig>() {
            app.insert_resource(self.config);
        }
        app.add_systems(
            Update,
            (
                derive_intents_system,
                tick_bodies_system,
                sync_transforms_system,
            )
                .chain()
                .run_if(resource_exists::<TileGrid>),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn app_with_floor() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(KinematicsPlugin::default())
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(10)));
        let grid = TileGrid::from_ascii(&["......", "......", "######"], 16.0).expect("grid");
        app.insert_resource(grid);
        app
    }

    #[test]
    fn plugin_installs_default_config() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(KinematicsPlugin::default());
        assert_eq!(
            app.world().get_resource::<MovementConfig>(),
            Some(&MovementConfig::default())
        );
    }

    #[test]
    fn existing_config_is_kept() {
        let custom = MovementConfig {
            gravity: 10.0,
            ..MovementConfig::default()
        };
        let mut app = App::new();
        app.insert_resource(custom);
        app.add_plugins(KinematicsPlugin::default());
        assert_eq!(app.world().get_resource::<MovementConfig>(), Some(&custom));
    }

    #[test]
    fn falling_body_lands_and_syncs_transform() {
        let mut app = app_with_floor();
        let entity = app
            .world_mut()
            .spawn((
                KinematicBody::new(Vec2::new(0.0, 0.0), Vec2::new(12.0, 14.0)),
                Transform::default(),
                TickOutcome::default(),
            ))
            .id();
        for _ in 0..60 {
            app.update();
        }
        let body = app.world().get::<KinematicBody>(entity).expect("body");
        assert!(body.grounded);
        assert_eq!(body.position.y, 18.0);
        let transform = app.world().get::<Transform>(entity).expect("transform");
        assert_eq!(transform.translation.y, -25.0);
        assert_eq!(transform.translation.x, 6.0);
    }

    #[test]
    fn intents_follow_held_input_edges() {
        let mut app = app_with_floor();
        let entity = app
            .world_mut()
            .spawn((
                KinematicBody::new(Vec2::new(0.0, 18.0), Vec2::new(12.0, 14.0)),
                HeldInput {
                    jump: true,
                    ..HeldInput::default()
                },
                InputIntent::default(),
            ))
            .id();
        app.update();
        let intent = *app.world().get::<InputIntent>(entity).expect("intent");
        assert!(intent.jump_just_pressed);
        app.update();
        let intent = *app.world().get::<InputIntent>(entity).expect("intent");
        assert!(!intent.jump_just_pressed);
        assert!(intent.jump_held);
    }
}
