//! Headless driver: runs one body over an ASCII map with scripted input and
//! logs where it ends up.
//!
//! Map rows use `#` for solid tiles, `-` for one-way platforms and `@` for
//! the spawn cell. The body spawns standing on the floor of that cell.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::{Parser, ValueEnum};
use glam::Vec2;
use log::{debug, info};
use tilehop::{
    init_logging, HeldInput, InputIntent, KinematicBody, KinematicsPlugin, MovementConfig,
    SpawnPoint, TickOutcome, TileGrid, TILE_SIZE,
};

const DEFAULT_MAP: &str = "\
##########
#........#
#...--...#
#@.......#
##########";

const BODY_SIZE: Vec2 = Vec2::new(12.0, 14.0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Hold {
    Left,
    Right,
    #[default]
    None,
}

/// Headless 2D platformer movement simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// ASCII map file; a small built-in room is used when omitted
    #[arg(long)]
    map: Option<PathBuf>,
    /// TOML movement configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 120)]
    ticks: u32,
    /// Simulation rate in ticks per second
    #[arg(long, default_value_t = 60)]
    hz: u32,
    /// Horizontal direction held for the whole run
    #[arg(long, value_enum, default_value_t = Hold::None)]
    hold: Hold,
    /// Ticks on which jump is pressed, comma separated
    #[arg(long, value_delimiter = ',')]
    jump_at: Vec<u32>,
    /// How many ticks each jump press is held
    #[arg(long, default_value_t = 12)]
    jump_hold: u32,
}

fn find_spawn(rows: &[&str]) -> Result<SpawnPoint> {
    for (row, line) in rows.iter().enumerate() {
        if let Some(column) = line.chars().position(|glyph| glyph == '@') {
            let x = f32::from(u16::try_from(column).context("spawn column too large")?) * TILE_SIZE;
            let bottom = f32::from(u16::try_from(row + 1).context("spawn row too large")?) * TILE_SIZE;
            let position = Vec2::new(x, bottom - BODY_SIZE.y);
            return Ok(SpawnPoint::new("player", position, BODY_SIZE));
        }
    }
    bail!("map has no `@` spawn cell")
}

fn held_for(args: &Args, tick: u32) -> HeldInput {
    let jump = args
        .jump_at
        .iter()
        .any(|&start| tick >= start && tick < start.saturating_add(args.jump_hold));
    HeldInput {
        left: args.hold == Hold::Left,
        right: args.hold == Hold::Right,
        jump,
        down: false,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.hz == 0 {
        bail!("--hz must be positive");
    }
    let config = match &args.config {
        Some(path) => MovementConfig::load(path)?,
        None => MovementConfig::default(),
    };
    let source = match &args.map {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading map {}", path.display()))?,
        None => DEFAULT_MAP.to_owned(),
    };
    let rows: Vec<&str> = source.lines().filter(|line| !line.is_empty()).collect();
    let grid = TileGrid::from_ascii(&rows, TILE_SIZE).context("building tile grid")?;
    let spawn = find_spawn(&rows)?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(KinematicsPlugin::with_config(config))
        .insert_resource(grid)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / f64::from(args.hz),
        )));
    let player = app
        .world_mut()
        .spawn((
            KinematicBody {
                grounded: true,
                ..KinematicBody::spawn(&spawn)
            },
            HeldInput::default(),
            InputIntent::default(),
            TickOutcome::default(),
        ))
        .id();
    info!(
        "spawned {} at ({}, {}) on a {}x{} map",
        spawn.name,
        spawn.position.x,
        spawn.position.y,
        rows.iter().map(|row| row.len()).max().unwrap_or_default(),
        rows.len()
    );

    for tick in 0..args.ticks {
        let held = held_for(&args, tick);
        if let Some(mut input) = app.world_mut().get_mut::<HeldInput>(player) {
            *input = held;
        }
        app.update();
        let world = app.world();
        let (Some(body), Some(outcome)) = (
            world.get::<KinematicBody>(player),
            world.get::<TickOutcome>(player),
        ) else {
            bail!("player entity lost its movement components");
        };
        let report = outcome.0;
        if report.jumped || report.buffered_jump {
            info!("tick {tick}: jump from ({:.2}, {:.2})", body.position.x, body.position.y);
        }
        if report.landed {
            info!("tick {tick}: landed at ({:.2}, {:.2})", body.position.x, body.position.y);
        }
        debug!(
            "tick {tick}: position ({:.2}, {:.2}) velocity ({:.2}, {:.2}) grounded {}",
            body.position.x, body.position.y, body.velocity.x, body.velocity.y, body.grounded
        );
    }

    let body = app
        .world()
        .get::<KinematicBody>(player)
        .context("player entity despawned")?;
    info!(
        "after {} ticks: position ({:.2}, {:.2}) velocity ({:.2}, {:.2}) grounded {}",
        args.ticks,
        body.position.x,
        body.position.y,
        body.velocity.x,
        body.velocity.y,
        body.grounded
    );
    Ok(())
}
