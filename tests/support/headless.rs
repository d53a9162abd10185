//! Headless Bevy app shared by the behaviour tests.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};
use tilehop::{KinematicsPlugin, TileGrid};

/// Fixed frame length used by every headless app.
pub const FRAME: Duration = Duration::from_millis(10);

/// `App` wrapper that can live inside an rspec environment.
#[derive(Debug)]
pub struct HeadlessApp(pub App);

impl Deref for HeadlessApp {
    type Target = App;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for HeadlessApp {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// SAFETY: rspec requires `Send + Sync` environments but the suites run
// serially through `run_serial`, and every access goes through the mutex in
// `SharedApp`.
unsafe impl Send for HeadlessApp {}
unsafe impl Sync for HeadlessApp {}

/// Shared handle to a headless app.
pub type SharedApp = Arc<Mutex<HeadlessApp>>;

/// Builds a headless app with the kinematics plugin, fixed frame time and
/// `grid` as the tile map.
pub fn shared_app(grid: TileGrid) -> SharedApp {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(KinematicsPlugin::default())
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(grid);
    Arc::new(Mutex::new(HeadlessApp(app)))
}

/// Locks the shared app, recovering from a poisoned mutex.
pub fn lock_app(app: &SharedApp) -> MutexGuard<'_, HeadlessApp> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs an rspec suite on a single thread.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    Runner::new(config, vec![logger]).run(suite);
}
