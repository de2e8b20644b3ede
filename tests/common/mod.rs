//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `ledge_runner::game::configure_headless` to install gameplay plugins.
//! - time advances by exactly one fixed step per `app.update()`.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

/// Default `Time<Fixed>` rate is 64 Hz.
pub const FIXED_STEP: Duration = Duration::from_micros(15_625);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FIXED_STEP));

    ledge_runner::game::configure_headless(&mut app);
    // `App::run` would do this; manual `update()` driving must finish plugin setup itself.
    app.finish();
    app.cleanup();
    app
}

pub fn tick(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
