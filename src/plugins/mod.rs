//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod combat;
pub mod core;
pub mod enemies;
pub mod hud;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod signals;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    signals::plugin(app);
    combat::plugin(app);
    world::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    hud::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}
