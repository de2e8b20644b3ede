//! Physics plugin: Avian with the game's scale and gravity.
//!
//! `pixels_per_meter` only matters when the plugins are built, so it is read once from
//! the `Tunables` present at that point. Gravity follows the resource: replacing or
//! editing `Tunables` later updates `Gravity` on the next frame.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let tunables = app.world().resource::<Tunables>().clone();
    app.add_plugins(PhysicsPlugins::default().with_length_unit(tunables.pixels_per_meter));
    app.insert_resource(Gravity(Vec2::NEG_Y * tunables.gravity));
    app.add_systems(PreUpdate, sync_gravity.run_if(resource_changed::<Tunables>));
}

pub fn sync_gravity(tunables: Res<Tunables>, mut gravity: ResMut<Gravity>) {
    gravity.0 = Vec2::NEG_Y * tunables.gravity;
}

#[cfg(test)]
mod tests;
