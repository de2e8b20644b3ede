//! Core plugin: shared resources, global settings and deferred despawning.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

/// Marker: entity should be removed from the world.
///
/// Gameplay systems never despawn inside the fixed step; they mark and the despawn
/// happens once in `PostUpdate`. Queries that drive behaviour filter
/// `Without<PendingDespawn>`, so a marked entity stops updating immediately.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Audio cues requested by gameplay. Playback is done elsewhere.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
}

pub fn plugin(app: &mut App) {
    // `init_resource` keeps a Tunables inserted by the embedder or a test.
    app.init_resource::<Tunables>();
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
    app.add_message::<SoundCue>();
    app.add_systems(PostUpdate, despawn_pending);
}

/// Despawn entities marked for removal.
pub fn despawn_pending(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}

#[cfg(test)]
mod tests;
