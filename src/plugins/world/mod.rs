//! World plugin: a small sample arena.
//!
//! Level construction proper belongs to level tooling; this arena exists so the game
//! is playable and exercises the public spawn functions. Everything is asset-free.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::enemies::spawn_enemy;
use crate::plugins::player::spawn_player;
use crate::plugins::signals::LevelGoal;

/// Solid ground pieces: (name, centre, size).
const PLATFORMS: [(&str, Vec2, Vec2); 4] = [
    ("GroundLeft", Vec2::new(-450.0, -200.0), Vec2::new(700.0, 40.0)),
    ("GroundRight", Vec2::new(450.0, -200.0), Vec2::new(700.0, 40.0)),
    ("LedgeLeft", Vec2::new(-300.0, -60.0), Vec2::new(300.0, 20.0)),
    ("LedgeRight", Vec2::new(300.0, 40.0), Vec2::new(260.0, 20.0)),
];

const MARKER_SIZE: Vec2 = Vec2::new(8.0, 32.0);

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_actors));
}

fn spawn_arena(mut commands: Commands) {
    let ground_color = Color::srgb(0.25, 0.27, 0.33);
    let ground_layers = CollisionLayers::new(
        Layer::World,
        [Layer::Player, Layer::Enemy, Layer::PlayerProjectile],
    );

    for (name, centre, size) in PLATFORMS {
        commands.spawn((
            Name::new(name),
            Sprite::from_color(ground_color, size),
            Transform::from_translation(centre.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ground_layers,
            DespawnOnExit(GameState::InGame),
        ));

        // Turn markers on both edges, sitting on the platform top.
        let top = centre.y + size.y * 0.5;
        for edge in [centre.x - size.x * 0.5, centre.x + size.x * 0.5] {
            commands.spawn((
                Name::new("PatrolMarker"),
                Transform::from_xyz(edge, top + MARKER_SIZE.y * 0.25, 0.0),
                RigidBody::Static,
                Collider::rectangle(MARKER_SIZE.x, MARKER_SIZE.y),
                // Member of PatrolBoundary, collides with nothing: only rays see it.
                CollisionLayers::new(Layer::PatrolBoundary, LayerMask::NONE),
                DespawnOnExit(GameState::InGame),
            ));
        }
    }

    commands.spawn((
        Name::new("Goal"),
        LevelGoal,
        Sprite::from_color(Color::srgb(0.95, 0.8, 0.2), Vec2::new(30.0, 60.0)),
        Transform::from_xyz(760.0, -150.0, 0.5),
        RigidBody::Static,
        Collider::rectangle(30.0, 60.0),
        Sensor,
        CollisionLayers::new(Layer::Goal, [Layer::Player]),
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_actors(mut commands: Commands, tunables: Res<Tunables>) {
    spawn_player(&mut commands, &tunables, Vec2::new(-700.0, -150.0));

    let surface = Some(LayerMask::from(Layer::PatrolBoundary));
    for at in [
        Vec2::new(-450.0, -150.0),
        Vec2::new(450.0, -150.0),
        Vec2::new(-300.0, -20.0),
        Vec2::new(300.0, 80.0),
    ] {
        spawn_enemy(&mut commands, &tunables, at, surface);
    }
}

#[cfg(test)]
mod tests;
