//! Spawn consumer and range limit.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::Projectile;
use super::messages::ProjectileRequest;
use crate::common::{layers::Layer, state::GameState};
use crate::plugins::combat::components::Damage;
use crate::plugins::core::PendingDespawn;

pub const PROJECTILE_RADIUS: f32 = 4.0;

#[inline]
pub fn projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerProjectile, [Layer::World, Layer::Enemy])
}

pub fn spawn_requested_projectiles(mut commands: Commands, mut reader: MessageReader<ProjectileRequest>) {
    for req in reader.read() {
        let e = commands
            .spawn((
                Name::new("Projectile"),
                Projectile { owner: req.owner, origin: req.pos, max_travel: req.max_travel },
                Damage(req.damage),
                Sprite {
                    color: Color::srgb(1.0, 0.85, 0.3),
                    custom_size: Some(Vec2::splat(PROJECTILE_RADIUS * 2.0)),
                    ..default()
                },
                Transform::from_translation(req.pos.extend(2.0)),
                // Kinematic: the physics step advances it by its velocity, gravity does not apply.
                RigidBody::Kinematic,
                Collider::circle(PROJECTILE_RADIUS),
                Sensor,
                projectile_layers(),
                LinearVelocity(req.vel),
                // Opt-in collision events: Avian only emits CollisionStart/End if one collider has this marker.
                CollisionEventsEnabled,
                DespawnOnExit(GameState::InGame),
            ))
            .id();
        debug!("projectile {e:?} fired by {:?}", req.owner);
    }
}

/// Retire projectiles that flew past their range.
pub fn retire_spent_projectiles(
    mut commands: Commands,
    q: Query<(Entity, &Transform, &Projectile), Without<PendingDespawn>>,
) {
    for (e, tf, projectile) in &q {
        if projectile.is_spent(tf.translation.truncate()) {
            commands.entity(e).insert(PendingDespawn);
        }
    }
}
