//! Enemies plugin: patrolling walkers that hurt on contact and fall out of the world
//! once killed.
//!
//! ---------------------------
//! LIFECYCLE
//! ---------------------------
//! ```text
//!   spawn_enemy ──> Alive ──(lethal hit, combat::resolve_hits)──> Terminal
//!                     │                                              │
//!                     │ patrol + contact damage                      │ no collisions,
//!                     │                                              │ upward impulse, free fall
//!                     └──────────(bottom edge below enemy_cull_y)────┴──> PendingDespawn
//! ```
//!
//! - `EnemyLifeState` is gameplay truth. Terminal enemies keep their entity but stop
//!   patrolling and stop dealing contact damage.
//! - Leaving the playfield is cleanup, not death: `cull_fallen_enemies` marks the
//!   entity once; every behaviour query filters `Without<PendingDespawn>`, and the
//!   despawn itself happens later in `PostUpdate` (core plugin).

pub mod patrol;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{
    bounds::HalfExtents, facing::Facing, layers::Layer, state::GameState, tunables::Tunables,
};
use crate::plugins::combat::components::{Contacts, Damage, Health};
use crate::plugins::core::PendingDespawn;

pub use patrol::{Patrol, PatrolSensor};

/// Collider size of an enemy body.
pub const ENEMY_SIZE: Vec2 = Vec2::new(20.0, 45.0);

/// Enemies out-rank the player (dominance 0) in contacts: the player cannot shove them.
pub const ENEMY_DOMINANCE: i8 = 1;

#[derive(Component)]
#[require(Damage)]
pub struct Enemy;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyLifeState {
    Alive,
    /// Killed: collision disabled, free-falling until culled.
    Terminal,
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (
            cull_fallen_enemies,
            patrol::cast_patrol_sensors.after(cull_fallen_enemies),
            patrol::patrol.after(patrol::cast_patrol_sensors),
        )
            .run_if(in_state(GameState::InGame)),
    );
}

/// Spawn a patrolling enemy at `at`.
///
/// `platform_colliders` is the layer mask its sensor ray is cast against; `None` leaves
/// it patrolling on distance alone.
pub fn spawn_enemy(
    commands: &mut Commands,
    tunables: &Tunables,
    at: Vec2,
    platform_colliders: Option<LayerMask>,
) -> Entity {
    let mut sensor = PatrolSensor::from_tunables(tunables);
    sensor.set_platform_colliders(platform_colliders);

    let layers = CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player, Layer::PlayerProjectile]);

    commands
        .spawn((
            (
                Name::new("Enemy"),
                Enemy,
                Damage(tunables.enemy_damage),
                Health::new(tunables.enemy_health),
                EnemyLifeState::Alive,
                Patrol::new(
                    tunables.enemy_speed,
                    tunables.enemy_max_patrol_distance,
                    tunables.patrol_turn_cooldown,
                ),
                sensor,
                Facing::from_speed(tunables.enemy_speed),
                HalfExtents(ENEMY_SIZE * 0.5),
            ),
            Sprite {
                color: Color::srgb(0.9, 0.25, 0.25),
                custom_size: Some(ENEMY_SIZE),
                ..default()
            },
            Transform::from_translation(at.extend(1.0)),
            (
                RigidBody::Dynamic,
                Collider::rectangle(ENEMY_SIZE.x, ENEMY_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                Friction::ZERO,
                Dominance(ENEMY_DOMINANCE),
                layers,
                LinearVelocity(Vec2::X * tunables.enemy_speed),
                Contacts::default(),
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Mark enemies whose bottom edge dropped below the cull line. Runs once per enemy:
/// marked enemies no longer match.
pub fn cull_fallen_enemies(
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut q: Query<
        (Entity, &Transform, &HalfExtents, Option<&mut PatrolSensor>),
        (With<Enemy>, Without<PendingDespawn>),
    >,
) {
    for (e, tf, extents, sensor) in &mut q {
        if extents.bottom(tf) >= tunables.enemy_cull_y {
            continue;
        }

        if let Some(mut sensor) = sensor {
            sensor.clear();
        }
        commands.entity(e).insert(PendingDespawn);
        info!("enemy {e:?} left the playfield");
    }
}
