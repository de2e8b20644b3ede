//! Projectiles plugin tests, **deterministic**.
//!
//! These tests avoid relying on the full physics pipeline to generate collisions.
//! Instead, they **inject `CollisionStart` messages directly** and then run the
//! projectile collision system once.
use avian2d::prelude::*;
use bevy::{ecs::message::Messages, prelude::*};

use super::{collision, components::Projectile, messages::*, spawn};
use crate::common::facing::Facing;
use crate::common::layers::Layer;
use crate::common::test_utils::{drain_messages, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::combat::components::{Damage, Health};
use crate::plugins::combat::messages::HitRequest;
use crate::plugins::core::PendingDespawn;

// --------------------------------------------------------------------------------------
// Helpers
// --------------------------------------------------------------------------------------

fn projectile_world() -> World {
    let mut world = World::new();
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Messages<HitRequest>>();
    world.init_resource::<Messages<ProjectileRequest>>();
    world.init_resource::<Messages<ImpactEffect>>();
    world
}

fn write_collision_start(world: &mut World, collider1: Entity, collider2: Entity) {
    world.write_message(CollisionStart { collider1, collider2, body1: None, body2: None });
}

fn spawn_flying(world: &mut World, owner: Entity, damage: i32) -> Entity {
    world
        .spawn((
            Projectile { owner, origin: Vec2::ZERO, max_travel: 300.0 },
            Damage(damage),
            Transform::default(),
            spawn::projectile_layers(),
        ))
        .id()
}

fn spawn_terrain(world: &mut World) -> Entity {
    world.spawn(CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy])).id()
}

fn spawn_enemy_target(world: &mut World, hp: i32) -> Entity {
    world
        .spawn((Health::new(hp), CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::PlayerProjectile])))
        .id()
}

fn is_retired(world: &World, e: Entity) -> bool {
    world.get::<PendingDespawn>(e).is_some()
}

// --------------------------------------------------------------------------------------
// Requests and spawning
// --------------------------------------------------------------------------------------

#[test]
fn fire_projectile_starts_ahead_of_owner_and_flies_horizontally() {
    let tunables = Tunables::default();
    let owner = Entity::PLACEHOLDER;
    let origin = Vec2::new(10.0, 5.0);

    let right = fire_projectile(owner, origin, Facing::Right, &tunables);
    assert_eq!(right.pos, origin + Vec2::X * tunables.projectile_spawn_offset);
    assert_eq!(right.vel, Vec2::new(tunables.projectile_speed, 0.0));
    assert_eq!(right.damage, tunables.projectile_damage);

    let left = fire_projectile(owner, origin, Facing::Left, &tunables);
    assert_eq!(left.pos, origin - Vec2::X * tunables.projectile_spawn_offset);
    assert_eq!(left.vel, Vec2::new(-tunables.projectile_speed, 0.0));
}

#[test]
fn spawn_consumes_requests_into_kinematic_sensors() {
    let mut world = projectile_world();
    let owner = world.spawn_empty().id();
    world.write_message(ProjectileRequest {
        owner,
        pos: Vec2::new(18.0, 0.0),
        vel: Vec2::new(300.0, 0.0),
        damage: 10,
        max_travel: 300.0,
    });

    run_system_once(&mut world, spawn::spawn_requested_projectiles);

    let mut q = world.query::<(&Projectile, &Damage, &Transform, &LinearVelocity, &RigidBody, &CollisionLayers)>();
    let spawned: Vec<_> = q.iter(&world).collect();
    assert_eq!(spawned.len(), 1);

    let (projectile, damage, tf, vel, body, layers) = spawned[0];
    assert_eq!(projectile.owner, owner);
    assert_eq!(projectile.origin, Vec2::new(18.0, 0.0));
    assert_eq!(damage.0, 10);
    assert_eq!(tf.translation.truncate(), Vec2::new(18.0, 0.0));
    assert_eq!(vel.0, Vec2::new(300.0, 0.0));
    assert_eq!(*body, RigidBody::Kinematic);
    assert!(layers.memberships.has_all(Layer::PlayerProjectile));
    assert!(layers.filters.has_all(Layer::Enemy));
    assert!(!layers.filters.has_all(Layer::Player));
}

#[test]
fn projectiles_retire_once_past_their_range() {
    let mut world = projectile_world();
    let owner = world.spawn_empty().id();
    let p = spawn_flying(&mut world, owner, 10);

    world.get_mut::<Transform>(p).unwrap().translation.x = -299.0;
    run_system_once(&mut world, spawn::retire_spent_projectiles);
    assert!(!is_retired(&world, p));

    world.get_mut::<Transform>(p).unwrap().translation.x = -300.0;
    run_system_once(&mut world, spawn::retire_spent_projectiles);
    assert!(is_retired(&world, p));
}

// --------------------------------------------------------------------------------------
// Collision handling (injected CollisionStart)
// --------------------------------------------------------------------------------------

#[test]
fn terrain_retires_without_hit() {
    let mut world = projectile_world();
    let owner = world.spawn_empty().id();
    let p = spawn_flying(&mut world, owner, 10);
    let wall = spawn_terrain(&mut world);

    write_collision_start(&mut world, wall, p);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert!(is_retired(&world, p));
    assert!(drain_messages::<HitRequest>(&mut world).is_empty());
    assert!(drain_messages::<ImpactEffect>(&mut world).is_empty());
}

#[test]
fn enemy_contact_requests_hit_and_retires() {
    let mut world = projectile_world();
    let owner = world.spawn_empty().id();
    let p = spawn_flying(&mut world, owner, 10);
    let enemy = spawn_enemy_target(&mut world, 20);

    world.get_mut::<Transform>(p).unwrap().translation = Vec3::new(140.0, -20.0, 2.0);

    write_collision_start(&mut world, p, enemy);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert!(is_retired(&world, p));
    assert_eq!(
        drain_messages::<HitRequest>(&mut world),
        vec![HitRequest { source: p, target: enemy, damage: 10 }]
    );
    assert_eq!(
        drain_messages::<ImpactEffect>(&mut world),
        vec![ImpactEffect { at: Vec2::new(140.0, -20.0) }]
    );
}

#[test]
fn one_outcome_per_projectile_per_frame() {
    let mut world = projectile_world();
    let owner = world.spawn_empty().id();
    let p = spawn_flying(&mut world, owner, 10);
    let a = spawn_enemy_target(&mut world, 20);
    let b = spawn_enemy_target(&mut world, 20);

    write_collision_start(&mut world, p, a);
    write_collision_start(&mut world, b, p);
    run_system_once(&mut world, collision::process_projectile_collisions);

    let hits = drain_messages::<HitRequest>(&mut world);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target, a);
}

#[test]
fn unrelated_layers_let_the_projectile_through() {
    let mut world = projectile_world();
    let owner = world.spawn_empty().id();
    let p = spawn_flying(&mut world, owner, 10);
    let marker = world.spawn(CollisionLayers::new(Layer::PatrolBoundary, LayerMask::NONE)).id();
    let enemy = spawn_enemy_target(&mut world, 20);

    // Passing a marker does not consume the projectile's outcome for this frame.
    write_collision_start(&mut world, p, marker);
    write_collision_start(&mut world, p, enemy);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert!(is_retired(&world, p));
    assert_eq!(drain_messages::<HitRequest>(&mut world).len(), 1);
}

#[test]
fn events_without_exactly_one_projectile_are_ignored() {
    let mut world = projectile_world();
    let owner = world.spawn_empty().id();
    let p1 = spawn_flying(&mut world, owner, 10);
    let p2 = spawn_flying(&mut world, owner, 10);
    let wall = spawn_terrain(&mut world);
    let enemy = spawn_enemy_target(&mut world, 20);

    write_collision_start(&mut world, p1, p2);
    write_collision_start(&mut world, wall, enemy);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert!(!is_retired(&world, p1));
    assert!(!is_retired(&world, p2));
    assert!(drain_messages::<HitRequest>(&mut world).is_empty());
}

#[test]
fn enemy_without_health_still_retires_the_projectile() {
    let mut world = projectile_world();
    let owner = world.spawn_empty().id();
    let p = spawn_flying(&mut world, owner, 10);
    let husk = world.spawn(CollisionLayers::new(Layer::Enemy, [Layer::PlayerProjectile])).id();

    write_collision_start(&mut world, husk, p);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert!(is_retired(&world, p));
    assert!(drain_messages::<HitRequest>(&mut world).is_empty());
}

#[test]
fn retired_projectiles_are_not_processed_again() {
    let mut world = projectile_world();
    let owner = world.spawn_empty().id();
    let p = spawn_flying(&mut world, owner, 10);
    let enemy = spawn_enemy_target(&mut world, 20);
    world.entity_mut(p).insert(PendingDespawn);

    write_collision_start(&mut world, p, enemy);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert!(drain_messages::<HitRequest>(&mut world).is_empty());
}
