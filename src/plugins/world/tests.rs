use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::{Enemy, PatrolSensor};
use crate::plugins::hud::{HealthBar, HealthBarLink};
use crate::plugins::player::Player;
use crate::plugins::signals::LevelGoal;

#[test]
fn spawns_platforms_markers_and_goal() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let solid = world
        .query::<(&RigidBody, &CollisionLayers)>()
        .iter(&world)
        .filter(|(rb, layers)| matches!(**rb, RigidBody::Static) && layers.memberships.has_all(Layer::World))
        .count();
    assert_eq!(solid, 4);

    let markers = world
        .query::<&CollisionLayers>()
        .iter(&world)
        .filter(|layers| layers.memberships.has_all(Layer::PatrolBoundary))
        .count();
    assert_eq!(markers, 8);

    // Markers collide with nothing.
    for layers in world.query::<&CollisionLayers>().iter(&world) {
        if layers.memberships.has_all(Layer::PatrolBoundary) {
            assert_eq!(layers.filters, LayerMask::NONE);
        }
    }

    assert_eq!(world.query::<&LevelGoal>().iter(&world).count(), 1);
}

#[test]
fn spawns_one_player_with_bar_and_patrolling_enemies() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::spawn_actors);

    let link = *world
        .query_filtered::<&HealthBarLink, With<Player>>()
        .single(&world)
        .expect("exactly one player");
    let bar = world.get::<HealthBar>(link.0).expect("bar exists");
    assert_eq!(bar.value, 100);

    let sensors: Vec<_> = world
        .query_filtered::<&PatrolSensor, With<Enemy>>()
        .iter(&world)
        .map(|s| s.surface())
        .collect();
    assert_eq!(sensors.len(), 4);
    assert!(sensors.iter().all(|s| *s == Some(LayerMask::from(Layer::PatrolBoundary))));
}
