use avian2d::prelude::*;
use bevy::prelude::*;

use super::sync_gravity;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;

#[test]
fn gravity_follows_tunables() {
    let mut world = World::new();
    world.insert_resource(Tunables { gravity: 120.0, ..default() });
    world.insert_resource(Gravity(Vec2::NEG_Y * 500.0));

    run_system_once(&mut world, sync_gravity);

    assert_eq!(world.resource::<Gravity>().0, Vec2::new(0.0, -120.0));
}
