use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
    assert!(app.world().get_resource::<Messages<core::SoundCue>>().is_some());
}

#[test]
fn keeps_pre_inserted_tunables() {
    let mut app = App::new();
    app.insert_resource(Tunables { player_speed: 1.0, ..default() });
    core::plugin(&mut app);
    assert_eq!(app.world().resource::<Tunables>().player_speed, 1.0);
}

#[test]
fn despawn_pending_removes_only_marked_entities() {
    let mut world = World::new();
    let marked = world.spawn(core::PendingDespawn).id();
    let kept = world.spawn(Name::new("kept")).id();

    run_system_once(&mut world, core::despawn_pending);

    assert!(world.get_entity(marked).is_err());
    assert!(world.get_entity(kept).is_ok());
}
