mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use ledge_runner::common::state::GameState;
use ledge_runner::plugins::enemies::Enemy;
use ledge_runner::plugins::hud::HealthBarLink;
use ledge_runner::plugins::player::Player;
use ledge_runner::plugins::signals::LevelGoal;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();
    common::tick(&mut app, 3);

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);
}

#[test]
fn arena_is_populated_on_enter() {
    let mut app = common::app_headless();
    common::tick(&mut app, 2);

    let world = app.world_mut();

    let players = world
        .query_filtered::<&HealthBarLink, (With<Player>, With<TranslationInterpolation>)>()
        .iter(world)
        .count();
    assert_eq!(players, 1, "one player, smoothed and linked to its bar");

    assert_eq!(world.query::<&Enemy>().iter(world).count(), 4);
    assert_eq!(world.query::<&LevelGoal>().iter(world).count(), 1);
}
