//! Event bus for coarse game-state signals.
//!
//! `GameSignal` is a plain Bevy message: the plugin registers the queue once (session
//! start), any system may write or read it, and `drain_game_signals` empties it when
//! the session leaves `GameState::InGame`. Subscribers are systems, so their
//! registration is fixed at app build time rather than ambient mutable state.

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::{Defeated, Player};

/// Payload-free win/lose signal.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSignal {
    PlayerWin,
    PlayerLose,
}

impl GameSignal {
    pub fn name(self) -> &'static str {
        match self {
            Self::PlayerWin => "PLAYER_WIN",
            Self::PlayerLose => "PLAYER_LOSE",
        }
    }

    fn outcome(self) -> GameState {
        match self {
            Self::PlayerWin => GameState::Won,
            Self::PlayerLose => GameState::Lost,
        }
    }
}

/// End-of-level trigger. A player overlapping it wins.
#[derive(Component, Debug, Clone, Copy)]
pub struct LevelGoal;

pub fn plugin(app: &mut App) {
    app.add_message::<GameSignal>();

    app.add_systems(
        FixedPostUpdate,
        (
            detect_goal_reached,
            route_game_signals
                .after(detect_goal_reached)
                .after(crate::plugins::combat::resolve::resolve_hits),
        )
            .run_if(in_state(GameState::InGame)),
    );

    // Player control runs in FixedUpdate and may publish too.
    app.add_systems(OnExit(GameState::InGame), drain_game_signals);
}

/// Move the session to its outcome. The first signal read wins; later ones are dropped.
pub fn route_game_signals(
    mut signals: MessageReader<GameSignal>,
    mut next: ResMut<NextState<GameState>>,
) {
    let mut first = None;
    for signal in signals.read() {
        first.get_or_insert(*signal);
    }

    let Some(signal) = first else {
        return;
    };
    info!("{}", signal.name());
    next.set(signal.outcome());
}

/// A non-defeated player touching the goal wins the level.
pub fn detect_goal_reached(
    mut signals: MessageWriter<GameSignal>,
    q_players: Query<&CollidingEntities, (With<Player>, Without<Defeated>)>,
    q_goals: Query<(), With<LevelGoal>>,
) {
    for colliding in &q_players {
        if colliding.iter().any(|e| q_goals.contains(*e)) {
            signals.write(GameSignal::PlayerWin);
        }
    }
}

/// Session end: drop anything still queued so nothing leaks into the next session.
pub fn drain_game_signals(mut messages: ResMut<Messages<GameSignal>>) {
    messages.clear();
}
