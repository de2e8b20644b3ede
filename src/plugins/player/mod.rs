//! Player plugin.
//!
//! Pipeline:
//! - Update: sample keyboard, write `PlayerIntent` (edges are latched until consumed)
//! - FixedUpdate: consume intent, issue velocity commands, pick the animation clip
//!
//! Input edges are latched because `FixedUpdate` may run zero or several times per
//! frame: a press sampled in `Update` must be seen by exactly one fixed tick.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{
    anim::AnimationClip, bounds::HalfExtents, facing::Facing, layers::Layer, state::GameState,
    tunables::Tunables,
};
use crate::plugins::combat::components::{Contacts, Damage, Health, Invulnerability, Knockback};
use crate::plugins::combat::resolve::{apply_knockback_follow_ups, tick_invulnerability};
use crate::plugins::core::SoundCue;
use crate::plugins::hud::{self, HealthBarLink};
use crate::plugins::projectiles::{fire_projectile, ProjectileRequest};
use crate::plugins::signals::GameSignal;

/// Collider size of the player body.
pub const PLAYER_SIZE: Vec2 = Vec2::new(20.0, 37.0);

#[derive(Component)]
#[require(Damage)]
pub struct Player;

/// The player lost: no further control updates, contact damage or goal checks.
#[derive(Component, Debug, Clone, Copy)]
pub struct Defeated;

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct JumpState {
    pub jump_count: u32,
    pub consecutive_jumps: u32,
}

impl JumpState {
    pub fn new(consecutive_jumps: u32) -> Self {
        Self { jump_count: 0, consecutive_jumps }
    }

    #[inline]
    pub fn can_jump(&self, grounded: bool) -> bool {
        grounded || self.jump_count < self.consecutive_jumps
    }
}

#[derive(Resource, Default, Debug)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    /// Rising edge of the jump key, latched until a fixed tick consumes it.
    pub jump_pressed: bool,
    /// Rising edge of the fire key, latched until a fixed tick consumes it.
    pub fire_pressed: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Edges {
    jump: bool,
    fire: bool,
}

impl PlayerIntent {
    /// Left wins when both directions are held.
    pub fn horizontal(&self) -> Option<Facing> {
        if self.left {
            Some(Facing::Left)
        } else if self.right {
            Some(Facing::Right)
        } else {
            None
        }
    }

    fn take_edges(&mut self) -> Edges {
        Edges {
            jump: std::mem::take(&mut self.jump_pressed),
            fire: std::mem::take(&mut self.fire_pressed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAnim {
    Idle,
    Run,
    Jump,
}

impl PlayerAnim {
    pub fn clip(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Run => "run",
            Self::Jump => "jump",
        }
    }

    pub fn looping(self) -> bool {
        !matches!(self, Self::Jump)
    }
}

/// Animation as a pure function of contact and horizontal speed.
pub fn select_animation(grounded: bool, vx: f32) -> PlayerAnim {
    match (grounded, vx != 0.0) {
        (true, true) => PlayerAnim::Run,
        (true, false) => PlayerAnim::Idle,
        (false, _) => PlayerAnim::Jump,
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerIntent>()
        .add_systems(Update, gather_input)
        .add_systems(
            FixedUpdate,
            apply_player_control
                .after(tick_invulnerability)
                .after(apply_knockback_follow_ups)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the player and its health bar at `at`.
pub fn spawn_player(commands: &mut Commands, tunables: &Tunables, at: Vec2) -> Entity {
    let bar = hud::spawn_health_bar(commands, tunables.player_health);

    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy, Layer::Goal]);

    commands
        .spawn((
            (
                Name::new("Player"),
                Player,
                Sprite {
                    color: Color::srgb(0.2, 0.75, 0.9),
                    custom_size: Some(PLAYER_SIZE),
                    ..default()
                },
                Transform::from_translation(at.extend(1.0)),
                Facing::Right,
                AnimationClip::default(),
                HalfExtents(PLAYER_SIZE * 0.5),
            ),
            (
                Health::new(tunables.player_health),
                Invulnerability::new(tunables.invulnerability),
                Knockback::new(tunables.player_bounce_velocity),
                JumpState::new(tunables.player_consecutive_jumps),
                HealthBarLink(bar),
            ),
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                Friction::ZERO,
                layers,
                LinearVelocity::ZERO,
                CollidingEntities::default(),
                Contacts::default(),
                TranslationInterpolation,
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut intent: ResMut<PlayerIntent>) {
    let Some(keys) = keys else {
        return;
    };

    intent.left = keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]);
    intent.right = keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]);
    intent.jump_pressed |= keys.just_pressed(KeyCode::Space);
    intent.fire_pressed |= keys.just_pressed(KeyCode::KeyQ);
}

/// One fixed tick of player control.
///
/// Skipped entirely while the invulnerability window is open, after defeat, or when
/// the physics binding is gone (query does not match).
pub fn apply_player_control(
    tunables: Res<Tunables>,
    mut intent: ResMut<PlayerIntent>,
    mut commands: Commands,
    mut signals: MessageWriter<GameSignal>,
    mut sounds: MessageWriter<SoundCue>,
    mut projectiles: MessageWriter<ProjectileRequest>,
    mut q_player: Query<
        (
            Entity,
            &Transform,
            &HalfExtents,
            &Contacts,
            Option<&Invulnerability>,
            &mut LinearVelocity,
            &mut JumpState,
            &mut Facing,
            &mut AnimationClip,
            Option<&mut Sprite>,
        ),
        (With<Player>, Without<Defeated>),
    >,
) {
    // Edges are consumed even when the tick is skipped: presses made while stunned are dropped.
    let edges = intent.take_edges();

    let Ok((player, tf, extents, contacts, invulnerability, mut velocity, mut jumps, mut facing, mut clip, mut sprite)) =
        q_player.single_mut()
    else {
        return;
    };

    if invulnerability.is_some_and(Invulnerability::is_active) {
        return;
    }

    if extents.top(tf) < tunables.playfield_bottom {
        info!("player {player:?} fell out of the playfield");
        commands.entity(player).insert(Defeated);
        signals.write(GameSignal::PlayerLose);
        return;
    }

    match intent.horizontal() {
        Some(dir) => {
            velocity.x = dir.sign() * tunables.player_speed;
            *facing = dir;
            if let Some(sprite) = sprite.as_mut() {
                sprite.flip_x = dir.flip_x();
            }
        }
        None => velocity.x = 0.0,
    }

    let grounded = contacts.grounded;
    if edges.jump && jumps.can_jump(grounded) {
        sounds.write(SoundCue::Jump);
        velocity.y = tunables.player_speed * 2.0;
        jumps.jump_count += 1;
    }
    if grounded {
        jumps.jump_count = 0;
    }

    let anim = select_animation(grounded, velocity.x);
    clip.play(anim.clip(), anim.looping());

    if edges.fire {
        clip.play(PlayerAnim::Idle.clip(), PlayerAnim::Idle.looping());
        projectiles.write(fire_projectile(player, tf.translation.truncate(), *facing, &tunables));
    }
}
