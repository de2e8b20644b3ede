//! Hit resolution and the timed effects it schedules.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{apply_hit, knockback_direction, Health, HitOutcome, Invulnerability, Knockback};
use super::messages::HitRequest;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::EnemyLifeState;
use crate::plugins::hud::{HealthBar, HealthBarLink};
use crate::plugins::player::{Defeated, Player};
use crate::plugins::signals::GameSignal;

/// Tint of an enemy that has been killed and is falling out of the world.
pub const TERMINAL_TINT: Color = Color::srgb(1.0, 0.0, 0.0);

/// Consumer: resolve every pending hit, in order, atomically per hit.
///
/// Ordering inside one hit: health, then health bar, then (lethal player hits only)
/// the lose signal, so listeners always observe the final health.
pub fn resolve_hits(
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut hits: MessageReader<HitRequest>,
    mut signals: MessageWriter<GameSignal>,
    mut q_targets: Query<(
        &mut Health,
        Option<&mut Invulnerability>,
        Option<&mut Knockback>,
        Option<&HealthBarLink>,
        Option<&mut LinearVelocity>,
        Option<&mut Sprite>,
        Option<&mut CollisionLayers>,
        Option<&mut EnemyLifeState>,
        Has<Player>,
    )>,
    mut q_bars: Query<&mut HealthBar>,
    q_positions: Query<&Transform>,
) {
    for hit in hits.read() {
        let Ok((
            mut health,
            mut invulnerability,
            mut knockback,
            bar,
            mut velocity,
            mut sprite,
            mut layers,
            mut life,
            is_player,
        )) = q_targets.get_mut(hit.target)
        else {
            debug!("hit {:?} -> {:?}: target has no health", hit.source, hit.target);
            continue;
        };

        match apply_hit(&mut health, invulnerability.as_deref(), hit.damage) {
            HitOutcome::Ignored => {
                debug!("hit {:?} -> {:?} ignored", hit.source, hit.target);
            }
            HitOutcome::Survived => {
                if let Some(window) = invulnerability.as_mut() {
                    window.open(sprite.as_ref().map(|s| s.color));
                    if let Some(sprite) = sprite.as_mut() {
                        sprite.color = tunables.damage_tint;
                    }
                }
                if let (Some(knockback), Some(velocity)) = (knockback.as_mut(), velocity.as_mut()) {
                    let target_x = q_positions.get(hit.target).ok().map(|tf| tf.translation.x);
                    let source_x = q_positions.get(hit.source).ok().map(|tf| tf.translation.x);
                    knockback.launch(velocity, knockback_direction(target_x, source_x));
                }
                sync_health_bar(bar, &mut q_bars, &health);
            }
            HitOutcome::Lethal => {
                sync_health_bar(bar, &mut q_bars, &health);

                if let Some(layers) = layers.as_mut() {
                    let memberships = layers.memberships;
                    **layers = CollisionLayers::new(memberships, LayerMask::NONE);
                }
                if let Some(velocity) = velocity.as_mut() {
                    velocity.0 = Vec2::Y * tunables.terminal_impulse;
                }

                if is_player {
                    commands.entity(hit.target).insert(Defeated);
                    info!("player {:?} defeated by {:?}", hit.target, hit.source);
                    signals.write(GameSignal::PlayerLose);
                } else if let Some(life) = life.as_mut() {
                    **life = EnemyLifeState::Terminal;
                    if let Some(sprite) = sprite.as_mut() {
                        sprite.color = TERMINAL_TINT;
                    }
                    info!("enemy {:?} terminated by {:?}", hit.target, hit.source);
                }
            }
        }
    }
}

fn sync_health_bar(link: Option<&HealthBarLink>, bars: &mut Query<&mut HealthBar>, health: &Health) {
    let Some(link) = link else {
        return;
    };
    if let Ok(mut bar) = bars.get_mut(link.0) {
        bar.decrease(health.hp);
    }
}

/// Close invulnerability windows whose time is up and restore the pre-hit tint.
pub fn tick_invulnerability(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut Invulnerability, Option<&mut Sprite>)>,
) {
    for (mut window, sprite) in &mut q {
        if !window.is_active() {
            continue;
        }
        let Some(closed) = window.tick(time.delta()) else {
            continue;
        };
        if let (Some(mut sprite), Some(tint)) = (sprite, closed.restore_tint) {
            sprite.color = tint;
        }
    }
}

/// Second phase of knockback: the upward bounce, one tick after the hit.
pub fn apply_knockback_follow_ups(mut q: Query<(&mut Knockback, &mut LinearVelocity)>) {
    for (mut knockback, mut velocity) in &mut q {
        if !knockback.is_pending() {
            continue;
        }
        if let Some(vy) = knockback.take_follow_up() {
            velocity.y = vy;
        }
    }
}
