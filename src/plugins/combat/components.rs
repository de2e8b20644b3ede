use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

/// Hit points. Purely data: no timers, no presentation.
///
/// `hp` may go negative internally; anything displayed is clamped at zero.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { hp: max, max }
    }

    #[inline]
    pub fn decrease(&mut self, amount: i32) {
        self.hp -= amount;
    }

    /// Heal, never past `max`.
    #[inline]
    pub fn increase(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// Damage delivered when this entity is the source of a hit.
///
/// Combat participants require it, so an entity that never set a value deals 0.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Damage(pub i32);

/// The invulnerability window opened by a non-lethal hit.
///
/// Always present on entities that have a window; opening and closing only mutates
/// values, so a second hit in the same batch already sees the window as open.
#[derive(Component, Debug, Clone)]
pub struct Invulnerability {
    window: Duration,
    timer: Option<Timer>,
    restore_tint: Option<Color>,
}

/// Emitted by [`Invulnerability::tick`] on the tick the window closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowClosed {
    pub restore_tint: Option<Color>,
}

impl Invulnerability {
    pub fn new(window: Duration) -> Self {
        Self { window, timer: None, restore_tint: None }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.timer.as_ref().map(Timer::remaining)
    }

    /// Open the window, remembering the tint to restore. Returns `false` if already open.
    pub fn open(&mut self, restore_tint: Option<Color>) -> bool {
        if self.is_active() {
            return false;
        }
        self.timer = Some(Timer::new(self.window, TimerMode::Once));
        self.restore_tint = restore_tint;
        true
    }

    /// Advance the window. Returns `Some` exactly once, when it closes.
    pub fn tick(&mut self, delta: Duration) -> Option<WindowClosed> {
        let timer = self.timer.as_mut()?;
        timer.tick(delta);
        if !timer.is_finished() {
            return None;
        }
        self.timer = None;
        Some(WindowClosed { restore_tint: self.restore_tint.take() })
    }
}

/// Knockback applied to a surviving target.
///
/// The horizontal push is immediate; the vertical bounce is a follow-up applied at the
/// start of the next fixed tick, after the physics step has settled contacts.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Knockback {
    pub bounce_velocity: f32,
    pending_vertical: bool,
}

impl Knockback {
    pub fn new(bounce_velocity: f32) -> Self {
        Self { bounce_velocity, pending_vertical: false }
    }

    /// Phase one: push away horizontally (`direction` is -1 or +1), arm phase two.
    pub fn launch(&mut self, velocity: &mut LinearVelocity, direction: f32) {
        velocity.x = direction * self.bounce_velocity;
        self.pending_vertical = true;
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending_vertical
    }

    /// Phase two: the upward velocity to apply, once.
    pub fn take_follow_up(&mut self) -> Option<f32> {
        std::mem::take(&mut self.pending_vertical).then_some(self.bounce_velocity)
    }
}

/// Contact flags as reported by the physics step.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub grounded: bool,
    pub touching_left: bool,
    pub touching_right: bool,
}

impl Contacts {
    /// Threshold on the normal component for a contact to count as floor or wall.
    const AXIS_DOT: f32 = 0.7;

    /// Record one contact whose normal points from this body towards the other one.
    pub fn record_normal(&mut self, normal: Vec2) {
        if normal.y < -Self::AXIS_DOT {
            self.grounded = true;
        }
        if normal.x > Self::AXIS_DOT {
            self.touching_right = true;
        } else if normal.x < -Self::AXIS_DOT {
            self.touching_left = true;
        }
    }
}

/// Horizontal knockback direction: a target hit from its right side is pushed left.
///
/// Only the source's position decides; terrain the target happens to touch does not.
/// Without both positions the push goes right.
#[inline]
pub fn knockback_direction(target_x: Option<f32>, source_x: Option<f32>) -> f32 {
    match (target_x, source_x) {
        (Some(target), Some(source)) if source > target => -1.0,
        _ => 1.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Target was invulnerable or already dead. Nothing changed.
    Ignored,
    Survived,
    Lethal,
}

/// Apply `damage` to `health` unless guarded.
pub fn apply_hit(
    health: &mut Health,
    invulnerability: Option<&Invulnerability>,
    damage: i32,
) -> HitOutcome {
    if health.is_dead() || invulnerability.is_some_and(Invulnerability::is_active) {
        return HitOutcome::Ignored;
    }

    health.decrease(damage);
    if health.is_dead() { HitOutcome::Lethal } else { HitOutcome::Survived }
}
