//! Buffered spawn requests.
//!
//! Producers (the player controller) create *intent*; the spawn consumer turns it into
//! an entity. This is a producer → queue → consumer pipeline.

use bevy::prelude::*;

use crate::common::facing::Facing;
use crate::common::tunables::Tunables;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ProjectileRequest {
    pub owner: Entity,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub max_travel: f32,
}

/// Build the request for `owner` firing from `origin` in its facing direction.
///
/// The projectile starts slightly ahead of the owner and travels purely horizontally.
pub fn fire_projectile(owner: Entity, origin: Vec2, facing: Facing, tunables: &Tunables) -> ProjectileRequest {
    let dir = Vec2::X * facing.sign();
    ProjectileRequest {
        owner,
        pos: origin + dir * tunables.projectile_spawn_offset,
        vel: dir * tunables.projectile_speed,
        damage: tunables.projectile_damage,
        max_travel: tunables.projectile_max_travel,
    }
}

/// Cosmetic hit flash requested where a projectile struck a target. Playback is done elsewhere.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ImpactEffect {
    pub at: Vec2,
}
