//! Projectiles plugin: **message-based producer → consumer** spawning.
//!
//! # Data flow (big picture)
//! ```text
//!   FixedUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: player::apply_player_control                                │
//!│      - reads: fire edge, player Transform + Facing                         │
//!│      - writes: ProjectileRequest message (via fire_projectile)             │
//!│                                                                            │
//!│  (B) Consumer: spawn_requested_projectiles                                 │
//!│      - reads: ProjectileRequest messages                                   │
//!│      - spawns: kinematic sensor body with Projectile + Damage              │
//!│                                                                            │
//!│  (C) retire_spent_projectiles                                              │
//!│      - marks PendingDespawn once |x - origin.x| >= max_travel              │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (D) Physics advances projectiles and emits CollisionStart (Avian)         │
//!│                                                                            │
//!│  (E) process_projectile_collisions                                         │
//!│      - terrain: retire                                                     │
//!│      - enemy with Health: HitRequest { source: projectile },               │
//!│        ImpactEffect { at }, retire                                         │
//!│      - dedupe: one outcome per projectile per frame                        │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   PostUpdate: core::despawn_pending removes retired projectiles
//! ```
//!
//! Producers never spawn entities themselves; they only enqueue intent.

pub mod collision;
pub mod components;
pub mod messages;
pub mod spawn;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::apply_player_control;

pub use components::Projectile;
pub use messages::{fire_projectile, ImpactEffect, ProjectileRequest};

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ProjectileRequest>();
        app.add_message::<ImpactEffect>();

        app.add_systems(
            FixedUpdate,
            (
                spawn::spawn_requested_projectiles.after(apply_player_control),
                spawn::retire_spent_projectiles,
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            collision::process_projectile_collisions
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
    }
}

#[cfg(test)]
mod tests;
