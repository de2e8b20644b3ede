//! Combat plugin: the damage resolution protocol shared by players, enemies and projectiles.
//!
//! # Data flow
//! ```text
//!   FixedUpdate (before the physics step)
//!┌──────────────────────────────────────────────────────────────────────────┐
//!│  apply_knockback_follow_ups   vertical bounce armed by last tick's hit   │
//!│  tick_invulnerability         close windows, restore pre-hit tint        │
//!└──────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate (after Avian wrote collision messages)
//!┌──────────────────────────────────────────────────────────────────────────┐
//!│  sense_contacts               Contacts { grounded, touching_* }          │
//!│  detect_contact_hits ───┐                                                │
//!│  projectile collisions ─┴──>  HitRequest { source, target, damage }      │
//!│  resolve_hits                 Health, bar, window, knockback, terminal   │
//!│                               (lethal player hit -> GameSignal)          │
//!└──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Health and the invulnerability window belong to their entity; `resolve_hits` is the
//! only system outside the owner that mutates them, one request at a time.

pub mod components;
pub mod contacts;
pub mod messages;
pub mod resolve;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::projectiles::collision::process_projectile_collisions;

pub use components::{Contacts, Damage, Health, Invulnerability, Knockback};
pub use messages::HitRequest;

pub fn plugin(app: &mut App) {
    app.add_message::<HitRequest>();

    app.add_systems(
        FixedUpdate,
        (resolve::apply_knockback_follow_ups, resolve::tick_invulnerability)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        (
            contacts::sense_contacts.after(CollisionEventSystems),
            contacts::detect_contact_hits.after(contacts::sense_contacts),
            resolve::resolve_hits
                .after(contacts::detect_contact_hits)
                .after(process_projectile_collisions),
        )
            .run_if(in_state(GameState::InGame)),
    );
}
