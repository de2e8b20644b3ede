//! Contact sensing and contact damage.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Contacts, Damage, Invulnerability};
use super::messages::HitRequest;
use crate::plugins::enemies::{Enemy, EnemyLifeState};
use crate::plugins::player::{Defeated, Player};

/// Rebuild `Contacts` from the contact manifolds of the last physics step.
///
/// Manifold normals point from `collider1` to `collider2`; we flip them so they always
/// point away from the entity being sensed.
pub fn sense_contacts(collisions: Collisions, mut q: Query<(Entity, &mut Contacts)>) {
    for (e, mut contacts) in &mut q {
        let mut next = Contacts::default();

        for pair in collisions.collisions_with(e) {
            if !pair.is_touching() {
                continue;
            }
            for manifold in &pair.manifolds {
                let normal = if pair.collider1 == e { manifold.normal } else { -manifold.normal };
                next.record_normal(normal);
            }
        }

        contacts.set_if_neq(next);
    }
}

/// Alive enemies touching the player deliver their damage every tick.
///
/// Repeats while the contact persists; the invulnerability window turns them into
/// no-ops, and once it closes a lingering contact hurts again.
pub fn detect_contact_hits(
    mut hits: MessageWriter<HitRequest>,
    q_players: Query<
        (Entity, &CollidingEntities, Option<&Invulnerability>),
        (With<Player>, Without<Defeated>),
    >,
    q_enemies: Query<(&Damage, &EnemyLifeState), With<Enemy>>,
) {
    for (player, colliding, invulnerability) in &q_players {
        if invulnerability.is_some_and(Invulnerability::is_active) {
            continue;
        }

        for &other in colliding.iter() {
            let Ok((damage, life)) = q_enemies.get(other) else {
                continue;
            };
            if !matches!(life, EnemyLifeState::Alive) {
                continue;
            }

            hits.write(HitRequest { source: other, target: player, damage: damage.0 });
        }
    }
}
