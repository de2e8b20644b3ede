use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::components::Projectile;
use super::messages::ImpactEffect;
use crate::common::layers::Layer;
use crate::plugins::combat::components::{Damage, Health};
use crate::plugins::combat::messages::HitRequest;
use crate::plugins::core::PendingDespawn;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget { collider: ev.collider1, body: ev.body1 },
        CollisionTarget { collider: ev.collider2, body: ev.body2 },
    )
}

#[inline]
fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}

/// Projectiles are single-use: the first terrain or target contact retires them.
///
/// A target contact also produces a `HitRequest` with the projectile as source and an
/// `ImpactEffect` at the projectile's position; the projectile is retired whether or not
/// the hit ends up applying damage.
pub fn process_projectile_collisions(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut hits: MessageWriter<HitRequest>,
    mut effects: MessageWriter<ImpactEffect>,
    q_projectiles: Query<(&Damage, &Transform), (With<Projectile>, Without<PendingDespawn>)>,
    q_layers: Query<&CollisionLayers>,
    q_health: Query<(), With<Health>>,
    // Per-frame dedupe
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_projectiles.contains(t1.collider);
        let p2 = q_projectiles.contains(t2.collider);
        if !(p1 ^ p2) {
            continue; // must be exactly one projectile
        }
        let (projectile_side, other_side) = if p1 { (t1, t2) } else { (t2, t1) };

        // Deduplicate per projectile collider
        if !seen.insert(projectile_side.collider) {
            continue;
        }

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            seen.remove(&projectile_side.collider);
            continue;
        };
        let Ok((damage, tf)) = q_projectiles.get(projectile_side.collider) else {
            continue;
        };

        if is_in_layer(other_layers, Layer::World) {
            debug!("projectile {:?} hit terrain", projectile_side.collider);
            commands.entity(projectile_side.collider).insert(PendingDespawn);
            continue;
        }

        if is_in_layer(other_layers, Layer::Enemy) {
            let target = other_side.gameplay_owner();
            if q_health.contains(target) {
                hits.write(HitRequest {
                    source: projectile_side.collider,
                    target,
                    damage: damage.0,
                });
                effects.write(ImpactEffect { at: tf.translation.truncate() });
            }
            commands.entity(projectile_side.collider).insert(PendingDespawn);
            continue;
        }

        // Neither terrain nor a target: the projectile keeps flying.
        seen.remove(&projectile_side.collider);
    }
}
