use bevy::prelude::*;

/// One side delivers a hit, the other takes it.
///
/// Producers (contact detection, projectile collisions) capture `damage` from the
/// source's `Damage` at the moment of contact, so the source may already be retired
/// by the time the request is resolved.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitRequest {
    pub source: Entity,
    pub target: Entity,
    pub damage: i32,
}
