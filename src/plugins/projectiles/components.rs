use bevy::prelude::*;

use crate::plugins::combat::components::Damage;

/// A short-lived ranged attack. Always a damage source, never a target.
#[derive(Component, Debug, Clone, PartialEq)]
#[require(Damage)]
pub struct Projectile {
    pub owner: Entity,
    /// Spawn point; travel is measured from here.
    pub origin: Vec2,
    pub max_travel: f32,
}

impl Projectile {
    /// Whether the projectile has flown past its range when at `pos`.
    #[inline]
    pub fn is_spent(&self, pos: Vec2) -> bool {
        (pos.x - self.origin.x).abs() >= self.max_travel
    }
}
