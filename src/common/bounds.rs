//! Axis-aligned extents used for playfield bound checks.

use bevy::prelude::*;

/// Half size of an entity's collider, centred on its transform.
#[derive(Component, Debug, Clone, Copy, Deref)]
pub struct HalfExtents(pub Vec2);

impl HalfExtents {
    #[inline]
    pub fn top(&self, tf: &Transform) -> f32 {
        tf.translation.y + self.0.y
    }

    #[inline]
    pub fn bottom(&self, tf: &Transform) -> f32 {
        tf.translation.y - self.0.y
    }

    /// X of the leading edge when facing `sign` (-1 or +1).
    #[inline]
    pub fn front(&self, tf: &Transform, sign: f32) -> f32 {
        tf.translation.x + self.0.x * sign
    }
}
