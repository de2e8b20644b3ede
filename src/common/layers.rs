//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
    PlayerProjectile,
    /// Invisible turn markers. They collide with nothing and are only seen by patrol rays.
    PatrolBoundary,
    Goal,
}
