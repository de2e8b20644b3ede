//! Horizontal facing shared by every actor that can turn around.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Facing implied by a signed horizontal speed. Zero keeps facing right.
    #[inline]
    pub fn from_speed(vx: f32) -> Self {
        if vx < 0.0 { Self::Left } else { Self::Right }
    }

    /// Sprites are authored facing right.
    #[inline]
    pub fn flip_x(self) -> bool {
        self == Self::Left
    }
}
