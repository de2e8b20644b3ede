//! Animation requests.
//!
//! Clip registration and playback belong to the renderer. Gameplay only states which
//! clip should be playing; the renderer watches `Changed<AnimationClip>`.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClip {
    pub name: &'static str,
    pub looping: bool,
}

impl Default for AnimationClip {
    fn default() -> Self {
        Self { name: "idle", looping: true }
    }
}

impl AnimationClip {
    /// Request a clip. Re-requesting the clip that is already playing is a no-op.
    pub fn play(&mut self, name: &'static str, looping: bool) {
        let next = Self { name, looping };
        if *self != next {
            *self = next;
        }
    }
}
