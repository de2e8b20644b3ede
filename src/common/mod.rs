//! Common, shared types.

pub mod anim;
pub mod bounds;
pub mod facing;
pub mod layers;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
