//! HUD: the player's health bar.
//!
//! The bar is presentation only. Gameplay pushes the current health into it through
//! `HealthBar::decrease`; `redraw_health_bars` turns that into a sprite width.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

/// Bar geometry: full width at `max` health.
pub const BAR_WIDTH: f32 = 100.0;
pub const BAR_HEIGHT: f32 = 8.0;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct HealthBar {
    pub max: i32,
    pub value: i32,
    pub width: f32,
}

impl HealthBar {
    pub fn new(max: i32, width: f32) -> Self {
        Self { max, value: max, width }
    }

    /// Show `value`, never below zero.
    pub fn decrease(&mut self, value: i32) {
        self.value = value.max(0);
    }

    /// Shown fraction in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.value as f32 / self.max as f32).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn shown_width(&self) -> f32 {
        self.width * self.fraction()
    }
}

/// Points from a combatant to its bar.
#[derive(Component, Debug, Clone, Copy)]
pub struct HealthBarLink(pub Entity);

/// Screen offset from the camera's top-left corner, applied by the render camera.
#[derive(Component, Debug, Clone, Copy)]
pub struct HudAnchor(pub Vec2);

pub fn plugin(app: &mut App) {
    app.add_systems(PostUpdate, redraw_health_bars);
}

/// Spawn a full bar for `max` health.
pub fn spawn_health_bar(commands: &mut Commands, max: i32) -> Entity {
    commands
        .spawn((
            Name::new("HealthBar"),
            HealthBar::new(max, BAR_WIDTH),
            HudAnchor(Vec2::new(5.0, 5.0)),
            Sprite {
                color: Color::srgb(0.2, 0.85, 0.35),
                custom_size: Some(Vec2::new(BAR_WIDTH, BAR_HEIGHT)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 900.0),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Rescale bars whose value changed.
pub fn redraw_health_bars(mut q: Query<(&HealthBar, &mut Sprite), Changed<HealthBar>>) {
    for (bar, mut sprite) in &mut q {
        let height = sprite.custom_size.map_or(BAR_HEIGHT, |s| s.y);
        sprite.custom_size = Some(Vec2::new(bar.shown_width(), height));
    }
}
