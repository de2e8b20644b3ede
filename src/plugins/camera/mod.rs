//! Camera plugin (render-only).
//!
//! # Aliasing
//! A system cannot have `Query<&Transform>` and `Query<&mut Transform>` at the same time
//! unless Bevy can prove those queries are disjoint. We encode disjointness using
//! `Without<...>` filters.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      follow_player, then pin HUD anchors to the camera's top-left
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::enemies::patrol::draw_patrol_sensors;
use crate::plugins::hud::HudAnchor;
use crate::plugins::player::Player;

/// Visible half extents of the 2D view in world units.
const VIEW_HALF: Vec2 = Vec2::new(640.0, 360.0);

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            (follow_player, anchor_hud.after(follow_player))
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, draw_patrol_sensors);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    // Disjointness proof: Player entities are not MainCamera entities.
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    // Disjointness proof: MainCamera entities are not Player entities.
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let alpha = 1.0 - (-main_cam.responsiveness * dt).exp();

    tf_cam.translation.x += (tf_player.translation.x - tf_cam.translation.x) * alpha;
    tf_cam.translation.y += (tf_player.translation.y - tf_cam.translation.y) * alpha;
}

fn anchor_hud(
    q_cam: Query<&Transform, (With<MainCamera>, Without<HudAnchor>)>,
    mut q_hud: Query<(&mut Transform, &HudAnchor, Option<&Sprite>), Without<MainCamera>>,
) {
    let Ok(tf_cam) = q_cam.single() else {
        return;
    };
    let top_left = tf_cam.translation.truncate() + Vec2::new(-VIEW_HALF.x, VIEW_HALF.y);

    for (mut tf, anchor, sprite) in &mut q_hud {
        // Sprites are centred; shift by half their size so the left edge stays put.
        let half = sprite.and_then(|s| s.custom_size).unwrap_or(Vec2::ZERO) * 0.5;
        tf.translation.x = top_left.x + anchor.0.x + half.x;
        tf.translation.y = top_left.y - anchor.0.y - half.y;
    }
}
