//! Tunable gameplay constants.
//!
//! Units are world pixels and seconds; the world is y-up, so "upward" velocities are
//! positive and falling out of the playfield means dropping below a lower y limit.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub gravity: f32,

    // Player
    pub player_speed: f32,
    pub player_health: i32,
    pub player_consecutive_jumps: u32,
    pub player_bounce_velocity: f32,
    pub invulnerability: Duration,
    pub damage_tint: Color,

    // Enemy
    pub enemy_speed: f32,
    pub enemy_health: i32,
    pub enemy_damage: i32,
    pub enemy_max_patrol_distance: f32,
    pub patrol_turn_cooldown: Duration,
    pub sensor_length: f32,
    pub sensor_steepness: f32,
    pub sensor_precision: f32,

    // Projectiles
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub projectile_max_travel: f32,
    pub projectile_spawn_offset: f32,

    // Terminal state / playfield
    pub terminal_impulse: f32,
    pub playfield_bottom: f32,
    pub enemy_cull_y: f32,

    pub debug_sensors: bool,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            gravity: 500.0,

            player_speed: 150.0,
            player_health: 100,
            player_consecutive_jumps: 1,
            player_bounce_velocity: 250.0,
            invulnerability: Duration::from_millis(1000),
            damage_tint: Color::WHITE,

            enemy_speed: 70.0,
            enemy_health: 20,
            enemy_damage: 10,
            enemy_max_patrol_distance: 200.0,
            patrol_turn_cooldown: Duration::from_millis(100),
            sensor_length: 30.0,
            sensor_steepness: 0.4,
            sensor_precision: 1.0,

            projectile_speed: 300.0,
            projectile_damage: 10,
            projectile_max_travel: 300.0,
            projectile_spawn_offset: 18.0,

            terminal_impulse: 200.0,
            playfield_bottom: -400.0,
            enemy_cull_y: -400.0,

            debug_sensors: false,
        }
    }
}
