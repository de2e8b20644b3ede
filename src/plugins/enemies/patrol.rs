//! Patrol controller: walk, sense ahead, turn around.
//!
//! Turning is driven by two conditions, either of which is enough:
//! - the forward sensor ray hits the patrol surface (a turn marker / platform edge),
//! - the distance walked since the last turn reached `max_distance`.
//!
//! A cooldown since the last turn gates both, so a sensor that keeps reporting a hit on
//! the ticks right after a turn cannot make the enemy oscillate.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{Enemy, EnemyLifeState};
use crate::common::{bounds::HalfExtents, facing::Facing, tunables::Tunables};
use crate::plugins::combat::components::Contacts;
use crate::plugins::core::PendingDespawn;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Patrol {
    /// Signed walking speed; the sign flips on every turn.
    pub speed: f32,
    /// Fixed-clock time of the last turn.
    pub last_turn: Duration,
    /// Horizontal distance walked since the last turn.
    pub distance: f32,
    pub max_distance: f32,
    pub cooldown: Duration,
    last_x: Option<f32>,
}

impl Patrol {
    pub fn new(speed: f32, max_distance: f32, cooldown: Duration) -> Self {
        Self {
            speed,
            last_turn: Duration::ZERO,
            distance: 0.0,
            max_distance,
            cooldown,
            last_x: None,
        }
    }

    /// Advance one tick with the body at `x`. Returns `true` if the patrol turned.
    ///
    /// Airborne ticks only track position: no distance is accumulated and no turn is taken.
    pub fn step(&mut self, x: f32, grounded: bool, sensor_hit: bool, now: Duration) -> bool {
        let dx = self.last_x.map_or(0.0, |prev| (x - prev).abs());
        self.last_x = Some(x);

        if !grounded {
            return false;
        }

        self.distance += dx;

        let wants_turn = sensor_hit || self.distance >= self.max_distance;
        if !wants_turn || now <= self.last_turn + self.cooldown {
            return false;
        }

        self.speed = -self.speed;
        self.last_turn = now;
        self.distance = 0.0;
        true
    }
}

/// Geometry of one sensor cast, kept for debug drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRay {
    pub start: Vec2,
    pub end: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub hit: bool,
    pub ray: SensorRay,
    pub facing: Facing,
}

/// Forward-and-down probe against the patrol surface.
///
/// Casting is skipped while the body moved no more than `precision` since the last
/// cast in the same direction; the previous reading is reused instead.
#[derive(Component, Debug, Clone)]
pub struct PatrolSensor {
    pub length: f32,
    /// Horizontal reach per unit of drop.
    pub steepness: f32,
    pub precision: f32,
    surface: Option<LayerMask>,
    moved_since_cast: f32,
    last_x: Option<f32>,
    last: Option<SensorReading>,
}

impl PatrolSensor {
    pub fn new(length: f32, steepness: f32, precision: f32) -> Self {
        Self {
            length,
            steepness,
            precision,
            surface: None,
            moved_since_cast: 0.0,
            last_x: None,
            last: None,
        }
    }

    pub fn from_tunables(tunables: &Tunables) -> Self {
        Self::new(tunables.sensor_length, tunables.sensor_steepness, tunables.sensor_precision)
    }

    /// Set (or unset) the collider layers the ray is cast against.
    pub fn set_platform_colliders(&mut self, surface: Option<LayerMask>) {
        self.surface = surface;
        self.last = None;
    }

    pub fn surface(&self) -> Option<LayerMask> {
        self.surface
    }

    /// Hit flag of the latest reading. No reading counts as no hit.
    pub fn hit(&self) -> bool {
        self.last.is_some_and(|r| r.hit)
    }

    pub fn ray(&self) -> Option<SensorRay> {
        self.last.map(|r| r.ray)
    }

    /// Track movement to `x`; `true` when the cached reading is stale.
    pub fn needs_cast(&mut self, x: f32, facing: Facing) -> bool {
        if let Some(prev) = self.last_x {
            self.moved_since_cast += (x - prev).abs();
        }
        self.last_x = Some(x);

        match self.last {
            None => true,
            Some(reading) => reading.facing != facing || self.moved_since_cast > self.precision,
        }
    }

    pub fn record(&mut self, reading: SensorReading) {
        self.last = Some(reading);
        self.moved_since_cast = 0.0;
    }

    /// Ray from the body's leading edge, `length` down and `length * steepness` forward.
    pub fn ray_from(&self, front: Vec2, facing: Facing) -> SensorRay {
        SensorRay {
            start: front,
            end: front + Vec2::new(facing.sign() * self.length * self.steepness, -self.length),
        }
    }

    /// Forget the cached reading (and with it the debug ray).
    pub fn clear(&mut self) {
        self.last = None;
        self.last_x = None;
        self.moved_since_cast = 0.0;
    }
}

pub fn cast_patrol_sensors(
    spatial: SpatialQuery,
    mut q: Query<
        (&Transform, &HalfExtents, &Facing, &EnemyLifeState, &mut PatrolSensor),
        (With<Enemy>, Without<PendingDespawn>),
    >,
) {
    for (tf, extents, facing, life, mut sensor) in &mut q {
        if !matches!(life, EnemyLifeState::Alive) {
            continue;
        }
        let Some(surface) = sensor.surface() else {
            continue;
        };
        if !sensor.needs_cast(tf.translation.x, *facing) {
            continue;
        }

        let front = Vec2::new(extents.front(tf, facing.sign()), tf.translation.y);
        let ray = sensor.ray_from(front, *facing);
        let hit = cast_ray(&spatial, ray, surface);
        sensor.record(SensorReading { hit, ray, facing: *facing });
    }
}

fn cast_ray(spatial: &SpatialQuery, ray: SensorRay, surface: LayerMask) -> bool {
    let delta = ray.end - ray.start;
    let Ok(dir) = Dir2::new(delta) else {
        return false;
    };
    spatial
        .cast_ray(ray.start, dir, delta.length(), true, &SpatialQueryFilter::from_mask(surface))
        .is_some()
}

/// One patrol tick for every alive, grounded enemy.
pub fn patrol(
    time: Res<Time<Fixed>>,
    mut q: Query<
        (
            &Transform,
            &Contacts,
            &PatrolSensor,
            &EnemyLifeState,
            &mut Patrol,
            &mut Facing,
            &mut LinearVelocity,
            Option<&mut Sprite>,
        ),
        (With<Enemy>, Without<PendingDespawn>),
    >,
) {
    let now = time.elapsed();

    for (tf, contacts, sensor, life, mut patrol, mut facing, mut velocity, sprite) in &mut q {
        if !matches!(life, EnemyLifeState::Alive) {
            continue;
        }

        if patrol.step(tf.translation.x, contacts.grounded, sensor.hit(), now) {
            *facing = facing.flipped();
            if let Some(mut sprite) = sprite {
                sprite.flip_x = !sprite.flip_x;
            }
        }

        if contacts.grounded {
            velocity.x = patrol.speed;
        }
    }
}

/// Render-only: draw each cached sensor ray.
pub fn draw_patrol_sensors(
    tunables: Res<Tunables>,
    mut gizmos: Gizmos,
    q: Query<&PatrolSensor, (With<Enemy>, Without<PendingDespawn>)>,
) {
    if !tunables.debug_sensors {
        return;
    }
    for sensor in &q {
        if let Some(ray) = sensor.ray() {
            let color = if sensor.hit() { Color::srgb(1.0, 0.3, 0.3) } else { Color::srgb(0.67, 0.0, 0.67) };
            gizmos.line_2d(ray.start, ray.end, color);
        }
    }
}
