//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub knife_speed: f32,
    /// Spawn offset from the player center along the throw direction.
    pub knife_offset: f32,
    pub knife_pool_capacity: usize,
    pub knockback: f32,
    /// Post-hit invulnerability window, in milliseconds.
    pub hurt_window_ms: f32,
    pub wander_interval_secs: f32,
    pub max_health: i32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            player_speed: 100.0,
            enemy_speed: 50.0,
            knife_speed: 300.0,
            knife_offset: 16.0,
            knife_pool_capacity: 3,
            knockback: 200.0,
            hurt_window_ms: 250.0,
            wander_interval_secs: 2.0,
            max_health: 3,
        }
    }
}
