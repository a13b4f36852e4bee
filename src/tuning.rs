//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A JSON file may override any subset
//! of fields; missing fields keep their default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::TILE_GRID_CELLS;

/// Largest play area the fixed tile grid still covers
pub const MAX_WORLD_HALF_EXTENT: f32 = TILE_GRID_CELLS as f32 / 2.0 * TILE_SIZE;

/// Balance values read by every simulation system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_half_extent: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_rot_speed: f32,
    pub player_radius: f32,
    pub jump_strength: f32,
    pub gravity: f32,

    // === Damage / health ===
    /// Health points per damage unit
    pub damage_unit: i32,
    pub max_health: i32,
    pub start_lives: u32,
    pub hole_damage: u32,

    // === Enemies ===
    pub enemy_base_speed: f32,
    /// Seconds between edge spawns
    pub enemy_spawn_interval: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_lifetime_ticks: u32,

    // === Tiles ===
    pub fall_tile_threshold: u32,
    pub tile_regen_probability: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_half_extent: WORLD_HALF_EXTENT,

            player_speed: PLAYER_SPEED,
            player_rot_speed: PLAYER_ROT_SPEED,
            player_radius: PLAYER_RADIUS,
            jump_strength: JUMP_STRENGTH,
            gravity: GRAVITY,

            damage_unit: DAMAGE_UNIT,
            max_health: MAX_HEALTH,
            start_lives: START_LIVES,
            hole_damage: HOLE_DAMAGE,

            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL,

            bullet_speed: BULLET_SPEED,
            bullet_lifetime_ticks: BULLET_LIFETIME_TICKS,

            fall_tile_threshold: FALL_TILE_THRESHOLD,
            tile_regen_probability: TILE_REGEN_PROBABILITY,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON.
    ///
    /// The world extent must be positive and fit the tile grid.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        let extent = tuning.world_half_extent;
        if !(extent > 0.0 && extent <= MAX_WORLD_HALF_EXTENT) {
            return Err(serde::de::Error::custom(format!(
                "world_half_extent {} outside (0, {}]",
                extent, MAX_WORLD_HALF_EXTENT
            )));
        }
        Ok(tuning)
    }

    /// Serialize to pretty JSON (handy as a template for overrides)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// True if a planar point lies inside the square play area
    pub fn in_world(&self, x: f32, y: f32) -> bool {
        x.abs() <= self.world_half_extent && y.abs() <= self.world_half_extent
    }
}
