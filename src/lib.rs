//! Hazard Run - a small 3D arcade maze runner
//!
//! Core modules:
//! - `sim`: Simulation core (player, combat, hazards, progression)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, windowing and input-device binding live outside this crate.
//! A renderer reads [`sim::GameSession::snapshot`]; an input layer feeds
//! [`sim::TickInput`] or calls the session's action methods directly.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::{IVec2, Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Half extent of the square play area (world spans -600..600 on x and y)
    pub const WORLD_HALF_EXTENT: f32 = 600.0;
    /// Ground plane height
    pub const GROUND_Z: f32 = 0.0;

    /// Player spawn point
    pub const SPAWN_POS: [f32; 3] = [0.0, 570.0, 0.0];
    /// Initial facing (degrees, toward -y)
    pub const SPAWN_FACING_DEG: f32 = -90.0;
    /// Distance covered by one move action
    pub const PLAYER_SPEED: f32 = 18.0;
    /// Degrees turned by one rotate action
    pub const PLAYER_ROT_SPEED: f32 = 12.0;
    pub const PLAYER_RADIUS: f32 = 25.0;
    /// Head height, used for the first-person eye
    pub const PLAYER_HEIGHT: f32 = 140.0;

    /// Jump tuning. The 10x / 20x integration factors are part of the feel.
    pub const JUMP_STRENGTH: f32 = 22.0;
    pub const GRAVITY: f32 = -1.2;
    pub const JUMP_VELOCITY_SCALE: f32 = 10.0;
    pub const JUMP_POSITION_SCALE: f32 = 20.0;
    /// Fraction of the remaining horizontal distance closed per tick mid-jump
    pub const JUMP_BLEND: f32 = 0.2;

    /// One damage unit in health points
    pub const DAMAGE_UNIT: i32 = 20;
    pub const MAX_HEALTH: i32 = 100;
    pub const START_LIVES: u32 = 5;
    /// Damage units for stepping into an open tile
    pub const HOLE_DAMAGE: u32 = 2;

    /// Enemy defaults
    pub const ENEMY_BASE_SPEED: f32 = 8.0;
    /// Enemy speed is per 1/10 s; scale to units per second
    pub const ENEMY_SPEED_SCALE: f32 = 10.0;
    /// Enemies closer than this stop steering (avoids normalising ~0 vectors)
    pub const ENEMY_STOP_DISTANCE: f32 = 5.0;
    pub const ENEMY_CONTACT_RADIUS: f32 = 25.0;
    /// Bullet-vs-enemy box half extents
    pub const ENEMY_HALF_WIDTH: f32 = 25.0;
    pub const ENEMY_HALF_HEIGHT: f32 = 62.5;
    /// Seconds between edge spawns
    pub const ENEMY_SPAWN_INTERVAL: f32 = 7.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 900.0;
    pub const BULLET_RADIUS: f32 = 6.0;
    pub const BULLET_LIFETIME_TICKS: u32 = 60;
    /// Spawn offset ahead of the player and above the ground
    pub const BULLET_FORWARD_OFFSET: f32 = 40.0;
    pub const BULLET_HEIGHT: f32 = 50.0;
    pub const KILL_SCORE: u64 = 15;

    /// Collectibles
    pub const COIN_SCORE: u64 = 10;
    pub const HEALTH_PICKUP: i32 = 20;
    /// Pickup reach beyond the player radius
    pub const PICKUP_MARGIN: f32 = 10.0;

    /// Falling tiles
    pub const TILE_SIZE: f32 = 100.0;
    pub const FALL_TILE_THRESHOLD: u32 = 120;
    pub const TILE_REGEN_PROBABILITY: f64 = 0.001;
    /// First level that carries a falling-tile floor
    pub const FALLING_TILE_LEVEL: u32 = 3;

    pub const MAX_LEVELS: u32 = 3;
}

/// Planar distance between two points
#[inline]
pub fn distance_2d(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Squared 3D distance (avoids the sqrt for radius tests)
#[inline]
pub fn distance_sq_3d(a: Vec3, b: Vec3) -> f32 {
    (a - b).length_squared()
}

/// Clamp a health value into `[0, max]`
#[inline]
pub fn clamp_health(health: i32, max: i32) -> i32 {
    health.clamp(0, max)
}

/// Unit vector in the XY plane for a facing angle in degrees
#[inline]
pub fn facing_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Integer tile cell containing a planar position (floor division by tile size)
#[inline]
pub fn tile_cell(pos: Vec2) -> IVec2 {
    (pos / consts::TILE_SIZE).floor().as_ivec2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_vector() {
        let v = facing_vector(-90.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y + 1.0).abs() < 1e-5);

        let v = facing_vector(0.0);
        assert!((v.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_tile_cell_floors_negative() {
        assert_eq!(tile_cell(Vec2::new(-1.0, 0.0)), IVec2::new(-1, 0));
        assert_eq!(tile_cell(Vec2::new(-600.0, 599.0)), IVec2::new(-6, 5));
        assert_eq!(tile_cell(Vec2::new(0.0, 570.0)), IVec2::new(0, 5));
    }

    #[test]
    fn test_clamp_health() {
        assert_eq!(clamp_health(-40, 100), 0);
        assert_eq!(clamp_health(140, 100), 100);
        assert_eq!(clamp_health(60, 100), 60);
    }
}
