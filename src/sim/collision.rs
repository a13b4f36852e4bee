//! Collision predicates
//!
//! Walls use a padded bounding rectangle rather than exact segment distance,
//! and bullets test against a fixed enemy box. Both are coarse on purpose:
//! gameplay balance is tuned around these shapes.

use glam::{Vec2, Vec3};

use super::state::Wall;
use crate::consts::{BULLET_RADIUS, ENEMY_HALF_HEIGHT, ENEMY_HALF_WIDTH};

/// Result of testing a point against a set of walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    /// Index of the first wall hit
    pub wall: usize,
}

/// First wall whose padded bounding rectangle contains `p`
pub fn point_hits_wall(p: Vec2, walls: &[Wall], pad: f32) -> Option<WallHit> {
    walls
        .iter()
        .position(|w| {
            let (min, max) = w.padded_bounds(pad);
            p.cmpge(min).all() && p.cmple(max).all()
        })
        .map(|wall| WallHit { wall })
}

/// Bullet point (grown by its radius) against the enemy hit box.
///
/// The box is centered `ENEMY_HALF_HEIGHT` above the enemy's feet. Its height
/// (125) does not track the rendered enemy scale; kept as-is for balance.
pub fn bullet_hits_enemy(bullet: Vec3, enemy: Vec3) -> bool {
    let center = enemy + Vec3::Z * ENEMY_HALF_HEIGHT;
    let reach = Vec3::new(
        ENEMY_HALF_WIDTH + BULLET_RADIUS,
        ENEMY_HALF_WIDTH + BULLET_RADIUS,
        ENEMY_HALF_HEIGHT + BULLET_RADIUS,
    );
    (bullet - center).abs().cmple(reach).all()
}

/// Strict planar proximity test
#[inline]
pub fn within_radius_2d(a: Vec2, b: Vec2, radius: f32) -> bool {
    (a - b).length_squared() < radius * radius
}

/// Strict 3D proximity test
#[inline]
pub fn within_radius_3d(a: Vec3, b: Vec3, radius: f32) -> bool {
    crate::distance_sq_3d(a, b) < radius * radius
}
