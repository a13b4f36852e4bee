//! Player controller
//!
//! Movement is discrete (one call per input action) and fully resolved in
//! the call: a rejected move applies damage instead of moving. Jumps are
//! integrated once per tick by [`tick_jump`].

use glam::Vec2;

use super::collision::point_hits_wall;
use super::state::{DamageReason, GameOutcome, GamePhase, GameSession, JumpState, Player};
use crate::consts::*;
use crate::{Tuning, facing_vector, tile_cell};

/// What happened to a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Position committed
    Moved,
    /// Rejected in place (wall)
    Blocked(DamageReason),
    /// Rejected and sent back to spawn (out of bounds, open tile)
    Respawned(DamageReason),
    /// Session is over; nothing happened
    Ignored,
}

/// Attempt to move the player by a planar offset
pub fn try_move(session: &mut GameSession, dx: f32, dy: f32) -> MoveOutcome {
    if session.is_game_over() {
        return MoveOutcome::Ignored;
    }
    if session.phase == GamePhase::LevelComplete {
        session.phase = GamePhase::Playing;
    }

    let candidate = session.player.planar() + Vec2::new(dx, dy);

    if !session.tuning.in_world(candidate.x, candidate.y) {
        apply_damage(session, 1, DamageReason::OutOfBounds);
        reset_to_spawn(&mut session.player);
        return MoveOutcome::Respawned(DamageReason::OutOfBounds);
    }

    if point_hits_wall(candidate, &session.level.walls, session.player.radius).is_some() {
        apply_damage(session, 1, DamageReason::Wall);
        return MoveOutcome::Blocked(DamageReason::Wall);
    }

    if session.current_level >= FALLING_TILE_LEVEL {
        let hole = session
            .level
            .tiles
            .as_ref()
            .is_some_and(|tiles| tiles.is_hole(tile_cell(candidate)));
        if hole {
            let units = session.tuning.hole_damage;
            apply_damage(session, units, DamageReason::Hole);
            reset_to_spawn(&mut session.player);
            return MoveOutcome::Respawned(DamageReason::Hole);
        }
    }

    session.player.pos.x = candidate.x;
    session.player.pos.y = candidate.y;
    MoveOutcome::Moved
}

/// Turn the player. Unbounded; trig handles wraparound.
pub fn rotate(player: &mut Player, delta_deg: f32) {
    player.facing_deg += delta_deg;
}

/// Begin a jump toward the tile one step ahead. No-op while airborne.
///
/// The target is clamped to the play area. Returns true if a jump started.
pub fn start_jump(player: &mut Player, tuning: &Tuning) -> bool {
    if player.is_jumping() {
        return false;
    }
    let edge = Vec2::splat(tuning.world_half_extent);
    let target = (player.planar() + facing_vector(player.facing_deg) * TILE_SIZE).clamp(-edge, edge);
    player.vertical_velocity = tuning.jump_strength;
    player.jump = JumpState::Jumping { target };
    true
}

/// Integrate jump physics for one tick
pub fn tick_jump(player: &mut Player, tuning: &Tuning, dt: f32) {
    let JumpState::Jumping { target } = player.jump else {
        return;
    };

    player.vertical_velocity += tuning.gravity * dt * JUMP_VELOCITY_SCALE;
    player.pos.z += player.vertical_velocity * dt * JUMP_POSITION_SCALE;

    let planar = player.planar();
    let eased = planar + (target - planar) * JUMP_BLEND;
    player.pos.x = eased.x;
    player.pos.y = eased.y;

    if player.pos.z <= GROUND_Z && player.vertical_velocity < 0.0 {
        player.pos.z = GROUND_Z;
        player.vertical_velocity = 0.0;
        player.jump = JumpState::Grounded;
    }
}

/// Put the player back at spawn, grounded
pub fn reset_to_spawn(player: &mut Player) {
    player.pos = glam::Vec3::from_array(SPAWN_POS);
    player.vertical_velocity = 0.0;
    player.jump = JumpState::Grounded;
}

/// Apply `units` damage units. Returns true if a life was lost.
///
/// Health never goes negative: hitting zero costs a life and refills health.
/// Losing the last life ends the run.
pub fn apply_damage(session: &mut GameSession, units: u32, reason: DamageReason) -> bool {
    if session.is_game_over() || units == 0 {
        return false;
    }
    if session.cheat_mode {
        log::debug!("Ignored {:?} damage (cheat mode)", reason);
        return false;
    }

    session.health -= units as i32 * session.tuning.damage_unit;
    log::debug!("{:?} damage x{} -> health {}", reason, units, session.health);

    if session.health > 0 {
        return false;
    }

    session.lives = session.lives.saturating_sub(1);
    session.health = session.tuning.max_health;
    log::info!("Life lost ({:?}), {} remaining", reason, session.lives);
    if session.lives == 0 {
        session.end_run(GameOutcome::Defeat);
    }
    true
}
