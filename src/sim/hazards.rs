//! Moving hazards and the falling-tile floor

use rand::Rng;

use super::collision::within_radius_2d;
use super::player::apply_damage;
use super::state::{DamageReason, GameSession, MovingHazard};
use crate::consts::FALLING_TILE_LEVEL;
use crate::tile_cell;

/// Map a monotonic parameter onto [0, 1] and back (period 2)
#[inline]
pub fn ping_pong(t: f32) -> f32 {
    let phase = t.rem_euclid(2.0);
    if phase <= 1.0 { phase } else { 2.0 - phase }
}

impl MovingHazard {
    /// Advance along the path by `speed * dt` and update the position
    pub fn advance(&mut self, dt: f32) {
        self.t += self.speed * dt;
        let [from, to] = self.path;
        let p = from.lerp(to, ping_pong(self.t));
        self.pos.x = p.x;
        self.pos.y = p.y;
    }
}

/// Move every hazard, then apply one damage unit per hazard touching the player
pub fn advance_hazards(session: &mut GameSession, dt: f32) {
    let player = session.player.planar();
    let radius = session.player.radius;

    let touching = session
        .level
        .hazards
        .iter_mut()
        .map(|hazard| {
            hazard.advance(dt);
            within_radius_2d(hazard.pos.truncate(), player, hazard.size + radius)
        })
        .filter(|&hit| hit)
        .count();

    for _ in 0..touching {
        apply_damage(session, 1, DamageReason::Hazard);
    }
}

/// Outcome of one falling-tile update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileUpdate {
    /// The tile under the player gave way this tick
    pub collapsed: bool,
    /// Tiles that grew back this tick
    pub regrown: u32,
}

/// Count up the tile under the player, drop it past the threshold,
/// and give every open tile a small chance to regrow.
///
/// Standing on a tile as it drops does no damage; the next move into an open
/// tile does.
pub fn advance_falling_tiles(session: &mut GameSession) -> TileUpdate {
    let mut update = TileUpdate::default();
    if session.current_level < FALLING_TILE_LEVEL {
        return update;
    }
    let GameSession {
        level,
        player,
        tuning,
        rng,
        ..
    } = session;
    let Some(tiles) = level.tiles.as_mut() else {
        return update;
    };

    let regen = tuning.tile_regen_probability.clamp(0.0, 1.0);
    // Regrowth first, so a tile dropped this tick stays open at least one tick
    for tile in tiles.iter_mut().filter(|t| !t.active) {
        if rng.random_bool(regen) {
            tile.active = true;
            tile.stand_ticks = 0;
            update.regrown += 1;
        }
    }

    let cell = tile_cell(player.planar());
    if let Some(tile) = tiles.get_mut(cell).filter(|t| t.active) {
        tile.stand_ticks += 1;
        if tile.stand_ticks > tuning.fall_tile_threshold {
            tile.active = false;
            tile.stand_ticks = 0;
            update.collapsed = true;
            log::debug!("Tile {:?} collapsed", cell);
        }
    }

    if update.regrown > 0 {
        log::debug!("{} tiles regrew", update.regrown);
    }
    update
}
