//! Bullets and enemies
//!
//! Removal during iteration goes through `retain`/`retain_mut`; cross-collection
//! hits are recorded in a flag vector and compacted after the pass.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::collision::{bullet_hits_enemy, within_radius_3d};
use super::player::apply_damage;
use super::state::{Bullet, DamageReason, Enemy, GameSession};
use crate::consts::*;
use crate::{Tuning, facing_vector};

/// Spawn a bullet just ahead of the player. Returns false once the run is over.
pub fn fire_bullet(session: &mut GameSession) -> bool {
    if session.is_game_over() {
        return false;
    }
    let dir = facing_vector(session.player.facing_deg).extend(0.0);
    let pos = session.player.pos + dir * BULLET_FORWARD_OFFSET + Vec3::Z * BULLET_HEIGHT;
    session.bullets.push(Bullet {
        pos,
        vel: dir * session.tuning.bullet_speed,
        ticks_left: session.tuning.bullet_lifetime_ticks,
    });
    true
}

/// Move bullets, resolve hits against enemies and expire old bullets.
///
/// A bullet kills at most one enemy. Returns the number of kills.
pub fn advance_bullets(session: &mut GameSession, dt: f32) -> u32 {
    let GameSession {
        bullets,
        enemies,
        score,
        tuning,
        ..
    } = session;

    let mut enemy_hit = vec![false; enemies.len()];
    let mut kills = 0u32;

    bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel * dt;
        bullet.ticks_left = bullet.ticks_left.saturating_sub(1);

        if !tuning.in_world(bullet.pos.x, bullet.pos.y) {
            return false;
        }

        let hit = enemies
            .iter()
            .enumerate()
            .find(|(i, enemy)| !enemy_hit[*i] && bullet_hits_enemy(bullet.pos, enemy.pos))
            .map(|(i, _)| i);
        if let Some(i) = hit {
            enemy_hit[i] = true;
            kills += 1;
            return false;
        }

        bullet.ticks_left > 0
    });

    if kills > 0 {
        let mut flags = enemy_hit.iter();
        enemies.retain(|_| !flags.next().copied().unwrap_or(false));
        *score += u64::from(kills) * KILL_SCORE;
        log::debug!("{} enemies shot, score {}", kills, score);
    }
    kills
}

/// Steer enemies toward the player and resolve contact.
///
/// An enemy touching the player is removed and deals one damage unit.
pub fn advance_enemies(session: &mut GameSession, dt: f32) {
    let target = session.player.planar();
    let player_pos = session.player.pos;
    let reach = session.player.radius + ENEMY_CONTACT_RADIUS;
    let mut contacts = 0u32;

    session.enemies.retain_mut(|enemy| {
        let to_player = target - enemy.pos.truncate();
        let dist = to_player.length();
        if dist > ENEMY_STOP_DISTANCE {
            let step = to_player / dist * enemy.speed * ENEMY_SPEED_SCALE * dt;
            enemy.pos.x += step.x;
            enemy.pos.y += step.y;
        }

        if within_radius_3d(enemy.pos, player_pos, reach) {
            contacts += 1;
            return false;
        }
        true
    });

    for _ in 0..contacts {
        apply_damage(session, 1, DamageReason::Enemy);
    }
}

/// Accumulate time and drop one enemy on the world edge every interval
pub fn tick_edge_spawner(session: &mut GameSession, dt: f32) {
    session.enemy_spawn_timer += dt;
    if session.enemy_spawn_timer >= session.tuning.enemy_spawn_interval {
        session.enemy_spawn_timer = 0.0;
        let enemy = spawn_at_edge(session.current_level, &session.tuning, &mut session.rng);
        log::info!(
            "Edge spawn at ({:.0}, {:.0}), {} enemies",
            enemy.pos.x,
            enemy.pos.y,
            session.enemies.len() + 1
        );
        session.enemies.push(enemy);
    }
}

fn enemy_health(level: u32) -> i32 {
    50 + level as i32 * 10
}

/// Build the enemy wave for a level (replaces any existing enemies)
pub fn spawn_wave(level: u32, base_speed: f32, rng: &mut impl Rng) -> Vec<Enemy> {
    let make = |pos: Vec2, speed: f32| Enemy {
        pos: pos.extend(0.0),
        speed,
        health: enemy_health(level),
        cooldown: 0.0,
    };

    match level {
        0 | 1 => vec![
            make(Vec2::new(-300.0, -150.0), base_speed),
            make(Vec2::new(300.0, -150.0), base_speed),
        ],
        2 => (0..3)
            .map(|_| make(random_point(&mut *rng, 500), base_speed + 2.0))
            .collect(),
        _ => (0..4)
            .map(|_| make(random_point(&mut *rng, 400), base_speed + 4.0))
            .collect(),
    }
}

fn random_point(rng: &mut impl Rng, bound: i32) -> Vec2 {
    let x = rng.random_range(-bound..=bound) as f32;
    let y = rng.random_range(-bound..=bound) as f32;
    Vec2::new(x, y)
}

/// One enemy at a random point on a random world edge
pub fn spawn_at_edge(level: u32, tuning: &Tuning, rng: &mut impl Rng) -> Enemy {
    let h = (tuning.world_half_extent as i32).max(0);
    let side = rng.random_range(0..4);
    let along = rng.random_range(-h..=h) as f32;
    let h = h as f32;
    let pos = match side {
        0 => Vec2::new(along, h),
        1 => Vec2::new(along, -h),
        2 => Vec2::new(-h, along),
        _ => Vec2::new(h, along),
    };
    let jitter = rng.random::<f32>() * 2.0;
    let speed = tuning.enemy_base_speed + level.saturating_sub(1) as f32 * 2.0 + jitter;

    Enemy {
        pos: pos.extend(0.0),
        speed,
        health: enemy_health(level),
        cooldown: 0.0,
    }
}
